pub mod question_editor;
pub mod wizard;

use contracts::domain::a001_survey::aggregate::SurveyType;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::question_editor::QuestionEditor;
use self::wizard::{QuestionList, SurveyForm, Wizard, WizardStep};
use crate::domain::a001_survey::api::{create_survey, CACHE_PREFIX};
use crate::domain::a002_question::api::create_questions_bulk;
use crate::domain::a003_distribution::ui::form::DistributionForm;
use crate::shared::api_client::use_api;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::navigation::{survey_path, use_navigator, SURVEYS_PATH};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::query_cache::use_query_cache;
use crate::shared::toast::use_toast;

fn step_class(step: WizardStep, current: WizardStep) -> &'static str {
    if step == current {
        "wizard-step wizard-step--active"
    } else if step.number() < current.number() {
        "wizard-step wizard-step--done"
    } else {
        "wizard-step"
    }
}

#[component]
fn SurveyStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let cache = use_query_cache();
    let toast = use_toast();

    let title = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let survey_type_code = RwSignal::new(SurveyType::default().code().to_string());
    let external_url = RwSignal::new(String::new());
    let is_draft = RwSignal::new(true);
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let is_external = move || survey_type_code.get() == SurveyType::External.code();

    let submit = move || {
        let form = SurveyForm {
            title: title.get_untracked(),
            description: description.get_untracked(),
            survey_type: SurveyType::from_code(&survey_type_code.get_untracked())
                .unwrap_or_default(),
            external_url: external_url.get_untracked(),
            is_draft: is_draft.get_untracked(),
        };
        let dto = match form.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match create_survey(&api, &dto).await {
                Ok(survey) => {
                    log::info!("Created survey {}", survey.id.as_string());
                    cache.invalidate(CACHE_PREFIX);
                    toast.success(format!("Survey \"{}\" created", survey.title));
                    wizard.update(|w| {
                        w.survey_created(survey);
                    });
                }
                Err(e) => {
                    toast.error(format!("Error creating survey: {}", e));
                    let _ = saving.try_set(false);
                }
            }
        });
    };

    view! {
        <div class="form">
            <div class="form__group">
                <Label>"Title"</Label>
                <Input value=title placeholder="e.g. Customer satisfaction Q3" />
            </div>
            <div class="form__group">
                <Label>"Description"</Label>
                <Textarea value=description placeholder="Optional" attr:rows=3 />
            </div>
            <div class="form__group">
                <Label>"Type"</Label>
                <Select value=survey_type_code>
                    {SurveyType::all()
                        .iter()
                        .map(|t| view! { <option value=t.code()>{t.display_name()}</option> })
                        .collect_view()}
                </Select>
            </div>
            <Show when=is_external>
                <div class="form__group">
                    <Label>"External URL"</Label>
                    <Input value=external_url placeholder="https://" />
                </div>
            </Show>
            <Checkbox checked=is_draft label="Save as draft" />
            {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
            <div class="wizard-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=move |_| submit()
                >
                    {move || if is_external() { "Next: Distribution" } else { "Next: Add Questions" }}
                </Button>
            </div>
        </div>
    }
}

#[component]
fn QuestionsStep(wizard: RwSignal<Wizard>) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let cache = use_query_cache();
    let toast = use_toast();

    let questions = RwSignal::new(QuestionList::default());
    let saving = RwSignal::new(false);

    let add_question = Callback::new(move |(text, required): (String, bool)| {
        questions
            .try_update(|list| list.add(&text, required))
            .unwrap_or_else(|| Err("The builder is no longer active".to_string()))
    });

    let submit = move || {
        let dto = wizard.with_untracked(|w| {
            w.survey()
                .ok_or_else(|| "Create the survey first".to_string())
                .and_then(|survey| questions.with_untracked(|list| list.bulk_dto(survey)))
        });
        let dto = match dto {
            Ok(dto) => dto,
            Err(e) => {
                toast.error(e);
                return;
            }
        };
        saving.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match create_questions_bulk(&api, &dto).await {
                Ok(count) => {
                    log::info!("Saved {} questions for survey {}", count, dto.survey_id);
                    cache.invalidate(CACHE_PREFIX);
                    toast.success("Questions added successfully");
                    wizard.update(|w| {
                        if let Err(e) = w.questions_saved() {
                            log::warn!("{}", e);
                        }
                    });
                }
                Err(e) => {
                    toast.error(format!("Error creating questions: {}", e));
                    let _ = saving.try_set(false);
                }
            }
        });
    };

    let question_rows = move || {
        let items = questions.with(|list| list.items().to_vec());
        if items.is_empty() {
            return view! { <div class="empty-hint">"No questions yet"</div> }.into_any();
        }
        let last = items.len() - 1;
        items
            .into_iter()
            .enumerate()
            .map(|(index, question)| {
                view! {
                    <div class="question-draft">
                        <span class="question-draft__number">{question.order + 1}</span>
                        <div class="question-draft__body">
                            <div class="question-draft__text">{question.text.clone()}</div>
                            <label class="question-draft__required">
                                <input
                                    type="checkbox"
                                    prop:checked=question.required
                                    on:change=move |ev| {
                                        let required = event_target_checked(&ev);
                                        questions.update(|list| list.set_required(index, required));
                                    }
                                />
                                " Required"
                            </label>
                        </div>
                        <Flex gap=FlexGap::Small>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                disabled={index == 0}
                                on_click=move |_| questions.update(|list| {
                                    list.move_question(index, true);
                                })
                            >
                                {icon("arrow-up")}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                disabled={index == last}
                                on_click=move |_| questions.update(|list| {
                                    list.move_question(index, false);
                                })
                            >
                                {icon("arrow-down")}
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                size=ButtonSize::Small
                                on_click=move |_| questions.update(|list| list.remove(index))
                            >
                                {icon("trash")}
                            </Button>
                        </Flex>
                    </div>
                }
            })
            .collect_view()
            .into_any()
    };

    view! {
        <div class="builder-questions">
            <div class="builder-questions__list">{question_rows}</div>
            <QuestionEditor on_submit=add_question busy=saving />
            <div class="wizard-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=saving
                    on_click=move |_| submit()
                >
                    "Next: Distribution"
                </Button>
            </div>
        </div>
    }
}

#[component]
pub fn SurveyBuilder() -> impl IntoView {
    let navigator = use_navigator();
    let wizard = RwSignal::new(Wizard::default());
    let current_step = Memo::new(move |_| wizard.with(|w| w.step()));

    let finish = move || {
        if let Some(id) = wizard.with_untracked(|w| w.survey().map(|s| s.id.as_string())) {
            navigator.go(&survey_path(&id));
        }
    };
    let on_sent = Callback::new(move |_: usize| finish());
    let on_skip = Callback::new(move |_: ()| finish());

    let steps_indicator = move || {
        let current = current_step.get();
        WizardStep::all()
            .iter()
            .map(|step| {
                view! {
                    <div class=step_class(*step, current)>
                        <span class="wizard-step__number">{step.number()}</span>
                        <span class="wizard-step__title">{step.title()}</span>
                    </div>
                }
            })
            .collect_view()
    };

    let step_body = move || match current_step.get() {
        WizardStep::Survey => view! { <SurveyStep wizard=wizard /> }.into_any(),
        WizardStep::Questions => view! { <QuestionsStep wizard=wizard /> }.into_any(),
        WizardStep::Distribution => {
            match wizard.with_untracked(|w| w.survey().map(|s| s.id)) {
                Some(survey_id) => view! {
                    <div class="builder-distribution">
                        <p class="page__subtitle">"Send your survey to recipients via email."</p>
                        <DistributionForm
                            survey_id=survey_id
                            on_sent=on_sent
                            on_cancel=on_skip
                            cancel_label="Skip"
                        />
                    </div>
                }
                .into_any(),
                None => ().into_any(),
            }
        }
    };

    view! {
        <PageFrame page_id="a001_survey--builder" category=PAGE_CAT_USECASE>
            <PageHeader title="New survey" back_href=SURVEYS_PATH.to_string() />
            <div class="page__content">
                <div class="wizard-steps">{steps_indicator}</div>
                <div class="wizard-body">{step_body}</div>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_class() {
        assert_eq!(
            step_class(WizardStep::Survey, WizardStep::Questions),
            "wizard-step wizard-step--done"
        );
        assert_eq!(
            step_class(WizardStep::Questions, WizardStep::Questions),
            "wizard-step wizard-step--active"
        );
        assert_eq!(
            step_class(WizardStep::Distribution, WizardStep::Questions),
            "wizard-step"
        );
    }
}
