use contracts::domain::a001_survey::aggregate::{Survey, SurveyType};
use contracts::domain::a002_question::aggregate::{CreateQuestionDto, NewQuestion};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::a001_survey::api::{detail_key, fetch_survey, publish_survey, CACHE_PREFIX};
use crate::domain::a001_survey::ui::badge::{SurveyStatusBadge, SurveyTypeBadge};
use crate::domain::a001_survey::ui::builder::question_editor::QuestionEditor;
use crate::domain::a002_question::api::{create_question, fetch_questions, questions_key};
use crate::domain::a002_question::ui::table::question_columns;
use crate::shared::api_client::use_api;
use crate::shared::components::data_table::DataTable;
use crate::shared::components::page_header::PageHeader;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::modal::{ConfirmModal, Modal};
use crate::shared::navigation::{survey_section_path, use_navigator, SURVEYS_PATH};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DETAIL;
use crate::shared::query_cache::{use_query, use_query_cache};
use crate::shared::toast::use_toast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurveyAction {
    Publish,
    AddQuestion,
    Take,
}

/// Actions offered for a survey in its current state.
/// Distributions, responses and analytics are always reachable.
pub fn available_actions(survey: &Survey) -> Vec<SurveyAction> {
    let mut actions = Vec::new();
    if survey.can_publish() {
        actions.push(SurveyAction::Publish);
    }
    if survey.survey_type == SurveyType::Internal {
        actions.push(SurveyAction::AddQuestion);
    }
    if survey.accepts_responses() {
        actions.push(SurveyAction::Take);
    }
    actions
}

/// Next `order` for a question appended after `existing` ones
pub fn new_question_dto(
    survey: &Survey,
    existing: usize,
    text: &str,
    required: bool,
) -> Result<CreateQuestionDto, String> {
    let question = NewQuestion::new(text, required, u32::try_from(existing).unwrap_or(u32::MAX));
    question.validate()?;
    Ok(CreateQuestionDto {
        survey_id: survey.id,
        question,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpenModal {
    AddQuestion,
    ConfirmPublish,
}

#[component]
pub fn SurveyDetails() -> impl IntoView {
    let params = use_params_map();
    let api = StoredValue::new(use_api());
    let cache = use_query_cache();
    let toast = use_toast();
    let navigator = use_navigator();

    let survey_id = Signal::derive(move || params.with(|p| p.get("id").unwrap_or_default()));

    let survey_query = use_query(
        Signal::derive(move || detail_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_survey(&api, &id).await }
        },
    );
    let questions_query = use_query(
        Signal::derive(move || questions_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_questions(&api, &id).await }
        },
    );

    let busy = RwSignal::new(false);
    let modal = RwSignal::new(None::<OpenModal>);

    let actions = Memo::new(move |_| {
        survey_query
            .data
            .with(|s| s.as_ref().map(available_actions).unwrap_or_default())
    });
    let has_action = move |action: SurveyAction| actions.with(|a| a.contains(&action));
    let question_count = Signal::derive(move || {
        questions_query.data.with(|q| q.as_ref().map(Vec::len).unwrap_or(0))
    });

    let confirm_publish = Callback::new(move |_: ()| {
        let id = survey_id.get_untracked();
        busy.set(true);
        let api = api.get_value();
        spawn_local(async move {
            match publish_survey(&api, &id).await {
                Ok(_) => {
                    log::info!("Published survey {}", id);
                    cache.invalidate(CACHE_PREFIX);
                    toast.success("Survey published successfully!");
                    let _ = modal.try_set(None);
                }
                Err(e) => toast.error(format!("Error publishing survey: {}", e)),
            }
            let _ = busy.try_set(false);
        });
    });

    let add_question = Callback::new(move |(text, required): (String, bool)| {
        let dto = survey_query.data.with_untracked(|s| {
            s.as_ref()
                .ok_or_else(|| "The survey is still loading".to_string())
                .and_then(|s| new_question_dto(s, question_count.get_untracked(), &text, required))
        })?;
        let api = api.get_value();
        busy.set(true);
        spawn_local(async move {
            match create_question(&api, &dto).await {
                Ok(question) => {
                    log::info!("Added question {}", question.id.as_string());
                    cache.invalidate(CACHE_PREFIX);
                    toast.success("Question added");
                }
                Err(e) => toast.error(format!("Error creating question: {}", e)),
            }
            let _ = busy.try_set(false);
        });
        Ok(())
    });

    let go_section = move |section: &'static str| {
        navigator.go(&survey_section_path(&survey_id.get_untracked(), section));
    };

    let title = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().map(|s| s.title.clone()))
            .unwrap_or_else(|| "Survey".to_string())
    });

    let summary = move || {
        survey_query.data.get().map(|survey| {
            let take_path = survey_section_path(&survey.id.as_string(), "take");
            view! {
                <dl class="details-grid">
                    <dt>"Type"</dt>
                    <dd><SurveyTypeBadge survey_type=survey.survey_type /></dd>
                    <dt>"Status"</dt>
                    <dd><SurveyStatusBadge status=survey.status() /></dd>
                    <dt>"Description"</dt>
                    <dd>{survey.description.clone().filter(|d| !d.is_empty()).unwrap_or_else(|| "-".to_string())}</dd>
                    {survey.external_url.clone().map(|url| view! {
                        <dt>"External URL"</dt>
                        <dd>
                            <a href=url.clone() target="_blank" rel="noopener noreferrer">{url.clone()}</a>
                        </dd>
                    })}
                    {survey.accepts_responses().then(|| view! {
                        <dt>"Survey URL"</dt>
                        <dd><A href=take_path.clone()>{take_path.clone()}</A></dd>
                    })}
                    <dt>"Created"</dt>
                    <dd>{format_datetime(&survey.created_at)}</dd>
                    <dt>"Last updated"</dt>
                    <dd>{format_datetime(&survey.updated_at)}</dd>
                </dl>
            }
        })
    };

    view! {
        <PageFrame page_id="a001_survey--detail" category=PAGE_CAT_DETAIL>
            <PageHeader title=title back_href=SURVEYS_PATH.to_string()>
                <Flex gap=FlexGap::Small>
                    <Show when=move || has_action(SurveyAction::Publish)>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=busy
                            on_click=move |_| modal.set(Some(OpenModal::ConfirmPublish))
                        >
                            {icon("check")}
                            " Publish"
                        </Button>
                    </Show>
                    <Show when=move || has_action(SurveyAction::Take)>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| go_section("take")
                        >
                            {icon("message")}
                            " Take survey"
                        </Button>
                    </Show>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| go_section("distributions")>
                        {icon("send")}
                        " Distributions"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| go_section("responses")>
                        {icon("responses")}
                        " Responses"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| go_section("analytics")>
                        {icon("chart")}
                        " Analytics"
                    </Button>
                </Flex>
            </PageHeader>

            <div class="page__content">
                {move || survey_query.error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                <Show
                    when=move || !survey_query.is_loading.get()
                    fallback=|| view! { <Spinner /> }
                >
                    {summary}
                </Show>

                <Show when=move || has_action(SurveyAction::AddQuestion)>
                    <div class="section">
                        <div class="section__header">
                            <h2 class="section__title">"Questions"</h2>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| modal.set(Some(OpenModal::AddQuestion))
                            >
                                {icon("plus")}
                                " Add question"
                            </Button>
                        </div>
                        <DataTable
                            data=Signal::derive(move || questions_query.data.get().unwrap_or_default())
                            columns=question_columns()
                            loading=Signal::derive(move || questions_query.is_loading.get())
                            empty_message="This survey has no questions yet"
                        />
                    </div>
                </Show>
            </div>

            {move || match modal.get() {
                Some(OpenModal::ConfirmPublish) => view! {
                    <ConfirmModal
                        title="Are you sure you want to publish this survey?"
                        message="All of your recipients will receive the survey in their inbox. If it's scheduled, it will be sent out at the scheduled time."
                        confirm_label="Publish"
                        busy=busy
                        on_confirm=confirm_publish
                        on_cancel=Callback::new(move |_| modal.set(None))
                    />
                }
                .into_any(),
                Some(OpenModal::AddQuestion) => view! {
                    <Modal title="Add question" on_close=Callback::new(move |_| modal.set(None))>
                        <QuestionEditor on_submit=add_question busy=busy />
                    </Modal>
                }
                .into_any(),
                None => ().into_any(),
            }}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a001_survey::aggregate::SurveyId;

    fn survey(survey_type: SurveyType, is_draft: bool) -> Survey {
        Survey {
            id: SurveyId::new_v4(),
            title: "Team pulse".to_string(),
            description: None,
            survey_type,
            external_url: None,
            is_draft,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_draft_internal_actions() {
        assert_eq!(
            available_actions(&survey(SurveyType::Internal, true)),
            vec![SurveyAction::Publish, SurveyAction::AddQuestion]
        );
    }

    #[test]
    fn test_published_internal_survey_can_be_taken() {
        assert_eq!(
            available_actions(&survey(SurveyType::Internal, false)),
            vec![SurveyAction::AddQuestion, SurveyAction::Take]
        );
    }

    #[test]
    fn test_external_survey_has_no_questions_or_take_page() {
        assert_eq!(
            available_actions(&survey(SurveyType::External, true)),
            vec![SurveyAction::Publish]
        );
        assert!(available_actions(&survey(SurveyType::External, false)).is_empty());
    }

    #[test]
    fn test_new_question_is_appended() {
        let s = survey(SurveyType::Internal, true);
        let dto = new_question_dto(&s, 3, "  Anything else? ", false).unwrap();
        assert_eq!(dto.survey_id, s.id);
        assert_eq!(dto.question.order, 3);
        assert_eq!(dto.question.text, "Anything else?");
        assert_eq!(
            new_question_dto(&s, 0, " ", true).unwrap_err(),
            "Question text is required"
        );
    }
}
