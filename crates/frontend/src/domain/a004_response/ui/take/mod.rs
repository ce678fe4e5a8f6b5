pub mod flow;

use contracts::domain::a004_response::aggregate::RespondentData;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_params_map, use_query_map};
use thaw::*;

use self::flow::{Attribution, FlowStage, TakeFlow};
use crate::domain::a001_survey::api::{detail_key, fetch_survey};
use crate::domain::a002_question::api::{fetch_questions, questions_key};
use crate::domain::a003_distribution::api::{mark_clicked, CACHE_PREFIX as DISTRIBUTIONS_PREFIX};
use crate::domain::a004_response::api::{
    create_response, submit_answers, CACHE_PREFIX as RESPONSES_PREFIX,
};
use crate::shared::api_client::use_api;
use crate::shared::components::page_header::PageHeader;
use crate::shared::icons::icon;
use crate::shared::navigation::survey_path;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_USECASE;
use crate::shared::query_cache::{use_query, use_query_cache};
use crate::shared::toast::use_toast;

pub const COMPLETED_MESSAGE: &str =
    "Thank you for completing the survey! Your responses have been recorded.";

fn progress_label((done, total): (usize, usize)) -> String {
    format!("Progress: {} of {}", done, total)
}

#[component]
fn Bubble(#[prop(optional)] mine: bool, children: Children) -> impl IntoView {
    let class = if mine {
        "chat__bubble chat__bubble--mine"
    } else {
        "chat__bubble"
    };
    view! { <div class=class>{children()}</div> }
}

/// Free-text answer box; Enter sends
#[component]
fn AnswerInput(
    initial: String,
    optional: bool,
    on_answer: Callback<Option<String>>,
) -> impl IntoView {
    let text = RwSignal::new(initial);
    let send = move || on_answer.run(Some(text.get_untracked()));

    view! {
        <div class="chat__input">
            <input
                class="chat__text"
                type="text"
                placeholder="Type your answer..."
                bind:value=text
                on:keydown=move |ev| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        send();
                    }
                }
            />
            <Button appearance=ButtonAppearance::Primary on_click=move |_| send()>
                {icon("send")}
                " Send"
            </Button>
            <Show when=move || optional>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_answer.run(None)>
                    "Skip"
                </Button>
            </Show>
        </div>
    }
}

#[component]
pub fn TakeSurvey() -> impl IntoView {
    let params = use_params_map();
    let query = use_query_map();
    let api = StoredValue::new(use_api());
    let cache = use_query_cache();
    let toast = use_toast();

    let survey_id = Signal::derive(move || params.with(|p| p.get("id").unwrap_or_default()));
    let attribution = query.with_untracked(|q| {
        Attribution::from_query(
            q.get("distribution_id").as_deref(),
            q.get("clicked_at").as_deref(),
        )
    });

    // Once per page load, before anything is answered
    if attribution.should_count_click() {
        if let Some(distribution_id) = attribution.distribution_id {
            let api = api.get_value();
            spawn_local(async move {
                let id = distribution_id.as_string();
                match mark_clicked(&api, &id).await {
                    Ok(()) => {
                        log::debug!("Counted click for distribution {}", id);
                        cache.invalidate(DISTRIBUTIONS_PREFIX);
                    }
                    Err(e) => log::warn!("Counting click for distribution {} failed: {}", id, e),
                }
            });
        }
    }

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

    let flow = RwSignal::new(None::<TakeFlow>);
    let error = RwSignal::new(None::<String>);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());

    let stage = Memo::new(move |_| flow.with(|f| f.as_ref().map(|f| f.stage().clone())));
    let accepting = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().is_some_and(|s| s.accepts_responses()))
    });

    let start = move |respondent: RespondentData| {
        let Some(survey_id) = survey_query.data.with_untracked(|s| s.as_ref().map(|s| s.id)) else {
            return;
        };
        let mut request = Err("The survey is still loading".to_string());
        flow.update(|f| {
            if let Some(f) = f {
                request = f.begin_start(survey_id, respondent);
            }
        });
        let dto = match request {
            Ok(dto) => dto,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        let api = api.get_value();
        spawn_local(async move {
            let outcome = match create_response(&api, &dto).await {
                Ok(created) => {
                    log::info!("Started response {} for survey {}", created.id, survey_id);
                    Ok(created.id)
                }
                Err(e) => {
                    log::warn!("Starting response for survey {} failed: {}", survey_id, e);
                    toast.error("Error starting survey. Please try again.");
                    Err(e.to_string())
                }
            };
            let _ = flow.try_update(|f| {
                if let Some(f) = f {
                    f.started(outcome);
                }
            });
        });
    };

    // The flow is built once; later cache refreshes must not reset progress.
    // Invited respondents are already known and start right away.
    Effect::new(move |_| {
        let Some(questions) = questions_query.data.get() else {
            return;
        };
        if !accepting.get() || flow.with_untracked(Option::is_some) {
            return;
        }
        flow.set(Some(TakeFlow::new(questions)));
        if let Some(respondent) = attribution.respondent() {
            start(respondent);
        }
    });

    let start_from_form = move || {
        match RespondentData::from_form(&name.get_untracked(), &email.get_untracked()) {
            Ok(respondent) => start(respondent),
            Err(e) => error.set(Some(e)),
        }
    };

    let on_answer = Callback::new(move |value: Option<String>| {
        let mut outcome = Ok(());
        flow.update(|f| {
            if let Some(f) = f {
                outcome = f.answer(value.as_deref());
            }
        });
        error.set(outcome.err());
    });
    let back = move || {
        error.set(None);
        flow.update(|f| {
            if let Some(f) = f {
                f.back();
            }
        });
    };

    let submit = move || {
        let mut request = Err("The survey is still loading".to_string());
        flow.update(|f| {
            if let Some(f) = f {
                request = f.begin_submit();
            }
        });
        let (response_id, dto) = match request {
            Ok(request) => request,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        error.set(None);
        let api = api.get_value();
        spawn_local(async move {
            let id = response_id.as_string();
            let outcome = match submit_answers(&api, &id, &dto).await {
                Ok(()) => {
                    log::info!("Submitted {} answers for response {}", dto.answers.len(), id);
                    cache.invalidate(RESPONSES_PREFIX);
                    Ok(())
                }
                Err(e) => {
                    log::warn!("Submitting answers for response {} failed: {}", id, e);
                    toast.error("Error submitting answers. Please try again.");
                    Err(e.to_string())
                }
            };
            let _ = flow.try_update(|f| {
                if let Some(f) = f {
                    f.finish(outcome);
                }
            });
        });
    };
    let retry = move || {
        flow.update(|f| {
            if let Some(f) = f {
                f.retry();
            }
        });
    };

    let title = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().map(|s| s.title.clone()))
            .unwrap_or_else(|| "Survey".to_string())
    });
    let progress = Signal::derive(move || {
        flow.with(|f| f.as_ref().map(|f| progress_label(f.progress())))
    });

    let transcript = move || {
        flow.with(|f| f.as_ref().map(TakeFlow::transcript).unwrap_or_default())
            .into_iter()
            .map(|entry| {
                view! {
                    <Bubble>{entry.question}</Bubble>
                    <Bubble mine=true>{entry.answer}</Bubble>
                }
            })
            .collect_view()
    };

    let current = move || match stage.get() {
        None => view! { <Spinner /> }.into_any(),
        Some(FlowStage::Intro) => {
            let description = survey_query
                .data
                .with_untracked(|s| s.as_ref().and_then(|s| s.description.clone()));
            view! {
                <Bubble>
                    <p>{format!("Welcome to \"{}\".", title.get_untracked())}</p>
                    {description.map(|d| view! { <p>{d}</p> })}
                    <p>"Please tell us who you are to begin."</p>
                </Bubble>
                <div class="chat__form">
                    <Input value=name placeholder="Your name" />
                    <Input value=email placeholder="Email (optional)" />
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| start_from_form()>
                        "Start survey"
                    </Button>
                </div>
            }
            .into_any()
        }
        Some(FlowStage::Starting) => view! {
            <Bubble><Spinner size=SpinnerSize::Small /> " Starting the survey..."</Bubble>
        }
        .into_any(),
        Some(FlowStage::Asking(index)) => {
            let (question, answer) = flow.with_untracked(|f| {
                f.as_ref()
                    .map(|f| {
                        (
                            f.current_question().cloned(),
                            f.current_answer().unwrap_or_default().to_string(),
                        )
                    })
                    .unwrap_or_default()
            });
            let Some(question) = question else {
                return ().into_any();
            };
            let optional = !question.required;
            view! {
                <Bubble>
                    {question.text}
                    {optional.then(|| view! { <span class="chat__hint">" (optional)"</span> })}
                </Bubble>
                <AnswerInput initial=answer optional=optional on_answer=on_answer />
                <Show when=move || { index > 0 }>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| back()>
                        "Back"
                    </Button>
                </Show>
            }
            .into_any()
        }
        Some(FlowStage::Review) => view! {
            <Bubble>"That's everything. Ready to submit your answers?"</Bubble>
            <Flex gap=FlexGap::Small>
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| back()>
                    "Back"
                </Button>
                <Button appearance=ButtonAppearance::Primary on_click=move |_| submit()>
                    {icon("send")}
                    " Submit"
                </Button>
            </Flex>
        }
        .into_any(),
        Some(FlowStage::Submitting) => view! {
            <Bubble><Spinner size=SpinnerSize::Small /> " Sending your answers..."</Bubble>
        }
        .into_any(),
        Some(FlowStage::Done) => view! {
            <Bubble>{COMPLETED_MESSAGE}</Bubble>
        }
        .into_any(),
        Some(FlowStage::Failed(message)) => view! {
            <Bubble>{format!("Something went wrong: {}", message)}</Bubble>
            <Button appearance=ButtonAppearance::Primary on_click=move |_| retry()>
                "Try again"
            </Button>
        }
        .into_any(),
    };

    view! {
        <PageFrame page_id="a004_response--take" category=PAGE_CAT_USECASE>
            <PageHeader
                title=title
                subtitle=progress
                back_href=survey_path(&survey_id.get_untracked())
            />

            <div class="page__content">
                {move || survey_query.error.get().or_else(|| questions_query.error.get()).map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                <Show
                    when=move || accepting.get() || survey_query.is_loading.get()
                    fallback=|| view! {
                        <div class="alert alert--info">"This survey is not accepting responses."</div>
                    }
                >
                    <div class="chat">
                        {transcript}
                        {current}
                        {move || error.get().map(|e| view! { <div class="form__error">{e}</div> })}
                    </div>
                </Show>
            </div>
        </PageFrame>
    }
}
