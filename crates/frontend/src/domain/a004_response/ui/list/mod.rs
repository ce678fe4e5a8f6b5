use contracts::domain::a004_response::aggregate::{ResponseAnswers, SurveyResponse};
use contracts::domain::common::AggregateId;
use contracts::shared::page::PageSizeQuery;
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::domain::a001_survey::api::{detail_key, fetch_survey};
use crate::domain::a004_response::api::{
    answers_key, fetch_response_answers, fetch_responses, list_key,
};
use crate::shared::components::data_table::{
    CellValue, Column, DataTable, PageInfo, Pagination, TableRow,
};
use crate::shared::components::page_header::PageHeader;
use crate::shared::config::use_config;
use crate::shared::date_utils::format_datetime;
use crate::shared::modal::Modal;
use crate::shared::navigation::survey_path;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::use_query;

pub const ANONYMOUS: &str = "anonymous";

/// First 8 characters of an id, for compact columns
pub fn short_id(id: &str) -> String {
    if id.chars().count() <= 8 {
        return id.to_string();
    }
    format!("{}...", id.chars().take(8).collect::<String>())
}

impl TableRow for SurveyResponse {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "id" => short_id(&self.id.as_string()).into(),
            "respondent" => self.respondent().unwrap_or(ANONYMOUS).into(),
            "source" => self.source.display_name().into(),
            "distribution" => self
                .distribution_id
                .map(|id| short_id(&id.as_string()))
                .into(),
            "created_at" => format_datetime(&self.created_at).into(),
            "completed_at" => self.completed_at.as_ref().map(format_datetime).into(),
            _ => CellValue::Null,
        }
    }
}

pub fn response_columns() -> Vec<Column<SurveyResponse>> {
    vec![
        Column::new("id", "Response"),
        Column::new("respondent", "Respondent"),
        Column::new("source", "Source").render_view(|value, _row: &SurveyResponse| {
            let label = value.to_string();
            view! {
                <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                    {label}
                </Badge>
            }
            .into_any()
        }),
        Column::new("distribution", "Distribution"),
        Column::new("created_at", "Started"),
        Column::new("completed_at", "Completed"),
    ]
}

/// Header lines of the answers dialog
pub fn answers_meta(answers: &ResponseAnswers) -> Vec<(&'static str, String)> {
    let respondent = [&answers.respondent_name, &answers.respondent_email]
        .into_iter()
        .filter_map(|v| v.as_deref())
        .find(|v| !v.trim().is_empty())
        .unwrap_or(ANONYMOUS)
        .to_string();
    let mut meta = vec![
        ("Respondent", respondent),
        ("Started", format_datetime(&answers.created_at)),
    ];
    if let Some(completed) = answers.completed_at.as_ref() {
        meta.push(("Completed", format_datetime(completed)));
    }
    if let Some(distribution) = answers.distribution.as_ref() {
        meta.push((
            "Invitation",
            format!("{} ({})", distribution.recipient_email, distribution.recipient_method),
        ));
        if let Some(status) = distribution.status.as_deref() {
            meta.push(("Invitation status", status.to_string()));
        }
    }
    meta
}

#[component]
fn ResponseAnswersModal(response_id: String, on_close: Callback<()>) -> impl IntoView {
    let key = answers_key(&response_id);
    let id = StoredValue::new(response_id);
    let query = use_query(Signal::derive(move || key.clone()), move |api| {
        let id = id.get_value();
        async move { fetch_response_answers(&api, &id).await }
    });

    let body = move || {
        query.data.get().map(|answers| {
            let meta = answers_meta(&answers)
                .into_iter()
                .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                .collect_view();
            let rows = answers
                .answers
                .iter()
                .map(|a| {
                    let question = a.question_text.clone();
                    let value = a.display();
                    view! { <dt>{question}</dt><dd>{value}</dd> }
                })
                .collect_view();
            view! {
                <dl class="details-grid response-answers__meta">{meta}</dl>
                <dl class="details-grid">{rows}</dl>
            }
        })
    };

    view! {
        <Modal title="Response details" on_close=on_close>
            <div class="response-answers">
                {move || query.error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                <Show when=move || !query.is_loading.get() fallback=|| view! { <Spinner /> }>
                    {body}
                </Show>
            </div>
        </Modal>
    }
}

#[component]
pub fn ResponseList() -> impl IntoView {
    let params = use_params_map();
    let config = use_config();
    let page = RwSignal::new(1usize);
    let selected = RwSignal::new(None::<String>);

    let survey_id = Signal::derive(move || params.with(|p| p.get("id").unwrap_or_default()));
    let page_query = Signal::derive(move || {
        PageSizeQuery::new(
            u32::try_from(page.get()).unwrap_or(u32::MAX),
            config.default_page_size,
        )
    });

    let survey_query = use_query(
        Signal::derive(move || detail_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_survey(&api, &id).await }
        },
    );
    let query = use_query(
        Signal::derive(move || list_key(&survey_id.get(), &page_query.get())),
        move |api| {
            let id = survey_id.get_untracked();
            let request = page_query.get_untracked();
            async move { fetch_responses(&api, &id, &request).await }
        },
    );

    let go_to_page = Callback::new(move |p: usize| page.set(p));
    let pagination = Signal::derive(move || {
        let requested = page.get();
        query.data.with(|d| {
            d.as_ref()
                .map(|e| Pagination::new(PageInfo::from_envelope(e, requested), go_to_page))
        })
    });

    let title = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().map(|s| format!("Responses: {}", s.title)))
            .unwrap_or_else(|| "Responses".to_string())
    });
    let subtitle = Signal::derive(move || {
        query.data.with(|d| d.as_ref().map(|e| format!("{} responses", e.total)))
    });

    view! {
        <PageFrame page_id="a004_response--list" category=PAGE_CAT_LIST>
            <PageHeader
                title=title
                subtitle=subtitle
                back_href=survey_path(&survey_id.get_untracked())
            />

            <div class="page__content">
                {move || query.error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}
                <DataTable
                    data=Signal::derive(move || {
                        query.data.with(|d| d.as_ref().map(|e| e.items.clone()).unwrap_or_default())
                    })
                    columns=response_columns()
                    loading=Signal::derive(move || query.is_loading.get())
                    pagination=pagination
                    empty_message="No responses yet"
                    on_row_click=Callback::new(move |(response, _): (SurveyResponse, usize)| {
                        selected.set(Some(response.id.as_string()))
                    })
                />
            </div>

            {move || selected.get().map(|response_id| view! {
                <ResponseAnswersModal
                    response_id=response_id
                    on_close=Callback::new(move |_| selected.set(None))
                />
            })}
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contracts::domain::a003_distribution::aggregate::DistributionId;
    use contracts::domain::a004_response::aggregate::{
        ResponseDistribution, ResponseId, ResponseSource,
    };

    fn response(name: Option<&str>, email: Option<&str>) -> SurveyResponse {
        SurveyResponse {
            id: ResponseId::new_v4(),
            respondent_name: name.map(str::to_string),
            respondent_email: email.map(str::to_string),
            source: ResponseSource::Internal,
            distribution_id: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("9c8b7a69-5847-4362"), "9c8b7a69...");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_respondent_falls_back_to_anonymous() {
        assert_eq!(
            response(None, None).field("respondent"),
            CellValue::Text(ANONYMOUS.into())
        );
        assert_eq!(
            response(Some(" "), Some("ann@example.com")).field("respondent"),
            CellValue::Text("ann@example.com".into())
        );
        assert_eq!(
            response(Some("Ann"), Some("ann@example.com")).field("respondent"),
            CellValue::Text("Ann".into())
        );
    }

    #[test]
    fn test_walk_in_response_has_no_distribution() {
        let walk_in = response(Some("Ann"), None);
        assert_eq!(walk_in.field("distribution"), CellValue::Null);
        assert_eq!(walk_in.field("completed_at"), CellValue::Null);
        assert_eq!(walk_in.field("source"), CellValue::Text("Internal".into()));

        let invited = SurveyResponse {
            distribution_id: Some(DistributionId::new_v4()),
            ..walk_in
        };
        assert!(invited
            .field("distribution")
            .as_str()
            .is_some_and(|s| s.ends_with("...")));
    }

    #[test]
    fn test_answers_meta_includes_invitation() {
        let mut answers = ResponseAnswers {
            response_id: ResponseId::new_v4(),
            respondent_name: None,
            respondent_email: None,
            created_at: Utc::now(),
            completed_at: None,
            answers: vec![],
            distribution: None,
        };
        let labels: Vec<&str> = answers_meta(&answers).iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Respondent", "Started"]);
        assert_eq!(answers_meta(&answers)[0].1, ANONYMOUS);

        answers.distribution = Some(ResponseDistribution {
            id: DistributionId::new_v4(),
            recipient_method: "EMAIL".to_string(),
            recipient_email: "ann@example.com".to_string(),
            status: Some("clicked".to_string()),
            scheduled_at: None,
        });
        let meta = answers_meta(&answers);
        assert_eq!(meta[2], ("Invitation", "ann@example.com (EMAIL)".to_string()));
        assert_eq!(meta[3], ("Invitation status", "clicked".to_string()));
    }
}
