use contracts::dashboards::d001_survey_analytics::response::{
    DailyResponseCount, QuestionAnalytics, SurveyAnalytics,
};
use leptos::prelude::*;
use leptos_router::hooks::use_params_map;
use thaw::*;

use crate::dashboards::d001_survey_analytics::api::{
    daily_key, fetch_analytics, fetch_daily_responses, fetch_question_analytics, questions_key,
    summary_key,
};
use crate::domain::a001_survey::api::{detail_key, fetch_survey};
use crate::shared::components::data_table::{CellValue, Column, DataTable, TableRow};
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::{format_stat, StatCard, StatFormat};
use crate::shared::icons::icon;
use crate::shared::navigation::survey_path;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_DASHBOARD;
use crate::shared::query_cache::use_query;

const LABEL_LIMIT: usize = 30;
const PERCENT: StatFormat = StatFormat::Percent { decimals: 1 };

/// Cuts long question texts to 30 characters plus `...`
pub fn truncate_label(text: &str) -> String {
    if text.chars().count() <= LABEL_LIMIT {
        return text.to_string();
    }
    format!("{}...", text.chars().take(LABEL_LIMIT).collect::<String>())
}

/// Bar width for `count` relative to the busiest day, in percent
pub fn bar_percent(count: u64, max: u64) -> f64 {
    if max == 0 {
        return 0.0;
    }
    (count as f64 / max as f64 * 100.0).clamp(0.0, 100.0)
}

/// `(label, value)` lines of the two statistics panels
pub fn response_breakdown(analytics: &SurveyAnalytics) -> Vec<(&'static str, String)> {
    let stats = &analytics.response_stats;
    vec![
        ("Total Responses", stats.total_responses.to_string()),
        ("Completed Responses", stats.completed_responses.to_string()),
        ("Internal Responses", stats.internal_responses.to_string()),
        ("External Responses", stats.external_responses.to_string()),
        ("Recent Responses (7 days)", stats.recent_responses.to_string()),
    ]
}

pub fn distribution_breakdown(analytics: &SurveyAnalytics) -> Vec<(&'static str, String)> {
    let stats = &analytics.distribution_stats;
    vec![
        ("Total Distributions", stats.total.to_string()),
        ("Sent", stats.sent.to_string()),
        ("Opened", stats.opened.to_string()),
        ("Clicked", stats.clicked.to_string()),
        ("Click Rate", format_stat(stats.click_rate, PERCENT)),
    ]
}

impl TableRow for QuestionAnalytics {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "question" => truncate_label(&self.question_text).into(),
            "completion_rate" => self.completion_rate.into(),
            "answered" => self.answered.into(),
            "skipped" => self.skipped.into(),
            _ => CellValue::Null,
        }
    }
}

fn question_columns() -> Vec<Column<QuestionAnalytics>> {
    vec![
        Column::new("question", "Question"),
        Column::new("completion_rate", "Completion Rate")
            .class("data-table__cell--numeric")
            .render_text(|value, _| match value {
                CellValue::Float(rate) => format_stat(*rate, PERCENT),
                other => other.to_string(),
            }),
        Column::new("answered", "Answered").class("data-table__cell--numeric"),
        Column::new("skipped", "Skipped").class("data-table__cell--numeric"),
    ]
}

#[component]
fn DailyResponses(points: Vec<DailyResponseCount>) -> impl IntoView {
    if points.is_empty() {
        return view! { <div class="empty-hint">"No responses in this period"</div> }.into_any();
    }
    let max = points.iter().map(|p| p.count).max().unwrap_or(0);
    points
        .into_iter()
        .map(|point| {
            let width = format!("width: {:.1}%", bar_percent(point.count, max));
            view! {
                <div class="bar-row">
                    <span class="bar-row__label">{point.label()}</span>
                    <div class="bar-row__track">
                        <div class="bar-row__bar" style=width></div>
                    </div>
                    <span class="bar-row__value">{point.count.to_string()}</span>
                </div>
            }
        })
        .collect_view()
        .into_any()
}

#[component]
fn StatsPanel(title: &'static str, lines: Vec<(&'static str, String)>) -> impl IntoView {
    view! {
        <div class="section">
            <h3 class="section__title">{title}</h3>
            <dl class="details-grid">
                {lines
                    .into_iter()
                    .map(|(label, value)| view! { <dt>{format!("{}:", label)}</dt><dd>{value}</dd> })
                    .collect_view()}
            </dl>
        </div>
    }
}

#[component]
pub fn SurveyAnalyticsDashboard() -> impl IntoView {
    let params = use_params_map();

    let survey_id = Signal::derive(move || params.with(|p| p.get("id").unwrap_or_default()));

    let survey_query = use_query(
        Signal::derive(move || detail_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_survey(&api, &id).await }
        },
    );
    let summary = use_query(
        Signal::derive(move || summary_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_analytics(&api, &id).await }
        },
    );
    let daily = use_query(
        Signal::derive(move || daily_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_daily_responses(&api, &id).await }
        },
    );
    let per_question = use_query(
        Signal::derive(move || questions_key(&survey_id.get())),
        move |api| {
            let id = survey_id.get_untracked();
            async move { fetch_question_analytics(&api, &id).await }
        },
    );

    let title = Signal::derive(move || {
        survey_query
            .data
            .with(|s| s.as_ref().map(|s| format!("Analytics: {}", s.title)))
            .unwrap_or_else(|| "Analytics".to_string())
    });

    let loading = Signal::derive(move || {
        summary.is_loading.get() || daily.is_loading.get() || per_question.is_loading.get()
    });
    let fetching = Signal::derive(move || {
        summary.is_fetching.get() || daily.is_fetching.get() || per_question.is_fetching.get()
    });
    let error = Signal::derive(move || {
        summary
            .error
            .get()
            .or_else(|| daily.error.get())
            .or_else(|| per_question.error.get())
    });

    let stat = move |read: fn(&SurveyAnalytics) -> f64| {
        Signal::derive(move || summary.data.with(|d| d.as_ref().map(read)))
    };
    let total = stat(|a| a.response_stats.total_responses as f64);
    let completion = stat(|a| a.response_stats.completion_rate);
    let last_week = stat(|a| a.recent_activity.last_7_days as f64);
    let open_rate = stat(|a| a.distribution_stats.open_rate);

    let refresh = move || {
        summary.refetch();
        daily.refetch();
        per_question.refetch();
    };

    let body = move || {
        let Some(analytics) = summary.data.get() else {
            return view! {
                <div class="empty-hint">"No analytics data available."</div>
            }
            .into_any();
        };
        let points = daily.data.get().unwrap_or_default();
        let questions = per_question.data.get().unwrap_or_default();
        let has_questions = !questions.is_empty();
        view! {
            <div class="section">
                <h3 class="section__title">"Daily Responses"</h3>
                <DailyResponses points=points />
            </div>
            <Show when=move || has_questions>
                <div class="section">
                    <h3 class="section__title">"Question Completion Rates"</h3>
                    <DataTable
                        data=Signal::stored(questions.clone())
                        columns=question_columns()
                        empty_message="No questions"
                    />
                </div>
            </Show>
            <div class="analytics-panels">
                <StatsPanel title="Response Statistics" lines=response_breakdown(&analytics) />
                <StatsPanel
                    title="Distribution Statistics"
                    lines=distribution_breakdown(&analytics)
                />
            </div>
        }
        .into_any()
    };

    view! {
        <PageFrame page_id="d001_survey_analytics--dashboard" category=PAGE_CAT_DASHBOARD>
            <PageHeader
                title=title
                back_href=survey_path(&survey_id.get_untracked())
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=fetching
                    on_click=move |_| refresh()
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <div class="stat-cards">
                    <StatCard label="Total Responses" icon_name="responses" value=total format=StatFormat::Integer />
                    <StatCard label="Completion Rate" icon_name="check" value=completion format=PERCENT />
                    <StatCard label="Last 7 Days" icon_name="chart" value=last_week format=StatFormat::Integer />
                    <StatCard label="Open Rate" icon_name="mail" value=open_rate format=PERCENT />
                </div>

                <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                    {body}
                </Show>
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d001_survey_analytics::response::{
        DistributionStats, RecentActivity, ResponseStats,
    };

    fn analytics() -> SurveyAnalytics {
        SurveyAnalytics {
            response_stats: ResponseStats {
                total_responses: 12,
                completed_responses: 9,
                completion_rate: 75.0,
                internal_responses: 8,
                external_responses: 4,
                recent_responses: 3,
            },
            distribution_stats: DistributionStats {
                total: 20,
                sent: 18,
                opened: 9,
                clicked: 4,
                open_rate: 50.0,
                click_rate: 22.24,
            },
            recent_activity: RecentActivity { last_7_days: 5 },
        }
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Short question"), "Short question");
        let long = "How likely are you to recommend us to a friend?";
        assert_eq!(truncate_label(long), "How likely are you to recommen...");
        assert_eq!(truncate_label(&"x".repeat(30)), "x".repeat(30));
    }

    #[test]
    fn test_bar_percent() {
        assert_eq!(bar_percent(0, 0), 0.0);
        assert_eq!(bar_percent(5, 10), 50.0);
        assert_eq!(bar_percent(10, 10), 100.0);
    }

    #[test]
    fn test_breakdowns() {
        let a = analytics();
        let responses = response_breakdown(&a);
        assert_eq!(responses[0], ("Total Responses", "12".to_string()));
        assert_eq!(responses[3], ("External Responses", "4".to_string()));

        let distributions = distribution_breakdown(&a);
        assert_eq!(distributions.len(), 5);
        assert_eq!(distributions[4], ("Click Rate", "22.2%".to_string()));
    }

    #[test]
    fn test_question_row_fields() {
        let row = QuestionAnalytics {
            question_text: "What could we do better next quarter to help you?".to_string(),
            completion_rate: 80.0,
            answered: 8,
            skipped: 2,
        };
        assert_eq!(
            row.field("question"),
            CellValue::Text("What could we do better next q...".into())
        );
        assert_eq!(row.field("skipped"), CellValue::Int(2));
        assert_eq!(row.field("completion_rate"), CellValue::Float(80.0));
    }
}
