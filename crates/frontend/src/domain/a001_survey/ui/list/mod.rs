pub mod state;

use contracts::domain::a001_survey::aggregate::Survey;
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use thaw::*;

use self::state::create_state;
use crate::domain::a001_survey::api::{fetch_surveys, list_key, CACHE_PREFIX};
use crate::domain::a001_survey::ui::badge::{SurveyStatusBadge, SurveyTypeBadge};
use crate::shared::components::data_table::{
    sort_rows, CellValue, Column, DataTable, PageInfo, Pagination, SortDescriptor, TableRow,
};
use crate::shared::components::page_header::PageHeader;
use crate::shared::config::use_config;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::navigation::{survey_path, use_navigator, NEW_SURVEY_PATH};
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::shared::query_cache::{use_query, use_query_cache};

impl TableRow for Survey {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "title" => self.title.as_str().into(),
            "type" => self.survey_type.code().into(),
            "is_draft" => self.status().display_name().into(),
            "created_at" => format_datetime(&self.created_at).into(),
            _ => CellValue::Null,
        }
    }
}

pub fn survey_columns() -> Vec<Column<Survey>> {
    vec![
        Column::new("title", "Title").sortable(),
        Column::new("type", "Type").sortable().render_view(|_, survey: &Survey| {
            view! { <SurveyTypeBadge survey_type=survey.survey_type /> }.into_any()
        }),
        Column::new("is_draft", "Status").sortable().render_view(|_, survey: &Survey| {
            view! { <SurveyStatusBadge status=survey.status() /> }.into_any()
        }),
        Column::new("created_at", "Created").sortable(),
    ]
}

#[component]
pub fn SurveyList() -> impl IntoView {
    let config = use_config();
    let cache = use_query_cache();
    let navigator = use_navigator();
    let state = create_state(config.default_page_size);

    let key = Signal::derive(move || list_key(&state.query()));
    let query = use_query(key, move |api| {
        let request = state.query();
        async move { fetch_surveys(&api, &request).await }
    });

    let rows = Signal::derive(move || {
        let mut rows = query
            .data
            .with(|d| d.as_ref().map(|e| e.items.clone()).unwrap_or_default());
        state.sort.with(|sort| sort_rows(&mut rows, sort));
        rows
    });

    let go_to_page = Callback::new(move |page: usize| state.page.set(page));
    let pagination = Signal::derive(move || {
        let requested = state.page.get();
        query.data.with(|d| {
            d.as_ref()
                .map(|e| Pagination::new(PageInfo::from_envelope(e, requested), go_to_page))
        })
    });

    let on_sort = Callback::new(move |key: String| state.toggle_sort(&key));
    let sort = Signal::derive(move || {
        Some(SortDescriptor {
            state: state.sort.get(),
            on_sort,
        })
    });

    let on_row_click = Callback::new(move |(survey, _): (Survey, usize)| {
        navigator.go(&survey_path(&survey.id.as_string()));
    });

    let refresh = move || {
        log::info!("Refreshing survey list");
        cache.invalidate(CACHE_PREFIX);
    };

    let subtitle = Signal::derive(move || {
        query.data.with(|d| d.as_ref().map(|e| format!("{} total", e.total)))
    });

    view! {
        <PageFrame page_id="a001_survey--list" category=PAGE_CAT_LIST>
            <PageHeader title="Surveys" subtitle=subtitle>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| refresh()
                    disabled=Signal::derive(move || query.is_fetching.get())
                >
                    {icon("refresh")}
                    " Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| navigator.go(NEW_SURVEY_PATH)
                >
                    {icon("plus")}
                    " New survey"
                </Button>
            </PageHeader>

            <div class="page__content">
                {move || query.error.get().map(|e| view! {
                    <div class="alert alert--error">{e}</div>
                })}

                <DataTable
                    data=rows
                    columns=survey_columns()
                    loading=Signal::derive(move || query.is_loading.get())
                    pagination=pagination
                    sort=sort
                    empty_message="No surveys yet. Create one to get started."
                    on_row_click=on_row_click
                />
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::data_table::{SortOrder, SortState};
    use chrono::{TimeZone, Utc};
    use contracts::domain::a001_survey::aggregate::{SurveyId, SurveyType};

    fn survey(title: &str, survey_type: SurveyType, is_draft: bool, day: u32) -> Survey {
        let at = Utc.with_ymd_and_hms(2024, 5, day, 9, 30, 0).unwrap();
        Survey {
            id: SurveyId::new_v4(),
            title: title.to_string(),
            description: None,
            survey_type,
            external_url: None,
            is_draft,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn test_survey_fields() {
        let s = survey("Onboarding feedback", SurveyType::External, false, 1);
        assert_eq!(s.field("type"), CellValue::Text("external".into()));
        assert_eq!(s.field("is_draft"), CellValue::Text("Published".into()));
        assert_eq!(s.field("created_at"), CellValue::Text("2024-05-01 09:30".into()));
        assert_eq!(s.field("description"), CellValue::Null);
    }

    #[test]
    fn test_columns() {
        let columns = survey_columns();
        let keys: Vec<&str> = columns.iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["title", "type", "is_draft", "created_at"]);
        assert!(columns.iter().all(|c| c.sortable));
    }

    #[test]
    fn test_newest_first_by_default() {
        let mut rows = vec![
            survey("Old", SurveyType::Internal, true, 1),
            survey("New", SurveyType::Internal, false, 20),
        ];
        let sort = SortState {
            sort_by: Some("created_at".to_string()),
            sort_order: SortOrder::Desc,
        };
        sort_rows(&mut rows, &sort);
        assert_eq!(rows[0].title, "New");
    }
}
