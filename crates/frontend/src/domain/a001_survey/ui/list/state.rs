use contracts::shared::page::PageQuery;
use leptos::prelude::*;

use crate::shared::components::data_table::{SortOrder, SortState};

/// Paging goes to the server; sorting only reorders the page on screen
#[derive(Clone, Copy)]
pub struct SurveyListState {
    pub page: RwSignal<usize>,
    pub per_page: RwSignal<u32>,
    pub sort: RwSignal<SortState>,
}

pub fn create_state(per_page: u32) -> SurveyListState {
    SurveyListState {
        page: RwSignal::new(1),
        per_page: RwSignal::new(per_page),
        sort: RwSignal::new(SortState {
            sort_by: Some("created_at".to_string()),
            sort_order: SortOrder::Desc,
        }),
    }
}

pub fn build_query(page: usize, per_page: u32) -> PageQuery {
    PageQuery::new(u32::try_from(page).unwrap_or(u32::MAX), per_page)
}

impl SurveyListState {
    pub fn query(&self) -> PageQuery {
        build_query(self.page.get(), self.per_page.get())
    }

    /// Re-sorting keeps the current page
    pub fn toggle_sort(&self, key: &str) {
        self.sort.update(|s| s.toggle(key));
    }
}
