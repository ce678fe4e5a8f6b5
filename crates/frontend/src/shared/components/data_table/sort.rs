use std::cmp::Ordering;

use leptos::prelude::*;

use super::cell::{CellValue, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Current sort of a list owned by the page
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SortState {
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
}

impl SortState {
    /// Same key flips the order, a new key starts ascending
    pub fn toggle(&mut self, key: &str) {
        if self.sort_by.as_deref() == Some(key) {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = Some(key.to_string());
            self.sort_order = SortOrder::Asc;
        }
    }

    pub fn indicator(&self, key: &str) -> &'static str {
        match (self.sort_by.as_deref() == Some(key), self.sort_order) {
            (true, SortOrder::Asc) => " ▲",
            (true, SortOrder::Desc) => " ▼",
            (false, _) => " ⇅",
        }
    }
}

/// Sort state plus the callback fired when a sortable header is clicked
#[derive(Clone)]
pub struct SortDescriptor {
    pub state: SortState,
    pub on_sort: Callback<String>,
}

/// Numbers compare numerically, text case-insensitively; nulls come first
pub fn compare_cells(a: &CellValue, b: &CellValue) -> Ordering {
    use CellValue::{Bool, Float, Int, Null, Text};

    match (a, b) {
        (Null, Null) => Ordering::Equal,
        (Null, _) => Ordering::Less,
        (_, Null) => Ordering::Greater,
        (Int(x), Int(y)) => x.cmp(y),
        (Float(x), Float(y)) => x.total_cmp(y),
        (Int(x), Float(y)) => (*x as f64).total_cmp(y),
        (Float(x), Int(y)) => x.total_cmp(&(*y as f64)),
        (Bool(x), Bool(y)) => x.cmp(y),
        (Text(x), Text(y)) => x.to_lowercase().cmp(&y.to_lowercase()),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

/// Sorts the rows already on screen; leaves them untouched without a sort key
pub fn sort_rows<R: TableRow>(rows: &mut [R], state: &SortState) {
    let Some(key) = state.sort_by.as_deref() else {
        return;
    };
    rows.sort_by(|a, b| {
        let ordering = compare_cells(&a.field(key), &b.field(key));
        match state.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
