use std::sync::Arc;

use leptos::prelude::*;

use super::cell::{cell_text, CellValue, TableRow};

pub type TextRenderer<R> = Arc<dyn Fn(&CellValue, &R) -> String + Send + Sync>;
pub type ViewRenderer<R> = Arc<dyn Fn(&CellValue, &R) -> AnyView + Send + Sync>;

/// Custom cell renderer. Receives the raw field value and the whole row.
pub enum CellRenderer<R> {
    Text(TextRenderer<R>),
    View(ViewRenderer<R>),
}

impl<R> Clone for CellRenderer<R> {
    fn clone(&self) -> Self {
        match self {
            CellRenderer::Text(f) => CellRenderer::Text(Arc::clone(f)),
            CellRenderer::View(f) => CellRenderer::View(Arc::clone(f)),
        }
    }
}

/// What ends up inside one `<td>`
pub enum CellContent {
    Text(String),
    View(AnyView),
}

impl CellContent {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellContent::Text(s) => Some(s),
            CellContent::View(_) => None,
        }
    }

    pub fn into_any(self) -> AnyView {
        match self {
            CellContent::Text(s) => s.into_any(),
            CellContent::View(v) => v,
        }
    }
}

/// Describes how one field of every row is labelled and displayed.
///
/// ```rust,ignore
/// let columns = vec![
///     Column::new("title", "Title"),
///     Column::new("status", "Status")
///         .render_text(|value, _row: &Survey| value.to_string().to_uppercase()),
/// ];
/// ```
pub struct Column<R> {
    pub key: &'static str,
    pub header: String,
    pub render: Option<CellRenderer<R>>,
    pub sortable: bool,
    /// Extra class for both `<th>` and `<td>`, e.g. `"data-table__cell--num"`
    pub class: Option<&'static str>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            header: self.header.clone(),
            render: self.render.clone(),
            sortable: self.sortable,
            class: self.class,
        }
    }
}

impl<R: TableRow> Column<R> {
    pub fn new(key: &'static str, header: impl Into<String>) -> Self {
        Self {
            key,
            header: header.into(),
            render: None,
            sortable: false,
            class: None,
        }
    }

    pub fn render_text(
        mut self,
        render: impl Fn(&CellValue, &R) -> String + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(CellRenderer::Text(Arc::new(render)));
        self
    }

    pub fn render_view(
        mut self,
        render: impl Fn(&CellValue, &R) -> AnyView + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(CellRenderer::View(Arc::new(render)));
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    /// Computes the cell for `row`. A renderer, when present, fully decides
    /// the output; otherwise the value's string form or the fallback dash.
    pub fn content(&self, row: &R) -> CellContent {
        let value = row.field(self.key);
        match &self.render {
            Some(CellRenderer::Text(render)) => CellContent::Text(render(&value, row)),
            Some(CellRenderer::View(render)) => CellContent::View(render(&value, row)),
            None => CellContent::Text(cell_text(&value)),
        }
    }

    pub fn cell_class(&self) -> String {
        match self.class {
            Some(extra) => format!("data-table__cell {}", extra),
            None => "data-table__cell".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::components::data_table::cell::EMPTY_CELL;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_renderer_output_is_used_verbatim() {
        let column: Column<Value> = Column::new("score", "Score")
            .render_text(|value, row: &Value| format!("{} / {}", value, row["max"]));
        let rows = [json!({"score": 3, "max": 5}), json!({"score": null, "max": 10})];

        let texts: Vec<String> = rows
            .iter()
            .map(|r| column.content(r).as_text().unwrap().to_string())
            .collect();
        assert_eq!(texts, vec!["3 / 5", " / 10"]);
    }

    #[test]
    fn test_without_renderer_uses_fallback() {
        let column: Column<Value> = Column::new("email", "Email");
        for row in [json!({}), json!({"email": null}), json!({"email": ""})] {
            assert_eq!(column.content(&row).as_text(), Some(EMPTY_CELL));
        }
        assert_eq!(
            column.content(&json!({"email": "a@b.io"})).as_text(),
            Some("a@b.io")
        );
    }

    #[test]
    fn test_renderer_called_once_per_cell() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let column: Column<Value> = Column::new("n", "N").render_text(move |v, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            v.to_string()
        });
        let rows = vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})];
        for row in &rows {
            let _ = column.content(row);
        }
        assert_eq!(calls.load(Ordering::SeqCst), rows.len());
    }

    #[test]
    fn test_builder_flags() {
        let column: Column<Value> = Column::new("title", "Title")
            .sortable()
            .class("data-table__cell--wide");
        assert!(column.sortable);
        assert_eq!(column.cell_class(), "data-table__cell data-table__cell--wide");
        assert!(column.render.is_none());
    }
}
