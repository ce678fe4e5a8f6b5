use contracts::domain::a002_question::aggregate::Question;

use crate::shared::components::data_table::{CellValue, Column, TableRow};

impl TableRow for Question {
    fn field(&self, key: &str) -> CellValue {
        match key {
            "order" => (u64::from(self.order) + 1).into(),
            "text" => self.text.as_str().into(),
            "type" => self.type_label().into(),
            "required" => self.required.into(),
            _ => CellValue::Null,
        }
    }
}

pub fn question_columns() -> Vec<Column<Question>> {
    vec![
        Column::new("order", "#").class("data-table__cell--narrow"),
        Column::new("text", "Question"),
        Column::new("type", "Type"),
        Column::new("required", "Required").render_text(|value, _| {
            let yes = matches!(value, CellValue::Bool(true));
            if yes { "Yes" } else { "No" }.to_string()
        }),
    ]
}
