//! Cell values and the row abstraction the data table reads from.

use chrono::{DateTime, Utc};

/// Shown in place of null, missing or empty values
pub const EMPTY_CELL: &str = "-";

/// Runtime value of one field of a row
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    /// Null and empty strings render as [`EMPTY_CELL`]
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::Text(value.clone())
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Int(value)
    }
}

impl From<u32> for CellValue {
    fn from(value: u32) -> Self {
        CellValue::Int(value as i64)
    }
}

impl From<u64> for CellValue {
    fn from(value: u64) -> Self {
        CellValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for CellValue {
    fn from(value: usize) -> Self {
        CellValue::Int(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for CellValue {
    fn from(value: DateTime<Utc>) -> Self {
        CellValue::Text(value.to_rfc3339())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Default string form of a cell when the column has no renderer
pub fn cell_text(value: &CellValue) -> String {
    if value.is_blank() {
        EMPTY_CELL.to_string()
    } else {
        value.to_string()
    }
}

/// A record the data table can display.
///
/// Unknown keys must return [`CellValue::Null`] so they fall back to
/// [`EMPTY_CELL`] instead of failing.
pub trait TableRow: Clone + Send + Sync + 'static {
    fn field(&self, key: &str) -> CellValue;
}

impl TableRow for serde_json::Value {
    fn field(&self, key: &str) -> CellValue {
        use serde_json::Value;

        match self.get(key) {
            None | Some(Value::Null) => CellValue::Null,
            Some(Value::String(s)) => CellValue::Text(s.clone()),
            Some(Value::Bool(b)) => CellValue::Bool(*b),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => CellValue::Int(i),
                None => CellValue::Float(n.as_f64().unwrap_or_default()),
            },
            Some(other) => CellValue::Text(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_values_fall_back_to_dash() {
        assert_eq!(cell_text(&CellValue::Null), EMPTY_CELL);
        assert_eq!(cell_text(&CellValue::Text(String::new())), EMPTY_CELL);
    }

    #[test]
    fn test_other_values_use_string_form() {
        assert_eq!(cell_text(&CellValue::Text("Draft".into())), "Draft");
        assert_eq!(cell_text(&CellValue::Int(0)), "0");
        assert_eq!(cell_text(&CellValue::Float(2.5)), "2.5");
        assert_eq!(cell_text(&CellValue::Bool(false)), "false");
        assert_eq!(cell_text(&CellValue::Text(" ".into())), " ");
    }

    #[test]
    fn test_json_rows() {
        let row = json!({
            "title": "NPS",
            "count": 12,
            "ratio": 0.25,
            "active": true,
            "note": null,
            "tags": ["a"]
        });
        assert_eq!(row.field("title"), CellValue::Text("NPS".into()));
        assert_eq!(row.field("count"), CellValue::Int(12));
        assert_eq!(row.field("ratio"), CellValue::Float(0.25));
        assert_eq!(row.field("active"), CellValue::Bool(true));
        assert_eq!(row.field("note"), CellValue::Null);
        assert_eq!(row.field("missing"), CellValue::Null);
        assert_eq!(row.field("tags"), CellValue::Text("[\"a\"]".into()));
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(None::<String>), CellValue::Null);
        assert_eq!(CellValue::from(Some(3u32)), CellValue::Int(3));
    }
}
