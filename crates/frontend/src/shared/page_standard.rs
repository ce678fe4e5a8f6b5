//! Page category constants.
//!
//! Every routed page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a001_survey--list"`) and a `data-page-category` with one of the
//! constants below, so a DOM id copied from the inspector leads straight to
//! the module that renders it.

/// Table with filters and pagination.
pub const PAGE_CAT_LIST: &str = "list";

/// Single record view.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// Analytics view.
pub const PAGE_CAT_DASHBOARD: &str = "dashboard";

/// Multi-step flow (builder wizard, taking a survey).
pub const PAGE_CAT_USECASE: &str = "usecase";

pub const ALL_CATEGORIES: &[&str] = &[
    PAGE_CAT_LIST,
    PAGE_CAT_DETAIL,
    PAGE_CAT_DASHBOARD,
    PAGE_CAT_USECASE,
];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert!(is_valid_page_id("a001_survey--list"));
        assert!(is_valid_page_id("d001_survey_analytics--dashboard"));
        assert!(!is_valid_page_id("a001_survey"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a001_survey--"));
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_USECASE));
        assert!(!is_known_category("legacy"));
    }
}
