use serde::{Deserialize, Serialize};

/// One page of a server-side paginated collection.
///
/// Surveys answer with `per_page` and echo `page`; responses answer with
/// `page_size` and may leave `page` out, in which case the requested page
/// is the current one. `pages` is 0 when the collection is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: Option<u32>,
    #[serde(alias = "page_size")]
    pub per_page: u32,
    pub pages: u32,
}

impl<T> PageEnvelope<T> {
    /// Page echoed by the backend, or `requested` when it was left out
    pub fn current_page(&self, requested: u32) -> u32 {
        self.page.unwrap_or(requested).max(1)
    }
}

/// `?page=&per_page=` of the survey list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: u32,
    pub per_page: u32,
}

impl PageQuery {
    pub fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: page.max(1),
            per_page: per_page.max(1),
        }
    }
}

/// `?page=&page_size=` of the response list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSizeQuery {
    pub page: u32,
    pub page_size: u32,
}

impl PageSizeQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_envelope_from_backend_json() {
        let json = r#"{"items":[1,2,3],"total":43,"page":3,"per_page":20,"pages":3}"#;
        let env: PageEnvelope<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(env.items, vec![1, 2, 3]);
        assert_eq!(env.total, 43);
        assert_eq!(env.current_page(1), 3);
        assert_eq!(env.per_page, 20);
    }

    #[test]
    fn test_response_envelope_uses_page_size_and_may_omit_page() {
        let json = r#"{"total":12,"pages":2,"page_size":10,"items":[7,8]}"#;
        let env: PageEnvelope<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(env.per_page, 10);
        assert_eq!(env.page, None);
        assert_eq!(env.current_page(2), 2);

        let empty = r#"{"total":0,"pages":0,"page_size":10,"items":[],"page":0}"#;
        let env: PageEnvelope<u32> = serde_json::from_str(empty).unwrap();
        assert_eq!(env.current_page(4), 1);
    }

    #[test]
    fn test_queries_are_clamped_and_named_per_endpoint() {
        assert_eq!(PageQuery::new(0, 0), PageQuery { page: 1, per_page: 1 });
        assert_eq!(
            serde_json::to_value(PageSizeQuery::new(0, 10)).unwrap(),
            serde_json::json!({ "page": 1, "page_size": 10 })
        );
    }
}
