use contracts::domain::a001_survey::aggregate::{CreateSurveyDto, Survey};
use contracts::shared::page::{PageEnvelope, PageQuery};

use crate::shared::api_client::{ApiClient, ApiError};
use crate::shared::api_utils::{api_path, collection_path};
use crate::shared::query_cache::query_key;

/// Cache prefix shared by every survey query
pub const CACHE_PREFIX: &str = "surveys";

pub fn list_key(query: &PageQuery) -> String {
    query_key(&[
        CACHE_PREFIX,
        "list",
        &query.page.to_string(),
        &query.per_page.to_string(),
    ])
}

pub fn detail_key(id: &str) -> String {
    query_key(&[CACHE_PREFIX, "detail", id])
}

/// `GET /surveys/?page=&per_page=`
pub async fn fetch_surveys(
    api: &ApiClient,
    query: &PageQuery,
) -> Result<PageEnvelope<Survey>, ApiError> {
    api.get_with_query(&collection_path(&["surveys"]), query)
        .await
}

pub async fn fetch_survey(api: &ApiClient, id: &str) -> Result<Survey, ApiError> {
    api.get(&api_path(&["surveys", id])).await
}

/// `POST /surveys/`; the URL is dropped for internal surveys before sending
pub async fn create_survey(api: &ApiClient, dto: &CreateSurveyDto) -> Result<Survey, ApiError> {
    api.post(&collection_path(&["surveys"]), &dto.normalized())
        .await
}

pub async fn publish_survey(api: &ApiClient, id: &str) -> Result<Survey, ApiError> {
    api.post_action(&api_path(&["surveys", id, "publish"]))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_key_follows_paging() {
        assert_eq!(list_key(&PageQuery::new(2, 10)), "surveys:list:2:10");
        assert_ne!(
            list_key(&PageQuery::new(1, 10)),
            list_key(&PageQuery::new(2, 10))
        );
    }

    #[test]
    fn test_keys_share_the_survey_prefix() {
        assert!(detail_key("abc").starts_with("surveys:"));
    }
}
