use contracts::domain::a003_distribution::aggregate::{CreateDistributionDto, Distribution};

use crate::shared::api_client::{ApiClient, ApiError};
use crate::shared::api_utils::api_path;
use crate::shared::query_cache::query_key;

pub const CACHE_PREFIX: &str = "distributions";

pub fn list_key(survey_id: &str) -> String {
    query_key(&[CACHE_PREFIX, survey_id])
}

/// `GET /distribution/by-survey/{survey_id}`, one row per recipient, unpaged
pub async fn fetch_distributions(
    api: &ApiClient,
    survey_id: &str,
) -> Result<Vec<Distribution>, ApiError> {
    api.get(&api_path(&["distribution", "by-survey", survey_id]))
        .await
}

/// Returns how many invitations the backend created
pub async fn create_distributions(
    api: &ApiClient,
    dto: &CreateDistributionDto,
) -> Result<usize, ApiError> {
    let created: Vec<serde_json::Value> = api
        .post(&api_path(&["distribution", "bulk-distribution"]), dto)
        .await?;
    Ok(created.len())
}

/// Records that the invitation link was followed
pub async fn mark_clicked(api: &ApiClient, distribution_id: &str) -> Result<(), ApiError> {
    api.put_action(&api_path(&["distribution", distribution_id, "clicked"]))
        .await
}
