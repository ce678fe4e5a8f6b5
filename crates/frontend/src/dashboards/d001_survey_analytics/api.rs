use contracts::dashboards::d001_survey_analytics::response::{
    DailyResponseCount, QuestionAnalytics, SurveyAnalytics,
};

use crate::shared::api_client::{ApiClient, ApiError};
use crate::shared::api_utils::api_path;
use crate::shared::query_cache::query_key;

/// Analytics change with every response, so they live under the responses prefix
fn analytics_key(survey_id: &str, part: &str) -> String {
    query_key(&["responses", "analytics", survey_id, part])
}

pub fn summary_key(survey_id: &str) -> String {
    analytics_key(survey_id, "summary")
}

pub fn daily_key(survey_id: &str) -> String {
    analytics_key(survey_id, "daily")
}

pub fn questions_key(survey_id: &str) -> String {
    analytics_key(survey_id, "questions")
}

fn analytics_path(survey_id: &str, rest: &[&str]) -> String {
    let mut segments = vec!["responses", "survey", survey_id, "analytics"];
    segments.extend_from_slice(rest);
    api_path(&segments)
}

pub async fn fetch_analytics(api: &ApiClient, survey_id: &str) -> Result<SurveyAnalytics, ApiError> {
    api.get(&analytics_path(survey_id, &[])).await
}

pub async fn fetch_daily_responses(
    api: &ApiClient,
    survey_id: &str,
) -> Result<Vec<DailyResponseCount>, ApiError> {
    api.get(&analytics_path(survey_id, &["daily-responses"])).await
}

pub async fn fetch_question_analytics(
    api: &ApiClient,
    survey_id: &str,
) -> Result<Vec<QuestionAnalytics>, ApiError> {
    api.get(&analytics_path(survey_id, &["question-analytics"])).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::query_cache::CacheStore;

    #[test]
    fn test_analytics_are_invalidated_with_responses() {
        let mut store = CacheStore::default();
        store.insert(&summary_key("abc"), &serde_json::json!({}));
        store.insert(&daily_key("abc"), &serde_json::json!([]));
        store.insert(&questions_key("abc"), &serde_json::json!([]));
        assert_eq!(store.invalidate_prefix("responses"), 3);
    }

    #[test]
    fn test_paths() {
        let api = ApiClient::new("http://localhost:5000");
        assert_eq!(
            api.url(&analytics_path("abc", &[])),
            "http://localhost:5000/responses/survey/abc/analytics"
        );
        assert_eq!(
            api.url(&analytics_path("abc", &["daily-responses"])),
            "http://localhost:5000/responses/survey/abc/analytics/daily-responses"
        );
        assert_eq!(
            api.url(&analytics_path("abc", &["question-analytics"])),
            "http://localhost:5000/responses/survey/abc/analytics/question-analytics"
        );
    }
}
