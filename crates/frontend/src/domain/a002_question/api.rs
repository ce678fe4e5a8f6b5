use contracts::domain::a002_question::aggregate::{BulkQuestionsDto, CreateQuestionDto, Question};

use crate::domain::a001_survey::api::CACHE_PREFIX;
use crate::shared::api_client::{ApiClient, ApiError};
use crate::shared::api_utils::{api_path, collection_path};
use crate::shared::query_cache::query_key;

/// Questions live under the survey prefix so survey invalidation refreshes them
pub fn questions_key(survey_id: &str) -> String {
    query_key(&[CACHE_PREFIX, "questions", survey_id])
}

/// All questions of a survey, ordered by `order`
pub async fn fetch_questions(api: &ApiClient, survey_id: &str) -> Result<Vec<Question>, ApiError> {
    let mut questions: Vec<Question> = api
        .get(&api_path(&["questions", "by-survey", survey_id]))
        .await?;
    questions.sort_by_key(|q| q.order);
    Ok(questions)
}

/// `POST /questions/` for a single question appended to an existing survey
pub async fn create_question(
    api: &ApiClient,
    dto: &CreateQuestionDto,
) -> Result<Question, ApiError> {
    api.post(&collection_path(&["questions"]), dto).await
}

/// Sends every question of a new survey in one request; returns how many
/// the backend stored
pub async fn create_questions_bulk(
    api: &ApiClient,
    dto: &BulkQuestionsDto,
) -> Result<usize, ApiError> {
    let created: Vec<serde_json::Value> = api
        .post(&api_path(&["questions", "bulk-questions"]), dto)
        .await?;
    Ok(created.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_key() {
        assert_eq!(questions_key("42"), "surveys:questions:42");
    }

    #[test]
    fn test_paths() {
        assert_eq!(collection_path(&["questions"]), "/questions/");
        assert_eq!(
            api_path(&["questions", "by-survey", "42"]),
            "/questions/by-survey/42"
        );
    }
}
