use contracts::domain::a004_response::aggregate::{
    CreateResponseDto, CreatedResponse, ResponseAnswers, SubmitAnswersDto, SurveyResponse,
};
use contracts::shared::page::{PageEnvelope, PageSizeQuery};

use crate::shared::api_client::{ApiClient, ApiError};
use crate::shared::api_utils::{api_path, collection_path};
use crate::shared::query_cache::query_key;

pub const CACHE_PREFIX: &str = "responses";

pub fn list_key(survey_id: &str, query: &PageSizeQuery) -> String {
    query_key(&[
        CACHE_PREFIX,
        survey_id,
        &query.page.to_string(),
        &query.page_size.to_string(),
    ])
}

pub fn answers_key(response_id: &str) -> String {
    query_key(&[CACHE_PREFIX, "answers", response_id])
}

/// `GET /responses/survey/{survey_id}/responses?page=&page_size=`
pub async fn fetch_responses(
    api: &ApiClient,
    survey_id: &str,
    query: &PageSizeQuery,
) -> Result<PageEnvelope<SurveyResponse>, ApiError> {
    api.get_with_query(
        &api_path(&["responses", "survey", survey_id, "responses"]),
        query,
    )
    .await
}

/// Opens a response before any answer is given
pub async fn create_response(
    api: &ApiClient,
    dto: &CreateResponseDto,
) -> Result<CreatedResponse, ApiError> {
    api.post(&collection_path(&["responses"]), dto).await
}

/// Sends every answer of the response at once
pub async fn submit_answers(
    api: &ApiClient,
    response_id: &str,
    dto: &SubmitAnswersDto,
) -> Result<(), ApiError> {
    let _: serde_json::Value = api
        .post(&api_path(&["responses", response_id, "answers"]), dto)
        .await?;
    Ok(())
}

pub async fn fetch_response_answers(
    api: &ApiClient,
    response_id: &str,
) -> Result<ResponseAnswers, ApiError> {
    api.get(&api_path(&["responses", response_id, "answers"]))
        .await
}
