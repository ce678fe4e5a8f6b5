use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_survey::aggregate::SurveyId;
use crate::domain::a002_question::aggregate::{Question, QuestionId};
use crate::domain::a003_distribution::aggregate::{is_email_valid, DistributionId};
use crate::shared::serde_utc;

crate::aggregate_id!(
    /// Unique response identifier
    ResponseId
);

crate::aggregate_id!(
    /// Unique answer identifier
    AnswerId
);

/// How the respondent reached the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Internal,
    External,
}

impl ResponseSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            ResponseSource::Internal => "Internal",
            ResponseSource::External => "External",
        }
    }
}

/// Row of `GET /responses/survey/{survey_id}/responses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyResponse {
    pub id: ResponseId,
    pub respondent_name: Option<String>,
    pub respondent_email: Option<String>,
    pub source: ResponseSource,
    pub distribution_id: Option<DistributionId>,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "serde_utc::optional")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl SurveyResponse {
    /// Name, then email; `None` for anonymous respondents
    pub fn respondent(&self) -> Option<&str> {
        [&self.respondent_name, &self.respondent_email]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .map(str::trim)
            .find(|v| !v.is_empty())
    }
}

// ============================================================================
// Starting a response
// ============================================================================

/// Who is answering. Invited respondents are identified by their distribution only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RespondentData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution_id: Option<DistributionId>,
}

impl RespondentData {
    pub fn invited(distribution_id: DistributionId) -> Self {
        Self {
            distribution_id: Some(distribution_id),
            ..Default::default()
        }
    }

    /// Walk-in respondent: a name is required, the email is optional but checked
    pub fn from_form(name: &str, email: &str) -> Result<Self, String> {
        let name = name.trim();
        if name.is_empty() {
            return Err("Name is required to start the survey.".to_string());
        }
        let email = email.trim();
        if !email.is_empty() && !is_email_valid(email) {
            return Err("Please enter a valid email address.".to_string());
        }
        Ok(Self {
            name: Some(name.to_string()),
            email: (!email.is_empty()).then(|| email.to_string()),
            distribution_id: None,
        })
    }
}

/// Body of `POST /responses/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResponseDto {
    pub survey_id: SurveyId,
    pub respondent_data: RespondentData,
}

/// The part of the created response the client needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: ResponseId,
}

// ============================================================================
// Submitting answers
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAnswer {
    pub question_id: QuestionId,
    /// Empty for skipped questions
    pub value: String,
}

/// Body of `POST /responses/{response_id}/answers`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitAnswersDto {
    pub answers: Vec<NewAnswer>,
}

/// Checks `input` against the question; `None` or blank input skips it
pub fn answer_for(question: &Question, input: Option<&str>) -> Result<NewAnswer, String> {
    let value = input.map(str::trim).unwrap_or("");
    if value.is_empty() && question.required {
        return Err("This question requires an answer".to_string());
    }
    Ok(NewAnswer {
        question_id: question.id,
        value: value.to_string(),
    })
}

// ============================================================================
// Reading answers back
// ============================================================================

/// One stored answer of `GET /responses/{response_id}/answers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDetail {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub question_text: String,
    pub question_type: Option<String>,
    pub value: Option<String>,
    pub values: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub date_value: Option<String>,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
}

pub const NO_ANSWER: &str = "No answer provided";

impl AnswerDetail {
    /// Text value, then choices, then `n/10`, then the date
    pub fn display(&self) -> String {
        if let Some(value) = self.value.as_deref().filter(|v| !v.is_empty()) {
            return value.to_string();
        }
        if let Some(values) = self.values.as_ref().filter(|v| !v.is_empty()) {
            return values.join(", ");
        }
        if let Some(rating) = self.rating {
            return format!("{}/10", rating);
        }
        if let Some(date) = self.date_value.as_deref().filter(|d| !d.is_empty()) {
            return serde_utc::parse_timestamp(date)
                .map(|dt| dt.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| date.to_string());
        }
        NO_ANSWER.to_string()
    }
}

/// Invitation the response came through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseDistribution {
    pub id: DistributionId,
    pub recipient_method: String,
    pub recipient_email: String,
    pub status: Option<String>,
    #[serde(default, with = "serde_utc::optional")]
    pub scheduled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseAnswers {
    pub response_id: ResponseId,
    pub respondent_name: Option<String>,
    pub respondent_email: Option<String>,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
    #[serde(default, with = "serde_utc::optional")]
    pub completed_at: Option<DateTime<Utc>>,
    pub answers: Vec<AnswerDetail>,
    pub distribution: Option<ResponseDistribution>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::AggregateId;
    use crate::shared::serde_utc::parse_timestamp;

    fn question(required: bool) -> Question {
        Question {
            id: QuestionId::new_v4(),
            text: "Anything else?".to_string(),
            required,
            order: 0,
            question_type: None,
            created_at: Utc::now(),
        }
    }

    fn detail(json: serde_json::Value) -> AnswerDetail {
        let mut base = serde_json::json!({
            "id": "7a1b2c3d-4e5f-4a6b-8c7d-9e0f1a2b3c4d",
            "question_id": "0b5c1d7e-54a1-4c1e-9a43-3f1f2c6d7e80",
            "question_text": "How was it?",
            "question_type": "text",
            "created_at": "2024-03-15T14:02:26"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), json.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_response_rows_from_backend_json() {
        let json = r#"{"total":2,"pages":1,"page_size":10,"items":[
            {"id":"9c8b7a69-5847-4362-a150-f4e3d2c1b0a9","respondent_name":"Ann",
             "respondent_email":null,"source":"internal","created_at":"2024-03-15T14:02:26",
             "distribution_id":null,"completed_at":"2024-03-15T14:05:00"},
            {"id":"8b7a6958-4736-4251-9f40-e3d2c1b0a998","source":"external",
             "created_at":"2024-03-15T15:00:00",
             "distribution_id":"1d3c5e7f-0a2b-4c6d-8e9f-a1b2c3d4e5f6"}
        ]}"#;
        let page: crate::shared::page::PageEnvelope<SurveyResponse> =
            serde_json::from_str(json).unwrap();
        assert_eq!(page.items[0].respondent(), Some("Ann"));
        assert_eq!(page.items[0].completed_at, parse_timestamp("2024-03-15T14:05:00Z"));
        assert_eq!(page.items[1].source, ResponseSource::External);
        assert!(page.items[1].respondent().is_none());
        assert!(page.items[1].distribution_id.is_some());
        assert!(page.items[1].completed_at.is_none());
    }

    #[test]
    fn test_respondent_data_from_form() {
        assert_eq!(
            RespondentData::from_form("  ", "").unwrap_err(),
            "Name is required to start the survey."
        );
        assert_eq!(
            RespondentData::from_form("Ann", "ann@").unwrap_err(),
            "Please enter a valid email address."
        );
        let data = RespondentData::from_form(" Ann ", "").unwrap();
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({ "name": "Ann" })
        );
    }

    #[test]
    fn test_invited_respondent_sends_only_distribution() {
        let distribution_id = DistributionId::new_v4();
        let dto = CreateResponseDto {
            survey_id: SurveyId::new_v4(),
            respondent_data: RespondentData::invited(distribution_id),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(
            json["respondent_data"],
            serde_json::json!({ "distribution_id": distribution_id.as_string() })
        );
    }

    #[test]
    fn test_answer_for_required_and_skipped() {
        let required = question(true);
        assert_eq!(
            answer_for(&required, Some("   ")).unwrap_err(),
            "This question requires an answer"
        );
        assert_eq!(answer_for(&required, Some(" Fine ")).unwrap().value, "Fine");

        let optional = question(false);
        let skipped = answer_for(&optional, None).unwrap();
        assert_eq!(
            serde_json::to_value(&skipped).unwrap()["value"],
            serde_json::json!("")
        );
    }

    #[test]
    fn test_answer_display_precedence() {
        assert_eq!(detail(serde_json::json!({ "value": "Great" })).display(), "Great");
        assert_eq!(
            detail(serde_json::json!({ "value": "", "values": ["A", "B"] })).display(),
            "A, B"
        );
        assert_eq!(detail(serde_json::json!({ "rating": 8 })).display(), "8/10");
        assert_eq!(
            detail(serde_json::json!({ "date_value": "2024-05-01T00:00:00" })).display(),
            "2024-05-01"
        );
        assert_eq!(detail(serde_json::json!({})).display(), NO_ANSWER);
    }

    #[test]
    fn test_response_answers_with_distribution() {
        let json = r#"{
            "response_id":"9c8b7a69-5847-4362-a150-f4e3d2c1b0a9",
            "respondent_email":"ann@example.com",
            "created_at":"2024-03-15T14:02:26",
            "answers":[],
            "distribution":{"id":"1d3c5e7f-0a2b-4c6d-8e9f-a1b2c3d4e5f6","recipient_method":"EMAIL",
                "recipient_email":"ann@example.com","status":"sent","scheduled_at":null}
        }"#;
        let answers: ResponseAnswers = serde_json::from_str(json).unwrap();
        assert!(answers.completed_at.is_none());
        let distribution = answers.distribution.unwrap();
        assert_eq!(distribution.recipient_method, "EMAIL");
        assert!(distribution.scheduled_at.is_none());
    }
}
