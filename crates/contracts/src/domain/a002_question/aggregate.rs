use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_survey::aggregate::SurveyId;
use crate::shared::serde_utc;

crate::aggregate_id!(
    /// Unique question identifier
    QuestionId
);

/// Row of `GET /questions/by-survey/{survey_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    pub required: bool,
    pub order: u32,
    /// Free-form type label; the backend leaves it out for plain text questions
    #[serde(rename = "type")]
    pub question_type: Option<String>,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
}

impl Question {
    pub fn type_label(&self) -> &str {
        self.question_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("text")
    }
}

/// A question as sent to the backend, before it has an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuestion {
    pub text: String,
    pub required: bool,
    pub order: u32,
}

impl NewQuestion {
    pub fn new(text: &str, required: bool, order: u32) -> Self {
        Self {
            text: text.trim().to_string(),
            required,
            order,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.text.trim().is_empty() {
            return Err("Question text is required".to_string());
        }
        Ok(())
    }
}

/// Sets `order` to each question's index
pub fn renumber(questions: &mut [NewQuestion]) {
    for (index, question) in questions.iter_mut().enumerate() {
        question.order = u32::try_from(index).unwrap_or(u32::MAX);
    }
}

/// Body of `POST /questions/bulk-questions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkQuestionsDto {
    pub survey_id: SurveyId,
    pub questions: Vec<NewQuestion>,
}

impl BulkQuestionsDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.questions.is_empty() {
            return Err("Please add at least one question before proceeding.".to_string());
        }
        self.questions.iter().try_for_each(NewQuestion::validate)
    }
}

/// Body of `POST /questions/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuestionDto {
    pub survey_id: SurveyId,
    #[serde(flatten)]
    pub question: NewQuestion,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::AggregateId;

    #[test]
    fn test_question_from_backend_json() {
        let json = r#"[
            {"id":"0b5c1d7e-54a1-4c1e-9a43-3f1f2c6d7e80","text":"Your name?","required":true,
             "order":0,"created_at":"2024-03-15T14:02:26.481516"},
            {"id":"5f2a9c31-8d0e-4b6f-a2d4-7c9e1b3f5a62","text":"Rate us","required":false,
             "order":1,"type":"rating","created_at":"2024-03-15T14:02:27"}
        ]"#;
        let questions: Vec<Question> = serde_json::from_str(json).unwrap();
        assert_eq!(questions[0].type_label(), "text");
        assert_eq!(questions[1].type_label(), "rating");
        assert_eq!(questions[1].order, 1);
        assert!(!questions[1].required);
    }

    #[test]
    fn test_bulk_body_shape() {
        let survey_id = SurveyId::new_v4();
        let dto = BulkQuestionsDto {
            survey_id,
            questions: vec![NewQuestion::new(" Why? ", true, 0)],
        };
        assert_eq!(
            serde_json::to_value(&dto).unwrap(),
            serde_json::json!({
                "survey_id": survey_id.as_string(),
                "questions": [{ "text": "Why?", "required": true, "order": 0 }]
            })
        );
    }

    #[test]
    fn test_single_question_body_is_flat() {
        let survey_id = SurveyId::new_v4();
        let dto = CreateQuestionDto {
            survey_id,
            question: NewQuestion::new("Anything else?", false, 3),
        };
        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["order"], 3);
        assert_eq!(json["text"], "Anything else?");
        assert_eq!(json["survey_id"], survey_id.as_string());
    }

    #[test]
    fn test_bulk_validation() {
        let mut dto = BulkQuestionsDto {
            survey_id: SurveyId::new_v4(),
            questions: vec![],
        };
        assert_eq!(
            dto.validate().unwrap_err(),
            "Please add at least one question before proceeding."
        );
        dto.questions.push(NewQuestion::new("  ", true, 0));
        assert_eq!(dto.validate().unwrap_err(), "Question text is required");
    }

    #[test]
    fn test_renumber() {
        let mut questions = vec![
            NewQuestion::new("B", true, 4),
            NewQuestion::new("A", true, 9),
        ];
        renumber(&mut questions);
        let orders: Vec<u32> = questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![0, 1]);
    }
}
