use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::serde_utc;

// ============================================================================
// ID Type
// ============================================================================

crate::aggregate_id!(
    /// Unique survey identifier
    SurveyId
);

// ============================================================================
// Enums
// ============================================================================

/// Where respondents answer the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurveyType {
    /// Answered in this app, question by question
    #[default]
    Internal,
    /// Hosted elsewhere; respondents follow `external_url`
    External,
}

impl SurveyType {
    pub fn all() -> &'static [SurveyType] {
        &[SurveyType::Internal, SurveyType::External]
    }

    pub fn code(&self) -> &'static str {
        match self {
            SurveyType::Internal => "internal",
            SurveyType::External => "external",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SurveyType::Internal => "Internal",
            SurveyType::External => "External",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.code() == code)
    }
}

/// Publication state, derived from `is_draft`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurveyStatus {
    #[default]
    Draft,
    Published,
}

impl SurveyStatus {
    pub fn from_is_draft(is_draft: bool) -> Self {
        if is_draft {
            SurveyStatus::Draft
        } else {
            SurveyStatus::Published
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SurveyStatus::Draft => "Draft",
            SurveyStatus::Published => "Published",
        }
    }
}

// ============================================================================
// Aggregate
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub survey_type: SurveyType,
    pub external_url: Option<String>,
    pub is_draft: bool,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "serde_utc::required")]
    pub updated_at: DateTime<Utc>,
}

impl Survey {
    pub fn status(&self) -> SurveyStatus {
        SurveyStatus::from_is_draft(self.is_draft)
    }

    pub fn can_publish(&self) -> bool {
        self.is_draft
    }

    /// Only published internal surveys are answered in this app
    pub fn accepts_responses(&self) -> bool {
        !self.is_draft && self.survey_type == SurveyType::Internal
    }
}

// ============================================================================
// DTOs
// ============================================================================

pub const TITLE_MAX_LEN: usize = 200;

/// Body of `POST /surveys/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSurveyDto {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub survey_type: SurveyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    pub is_draft: bool,
}

fn is_http_url(url: &str) -> bool {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
}

impl CreateSurveyDto {
    /// Trimmed copy; the URL is only kept for external surveys
    pub fn normalized(&self) -> Self {
        let external_url = match self.survey_type {
            SurveyType::External => self
                .external_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            SurveyType::Internal => None,
        };
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            survey_type: self.survey_type,
            external_url,
            is_draft: self.is_draft,
        }
    }

    /// Client-side checks mirrored from the backend rules
    pub fn validate(&self) -> Result<(), String> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err("Title is required".to_string());
        }
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(format!(
                "Title must be at most {} characters",
                TITLE_MAX_LEN
            ));
        }
        if self.survey_type == SurveyType::External {
            let url = self.external_url.as_deref().map(str::trim).unwrap_or("");
            if url.is_empty() {
                return Err("External URL is required for external surveys".to_string());
            }
            if !is_http_url(url) {
                return Err("External URL must start with http:// or https://".to_string());
            }
        }
        Ok(())
    }
}
