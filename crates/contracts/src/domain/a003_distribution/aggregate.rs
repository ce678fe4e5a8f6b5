use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::a001_survey::aggregate::SurveyId;
use crate::shared::serde_utc;

crate::aggregate_id!(
    /// Unique distribution identifier
    DistributionId
);

/// Delivery state of one invitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionStatus {
    Pending,
    Sent,
    Opened,
    Clicked,
    Failed,
    /// Any state this client does not know yet
    #[serde(other)]
    Unknown,
}

impl DistributionStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            DistributionStatus::Pending => "Pending",
            DistributionStatus::Sent => "Sent",
            DistributionStatus::Opened => "Opened",
            DistributionStatus::Clicked => "Clicked",
            DistributionStatus::Failed => "Failed",
            DistributionStatus::Unknown => "Unknown",
        }
    }
}

/// Channel used to reach the recipients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributionMethod {
    #[default]
    #[serde(rename = "EMAIL", alias = "email")]
    Email,
}

/// One invitation: the backend stores a row per recipient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Distribution {
    pub id: DistributionId,
    pub recipient_email: String,
    pub subject: String,
    pub message: Option<String>,
    /// `None` means the invitation went out immediately
    #[serde(default, with = "serde_utc::optional")]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub status: Option<DistributionStatus>,
    #[serde(with = "serde_utc::required")]
    pub created_at: DateTime<Utc>,
}

impl Distribution {
    pub fn status_label(&self) -> &'static str {
        self.status
            .unwrap_or(DistributionStatus::Unknown)
            .display_name()
    }
}

/// Body of `POST /distribution/bulk-distribution`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateDistributionDto {
    pub survey_id: SurveyId,
    pub recipient_emails: Vec<String>,
    pub subject: String,
    pub message: String,
    #[serde(
        default,
        with = "serde_utc::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub scheduled_at: Option<DateTime<Utc>>,
    pub method: DistributionMethod,
}

impl CreateDistributionDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.recipient_emails.is_empty() {
            return Err("At least one recipient email is required".to_string());
        }
        if self.subject.trim().is_empty() {
            return Err("Subject is required".to_string());
        }
        Ok(())
    }
}

/// Splits a pasted list of addresses on commas, semicolons and line breaks.
///
/// Duplicates are dropped case-insensitively, keeping the first spelling.
pub fn parse_recipients(input: &str) -> Result<Vec<String>, String> {
    let mut recipients: Vec<String> = Vec::new();
    let mut invalid: Vec<&str> = Vec::new();

    for candidate in input
        .split(|c| c == ',' || c == ';' || c == '\n' || c == '\r')
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        if !is_email_valid(candidate) {
            invalid.push(candidate);
            continue;
        }
        let duplicate = recipients
            .iter()
            .any(|r| r.eq_ignore_ascii_case(candidate));
        if !duplicate {
            recipients.push(candidate.to_string());
        }
    }

    if !invalid.is_empty() {
        return Err(format!("Invalid email address: {}", invalid.join(", ")));
    }
    if recipients.is_empty() {
        return Err("At least one recipient email is required".to_string());
    }
    Ok(recipients)
}

/// `local@domain.tld` without whitespace
pub fn is_email_valid(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
