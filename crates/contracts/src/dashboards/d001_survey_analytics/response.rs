use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// `GET /responses/survey/{survey_id}/analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurveyAnalytics {
    pub response_stats: ResponseStats,
    pub distribution_stats: DistributionStats,
    pub recent_activity: RecentActivity,
}

/// Rates are percentages, `0.0..=100.0`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseStats {
    pub total_responses: u64,
    pub completed_responses: u64,
    pub completion_rate: f64,
    pub internal_responses: u64,
    pub external_responses: u64,
    pub recent_responses: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionStats {
    pub total: u64,
    pub sent: u64,
    pub opened: u64,
    pub clicked: u64,
    pub open_rate: f64,
    pub click_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    pub last_7_days: u64,
}

/// Point of `GET .../analytics/daily-responses`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyResponseCount {
    /// `YYYY-MM-DD`, sometimes with a time part
    pub date: String,
    pub count: u64,
}

impl DailyResponseCount {
    pub fn day(&self) -> Option<NaiveDate> {
        let date = self.date.get(..10).unwrap_or(&self.date);
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Short axis label such as `Mar 5`
    pub fn label(&self) -> String {
        self.day()
            .map(|d| d.format("%b %-d").to_string())
            .unwrap_or_else(|| self.date.clone())
    }
}

/// Row of `GET .../analytics/question-analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionAnalytics {
    pub question_text: String,
    /// Percent of responses that answered the question
    pub completion_rate: f64,
    pub answered: u64,
    pub skipped: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_backend_json() {
        let json = r#"{
            "response_stats": {"total_responses": 12, "completed_responses": 9,
                "completion_rate": 75.0, "internal_responses": 8,
                "external_responses": 4, "recent_responses": 3},
            "distribution_stats": {"total": 20, "sent": 18, "opened": 9,
                "clicked": 4, "open_rate": 50.0, "click_rate": 22.2},
            "recent_activity": {"last_7_days": 5}
        }"#;
        let analytics: SurveyAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(analytics.response_stats.completed_responses, 9);
        assert_eq!(analytics.distribution_stats.opened, 9);
        assert_eq!(analytics.recent_activity.last_7_days, 5);
    }

    #[test]
    fn test_daily_label() {
        let point = DailyResponseCount {
            date: "2024-03-05".to_string(),
            count: 4,
        };
        assert_eq!(point.label(), "Mar 5");

        let timed = DailyResponseCount {
            date: "2024-12-31T00:00:00".to_string(),
            count: 1,
        };
        assert_eq!(timed.label(), "Dec 31");

        let odd = DailyResponseCount {
            date: "week 12".to_string(),
            count: 1,
        };
        assert_eq!(odd.label(), "week 12");
    }

    #[test]
    fn test_question_rows_from_backend_json() {
        let json = r#"[{"question_text":"Your name?","completion_rate":100.0,"answered":9,"skipped":0}]"#;
        let rows: Vec<QuestionAnalytics> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].answered, 9);
        assert_eq!(rows[0].skipped, 0);
    }
}
