pub mod d001_survey_analytics;

pub use d001_survey_analytics::ui::SurveyAnalyticsDashboard;
