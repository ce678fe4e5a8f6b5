pub mod dashboard;

pub use dashboard::SurveyAnalyticsDashboard;
