pub mod d001_survey_analytics;
