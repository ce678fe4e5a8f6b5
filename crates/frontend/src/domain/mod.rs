pub mod a001_survey;
pub mod a002_question;
pub mod a003_distribution;
pub mod a004_response;
