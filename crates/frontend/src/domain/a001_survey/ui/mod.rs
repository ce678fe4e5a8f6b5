pub mod badge;
pub mod builder;
pub mod details;
pub mod list;
