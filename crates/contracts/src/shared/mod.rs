pub mod page;
pub mod serde_utc;
