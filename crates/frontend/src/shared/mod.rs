pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod icons;
pub mod modal;
pub mod navigation;
pub mod page_frame;
pub mod page_standard;
pub mod query_cache;
pub mod toast;
