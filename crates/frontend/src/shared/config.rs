//! Frontend configuration, resolved once at startup and provided via context.

use leptos::prelude::*;

use crate::shared::api_utils::{api_base_from_window, normalize_base};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend origin without trailing slash, e.g. `http://localhost:5000`
    pub api_base: String,
    pub default_page_size: u32,
    pub toast_timeout_ms: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            default_page_size: DEFAULT_PAGE_SIZE,
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
        }
    }
}

impl AppConfig {
    /// Search order for the backend origin:
    /// 1. `SURVEY_API_BASE` at compile time
    /// 2. Current window location on port 5000
    pub fn load() -> Self {
        let api_base = Self::resolve_api_base(option_env!("SURVEY_API_BASE"), api_base_from_window);
        log::info!("Using API base: {}", if api_base.is_empty() { "<relative>" } else { api_base.as_str() });
        Self {
            api_base,
            ..Self::default()
        }
    }

    fn resolve_api_base(compile_time: Option<&str>, from_window: impl FnOnce() -> String) -> String {
        match compile_time.map(str::trim).filter(|s| !s.is_empty()) {
            Some(base) => normalize_base(base),
            None => from_window(),
        }
    }
}

pub fn use_config() -> AppConfig {
    expect_context::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.toast_timeout_ms, 4_000);
        assert!(config.api_base.is_empty());
    }

    #[test]
    fn test_compile_time_base_wins() {
        let base = AppConfig::resolve_api_base(Some("https://api.example.com/"), || {
            panic!("window lookup must not run")
        });
        assert_eq!(base, "https://api.example.com");
    }

    #[test]
    fn test_blank_compile_time_base_falls_back_to_window() {
        let base = AppConfig::resolve_api_base(Some("  "), || "http://localhost:5000".to_string());
        assert_eq!(base, "http://localhost:5000");
        let base = AppConfig::resolve_api_base(None, || "http://10.0.0.5:5000".to_string());
        assert_eq!(base, "http://10.0.0.5:5000");
    }
}
