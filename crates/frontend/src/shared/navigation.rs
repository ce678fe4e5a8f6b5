//! Route paths and a `Copy` handle over the router's navigate function.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

pub const SURVEYS_PATH: &str = "/";
pub const NEW_SURVEY_PATH: &str = "/surveys/new";

pub fn survey_path(survey_id: &str) -> String {
    format!("/surveys/{}", survey_id)
}

/// Sub-page of a survey, e.g. `survey_section_path(id, "responses")`
pub fn survey_section_path(survey_id: &str, section: &str) -> String {
    format!("/surveys/{}/{}", survey_id, section)
}

type NavigateFn = Box<dyn Fn(&str, NavigateOptions)>;

/// Can be moved into `Callback`s and event handlers freely
#[derive(Clone, Copy)]
pub struct Navigator {
    navigate: StoredValue<NavigateFn, LocalStorage>,
}

impl Navigator {
    pub fn go(&self, path: &str) {
        log::debug!("Navigating to {}", path);
        self.navigate
            .with_value(|navigate| navigate(path, NavigateOptions::default()));
    }
}

/// Must be called inside the `Router`
pub fn use_navigator() -> Navigator {
    let navigate = use_navigate();
    Navigator {
        navigate: StoredValue::new_local(Box::new(navigate) as NavigateFn),
    }
}
