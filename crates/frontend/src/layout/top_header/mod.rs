//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::shared::icons::icon;
use crate::shared::navigation::{NEW_SURVEY_PATH, SURVEYS_PATH};

/// Links shown in the bar, `(href, icon, label)`
const NAV_LINKS: &[(&str, &str, &str)] = &[
    (SURVEYS_PATH, "surveys", "Surveys"),
    (NEW_SURVEY_PATH, "plus", "New survey"),
];

#[component]
pub fn TopHeader() -> impl IntoView {
    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <A href=SURVEYS_PATH attr:class="top-header__title">"Survey Studio"</A>
            </div>

            <nav class="top-header__nav">
                {NAV_LINKS
                    .iter()
                    .map(|(href, icon_name, label)| view! {
                        <A href=*href attr:class="top-header__link">
                            {icon(icon_name)}
                            <span>{*label}</span>
                        </A>
                    })
                    .collect_view()}
            </nav>
        </div>
    }
}
