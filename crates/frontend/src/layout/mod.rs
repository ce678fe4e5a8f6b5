pub mod top_header;

use leptos::prelude::*;
use top_header::TopHeader;

use crate::shared::toast::ToastStack;

/// Application shell.
///
/// ```text
/// +------------------------------------------+
/// |              TopHeader                   |
/// +------------------------------------------+
/// |              page content                |
/// +------------------------------------------+
/// ```
///
/// Toasts float above everything in the bottom corner.
#[component]
pub fn Shell(children: Children) -> impl IntoView {
    view! {
        <div class="app-layout">
            <TopHeader />
            <main class="app-main">{children()}</main>
            <ToastStack />
        </div>
    }
}
