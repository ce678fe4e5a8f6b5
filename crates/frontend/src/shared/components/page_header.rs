use leptos::prelude::*;
use leptos_router::components::A;

/// Title row of a page with an optional back link and an actions slot
#[component]
pub fn PageHeader(
    #[prop(into)] title: Signal<String>,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    /// Route the "Back" link points to
    #[prop(optional, into)]
    back_href: Option<String>,
    #[prop(optional)]
    children: Option<Children>,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                {back_href.map(|href| view! {
                    <A href=href attr:class="page__back">"← Back"</A>
                })}
                <h1 class="page__title">{move || title.get()}</h1>
                {move || subtitle.get().map(|s| view! {
                    <div class="page__subtitle">{s}</div>
                })}
            </div>
            <div class="page__actions">{children.map(|c| c())}</div>
        </div>
    }
}
