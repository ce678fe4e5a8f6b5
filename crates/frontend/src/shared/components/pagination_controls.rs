use crate::shared::components::data_table::page_window::{dispatch_page_click, PageItem};
use crate::shared::components::data_table::Pagination;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page-window pagination strip used under the data table.
///
/// Layout: `‹  1 … 4 5 [6] 7 8 … 20  ›   Showing 101–120 of 400`
#[component]
pub fn PaginationControls(
    /// Descriptor built by the page that owns the data
    pagination: Pagination,
) -> impl IntoView {
    let info = pagination.info;
    let on_page_change = pagination.on_page_change;
    let (first_item, last_item) = info.item_range();

    let page_buttons = info
        .window()
        .into_iter()
        .map(|item| match item {
            PageItem::Ellipsis => view! {
                <span class="pagination-ellipsis" aria-hidden="true">"…"</span>
            }
            .into_any(),
            PageItem::Page(page) => {
                let is_active = page == info.current_page;
                let class = if is_active {
                    "pagination-btn pagination-btn--active"
                } else {
                    "pagination-btn"
                };
                let aria_current = is_active.then_some("page");
                view! {
                    <button
                        class=class
                        aria-current=aria_current
                        on:click=move |_| dispatch_page_click(item, |p| on_page_change.run(p))
                    >
                        {page.to_string()}
                    </button>
                }
                .into_any()
            }
        })
        .collect_view();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(info.previous_page())
                disabled=!info.can_go_previous()
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            {page_buttons}
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(info.next_page())
                disabled=!info.can_go_next()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <span class="pagination-info">
                {format!("Showing {}–{} of {}", first_item, last_item, info.total_items)}
            </span>
        </div>
    }
}
