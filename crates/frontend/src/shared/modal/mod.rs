use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::portal::Portal;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::icons::icon;

pub fn is_close_key(key: &str) -> bool {
    key == "Escape" || key == "Esc"
}

fn is_direct_overlay_event(ev: &ev::MouseEvent) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(t), Some(ct)) => t == ct,
        _ => false,
    }
}

/// Dialog rendered into `body` through a portal.
///
/// Closes on Escape, the header close button, and an overlay click that both
/// started and ended on the overlay (text selection dragged outside does not
/// close it).
#[component]
pub fn Modal(
    #[prop(into)] title: String,
    on_close: Callback<()>,
    /// Buttons rendered under the body
    #[prop(optional, into)]
    footer: Option<ViewFn>,
    children: ChildrenFn,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let keydown = window_event_listener(ev::keydown, move |event| {
        if is_close_key(&event.key()) {
            on_close.run(());
        }
    });
    on_cleanup(move || keydown.remove());

    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            // the overlay is removed by on_close; let the current dispatch finish first
            spawn_local(async move {
                TimeoutFuture::new(0).await;
                on_close.run(());
            });
        }
    };

    let title = StoredValue::new(title);
    let children = StoredValue::new(children);
    let footer = StoredValue::new(footer);

    view! {
        <Portal>
            <div
                class="modal-overlay"
                on:mousedown=handle_overlay_mouse_down
                on:click=handle_overlay_click
            >
                <div class="modal" role="dialog" aria-modal="true">
                    <div class="modal-header">
                        <h2 class="modal-title">{title.get_value()}</h2>
                        <button
                            class="button button--icon modal__close"
                            title="Close"
                            on:click=move |_| on_close.run(())
                        >
                            {icon("x")}
                        </button>
                    </div>
                    <div class="modal-body">{children.with_value(|c| c())}</div>
                    {footer
                        .get_value()
                        .map(|f| view! { <div class="modal-footer">{f.run()}</div> })}
                </div>
            </div>
        </Portal>
    }
}

/// Yes/no confirmation built on [`Modal`]
#[component]
pub fn ConfirmModal(
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(optional, into)] confirm_label: Option<String>,
    /// Disables the confirm button while the action runs
    #[prop(optional, into)]
    busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_label = StoredValue::new(confirm_label.unwrap_or_else(|| "Confirm".to_string()));
    let message = StoredValue::new(message);

    view! {
        <Modal
            title=title
            on_close=on_cancel
            footer=move || {
                view! {
                    <Flex justify=FlexJustify::End gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=busy
                            on_click=move |_| on_confirm.run(())
                        >
                            {confirm_label.get_value()}
                        </Button>
                    </Flex>
                }
            }
        >
            <p class="modal-message">{message.get_value()}</p>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_keys() {
        assert!(is_close_key("Escape"));
        assert!(is_close_key("Esc"));
        assert!(!is_close_key("Enter"));
        assert!(!is_close_key("e"));
    }
}
