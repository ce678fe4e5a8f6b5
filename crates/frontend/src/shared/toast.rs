use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::icons::icon;

/// Oldest notifications are dropped beyond this many
pub const MAX_TOASTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast--success",
            ToastKind::Error => "toast toast--error",
            ToastKind::Info => "toast toast--info",
        }
    }

    fn icon_name(&self) -> &'static str {
        match self {
            ToastKind::Success => "check",
            ToastKind::Error => "x",
            ToastKind::Info => "message",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<ToastMessage>,
}

impl ToastQueue {
    /// Appends a toast and returns its id
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(ToastMessage {
            id,
            kind,
            text: text.into(),
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    /// Unknown ids are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[ToastMessage] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// App-wide notifications, shown by [`ToastStack`].
#[derive(Clone, Copy)]
pub struct ToastService {
    queue: RwSignal<ToastQueue>,
    timeout_ms: u32,
}

impl ToastService {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
            timeout_ms,
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(ToastKind::Info, text.into());
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }

    fn show(&self, kind: ToastKind, text: String) {
        let id = self.queue.try_update(|q| q.push(kind, text));
        let Some(id) = id else {
            return;
        };
        let queue = self.queue;
        let timeout_ms = self.timeout_ms;
        spawn_local(async move {
            TimeoutFuture::new(timeout_ms).await;
            queue.try_update(|q| q.dismiss(id));
        });
    }
}

pub fn use_toast() -> ToastService {
    expect_context::<ToastService>()
}

#[component]
pub fn ToastStack() -> impl IntoView {
    let toast = use_toast();

    view! {
        <div class="toast-stack" role="status" aria-live="polite">
            <For
                each=move || toast.queue.with(|q| q.items().to_vec())
                key=|message| message.id
                children=move |message| {
                    let id = message.id;
                    view! {
                        <div class=message.kind.class()>
                            <span class="toast__icon">{icon(message.kind.icon_name())}</span>
                            <span class="toast__text">{message.text}</span>
                            <button
                                class="toast__close"
                                title="Dismiss"
                                on:click=move |_| toast.dismiss(id)
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
