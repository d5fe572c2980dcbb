use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;
use strum::AsRefStr;

const TOAST_TTL: Duration = Duration::from_millis(4_000);
const MAX_TOASTS: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ToastState {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub message: String,
    pub state: ToastState,
}

/// Bounded queue of transient notifications; the oldest falls off first.
#[derive(Clone, Debug, Default)]
pub(crate) struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, message: impl Into<String>, state: ToastState) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Toast {
            id,
            message: message.into(),
            state,
        });
        if self.items.len() > MAX_TOASTS {
            let overflow = self.items.len() - MAX_TOASTS;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ToastContext {
    pub queue: RwSignal<ToastQueue>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            queue: RwSignal::new(ToastQueue::default()),
        }
    }

    /// Show a non-blocking notification that dismisses itself.
    pub fn toaster(&self, message: impl Into<String>, state: ToastState) {
        let message = message.into();
        match state {
            ToastState::Success => tracing::info!(%message, "toast"),
            ToastState::Error => tracing::warn!(%message, "toast"),
        }

        let mut id = 0;
        self.queue.update(|q| id = q.push(message, state));

        let queue = self.queue;
        set_timeout(move || queue.update(|q| q.dismiss(id)), TOAST_TTL);
    }

    pub fn dismiss(&self, id: u64) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for ToastContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_push_and_dismiss() {
        let mut q = ToastQueue::default();
        let a = q.push("saved", ToastState::Success);
        let b = q.push("failed", ToastState::Error);
        assert_ne!(a, b);
        q.dismiss(a);
        assert_eq!(q.items().len(), 1);
        assert_eq!(q.items()[0].message, "failed");
    }

    #[test]
    fn test_queue_is_bounded() {
        let mut q = ToastQueue::default();
        for i in 0..5 {
            q.push(format!("t{i}"), ToastState::Success);
        }
        let msgs: Vec<&str> = q.items().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(msgs, vec!["t2", "t3", "t4"]);
    }
}
