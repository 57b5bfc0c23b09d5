//! Toast notification queue.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use std::time::Duration;

/// Maximum toasts shown at once; the oldest is dropped first.
pub const TOAST_LIMIT: usize = 3;

/// How long a toast stays up before dismissing itself.
pub const TOAST_DURATION: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl ToastState {
    /// Queue a toast and return its id.
    pub fn push(&mut self, title: Option<&str>, description: Option<&str>, variant: ToastVariant) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.toasts.push(Toast {
            id,
            title: title.map(str::to_owned),
            description: description.map(str::to_owned),
            variant,
        });
        if self.toasts.len() > TOAST_LIMIT {
            let excess = self.toasts.len() - TOAST_LIMIT;
            self.toasts.drain(..excess);
        }
        id
    }

    /// Plain confirmation, e.g. after a copy.
    pub fn info(&mut self, description: &str) -> u64 {
        self.push(None, Some(description), ToastVariant::Default)
    }

    /// Red error toast.
    pub fn error(&mut self, title: &str, description: &str) -> u64 {
        self.push(Some(title), Some(description), ToastVariant::Destructive)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }
}
