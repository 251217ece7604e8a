//! User-facing notification surface.
//!
//! Repository operations report outcomes through a [`Notifier`] rather than
//! printing directly, so the CLI, tests, and any future frontend decide how
//! notifications are shown. Delivery is infallible: a notification that cannot
//! be shown is dropped, never turned into an operation error.

use std::sync::Mutex;

use serde::Serialize;

/// How prominently a notification should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One user-facing notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Error,
        }
    }
}

/// Sink for user-facing notifications
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to stderr, leaving stdout for command output
#[derive(Debug, Default)]
pub struct TermNotifier;

impl Notifier for TermNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Info => "·",
            Severity::Success => "✓",
            Severity::Error => "✗",
        };
        if notification.description.is_empty() {
            eprintln!("{marker} {}", notification.title);
        } else {
            eprintln!("{marker} {}: {}", notification.title, notification.description);
        }
    }
}

/// Discards every notification; for callers that only want return values
#[derive(Debug, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Records notifications for inspection in tests
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().expect("notifications").clone()
    }

    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.sent.lock().expect("notifications"))
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().expect("notifications").push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::success("Task created", "'Fix login'"));
        notifier.notify(Notification::error("Cannot delete status", "2 tasks remain"));

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].severity, Severity::Success);
        assert_eq!(sent[1].severity, Severity::Error);
        assert_eq!(sent[1].title, "Cannot delete status");
    }

    #[test]
    fn take_drains_the_log() {
        let notifier = RecordingNotifier::new();
        notifier.notify(Notification::info("Moved", ""));
        assert_eq!(notifier.take().len(), 1);
        assert!(notifier.sent().is_empty());
    }
}
