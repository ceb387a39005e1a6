//! Transient user-facing notifications ("toasts").
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthService` emits one notification per operation outcome. Callers pick
//! the sink: log it, forward it over a channel to a UI task, or print it.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use tokio::sync::mpsc;

/// Visual weight of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Default,
    Destructive,
}

/// A short title/description pair intended for transient display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), severity: Severity::Default }
    }

    /// A `Default` notification titled "Success".
    #[must_use]
    pub fn success(description: impl Into<String>) -> Self {
        Self::new("Success", description)
    }

    /// A `Destructive` notification titled "Error".
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self { severity: Severity::Destructive, ..Self::new("Error", description) }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.severity == Severity::Destructive
    }
}

/// Observer for operation outcomes.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the `tracing` subscriber.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Default => {
                tracing::info!(title = %notification.title, "{}", notification.description);
            }
            Severity::Destructive => {
                tracing::warn!(title = %notification.title, "{}", notification.description);
            }
        }
    }
}

/// Forwards notifications to an unbounded channel.
///
/// A closed receiver is not an error; the notification is dropped.
#[derive(Clone, Debug)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    #[must_use]
    pub fn new(tx: mpsc::UnboundedSender<Notification>) -> Self {
        Self { tx }
    }

    /// Create a notifier together with its receiving end.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: Notification) {
        if self.tx.send(notification).is_err() {
            tracing::debug!("notification receiver dropped");
        }
    }
}
