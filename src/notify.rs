//! User notifications
//!
//! Fire-and-forget feedback (the "toast" of the marketplace front-end).
//! Callers never inspect delivery; a notifier that drops messages is valid.

use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use strum::{Display, EnumIter, EnumString};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum NotifyKind {
    Success,
    Error,
    Info,
}

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotifyKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotifyKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Notification sink injected into the wizard and the session screens.
pub trait Notifier: Send + Sync {
    fn notify(&self, kind: NotifyKind, message: &str);

    fn success(&self, message: &str) {
        self.notify(NotifyKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.notify(NotifyKind::Error, message);
    }

    fn info(&self, message: &str) {
        self.notify(NotifyKind::Info, message);
    }
}

/// Records notifications in memory.
///
/// The TUI drains it once per frame into the status line; tests read it back.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Mutex<Vec<Notification>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn entries(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return everything recorded so far.
    pub fn drain(&self) -> Vec<Notification> {
        match self.entries.lock() {
            Ok(mut entries) => std::mem::take(&mut *entries),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    /// Most recent notification, if any.
    pub fn last(&self) -> Option<Notification> {
        self.entries().pop()
    }

    pub fn count_of(&self, kind: NotifyKind) -> usize {
        self.entries().iter().filter(|n| n.kind == kind).count()
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, kind: NotifyKind, message: &str) {
        let notification = Notification::new(kind, message);
        match self.entries.lock() {
            Ok(mut entries) => entries.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

/// Forwards notifications to the log. Used by the headless commands.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, kind: NotifyKind, message: &str) {
        match kind {
            NotifyKind::Error => tracing::warn!(%kind, "{}", message),
            NotifyKind::Success | NotifyKind::Info => tracing::info!(%kind, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_records_in_order() {
        let log = NotificationLog::new();
        log.info("first");
        log.error("second");
        log.success("third");

        let entries = log.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], Notification::new(NotifyKind::Info, "first"));
        assert_eq!(entries[1].kind, NotifyKind::Error);
        assert_eq!(log.last().unwrap().message, "third");
        assert_eq!(log.count_of(NotifyKind::Error), 1);
    }

    #[test]
    fn test_drain_empties_log() {
        let log = NotificationLog::new();
        log.info("hello");
        assert_eq!(log.drain().len(), 1);
        assert!(log.entries().is_empty());
        assert!(log.last().is_none());
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(NotifyKind::Success.to_string(), "success");
        assert_eq!(NotifyKind::Error.to_string(), "error");
        for kind in <NotifyKind as strum::IntoEnumIterator>::iter() {
            assert_eq!(kind.to_string().parse::<NotifyKind>().unwrap(), kind);
        }
    }
}
