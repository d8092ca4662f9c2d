//! Transient notification (toast) scheduling.
//!
//! At most one notification is visible. Each [`show`](NotificationScheduler::show)
//! replaces the current one and gets a fresh id, so a dismiss timer belonging
//! to an earlier notification can never remove a later one.

use super::actions::Action;
use chrono::{DateTime, TimeDelta, Utc};

/// Message shown after a successful submission.
pub const JOKE_ADDED_MESSAGE: &str = "Joke added successfully!";

/// Default visible duration.
pub const DEFAULT_NOTIFICATION_MS: i64 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub message: String,

    /// `None` when the notification never auto-dismisses.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationScheduler {
    current: Option<Notification>,
    next_id: u64,
}

impl NotificationScheduler {
    /// Replaces the visible notification and returns the timer action.
    ///
    /// A non-positive `duration` keeps the notification until dismissed; the
    /// returned action then only cancels any pending timer. A duration too
    /// large for a timestamp still schedules the timer but records no expiry.
    pub fn show(&mut self, message: impl Into<String>, duration: TimeDelta) -> Action {
        self.next_id += 1;
        let id = self.next_id;

        let after = duration.to_std().ok().filter(|d| !d.is_zero());
        let expires_at = after.and_then(|_| Utc::now().checked_add_signed(duration));

        self.current = Some(Notification {
            id,
            message: message.into(),
            expires_at,
        });

        tracing::debug!(id, millis = duration.num_milliseconds(), "notification shown");

        after.map_or(Action::CancelDismiss, |after| Action::ScheduleDismiss { id, after })
    }

    /// Handles a fired timer. Returns true if the notification was removed.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|n| n.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Removes the visible notification. Idempotent; returns true if one was
    /// visible.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    #[must_use]
    pub const fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}
