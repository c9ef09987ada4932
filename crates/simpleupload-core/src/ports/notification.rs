//! Notification service port (driven/secondary port)
//!
//! This module defines the interface for telling the user about finished
//! workflow steps (e.g. "File uploaded & moved: ..."). The CLI prints them;
//! other front-ends may show a toast or a desktop notification.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because notification delivery is adapter-specific.
//! - Notifications are fire-and-forget; a failed delivery never fails the
//!   workflow step that produced it.

use serde::{Deserialize, Serialize};

/// A notification to display to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Short title
    pub title: String,
    /// Body text with details about the event
    pub body: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Confirmation shown after an uploaded file was moved
    pub fn moved(moved_to: &str) -> Self {
        Self::new("Upload complete", format!("File uploaded & moved: {}", moved_to))
    }
}

/// Port trait for user-facing notifications
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Sends a notification to the user
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moved_notification_body() {
        let n = Notification::moved("pdf/report.pdf");
        assert_eq!(n.title, "Upload complete");
        assert_eq!(n.body, "File uploaded & moved: pdf/report.pdf");
    }
}
