//! Console notification adapter
//!
//! Prints workflow notifications through the CLI output formatter.

use async_trait::async_trait;
use simpleupload_core::ports::{INotificationService, Notification};

use crate::output::OutputFormatter;

/// [`INotificationService`] that writes to the terminal
pub struct ConsoleNotifier {
    formatter: Box<dyn OutputFormatter>,
}

impl ConsoleNotifier {
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }
}

#[async_trait]
impl INotificationService for ConsoleNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        self.formatter.success(&notification.body);
        Ok(())
    }
}
