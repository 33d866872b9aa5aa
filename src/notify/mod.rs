//! Operator notification on failure.
//!
//! Delivery is best-effort: callers fold a delivery failure into the original
//! message instead of failing again.

pub mod mail;

use async_trait::async_trait;

use crate::error::Result;

pub use mail::MailNotifier;

/// Delivers a failure report to a human.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, subject: &str, body: &str) -> Result<()>;
}

/// Used when no operator address is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn notify(&self, _subject: &str, _body: &str) -> Result<()> {
        Ok(())
    }
}

/// Notify about `message`, returning the message with any delivery failure appended.
pub async fn report_failure(notifier: &dyn Notifier, message: &str) -> String {
    match notifier.notify("apotd failed", message).await {
        Ok(()) => message.to_string(),
        Err(e) => {
            tracing::debug!("Notification failed: {}", e);
            format!("{}\n(additionally, the operator could not be notified: {})", message, e)
        }
    }
}
