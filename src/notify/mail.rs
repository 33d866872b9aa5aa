//! Mail through the local `mail` command.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{Error, Result};
use crate::notify::Notifier;

/// Pipes the message body to `<command> -s <subject> <address>`.
#[derive(Debug, Clone)]
pub struct MailNotifier {
    command: String,
    address: String,
}

impl MailNotifier {
    pub fn new(command: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            address: address.into(),
        }
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn notify(&self, subject: &str, body: &str) -> Result<()> {
        tracing::debug!("Mailing {} via {}", self.address, self.command);

        let mut child = Command::new(&self.command)
            .args(["-s", subject, self.address.as_str()])
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::Notify(format!("Failed to run {}: {}", self.command, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(body.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            return Err(Error::Notify(format!(
                "{} exited with status {}: {}",
                self.command,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_mail_command_is_notify_error() {
        let notifier = MailNotifier::new("/nonexistent/apotd-mail", "ops@example.com");
        let err = notifier.notify("subject", "body").await.unwrap_err();
        assert!(matches!(err, Error::Notify(_)));
    }
}
