use crate::domain::ports::{EmailAttachment, EmailService};
use crate::error::AppError;
use async_trait::async_trait;
use tracing::info;

/// Development transport: writes each message to the log instead of sending it.
#[derive(Clone, Debug, Default)]
pub struct LogEmailService;

impl LogEmailService {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for LogEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError> {
        info!(
            to = %recipient,
            subject = %subject,
            body_bytes = html_body.len(),
            attachment = attachment.as_ref().map(|a| a.filename).unwrap_or("none"),
            "📧 Email (log transport, not delivered)"
        );
        Ok(())
    }
}
