use crate::config::SmtpConfig;
use crate::domain::ports::{EmailAttachment, EmailService};
use crate::error::AppError;
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, error};

/// Sends mail over SMTP. Port 465 uses implicit TLS, anything else STARTTLS.
pub struct SmtpEmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailService {
    pub fn new(config: &SmtpConfig, from: &str) -> Result<Self, AppError> {
        let builder = if config.port == 465 {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| AppError::Config(format!("SMTP relay error: {}", e)))?
        .port(config.port);

        let builder = match (&config.username, &config.password) {
            (Some(user), Some(pass)) => builder.credentials(Credentials::new(user.clone(), pass.clone())),
            _ => builder,
        };

        let from = from
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid MAIL_FROM '{}': {}", from, e)))?;

        Ok(Self { transport: builder.build(), from })
    }
}

fn build_message(
    from: Mailbox,
    recipient: &str,
    subject: &str,
    html_body: &str,
    attachment: Option<EmailAttachment<'_>>,
) -> Result<Message, AppError> {
    let to: Mailbox = recipient
        .parse()
        .map_err(|e| AppError::NotificationFailed(format!("Invalid recipient '{}': {}", recipient, e)))?;

    let builder = Message::builder().from(from).to(to).subject(subject);

    let message = match attachment {
        None => builder
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string()),
        Some(file) => {
            let content_type = ContentType::parse(file.content_type)
                .map_err(|e| AppError::NotificationFailed(format!("Invalid attachment type: {}", e)))?;
            builder.multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::html(html_body.to_string()))
                    .singlepart(Attachment::new(file.filename.to_string()).body(file.data.to_vec(), content_type)),
            )
        }
    };

    message.map_err(|e| AppError::NotificationFailed(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl EmailService for SmtpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError> {
        let message = build_message(self.from.clone(), recipient, subject, html_body, attachment)?;

        self.transport.send(message).await.map_err(|e| {
            let msg = format!("SMTP delivery failed: {}", e);
            error!("{}", msg);
            AppError::NotificationFailed(msg)
        })?;

        debug!("SMTP relay accepted message for {}", recipient);
        Ok(())
    }
}
