use crate::domain::ports::{EmailAttachment, EmailService};
use crate::error::AppError;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

/// Relays mail through an HTTP mail API (JSON body, bearer token).
pub struct HttpEmailService {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl HttpEmailService {
    pub fn new(api_url: String, api_key: String, from: String) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build mail HTTP client: {}", e)))?;
        Ok(Self { client, api_url, api_key, from })
    }
}

#[derive(Serialize)]
struct AttachmentPayload {
    filename: String,
    content_type: String,
    content_base64: String,
}

#[derive(Serialize)]
struct EmailPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    attachments: Vec<AttachmentPayload>,
}

#[async_trait]
impl EmailService for HttpEmailService {
    async fn send(
        &self,
        recipient: &str,
        subject: &str,
        html_body: &str,
        attachment: Option<EmailAttachment<'_>>,
    ) -> Result<(), AppError> {
        let attachments = attachment
            .into_iter()
            .map(|a| AttachmentPayload {
                filename: a.filename.to_string(),
                content_type: a.content_type.to_string(),
                content_base64: general_purpose::STANDARD.encode(a.data),
            })
            .collect();

        let payload = EmailPayload {
            from: &self.from,
            to: recipient,
            subject,
            html_body,
            attachments,
        };

        let res = self.client.post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Mail service connection error: {}", e);
                error!("{}", msg);
                AppError::NotificationFailed(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Mail service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::NotificationFailed(msg));
        }

        debug!("Mail service accepted message for {}", recipient);
        Ok(())
    }
}
