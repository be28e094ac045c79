use std::sync::Arc;

use serde::Serialize;
use serde_json::{json, Value};
use tera::{Context, Tera};
use tokio::task::JoinHandle;
use tracing::{info, info_span, warn, Instrument};

use crate::domain::models::{booking::Booking, contact::ContactMessage};
use crate::domain::ports::{EmailAttachment, EmailService};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;

pub const VENUE_NAME: &str = "Elegant Events Hall";

pub const BOOKING_CONFIRMATION_TEMPLATE: &str = "booking_confirmation.html";
pub const ADMIN_BOOKING_TEMPLATE: &str = "admin_booking.html";
pub const CONTACT_MESSAGE_TEMPLATE: &str = "contact_message.html";

pub fn load_templates() -> Result<Tera, AppError> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (BOOKING_CONFIRMATION_TEMPLATE, include_str!("../../../templates/booking_confirmation.html")),
        (ADMIN_BOOKING_TEMPLATE, include_str!("../../../templates/admin_booking.html")),
        (CONTACT_MESSAGE_TEMPLATE, include_str!("../../../templates/contact_message.html")),
    ])
    .map_err(|e| AppError::Config(format!("Failed to load email templates: {}", e)))?;
    Ok(tera)
}

/// `4500.0` -> `4,500`, `1234.5` -> `1,234.50`.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match cents % 100 {
        0 => grouped,
        fraction => format!("{}.{:02}", grouped, fraction),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "lowercase")]
pub enum DeliveryOutcome {
    Sent,
    Failed(String),
    Disabled,
}

#[derive(Debug, Clone, Serialize)]
pub struct Delivery {
    pub kind: &'static str,
    pub recipient: String,
    pub outcome: DeliveryOutcome,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationReport {
    pub deliveries: Vec<Delivery>,
}

impl NotificationReport {
    pub fn all_sent(&self) -> bool {
        self.deliveries.iter().all(|d| d.outcome == DeliveryOutcome::Sent)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| matches!(d.outcome, DeliveryOutcome::Failed(_)))
    }
}

struct OutgoingMail<'a> {
    kind: &'static str,
    recipient: &'a str,
    subject: String,
    template: &'static str,
    context: Value,
    attachment: Option<(String, String)>,
}

/// Renders and sends the customer/admin emails. Never returns an error:
/// each delivery's outcome lands in the report and failures are logged.
pub struct NotificationService {
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    admin_email: String,
    enabled: bool,
}

impl NotificationService {
    pub fn new(email_service: Arc<dyn EmailService>, templates: Arc<Tera>, admin_email: String, enabled: bool) -> Self {
        Self { email_service, templates, admin_email, enabled }
    }

    fn booking_context(booking: &Booking) -> Value {
        json!({
            "venue_name": VENUE_NAME,
            "name": booking.name,
            "email": booking.email,
            "phone": booking.phone,
            "booking_id": booking.id,
            "booking_short_id": booking.short_id(),
            "hall_name": booking.hall.display_name(),
            "date": booking.date.format("%Y-%m-%d").to_string(),
            "event_type": booking.event_type,
            "guests": booking.guests,
            "package_name": booking.package.display_name(),
            "total": format_amount(booking.total),
            "deposit": format_amount(booking.deposit),
        })
    }

    pub async fn booking_created(&self, booking: &Booking) -> NotificationReport {
        let context = Self::booking_context(booking);
        let hall_name = booking.hall.display_name();

        let customer = OutgoingMail {
            kind: "booking_confirmation",
            recipient: &booking.email,
            subject: format!("Booking Confirmation - {}", hall_name),
            template: BOOKING_CONFIRMATION_TEMPLATE,
            context: context.clone(),
            attachment: Some((format!("booking-{}.ics", booking.short_id()), generate_ics(booking))),
        };
        let admin = OutgoingMail {
            kind: "admin_booking",
            recipient: &self.admin_email,
            subject: format!("New Booking - {} - {}", booking.date, hall_name),
            template: ADMIN_BOOKING_TEMPLATE,
            context,
            attachment: None,
        };

        let deliveries = vec![self.deliver(customer).await, self.deliver(admin).await];
        NotificationReport { deliveries }
    }

    pub async fn contact_received(&self, message: &ContactMessage) -> NotificationReport {
        let mail = OutgoingMail {
            kind: "contact_message",
            recipient: &self.admin_email,
            subject: format!("New Contact Message from {}", message.name),
            template: CONTACT_MESSAGE_TEMPLATE,
            context: json!({
                "name": message.name,
                "email": message.email,
                "message": message.message,
                "received_at": message.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            }),
            attachment: None,
        };

        NotificationReport { deliveries: vec![self.deliver(mail).await] }
    }

    async fn deliver(&self, mail: OutgoingMail<'_>) -> Delivery {
        let outcome = if !self.enabled {
            DeliveryOutcome::Disabled
        } else {
            match self.render_and_send(&mail).await {
                Ok(()) => {
                    info!("{} email sent to {}", mail.kind, mail.recipient);
                    DeliveryOutcome::Sent
                }
                Err(e) => {
                    warn!("{} email to {} not delivered: {}", mail.kind, mail.recipient, e);
                    DeliveryOutcome::Failed(e.to_string())
                }
            }
        };

        Delivery {
            kind: mail.kind,
            recipient: mail.recipient.to_string(),
            outcome,
        }
    }

    async fn render_and_send(&self, mail: &OutgoingMail<'_>) -> Result<(), AppError> {
        let context = Context::from_value(mail.context.clone())
            .map_err(|e| AppError::NotificationFailed(format!("Invalid template context: {}", e)))?;
        let body = self.templates.render(mail.template, &context)
            .map_err(|e| AppError::NotificationFailed(format!("Template {} failed to render: {}", mail.template, e)))?;

        let attachment = mail.attachment.as_ref().map(|(filename, content)| EmailAttachment {
            filename,
            content_type: "text/calendar",
            data: content.as_bytes(),
        });

        self.email_service
            .send(mail.recipient, &mail.subject, &body, attachment)
            .await
            .map_err(|e| match e {
                AppError::NotificationFailed(msg) => AppError::NotificationFailed(msg),
                other => AppError::NotificationFailed(other.to_string()),
            })
    }

    /// Fire-and-forget: the booking is already persisted; the caller does not
    /// wait for (or fail on) delivery.
    pub fn spawn_booking_created(self: &Arc<Self>, booking: Booking) -> JoinHandle<NotificationReport> {
        let span = info_span!("notification", kind = "booking_created", booking_id = %booking.id);
        let service = Arc::clone(self);
        tokio::spawn(async move { service.booking_created(&booking).await }.instrument(span))
    }

    pub fn spawn_contact_received(self: &Arc<Self>, message: ContactMessage) -> JoinHandle<NotificationReport> {
        let span = info_span!("notification", kind = "contact_received", contact_id = %message.id);
        let service = Arc::clone(self);
        tokio::spawn(async move { service.contact_received(&message).await }.instrument(span))
    }
}
