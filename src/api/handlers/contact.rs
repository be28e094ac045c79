use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::payload::ApiJson;
use crate::api::dtos::requests::ContactRequest;
use crate::api::dtos::responses::MessageResponse;
use crate::domain::models::contact::ContactMessage;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

fn present(field: Option<String>) -> Option<String> {
    field.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<ContactRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(name), Some(email), Some(message)) =
        (present(payload.name), present(payload.email), present(payload.message))
    else {
        return Err(AppError::Validation("All fields are required".into()));
    };

    let saved = state.contact_repo.create(&ContactMessage::new(name, email, message)).await?;
    state.notifier.spawn_contact_received(saved.clone());

    info!("submit_contact: message {} from {}", saved.id, saved.email);
    Ok(Json(MessageResponse::ok("Message sent successfully. We'll contact you soon!")))
}

pub async fn list_contact_messages(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.contact_repo.list().await?))
}
