use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use tracing::{info, instrument, warn};

use super::{
    signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER},
    types::{Interaction, InteractionResponse, INTERACTION_APPLICATION_COMMAND, INTERACTION_PING},
};
use crate::shared::{AppError, AppState};

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized(format!("missing {} header", name)))
}

/// HTTP handler for platform interactions
///
/// POST /interactions
/// Answers pings and runs slash commands, replying with one message
#[instrument(name = "interactions", skip(state, headers, body))]
pub async fn handle_interaction(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<InteractionResponse>, AppError> {
    let timestamp = header(&headers, TIMESTAMP_HEADER)?;
    let signature = header(&headers, SIGNATURE_HEADER)?;
    state
        .verifier
        .verify(timestamp, &body, signature)
        .map_err(|e| {
            warn!(error = %e, "Rejected interaction signature");
            AppError::Unauthorized(e.to_string())
        })?;

    let interaction: Interaction = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("invalid interaction: {}", e)))?;

    match interaction.kind {
        INTERACTION_PING => Ok(Json(InteractionResponse::pong())),
        INTERACTION_APPLICATION_COMMAND => {
            let event = interaction
                .command_event()
                .ok_or_else(|| AppError::BadRequest("command interaction without data".into()))?;

            let reply = state.dispatcher.dispatch(&event).await?;
            info!(user = %event.user, "Interaction answered");

            Ok(Json(InteractionResponse::message(reply)))
        }
        other => Err(AppError::BadRequest(format!(
            "unsupported interaction type {}",
            other
        ))),
    }
}

/// GET /health
pub async fn health() -> &'static str {
    "ok"
}
