use std::sync::Arc;

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::{app::structs::json_from_request::JsonFromRequest, AppState};

use super::{dtos::sonarr_webhook_dto::SonarrWebhookDto, service};

pub async fn receive_webhook(
    State(state): State<Arc<AppState>>,
    JsonFromRequest(dto): JsonFromRequest<SonarrWebhookDto>,
) -> Json<Value> {
    service::handle_webhook(&dto, &state.envy);

    Json(json!({ "status": "received" }))
}
