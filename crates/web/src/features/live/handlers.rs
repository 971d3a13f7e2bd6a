use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::participant::{ActiveParticipantId, ParticipantResponse},
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/live/active",
    responses(
        (status = 200, description = "Active participant, or null when none is active", body = ParticipantResponse)
    ),
    tag = "live"
)]
pub async fn get_active(State(db): State<Database>) -> Result<Response, WebError> {
    let participant = services::get_active(db.pool()).await?;

    Ok(Json(participant.map(ParticipantResponse::from)).into_response())
}

/// Lightweight poll for the audience screen, which only reloads when the id changes.
#[utoipa::path(
    get,
    path = "/api/live/active-id",
    responses(
        (status = 200, description = "Id of the active participant", body = ActiveParticipantId)
    ),
    tag = "live"
)]
pub async fn get_active_id(State(db): State<Database>) -> Result<Response, WebError> {
    let participant = services::get_active(db.pool()).await?;

    Ok(Json(ActiveParticipantId {
        id: participant.map(|p| p.participant_id),
    })
    .into_response())
}

#[utoipa::path(
    put,
    path = "/api/live/active/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant is now the only active one", body = ParticipantResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found, active participant unchanged")
    ),
    tag = "live"
)]
pub async fn set_active(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    let participant = services::set_active(db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/live/active",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "No participant is active anymore"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "live"
)]
pub async fn clear_active(State(db): State<Database>) -> Result<Response, WebError> {
    services::clear_active(db.pool()).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
