use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storage::{
    Database,
    dto::participant::{
        BulkTimesRequest, CreateParticipantRequest, ParticipantResponse, RecordTimesRequest,
        UpdateParticipantRequest,
    },
};
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/participants",
    responses(
        (status = 200, description = "List all participants in registration order", body = Vec<ParticipantResponse>)
    ),
    tag = "participants"
)]
pub async fn list_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let participants = services::list_participants(db.pool()).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    get,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    responses(
        (status = 200, description = "Participant found", body = ParticipantResponse),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn get_participant(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    let participant = services::get_participant(db.pool(), id).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    post,
    path = "/api/participants",
    request_body = CreateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 201, description = "Participant registered", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Start number already taken")
    ),
    tag = "participants"
)]
pub async fn create_participant(
    State(db): State<Database>,
    Json(req): Json<CreateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::create_participant(db.pool(), &req).await?;

    Ok((
        StatusCode::CREATED,
        Json(ParticipantResponse::from(participant)),
    )
        .into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    request_body = UpdateParticipantRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Participant updated", body = ParticipantResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found"),
        (status = 409, description = "Start number already taken")
    ),
    tag = "participants"
)]
pub async fn update_participant(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateParticipantRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let updated = services::update_participant(db.pool(), id, &req).await?;

    Ok(Json(ParticipantResponse::from(updated)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants/{id}",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 204, description = "Participant deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn delete_participant(
    State(db): State<Database>,
    Path(id): Path<i32>,
) -> Result<Response, WebError> {
    services::delete_participant(db.pool(), id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    delete,
    path = "/api/participants",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All participants deleted"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "participants"
)]
pub async fn delete_all_participants(State(db): State<Database>) -> Result<Response, WebError> {
    let deleted = services::delete_all_participants(db.pool()).await?;

    Ok(Json(json!({ "deleted": deleted })).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/{id}/times",
    params(
        ("id" = i32, Path, description = "Participant ID")
    ),
    request_body = RecordTimesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Times recorded", body = ParticipantResponse),
        (status = 400, description = "Negative ride time"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Participant not found")
    ),
    tag = "participants"
)]
pub async fn record_times(
    State(db): State<Database>,
    Path(id): Path<i32>,
    Json(req): Json<RecordTimesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participant = services::record_times(db.pool(), id, &req).await?;

    Ok(Json(ParticipantResponse::from(participant)).into_response())
}

#[utoipa::path(
    put,
    path = "/api/participants/times",
    request_body = BulkTimesRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Times recorded for every listed participant", body = Vec<ParticipantResponse>),
        (status = 400, description = "Negative ride time"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Unknown participant in batch, nothing recorded")
    ),
    tag = "participants"
)]
pub async fn record_times_bulk(
    State(db): State<Database>,
    Json(req): Json<BulkTimesRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let participants = services::record_times_bulk(db.pool(), &req.entries).await?;

    let response: Vec<ParticipantResponse> = participants
        .into_iter()
        .map(ParticipantResponse::from)
        .collect();

    Ok(Json(response).into_response())
}
