use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::round::{ResetOutcome, RoundOutcome},
    models::Round,
};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/api/rounds/{round}/complete",
    params(
        ("round" = String, Path, description = "Round identifier: PRELIM_1, PRELIM_2, PRELIM_3, INTERMEDIATE or FINAL")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Qualification recomputed and committed", body = RoundOutcome),
        (status = 400, description = "Unknown round identifier"),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rounds"
)]
pub async fn complete_round(
    State(db): State<Database>,
    Path(round): Path<String>,
) -> Result<Response, WebError> {
    let round: Round = round.parse()?;

    let outcome = services::complete_round(db.pool(), round).await?;

    Ok(Json(outcome).into_response())
}

#[utoipa::path(
    post,
    path = "/api/results/reset",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "All times, qualifications and the active marker cleared", body = ResetOutcome),
        (status = 401, description = "Unauthorized")
    ),
    tag = "rounds"
)]
pub async fn reset_results(State(db): State<Database>) -> Result<Response, WebError> {
    let outcome = services::reset_results(db.pool()).await?;

    Ok(Json(outcome).into_response())
}
