use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::ranking::RankingEntry};

use crate::error::WebError;

use super::services;

#[utoipa::path(
    get,
    path = "/api/rankings",
    responses(
        (status = 200, description = "Leaderboard retrieved successfully", body = Vec<RankingEntry>)
    ),
    tag = "rankings"
)]
pub async fn get_ranking(State(db): State<Database>) -> Result<Response, WebError> {
    let entries = services::get_ranking(db.pool()).await?;

    Ok(Json(entries).into_response())
}
