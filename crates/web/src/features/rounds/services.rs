use sqlx::PgPool;
use storage::{
    dto::round::{ResetOutcome, RoundOutcome},
    error::Result,
    models::Round,
    services::rounds,
};

/// Recompute and commit qualification flags for a finished round
pub async fn complete_round(pool: &PgPool, round: Round) -> Result<RoundOutcome> {
    rounds::complete_round(pool, round).await
}

/// Clear all times, qualification flags and the active marker
pub async fn reset_results(pool: &PgPool) -> Result<ResetOutcome> {
    rounds::reset_all_results(pool).await
}
