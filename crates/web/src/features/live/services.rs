use sqlx::PgPool;
use storage::{
    error::Result, models::Participant, repository::participant::ParticipantRepository,
};

/// The participant shown on the live screen
pub async fn get_active(pool: &PgPool) -> Result<Option<Participant>> {
    let repo = ParticipantRepository::new(pool);
    repo.find_active().await
}

/// Switch the live screen to another participant
pub async fn set_active(pool: &PgPool, id: i32) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    let participant = repo.set_active(id).await?;
    tracing::info!(participant_id = id, "Active participant changed");
    Ok(participant)
}

/// Blank the live screen
pub async fn clear_active(pool: &PgPool) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.clear_active().await?;
    Ok(())
}
