use sqlx::PgPool;
use storage::{
    dto::participant::{
        CreateParticipantRequest, ParticipantTimes, RecordTimesRequest, UpdateParticipantRequest,
    },
    error::Result,
    models::Participant,
    repository::participant::ParticipantRepository,
};

/// List all participants
pub async fn list_participants(pool: &PgPool) -> Result<Vec<Participant>> {
    let repo = ParticipantRepository::new(pool);
    repo.list().await
}

/// Get participant by id
pub async fn get_participant(pool: &PgPool, id: i32) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.find_by_id(id).await
}

/// Register a new participant
pub async fn create_participant(
    pool: &PgPool,
    request: &CreateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.create(request).await
}

/// Update a participant's registration data
pub async fn update_participant(
    pool: &PgPool,
    id: i32,
    request: &UpdateParticipantRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);

    let existing = repo.find_by_id(id).await?;
    repo.update(&existing, request).await
}

/// Delete a participant
pub async fn delete_participant(pool: &PgPool, id: i32) -> Result<()> {
    let repo = ParticipantRepository::new(pool);
    repo.delete(id).await
}

/// Delete every participant
pub async fn delete_all_participants(pool: &PgPool) -> Result<u64> {
    let repo = ParticipantRepository::new(pool);
    let deleted = repo.delete_all().await?;
    tracing::info!(deleted, "All participants deleted");
    Ok(deleted)
}

/// Replace one participant's ride times
pub async fn record_times(
    pool: &PgPool,
    id: i32,
    request: &RecordTimesRequest,
) -> Result<Participant> {
    let repo = ParticipantRepository::new(pool);
    repo.record_times(id, request).await
}

/// Replace ride times for several participants
pub async fn record_times_bulk(
    pool: &PgPool,
    entries: &[ParticipantTimes],
) -> Result<Vec<Participant>> {
    let repo = ParticipantRepository::new(pool);
    repo.record_times_bulk(entries).await
}
