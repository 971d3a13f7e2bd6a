use sqlx::PgPool;
use storage::{
    dto::ranking::RankingEntry, error::Result, repository::participant::ParticipantRepository,
    services::ranking::ranking_entries,
};

/// Current leaderboard: final, then intermediate, then preliminary top time
pub async fn get_ranking(pool: &PgPool) -> Result<Vec<RankingEntry>> {
    let repo = ParticipantRepository::new(pool);
    let participants = repo.list().await?;

    Ok(ranking_entries(&participants))
}
