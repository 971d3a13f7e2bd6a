use sqlx::PgPool;
use tracing::info;

use crate::dto::round::{ResetOutcome, RoundOutcome};
use crate::error::Result;
use crate::models::{Participant, Round};
use crate::repository::participant::ParticipantRepository;
use crate::services::qualification::{is_qualified_for, qualify};
use crate::services::roster::reset_results;

/// Run the qualification engine for `round` and commit the new flags.
///
/// Read, recompute and write happen in one transaction holding the table
/// lock, so concurrent time edits or a second completion of the same round
/// wait until this one has committed. Any failure rolls everything back.
pub async fn complete_round(pool: &PgPool, round: Round) -> Result<RoundOutcome> {
    let mut tx = pool.begin().await?;

    let snapshot = ParticipantRepository::lock_all(&mut tx).await?;
    let updated = qualify(round, &snapshot);

    let changed = changed_records(&snapshot, &updated);
    ParticipantRepository::save_results(&mut tx, &changed).await?;

    tx.commit().await?;

    let qualified = updated
        .iter()
        .filter(|p| is_qualified_for(round, p))
        .count();

    info!(
        round = %round,
        qualified,
        participants = updated.len(),
        changed = changed.len(),
        "Round completed"
    );

    Ok(RoundOutcome {
        round,
        qualified,
        participants: updated.len(),
    })
}

/// Clear every time, flag and the active marker in one transaction.
pub async fn reset_all_results(pool: &PgPool) -> Result<ResetOutcome> {
    let mut tx = pool.begin().await?;

    let snapshot = ParticipantRepository::lock_all(&mut tx).await?;
    let reset = reset_results(&snapshot);

    ParticipantRepository::clear_active_in(&mut tx).await?;
    ParticipantRepository::save_results(&mut tx, &reset).await?;

    tx.commit().await?;

    info!(participants = reset.len(), "Results reset");

    Ok(ResetOutcome {
        participants: reset.len(),
    })
}

/// Records of `updated` that differ from their counterpart in `snapshot`.
fn changed_records(snapshot: &[Participant], updated: &[Participant]) -> Vec<Participant> {
    snapshot
        .iter()
        .zip(updated)
        .filter(|(before, after)| before != after)
        .map(|(_, after)| after.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_changed_records_only_returns_differences() {
        let snapshot: Vec<Participant> = (1..=6)
            .map(|id| Participant {
                participant_id: id,
                time1: Some(Decimal::from(id)),
                ..Default::default()
            })
            .collect();
        let updated = qualify(Round::Prelim1, &snapshot);

        let changed = changed_records(&snapshot, &updated);

        let ids: Vec<i32> = changed.iter().map(|p| p.participant_id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
        assert!(changed.iter().all(|p| p.round1_qualified));
    }

    #[test]
    fn test_changed_records_empty_when_nothing_moves() {
        let snapshot = vec![Participant {
            participant_id: 1,
            final_qualified: true,
            ..Default::default()
        }];
        let updated = qualify(Round::Final, &snapshot);

        assert!(changed_records(&snapshot, &updated).is_empty());
    }
}
