use std::cmp::Ordering;

use rust_decimal::Decimal;

use crate::dto::ranking::RankingEntry;
use crate::models::Participant;
use crate::services::scoring::{final_top, intermediate_top, preliminary_top};

/// Orders ride times longest first with missing times after every recorded one.
///
/// `Option` already orders `None` below any `Some`, so reversing the natural
/// order gives exactly that.
pub fn by_time_desc(a: Option<Decimal>, b: Option<Decimal>) -> Ordering {
    b.cmp(&a)
}

/// Leaderboard comparator: final top time, then intermediate, then preliminary.
pub fn ranking_order(a: &Participant, b: &Participant) -> Ordering {
    by_time_desc(final_top(a), final_top(b))
        .then_with(|| by_time_desc(intermediate_top(a), intermediate_top(b)))
        .then_with(|| by_time_desc(preliminary_top(a), preliminary_top(b)))
}

/// Returns the participants in leaderboard order.
///
/// The sort is stable, so riders that tie on every stage keep their input order.
pub fn rank_participants(participants: &[Participant]) -> Vec<Participant> {
    let mut ranked = participants.to_vec();
    ranked.sort_by(ranking_order);
    ranked
}

pub fn ranking_entries(participants: &[Participant]) -> Vec<RankingEntry> {
    rank_participants(participants)
        .into_iter()
        .enumerate()
        .map(|(index, participant)| RankingEntry::new(index + 1, participant))
        .collect()
}
