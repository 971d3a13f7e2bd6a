use rust_decimal::Decimal;

use crate::models::{Participant, Stage};

/// Longest preliminary ride (rounds 1 to 3).
pub fn preliminary_top(participant: &Participant) -> Option<Decimal> {
    best_of([participant.time1, participant.time2, participant.time3])
}

/// Longest intermediate ride (rounds 4 and 5).
pub fn intermediate_top(participant: &Participant) -> Option<Decimal> {
    best_of([participant.time4, participant.time5])
}

pub fn final_top(participant: &Participant) -> Option<Decimal> {
    participant.time6
}

/// Top time of a participant for the given stage.
///
/// The longest ride wins, so the top time is the maximum of the recorded
/// times, not the minimum.
pub fn derive_stage_top(participant: &Participant, stage: Stage) -> Option<Decimal> {
    match stage {
        Stage::Preliminary => preliminary_top(participant),
        Stage::Intermediate => intermediate_top(participant),
        Stage::Final => final_top(participant),
    }
}

fn best_of<const N: usize>(times: [Option<Decimal>; N]) -> Option<Decimal> {
    times.into_iter().flatten().max()
}
