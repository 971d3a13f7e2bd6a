use rust_decimal::Decimal;

use crate::models::{InvalidRoundError, Participant, Round};
use crate::services::ranking::by_time_desc;
use crate::services::scoring::intermediate_top;

/// A preliminary ride of at least this many seconds qualifies outright.
pub const INSTANT_QUALIFY_SECONDS: Decimal = Decimal::from_parts(99, 0, 0, false, 0);

/// Each preliminary round advances at least this many riders.
pub const PRELIMINARY_MIN_QUALIFIERS: usize = 5;

/// The intermediate round advances exactly this many riders (or everyone, if fewer).
pub const INTERMEDIATE_QUALIFIERS: usize = 10;

/// Parses `round_id` and recomputes that round's qualification flags.
///
/// An unknown round id is rejected before anything is computed.
pub fn compute_qualification(
    round_id: &str,
    participants: &[Participant],
) -> Result<Vec<Participant>, InvalidRoundError> {
    let round: Round = round_id.parse()?;
    Ok(qualify(round, participants))
}

/// Recomputes qualification flags for `round` and returns the updated riders.
///
/// The input order is the tie-break order: riders with equal (or equally
/// missing) times keep their relative position.
pub fn qualify(round: Round, participants: &[Participant]) -> Vec<Participant> {
    match round {
        Round::Prelim1 => {
            let mut riders = participants.to_vec();
            for rider in &mut riders {
                rider.round1_qualified = false;
            }
            fill_preliminary(
                riders,
                |p| p.time1,
                |p| p.round1_qualified,
                |p| {
                    p.round1_qualified = true;
                    p.round2_qualified = true;
                    p.round3_qualified = true;
                },
            )
        }
        Round::Prelim2 => fill_preliminary(
            participants.to_vec(),
            |p| p.time2,
            |p| p.round2_qualified,
            |p| {
                p.round2_qualified = true;
                p.round3_qualified = true;
            },
        ),
        Round::Prelim3 => fill_preliminary(
            participants.to_vec(),
            |p| p.time3,
            |p| p.round3_qualified,
            |p| p.round3_qualified = true,
        ),
        Round::Intermediate => qualify_intermediate(participants),
        Round::Final => participants
            .iter()
            .cloned()
            .map(|mut p| {
                p.final_qualified = true;
                p
            })
            .collect(),
    }
}

/// Whether `participant` holds the flag that `round` decides.
pub fn is_qualified_for(round: Round, participant: &Participant) -> bool {
    match round {
        Round::Prelim1 => participant.round1_qualified,
        Round::Prelim2 => participant.round2_qualified,
        Round::Prelim3 => participant.round3_qualified,
        Round::Intermediate => participant.intermediate_qualified,
        Round::Final => participant.final_qualified,
    }
}

/// Instant qualifiers first, then the longest rides among the rest until the
/// round has selected at least `PRELIMINARY_MIN_QUALIFIERS` riders.
///
/// Riders already holding the flag from an earlier round are left alone and
/// only count towards the quota when they instant-qualify again.
fn fill_preliminary(
    mut riders: Vec<Participant>,
    ride: impl Fn(&Participant) -> Option<Decimal>,
    is_qualified: impl Fn(&Participant) -> bool,
    advance: impl Fn(&mut Participant),
) -> Vec<Participant> {
    let mut selected = 0;

    for index in 0..riders.len() {
        if ride(&riders[index]).is_some_and(|time| time >= INSTANT_QUALIFY_SECONDS) {
            advance(&mut riders[index]);
            selected += 1;
        }
    }

    let mut order: Vec<usize> = (0..riders.len()).collect();
    order.sort_by(|&a, &b| by_time_desc(ride(&riders[a]), ride(&riders[b])));

    for index in order {
        if selected >= PRELIMINARY_MIN_QUALIFIERS {
            break;
        }
        if !is_qualified(&riders[index]) {
            advance(&mut riders[index]);
            selected += 1;
        }
    }

    riders
}

fn qualify_intermediate(participants: &[Participant]) -> Vec<Participant> {
    let mut order: Vec<usize> = (0..participants.len()).collect();
    order.sort_by(|&a, &b| {
        by_time_desc(
            intermediate_top(&participants[a]),
            intermediate_top(&participants[b]),
        )
    });

    let mut riders = participants.to_vec();
    for (place, index) in order.into_iter().enumerate() {
        riders[index].intermediate_qualified = place < INTERMEDIATE_QUALIFIERS;
    }

    riders
}
