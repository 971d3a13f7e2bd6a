use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Participant;
use crate::services::scoring::{final_top, intermediate_top, preliminary_top};

/// One line of the leaderboard.
#[derive(Debug, Serialize, ToSchema)]
pub struct RankingEntry {
    pub position: usize,
    pub participant_id: i32,
    pub start_nr: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub city: String,
    pub photo_url: Option<String>,
    pub active: bool,
    pub preliminary_top: Option<Decimal>,
    pub intermediate_top: Option<Decimal>,
    pub final_top: Option<Decimal>,
    pub qualification: QualificationInfo,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct QualificationInfo {
    pub round1: bool,
    pub round2: bool,
    pub round3: bool,
    pub intermediate: bool,
    #[serde(rename = "final")]
    pub final_round: bool,
}

impl From<&Participant> for QualificationInfo {
    fn from(participant: &Participant) -> Self {
        Self {
            round1: participant.round1_qualified,
            round2: participant.round2_qualified,
            round3: participant.round3_qualified,
            intermediate: participant.intermediate_qualified,
            final_round: participant.final_qualified,
        }
    }
}

impl RankingEntry {
    pub fn new(position: usize, participant: Participant) -> Self {
        Self {
            position,
            preliminary_top: preliminary_top(&participant),
            intermediate_top: intermediate_top(&participant),
            final_top: final_top(&participant),
            qualification: QualificationInfo::from(&participant),
            participant_id: participant.participant_id,
            start_nr: participant.start_nr,
            first_name: participant.first_name,
            last_name: participant.last_name,
            city: participant.city,
            photo_url: participant.photo_url,
            active: participant.active,
        }
    }
}
