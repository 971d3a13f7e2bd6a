use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Round;

/// Summary of a committed round completion
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RoundOutcome {
    pub round: Round,
    /// Riders holding the flag this round decides, after the recompute
    pub qualified: usize,
    pub participants: usize,
}

/// Summary of a committed results reset
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ResetOutcome {
    pub participants: usize,
}
