mod participant;
mod round;

pub use participant::Participant;
pub use round::{InvalidRoundError, Round, Stage};
