pub mod participant;
pub mod ranking;
pub mod round;
