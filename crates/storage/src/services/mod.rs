pub mod qualification;
pub mod ranking;
pub mod roster;
pub mod rounds;
pub mod scoring;
