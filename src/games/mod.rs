//! Example games built on the flow, UI and gameplay contracts.

pub mod guesses;
pub mod seconds;
