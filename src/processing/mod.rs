//! Processing module
//! Validation and the per-invocation screening state machine

pub mod validation;
pub mod session;

pub use session::{ScreeningOutcome, ScreeningSession, Stage};
pub use validation::ScreeningRequest;
