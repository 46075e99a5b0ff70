//! Mentor Match - stable mentor/mentee pairing
//!
//! This library ranks every eligible counterpart for each participant with a
//! cascading comparator, then runs deferred acceptance over both sides' lists to
//! produce a stable one-to-one assignment.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_preferences, stable_match, Assignment, MatchOutcome, Matcher, PreferenceTable};
pub use models::{Direction, Participant, ParticipantRecord, Roster, SeniorityScale, UnknownSeniorityPolicy};
