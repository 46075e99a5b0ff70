// Model exports
pub mod domain;
pub mod requests;
pub mod responses;
pub mod roster;

pub use domain::{Direction, MatchPair, Participant, ParticipantId, ParticipantRecord, Role};
pub use requests::{RunCsvQuery, RunMatchingRequest};
pub use responses::{ErrorResponse, HealthResponse, PreferenceEntry, PreferenceReport, RunMatchingResponse};
pub use roster::{RejectedRecord, Roster, RosterError, SeniorityScale, UnknownSeniorityPolicy, DEFAULT_SENIORITY_LEVELS};
