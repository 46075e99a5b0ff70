use serde::{Deserialize, Serialize};

use crate::core::{MatchOutcome, MatchSummary, ParticipantRef, PreferenceTable};
use crate::models::domain::MatchPair;
use crate::models::roster::{RejectedRecord, Roster};

/// Response for the matching endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMatchingResponse {
    pub pairs: Vec<MatchPair>,
    pub summary: MatchSummary,
    pub rejected: Vec<RejectedRecord>,
    /// Present only when the request asks for it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<PreferenceReport>,
    #[serde(rename = "completedAt")]
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// A subject's ranked candidates, most preferred first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub participant: ParticipantRef,
    pub ranked: Vec<ParticipantRef>,
}

/// Both directions' preference lists with names attached
///
/// Subjects with an empty list are left out. Lists are the ones ranking
/// produced, before mutual-consent pruning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceReport {
    pub mentees: Vec<PreferenceEntry>,
    pub mentors: Vec<PreferenceEntry>,
}

impl PreferenceReport {
    pub fn resolve(roster: &Roster, outcome: &MatchOutcome) -> Self {
        Self {
            mentees: resolve_table(roster, &outcome.mentee_preferences),
            mentors: resolve_table(roster, &outcome.mentor_preferences),
        }
    }
}

fn resolve_table(roster: &Roster, table: &PreferenceTable) -> Vec<PreferenceEntry> {
    let index = roster.index();

    table
        .iter()
        .filter(|(_, list)| !list.is_empty())
        .filter_map(|(subject, list)| {
            let participant = ParticipantRef::from(*index.get(subject)?);
            let ranked = list
                .iter()
                .filter_map(|id| index.get(id).map(|p| ParticipantRef::from(*p)))
                .collect();
            Some(PreferenceEntry { participant, ranked })
        })
        .collect()
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
