use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::SelectionStrategy;
use crate::models::domain::ParticipantRecord;
use crate::models::roster::UnknownSeniorityPolicy;

/// Request to run a matching over a JSON roster
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RunMatchingRequest {
    #[validate(length(min = 1))]
    #[validate(nested)]
    pub participants: Vec<ParticipantRecord>,
    /// Falls back to the configured policy
    #[serde(rename = "unknownSeniorityPolicy", alias = "unknown_seniority_policy", default)]
    pub unknown_seniority_policy: Option<UnknownSeniorityPolicy>,
    /// Falls back to the configured strategy
    #[serde(rename = "selectionStrategy", alias = "selection_strategy", default)]
    pub selection_strategy: Option<SelectionStrategy>,
    /// Return both directions' preference lists alongside the pairs
    #[serde(rename = "includePreferences", alias = "include_preferences", default)]
    pub include_preferences: bool,
}

/// Query options for CSV runs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunCsvQuery {
    #[serde(rename = "unknownSeniorityPolicy", alias = "unknown_seniority_policy", default)]
    pub unknown_seniority_policy: Option<UnknownSeniorityPolicy>,
    #[serde(rename = "selectionStrategy", alias = "selection_strategy", default)]
    pub selection_strategy: Option<SelectionStrategy>,
    #[serde(rename = "includePreferences", alias = "include_preferences", default)]
    pub include_preferences: bool,
}
