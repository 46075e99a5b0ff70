use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{normalize, Participant, ParticipantId, ParticipantRecord};

/// Errors raised while turning input records into a roster
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("Unknown seniority '{seniority}' for '{name}' (row {row})")]
    UnknownSeniority {
        row: usize,
        name: String,
        seniority: String,
    },

    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    #[error("Seniority level '{0}' listed more than once")]
    DuplicateSeniorityLevel(String),

    #[error("Seniority level {0} is blank")]
    BlankSeniorityLevel(usize),

    #[error("Seniority scale has no levels")]
    EmptySeniorityScale,
}

/// What to do with a record whose seniority is not on the scale.
/// There is no default: callers pick one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownSeniorityPolicy {
    /// Abort the whole run
    FailFast,
    /// Leave the participant out and report why
    SkipAndReport,
}

/// Default levels, junior to senior
pub const DEFAULT_SENIORITY_LEVELS: [&str; 6] =
    ["ms12", "ms34", "resident", "fellow", "attending", "faculty"];

/// Ordered seniority lookup table. Rank is the 1-based position, junior first.
#[derive(Debug, Clone)]
pub struct SeniorityScale {
    levels: Vec<String>,
    ranks: HashMap<String, u32>,
}

impl SeniorityScale {
    pub fn new<I, S>(levels: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut ranks = HashMap::new();

        for (idx, level) in levels.into_iter().enumerate() {
            let level = normalize(level.as_ref());
            if level.is_empty() {
                return Err(RosterError::BlankSeniorityLevel(idx + 1));
            }
            if ranks.contains_key(&level) {
                return Err(RosterError::DuplicateSeniorityLevel(level));
            }
            ordered.push(level.clone());
            ranks.insert(level, ordered.len() as u32);
        }

        if ordered.is_empty() {
            return Err(RosterError::EmptySeniorityScale);
        }

        Ok(Self { levels: ordered, ranks })
    }

    pub fn levels(&self) -> &[String] {
        &self.levels
    }

    /// Rank for a seniority string, case-insensitive
    pub fn rank_of(&self, seniority: &str) -> Option<u32> {
        self.ranks.get(&normalize(seniority)).copied()
    }
}

impl Default for SeniorityScale {
    fn default() -> Self {
        let levels = DEFAULT_SENIORITY_LEVELS.iter().map(|l| l.to_string()).collect::<Vec<_>>();
        let ranks = levels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i as u32 + 1))
            .collect();
        Self { levels, ranks }
    }
}

/// A record left out of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub row: usize,
    pub name: String,
    pub reason: String,
}

/// Participants admitted to a run, in input order
#[derive(Debug, Clone, Default)]
pub struct Roster {
    participants: Vec<Participant>,
    rejected: Vec<RejectedRecord>,
}

impl Roster {
    /// Validate records, attach ranks and fresh ids.
    ///
    /// `row` numbers are 1-based positions in `records`. Malformed records always
    /// fail the run; unknown seniorities follow `policy`.
    pub fn from_records(
        records: Vec<ParticipantRecord>,
        scale: &SeniorityScale,
        policy: UnknownSeniorityPolicy,
    ) -> Result<Self, RosterError> {
        let rows = records.into_iter().enumerate().map(|(idx, record)| (idx + 1, record));
        Self::from_rows(rows, scale, policy)
    }

    /// Like [`Roster::from_records`], with caller-supplied row numbers for messages
    pub fn from_rows<I>(
        rows: I,
        scale: &SeniorityScale,
        policy: UnknownSeniorityPolicy,
    ) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = (usize, ParticipantRecord)>,
    {
        let mut participants = Vec::new();
        let mut rejected = Vec::new();
        let mut seen_names: HashMap<String, usize> = HashMap::new();

        for (row, record) in rows {
            if let Err(errors) = record.validate() {
                return Err(RosterError::InvalidRecord {
                    row,
                    message: errors.to_string(),
                });
            }
            if let Some(field) = blank_required_field(&record) {
                return Err(RosterError::InvalidRecord {
                    row,
                    message: format!("{} must not be blank", field),
                });
            }

            let rank = match scale.rank_of(&record.seniority) {
                Some(rank) => rank,
                None => match policy {
                    UnknownSeniorityPolicy::FailFast => {
                        return Err(RosterError::UnknownSeniority {
                            row,
                            name: record.name,
                            seniority: record.seniority,
                        });
                    }
                    UnknownSeniorityPolicy::SkipAndReport => {
                        tracing::warn!(
                            "Skipping '{}' (row {}): unknown seniority '{}'",
                            record.name,
                            row,
                            record.seniority
                        );
                        rejected.push(RejectedRecord {
                            row,
                            reason: format!("unknown seniority '{}'", record.seniority.trim()),
                            name: record.name,
                        });
                        continue;
                    }
                },
            };

            let participant = Participant::from_record(Uuid::new_v4(), record, rank);

            if let Some(first_row) = seen_names.get(participant.name_key()) {
                tracing::warn!(
                    "Display name '{}' at row {} already used at row {}; denylists will match both",
                    participant.name(),
                    row,
                    first_row
                );
            } else {
                seen_names.insert(participant.name_key().to_string(), row);
            }

            participants.push(participant);
        }

        tracing::debug!(
            "Roster built: {} admitted, {} rejected",
            participants.len(),
            rejected.len()
        );

        Ok(Self { participants, rejected })
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn rejected(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    /// Index from id to participant, for lookups in hot loops
    pub fn index(&self) -> HashMap<ParticipantId, &Participant> {
        self.participants.iter().map(|p| (p.id(), p)).collect()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

/// Length validation runs before trimming, so whitespace-only values are caught here
fn blank_required_field(record: &ParticipantRecord) -> Option<&'static str> {
    [
        ("name", &record.name),
        ("city", &record.city),
        ("state", &record.state),
        ("region", &record.region),
        ("seniority", &record.seniority),
    ]
    .into_iter()
    .find(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
}
