use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;
use validator::Validate;

/// Opaque per-run participant identity. Generated at ingestion, never reused.
pub type ParticipantId = Uuid;

/// Which counterpart a subject is looking for when its preference list is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Mentee looking at mentors
    SeeksMentor,
    /// Mentor looking at mentees
    SeeksMentee,
}

impl Direction {
    /// Role a subject must hold to have a list in this direction
    pub fn subject_role(self) -> Role {
        match self {
            Direction::SeeksMentor => Role::Mentee,
            Direction::SeeksMentee => Role::Mentor,
        }
    }

    /// Role a candidate must hold to appear in a list in this direction
    pub fn candidate_role(self) -> Role {
        match self {
            Direction::SeeksMentor => Role::Mentor,
            Direction::SeeksMentee => Role::Mentee,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Mentor,
    Mentee,
}

impl Role {
    /// Direction in which a participant holding this role ranks counterparts
    pub fn direction(self) -> Direction {
        match self {
            Role::Mentor => Direction::SeeksMentee,
            Role::Mentee => Direction::SeeksMentor,
        }
    }
}

/// One validated input row, before a rank and an id are attached
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ParticipantRecord {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub city: String,
    #[validate(length(min = 1))]
    pub state: String,
    #[validate(length(min = 1))]
    pub region: String,
    #[validate(length(min = 1))]
    pub seniority: String,
    #[serde(rename = "isMentor", alias = "is_mentor", default = "default_true")]
    pub is_mentor: bool,
    #[serde(rename = "isMentee", alias = "is_mentee", default = "default_true")]
    pub is_mentee: bool,
    #[serde(rename = "menteeSeniorityAllowlist", alias = "mentee_seniority_allowlist", default)]
    pub mentee_seniority_allowlist: Vec<String>,
    #[serde(rename = "personDenylist", alias = "person_denylist", default)]
    pub person_denylist: Vec<String>,
    #[serde(rename = "mentorRegionDenylist", alias = "mentor_region_denylist", default)]
    pub mentor_region_denylist: Vec<String>,
    #[serde(rename = "menteeRegionDenylist", alias = "mentee_region_denylist", default)]
    pub mentee_region_denylist: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

fn default_true() -> bool { true }

impl ParticipantRecord {
    /// Record with both roles and no allow/deny lists or interests
    pub fn new(name: &str, city: &str, state: &str, region: &str, seniority: &str) -> Self {
        Self {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            region: region.to_string(),
            seniority: seniority.to_string(),
            is_mentor: true,
            is_mentee: true,
            mentee_seniority_allowlist: vec![],
            person_denylist: vec![],
            mentor_region_denylist: vec![],
            mentee_region_denylist: vec![],
            interests: vec![],
        }
    }
}

/// Immutable participant, built from a record by [`crate::models::SeniorityScale`]
///
/// Locality, seniority and list values are trimmed and lower-cased. `rank` is
/// always the scale's rank for `seniority`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Participant {
    id: ParticipantId,
    name: String,
    #[serde(skip)]
    name_key: String,
    city: String,
    state: String,
    region: String,
    seniority: String,
    rank: u32,
    is_mentor: bool,
    is_mentee: bool,
    mentee_seniority_allowlist: BTreeSet<String>,
    person_denylist: BTreeSet<String>,
    mentor_region_denylist: BTreeSet<String>,
    mentee_region_denylist: BTreeSet<String>,
    interests: BTreeSet<String>,
}

impl Participant {
    pub(crate) fn from_record(id: ParticipantId, record: ParticipantRecord, rank: u32) -> Self {
        let name = record.name.trim().to_string();
        Self {
            id,
            name_key: normalize(&name),
            name,
            city: normalize(&record.city),
            state: normalize(&record.state),
            region: normalize(&record.region),
            seniority: normalize(&record.seniority),
            rank,
            is_mentor: record.is_mentor,
            is_mentee: record.is_mentee,
            mentee_seniority_allowlist: normalize_set(record.mentee_seniority_allowlist),
            person_denylist: normalize_set(record.person_denylist),
            mentor_region_denylist: normalize_set(record.mentor_region_denylist),
            mentee_region_denylist: normalize_set(record.mentee_region_denylist),
            interests: normalize_set(record.interests),
        }
    }

    pub fn id(&self) -> ParticipantId { self.id }
    pub fn name(&self) -> &str { &self.name }
    /// Lower-cased name, the form denylists are matched against
    pub fn name_key(&self) -> &str { &self.name_key }
    pub fn city(&self) -> &str { &self.city }
    pub fn state(&self) -> &str { &self.state }
    pub fn region(&self) -> &str { &self.region }
    pub fn seniority(&self) -> &str { &self.seniority }
    pub fn rank(&self) -> u32 { self.rank }
    pub fn is_mentor(&self) -> bool { self.is_mentor }
    pub fn is_mentee(&self) -> bool { self.is_mentee }
    pub fn mentee_seniority_allowlist(&self) -> &BTreeSet<String> { &self.mentee_seniority_allowlist }
    pub fn person_denylist(&self) -> &BTreeSet<String> { &self.person_denylist }
    pub fn mentor_region_denylist(&self) -> &BTreeSet<String> { &self.mentor_region_denylist }
    pub fn mentee_region_denylist(&self) -> &BTreeSet<String> { &self.mentee_region_denylist }
    pub fn interests(&self) -> &BTreeSet<String> { &self.interests }

    pub fn has_role(&self, role: Role) -> bool {
        match role {
            Role::Mentor => self.is_mentor,
            Role::Mentee => self.is_mentee,
        }
    }

    /// Whether this participant, acting as a mentor, will take a mentee of `seniority`.
    /// An empty allowlist places no restriction.
    pub fn accepts_mentee_seniority(&self, seniority: &str) -> bool {
        self.mentee_seniority_allowlist.is_empty()
            || self.mentee_seniority_allowlist.contains(seniority)
    }

    /// Region denylist that applies when this participant ranks in `direction`
    pub fn region_denylist(&self, direction: Direction) -> &BTreeSet<String> {
        match direction {
            Direction::SeeksMentor => &self.mentor_region_denylist,
            Direction::SeeksMentee => &self.mentee_region_denylist,
        }
    }

    pub fn shared_interest_count(&self, other: &Participant) -> usize {
        self.interests.intersection(&other.interests).count()
    }
}

pub(crate) fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn normalize_set(values: Vec<String>) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| normalize(v))
        .filter(|v| !v.is_empty())
        .collect()
}

/// A matched mentor/mentee pair with display names resolved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchPair {
    #[serde(rename = "mentorId")]
    pub mentor_id: ParticipantId,
    #[serde(rename = "mentorName")]
    pub mentor_name: String,
    #[serde(rename = "menteeId")]
    pub mentee_id: ParticipantId,
    #[serde(rename = "menteeName")]
    pub mentee_name: String,
}
