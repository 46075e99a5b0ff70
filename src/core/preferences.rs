use serde::Serialize;
use std::collections::HashMap;

use crate::core::{filters::eligible_candidates, ranking::RankingPolicy};
use crate::models::{Direction, Participant, ParticipantId};

/// Subject -> ordered candidate ids, most preferred first
///
/// Iteration follows insertion order, which is roster order for tables built by
/// [`compute_preferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PreferenceTable {
    subjects: Vec<ParticipantId>,
    lists: HashMap<ParticipantId, Vec<ParticipantId>>,
}

impl PreferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a subject's list. A replaced subject keeps its position.
    pub fn insert(&mut self, subject: ParticipantId, list: Vec<ParticipantId>) {
        if self.lists.insert(subject, list).is_none() {
            self.subjects.push(subject);
        }
    }

    pub fn get(&self, subject: &ParticipantId) -> Option<&[ParticipantId]> {
        self.lists.get(subject).map(Vec::as_slice)
    }

    pub fn contains_subject(&self, subject: &ParticipantId) -> bool {
        self.lists.contains_key(subject)
    }

    /// Whether `subject` lists `candidate`
    pub fn lists(&self, subject: &ParticipantId, candidate: &ParticipantId) -> bool {
        self.get(subject).is_some_and(|list| list.contains(candidate))
    }

    /// 1-based position of `candidate` in `subject`'s list
    pub fn position(&self, subject: &ParticipantId, candidate: &ParticipantId) -> Option<usize> {
        self.get(subject)?
            .iter()
            .position(|c| c == candidate)
            .map(|idx| idx + 1)
    }

    pub fn subjects(&self) -> &[ParticipantId] {
        &self.subjects
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ParticipantId, &[ParticipantId])> + '_ {
        self.subjects
            .iter()
            .map(move |s| (s, self.lists.get(s).map(Vec::as_slice).unwrap_or(&[])))
    }

    /// Copy without subjects whose list is empty
    pub fn without_empty(&self) -> Self {
        let mut table = Self::new();
        for (subject, list) in self.iter().filter(|(_, list)| !list.is_empty()) {
            table.insert(*subject, list.to_vec());
        }
        table
    }

    pub fn len(&self) -> usize {
        self.subjects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty()
    }
}

impl FromIterator<(ParticipantId, Vec<ParticipantId>)> for PreferenceTable {
    fn from_iter<T: IntoIterator<Item = (ParticipantId, Vec<ParticipantId>)>>(iter: T) -> Self {
        let mut table = Self::new();
        for (subject, list) in iter {
            table.insert(subject, list);
        }
        table
    }
}

/// Build every participant's preference list for `direction`
///
/// Each participant gets an entry, in input order; those without the subject role
/// for `direction`, or with no eligible candidates, get an empty list.
pub fn compute_preferences(
    people: &[Participant],
    direction: Direction,
    policy: &RankingPolicy,
) -> PreferenceTable {
    let table: PreferenceTable = people
        .iter()
        .map(|subject| {
            let candidates = eligible_candidates(subject, people, direction);
            let ranked = policy.rank_candidates(subject, candidates, direction);
            (subject.id(), ranked.into_iter().map(Participant::id).collect())
        })
        .collect();

    tracing::debug!(
        "Computed {:?} preferences: {} subjects, {} with candidates",
        direction,
        table.len(),
        table.iter().filter(|(_, list)| !list.is_empty()).count()
    );

    table
}
