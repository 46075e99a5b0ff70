use serde::{Deserialize, Serialize};

use crate::core::{
    preferences::{compute_preferences, PreferenceTable},
    ranking::RankingPolicy,
    selection::SelectionStrategy,
    stable_match::{stable_match, Assignment},
    summary::{summarize, MatchSummary, RoleSummary},
};
use crate::models::{Direction, MatchPair, Role, Roster};

/// Which side proposes in deferred acceptance. The proposing side gets its optimal
/// stable outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposingSide {
    #[default]
    Mentees,
    Mentors,
}

impl ProposingSide {
    pub fn role(self) -> Role {
        match self {
            ProposingSide::Mentees => Role::Mentee,
            ProposingSide::Mentors => Role::Mentor,
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    /// Mentee -> mentors
    pub mentee_preferences: PreferenceTable,
    /// Mentor -> mentees
    pub mentor_preferences: PreferenceTable,
    pub assignment: Assignment,
    /// Matched pairs in roster order of the mentor
    pub pairs: Vec<MatchPair>,
    pub summary: MatchSummary,
}

/// Runs the full pipeline: eligibility, ranking, deferred acceptance, summary
///
/// # Pipeline Stages
/// 1. Preference lists for both directions
/// 2. Mutual-consent pruning and deferred acceptance
/// 3. Summary over the original lists
#[derive(Debug, Clone)]
pub struct Matcher {
    policy: RankingPolicy,
    selection: SelectionStrategy,
    proposing_side: ProposingSide,
}

impl Matcher {
    pub fn new(policy: RankingPolicy, selection: SelectionStrategy, proposing_side: ProposingSide) -> Self {
        Self {
            policy,
            selection,
            proposing_side,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(RankingPolicy::default(), SelectionStrategy::default(), ProposingSide::default())
    }

    /// Same matcher with a different selection strategy
    pub fn with_selection(&self, selection: SelectionStrategy) -> Self {
        Self {
            selection,
            ..self.clone()
        }
    }

    pub fn policy(&self) -> &RankingPolicy {
        &self.policy
    }

    pub fn selection(&self) -> SelectionStrategy {
        self.selection
    }

    pub fn proposing_side(&self) -> ProposingSide {
        self.proposing_side
    }

    pub fn run(&self, roster: &Roster) -> MatchOutcome {
        let people = roster.participants();

        tracing::info!(
            "Matching {} participants ({:?} propose, {:?} selection)",
            people.len(),
            self.proposing_side,
            self.selection
        );

        let mentee_preferences = compute_preferences(people, Direction::SeeksMentor, &self.policy);
        let mentor_preferences = compute_preferences(people, Direction::SeeksMentee, &self.policy);

        let (proposer_prefs, acceptor_prefs) = match self.proposing_side {
            ProposingSide::Mentees => (&mentee_preferences, &mentor_preferences),
            ProposingSide::Mentors => (&mentor_preferences, &mentee_preferences),
        };

        let mut selection = self.selection.build();
        let assignment = stable_match(
            &proposer_prefs.without_empty(),
            &acceptor_prefs.without_empty(),
            selection.as_mut(),
        );

        let summary = summarize(
            people,
            self.proposing_side.role(),
            proposer_prefs,
            acceptor_prefs,
            &assignment,
        );

        let pairs = self.resolve_pairs(roster, &assignment);

        tracing::info!(
            "Matched {} pairs; {} of {} mentees and {} of {} mentors unmatched",
            pairs.len(),
            mentee_side(&summary, self.proposing_side).unmatched.len(),
            mentee_side(&summary, self.proposing_side).population,
            mentor_side(&summary, self.proposing_side).unmatched.len(),
            mentor_side(&summary, self.proposing_side).population,
        );

        MatchOutcome {
            mentee_preferences,
            mentor_preferences,
            assignment,
            pairs,
            summary,
        }
    }

    /// Display names are attached here and nowhere earlier
    fn resolve_pairs(&self, roster: &Roster, assignment: &Assignment) -> Vec<MatchPair> {
        let index = roster.index();

        roster
            .participants()
            .iter()
            .filter_map(|mentor| {
                let mentee_id = match self.proposing_side {
                    ProposingSide::Mentees => assignment.proposer_for(&mentor.id()),
                    ProposingSide::Mentors => assignment.acceptor_for(&mentor.id()),
                }?;
                let mentee = index.get(&mentee_id)?;

                Some(MatchPair {
                    mentor_id: mentor.id(),
                    mentor_name: mentor.name().to_string(),
                    mentee_id,
                    mentee_name: mentee.name().to_string(),
                })
            })
            .collect()
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn mentee_side(summary: &MatchSummary, side: ProposingSide) -> &RoleSummary {
    match side {
        ProposingSide::Mentees => &summary.proposers,
        ProposingSide::Mentors => &summary.acceptors,
    }
}

fn mentor_side(summary: &MatchSummary, side: ProposingSide) -> &RoleSummary {
    match side {
        ProposingSide::Mentees => &summary.acceptors,
        ProposingSide::Mentors => &summary.proposers,
    }
}
