use serde::{Deserialize, Serialize};

use crate::core::{preferences::PreferenceTable, stable_match::Assignment};
use crate::models::{Participant, ParticipantId, Role};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRef {
    pub id: ParticipantId,
    pub name: String,
}

impl From<&Participant> for ParticipantRef {
    fn from(p: &Participant) -> Self {
        Self {
            id: p.id(),
            name: p.name().to_string(),
        }
    }
}

/// Where a matched participant's partner sat in its original preference list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AchievedRank {
    pub participant: ParticipantRef,
    pub partner: ParticipantRef,
    /// 1-based
    pub rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSummary {
    pub role: Role,
    /// Everyone holding the role, whether or not they had candidates
    pub population: usize,
    pub matched: usize,
    pub match_rate: f64,
    pub unmatched: Vec<ParticipantRef>,
    pub achieved_ranks: Vec<AchievedRank>,
    pub first_choice_count: usize,
    pub mean_achieved_rank: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub proposers: RoleSummary,
    pub acceptors: RoleSummary,
    pub total_pairs: usize,
}

/// Reporting statistics for a finished run
///
/// Preference tables are the original, unpruned ones.
pub fn summarize(
    people: &[Participant],
    proposer_role: Role,
    proposer_prefs: &PreferenceTable,
    acceptor_prefs: &PreferenceTable,
    assignment: &Assignment,
) -> MatchSummary {
    let acceptor_role = match proposer_role {
        Role::Mentee => Role::Mentor,
        Role::Mentor => Role::Mentee,
    };

    let proposers = role_summary(people, proposer_role, proposer_prefs, |id| {
        assignment.acceptor_for(id)
    });
    let acceptors = role_summary(people, acceptor_role, acceptor_prefs, |id| {
        assignment.proposer_for(id)
    });

    MatchSummary {
        proposers,
        acceptors,
        total_pairs: assignment.len(),
    }
}

fn role_summary<F>(
    people: &[Participant],
    role: Role,
    prefs: &PreferenceTable,
    partner_of: F,
) -> RoleSummary
where
    F: Fn(&ParticipantId) -> Option<ParticipantId>,
{
    let find = |id: ParticipantId| people.iter().find(|p| p.id() == id);

    let mut population = 0;
    let mut unmatched = Vec::new();
    let mut achieved_ranks = Vec::new();

    for person in people.iter().filter(|p| p.has_role(role)) {
        population += 1;

        let Some(partner_id) = partner_of(&person.id()) else {
            unmatched.push(ParticipantRef::from(person));
            continue;
        };

        if let (Some(partner), Some(rank)) = (find(partner_id), prefs.position(&person.id(), &partner_id)) {
            achieved_ranks.push(AchievedRank {
                participant: ParticipantRef::from(person),
                partner: ParticipantRef::from(partner),
                rank,
            });
        }
    }

    let matched = population - unmatched.len();
    let match_rate = if population > 0 {
        matched as f64 / population as f64
    } else {
        0.0
    };
    let first_choice_count = achieved_ranks.iter().filter(|r| r.rank == 1).count();
    let mean_achieved_rank = if achieved_ranks.is_empty() {
        None
    } else {
        Some(achieved_ranks.iter().map(|r| r.rank as f64).sum::<f64>() / achieved_ranks.len() as f64)
    };

    RoleSummary {
        role,
        population,
        matched,
        match_rate,
        unmatched,
        achieved_ranks,
        first_choice_count,
        mean_achieved_rank,
    }
}
