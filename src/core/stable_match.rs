use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::preferences::PreferenceTable;
use crate::core::selection::ProposerSelection;
use crate::models::ParticipantId;

/// Final one-to-one assignment, keyed both ways
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    by_acceptor: HashMap<ParticipantId, ParticipantId>,
    by_proposer: HashMap<ParticipantId, ParticipantId>,
}

impl Assignment {
    pub fn proposer_for(&self, acceptor: &ParticipantId) -> Option<ParticipantId> {
        self.by_acceptor.get(acceptor).copied()
    }

    pub fn acceptor_for(&self, proposer: &ParticipantId) -> Option<ParticipantId> {
        self.by_proposer.get(proposer).copied()
    }

    /// Acceptor -> proposer view
    pub fn as_map(&self) -> &HashMap<ParticipantId, ParticipantId> {
        &self.by_acceptor
    }

    pub fn len(&self) -> usize {
        self.by_acceptor.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_acceptor.is_empty()
    }

    fn insert(&mut self, acceptor: ParticipantId, proposer: ParticipantId) {
        self.by_acceptor.insert(acceptor, proposer);
        self.by_proposer.insert(proposer, acceptor);
    }
}

/// Keep only entries listed on both sides
///
/// A proposer keeps an acceptor only if that acceptor lists the proposer, and the
/// reverse. Order within each list is preserved and the inputs are untouched.
pub fn prune_to_mutual(
    proposers: &PreferenceTable,
    acceptors: &PreferenceTable,
) -> (PreferenceTable, PreferenceTable) {
    let proposer_pairs: HashSet<(ParticipantId, ParticipantId)> = proposers
        .iter()
        .flat_map(|(p, list)| list.iter().map(move |a| (*p, *a)))
        .collect();
    let acceptor_pairs: HashSet<(ParticipantId, ParticipantId)> = acceptors
        .iter()
        .flat_map(|(a, list)| list.iter().map(move |p| (*p, *a)))
        .collect();

    let pruned_proposers: PreferenceTable = proposers
        .iter()
        .map(|(p, list)| {
            let kept: Vec<ParticipantId> = list
                .iter()
                .filter(|a| acceptor_pairs.contains(&(*p, **a)))
                .copied()
                .collect();
            (*p, kept)
        })
        .collect();

    let pruned_acceptors: PreferenceTable = acceptors
        .iter()
        .map(|(a, list)| {
            let kept: Vec<ParticipantId> = list
                .iter()
                .filter(|p| proposer_pairs.contains(&(**p, *a)))
                .copied()
                .collect();
            (*a, kept)
        })
        .collect();

    (pruned_proposers, pruned_acceptors)
}

/// Proposer-optimal deferred acceptance (Gale-Shapley)
///
/// `selection` decides which free proposer moves next. Proposers that run out of
/// acceptors stay unmatched.
pub fn stable_match(
    proposer_prefs: &PreferenceTable,
    acceptor_prefs: &PreferenceTable,
    selection: &mut dyn ProposerSelection,
) -> Assignment {
    let (proposers, acceptors) = prune_to_mutual(proposer_prefs, acceptor_prefs);

    let proposer_ids: Vec<ParticipantId> = proposers.subjects().to_vec();
    let mut remaining: Vec<VecDeque<ParticipantId>> = proposers
        .iter()
        .map(|(_, list)| list.iter().copied().collect())
        .collect();

    // acceptor -> (proposer -> position); lower is better
    let acceptor_rankings: HashMap<ParticipantId, HashMap<ParticipantId, usize>> = acceptors
        .iter()
        .map(|(a, list)| {
            let positions = list.iter().enumerate().map(|(i, p)| (*p, i)).collect();
            (*a, positions)
        })
        .collect();
    let standing = |acceptor: &ParticipantId, proposer: &ParticipantId| -> usize {
        acceptor_rankings
            .get(acceptor)
            .and_then(|ranks| ranks.get(proposer))
            .copied()
            .unwrap_or(usize::MAX)
    };

    for (idx, list) in remaining.iter().enumerate() {
        if !list.is_empty() {
            selection.push(idx);
        }
    }

    // acceptor -> proposer position
    let mut matches: HashMap<ParticipantId, usize> = HashMap::new();
    let mut proposals = 0usize;
    let mut displacements = 0usize;

    while let Some(idx) = selection.next() {
        let Some(acceptor) = remaining[idx].pop_front() else {
            continue;
        };
        proposals += 1;
        let proposer = proposer_ids[idx];

        let rejected = match matches.get(&acceptor).copied() {
            None => {
                matches.insert(acceptor, idx);
                None
            }
            Some(current) => {
                if standing(&acceptor, &proposer) < standing(&acceptor, &proposer_ids[current]) {
                    matches.insert(acceptor, idx);
                    displacements += 1;
                    Some(current)
                } else {
                    Some(idx)
                }
            }
        };

        if let Some(free) = rejected {
            if !remaining[free].is_empty() {
                selection.push(free);
            }
        }
    }

    let mut assignment = Assignment::default();
    for (acceptor, idx) in matches {
        assignment.insert(acceptor, proposer_ids[idx]);
    }

    tracing::debug!(
        "Deferred acceptance finished: {} proposals, {} displacements, {} pairs",
        proposals,
        displacements,
        assignment.len()
    );

    assignment
}

/// Pairs that would both rather be with each other than with their assignment
///
/// Only mutually acceptable pairs count. An empty result means the assignment is
/// stable with respect to the given preferences.
pub fn find_blocking_pairs(
    assignment: &Assignment,
    proposer_prefs: &PreferenceTable,
    acceptor_prefs: &PreferenceTable,
) -> Vec<(ParticipantId, ParticipantId)> {
    let (proposers, acceptors) = prune_to_mutual(proposer_prefs, acceptor_prefs);
    let mut blocking = Vec::new();

    for (proposer, list) in proposers.iter() {
        // Acceptors ranked above the current match, or the whole list if unmatched
        let preferred = match assignment.acceptor_for(proposer) {
            Some(current) => {
                let cut = list.iter().position(|a| *a == current).unwrap_or(list.len());
                &list[..cut]
            }
            None => list,
        };

        for acceptor in preferred {
            let acceptor_wants = match assignment.proposer_for(acceptor) {
                None => true,
                Some(current) => match (
                    acceptors.position(acceptor, proposer),
                    acceptors.position(acceptor, &current),
                ) {
                    (Some(new), Some(held)) => new < held,
                    (Some(_), None) => true,
                    _ => false,
                },
            };
            if acceptor_wants {
                blocking.push((*proposer, *acceptor));
            }
        }
    }

    blocking
}
