use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Chooses which free proposer moves next in deferred acceptance
///
/// Proposers are identified by their position in the proposer table. The engine
/// only pushes proposers that are unmatched and never pushes one that is already
/// waiting. The final assignment does not depend on the strategy.
pub trait ProposerSelection {
    fn push(&mut self, proposer: usize);
    fn next(&mut self) -> Option<usize>;
}

/// Lowest position first, like scanning the input for the first free proposer
#[derive(Debug, Default)]
pub struct InputOrder(BTreeSet<usize>);

impl ProposerSelection for InputOrder {
    fn push(&mut self, proposer: usize) {
        self.0.insert(proposer);
    }

    fn next(&mut self) -> Option<usize> {
        self.0.pop_first()
    }
}

/// Highest position first
#[derive(Debug, Default)]
pub struct ReverseInputOrder(BTreeSet<usize>);

impl ProposerSelection for ReverseInputOrder {
    fn push(&mut self, proposer: usize) {
        self.0.insert(proposer);
    }

    fn next(&mut self) -> Option<usize> {
        self.0.pop_last()
    }
}

/// Queue: displaced and rejected proposers go to the back
#[derive(Debug, Default)]
pub struct Fifo(VecDeque<usize>);

impl ProposerSelection for Fifo {
    fn push(&mut self, proposer: usize) {
        self.0.push_back(proposer);
    }

    fn next(&mut self) -> Option<usize> {
        self.0.pop_front()
    }
}

/// Configurable selection strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    #[default]
    InputOrder,
    ReverseInputOrder,
    Fifo,
}

impl SelectionStrategy {
    pub const ALL: [SelectionStrategy; 3] = [
        SelectionStrategy::InputOrder,
        SelectionStrategy::ReverseInputOrder,
        SelectionStrategy::Fifo,
    ];

    pub fn build(self) -> Box<dyn ProposerSelection> {
        match self {
            SelectionStrategy::InputOrder => Box::<InputOrder>::default(),
            SelectionStrategy::ReverseInputOrder => Box::<ReverseInputOrder>::default(),
            SelectionStrategy::Fifo => Box::<Fifo>::default(),
        }
    }
}
