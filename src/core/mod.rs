// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod preferences;
pub mod ranking;
pub mod selection;
pub mod stable_match;
pub mod summary;

pub use filters::{eligible_candidates, is_eligible};
pub use matcher::{MatchOutcome, Matcher, ProposingSide};
pub use preferences::{compute_preferences, PreferenceTable};
pub use ranking::{RankingPolicy, RankingStage};
pub use selection::{ProposerSelection, SelectionStrategy};
pub use stable_match::{find_blocking_pairs, prune_to_mutual, stable_match, Assignment};
pub use summary::{summarize, AchievedRank, MatchSummary, ParticipantRef, RoleSummary};
