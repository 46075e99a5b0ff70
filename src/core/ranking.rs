use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Direction, Participant};

/// One step of the cascading comparator
///
/// `compare` returns `Less` when `a` is preferred by the subject, `Greater` when
/// `b` is, `Equal` to defer to the next stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingStage {
    /// Candidate mentor's allowlist names the subject's seniority
    AllowlistMatch,
    /// Smaller absolute rank difference to the subject
    RankCloseness,
    SameCity,
    SameState,
    SameRegion,
    /// More interest tags shared with the subject
    SharedInterests,
}

impl RankingStage {
    pub fn compare(self, subject: &Participant, a: &Participant, b: &Participant) -> Ordering {
        match self {
            RankingStage::AllowlistMatch => {
                let a_lists = a.mentee_seniority_allowlist().contains(subject.seniority());
                let b_lists = b.mentee_seniority_allowlist().contains(subject.seniority());
                b_lists.cmp(&a_lists)
            }
            RankingStage::RankCloseness => {
                let a_gap = a.rank().abs_diff(subject.rank());
                let b_gap = b.rank().abs_diff(subject.rank());
                a_gap.cmp(&b_gap)
            }
            RankingStage::SameCity => prefer_target(subject.city(), a.city(), b.city()),
            RankingStage::SameState => prefer_target(subject.state(), a.state(), b.state()),
            RankingStage::SameRegion => prefer_target(subject.region(), a.region(), b.region()),
            RankingStage::SharedInterests => {
                let a_shared = subject.shared_interest_count(a);
                let b_shared = subject.shared_interest_count(b);
                b_shared.cmp(&a_shared)
            }
        }
    }
}

/// `Less` when only `a` equals `target`, `Greater` when only `b` does
#[inline]
fn prefer_target(target: &str, a: &str, b: &str) -> Ordering {
    match (a == target, b == target) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Ordered comparator stages for each direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    pub seeks_mentor: Vec<RankingStage>,
    pub seeks_mentee: Vec<RankingStage>,
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            seeks_mentor: vec![
                RankingStage::AllowlistMatch,
                RankingStage::RankCloseness,
                RankingStage::SameRegion,
                RankingStage::SharedInterests,
            ],
            seeks_mentee: vec![
                RankingStage::RankCloseness,
                RankingStage::SameCity,
                RankingStage::SameState,
                RankingStage::SameRegion,
            ],
        }
    }
}

impl RankingPolicy {
    pub fn stages(&self, direction: Direction) -> &[RankingStage] {
        match direction {
            Direction::SeeksMentor => &self.seeks_mentor,
            Direction::SeeksMentee => &self.seeks_mentee,
        }
    }

    /// First non-tie stage decides
    pub fn compare(
        &self,
        direction: Direction,
        subject: &Participant,
        a: &Participant,
        b: &Participant,
    ) -> Ordering {
        self.stages(direction)
            .iter()
            .map(|stage| stage.compare(subject, a, b))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }

    /// Sort candidates most preferred first. Stable: full ties keep input order.
    pub fn rank_candidates<'a>(
        &self,
        subject: &Participant,
        mut candidates: Vec<&'a Participant>,
        direction: Direction,
    ) -> Vec<&'a Participant> {
        candidates.sort_by(|a, b| self.compare(direction, subject, a, b));
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParticipantRecord;
    use uuid::Uuid;

    fn build(name: &str, city: &str, state: &str, region: &str, seniority: &str, rank: u32) -> Participant {
        Participant::from_record(
            Uuid::new_v4(),
            ParticipantRecord::new(name, city, state, region, seniority),
            rank,
        )
    }

    #[test]
    fn test_rank_closeness() {
        let subject = build("s", "boston", "ma", "ne", "ms34", 2);
        let near = build("a", "x", "x", "x", "resident", 3);
        let far = build("b", "x", "x", "x", "attending", 5);

        assert_eq!(RankingStage::RankCloseness.compare(&subject, &near, &far), Ordering::Less);
        assert_eq!(RankingStage::RankCloseness.compare(&subject, &far, &near), Ordering::Greater);
        assert_eq!(RankingStage::RankCloseness.compare(&subject, &near, &near), Ordering::Equal);
    }

    #[test]
    fn test_prefer_target() {
        assert_eq!(prefer_target("boston", "boston", "austin"), Ordering::Less);
        assert_eq!(prefer_target("boston", "austin", "boston"), Ordering::Greater);
        assert_eq!(prefer_target("boston", "boston", "boston"), Ordering::Equal);
        assert_eq!(prefer_target("boston", "austin", "denver"), Ordering::Equal);
    }

    #[test]
    fn test_allowlist_stage_prefers_listing_mentor() {
        let subject = build("s", "boston", "ma", "ne", "resident", 3);
        let mut record = ParticipantRecord::new("a", "x", "x", "x", "attending");
        record.mentee_seniority_allowlist = vec!["resident".to_string()];
        let listing = Participant::from_record(Uuid::new_v4(), record, 5);
        let open = build("b", "x", "x", "x", "fellow", 4);

        assert_eq!(RankingStage::AllowlistMatch.compare(&subject, &listing, &open), Ordering::Less);

        // Allowlist outranks closeness when seeking a mentor
        let policy = RankingPolicy::default();
        let ranked = policy.rank_candidates(&subject, vec![&open, &listing], Direction::SeeksMentor);
        assert_eq!(ranked[0].name(), "a");
    }

    #[test]
    fn test_shared_interests_stage() {
        let mut record = ParticipantRecord::new("s", "x", "x", "x", "ms34");
        record.interests = vec!["surgery".to_string(), "research".to_string()];
        let subject = Participant::from_record(Uuid::new_v4(), record, 2);

        let mut record = ParticipantRecord::new("a", "x", "x", "x", "fellow");
        record.interests = vec!["research".to_string()];
        let one = Participant::from_record(Uuid::new_v4(), record, 4);

        let mut record = ParticipantRecord::new("b", "x", "x", "x", "fellow");
        record.interests = vec!["research".to_string(), "surgery".to_string()];
        let two = Participant::from_record(Uuid::new_v4(), record, 4);

        assert_eq!(RankingStage::SharedInterests.compare(&subject, &two, &one), Ordering::Less);
    }

    #[test]
    fn test_mentee_chain_uses_locality_after_rank() {
        let mentor = build("m", "boston", "ma", "northeast", "attending", 5);
        let same_state = build("a", "worcester", "ma", "northeast", "resident", 3);
        let same_city = build("b", "boston", "ma", "northeast", "resident", 3);
        let far_rank = build("c", "boston", "ma", "northeast", "ms12", 1);
        let other_region = build("d", "austin", "tx", "south", "resident", 3);

        let policy = RankingPolicy::default();
        let ranked = policy.rank_candidates(
            &mentor,
            vec![&far_rank, &other_region, &same_state, &same_city],
            Direction::SeeksMentee,
        );

        let names: Vec<&str> = ranked.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["b", "a", "d", "c"]);
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let subject = build("s", "boston", "ma", "ne", "ms34", 2);
        let first = build("first", "x", "x", "x", "fellow", 4);
        let second = build("second", "x", "x", "x", "fellow", 4);

        let policy = RankingPolicy::default();
        let ranked = policy.rank_candidates(&subject, vec![&first, &second], Direction::SeeksMentor);
        assert_eq!(ranked[0].name(), "first");

        let ranked = policy.rank_candidates(&subject, vec![&second, &first], Direction::SeeksMentor);
        assert_eq!(ranked[0].name(), "second");
    }

    #[test]
    fn test_custom_policy() {
        let subject = build("s", "boston", "ma", "ne", "ms34", 2);
        let near_far_away = build("a", "austin", "tx", "south", "resident", 3);
        let far_local = build("b", "boston", "ma", "ne", "attending", 5);

        let policy = RankingPolicy {
            seeks_mentor: vec![RankingStage::SameCity, RankingStage::RankCloseness],
            seeks_mentee: vec![],
        };
        let ranked = policy.rank_candidates(&subject, vec![&near_far_away, &far_local], Direction::SeeksMentor);
        assert_eq!(ranked[0].name(), "b");
    }
}
