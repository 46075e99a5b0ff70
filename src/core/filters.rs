use crate::models::{Direction, Participant};

/// Check whether `candidate` may appear in `subject`'s preference list
///
/// Does not look at the subject's own role flag; see [`eligible_candidates`].
#[inline]
pub fn is_eligible(subject: &Participant, candidate: &Participant, direction: Direction) -> bool {
    // Identity by id, never by name
    if candidate.id() == subject.id() {
        return false;
    }

    if !candidate.has_role(direction.candidate_role()) {
        return false;
    }

    // Strict seniority ordering, and the mentor's allowlist always constrains the mentee
    let seniority_ok = match direction {
        Direction::SeeksMentor => {
            candidate.rank() > subject.rank()
                && candidate.accepts_mentee_seniority(subject.seniority())
        }
        Direction::SeeksMentee => {
            candidate.rank() < subject.rank()
                && subject.accepts_mentee_seniority(candidate.seniority())
        }
    };
    if !seniority_ok {
        return false;
    }

    if subject.person_denylist().contains(candidate.name_key()) {
        return false;
    }

    !subject.region_denylist(direction).contains(candidate.region())
}

/// Filter `candidates` down to those eligible for `subject` in `direction`
///
/// A subject without the role for `direction` gets nothing. Output keeps input
/// order, and filtering an already-filtered set returns it unchanged.
pub fn eligible_candidates<'a, I>(
    subject: &Participant,
    candidates: I,
    direction: Direction,
) -> Vec<&'a Participant>
where
    I: IntoIterator<Item = &'a Participant>,
{
    if !subject.has_role(direction.subject_role()) {
        return Vec::new();
    }

    candidates
        .into_iter()
        .filter(|candidate| is_eligible(subject, candidate, direction))
        .collect()
}
