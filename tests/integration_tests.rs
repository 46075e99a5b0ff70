// Integration tests for Mentor Match

use mentor_match::core::{
    find_blocking_pairs, prune_to_mutual, Matcher, ProposingSide, RankingPolicy, SelectionStrategy,
};
use mentor_match::models::{
    ParticipantId, ParticipantRecord, Roster, SeniorityScale, UnknownSeniorityPolicy,
    DEFAULT_SENIORITY_LEVELS,
};
use mentor_match::services::load_roster;

fn mentee(name: &str, seniority: &str) -> ParticipantRecord {
    let mut r = ParticipantRecord::new(name, "boston", "ma", "northeast", seniority);
    r.is_mentor = false;
    r
}

fn mentor(name: &str, seniority: &str) -> ParticipantRecord {
    let mut r = ParticipantRecord::new(name, "boston", "ma", "northeast", seniority);
    r.is_mentee = false;
    r
}

fn build(records: Vec<ParticipantRecord>) -> Roster {
    Roster::from_records(records, &SeniorityScale::default(), UnknownSeniorityPolicy::FailFast)
        .expect("roster should build")
}

fn id_of(roster: &Roster, name: &str) -> ParticipantId {
    roster
        .participants()
        .iter()
        .find(|p| p.name() == name)
        .map(|p| p.id())
        .expect("participant present")
}

/// Deterministic mixed roster: both-role participants, allowlists, denylists
fn synthetic_roster(size: usize) -> Roster {
    const CITIES: &[(&str, &str, &str)] = &[
        ("boston", "ma", "northeast"),
        ("worcester", "ma", "northeast"),
        ("austin", "tx", "south"),
        ("houston", "tx", "south"),
        ("denver", "co", "west"),
    ];
    const INTERESTS: &[&str] = &["surgery", "research", "pediatrics", "oncology", "teaching"];

    let records = (0..size)
        .map(|i| {
            let (city, state, region) = CITIES[(i * 3) % CITIES.len()];
            let seniority = DEFAULT_SENIORITY_LEVELS[(i * 7) % DEFAULT_SENIORITY_LEVELS.len()];
            let mut r = ParticipantRecord::new(&format!("p{}", i), city, state, region, seniority);
            r.is_mentor = i % 4 != 0;
            r.is_mentee = i % 5 != 0;
            r.interests = vec![
                INTERESTS[i % INTERESTS.len()].to_string(),
                INTERESTS[(i / 2) % INTERESTS.len()].to_string(),
            ];
            if i % 6 == 0 {
                r.mentee_seniority_allowlist = vec!["ms34".to_string(), "resident".to_string()];
            }
            if i % 7 == 0 {
                r.person_denylist = vec![format!("p{}", i + 1)];
            }
            if i % 11 == 0 {
                r.mentee_region_denylist = vec!["west".to_string()];
            }
            r
        })
        .collect();

    build(records)
}

#[test]
fn test_contested_mentor_goes_to_closer_rank() {
    // M rank 5, A rank 2, B rank 3
    let roster = build(vec![mentee("A", "ms34"), mentee("B", "resident"), mentor("M", "attending")]);
    let outcome = Matcher::with_defaults().run(&roster);

    let (a, b, m) = (id_of(&roster, "A"), id_of(&roster, "B"), id_of(&roster, "M"));

    assert_eq!(outcome.mentee_preferences.get(&a), Some(&[m][..]));
    assert_eq!(outcome.mentee_preferences.get(&b), Some(&[m][..]));
    assert_eq!(outcome.mentor_preferences.get(&m), Some(&[b, a][..]));

    assert_eq!(outcome.assignment.proposer_for(&m), Some(b));
    assert_eq!(outcome.assignment.acceptor_for(&a), None);
    assert_eq!(outcome.summary.proposers.unmatched.len(), 1);
    assert_eq!(outcome.summary.proposers.unmatched[0].id, a);
}

#[test]
fn test_allowlist_keeps_mentee_out_entirely() {
    let mut m = mentor("M", "attending");
    m.mentee_seniority_allowlist = vec!["resident".to_string()];
    let roster = build(vec![mentee("A", "ms34"), m]);
    let outcome = Matcher::with_defaults().run(&roster);

    let (a, m) = (id_of(&roster, "A"), id_of(&roster, "M"));
    assert_eq!(outcome.mentor_preferences.get(&m), Some(&[][..]));
    assert!(!outcome.mentee_preferences.lists(&a, &m));
    assert!(outcome.pairs.is_empty());
}

#[test]
fn test_denylist_shifts_first_choice() {
    let mut a = mentee("A", "ms34");
    a.person_denylist = vec!["N".to_string()];
    let mut far = mentor("F", "resident");
    far.city = "austin".to_string();
    far.state = "tx".to_string();
    far.region = "south".to_string();
    let roster = build(vec![a, mentor("N", "resident"), far]);
    let outcome = Matcher::with_defaults().run(&roster);

    let (a, n, f) = (id_of(&roster, "A"), id_of(&roster, "N"), id_of(&roster, "F"));
    assert_eq!(outcome.mentee_preferences.get(&a), Some(&[f][..]));
    assert_eq!(outcome.assignment.acceptor_for(&a), Some(f));
    assert_eq!(outcome.assignment.proposer_for(&n), None);
}

#[test]
fn test_mentor_with_empty_pool_is_reported_unmatched() {
    let roster = build(vec![mentee("A", "resident"), mentor("M", "attending"), mentor("Junior", "ms12")]);
    let outcome = Matcher::with_defaults().run(&roster);

    let junior = id_of(&roster, "Junior");
    assert_eq!(outcome.mentor_preferences.get(&junior), Some(&[][..]));

    let mentors = &outcome.summary.acceptors;
    assert_eq!(mentors.population, 2);
    assert_eq!(mentors.matched, 1);
    assert!(mentors.unmatched.iter().any(|p| p.id == junior && p.name == "Junior"));
}

#[test]
fn test_mutual_consent_after_pruning() {
    let roster = synthetic_roster(60);
    let outcome = Matcher::with_defaults().run(&roster);

    let (proposers, acceptors) = prune_to_mutual(&outcome.mentee_preferences, &outcome.mentor_preferences);

    for (proposer, list) in proposers.iter() {
        for acceptor in list {
            assert!(acceptors.lists(acceptor, proposer));
        }
    }
    for (acceptor, list) in acceptors.iter() {
        for proposer in list {
            assert!(proposers.lists(proposer, acceptor));
        }
    }
}

#[test]
fn test_no_self_matching_and_one_to_one() {
    let roster = synthetic_roster(80);
    let outcome = Matcher::with_defaults().run(&roster);

    for (acceptor, proposer) in outcome.assignment.as_map() {
        assert_ne!(acceptor, proposer);
        assert_eq!(outcome.assignment.acceptor_for(proposer), Some(*acceptor));
    }
    for table in [&outcome.mentee_preferences, &outcome.mentor_preferences] {
        for (subject, list) in table.iter() {
            assert!(!list.contains(subject));
        }
    }
}

#[test]
fn test_assignment_is_stable_for_every_strategy() {
    for size in [5, 17, 40, 120] {
        let roster = synthetic_roster(size);
        for strategy in SelectionStrategy::ALL {
            let matcher = Matcher::new(RankingPolicy::default(), strategy, ProposingSide::Mentees);
            let outcome = matcher.run(&roster);

            let blocking = find_blocking_pairs(
                &outcome.assignment,
                &outcome.mentee_preferences,
                &outcome.mentor_preferences,
            );
            assert!(blocking.is_empty(), "size {} {:?}: blocking pairs {:?}", size, strategy, blocking);
        }
    }
}

#[test]
fn test_selection_order_does_not_change_assignment() {
    for size in [12, 50, 150] {
        let roster = synthetic_roster(size);
        let baseline = Matcher::with_defaults().run(&roster).assignment;

        for strategy in SelectionStrategy::ALL {
            let outcome = Matcher::with_defaults().with_selection(strategy).run(&roster);
            assert_eq!(outcome.assignment, baseline, "size {} {:?}", size, strategy);
        }
    }
}

#[test]
fn test_mentor_proposing_is_also_stable() {
    let roster = synthetic_roster(70);
    let matcher = Matcher::new(RankingPolicy::default(), SelectionStrategy::Fifo, ProposingSide::Mentors);
    let outcome = matcher.run(&roster);

    let blocking = find_blocking_pairs(
        &outcome.assignment,
        &outcome.mentor_preferences,
        &outcome.mentee_preferences,
    );
    assert!(blocking.is_empty());
    assert_eq!(outcome.pairs.len(), outcome.assignment.len());
}

#[test]
fn test_achieved_ranks_point_into_original_lists() {
    let roster = synthetic_roster(90);
    let outcome = Matcher::with_defaults().run(&roster);

    for achieved in &outcome.summary.proposers.achieved_ranks {
        let list = outcome
            .mentee_preferences
            .get(&achieved.participant.id)
            .expect("matched mentee has a list");
        assert_eq!(list[achieved.rank - 1], achieved.partner.id);
    }
    assert_eq!(outcome.summary.proposers.matched, outcome.summary.total_pairs);
    assert_eq!(outcome.summary.acceptors.matched, outcome.summary.total_pairs);
}

#[test]
fn test_csv_roster_end_to_end() {
    let csv = "\
Name,City,State,Region,Seniority,Is_Mentor,Is_Mentee,Person_Denylist
Ann,Boston,MA,Northeast,MS34,no,yes,
Ben,Boston,MA,Northeast,Resident,no,yes,Mia
Mia,Boston,MA,Northeast,Attending,yes,no,
Max,Austin,TX,South,Fellow,yes,no,
Zed,Denver,CO,West,Unknown,yes,yes,
";

    let roster = load_roster(csv.as_bytes(), &SeniorityScale::default(), UnknownSeniorityPolicy::SkipAndReport)
        .expect("csv loads");
    assert_eq!(roster.len(), 4);
    assert_eq!(roster.rejected()[0].name, "Zed");

    let outcome = Matcher::with_defaults().run(&roster);
    let names: Vec<(&str, &str)> = outcome
        .pairs
        .iter()
        .map(|p| (p.mentor_name.as_str(), p.mentee_name.as_str()))
        .collect();

    // Ben refuses Mia, so Mia takes Ann and Ben goes to Max
    assert_eq!(names, vec![("Mia", "Ann"), ("Max", "Ben")]);
}
