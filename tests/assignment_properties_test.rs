use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_santa::{assign, Participant, SantaError, Target, TargetPool};
use std::collections::HashSet;

fn family() -> Vec<Participant> {
    // 夫妻互相排除
    vec![
        Participant::new("Ann", "+12065550101", ["Bob"]),
        Participant::new("Bob", "+12065550102", ["Ann"]),
        Participant::new("Cat", "+12065550103", ["Dan"]),
        Participant::new("Dan", "+12065550104", ["Cat"]),
        Participant::new("Eve", "+12065550105", Vec::<String>::new()),
        Participant::new("Fay", "+12065550106", ["Eve", "Ann"]),
    ]
}

fn assert_valid(participants: &[Participant], pool: &[Target], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let assignments = assign(participants, pool, &mut rng).unwrap();

    assert_eq!(assignments.len(), participants.len());

    let givers: Vec<&str> = assignments.iter().map(|a| a.giver.name()).collect();
    let expected: Vec<&str> = participants.iter().map(Participant::name).collect();
    assert_eq!(givers, expected, "givers keep source order");

    let targets: HashSet<&str> = assignments.iter().map(|a| a.target.label()).collect();
    assert_eq!(targets.len(), pool.len(), "every target used exactly once");

    for assignment in &assignments {
        assert!(!assignment.giver.excludes(assignment.target.label()));
        if let Target::Receiver(receiver) = &assignment.target {
            assert_ne!(receiver.name(), assignment.giver.name());
        }
    }
}

#[test]
fn test_pairs_respect_exclusions_across_seeds() {
    let participants = family();
    let pool = TargetPool::receivers(&participants);

    for seed in 0..500 {
        assert_valid(&participants, &pool, seed);
    }
}

#[test]
fn test_categories_respect_exclusions_across_seeds() {
    let participants = vec![
        Participant::new("Ann", "+12065550101", ["Socks", "Candy"]),
        Participant::new("Bob", "+12065550102", ["Socks"]),
        Participant::new("Cat", "+12065550103", Vec::<String>::new()),
    ];
    let pool = TargetPool::categories(&["Socks", "Candy", "Books"]);

    for seed in 0..500 {
        assert_valid(&participants, &pool, seed);
    }
}

#[test]
fn test_only_solution_is_always_found() {
    let participants = vec![
        Participant::new("A", "+12065550101", ["X"]),
        Participant::new("B", "+12065550102", Vec::<String>::new()),
    ];
    let pool = TargetPool::categories(&["X", "Y"]);

    for seed in 0..100 {
        let assignments = assign(&participants, &pool, &mut StdRng::seed_from_u64(seed)).unwrap();
        assert_eq!(assignments[0].target.label(), "Y");
        assert_eq!(assignments[1].target.label(), "X");
    }
}

#[test]
fn test_two_people_swap() {
    let participants = vec![
        Participant::new("A", "+12065550101", Vec::<String>::new()),
        Participant::new("B", "+12065550102", Vec::<String>::new()),
    ];
    let pool = TargetPool::receivers(&participants);

    let assignments = assign(&participants, &pool, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(assignments[0].to_string(), "A ---> B");
    assert_eq!(assignments[1].to_string(), "B ---> A");
}

#[test]
fn test_determinism_with_fixed_seed() {
    let participants = family();
    let pool = TargetPool::receivers(&participants);

    let runs: Vec<_> = (0..3)
        .map(|_| assign(&participants, &pool, &mut StdRng::seed_from_u64(2024)).unwrap())
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
}

#[test]
fn test_input_collections_are_untouched() {
    let participants = family();
    let pool = TargetPool::receivers(&participants);
    let before = (participants.clone(), pool.clone());

    assign(&participants, &pool, &mut StdRng::seed_from_u64(9)).unwrap();

    assert_eq!((participants, pool), before);
}

#[test]
fn test_infeasible_configurations_are_config_errors() {
    let participants = vec![
        Participant::new("A", "+12065550101", ["X", "Y"]),
        Participant::new("B", "+12065550102", Vec::<String>::new()),
    ];
    let err = assign(
        &participants,
        &TargetPool::categories(&["X", "Y"]),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(err.is_config_error());
    assert!(matches!(err, SantaError::InfeasibleAssignment { .. }));

    let err = assign(
        &participants,
        &TargetPool::categories(&["X", "Y", "Z"]),
        &mut StdRng::seed_from_u64(0),
    )
    .unwrap_err();
    assert!(matches!(err, SantaError::PoolSizeMismatch { .. }));
}
