use itertools::Itertools;

use quilt_placer::{
    diversity_objective, hamming_distance, total_pairwise_distance, Catalog, Color, Diversifier, Engine, Error,
    Outcome, QuiltModel, Solve, StopReason, Topology, Z3Engine,
};

fn quilt(width: usize, height: usize, counts: &[(&str, usize)]) -> (Topology, Catalog, QuiltModel) {
    let topology = Topology::new(width, height).unwrap();
    let colors = counts.iter().map(|&(name, n)| Color::new(name, n, "#808080")).collect();
    let catalog = Catalog::new(colors, &topology).unwrap();
    let model = QuiltModel::build(&topology, &catalog);
    (topology, catalog, model)
}

fn run(model: &QuiltModel, target: usize, seed: Option<u32>) -> Outcome {
    Diversifier::new(model, Z3Engine::new(), target).seed(seed).run(|_, _| Ok(())).unwrap()
}

fn assert_all_valid(model: &QuiltModel, outcome: &Outcome) {
    for solution in &outcome.solutions {
        assert_eq!(model.violations(solution), vec![], "{:?}", solution);
    }
    for (a, b) in outcome.solutions.iter().tuple_combinations() {
        assert!(hamming_distance(a, b) > 0);
    }
}

#[test]
fn two_colors_cannot_fill_two_by_two() {
    // the single minor square touches all four majors, which already need both colors
    let (_, _, model) = quilt(2, 2, &[("A", 3), ("B", 2)]);
    let outcome = run(&model, 1, None);
    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert!(outcome.solutions.is_empty());
}

#[test]
fn two_by_two_single_solution() {
    let (topology, _, model) = quilt(2, 2, &[("A", 2), ("B", 2), ("C", 1)]);
    let outcome = run(&model, 1, None);
    assert_eq!(outcome.stop, StopReason::Done);
    assert_eq!(outcome.solutions.len(), 1);
    let solution = &outcome.solutions[0];
    assert_eq!(solution.len(), 5);
    assert_eq!(solution.iter().filter(|&&c| c == 0).count(), 2);
    assert_eq!(solution.iter().filter(|&&c| c == 1).count(), 2);
    assert_eq!(solution[topology.minor_idx(0, 0).unwrap()], 2);
    assert_all_valid(&model, &outcome);
}

#[test]
fn two_by_two_runs_out_after_both_checkerboards() {
    let (_, _, model) = quilt(2, 2, &[("A", 2), ("B", 2), ("C", 1)]);
    let outcome = run(&model, 5, Some(20));
    assert_eq!(outcome.stop, StopReason::Exhausted);
    assert_eq!(outcome.solutions.len(), 2);
    assert_all_valid(&model, &outcome);
    assert_eq!(hamming_distance(&outcome.solutions[0], &outcome.solutions[1]), 4);
}

#[test]
fn three_by_two_distinct_solutions() {
    let (_, _, model) = quilt(3, 2, &[("A", 3), ("B", 3), ("C", 1), ("D", 1)]);
    let mut streamed = Vec::new();
    let outcome = Diversifier::new(&model, Z3Engine::new(), 3)
        .run(|i, _| {
            streamed.push(i);
            Ok(())
        })
        .unwrap();
    assert_eq!(outcome.stop, StopReason::Done);
    assert_eq!(outcome.solutions.len(), 3);
    assert_eq!(streamed, vec![0, 1, 2]);
    assert_all_valid(&model, &outcome);

    let running: Vec<_> = (1..=outcome.solutions.len()).map(|k| total_pairwise_distance(&outcome.solutions[..k])).collect();
    assert!(running.windows(2).all(|w| w[0] < w[1]), "{:?}", running);
}

#[test]
fn three_by_three_with_seed() {
    let (_, _, model) = quilt(3, 3, &[("A", 5), ("B", 4), ("C", 2), ("D", 2)]);
    let outcome = run(&model, 4, Some(7));
    assert!(!outcome.solutions.is_empty());
    assert_all_valid(&model, &outcome);
}

#[test]
fn engine_honours_diversity_objective() {
    let (_, _, model) = quilt(2, 2, &[("A", 2), ("B", 2), ("C", 1)]);
    let mut engine = Z3Engine::new();
    let first = match engine.solve(&model, None, None).unwrap() {
        Solve::Found(a) => a,
        other => panic!("expected a solution, got {:?}", other),
    };
    let history = vec![first];
    let second = match engine.solve(&model, Some(&diversity_objective(&history)), None).unwrap() {
        Solve::Found(a) => a,
        other => panic!("expected a solution, got {:?}", other),
    };
    assert_ne!(history[0], second);
    assert_eq!(model.violations(&second), vec![]);

    let history = vec![history[0].clone(), second];
    assert_eq!(engine.solve(&model, Some(&diversity_objective(&history)), None).unwrap(), Solve::Infeasible);
}

#[test]
fn same_seed_same_runs() {
    let (_, _, model) = quilt(3, 3, &[("A", 5), ("B", 4), ("C", 2), ("D", 2)]);
    let first = run(&model, 3, Some(20));
    let second = run(&model, 3, Some(20));
    assert_eq!(first.solutions[0], second.solutions[0]);
    assert_eq!(first, second);
}

#[test]
fn tight_deadline_times_out_or_finishes_cleanly() {
    // the 6x6 nine-color quilt: maximizing distance to earlier solutions takes far longer than 1ms
    let palette = [
        ("blue", 7),
        ("orange", 9),
        ("yellow", 8),
        ("green", 8),
        ("aqua", 5),
        ("brown", 4),
        ("red", 7),
        ("purple", 8),
        ("pink", 5),
    ];
    let (_, _, model) = quilt(6, 6, &palette);
    let mut streamed = 0;
    let res = Diversifier::new(&model, Z3Engine::with_timeout(Some(1)), 10).run(|_, _| {
        streamed += 1;
        Ok(())
    });
    match res {
        Err(Error::Timeout { accepted }) => {
            assert!(accepted < 10);
            assert_eq!(accepted, streamed);
        }
        Ok(outcome) => assert_all_valid(&model, &outcome),
        Err(other) => panic!("unexpected error: {}", other),
    }
}
