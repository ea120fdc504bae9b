use cube_core::{FaceletCube, Move, parse_sequence};
use twophase::{CancelToken, Difficulty, Phase, SolveError, TwoPhaseSolver};

fn scrambled(notation: &str) -> FaceletCube {
    let mut cube = FaceletCube::SOLVED;
    cube.apply_all(&parse_sequence(notation).unwrap());
    cube
}

#[test_log::test]
fn solved_state_yields_empty_solution() {
    let solution = TwoPhaseSolver::new().solve(&FaceletCube::SOLVED).unwrap();
    assert!(solution.is_empty());
    assert_eq!(solution.difficulty(), Difficulty::Trivial);
}

#[test_log::test]
fn single_move_is_undone_by_its_inverse() {
    let cube = scrambled("R");
    let solution = TwoPhaseSolver::new().solve(&cube).unwrap();

    let mut replay = cube.clone();
    replay.apply_all(&solution.moves());
    assert!(replay.is_solved());
    // One quarter turn solves in one move.
    assert_eq!(solution.move_count(), 1);
    assert_eq!(solution.moves()[0], "R'".parse::<Move>().unwrap());
}

#[test_log::test]
fn scramble_replay_returns_to_solved_within_bounds() {
    let solver = TwoPhaseSolver::new();
    let scrambles = [
        "R U R' U'",
        "U2 F' L2 D B2 R' D2 F U' L",
        "D F2 U' B2 L2 D' R2 U B2 U' L' B D2 F' R D2 L' U2 F L2",
    ];
    for scramble in scrambles {
        let cube = scrambled(scramble);
        let solution = solver.solve(&cube).unwrap();
        assert!(solution.move_count() <= 30, "too long for {scramble:?}");

        let mut replay = cube.clone();
        replay.apply_all(&solution.moves());
        assert!(replay.is_solved(), "did not solve {scramble:?}");
    }
}

#[test_log::test]
fn phase_labels_partition_the_solution() {
    let solution = TwoPhaseSolver::new()
        .solve(&scrambled("F R U2 L' D B'"))
        .unwrap();
    let boundary = solution
        .steps
        .iter()
        .position(|step| step.phase == Phase::Two)
        .unwrap_or(solution.steps.len());
    assert!(
        solution.steps[..boundary]
            .iter()
            .all(|step| step.phase == Phase::One)
    );
    assert!(
        solution.steps[boundary..]
            .iter()
            .all(|step| step.phase == Phase::Two)
    );
    assert_eq!(
        solution.phase_counts(),
        [boundary, solution.steps.len() - boundary]
    );
}

#[test_log::test]
fn invalid_state_is_rejected_before_searching() {
    // The UF edge flipped in place; every count and center stays right but
    // the state is unreachable.
    let text = "UUUUUUUFURRRRRRRRRFUFFFFFFFDDDDDDDDDLLLLLLLLLBBBBBBBBB";
    let cube: FaceletCube = text.parse().unwrap();
    match TwoPhaseSolver::new().solve(&cube) {
        Err(SolveError::InvalidState(invalid)) => assert!(!invalid.flaws.is_empty()),
        other => panic!("expected InvalidState, got {other:?}"),
    }
}

#[test_log::test]
fn pre_cancelled_token_aborts_immediately() {
    let cancel = CancelToken::new();
    cancel.cancel();
    let solver = TwoPhaseSolver::new().with_cancel_token(cancel);
    match solver.solve(&scrambled("R U F")) {
        Err(SolveError::Cancelled) => {}
        other => panic!("expected Cancelled, got {other:?}"),
    }
}

#[test_log::test]
fn max_length_caps_the_search() {
    // R is solvable in one move even under the tightest bound.
    let solution = TwoPhaseSolver::new()
        .with_max_length(1)
        .solve(&scrambled("R"))
        .unwrap();
    assert_eq!(solution.move_count(), 1);
}
