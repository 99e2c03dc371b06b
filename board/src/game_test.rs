use super::*;

fn started(rings: Disk) -> Game {
    let mut game = Game::new();
    game.start(rings).unwrap();
    game
}

// =============================================================
// start
// =============================================================

#[test]
fn new_game_is_not_started() {
    let game = Game::new();
    assert!(!game.is_started());
    assert_eq!(game.rings(), 0);
    assert_eq!(game.board(), &Board::empty());
}

#[test]
fn start_rejects_out_of_range_counts() {
    let mut game = Game::new();
    assert_eq!(game.start(0), Err(GameError::InvalidRingCount { rings: 0, max: 10 }));
    assert_eq!(game.start(11), Err(GameError::InvalidRingCount { rings: 11, max: 10 }));
    assert!(!game.is_started());
}

#[test]
fn start_respects_custom_maximum() {
    let mut game = Game::with_max_rings(4);
    assert!(game.start(4).is_ok());
    assert!(game.start(5).is_err());
    assert_eq!(game.rings(), 4);
}

#[test]
fn restart_clears_history() {
    let mut game = started(3);
    assert!(game.try_move(0, 2).is_ok());
    game.start(3).unwrap();
    assert_eq!(game.moves(), 0);
    assert_eq!(game.board(), &Board::new_game(3));
}

// =============================================================
// try_move
// =============================================================

#[test]
fn legal_then_illegal_move_scenario() {
    let mut game = started(3);
    assert_eq!(serde_json::to_string(game.board()).unwrap(), "[[3,2,1],[],[]]");

    let first = game.try_move(0, 2);
    assert!(first.is_ok());
    assert_eq!(first.message(), "Moved disk 1 from peg 1 to peg 3.");
    assert_eq!(serde_json::to_string(game.board()).unwrap(), "[[3,2],[],[1]]");

    let second = game.try_move(0, 2);
    assert!(!second.is_ok());
    assert!(second.message().starts_with("Invalid move"));
    assert_eq!(serde_json::to_string(game.board()).unwrap(), "[[3,2],[],[1]]");
    assert_eq!(game.moves(), 1);
}

#[test]
fn move_without_game_is_rejected() {
    let mut game = Game::new();
    let outcome = game.try_move(0, 1);
    assert_eq!(outcome, MoveOutcome::rejected("No game in progress."));
}

#[test]
fn final_move_reports_solved() {
    let mut game = started(1);
    let outcome = game.try_move(0, 2);
    assert!(outcome.message().ends_with("Puzzle solved!"));
}

// =============================================================
// undo
// =============================================================

#[test]
fn undo_restores_previous_snapshot_exactly() {
    let mut game = started(3);
    game.try_move(0, 1);
    let snapshot = game.board().clone();
    game.try_move(0, 2);
    assert!(game.undo());
    assert_eq!(game.board(), &snapshot);
    assert!(game.undo());
    assert_eq!(game.board(), &Board::new_game(3));
}

#[test]
fn undo_with_empty_history_is_noop() {
    let mut game = started(2);
    assert!(!game.undo());
    assert_eq!(game.board(), &Board::new_game(2));
}

#[test]
fn rejected_moves_are_not_recorded() {
    let mut game = started(2);
    game.try_move(1, 0);
    assert_eq!(game.moves(), 0);
    assert!(!game.undo());
}

// =============================================================
// solve
// =============================================================

#[test]
fn solve_requires_started_game() {
    assert_eq!(Game::new().solve(), Err(GameError::NotStarted));
}

#[test]
fn solve_two_rings_takes_three_steps() {
    let mut game = started(2);
    let steps = game.solve().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(serde_json::to_string(&steps[0]).unwrap(), "[[2],[1],[]]");
    assert_eq!(serde_json::to_string(&steps[2]).unwrap(), "[[],[],[2,1]]");
    assert!(game.board().is_solved());
    assert_eq!(game.moves(), 0);
}

#[test]
fn solve_resets_before_solving() {
    let mut game = started(3);
    game.try_move(0, 1);
    let steps = game.solve().unwrap();
    assert_eq!(steps.len(), 7);
    assert_eq!(steps[0], Board::from_pegs([vec![3, 2], vec![], vec![1]]));
}

#[test]
fn every_solution_step_is_valid_and_ends_solved() {
    for rings in 1..=10 {
        let mut game = started(rings);
        let steps = game.solve().unwrap();
        assert_eq!(steps.len(), solution_length(rings));
        for step in &steps {
            assert!(step.validate_for(rings).is_ok());
        }
        assert!(steps.last().is_some_and(Board::is_solved));
    }
}

#[test]
fn solution_length_is_two_to_the_n_minus_one() {
    assert_eq!(solution_length(0), 0);
    assert_eq!(solution_length(1), 1);
    assert_eq!(solution_length(3), 7);
    assert_eq!(solution_length(10), 1023);
    assert_eq!(solution_moves(3).len(), 7);
}
