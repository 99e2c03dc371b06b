use std::sync::Arc;
use std::time::Duration;

use board::Board;
use canvas::camera::Vec3;
use canvas::input::InputState;
use canvas::scene::{drag_plane_y, ring_rest_position};

use super::*;
use crate::clock::{ManualClock, TokioClock};
use crate::test_support::MockApi;

// =============================================================================
// Helpers
// =============================================================================

const STEP: Duration = Duration::from_millis(600);

fn board(pegs: [&[Disk]; 3]) -> Board {
    Board::from_pegs([pegs[0].to_vec(), pegs[1].to_vec(), pegs[2].to_vec()])
}

fn session_with(api: &Arc<MockApi>, clock: Arc<dyn Clock>) -> Session {
    let api: Arc<dyn GameApi> = api.clone();
    Session::new(api, clock, STEP)
}

fn manual_session() -> (Arc<MockApi>, Arc<ManualClock>, Session) {
    let api = Arc::new(MockApi::new());
    let clock = Arc::new(ManualClock::new());
    let session = session_with(&api, clock.clone());
    (api, clock, session)
}

async fn started(n: &str) -> (Arc<MockApi>, Arc<ManualClock>, Session) {
    let (api, clock, session) = manual_session();
    session.start_game(n).await.unwrap();
    (api, clock, session)
}

fn project(session: &Session, world: Vec3) -> Point {
    let view = session.view();
    let core = view.lock().unwrap();
    core.camera.project(world, core.viewport_width, core.viewport_height).unwrap().0
}

// =============================================================================
// parse_disk_count
// =============================================================================

#[test]
fn disk_count_accepts_one_through_ten() {
    assert_eq!(parse_disk_count("1").unwrap(), 1);
    assert_eq!(parse_disk_count(" 10 ").unwrap(), 10);
}

#[test]
fn disk_count_rejects_garbage_and_out_of_range() {
    for input in ["", "abc", "0", "11", "-2", "3.5"] {
        assert!(
            matches!(parse_disk_count(input), Err(SessionError::InvalidDiskCount(_))),
            "{input:?} should be rejected"
        );
    }
}

// =============================================================================
// start_game
// =============================================================================

#[tokio::test]
async fn invalid_disk_count_makes_no_request() {
    let (api, _clock, session) = manual_session();
    let err = session.start_game("eleven").await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidDiskCount(_)));
    assert!(api.calls().is_empty());
    assert_eq!(session.status(), "Please enter a valid number of rings (1–10).");
    assert!(!session.is_started());
}

#[tokio::test]
async fn start_stacks_every_disk_on_first_peg() {
    for n in 1..=10 {
        let (api, _clock, session) = started(&n.to_string()).await;
        assert_eq!(session.disks(), n);
        assert_eq!(session.board(), Board::new_game(n));
        assert_eq!(session.view().lock().unwrap().scene.rings.len(), n as usize);
        assert_eq!(api.calls(), vec!["start", "state"]);
        assert_eq!(session.status(), "");
    }
}

#[tokio::test]
async fn start_failure_is_reported_and_retryable() {
    let (api, _clock, session) = manual_session();
    api.fail_next("start", SyncError::Unreachable("connection refused".into()));
    let err = session.start_game("3").await.unwrap_err();
    assert!(err.retryable());
    assert!(session.status().starts_with("could not reach game service"));
    assert!(!session.is_started());
}

// =============================================================================
// attempt_move / undo / restart
// =============================================================================

#[tokio::test]
async fn three_ring_legal_then_illegal_move() {
    let (api, _clock, session) = started("3").await;
    assert_eq!(session.board(), board([&[3, 2, 1], &[], &[]]));

    let first = session.attempt_move(0, 2).await.unwrap();
    assert!(first.is_ok());
    assert_eq!(session.board(), board([&[3, 2], &[], &[1]]));
    assert_eq!(session.status(), first.message());

    let second = session.attempt_move(0, 2).await.unwrap();
    assert!(!second.is_ok());
    assert!(second.message().starts_with("Invalid move"));
    assert_eq!(session.board(), board([&[3, 2], &[], &[1]]));

    // Re-synced after both answers.
    assert_eq!(api.calls(), vec!["start", "state", "move", "state", "move", "state"]);
}

#[tokio::test]
async fn move_before_start_is_refused_locally() {
    let (api, _clock, session) = manual_session();
    let err = session.attempt_move(0, 1).await.unwrap_err();
    assert!(matches!(err, SessionError::NotStarted));
    assert_eq!(session.status(), "You need to start a game first!");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn move_to_missing_peg_is_refused_locally() {
    let (api, _clock, session) = started("2").await;
    let err = session.attempt_move(0, 3).await.unwrap_err();
    assert!(matches!(err, SessionError::InvalidPeg(3)));
    assert_eq!(session.status(), "There is no peg 4.");
    assert_eq!(api.count("move"), 0);
}

#[tokio::test]
async fn undo_restores_previous_board() {
    let (_api, _clock, session) = started("3").await;
    session.attempt_move(0, 1).await.unwrap();
    session.undo().await.unwrap();
    assert_eq!(session.board(), board([&[3, 2, 1], &[], &[]]));
    assert_eq!(session.status(), STATUS_UNDONE);
}

#[tokio::test]
async fn undo_without_history_still_resyncs() {
    let (api, _clock, session) = started("2").await;
    session.undo().await.unwrap();
    assert_eq!(session.board(), Board::new_game(2));
    assert_eq!(api.calls(), vec!["start", "state", "undo", "state"]);
}

#[tokio::test]
async fn restart_resets_board_and_selection() {
    let (_api, _clock, session) = started("3").await;
    session.attempt_move(0, 2).await.unwrap();
    session.select_peg(1).await.unwrap();
    session.restart().await.unwrap();
    assert_eq!(session.board(), Board::new_game(3));
    assert_eq!(session.selected_peg(), None);
    assert_eq!(session.status(), STATUS_RESTARTED);
}

#[tokio::test]
async fn invalid_board_from_service_keeps_scene() {
    let (api, _clock, session) = started("3").await;
    api.serve_state(board([&[1, 3], &[2], &[]]));
    let err = session.undo().await.unwrap_err();
    assert!(matches!(err, SessionError::Scene(_)));
    assert_eq!(session.board(), Board::new_game(3));
}

// =============================================================================
// select_peg
// =============================================================================

#[tokio::test]
async fn select_then_same_peg_clears() {
    let (api, _clock, session) = started("3").await;
    assert!(session.select_peg(0).await.unwrap().is_none());
    assert_eq!(session.selected_peg(), Some(0));
    assert_eq!(session.status(), "Selected source peg 1");

    assert!(session.select_peg(0).await.unwrap().is_none());
    assert_eq!(session.selected_peg(), None);
    assert_eq!(session.status(), STATUS_SELECTION_CLEARED);
    assert_eq!(api.count("move"), 0);
}

#[tokio::test]
async fn select_then_other_peg_moves() {
    let (_api, _clock, session) = started("3").await;
    session.select_peg(0).await.unwrap();
    let outcome = session.select_peg(2).await.unwrap().unwrap();
    assert!(outcome.is_ok());
    assert_eq!(session.selected_peg(), None);
    assert_eq!(session.board(), board([&[3, 2], &[], &[1]]));
}

// =============================================================================
// auto_solve
// =============================================================================

#[tokio::test]
async fn auto_solve_two_rings_ends_solved() {
    let (api, clock, session) = started("2").await;
    session.attempt_move(0, 1).await.unwrap();

    session.auto_solve().await.unwrap();

    assert_eq!(session.board(), board([&[], &[], &[2, 1]]));
    assert_eq!(session.status(), STATUS_SOLVED);
    assert!(!session.is_locked());
    // One pause after the reset, one per solving move.
    assert_eq!(clock.sleeps(), vec![STEP; 4]);
    assert_eq!(api.game_board(), board([&[], &[], &[2, 1]]));
}

#[tokio::test]
async fn auto_solve_before_start_is_refused() {
    let (api, _clock, session) = manual_session();
    let err = session.auto_solve().await.unwrap_err();
    assert!(matches!(err, SessionError::NotStarted));
    assert_eq!(session.status(), "You need to start a game first!");
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn auto_solve_failure_still_unlocks() {
    let (api, _clock, session) = started("3").await;
    api.fail_next("solve", SyncError::Rejected { status: 409, message: "No game in progress.".into() });

    let err = session.auto_solve().await.unwrap_err();
    assert!(matches!(err, SessionError::Sync(SyncError::Rejected { status: 409, .. })));
    assert!(!session.is_locked());
    assert!(session.status().contains("No game in progress."));
}

#[tokio::test(start_paused = true)]
async fn actions_during_auto_solve_are_busy() {
    let api = Arc::new(MockApi::new());
    let session = Arc::new(session_with(&api, Arc::new(TokioClock)));
    session.start_game("3").await.unwrap();

    let solver = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.auto_solve().await })
    };
    // Let the solver take the guard and reach its first pause.
    while !session.is_locked() {
        tokio::task::yield_now().await;
    }

    assert!(matches!(session.attempt_move(0, 2).await, Err(SessionError::Busy)));
    assert!(matches!(session.restart().await, Err(SessionError::Busy)));
    assert!(matches!(session.quit(), Err(SessionError::Busy)));
    assert!(session.pointer_down(Point::new(400.0, 300.0), Button::Primary).is_empty());

    solver.await.unwrap().unwrap();
    assert_eq!(session.status(), STATUS_SOLVED);
    assert!(!session.is_locked());
    assert_eq!(api.count("move"), 0);
}

#[tokio::test(start_paused = true)]
async fn peg_selection_during_auto_solve_is_busy() {
    let api = Arc::new(MockApi::new());
    let session = Arc::new(session_with(&api, Arc::new(TokioClock)));
    session.start_game("3").await.unwrap();

    let solver = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.auto_solve().await })
    };
    while !session.is_locked() {
        tokio::task::yield_now().await;
    }

    assert!(matches!(session.select_peg(2).await, Err(SessionError::Busy)));
    assert_eq!(session.selected_peg(), None);

    solver.await.unwrap().unwrap();
    assert_eq!(session.selected_peg(), None);
    assert_eq!(session.status(), STATUS_SOLVED);

    // A click after the solve starts a fresh selection instead of moving.
    assert!(session.select_peg(0).await.unwrap().is_none());
    assert_eq!(session.selected_peg(), Some(0));
    assert_eq!(api.count("move"), 0);
}

#[tokio::test]
async fn auto_solve_clears_a_pending_selection() {
    let (api, _clock, session) = started("2").await;
    session.select_peg(1).await.unwrap();
    assert_eq!(session.selected_peg(), Some(1));

    session.auto_solve().await.unwrap();
    assert_eq!(session.selected_peg(), None);
    assert_eq!(api.count("move"), 0);
}

// =============================================================================
// quit
// =============================================================================

#[tokio::test]
async fn quit_tears_down_locally() {
    let (api, _clock, session) = started("4").await;
    session.select_peg(1).await.unwrap();
    session.quit().unwrap();
    assert!(!session.is_started());
    assert_eq!(session.selected_peg(), None);
    assert_eq!(session.status(), STATUS_QUIT);
    assert!(session.view().lock().unwrap().scene.rings.is_empty());
    assert_eq!(api.calls(), vec!["start", "state"]);
}

// =============================================================================
// Pointer flow
// =============================================================================

#[tokio::test]
async fn drag_to_other_peg_moves_through_service() {
    let (api, _clock, session) = started("3").await;
    session.set_viewport(800.0, 600.0, 1.0);

    let top = project(&session, ring_rest_position(0, 2));
    let target = project(&session, Vec3::new(40.0, drag_plane_y(3), 0.0));
    assert!(!session.pointer_down(top, Button::Primary).is_empty());
    session.pointer_move(target);
    let actions = session.pointer_up(target, Button::Primary).await.unwrap();

    assert!(actions.contains(&Action::MoveRequested { src: 0, dst: 2 }));
    assert_eq!(api.count("move"), 1);
    assert_eq!(session.board(), board([&[3, 2], &[], &[1]]));
    assert_eq!(session.view().lock().unwrap().scene.rings[2].peg, 2);
}

#[tokio::test]
async fn drop_on_source_peg_makes_no_request() {
    let (api, _clock, session) = started("3").await;
    session.set_viewport(800.0, 600.0, 1.0);
    let orig = session.view().lock().unwrap().scene.rings[2].position;

    let top = project(&session, ring_rest_position(0, 2));
    let nearby = project(&session, Vec3::new(-35.0, drag_plane_y(3), 0.0));
    session.pointer_down(top, Button::Primary);
    session.pointer_move(nearby);
    session.pointer_up(nearby, Button::Primary).await.unwrap();

    assert_eq!(api.count("move"), 0);
    assert_eq!(session.view().lock().unwrap().scene.rings[2].position, orig);
}

#[tokio::test]
async fn failed_drop_puts_ring_back() {
    let (api, _clock, session) = started("3").await;
    session.set_viewport(800.0, 600.0, 1.0);
    let orig = session.view().lock().unwrap().scene.rings[2].position;
    api.fail_next("move", SyncError::Timeout("10s".into()));

    let top = project(&session, ring_rest_position(0, 2));
    let target = project(&session, Vec3::new(40.0, drag_plane_y(3), 0.0));
    session.pointer_down(top, Button::Primary);
    session.pointer_move(target);
    let err = session.pointer_up(target, Button::Primary).await.unwrap_err();

    assert!(err.retryable());
    let view = session.view();
    let core = view.lock().unwrap();
    assert_eq!(core.scene.rings[2].position, orig);
    assert_eq!(core.input, InputState::Idle);
}

#[tokio::test]
async fn tick_projects_current_scene() {
    let (_api, _clock, session) = started("2").await;
    session.set_viewport(640.0, 480.0, 1.0);
    let frame = session.tick();
    assert_eq!(frame.width, 640.0);
    assert!(!frame.commands.is_empty());
}
