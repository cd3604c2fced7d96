//! Tests for the move pipeline and rematch handshake on a single match.

use strictly_reversi::{
    Board, Color, Coord, MatchError, MatchSession, MatchWinner, PassStatus, Phase, Placement,
    RematchStatus, Slot, WinStatus,
};

fn started(board: Board) -> MatchSession {
    let mut session = MatchSession::with_board("test".to_string(), "Alice".to_string(), board);
    session.join("Bob".to_string()).expect("second player joins");
    session
}

/// Black to move at (0, 2); afterwards white is stuck but black can still play (7, 3).
fn forced_pass_board() -> Board {
    Board::from_rows(&[
        "BW......",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "BWW.....",
    ])
    .expect("valid board")
}

/// Black to move at (0, 2); afterwards nobody can move.
fn exhausted_board() -> Board {
    Board::from_rows(&[
        "BW......",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
        "........",
    ])
    .expect("valid board")
}

fn finished_session() -> MatchSession {
    let mut session = started(exhausted_board());
    let outcome = session.make_move(Slot::A, Coord::new(0, 2)).unwrap();
    assert_eq!(outcome.win, WinStatus::Win);
    session
}

#[test]
fn test_standard_opening() {
    let mut session = started(Board::new());

    let outcome = session.make_move(Slot::A, Coord::new(2, 3)).unwrap();

    assert_eq!(outcome.captured(), Some(&[Coord::new(3, 3)][..]));
    assert_eq!(outcome.pass, PassStatus::NoPass);
    assert_eq!(outcome.win, WinStatus::NoWin);
    assert_eq!(
        outcome.possible_moves,
        vec![Coord::new(2, 2), Coord::new(2, 4), Coord::new(4, 2)]
    );
    assert_eq!(session.phase(), Phase::Turn(Color::White));
    assert_eq!(session.history().len(), 1);
}

#[test]
fn test_turn_alternation() {
    let mut session = started(Board::new());
    session.make_move(Slot::A, Coord::new(2, 3)).unwrap();
    assert_eq!(session.phase(), Phase::Turn(Color::White));
    session.make_move(Slot::B, Coord::new(2, 2)).unwrap();
    assert_eq!(session.phase(), Phase::Turn(Color::Black));
}

#[test]
fn test_not_possible_is_a_no_op() {
    let mut session = started(Board::new());
    session.make_move(Slot::A, Coord::new(2, 3)).unwrap();

    let board = session.board().clone();
    let history = session.history().clone();
    let phase = session.phase();

    for coord in [Coord::new(0, 0), Coord::new(3, 3), Coord::new(8, 8)] {
        let outcome = session.make_move(Slot::B, coord).unwrap();
        assert_eq!(outcome.placement, Placement::NotPossible);
        assert_eq!(outcome.pass, PassStatus::NoPass);
        assert_eq!(outcome.win, WinStatus::NoWin);
        assert_eq!(outcome.possible_moves, board.legal_moves(Color::White));
    }

    assert_eq!(session.board(), &board);
    assert_eq!(session.history(), &history);
    assert_eq!(session.phase(), phase);
}

#[test]
fn test_mover_gains_at_least_two_disks() {
    let mut session = started(Board::new());

    for _ in 0..20 {
        let Phase::Turn(color) = session.phase() else {
            break;
        };
        let slot = if *session.players().a.color() == color {
            Slot::A
        } else {
            Slot::B
        };
        let coord = session.board().legal_moves(color)[0];
        let mover_before = session.board().count(color);
        let total_before = session.board().occupied();

        session.make_move(slot, coord).unwrap();

        assert!(session.board().count(color) >= mover_before + 2);
        assert_eq!(session.board().occupied(), total_before + 1);
    }
}

#[test]
fn test_forced_pass() {
    let mut session = started(forced_pass_board());

    let outcome = session.make_move(Slot::A, Coord::new(0, 2)).unwrap();

    assert_eq!(outcome.captured(), Some(&[Coord::new(0, 1)][..]));
    assert_eq!(outcome.pass, PassStatus::Pass);
    assert_eq!(outcome.win, WinStatus::NoWin);
    assert_eq!(outcome.possible_moves, vec![Coord::new(7, 3)]);
    assert_eq!(session.phase(), Phase::Turn(Color::Black));
    assert_eq!(session.winner(), MatchWinner::InProgress);
}

#[test]
fn test_double_no_move_finish() {
    let mut session = started(exhausted_board());

    let outcome = session.make_move(Slot::A, Coord::new(0, 2)).unwrap();

    assert_eq!(outcome.pass, PassStatus::Pass);
    assert_eq!(outcome.win, WinStatus::Win);
    assert!(outcome.possible_moves.is_empty());
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.winner(), MatchWinner::Slot(Slot::A));

    assert_eq!(
        session.make_move(Slot::B, Coord::new(1, 1)),
        Err(MatchError::GameOver)
    );
    let state = session.full_state();
    assert_eq!(*state.to_move(), None);
    assert!(state.legal_moves().is_empty());
}

#[test]
fn test_rematch_convergence() {
    let mut session = finished_session();
    let colors_before = (*session.players().a.color(), *session.players().b.color());

    assert_eq!(
        session.request_rematch(Slot::A),
        Ok(RematchStatus::RematchPending)
    );
    assert_eq!(session.phase(), Phase::RematchPending(Slot::A));

    assert_eq!(
        session.request_rematch(Slot::A),
        Ok(RematchStatus::RematchPending)
    );
    assert_eq!(session.phase(), Phase::RematchPending(Slot::A));

    assert_eq!(session.request_rematch(Slot::B), Ok(RematchStatus::Rematched));
    assert_eq!(session.phase(), Phase::Turn(Color::Black));
    assert_eq!(session.board(), &Board::new());
    assert!(session.history().is_empty());
    assert_eq!(*session.players().a.color(), colors_before.1);
    assert_eq!(*session.players().b.color(), colors_before.0);
}

#[test]
fn test_moves_rejected_while_rematch_pending() {
    let mut session = finished_session();
    session.request_rematch(Slot::A).unwrap();
    let board = session.board().clone();

    for slot in [Slot::A, Slot::B] {
        assert_eq!(
            session.make_move(slot, Coord::new(2, 3)),
            Err(MatchError::GameOver)
        );
    }
    assert_eq!(session.phase(), Phase::RematchPending(Slot::A));
    assert_eq!(session.board(), &board);
}

#[test]
fn test_rematch_swaps_who_moves_first() {
    let mut session = finished_session();
    session.request_rematch(Slot::B).unwrap();
    session.request_rematch(Slot::A).unwrap();

    assert_eq!(
        session.make_move(Slot::A, Coord::new(2, 3)),
        Err(MatchError::NotYourTurn {
            expected: Color::Black,
            provided: Color::White
        })
    );
    let outcome = session.make_move(Slot::B, Coord::new(2, 3)).unwrap();
    assert!(outcome.captured().is_some());
    assert_eq!(session.phase(), Phase::Turn(Color::White));

    // Rematch completion must not re-run the join capacity check.
    assert_eq!(
        session.join("Carol".to_string()),
        Err(MatchError::AlreadyFull)
    );
}

#[test]
fn test_winner_reported_in_slots_after_rematch() {
    let mut session = finished_session();
    session.request_rematch(Slot::A).unwrap();
    session.request_rematch(Slot::B).unwrap();
    assert_eq!(session.winner(), MatchWinner::InProgress);

    let state = session.full_state();
    assert_eq!(state.colors().a, Color::White);
    assert_eq!(state.colors().b, Color::Black);
    assert_eq!(state.legal_moves().len(), 4);
}
