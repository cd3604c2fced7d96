//! First-class invariants for a reversi match.
//!
//! Invariants are logical properties that must hold between requests.
//! The match worker checks them in debug builds and stops the match on a
//! violation rather than keep serving partially mutated state.

use super::phases::Phase;
use super::types::Slot;
use crate::session::MatchSession;
use tracing::instrument;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// The two slots always hold opposite colors.
pub struct ComplementaryColors;

impl Invariant<MatchSession> for ComplementaryColors {
    fn holds(session: &MatchSession) -> bool {
        let players = session.players();
        players.a.color().opposite() == *players.b.color()
    }

    fn description() -> &'static str {
        "Player colors must be complementary"
    }
}

/// Every accepted move adds exactly one disk to the board.
pub struct DiskCountMatchesHistory;

impl Invariant<MatchSession> for DiskCountMatchesHistory {
    fn holds(session: &MatchSession) -> bool {
        session.board().occupied() == session.baseline() + session.history().len()
    }

    fn description() -> &'static str {
        "Disk count must equal starting disks plus moves played"
    }
}

/// A turn is only ever held while both slots are occupied.
pub struct TurnRequiresBothPlayers;

impl Invariant<MatchSession> for TurnRequiresBothPlayers {
    fn holds(session: &MatchSession) -> bool {
        match session.phase() {
            Phase::Turn(_) => session.players()[Slot::B].is_joined(),
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Turn phase requires two joined players"
    }
}

/// All match invariants.
pub type MatchInvariants = (
    ComplementaryColors,
    DiskCountMatchesHistory,
    TurnRequiresBothPlayers,
);

/// Checks all match invariants.
///
/// # Errors
///
/// Returns every violated invariant.
#[instrument(skip(session), fields(match_id = %session.id()))]
pub fn check_invariants(session: &MatchSession) -> Result<(), Vec<InvariantViolation>> {
    <MatchInvariants as InvariantSet<MatchSession>>::check_all(session)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::reversi::{Color, Coord};

    #[test]
    fn test_invariants_hold_through_play() {
        let mut session = MatchSession::new("inv".to_string(), "Alice".to_string());
        assert!(check_invariants(&session).is_ok());

        session.join("Bob".to_string()).unwrap();
        session.make_move(Slot::A, Coord::new(2, 3)).unwrap();
        session.make_move(Slot::B, Coord::new(2, 2)).unwrap();
        assert!(check_invariants(&session).is_ok());
        assert_eq!(session.phase(), Phase::Turn(Color::Black));
    }

    #[test]
    fn test_rejected_move_keeps_invariants() {
        let mut session = MatchSession::new("inv".to_string(), "Alice".to_string());
        session.join("Bob".to_string()).unwrap();
        session.make_move(Slot::A, Coord::new(7, 7)).unwrap();
        assert!(check_invariants(&session).is_ok());
    }
}
