//! Turn state machine for a reversi match.
//!
//! [`Phase::apply`] is a pure transition function: it consumes the current
//! phase and an event, and either yields the next phase with a signal
//! describing what happened, or rejects the event without changing anything.

use super::types::{Color, Slot};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Match phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", content = "value", rename_all = "snake_case")]
pub enum Phase {
    /// Slot A is present, slot B has not joined.
    AwaitingSecondPlayer,
    /// It is this color's move.
    Turn(Color),
    /// Neither side can move.
    Finished,
    /// Finished, and this slot has asked for a rematch.
    RematchPending(Slot),
}

/// Input to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Slot B joined.
    SecondPlayerJoined,
    /// This color made a legal move.
    Moved(Color),
    /// This color has no legal move and is skipped.
    Passed(Color),
    /// No side has a legal move.
    Exhausted,
    /// This slot voted for a rematch.
    RematchVote(Slot),
}

/// What a successful transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseSignal {
    /// Both players present, black to move.
    Started,
    /// Turn handed to this color.
    Advanced(Color),
    /// The other side was skipped; this color moves again.
    Skipped(Color),
    /// The game is over.
    Finished,
    /// First rematch vote recorded for this slot.
    RematchPending(Slot),
    /// Both slots voted; the match restarts with black to move.
    Rematched,
}

/// A rejected event. The phase is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PhaseError {
    /// Both slots are already occupied.
    #[display("Match already has two players")]
    AlreadyFull,

    /// Slot B has not joined yet.
    #[display("Match has not started")]
    NotStarted,

    /// Moves are not accepted once the game is over.
    #[display("Game is already over")]
    GameOver,

    /// The event came from the side that is not on move.
    #[display("It is {}'s turn, not {}'s", expected, provided)]
    WrongColor {
        /// Color on move.
        expected: Color,
        /// Color that tried to act.
        provided: Color,
    },

    /// Rematch votes are only accepted after the game is over.
    #[display("Rematch requires a finished game")]
    NotFinished,
}

/// Successful transition: next phase plus its signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Phase after the event.
    pub phase: Phase,
    /// What happened.
    pub signal: PhaseSignal,
}

impl Transition {
    fn new(phase: Phase, signal: PhaseSignal) -> Self {
        Self { phase, signal }
    }
}

impl Phase {
    /// Color on move, if any.
    pub fn to_move(&self) -> Option<Color> {
        match self {
            Phase::Turn(color) => Some(*color),
            _ => None,
        }
    }

    /// True for [`Phase::Finished`] and [`Phase::RematchPending`].
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished | Phase::RematchPending(_))
    }

    /// Checks that `color` may act now without transitioning.
    ///
    /// # Errors
    ///
    /// [`PhaseError::NotStarted`] before slot B joins, [`PhaseError::GameOver`]
    /// after the game ends, [`PhaseError::WrongColor`] if the other side is on move.
    pub fn ensure_turn(&self, color: Color) -> Result<(), PhaseError> {
        match self {
            Phase::Turn(expected) if *expected == color => Ok(()),
            Phase::Turn(expected) => Err(PhaseError::WrongColor {
                expected: *expected,
                provided: color,
            }),
            Phase::AwaitingSecondPlayer => Err(PhaseError::NotStarted),
            Phase::Finished | Phase::RematchPending(_) => Err(PhaseError::GameOver),
        }
    }

    /// Applies `event` to this phase.
    ///
    /// # Errors
    ///
    /// Returns a [`PhaseError`] when the event is not legal in this phase.
    #[instrument]
    pub fn apply(self, event: PhaseEvent) -> Result<Transition, PhaseError> {
        let transition = match (self, event) {
            (Phase::AwaitingSecondPlayer, PhaseEvent::SecondPlayerJoined) => {
                Transition::new(Phase::Turn(Color::Black), PhaseSignal::Started)
            }
            (_, PhaseEvent::SecondPlayerJoined) => return Err(PhaseError::AlreadyFull),

            (phase, PhaseEvent::Moved(color)) => {
                phase.ensure_turn(color)?;
                let next = color.opposite();
                Transition::new(Phase::Turn(next), PhaseSignal::Advanced(next))
            }

            (phase, PhaseEvent::Passed(skipped)) => {
                phase.ensure_turn(skipped)?;
                let next = skipped.opposite();
                Transition::new(Phase::Turn(next), PhaseSignal::Skipped(next))
            }

            (Phase::Turn(_), PhaseEvent::Exhausted) => {
                Transition::new(Phase::Finished, PhaseSignal::Finished)
            }
            (Phase::AwaitingSecondPlayer, PhaseEvent::Exhausted) => {
                return Err(PhaseError::NotStarted);
            }
            (_, PhaseEvent::Exhausted) => return Err(PhaseError::GameOver),

            (Phase::Finished, PhaseEvent::RematchVote(slot)) => {
                Transition::new(Phase::RematchPending(slot), PhaseSignal::RematchPending(slot))
            }
            (Phase::RematchPending(voter), PhaseEvent::RematchVote(slot)) if voter == slot => {
                Transition::new(Phase::RematchPending(voter), PhaseSignal::RematchPending(voter))
            }
            (Phase::RematchPending(_), PhaseEvent::RematchVote(_)) => {
                Transition::new(Phase::Turn(Color::Black), PhaseSignal::Rematched)
            }
            (_, PhaseEvent::RematchVote(_)) => return Err(PhaseError::NotFinished),
        };

        debug!(
            from = ?self,
            to = ?transition.phase,
            signal = ?transition.signal,
            "Phase transition"
        );
        Ok(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_starts_black() {
        let t = Phase::AwaitingSecondPlayer
            .apply(PhaseEvent::SecondPlayerJoined)
            .unwrap();
        assert_eq!(t.phase, Phase::Turn(Color::Black));
        assert_eq!(t.signal, PhaseSignal::Started);
    }

    #[test]
    fn test_join_when_full() {
        for phase in [
            Phase::Turn(Color::White),
            Phase::Finished,
            Phase::RematchPending(Slot::A),
        ] {
            assert_eq!(
                phase.apply(PhaseEvent::SecondPlayerJoined),
                Err(PhaseError::AlreadyFull)
            );
        }
    }

    #[test]
    fn test_turn_alternation() {
        let t = Phase::Turn(Color::Black)
            .apply(PhaseEvent::Moved(Color::Black))
            .unwrap();
        assert_eq!(t.phase, Phase::Turn(Color::White));
        let t = t.phase.apply(PhaseEvent::Moved(Color::White)).unwrap();
        assert_eq!(t.phase, Phase::Turn(Color::Black));
    }

    #[test]
    fn test_move_out_of_turn() {
        assert_eq!(
            Phase::Turn(Color::Black).apply(PhaseEvent::Moved(Color::White)),
            Err(PhaseError::WrongColor {
                expected: Color::Black,
                provided: Color::White
            })
        );
        assert_eq!(
            Phase::AwaitingSecondPlayer.apply(PhaseEvent::Moved(Color::Black)),
            Err(PhaseError::NotStarted)
        );
        assert_eq!(
            Phase::Finished.apply(PhaseEvent::Moved(Color::Black)),
            Err(PhaseError::GameOver)
        );
    }

    #[test]
    fn test_pass_reverts_turn() {
        let t = Phase::Turn(Color::White)
            .apply(PhaseEvent::Passed(Color::White))
            .unwrap();
        assert_eq!(t.phase, Phase::Turn(Color::Black));
        assert_eq!(t.signal, PhaseSignal::Skipped(Color::Black));
    }

    #[test]
    fn test_exhausted_finishes() {
        let t = Phase::Turn(Color::Black).apply(PhaseEvent::Exhausted).unwrap();
        assert_eq!(t.phase, Phase::Finished);
        assert_eq!(
            Phase::Finished.apply(PhaseEvent::Exhausted),
            Err(PhaseError::GameOver)
        );
    }

    #[test]
    fn test_rematch_handshake() {
        let t = Phase::Finished.apply(PhaseEvent::RematchVote(Slot::A)).unwrap();
        assert_eq!(t.phase, Phase::RematchPending(Slot::A));

        let again = t.phase.apply(PhaseEvent::RematchVote(Slot::A)).unwrap();
        assert_eq!(again.phase, Phase::RematchPending(Slot::A));
        assert_eq!(again.signal, PhaseSignal::RematchPending(Slot::A));

        let done = again.phase.apply(PhaseEvent::RematchVote(Slot::B)).unwrap();
        assert_eq!(done.phase, Phase::Turn(Color::Black));
        assert_eq!(done.signal, PhaseSignal::Rematched);
    }

    #[test]
    fn test_rematch_before_finish() {
        assert_eq!(
            Phase::Turn(Color::Black).apply(PhaseEvent::RematchVote(Slot::A)),
            Err(PhaseError::NotFinished)
        );
        assert_eq!(
            Phase::AwaitingSecondPlayer.apply(PhaseEvent::RematchVote(Slot::B)),
            Err(PhaseError::NotFinished)
        );
    }
}
