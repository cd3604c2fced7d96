//! Match orchestration: the owned state of one match and its move pipeline.
//!
//! A [`MatchSession`] is plain synchronous state. Serialization of concurrent
//! callers is the job of the worker that owns it (see [`crate::MatchWorker`]).

use crate::error::MatchError;
use crate::games::reversi::{
    Board, BoardWinner, Color, Coord, History, MatchWinner, MoveOutcome, PassStatus, Phase,
    PhaseEvent, PhaseSignal, Placement, Player, RematchStatus, Slot, SlotPair, WinStatus,
};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Opaque identifier of a match.
pub type MatchId = String;

/// Point-in-time view of a match.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct FullState {
    /// Match identifier.
    match_id: MatchId,
    /// Board contents.
    board: Board,
    /// Display names per slot. Slot B is `None` until someone joins.
    names: SlotPair<Option<String>>,
    /// Colors per slot.
    colors: SlotPair<Color>,
    /// Current phase.
    phase: Phase,
    /// Color on move, or `None` when waiting or finished.
    to_move: Option<Color>,
    /// Legal moves for the color on move.
    legal_moves: Vec<Coord>,
    /// Disk counts per slot.
    scores: SlotPair<usize>,
    /// Accepted moves since the last reset.
    moves_played: usize,
}

/// Intermediate result threaded through the move pipeline.
#[derive(Debug)]
enum Stage {
    /// The board refused the placement.
    Rejected { mover: Color },
    /// The placement went through.
    Placed {
        mover: Color,
        flipped: Vec<Coord>,
        pass: PassStatus,
        win: WinStatus,
    },
}

/// One match: board, history, both player records and the turn phase.
#[derive(Debug, Clone)]
pub struct MatchSession {
    id: MatchId,
    board: Board,
    history: History,
    players: SlotPair<Player>,
    phase: Phase,
    /// Disks on the board at the last reset.
    baseline: usize,
}

impl MatchSession {
    /// Creates a match in the standard opening with `first_name` in slot A.
    #[instrument]
    pub fn new(id: MatchId, first_name: String) -> Self {
        Self::with_board(id, first_name, Board::new())
    }

    /// Creates a match from an arbitrary position. Rematches still reset to
    /// the standard opening.
    #[instrument(skip(board))]
    pub fn with_board(id: MatchId, first_name: String, board: Board) -> Self {
        info!(match_id = %id, "Creating match");
        let baseline = board.occupied();
        Self {
            id,
            board,
            history: History::new(),
            players: SlotPair::new(
                Player::create(Slot::A, Color::Black, Some(first_name)),
                Player::create(Slot::B, Color::White, None),
            ),
            phase: Phase::AwaitingSecondPlayer,
            baseline,
        }
    }

    /// Match identifier.
    pub fn id(&self) -> &MatchId {
        &self.id
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Accepted moves since the last reset.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Both player records.
    pub fn players(&self) -> &SlotPair<Player> {
        &self.players
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn baseline(&self) -> usize {
        self.baseline
    }

    fn slot_of(&self, color: Color) -> Slot {
        if *self.players.a.color() == color {
            Slot::A
        } else {
            Slot::B
        }
    }

    /// Seats `name` in slot B and starts the game.
    ///
    /// # Errors
    ///
    /// [`MatchError::AlreadyFull`] if slot B is taken.
    #[instrument(skip(self), fields(match_id = %self.id))]
    pub fn join(&mut self, name: String) -> Result<Slot, MatchError> {
        let transition = self
            .phase
            .apply(PhaseEvent::SecondPlayerJoined)
            .inspect_err(|_| warn!(name = %name, "Join rejected, match is full"))?;

        self.players[Slot::B].set_name(name);
        self.phase = transition.phase;
        info!(phase = ?self.phase, "Second player joined");
        Ok(Slot::B)
    }

    /// Records a rematch vote from `slot`.
    ///
    /// The first vote leaves the match pending; a vote from the other slot
    /// swaps colors, resets board and history, and restarts with black to move.
    ///
    /// # Errors
    ///
    /// [`MatchError::RematchNotAvailable`] unless the game is finished.
    #[instrument(skip(self), fields(match_id = %self.id))]
    pub fn request_rematch(&mut self, slot: Slot) -> Result<RematchStatus, MatchError> {
        let transition = self
            .phase
            .apply(PhaseEvent::RematchVote(slot))
            .inspect_err(|e| warn!(error = %e, "Rematch vote rejected"))?;

        self.phase = transition.phase;
        match transition.signal {
            PhaseSignal::Rematched => {
                for (_, player) in self.players.iter_mut() {
                    player.flip_color();
                }
                self.board.reset();
                self.history.reset();
                self.baseline = self.board.occupied();
                info!(
                    slot_a = %self.players.a.color(),
                    slot_b = %self.players.b.color(),
                    "Rematch started"
                );
                Ok(RematchStatus::Rematched)
            }
            _ => {
                debug!(phase = ?self.phase, "Rematch vote recorded");
                Ok(RematchStatus::RematchPending)
            }
        }
    }

    /// Plays a disk for `slot` at `coord` and reports the composite outcome.
    ///
    /// A placement the board rejects is not an error: the reply carries
    /// [`Placement::NotPossible`] with the same mover's legal moves and
    /// nothing is mutated.
    ///
    /// # Errors
    ///
    /// Turn violations: [`MatchError::NotStarted`], [`MatchError::GameOver`]
    /// or [`MatchError::NotYourTurn`]. Nothing is mutated.
    #[instrument(skip(self), fields(match_id = %self.id))]
    pub fn make_move(&mut self, slot: Slot, coord: Coord) -> Result<MoveOutcome, MatchError> {
        let mover = *self.players[slot].color();
        self.phase
            .ensure_turn(mover)
            .inspect_err(|e| warn!(error = %e, "Move rejected"))?;

        let stage = self.place(coord, mover);
        let stage = self.record(coord, stage)?;
        let stage = self.check_pass(stage)?;
        let stage = self.check_win(stage)?;
        let outcome = self.assemble(stage);

        debug!(
            pass = ?outcome.pass,
            win = ?outcome.win,
            next = outcome.possible_moves.len(),
            "Move resolved"
        );
        Ok(outcome)
    }

    fn place(&mut self, coord: Coord, mover: Color) -> Stage {
        match self.board.apply_move(coord, mover) {
            Placement::Captured(flipped) => Stage::Placed {
                mover,
                flipped,
                pass: PassStatus::NoPass,
                win: WinStatus::NoWin,
            },
            Placement::NotPossible => {
                warn!(%coord, color = %mover, "Move not possible");
                Stage::Rejected { mover }
            }
        }
    }

    fn record(&mut self, coord: Coord, stage: Stage) -> Result<Stage, MatchError> {
        if let Stage::Placed { mover, .. } = &stage {
            self.history.append(coord, *mover);
            self.phase = self.phase.apply(PhaseEvent::Moved(*mover))?.phase;
        }
        Ok(stage)
    }

    fn check_pass(&mut self, stage: Stage) -> Result<Stage, MatchError> {
        match stage {
            Stage::Placed {
                mover,
                flipped,
                win,
                ..
            } => {
                let opponent = mover.opposite();
                let pass = if self.board.has_legal_move(opponent) {
                    PassStatus::NoPass
                } else {
                    self.phase = self.phase.apply(PhaseEvent::Passed(opponent))?.phase;
                    info!(skipped = %opponent, "No legal move, turn passes back");
                    PassStatus::Pass
                };
                Ok(Stage::Placed {
                    mover,
                    flipped,
                    pass,
                    win,
                })
            }
            rejected => Ok(rejected),
        }
    }

    fn check_win(&mut self, stage: Stage) -> Result<Stage, MatchError> {
        match stage {
            Stage::Placed {
                mover,
                flipped,
                pass: PassStatus::Pass,
                ..
            } => {
                let win = if self.board.has_legal_move(mover) {
                    WinStatus::NoWin
                } else {
                    self.phase = self.phase.apply(PhaseEvent::Exhausted)?.phase;
                    info!(
                        black = self.board.count(Color::Black),
                        white = self.board.count(Color::White),
                        "Match finished"
                    );
                    WinStatus::Win
                };
                Ok(Stage::Placed {
                    mover,
                    flipped,
                    pass: PassStatus::Pass,
                    win,
                })
            }
            other => Ok(other),
        }
    }

    fn assemble(&self, stage: Stage) -> MoveOutcome {
        match stage {
            Stage::Rejected { mover } => MoveOutcome {
                placement: Placement::NotPossible,
                pass: PassStatus::NoPass,
                win: WinStatus::NoWin,
                possible_moves: self.board.legal_moves(mover),
            },
            Stage::Placed {
                flipped, pass, win, ..
            } => MoveOutcome {
                placement: Placement::Captured(flipped),
                pass,
                win,
                possible_moves: self.current_legal_moves(),
            },
        }
    }

    fn current_legal_moves(&self) -> Vec<Coord> {
        self.phase
            .to_move()
            .map(|color| self.board.legal_moves(color))
            .unwrap_or_default()
    }

    /// Winner by disk count, expressed as a slot.
    #[instrument(skip(self), fields(match_id = %self.id))]
    pub fn winner(&self) -> MatchWinner {
        match self.board.winner() {
            BoardWinner::Color(color) => MatchWinner::Slot(self.slot_of(color)),
            BoardWinner::Tie => MatchWinner::Tie,
            BoardWinner::InProgress => MatchWinner::InProgress,
        }
    }

    /// Snapshot of everything a client needs to render the match.
    #[instrument(skip(self), fields(match_id = %self.id))]
    pub fn full_state(&self) -> FullState {
        let player_a = &self.players.a;
        let player_b = &self.players.b;
        FullState {
            match_id: self.id.clone(),
            board: self.board.clone(),
            names: SlotPair::new(player_a.name().clone(), player_b.name().clone()),
            colors: SlotPair::new(*player_a.color(), *player_b.color()),
            phase: self.phase,
            to_move: self.phase.to_move(),
            legal_moves: self.current_legal_moves(),
            scores: SlotPair::new(
                self.board.count(*player_a.color()),
                self.board.count(*player_b.color()),
            ),
            moves_played: self.history.len(),
        }
    }
}
