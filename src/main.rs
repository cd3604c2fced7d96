//! Strictly Reversi - Unified CLI
//!
//! Hot-seat play and concurrent self-play simulation on top of the match
//! directory.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use strictly_reversi::{
    Color, FullState, MatchConfig, MatchDirectory, MatchHandle, MatchWinner, Placement, Phase,
    Slot, SlotPair,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => MatchConfig::from_file(path)?,
        None => MatchConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    let directory = MatchDirectory::new(config);

    match cli.command {
        Command::Play { first, second } => run_play(directory, first, second).await,
        Command::Simulate { matches, rematches } => {
            run_simulate(directory, matches, rematches).await
        }
    }
}

/// Slot currently holding `color`.
fn slot_with(colors: &SlotPair<Color>, color: Color) -> Slot {
    if colors.a == color { Slot::A } else { Slot::B }
}

/// Parses `"row col"` or `"row,col"`.
fn parse_coord(line: &str) -> Option<(u8, u8)> {
    let mut parts = line
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((row, col))
}

fn describe_winner(state: &FullState, winner: MatchWinner) -> String {
    match winner {
        MatchWinner::Slot(slot) => {
            let name = state.names()[slot].as_deref().unwrap_or("(unnamed)");
            format!("{} wins {}-{}", name, state.scores()[slot], state.scores()[slot.other()])
        }
        MatchWinner::Tie => format!("Tie at {}-{}", state.scores().a, state.scores().b),
        MatchWinner::InProgress => "Game still in progress".to_string(),
    }
}

/// Run a hot-seat match over stdin.
#[instrument(skip(directory))]
async fn run_play(directory: MatchDirectory, first: String, second: String) -> Result<()> {
    let match_id = "local".to_string();
    let game = directory.open_match(match_id.clone(), first).await?;
    game.join(second).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let state = game.get_full_state().await?;
        println!("\n{}\n", state.board().display());

        match *state.phase() {
            Phase::Turn(color) => {
                let slot = slot_with(state.colors(), color);
                let name = state.names()[slot].as_deref().unwrap_or("(unnamed)");
                let legal: Vec<String> =
                    state.legal_moves().iter().map(|c| c.to_string()).collect();
                println!("{} ({}) to move. Legal: {}", name, color, legal.join(" "));
                println!("Enter 'row col' or 'quit':");

                let Some(line) = lines.next_line().await? else {
                    break;
                };
                let line = line.trim();
                if line.eq_ignore_ascii_case("quit") {
                    break;
                }
                let Some((row, col)) = parse_coord(line) else {
                    println!("Could not read '{}'", line);
                    continue;
                };

                match game.make_move(slot, row, col).await {
                    Ok(outcome) => match &outcome.placement {
                        Placement::NotPossible => println!("That move captures nothing."),
                        Placement::Captured(flipped) => {
                            println!("Flipped {} disk(s).", flipped.len());
                            if outcome.pass == strictly_reversi::PassStatus::Pass {
                                println!("Opponent has no move and passes.");
                            }
                        }
                    },
                    Err(e) => println!("{}", e),
                }
            }
            Phase::Finished | Phase::RematchPending(_) => {
                let winner = game.get_winner().await?;
                println!("{}", describe_winner(&state, winner));
                println!("Rematch? [y/N]");

                let Some(line) = lines.next_line().await? else {
                    break;
                };
                if !line.trim().eq_ignore_ascii_case("y") {
                    break;
                }
                game.request_rematch(Slot::A).await?;
                game.request_rematch(Slot::B).await?;
            }
            Phase::AwaitingSecondPlayer => bail!("match did not start"),
        }
    }

    directory.stop(&match_id).await?;
    Ok(())
}

/// Result of one finished game in a simulation.
#[derive(Debug, Serialize)]
struct GameSummary {
    match_id: String,
    game: usize,
    winner: MatchWinner,
    winner_name: Option<String>,
    scores: SlotPair<usize>,
    moves: usize,
}

/// Drives one match with the first legal move until `games` games are done.
#[instrument(skip(game), fields(match_id = %game.match_id()))]
async fn play_out(game: MatchHandle, games: usize) -> Result<Vec<GameSummary>> {
    let mut summaries = Vec::with_capacity(games);

    while summaries.len() < games {
        let state = game.get_full_state().await?;
        match *state.phase() {
            Phase::Turn(color) => {
                let slot = slot_with(state.colors(), color);
                let Some(coord) = state.legal_moves().first().copied() else {
                    bail!("{} to move with no legal moves", color);
                };
                let outcome = game.make_move(slot, coord.row, coord.col).await?;
                debug!(%coord, pass = ?outcome.pass, win = ?outcome.win, "Simulated move");
            }
            Phase::Finished | Phase::RematchPending(_) => {
                let winner = game.get_winner().await?;
                let winner_name = match winner {
                    MatchWinner::Slot(slot) => state.names()[slot].clone(),
                    _ => None,
                };
                summaries.push(GameSummary {
                    match_id: game.match_id().clone(),
                    game: summaries.len(),
                    winner,
                    winner_name,
                    scores: *state.scores(),
                    moves: *state.moves_played(),
                });
                if summaries.len() < games {
                    game.request_rematch(Slot::A).await?;
                    game.request_rematch(Slot::B).await?;
                }
            }
            Phase::AwaitingSecondPlayer => bail!("match did not start"),
        }
    }

    Ok(summaries)
}

/// Run `matches` concurrent self-play matches and print a JSON summary.
#[instrument(skip(directory))]
async fn run_simulate(directory: MatchDirectory, matches: usize, rematches: usize) -> Result<()> {
    info!(matches, rematches, "Starting simulation");

    let mut tasks = JoinSet::new();
    for i in 0..matches {
        let match_id = format!("sim-{}", i);
        let game = directory
            .open_match(match_id.clone(), format!("a-{}", i))
            .await?;
        game.join(format!("b-{}", i)).await?;
        tasks.spawn(play_out(game, rematches + 1));
    }

    let mut summaries = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined.context("simulation task panicked")? {
            Ok(mut games) => summaries.append(&mut games),
            Err(e) => warn!(error = %e, "Simulation failed"),
        }
    }

    for match_id in directory.list().await {
        directory.stop(&match_id).await?;
    }

    summaries.sort_by(|a, b| a.match_id.cmp(&b.match_id).then(a.game.cmp(&b.game)));
    println!("{}", serde_json::to_string_pretty(&summaries)?);
    info!(games = summaries.len(), "Simulation complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("2 3"), Some((2, 3)));
        assert_eq!(parse_coord(" 4,5 "), Some((4, 5)));
        assert_eq!(parse_coord("4"), None);
        assert_eq!(parse_coord("1 2 3"), None);
        assert_eq!(parse_coord("a b"), None);
    }
}
