//! Headless demo driver
//!
//! Runs a full autopiloted session on the default maze at the fixed timestep
//! and logs the event stream. Pass a seed as the first argument to replay a
//! specific session; the same seed always produces the same transcript.

use std::process::ExitCode;

use maze_chase::consts::SIM_DT;
use maze_chase::sim::{DEFAULT_MAZE, GameEvent, GamePhase, GameState, TickInput};

const DEFAULT_SEED: u64 = 0xC0FFEE;

// 10 simulated minutes; autopilot sessions that survive this long are
// abandoned as a draw.
const MAX_TICKS: u64 = 10 * 60 * 60;

fn main() -> ExitCode {
    env_logger::init();

    let seed = match std::env::args().nth(1) {
        Some(arg) => match arg.parse::<u64>() {
            Ok(seed) => seed,
            Err(_) => {
                log::error!("invalid seed {arg:?}: expected an unsigned integer");
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_SEED,
    };

    let mut state = match GameState::new(DEFAULT_MAZE, seed) {
        Ok(state) => state,
        Err(err) => {
            log::error!("bad maze template: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!(
        "seed {seed}: {}x{} maze, {} pellets",
        state.maze.width(),
        state.maze.height(),
        state.maze.total_pellets()
    );

    let input = TickInput {
        autopilot: true,
        ..TickInput::default()
    };

    while state.time_ticks < MAX_TICKS {
        maze_chase::sim::tick(&mut state, &input, SIM_DT);
        for event in &state.events {
            log_event(&state, event);
        }
        if matches!(state.phase, GamePhase::GameOver | GamePhase::Won) {
            break;
        }
    }

    let outcome = match state.phase {
        GamePhase::Won => "won",
        GamePhase::GameOver => "lost",
        _ => "timed out",
    };
    println!(
        "{outcome} after {:.1}s: score {}, {}/{} pellets, {} lives left",
        state.time_ticks as f64 * SIM_DT as f64,
        state.score,
        state.pellets_eaten,
        state.maze.total_pellets(),
        state.lives
    );
    ExitCode::SUCCESS
}

fn log_event(state: &GameState, event: &GameEvent) {
    match event {
        GameEvent::PelletEaten { pos } => log::debug!("pellet eaten at {pos}"),
        GameEvent::PickupSpawned { pos } => log::info!("pickup spawned at {pos}"),
        GameEvent::PickupCollected { pos } => log::info!("pickup collected at {pos}"),
        GameEvent::ProjectileFired { pos } => log::debug!("projectile fired at {pos}"),
        GameEvent::GhostDefeated { color } => log::info!("ghost defeated: {color:?}"),
        GameEvent::LifeLost { remaining } => log::info!("life lost, {remaining} remaining"),
        GameEvent::GameOver => log::info!("game over with score {}", state.score),
        GameEvent::Won => log::info!("maze cleared with score {}", state.score),
    }
}
