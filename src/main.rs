//! Gully Runner headless demo
//!
//! Drives the simulation core without any renderer: a naive autopilot holds
//! the jump signal whenever no platform lies just ahead, and the final frame
//! snapshot is printed as JSON. Useful for eyeballing spawner output and for
//! soak-testing determinism (`gully-runner <seed> [max-ticks]`).

use std::env;
use std::process::ExitCode;

use gully_runner::WorldConfig;
use gully_runner::sim::{TickInput, WorldState, tick};

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    let max_ticks: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(36_000);

    let mut state = match WorldState::new(WorldConfig::default(), seed) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("invalid world config: {err}");
            return ExitCode::FAILURE;
        }
    };

    log::info!("running seed {seed} for up to {max_ticks} ticks");

    let mut hold = 0u32;
    for t in 0..max_ticks {
        if hold == 0 && wants_jump(&state) {
            // Hold long enough to use the full variable-height window
            hold = 14;
        }
        let input = TickInput {
            jump_held: hold > 0,
            restart: false,
        };
        hold = hold.saturating_sub(1);

        tick(&mut state, &input);
        if state.stopped {
            log::info!("game over at tick {t}, score {}", state.score);
            break;
        }
    }

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
    ExitCode::SUCCESS
}

/// Jump when no landable tile sits within a few tiles ahead of the player's
/// feet while grounded
fn wants_jump(state: &WorldState) -> bool {
    if state.player.motion.vel.y != 0.0 {
        return false;
    }
    let look_ahead = state.config.tile_size * 4.0;
    let foot = state.player.bottom();
    let ahead = state.ground.iter().any(|tile| {
        let x = tile.motion.pos.x;
        x > state.player.motion.pos.x
            && x < state.player.motion.pos.x + look_ahead
            && tile.motion.pos.y >= foot - state.config.tile_size
    });
    !ahead
}
