//! Simulation clock: one world tick
//!
//! Advances every collection, runs collisions, invokes the spawner on its
//! cadence and ramps difficulty. Driven by an external per-frame callback;
//! the simulation is tick-indexed, not wall-clock-indexed, and no tick ever
//! suspends: once entered it runs to completion.

use super::collision::{approach_angle_deg, in_landing_window, swept_min_dist};
use super::spawner;
use super::state::WorldState;

/// Input signals for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Jump key currently held (edge detection is the input provider's job)
    pub jump_held: bool,
    /// Restart requested by the presentation layer
    pub restart: bool,
}

/// Advance the world by one tick
///
/// Intra-tick order is load-bearing: water and scenery scroll first (no
/// player interaction), then player physics, then the ground landing pass
/// (needs the player's just-updated position), then the enemy death check
/// (needs the player's just-landed position).
pub fn tick(state: &mut WorldState, input: &TickInput) {
    if input.restart {
        log::info!("restart requested");
        state.restart();
    }

    // Terminal state short-circuits the whole body; the scheduler may keep
    // firing but nothing moves until a restart.
    if state.stopped {
        return;
    }

    state.backdrop.pan();

    update_water(state);
    update_scenery(state);
    state.player.update(input.jump_held);
    update_ground(state);
    update_enemies(state);

    // Fell through every platform
    if state.player.bottom() >= state.config.view_height {
        game_over(state);
    }

    if state
        .ticker
        .is_multiple_of(state.config.spawn_cadence(state.speed))
    {
        spawner::spawn_wave(state);
    }

    ramp_speed(state);

    state.ticker += 1;
}

/// Long-run difficulty ramp
///
/// Once the tick budget elapses, speed steps up by one - but only while the
/// player is airborne, so the snap-to-platform landing logic never runs
/// against a speed change mid-landing. The walk cadence shortens to keep the
/// stride visually in step, and if no gap is open a ground tile is backfilled
/// to cover the void the faster scroll would otherwise open.
fn ramp_speed(state: &mut WorldState) {
    if state.ticker <= state.config.ramp_budget(state.speed) || state.player.motion.vel.y == 0.0 {
        return;
    }

    state.speed = (state.speed + 1.0).min(state.config.max_speed);
    state.player.walk_frame_ticks = state.player.walk_frame_ticks.saturating_sub(1).max(1);
    state.ticker = 0;
    if state.gap_remaining == 0 {
        spawner::emit_platform(state);
    }
    log::info!("speed ramp: now {} px/tick", state.speed);
}

/// Scroll the water strip, recycling expired tiles to the tail
///
/// Water must stay a continuous seamless band, so the head tile is moved one
/// tile width past the current tail instead of being dropped.
fn update_water(state: &mut WorldState) {
    for tile in &mut state.water {
        tile.scroll(state.speed);
    }
    let tile_size = state.config.tile_size;
    let expired = state
        .water
        .front()
        .is_some_and(|t| t.motion.pos.x < -tile_size);
    if expired {
        if let Some(mut head) = state.water.pop_front() {
            let tail_x = state.water.back().map_or(0.0, |t| t.motion.pos.x);
            head.motion.pos.x = tail_x + tile_size;
            state.water.push_back(head);
        }
    }
}

/// Scroll decorations and expire them off the left edge
fn update_scenery(state: &mut WorldState) {
    for tile in &mut state.scenery {
        tile.scroll(state.speed);
    }
    let tile_size = state.config.tile_size;
    while state
        .scenery
        .front()
        .is_some_and(|t| t.motion.pos.x < -tile_size)
    {
        let _ = state.scenery.pop_front();
    }
}

/// Scroll the ground and resolve landings
///
/// The player is optimistically marked falling, then each tile gets a chance
/// to disprove it: the player may straddle zero, one or several candidate
/// tiles in a tick, and any single successful landing clears the fall.
fn update_ground(state: &mut WorldState) {
    let tile_size = state.config.tile_size;
    state.player.is_falling = true;

    for tile in &mut state.ground {
        tile.scroll(state.speed);

        let reach = state.player.height / 2.0 + tile_size / 2.0;
        if swept_min_dist(&state.player.swept(), &tile.swept()) <= reach {
            let angle = approach_angle_deg(state.player.center(), tile.center());
            if in_landing_window(angle) {
                state.player.land_on(tile.motion.pos.y);
            }
        }
    }

    while state
        .ground
        .front()
        .is_some_and(|t| t.motion.pos.x < -tile_size)
    {
        let _ = state.ground.pop_front();
    }
}

/// Scroll enemies, apply the lethal contact test and expire off-screen ones
fn update_enemies(state: &mut WorldState) {
    let tile_size = state.config.tile_size;
    let mut hit = false;

    for tile in &mut state.enemies {
        tile.scroll(state.speed);

        let reach = state.player.width - tile_size / 2.0;
        if swept_min_dist(&state.player.swept(), &tile.swept()) <= reach {
            hit = true;
        }
    }
    if hit {
        game_over(state);
    }

    while state
        .enemies
        .front()
        .is_some_and(|t| t.motion.pos.x < -tile_size)
    {
        let _ = state.enemies.pop_front();
    }
}

/// Terminal transition: a normal state, not an error
fn game_over(state: &mut WorldState) {
    if !state.stopped {
        log::info!("game over at score {}", state.score);
    }
    state.stopped = true;
}
