//! Terrain spawner: the difficulty-driven segment state machine
//!
//! Every invocation is exactly one of three mutually exclusive branches,
//! checked in fixed priority order: an open gap counts down, else the current
//! platform run emits a tile, else a new segment is rolled. The counters
//! guarantee the world is always one of {gap, solid run, about to decide}, so
//! the player is never shown an ambiguous or impossible configuration.
//!
//! Gap lengths and tier nudges are bounded by the current scroll speed, which
//! keeps every gap crossable as the jump arc's horizontal reach grows with
//! speed.

use rand::Rng;

use super::state::{Tile, TileKind, WorldState};
use crate::consts::{MAX_LIVE_ENEMIES, MAX_TIER};

/// One spawner invocation (runs on the clock's cadence)
///
/// Increments `score` unconditionally: score counts spawner calls survived,
/// whether or not the call emitted terrain.
pub fn spawn_wave(state: &mut WorldState) {
    state.score += 1;

    if state.gap_remaining > 0 {
        state.gap_remaining -= 1;
    } else if state.run_remaining > 0 {
        emit_platform(state);
        state.run_remaining -= 1;
        spawn_scenery(state);
        spawn_enemy(state);
    } else {
        reroll_segment(state);
    }
}

/// Emit one platform tile at the current tier, just off the right edge
///
/// Does not touch the run budget: the clock's speed-ramp backfill places a
/// tile without rolling scenery or enemies and without spending a run slot,
/// so only the regular spawn branch decrements `run_remaining`.
pub(crate) fn emit_platform(state: &mut WorldState) {
    let kind = platform_kind(state);
    let tile = state.config.tile_size;
    // Never behind the current tail: keeps the queue's scroll order intact
    // when a ramp-tick backfill lands on the same tick as a regular spawn.
    let x = state.config.entry_x(state.speed);
    let x = state.ground.back().map_or(x, |t| x.max(t.motion.pos.x));
    let y = state.config.tier_y(state.tier);
    state.ground.push_back(Tile::new(kind, x, y, tile));
}

/// Pick the tile kind for the current tier
///
/// The last tile of a low run has a 1-in-4 chance of becoming a cliff edge
/// to visually cap the drop.
fn platform_kind(state: &mut WorldState) -> TileKind {
    let mut kind = match state.tier {
        0 | 1 => {
            if state.rng.random_bool(0.5) {
                TileKind::GrassTufted
            } else {
                TileKind::GrassRocky
            }
        }
        2 => TileKind::Grass,
        3 => TileKind::Bridge,
        _ => TileKind::Crate,
    };
    if state.run_remaining == 1 && state.tier < 3 && state.rng.random_range(0..4) == 0 {
        kind = TileKind::Cliff;
    }
    kind
}

/// Roll the next segment: gap length, elevation tier and run length
///
/// The tier is nudged from the previous one by at most one step, never
/// re-rolled freely: elevation changes stay gradual so difficulty growth
/// stays bounded. Gap length tracks the current speed so the jump arc's
/// horizontal reach always covers it.
fn reroll_segment(state: &mut WorldState) {
    let speed = state.speed as u32;
    state.gap_remaining = state.rng.random_range(speed.saturating_sub(2)..=speed);
    let nudge: i32 = state.rng.random_range(-1..=1);
    state.tier = (state.tier as i32 + nudge).clamp(0, MAX_TIER as i32) as u8;
    state.run_remaining = state.rng.random_range(speed / 2..=speed * 4);
    log::debug!(
        "segment re-roll: gap={} tier={} run={}",
        state.gap_remaining,
        state.tier,
        state.run_remaining
    );
}

/// Maybe place a decoration on the platform tile just emitted
fn spawn_scenery(state: &mut WorldState) {
    // Decorations only on low terrain, once the run has warmed up
    if state.score <= 40 || state.tier >= 3 {
        return;
    }
    if state.rng.random_range(0..21) != 0 {
        return;
    }

    let tile = state.config.tile_size;
    let x = state.config.entry_x(state.speed);
    let y = state.config.tier_y(state.tier) - tile;
    if state.rng.random_bool(0.5) {
        state.scenery.push_back(Tile::new(TileKind::Plant, x, y, tile));
    } else if state.run_remaining > 2 {
        // A bush pair needs two adjacent tiles of platform left
        state.scenery.push_back(Tile::new(TileKind::BushLeft, x, y, tile));
        state
            .scenery
            .push_back(Tile::new(TileKind::BushRight, x + tile, y, tile));
    }
}

/// Maybe place an enemy on the platform tile just emitted
fn spawn_enemy(state: &mut WorldState) {
    if state.score <= 100
        || state.live_enemies() >= MAX_LIVE_ENEMIES
        || state.run_remaining <= 5
    {
        return;
    }
    if !state.rng.random_bool(0.04) {
        return;
    }
    if !enemy_spacing_ok(state) {
        return;
    }

    let kind = if state.rng.random_bool(0.5) {
        TileKind::Spikes
    } else {
        TileKind::Slime
    };
    let tile = state.config.tile_size;
    let x = state.config.entry_x(state.speed);
    let y = state.config.tier_y(state.tier) - tile;
    state.enemies.push_back(Tile::new(kind, x, y, tile));
    log::debug!("enemy spawn: {:?} at x={x}", kind);
}

/// Two-sided spacing rule against the most recent enemy: either comfortably
/// far, or still part of the same cluster. Mid-range placement reads as an
/// unfair surprise, so it is rejected.
fn enemy_spacing_ok(state: &WorldState) -> bool {
    match state.enemies.back() {
        None => true,
        Some(last) => {
            let gap = state.config.entry_x(state.speed) - last.motion.pos.x;
            gap >= state.config.enemy_spacing_far || gap <= state.config.enemy_spacing_near
        }
    }
}
