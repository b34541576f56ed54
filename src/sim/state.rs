//! Simulation state and core entity types
//!
//! Everything that must be persisted for restart/determinism lives here.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::SweptBox;
use super::motion::Motion;
use crate::config::{ConfigError, WorldConfig};
use crate::consts::{BACKDROP_SPEEDS, LANDING_FOOT_SINK, WALK_FRAME_TICKS};

/// Animation state, derived each tick from the vertical velocity sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPose {
    Walking,
    Jumping,
    Falling,
}

/// The player-controlled runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub motion: Motion,
    pub width: f32,
    pub height: f32,
    /// Downward acceleration while airborne
    pub gravity: f32,
    /// Upward impulse while a jump is held (negative = up)
    pub jump_velocity: f32,
    pub is_jumping: bool,
    pub is_falling: bool,
    /// Ticks remaining in which a held jump keeps re-applying its impulse
    jump_hold: u32,
    /// Hold window granted at the start of each jump
    hold_budget: u32,
    pub pose: PlayerPose,
    /// Walk-cycle cadence (ticks per frame); the speed ramp shortens it
    pub walk_frame_ticks: u32,
    spawn: Vec2,
}

impl Player {
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            motion: Motion::new(config.spawn_x, config.spawn_y),
            width: config.player_width,
            height: config.player_height,
            gravity: config.gravity,
            jump_velocity: config.jump_velocity,
            is_jumping: false,
            is_falling: false,
            jump_hold: 0,
            hold_budget: config.jump_hold_ticks,
            pose: PlayerPose::Walking,
            walk_frame_ticks: WALK_FRAME_TICKS,
            spawn: Vec2::new(config.spawn_x, config.spawn_y),
        }
    }

    /// One tick of player physics
    ///
    /// A grounded player starts a jump on `jump_held`; while the hold window
    /// lasts, the impulse is re-applied each tick so a longer press yields a
    /// higher arc. Gravity applies only while airborne, which is also what
    /// ends a held jump once the window expires.
    pub fn update(&mut self, jump_held: bool) {
        if jump_held && self.motion.vel.y == 0.0 && !self.is_jumping {
            self.is_jumping = true;
            self.motion.vel.y = self.jump_velocity;
            self.jump_hold = self.hold_budget;
        } else if jump_held && self.jump_hold > 0 {
            self.motion.vel.y = self.jump_velocity;
        }
        self.jump_hold = self.jump_hold.saturating_sub(1);

        self.motion.advance();

        if self.is_jumping || self.is_falling {
            self.motion.vel.y += self.gravity;
        }

        self.pose = if self.motion.vel.y > 0.0 {
            PlayerPose::Falling
        } else if self.motion.vel.y < 0.0 {
            PlayerPose::Jumping
        } else {
            PlayerPose::Walking
        };
    }

    /// Snap onto a platform tile whose top edge is at `tile_top`
    pub fn land_on(&mut self, tile_top: f32) {
        self.is_jumping = false;
        self.is_falling = false;
        self.motion.pos.y = tile_top - self.height + LANDING_FOOT_SINK;
        self.motion.vel.y = 0.0;
    }

    /// Reposition at spawn with all motion and jump state cleared
    ///
    /// Called at start and on restart, never on death mid-tick.
    pub fn reset(&mut self) {
        self.motion = Motion::new(self.spawn.x, self.spawn.y);
        self.is_jumping = false;
        self.is_falling = false;
        self.jump_hold = 0;
        self.pose = PlayerPose::Walking;
        self.walk_frame_ticks = WALK_FRAME_TICKS;
    }

    /// Bounding-box center
    pub fn center(&self) -> Vec2 {
        self.motion.pos + Vec2::new(self.width, self.height) / 2.0
    }

    /// Bottom edge y
    pub fn bottom(&self) -> f32 {
        self.motion.pos.y + self.height
    }

    /// Swept-collision view for this tick
    pub fn swept(&self) -> SweptBox {
        SweptBox::new(
            self.motion.pos,
            Vec2::new(self.width, self.height),
            self.motion.vel,
        )
    }
}

/// Collision semantics of a terrain sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionClass {
    /// Landable platform geometry
    Solid,
    /// Kills the player on contact
    Lethal,
    /// Pure visual scroll, no collision
    Decor,
}

/// Closed set of terrain sprite kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    /// Bridge-height grass (tier 2)
    Grass,
    /// Low grass variants (tiers 0-1, picked at random)
    GrassTufted,
    GrassRocky,
    /// Run-end cap on low platforms
    Cliff,
    /// Tier 3 platform
    Bridge,
    /// Tier 4 platform
    Crate,
    Water,
    Plant,
    BushLeft,
    BushRight,
    Spikes,
    Slime,
}

impl TileKind {
    /// Collision policy per kind
    pub fn collision_class(&self) -> CollisionClass {
        match self {
            TileKind::Grass
            | TileKind::GrassTufted
            | TileKind::GrassRocky
            | TileKind::Cliff
            | TileKind::Bridge
            | TileKind::Crate => CollisionClass::Solid,
            TileKind::Spikes | TileKind::Slime => CollisionClass::Lethal,
            TileKind::Water | TileKind::Plant | TileKind::BushLeft | TileKind::BushRight => {
                CollisionClass::Decor
            }
        }
    }

    /// Key the external asset provider maps to a drawable image
    pub fn asset_key(&self) -> &'static str {
        match self {
            TileKind::Grass => "grass",
            TileKind::GrassTufted => "grass1",
            TileKind::GrassRocky => "grass2",
            TileKind::Cliff => "cliff",
            TileKind::Bridge => "bridge",
            TileKind::Crate => "box",
            TileKind::Water => "water",
            TileKind::Plant => "plant",
            TileKind::BushLeft => "bush1",
            TileKind::BushRight => "bush2",
            TileKind::Spikes => "spikes",
            TileKind::Slime => "slime",
        }
    }
}

/// A terrain sprite: one tile-sized square with a kind tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub kind: TileKind,
    pub motion: Motion,
    /// Square edge length (the platform unit)
    pub size: f32,
}

impl Tile {
    pub fn new(kind: TileKind, x: f32, y: f32, size: f32) -> Self {
        Self {
            kind,
            motion: Motion::new(x, y),
            size,
        }
    }

    /// Bounding-box center
    pub fn center(&self) -> Vec2 {
        self.motion.pos + Vec2::splat(self.size / 2.0)
    }

    /// Scroll leftward at the global speed and advance
    pub fn scroll(&mut self, speed: f32) {
        self.motion.vel = Vec2::new(-speed, 0.0);
        self.motion.advance();
    }

    /// Swept-collision view for this tick
    pub fn swept(&self) -> SweptBox {
        SweptBox::new(self.motion.pos, Vec2::splat(self.size), self.motion.vel)
    }
}

/// Parallax backdrop pan state
///
/// Gameplay-inert; carried so the presentation layer can draw and the
/// restart transition can reset it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    /// Pan offsets, far layer to near layer
    pub offsets: [f32; 3],
    wrap: f32,
}

impl Backdrop {
    pub fn new(wrap: f32) -> Self {
        Self {
            offsets: [0.0; 3],
            wrap,
        }
    }

    /// Advance each layer by its pan rate, wrapping at the view width
    pub fn pan(&mut self) {
        for (offset, speed) in self.offsets.iter_mut().zip(BACKDROP_SPEEDS) {
            *offset -= speed;
            if *offset <= -self.wrap {
                *offset = 0.0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.offsets = [0.0; 3];
    }
}

/// Complete world state (deterministic, serializable)
///
/// The four sprite collections are FIFO queues: new sprites are appended at
/// the tail just off the right edge, expired sprites are removed from the
/// head once fully off the left edge. Head removal relies on the monotonic
/// leftward drift, so insertion order is never disturbed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldState {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Spawner RNG, reseeded from `seed` on every restart
    pub rng: Pcg32,
    pub player: Player,
    pub ground: VecDeque<Tile>,
    pub water: VecDeque<Tile>,
    pub scenery: VecDeque<Tile>,
    pub enemies: VecDeque<Tile>,
    /// Global horizontal scroll rate, read by every sprite, written only by
    /// the clock's ramp step
    pub speed: f32,
    /// Spawner invocations survived (difficulty/score proxy)
    pub score: u64,
    /// Ticks since the last speed ramp
    pub ticker: u64,
    /// Current terrain elevation tier (0..=4)
    pub tier: u8,
    /// Platform tiles left to emit at the current tier
    pub run_remaining: u32,
    /// Spawner calls left in the current gap
    pub gap_remaining: u32,
    /// Terminal flag: short-circuits every future tick once set
    pub stopped: bool,
    pub backdrop: Backdrop,
}

impl WorldState {
    /// Build a fresh world, failing fast on a malformed configuration
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let player = Player::new(&config);
        let backdrop = Backdrop::new(config.view_width);
        let mut state = Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player,
            ground: VecDeque::new(),
            water: VecDeque::new(),
            scenery: VecDeque::new(),
            enemies: VecDeque::new(),
            speed: 0.0,
            score: 0,
            ticker: 0,
            tier: 0,
            run_remaining: 0,
            gap_remaining: 0,
            stopped: false,
            backdrop,
        };
        state.restart();
        Ok(state)
    }

    /// Restart transition: back to the initial running world
    ///
    /// Clears the terminal flag, empties every collection, resets the player
    /// and all difficulty counters, reseeds the RNG and the initial
    /// ground/water strips. Invoked at construction and on user restart.
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.player.reset();
        self.ground.clear();
        self.water.clear();
        self.scenery.clear();
        self.enemies.clear();
        self.speed = self.config.start_speed;
        self.score = 0;
        self.ticker = 0;
        self.tier = 2;
        self.run_remaining = 15;
        self.gap_remaining = 0;
        self.stopped = false;
        self.backdrop.reset();
        self.seed_strips();
    }

    /// Seed the opening grass platform and the continuous water strip
    fn seed_strips(&mut self) {
        let tile = self.config.tile_size;
        let grass_y = self.config.tier_y(self.tier);
        let water_y = self.config.platform_base;
        for i in 0..self.config.strip_len() {
            let x = i as f32 * tile;
            self.ground.push_back(Tile::new(TileKind::Grass, x, grass_y, tile));
            self.water.push_back(Tile::new(TileKind::Water, x, water_y, tile));
        }
    }

    /// Count of live enemies (spawner cap input)
    pub fn live_enemies(&self) -> usize {
        self.enemies.len()
    }

    /// Assemble the per-tick drawing handoff
    pub fn snapshot(&self) -> FrameSnapshot {
        let mut sprites = Vec::with_capacity(
            self.water.len() + self.scenery.len() + self.ground.len() + self.enemies.len(),
        );
        // Back-to-front draw order: water behind scenery behind ground
        for tile in self
            .water
            .iter()
            .chain(&self.scenery)
            .chain(&self.ground)
            .chain(&self.enemies)
        {
            sprites.push(SpriteInstance {
                asset: tile.kind.asset_key(),
                x: tile.motion.pos.x,
                y: tile.motion.pos.y,
            });
        }
        FrameSnapshot {
            player: PlayerView {
                x: self.player.motion.pos.x,
                y: self.player.motion.pos.y,
                pose: self.player.pose,
                walk_frame_ticks: self.player.walk_frame_ticks,
            },
            sprites,
            backdrop_offsets: self.backdrop.offsets,
            score: self.score,
            game_over: self.stopped,
        }
    }
}

/// One drawable sprite: asset key plus top-left position
#[derive(Debug, Clone, Serialize)]
pub struct SpriteInstance {
    pub asset: &'static str,
    pub x: f32,
    pub y: f32,
}

/// Player drawing state
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub x: f32,
    pub y: f32,
    pub pose: PlayerPose,
    pub walk_frame_ticks: u32,
}

/// Everything the presentation layer needs to draw one tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub player: PlayerView,
    pub sprites: Vec<SpriteInstance>,
    pub backdrop_offsets: [f32; 3],
    pub score: u64,
    pub game_over: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> Player {
        Player::new(&WorldConfig::default())
    }

    #[test]
    fn test_jump_starts_only_when_grounded() {
        let mut player = grounded_player();
        player.update(true);
        assert!(player.is_jumping);
        assert_eq!(player.pose, PlayerPose::Jumping);
        // Releasing mid-air lets gravity claw the ascent back
        let vel_after_first = player.motion.vel.y;
        player.update(false);
        assert!(player.motion.vel.y > vel_after_first);
    }

    #[test]
    fn test_held_jump_sustains_ascent() {
        let mut held = grounded_player();
        let mut tapped = grounded_player();
        for tick in 0..14 {
            held.update(true);
            tapped.update(tick == 0);
        }
        // Variable-height mechanic: a held jump climbs strictly higher
        assert!(held.motion.pos.y < tapped.motion.pos.y);
    }

    #[test]
    fn test_gravity_only_while_airborne() {
        let mut player = grounded_player();
        player.update(false);
        assert_eq!(player.motion.vel.y, 0.0);
        assert_eq!(player.pose, PlayerPose::Walking);

        player.is_falling = true;
        player.update(false);
        assert_eq!(player.motion.vel.y, player.gravity);
        assert_eq!(player.pose, PlayerPose::Falling);
    }

    #[test]
    fn test_land_on_snaps_and_clears_flags() {
        let mut player = grounded_player();
        player.update(true);
        player.is_falling = true;
        player.land_on(320.0);
        assert!(!player.is_jumping);
        assert!(!player.is_falling);
        assert_eq!(player.motion.vel.y, 0.0);
        assert_eq!(player.motion.pos.y, 320.0 - player.height + LANDING_FOOT_SINK);
    }

    #[test]
    fn test_tile_kind_collision_classes() {
        assert_eq!(TileKind::Grass.collision_class(), CollisionClass::Solid);
        assert_eq!(TileKind::Bridge.collision_class(), CollisionClass::Solid);
        assert_eq!(TileKind::Spikes.collision_class(), CollisionClass::Lethal);
        assert_eq!(TileKind::Slime.collision_class(), CollisionClass::Lethal);
        assert_eq!(TileKind::Water.collision_class(), CollisionClass::Decor);
        assert_eq!(TileKind::Plant.collision_class(), CollisionClass::Decor);
    }

    #[test]
    fn test_asset_keys_match_manifest() {
        assert_eq!(TileKind::GrassTufted.asset_key(), "grass1");
        assert_eq!(TileKind::Crate.asset_key(), "box");
        assert_eq!(TileKind::BushRight.asset_key(), "bush2");
    }

    #[test]
    fn test_new_world_seeds_strips() {
        let state = WorldState::new(WorldConfig::default(), 7).expect("valid config");
        let expected = state.config.strip_len();
        assert_eq!(state.ground.len(), expected);
        assert_eq!(state.water.len(), expected);
        assert!(state.scenery.is_empty());
        assert!(state.enemies.is_empty());
        // Opening strip sits at tier 2
        assert_eq!(state.tier, 2);
        let grass_y = state.config.tier_y(2);
        assert!(state.ground.iter().all(|t| t.motion.pos.y == grass_y));
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let config = WorldConfig {
            tile_size: -4.0,
            ..Default::default()
        };
        assert!(WorldState::new(config, 0).is_err());
    }

    #[test]
    fn test_snapshot_carries_all_sprites() {
        let state = WorldState::new(WorldConfig::default(), 7).expect("valid config");
        let snap = state.snapshot();
        assert_eq!(snap.sprites.len(), state.ground.len() + state.water.len());
        assert!(!snap.game_over);
        assert_eq!(snap.score, 0);
    }
}
