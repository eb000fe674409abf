//! Session state and core entity types
//!
//! A `Session` is one attempt at one day's challenge. Nothing here is
//! global: tests can run any number of sessions side by side.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::day::seed_from_key;
use super::enemy::Enemy;
use super::generate::{daily_stream, generate_roster};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of an attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Simulation advancing
    Running,
    /// Every enemy destroyed or escaped before the limit
    Won,
    /// Time limit reached with enemies left
    TimedOut,
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: DVec2,
    pub radius: f64,
    /// Seconds until the next shot is allowed
    pub cooldown: f64,
}

impl Player {
    /// Ship centred horizontally near the bottom of the playfield
    pub fn spawn(width: f64, height: f64) -> Self {
        Self {
            pos: DVec2::new(width / 2.0, height - PLAYER_BOTTOM_OFFSET),
            radius: PLAYER_RADIUS,
            cooldown: 0.0,
        }
    }

    /// Horizontal margin kept between the ship centre and each edge
    pub fn edge_margin(&self) -> f64 {
        self.radius + PLAYER_EDGE_OFFSET
    }

    /// Move by `direction` (-1, 0, +1) at lateral speed, clamped to the field
    pub fn steer(&mut self, direction: f64, dt: f64, width: f64) {
        let margin = self.edge_margin();
        self.pos.x += direction * PLAYER_SPEED * dt;
        self.pos.x = self.pos.x.clamp(margin, (width - margin).max(margin));
    }

    /// Where missiles leave the ship
    pub fn nose(&self) -> DVec2 {
        DVec2::new(self.pos.x, self.pos.y - self.radius)
    }
}

/// Who fired a missile
///
/// Enemies never shoot, so every missile in a session belongs to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissileOwner {
    Player,
}

/// A missile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Missile {
    pub id: u32,
    pub pos: DVec2,
    pub vel_y: f64,
    pub radius: f64,
    pub owner: MissileOwner,
}

impl Missile {
    pub fn new(id: u32, pos: DVec2, owner: MissileOwner) -> Self {
        Self {
            id,
            pos,
            vel_y: MISSILE_SPEED,
            radius: MISSILE_RADIUS,
            owner,
        }
    }

    /// True once the missile has left `[-margin, height + margin]`
    pub fn out_of_bounds(&self, height: f64) -> bool {
        self.pos.y < -MISSILE_BOUNDS_MARGIN || self.pos.y > height + MISSILE_BOUNDS_MARGIN
    }
}

/// One attempt at a daily challenge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Day key the roster was generated from
    pub day_key: String,
    pub width: f64,
    pub height: f64,
    pub time_limit: f64,
    /// Seconds since the attempt started, as reported by the driver
    pub elapsed: f64,
    pub phase: SessionPhase,
    pub player: Player,
    /// Missiles in creation order
    pub missiles: Vec<Missile>,
    /// Remaining roster in creation order
    pub enemies: Vec<Enemy>,
    /// Enemies destroyed by missiles
    pub kills: u32,
    /// Enemies that dropped off the bottom
    pub escapes: u32,
    /// Set once the outcome has been written to the record
    #[serde(default)]
    pub(crate) resolved: bool,
    next_id: u32,
}

impl Session {
    /// Start the challenge for `day_key`
    pub fn new(config: &GameConfig, day_key: &str) -> Self {
        let seed = seed_from_key(day_key);
        let mut rng = daily_stream(day_key);
        let enemies = generate_roster(&mut rng, config.width);
        log::info!(
            "Challenge {} (seed {}): {} enemies, {}s limit",
            day_key,
            seed,
            enemies.len(),
            config.time_limit_secs
        );
        Self::with_roster(config, day_key, enemies)
    }

    /// Start a session over an explicit roster
    pub fn with_roster(config: &GameConfig, day_key: &str, enemies: Vec<Enemy>) -> Self {
        let next_id = enemies.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            day_key: day_key.to_string(),
            width: config.width,
            height: config.height,
            time_limit: config.time_limit_secs,
            elapsed: 0.0,
            phase: SessionPhase::Running,
            player: Player::spawn(config.width, config.height),
            missiles: Vec::new(),
            enemies,
            kills: 0,
            escapes: 0,
            resolved: false,
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == SessionPhase::Running
    }

    pub fn is_solved(&self) -> bool {
        self.phase == SessionPhase::Won
    }

    /// Whether the outcome has already been applied to a record
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Seconds left on the clock, never negative
    pub fn remaining(&self) -> f64 {
        (self.time_limit - self.elapsed).max(0.0)
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            day_key: self.day_key.clone(),
            phase: self.phase,
            player: EntityView {
                x: self.player.pos.x,
                y: self.player.pos.y,
                radius: self.player.radius,
                kind: "player",
            },
            missiles: self
                .missiles
                .iter()
                .map(|m| EntityView {
                    x: m.pos.x,
                    y: m.pos.y,
                    radius: m.radius,
                    kind: "missile",
                })
                .collect(),
            enemies: self
                .enemies
                .iter()
                .map(|e| EntityView {
                    x: e.pos.x,
                    y: e.pos.y,
                    radius: e.radius,
                    kind: e.kind.name(),
                })
                .collect(),
            remaining: self.remaining(),
            enemy_count: self.enemies.len(),
        }
    }
}

/// Position and size of one drawable entity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub kind: &'static str,
}

/// Everything the renderer and HUD need for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub day_key: String,
    pub phase: SessionPhase,
    pub player: EntityView,
    pub missiles: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
    /// Seconds left
    pub remaining: f64,
    pub enemy_count: usize,
}
