//! Daily Blitz - a one-wave daily arcade challenge
//!
//! Core modules:
//! - `sim`: Deterministic simulation (seeded RNG, roster generation, step)
//! - `outcome`: Win/timeout resolution into the persisted record
//! - `record`: Best time / streak record and its storage contract
//! - `persistence`: Key-value storage collaborator
//! - `platform`: Clock and browser/native abstractions
//! - `config`: Playfield and time limit configuration
//! - `runner`: Frame scheduler driving a session

pub mod config;
pub mod outcome;
pub mod persistence;
pub mod platform;
pub mod record;
pub mod runner;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use outcome::{ChallengeResult, resolve};
pub use record::PlayerRecord;
pub use runner::{FrameStatus, Runner};

/// Game configuration constants
pub mod consts {
    /// Largest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f64 = 0.05;

    /// Default playfield dimensions
    pub const DEFAULT_WIDTH: f64 = 480.0;
    pub const DEFAULT_HEIGHT: f64 = 720.0;
    /// Default time to clear the wave (seconds)
    pub const DEFAULT_TIME_LIMIT: f64 = 30.0;

    /// Player ship
    pub const PLAYER_RADIUS: f64 = 16.0;
    /// Distance of the ship centre above the bottom edge
    pub const PLAYER_BOTTOM_OFFSET: f64 = 60.0;
    pub const PLAYER_SPEED: f64 = 320.0;
    /// Extra lateral margin beyond the ship radius
    pub const PLAYER_EDGE_OFFSET: f64 = 8.0;
    /// Seconds between shots
    pub const FIRE_COOLDOWN: f64 = 0.5;

    /// Missiles
    pub const MISSILE_RADIUS: f64 = 4.0;
    /// Vertical velocity (negative = up)
    pub const MISSILE_SPEED: f64 = -520.0;
    pub const MISSILE_BOUNDS_MARGIN: f64 = 20.0;

    /// Enemies
    pub const ENEMY_RADIUS: f64 = 18.0;
    /// Downward drift for straight, zigzag and evasive enemies
    pub const ENEMY_DRIFT: f64 = 60.0;
    /// Enemies below `height + margin` have escaped
    pub const ENEMY_EXIT_MARGIN: f64 = 40.0;
    /// Horizontal spawn band inset and vertical stagger
    pub const SPAWN_MARGIN_X: f64 = 40.0;
    pub const SPAWN_TOP: f64 = -40.0;
    pub const SPAWN_STAGGER: f64 = 80.0;
    /// Roster size is `1 + floor(r * ROSTER_SPAN)`
    pub const ROSTER_SPAN: f64 = 7.0;

    /// Evasive threat window
    pub const EVADE_WINDOW_X: f64 = 60.0;
    pub const EVADE_LOOKAHEAD: f64 = 220.0;

    /// Swoop horizontal amplitude, normalised to 60 frames per second
    pub const SWOOP_AMPLITUDE: f64 = 2.0;
    pub const SWOOP_FRAME_RATE: f64 = 60.0;
    /// Extra downward speed at the peak of a swoop, kept well under the
    /// slowest swoop base speed (40 px/s)
    pub const SWOOP_LURCH: f64 = 20.0;

    /// Slack added to radii when testing missile hits
    pub const HIT_FUDGE: f64 = 2.0;
}
