//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded mulberry32 stream only, keyed by the UTC day
//! - Stable iteration order (roster and missile creation order)
//! - Frame deltas clamped before use
//! - No rendering, input or storage dependencies

pub mod autopilot;
pub mod collision;
pub mod day;
pub mod enemy;
pub mod generate;
pub mod rng;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_input;
pub use collision::{circles_hit, missile_hits_enemy, resolve_hits};
pub use day::{day_key, day_key_at, parse_day_key, previous_day_key, seed_from_key};
pub use enemy::{Enemy, EnemyKind};
pub use generate::{daily_stream, generate_roster, roster_for_day};
pub use rng::{Mulberry32, ScriptedStream, UnitStream};
pub use state::{EntityView, Missile, MissileOwner, Player, Session, SessionPhase, Snapshot};
pub use tick::{Terminal, TickInput, clamp_dt, tick, tick_at};
