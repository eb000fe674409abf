//! Daily roster generation
//!
//! The draw order below is part of the daily contract: changing which
//! parameters a kind draws, or their order, changes every later enemy.

use glam::DVec2;
use rand::SeedableRng;

use super::day::seed_from_key;
use super::enemy::{Enemy, EnemyKind};
use super::rng::{Mulberry32, UnitStream};
use crate::consts::*;

/// Upper bounds of the cumulative kind table
const STRAIGHT_BELOW: f64 = 0.28;
const ZIGZAG_BELOW: f64 = 0.52;
const EVASIVE_BELOW: f64 = 0.72;
const ACCELERATOR_BELOW: f64 = 0.88;

/// `min + r * span` draw ranges
pub const ZIGZAG_AMPLITUDE: (f64, f64) = (30.0, 40.0);
pub const ZIGZAG_FREQUENCY: (f64, f64) = (1.5, 2.5);
pub const EVADE_SPEED: (f64, f64) = (80.0, 100.0);
pub const ACCELERATION: (f64, f64) = (20.0, 40.0);
pub const ACCELERATOR_SPEED: (f64, f64) = (30.0, 30.0);
pub const SWOOP_FREQUENCY: (f64, f64) = (1.0, 2.0);
pub const SWOOP_SPEED: (f64, f64) = (40.0, 30.0);

fn draw(rng: &mut impl UnitStream, (min, span): (f64, f64)) -> f64 {
    min + rng.next_unit() * span
}

/// Generate the full roster from a stream already seeded for the day
pub fn generate_roster(rng: &mut impl UnitStream, width: f64) -> Vec<Enemy> {
    let count = (1.0 + rng.next_unit() * ROSTER_SPAN).floor() as usize;
    let band = width - 2.0 * SPAWN_MARGIN_X;

    let mut enemies = Vec::with_capacity(count);
    for i in 0..count {
        let x = SPAWN_MARGIN_X + rng.next_unit() * band;
        let y = SPAWN_TOP - i as f64 * SPAWN_STAGGER;
        let (kind, vel_y) = draw_kind(rng);
        enemies.push(Enemy::new(i as u32 + 1, DVec2::new(x, y), vel_y, kind));
    }

    log::debug!(
        "Roster: {}",
        enemies
            .iter()
            .map(|e| e.kind.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    enemies
}

/// Pick a kind from one draw, then draw its parameters in fixed order
fn draw_kind(rng: &mut impl UnitStream) -> (EnemyKind, f64) {
    let roll = rng.next_unit();
    if roll < STRAIGHT_BELOW {
        (EnemyKind::Straight, ENEMY_DRIFT)
    } else if roll < ZIGZAG_BELOW {
        let amplitude = draw(rng, ZIGZAG_AMPLITUDE);
        let frequency = draw(rng, ZIGZAG_FREQUENCY);
        (
            EnemyKind::Zigzag {
                amplitude,
                frequency,
            },
            ENEMY_DRIFT,
        )
    } else if roll < EVASIVE_BELOW {
        let evade_speed = draw(rng, EVADE_SPEED);
        (EnemyKind::Evasive { evade_speed }, ENEMY_DRIFT)
    } else if roll < ACCELERATOR_BELOW {
        let acceleration = draw(rng, ACCELERATION);
        let speed = draw(rng, ACCELERATOR_SPEED);
        (EnemyKind::Accelerator { acceleration }, speed)
    } else {
        let frequency = draw(rng, SWOOP_FREQUENCY);
        let speed = draw(rng, SWOOP_SPEED);
        (EnemyKind::Swoop { frequency }, speed)
    }
}

/// The day's random stream, seeded from the key's hash
pub fn daily_stream(day_key: &str) -> Mulberry32 {
    Mulberry32::from_seed(seed_from_key(day_key).to_le_bytes())
}

/// Roster for a day key
pub fn roster_for_day(day_key: &str, width: f64) -> Vec<Enemy> {
    generate_roster(&mut daily_stream(day_key), width)
}
