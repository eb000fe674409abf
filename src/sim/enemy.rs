//! Enemy entities and their motion rules
//!
//! Each kind carries its own tuning payload; `Enemy::advance` dispatches on
//! the variant so adding a kind forces a motion rule to be written.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::Missile;
use crate::consts::*;

/// Enemy behaviour with its generated parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnemyKind {
    /// Constant downward drift
    Straight,
    /// Sine weave across the drift line
    Zigzag { amplitude: f64, frequency: f64 },
    /// Sidesteps player missiles that are lined up below it
    Evasive { evade_speed: f64 },
    /// Falls faster every second, without limit
    Accelerator { acceleration: f64 },
    /// Wide horizontal swings with a downward lurch at each peak
    Swoop { frequency: f64 },
}

impl EnemyKind {
    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Straight => "straight",
            EnemyKind::Zigzag { .. } => "zigzag",
            EnemyKind::Evasive { .. } => "evasive",
            EnemyKind::Accelerator { .. } => "accelerator",
            EnemyKind::Swoop { .. } => "swoop",
        }
    }
}

/// An enemy ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
    /// Always 1: the first hit is lethal
    pub hp: u8,
    /// Oscillator phase for zigzag and swoop
    pub phase: f64,
    /// Current vertical velocity (positive = down)
    pub vel_y: f64,
    pub kind: EnemyKind,
}

impl Enemy {
    pub fn new(id: u32, pos: DVec2, vel_y: f64, kind: EnemyKind) -> Self {
        Self {
            id,
            pos,
            radius: ENEMY_RADIUS,
            hp: 1,
            phase: 0.0,
            vel_y,
            kind,
        }
    }

    /// Advance one step, then clamp into `[radius, width - radius]`
    pub fn advance(&mut self, dt: f64, missiles: &[Missile], width: f64) {
        match self.kind {
            EnemyKind::Straight => {
                self.pos.y += self.vel_y * dt;
            }
            EnemyKind::Zigzag {
                amplitude,
                frequency,
            } => {
                self.phase += dt * frequency;
                self.pos.x += self.phase.sin() * amplitude * dt;
                self.pos.y += self.vel_y * dt;
            }
            EnemyKind::Evasive { evade_speed } => {
                let dodge = self.dodge_direction(missiles);
                self.pos.x += dodge * evade_speed * dt;
                self.pos.y += self.vel_y * dt;
            }
            EnemyKind::Accelerator { acceleration } => {
                self.vel_y += acceleration * dt;
                self.pos.y += self.vel_y * dt;
            }
            EnemyKind::Swoop { frequency } => {
                self.phase += dt * frequency;
                let swing = self.phase.sin();
                self.pos.x += swing * SWOOP_AMPLITUDE * dt * SWOOP_FRAME_RATE;
                self.pos.y += (self.vel_y + swing.abs() * SWOOP_LURCH) * dt;
            }
        }

        let max_x = (width - self.radius).max(self.radius);
        self.pos.x = self.pos.x.clamp(self.radius, max_x);
    }

    /// Summed sidestep direction away from threatening missiles
    ///
    /// All missiles are the player's. A missile threatens when it is within the lateral window and below
    /// the enemy inside the lookahead band. Missiles left of the enemy push
    /// it right (+1), missiles right of it (or dead centre) push it left.
    pub fn dodge_direction(&self, missiles: &[Missile]) -> f64 {
        missiles
            .iter()
            .filter(|m| {
                let dx = m.pos.x - self.pos.x;
                let ahead = m.pos.y - self.pos.y;
                dx.abs() < EVADE_WINDOW_X && ahead > 0.0 && ahead < EVADE_LOOKAHEAD
            })
            .map(|m| if m.pos.x < self.pos.x { 1.0 } else { -1.0 })
            .sum()
    }

    /// True once the enemy has dropped past the bottom margin
    pub fn escaped(&self, height: f64) -> bool {
        self.pos.y > height + ENEMY_EXIT_MARGIN
    }
}
