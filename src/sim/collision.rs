//! Missile/enemy hit detection
//!
//! Everything is a circle, so a hit is a centre distance test with a small
//! amount of slack.

use glam::DVec2;

use super::enemy::Enemy;
use super::state::Missile;
use crate::consts::HIT_FUDGE;

/// Whether two circles overlap once `HIT_FUDGE` is added to their radii
#[inline]
pub fn circles_hit(a: DVec2, a_radius: f64, b: DVec2, b_radius: f64) -> bool {
    a.distance(b) < a_radius + b_radius + HIT_FUDGE
}

#[inline]
pub fn missile_hits_enemy(missile: &Missile, enemy: &Enemy) -> bool {
    circles_hit(enemy.pos, enemy.radius, missile.pos, missile.radius)
}

/// Remove every enemy/missile pair that collides
///
/// Enemies are visited in roster order and each takes the first missile
/// that touches it. A missile is consumed by at most one enemy, and an
/// enemy that has been removed cannot be hit again. Returns the number of
/// enemies destroyed.
pub fn resolve_hits(enemies: &mut Vec<Enemy>, missiles: &mut Vec<Missile>) -> u32 {
    let mut kills = 0;
    enemies.retain(|enemy| {
        match missiles.iter().position(|m| missile_hits_enemy(m, enemy)) {
            Some(index) => {
                missiles.remove(index);
                kills += 1;
                false
            }
            None => true,
        }
    });
    kills
}
