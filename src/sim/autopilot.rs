//! Demo-mode pilot
//!
//! Chases the most advanced enemy and fires when lined up with it. Good
//! enough to clear most rosters, which makes it useful for the attract
//! screen and for end-to-end runs.

use super::state::Session;
use super::tick::TickInput;

/// Horizontal distance treated as "lined up"
const AIM_TOLERANCE: f64 = 10.0;

/// Input the pilot would give for the current state
pub fn autopilot_input(session: &Session) -> TickInput {
    let Some(target) = session
        .enemies
        .iter()
        .filter(|e| e.pos.y + e.radius >= 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .or_else(|| {
            // Nothing on screen yet: line up under the next arrival
            session
                .enemies
                .iter()
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        })
    else {
        return TickInput::default();
    };

    let dx = target.pos.x - session.player.pos.x;
    TickInput {
        steer_left: dx < -AIM_TOLERANCE / 2.0,
        steer_right: dx > AIM_TOLERANCE / 2.0,
        firing: dx.abs() < AIM_TOLERANCE && target.pos.y + target.radius >= 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::ENEMY_DRIFT;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use glam::DVec2;

    fn session_with(enemies: Vec<Enemy>) -> Session {
        Session::with_roster(&GameConfig::default(), "2025-10-05", enemies)
    }

    #[test]
    fn test_steers_toward_lowest_enemy() {
        let session = session_with(vec![
            Enemy::new(1, DVec2::new(400.0, 50.0), ENEMY_DRIFT, EnemyKind::Straight),
            Enemy::new(2, DVec2::new(60.0, 300.0), ENEMY_DRIFT, EnemyKind::Straight),
        ]);
        let input = autopilot_input(&session);
        assert!(input.steer_left);
        assert!(!input.steer_right);
        assert!(!input.firing);
    }

    #[test]
    fn test_fires_when_aligned() {
        let session = session_with(vec![Enemy::new(
            1,
            DVec2::new(242.0, 100.0),
            ENEMY_DRIFT,
            EnemyKind::Straight,
        )]);
        let input = autopilot_input(&session);
        assert!(input.firing);
        assert!(!input.steer_left && !input.steer_right);
    }

    #[test]
    fn test_holds_fire_until_enemy_visible() {
        let session = session_with(vec![Enemy::new(
            1,
            DVec2::new(240.0, -200.0),
            ENEMY_DRIFT,
            EnemyKind::Straight,
        )]);
        assert!(!autopilot_input(&session).firing);
    }

    #[test]
    fn test_empty_roster_is_idle() {
        let session = session_with(Vec::new());
        assert_eq!(autopilot_input(&session), TickInput::default());
    }
}
