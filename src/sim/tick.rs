//! Per-frame simulation step
//!
//! Advances a session by one clamped frame delta: ship, missiles, enemies,
//! hits, escapes, then the terminal checks. The clamp only bounds motion;
//! the timeout is judged against whatever elapsed time the caller reports.

use super::collision::resolve_hits;
use super::state::{Missile, MissileOwner, Session, SessionPhase};
use crate::consts::*;

/// Input flags sampled at the top of a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub steer_left: bool,
    pub steer_right: bool,
    pub firing: bool,
}

impl TickInput {
    /// -1, 0 or +1
    pub fn steer_direction(&self) -> f64 {
        match (self.steer_left, self.steer_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Terminal {
    /// Roster emptied; `elapsed` is the session's elapsed seconds at that moment
    Won { elapsed: f64 },
    TimedOut,
}

/// Clamp a raw frame delta into `[0, MAX_FRAME_DT]`
#[inline]
pub fn clamp_dt(dt: f64) -> f64 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DT)
    } else {
        0.0
    }
}

/// Advance the session by one frame of fixed-step time
///
/// Elapsed time grows by the clamped delta. Headless drivers and tests use
/// this; a wall-clock driver calls [`tick_at`] instead.
pub fn tick(session: &mut Session, input: &TickInput, dt: f64) -> Option<Terminal> {
    let elapsed = session.elapsed + clamp_dt(dt);
    tick_at(session, input, dt, elapsed)
}

/// Advance the session by one frame, with `elapsed` seconds measured since
/// the attempt started
///
/// Motion integrates the clamped `dt`, while the timeout check uses
/// `elapsed`, so a stalled frame still runs the clock down. Elapsed time
/// never moves backwards; a non-finite value falls back to the clamped
/// delta. Returns the terminal transition on the step that causes it, and
/// `None` on every other step, including all steps after the session stopped.
pub fn tick_at(
    session: &mut Session,
    input: &TickInput,
    dt: f64,
    elapsed: f64,
) -> Option<Terminal> {
    if !session.is_running() {
        return None;
    }
    let dt = clamp_dt(dt);
    session.elapsed = if elapsed.is_finite() {
        elapsed.max(session.elapsed)
    } else {
        session.elapsed + dt
    };

    let width = session.width;
    let height = session.height;

    // Ship
    session.player.steer(input.steer_direction(), dt, width);
    session.player.cooldown = (session.player.cooldown - dt).max(0.0);
    if input.firing && session.player.cooldown <= 0.0 {
        let id = session.next_entity_id();
        let nose = session.player.nose();
        session.missiles.push(Missile::new(id, nose, MissileOwner::Player));
        session.player.cooldown = FIRE_COOLDOWN;
    }

    // Missiles
    for missile in &mut session.missiles {
        missile.pos.y += missile.vel_y * dt;
    }
    session.missiles.retain(|m| !m.out_of_bounds(height));

    // Enemies
    for enemy in &mut session.enemies {
        enemy.advance(dt, &session.missiles, width);
    }

    // Hits
    session.kills += resolve_hits(&mut session.enemies, &mut session.missiles);

    // Escapes
    let before = session.enemies.len();
    session.enemies.retain(|e| !e.escaped(height));
    let escaped = (before - session.enemies.len()) as u32;
    if escaped > 0 {
        log::debug!("{} enemies escaped at {:.2}s", escaped, session.elapsed);
        session.escapes += escaped;
    }

    // Terminal checks
    if session.enemies.is_empty() {
        session.phase = SessionPhase::Won;
        log::info!(
            "Challenge {} cleared in {:.3}s ({} kills, {} escaped)",
            session.day_key,
            session.elapsed,
            session.kills,
            session.escapes
        );
        return Some(Terminal::Won {
            elapsed: session.elapsed,
        });
    }
    if session.elapsed >= session.time_limit {
        session.phase = SessionPhase::TimedOut;
        log::info!(
            "Challenge {} timed out with {} enemies left",
            session.day_key,
            session.enemies.len()
        );
        return Some(Terminal::TimedOut);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::enemy::{Enemy, EnemyKind};
    use glam::DVec2;

    const DT: f64 = 1.0 / 60.0;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn single_enemy_session(x: f64, y: f64) -> Session {
        let enemy = Enemy::new(1, DVec2::new(x, y), ENEMY_DRIFT, EnemyKind::Straight);
        Session::with_roster(&config(), "2025-10-05", vec![enemy])
    }

    fn fire() -> TickInput {
        TickInput {
            firing: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(0.016), 0.016);
        assert_eq!(clamp_dt(5.0), MAX_FRAME_DT);
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(f64::NAN), 0.0);
        assert_eq!(clamp_dt(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_huge_delta_is_clamped() {
        let mut session = single_enemy_session(100.0, 100.0);
        tick(&mut session, &TickInput::default(), 10.0);
        assert_eq!(session.elapsed, MAX_FRAME_DT);
        assert!((session.enemies[0].pos.y - (100.0 + ENEMY_DRIFT * MAX_FRAME_DT)).abs() < 1e-9);
    }

    #[test]
    fn test_steering() {
        let mut session = single_enemy_session(100.0, 100.0);
        let start = session.player.pos.x;
        let left = TickInput {
            steer_left: true,
            ..Default::default()
        };
        tick(&mut session, &left, 0.05);
        assert!((session.player.pos.x - (start - PLAYER_SPEED * 0.05)).abs() < 1e-9);

        let both = TickInput {
            steer_left: true,
            steer_right: true,
            ..Default::default()
        };
        let x = session.player.pos.x;
        tick(&mut session, &both, 0.05);
        assert_eq!(session.player.pos.x, x);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut session = single_enemy_session(20.0, -500.0);
        tick(&mut session, &fire(), DT);
        assert_eq!(session.missiles.len(), 1);
        assert_eq!(session.missiles[0].owner, MissileOwner::Player);
        assert_eq!(session.player.cooldown, FIRE_COOLDOWN);

        // Still cooling down
        for _ in 0..10 {
            tick(&mut session, &fire(), 0.04);
        }
        assert_eq!(session.missiles.len(), 1);

        // 0.5s have passed after the 13th 0.04s step
        for _ in 0..3 {
            tick(&mut session, &fire(), 0.04);
        }
        assert_eq!(session.missiles.len(), 2);
    }

    #[test]
    fn test_missile_leaves_top() {
        let mut session = single_enemy_session(20.0, -5000.0);
        tick(&mut session, &fire(), DT);
        assert_eq!(session.missiles.len(), 1);
        // 720 - 60 - 16 = 644 px to the top edge plus margin at 520 px/s
        for _ in 0..30 {
            tick(&mut session, &TickInput::default(), 0.05);
        }
        assert!(session.missiles.is_empty());
    }

    #[test]
    fn test_hit_wins_once() {
        let cfg = config();
        let above_ship = cfg.height - PLAYER_BOTTOM_OFFSET - 150.0;
        let mut session = single_enemy_session(cfg.width / 2.0, above_ship);

        let mut terminal = None;
        for _ in 0..60 {
            if let Some(t) = tick(&mut session, &fire(), DT) {
                terminal = Some(t);
                break;
            }
        }
        match terminal {
            Some(Terminal::Won { elapsed }) => assert!(elapsed > 0.0 && elapsed < 1.0),
            other => panic!("expected win, got {:?}", other),
        }
        assert!(session.is_solved());
        assert_eq!(session.kills, 1);
        assert!(session.missiles.is_empty());

        // Further steps are inert
        let elapsed = session.elapsed;
        assert_eq!(tick(&mut session, &fire(), DT), None);
        assert_eq!(session.elapsed, elapsed);
    }

    #[test]
    fn test_escape_counts_as_clear() {
        let cfg = config();
        let mut session = single_enemy_session(20.0, cfg.height + ENEMY_EXIT_MARGIN - 1.0);
        let result = tick(&mut session, &TickInput::default(), 0.05);
        assert!(matches!(result, Some(Terminal::Won { .. })));
        assert_eq!(session.kills, 0);
        assert_eq!(session.escapes, 1);
    }

    #[test]
    fn test_timeout() {
        let mut session = single_enemy_session(20.0, -100_000.0);
        session.time_limit = 1.0;
        let mut steps = 0;
        let result = loop {
            steps += 1;
            if let Some(t) = tick(&mut session, &TickInput::default(), 0.05) {
                break t;
            }
        };
        assert_eq!(result, Terminal::TimedOut);
        assert!(steps >= 20 && steps <= 21);
        assert_eq!(session.phase, SessionPhase::TimedOut);
        assert_eq!(tick(&mut session, &TickInput::default(), 0.05), None);
    }

    #[test]
    fn test_wall_clock_elapsed_drives_timeout() {
        let mut session = single_enemy_session(20.0, -100_000.0);
        session.time_limit = 30.0;
        let y0 = session.enemies[0].pos.y;

        assert_eq!(tick_at(&mut session, &TickInput::default(), 10.0, 10.0), None);
        assert_eq!(session.elapsed, 10.0);
        // Motion only saw the clamped step
        assert!((session.enemies[0].pos.y - (y0 + ENEMY_DRIFT * MAX_FRAME_DT)).abs() < 1e-9);

        // A clock that goes backwards does not rewind the session
        assert_eq!(tick_at(&mut session, &TickInput::default(), 0.0, 5.0), None);
        assert_eq!(session.elapsed, 10.0);
        assert_eq!(tick_at(&mut session, &TickInput::default(), 0.02, f64::NAN), None);
        assert!((session.elapsed - 10.02).abs() < 1e-12);

        let result = tick_at(&mut session, &TickInput::default(), 20.0, 30.0);
        assert_eq!(result, Some(Terminal::TimedOut));
        assert_eq!(session.phase, SessionPhase::TimedOut);
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            TickInput {
                steer_left: true,
                firing: true,
                ..Default::default()
            },
            fire(),
            TickInput {
                steer_right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        let mut a = Session::new(&config(), "2025-10-02");
        let mut b = Session::new(&config(), "2025-10-02");
        for step in 0..600 {
            let input = inputs[step % inputs.len()];
            let ra = tick(&mut a, &input, DT);
            let rb = tick(&mut b, &input, DT);
            assert_eq!(ra, rb);
        }
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.missiles, b.missiles);
        assert_eq!(a.elapsed.to_bits(), b.elapsed.to_bits());
    }
}
