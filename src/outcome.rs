//! Outcome resolution
//!
//! Turns a session's terminal transition into record updates: best time and
//! streak on a win, a streak reset on a timeout.

use serde::Serialize;

use crate::record::PlayerRecord;
use crate::sim::day::previous_day_key;
use crate::sim::{Session, SessionPhase};

/// Result shown to the player once a session ends
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ChallengeResult {
    Won {
        /// Clear time, capped at the time limit
        time: f64,
        /// Whether `time` replaced the stored best
        new_best: bool,
        best_time: f64,
        streak: u32,
    },
    TimedOut {
        enemies_left: usize,
    },
}

/// How a win moves the streak
pub fn next_streak(previous: u32, last_done: Option<&str>, today: &str) -> u32 {
    match last_done {
        Some(day) if day == today => previous,
        Some(day) if previous_day_key(today).as_deref() == Some(day) => previous.saturating_add(1),
        _ => 1,
    }
}

/// Apply the session's outcome to `record`
///
/// `today` is the day key the result counts for. Returns `None` while the
/// session is still running or if it has already been resolved, so a
/// session can only ever touch the record once.
pub fn resolve(
    session: &mut Session,
    record: &mut PlayerRecord,
    today: &str,
) -> Option<ChallengeResult> {
    if session.resolved {
        return None;
    }
    let result = match session.phase {
        SessionPhase::Running => return None,
        SessionPhase::Won => {
            let time = session.elapsed.min(session.time_limit);
            let new_best = match record.valid_best() {
                Some(best) => time < best,
                None => true,
            };
            if new_best {
                record.best_time = Some(time);
            }
            record.streak = next_streak(record.streak, record.last_done.as_deref(), today);
            record.last_done = Some(today.to_string());
            ChallengeResult::Won {
                time,
                new_best,
                best_time: record.best_time.unwrap_or(time),
                streak: record.streak,
            }
        }
        SessionPhase::TimedOut => {
            record.streak = 0;
            ChallengeResult::TimedOut {
                enemies_left: session.enemies.len(),
            }
        }
    };
    session.resolved = true;
    log::info!("Resolved {}: {:?}", session.day_key, result);
    Some(result)
}
