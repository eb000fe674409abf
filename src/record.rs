//! Best time and daily streak
//!
//! Persisted as three string slots: best time with three decimals, streak as
//! an integer, last completed day as a day key. Anything that fails to parse
//! is treated as never having been stored.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, StoreError};
use crate::sim::day::parse_day_key;

/// Storage keys
pub const BEST_TIME_KEY: &str = "daily_blitz_best";
pub const STREAK_KEY: &str = "daily_blitz_streak";
pub const LAST_DONE_KEY: &str = "daily_blitz_last_done";

/// The player's long-lived record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Fastest clear in seconds
    pub best_time: Option<f64>,
    /// Consecutive days with a win
    pub streak: u32,
    /// Day key of the most recent win
    pub last_done: Option<String>,
}

impl PlayerRecord {
    /// Read the record, degrading malformed slots to their defaults
    pub fn load(store: &impl KeyValueStore) -> Self {
        let best_time = store.get(BEST_TIME_KEY).and_then(|raw| {
            let parsed = parse_best_time(&raw);
            if parsed.is_none() {
                log::warn!("Discarding unreadable best time {:?}", raw);
            }
            parsed
        });
        let streak = store
            .get(STREAK_KEY)
            .map(|raw| {
                parse_streak(&raw).unwrap_or_else(|| {
                    log::warn!("Discarding unreadable streak {:?}", raw);
                    0
                })
            })
            .unwrap_or(0);
        let last_done = store.get(LAST_DONE_KEY).and_then(|raw| {
            let valid = parse_day_key(&raw).is_some();
            if !valid {
                log::warn!("Discarding unreadable last-done day {:?}", raw);
            }
            valid.then(|| raw.trim().to_string())
        });

        Self {
            best_time,
            streak,
            last_done,
        }
    }

    /// Write all three slots
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        if let Some(best) = self.format_best() {
            store.set(BEST_TIME_KEY, &best)?;
        }
        self.save_streak(store)?;
        if let Some(day) = &self.last_done {
            store.set(LAST_DONE_KEY, day)?;
        }
        Ok(())
    }

    /// Write only the streak slot
    pub fn save_streak(&self, store: &mut impl KeyValueStore) -> Result<(), StoreError> {
        store.set(STREAK_KEY, &self.streak.to_string())
    }

    /// Best time as stored, e.g. `"14.999"`
    pub fn format_best(&self) -> Option<String> {
        self.best_time.map(format_seconds)
    }

    /// Best time only if it is usable for comparison
    pub fn valid_best(&self) -> Option<f64> {
        self.best_time.filter(|t| *t > 0.0)
    }

    /// Whether `today` has already been won
    pub fn completed_today(&self, today: &str) -> bool {
        self.last_done.as_deref() == Some(today)
    }
}

/// Seconds with three decimals
pub fn format_seconds(secs: f64) -> String {
    format!("{:.3}", secs)
}

fn parse_best_time(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

fn parse_streak(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    trimmed.parse::<u32>().ok().or_else(|| {
        // Tolerate "3.0" style values; negatives clamp to zero
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.max(0.0).trunc() as u32)
    })
}
