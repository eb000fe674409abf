//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time and the current UTC day
//! - Storage (LocalStorage on web)

use chrono::{DateTime, Utc};

use crate::sim::day::day_key_at;

/// Wall clock collaborator
pub trait Clock {
    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> f64;

    /// Today's day key in UTC
    fn today(&self) -> String {
        let instant = DateTime::<Utc>::from_timestamp_millis(self.now_ms() as i64)
            .unwrap_or_default();
        day_key_at(instant)
    }
}

/// Native system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        Utc::now().timestamp_millis() as f64
    }
}

/// Manually driven clock for replays and tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualClock {
    pub now_ms: f64,
}

impl ManualClock {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            now_ms: instant.timestamp_millis() as f64,
        }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::{LocalStorageStore, WebClock};

#[cfg(target_arch = "wasm32")]
mod web {
    use super::Clock;
    use crate::persistence::{KeyValueStore, StoreError};

    /// `Date.now()`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct WebClock;

    impl Clock for WebClock {
        fn now_ms(&self) -> f64 {
            js_sys::Date::now()
        }
    }

    /// Browser LocalStorage
    #[derive(Debug, Clone, Copy, Default)]
    pub struct LocalStorageStore;

    impl LocalStorageStore {
        fn storage() -> Option<web_sys::Storage> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
        }
    }

    impl KeyValueStore for LocalStorageStore {
        fn get(&self, key: &str) -> Option<String> {
            Self::storage()?.get_item(key).ok().flatten()
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            let storage = Self::storage().ok_or(StoreError::Unavailable)?;
            storage
                .set_item(key, value)
                .map_err(|e| StoreError::WriteRejected {
                    key: key.to_string(),
                    reason: format!("{:?}", e),
                })
        }
    }
}
