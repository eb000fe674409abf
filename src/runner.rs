//! Frame scheduler
//!
//! Owns one session plus the collaborators it needs, turns frame timestamps
//! into clamped motion deltas plus wall-clock elapsed time, and
//! resolves/persists the outcome exactly once. The
//! caller decides when frames happen (requestAnimationFrame, a fixed-rate
//! loop, a test) and stops calling once `Finished` comes back.

use crate::config::GameConfig;
use crate::outcome::{ChallengeResult, resolve};
use crate::persistence::KeyValueStore;
use crate::record::PlayerRecord;
use crate::sim::{Session, Terminal, TickInput, tick_at};

/// Delta used for the very first frame, which has no predecessor; the
/// attempt's wall clock starts this long before that frame
pub const NOMINAL_FRAME_DT: f64 = 1.0 / 60.0;

/// What the caller should do after a frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameStatus {
    /// Schedule another frame
    Continue,
    /// Session over; no further frames needed
    Finished(ChallengeResult),
}

/// Drives a single session against a record store
#[derive(Debug)]
pub struct Runner<S> {
    config: GameConfig,
    store: S,
    record: PlayerRecord,
    session: Session,
    /// Latest input snapshot, applied on the next frame
    input: TickInput,
    last_frame_ms: Option<f64>,
    /// Wall-clock origin of the attempt
    start_ms: Option<f64>,
    result: Option<ChallengeResult>,
}

impl<S: KeyValueStore> Runner<S> {
    /// Load the record and start the challenge for `today`
    pub fn new(config: GameConfig, store: S, today: &str) -> Self {
        let record = PlayerRecord::load(&store);
        log::info!(
            "Record: best {:?}, streak {}, last done {:?}",
            record.format_best(),
            record.streak,
            record.last_done
        );
        let session = Session::new(&config, today);
        Self {
            config,
            store,
            record,
            session,
            input: TickInput::default(),
            last_frame_ms: None,
            start_ms: None,
            result: None,
        }
    }

    /// Start a fresh attempt, rereading the record
    pub fn restart(&mut self, today: &str) {
        self.record = PlayerRecord::load(&self.store);
        self.session = Session::new(&self.config, today);
        self.input = TickInput::default();
        self.last_frame_ms = None;
        self.start_ms = None;
        self.result = None;
    }

    /// Replace the input snapshot
    pub fn set_input(&mut self, input: TickInput) {
        self.input = input;
    }

    /// Advance one frame at wall-clock time `now_ms`
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if let Some(result) = &self.result {
            return FrameStatus::Finished(result.clone());
        }

        let dt = match self.last_frame_ms {
            Some(prev) => (now_ms - prev) / 1000.0,
            None => NOMINAL_FRAME_DT,
        };
        self.last_frame_ms = Some(now_ms);
        let start = *self
            .start_ms
            .get_or_insert(now_ms - NOMINAL_FRAME_DT * 1000.0);
        let elapsed = (now_ms - start) / 1000.0;

        match tick_at(&mut self.session, &self.input, dt, elapsed) {
            Some(terminal) => self.finish(terminal),
            None => FrameStatus::Continue,
        }
    }

    /// Run to completion with synthetic timestamps `frame_ms` apart
    ///
    /// `drive` supplies the input for each frame from the current state.
    pub fn run<F>(&mut self, frame_ms: f64, mut drive: F) -> ChallengeResult
    where
        F: FnMut(&Session) -> TickInput,
    {
        let frame_ms = if frame_ms > 0.0 {
            frame_ms
        } else {
            NOMINAL_FRAME_DT * 1000.0
        };
        let mut now = self.last_frame_ms.unwrap_or(0.0);
        loop {
            let input = drive(&self.session);
            self.set_input(input);
            now += frame_ms;
            if let FrameStatus::Finished(result) = self.frame(now) {
                return result;
            }
        }
    }

    fn finish(&mut self, terminal: Terminal) -> FrameStatus {
        // The attempt counts for the day its roster was generated for
        let day = self.session.day_key.clone();
        let Some(result) = resolve(&mut self.session, &mut self.record, &day) else {
            return FrameStatus::Continue;
        };

        let saved = match terminal {
            Terminal::Won { .. } => self.record.save(&mut self.store),
            Terminal::TimedOut => self.record.save_streak(&mut self.store),
        };
        if let Err(e) = saved {
            log::warn!("Could not save record: {}", e);
        }

        self.result = Some(result.clone());
        FrameStatus::Finished(result)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn record(&self) -> &PlayerRecord {
        &self.record
    }

    pub fn result(&self) -> Option<&ChallengeResult> {
        self.result.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::MAX_FRAME_DT;
    use crate::persistence::{MemoryStore, StoreError};
    use crate::record::{BEST_TIME_KEY, LAST_DONE_KEY, STREAK_KEY};
    use crate::sim::autopilot_input;

    fn runner(store: MemoryStore, today: &str) -> Runner<MemoryStore> {
        Runner::new(GameConfig::default(), store, today)
    }

    /// Short enough that no enemy of the test days can escape in time
    fn sprint() -> GameConfig {
        GameConfig {
            time_limit_secs: 5.0,
            ..GameConfig::default()
        }
    }

    #[test]
    fn test_stalled_frame_clamps_motion_but_not_clock() {
        let mut r = runner(MemoryStore::new(), "2025-10-02");
        assert_eq!(r.frame(1000.0), FrameStatus::Continue);
        assert!((r.session().elapsed - NOMINAL_FRAME_DT).abs() < 1e-12);
        let y0 = r.session().enemies[0].pos.y;
        let vy = r.session().enemies[0].vel_y;

        // Tab came back after ten seconds
        assert_eq!(r.frame(11_000.0), FrameStatus::Continue);
        assert!((r.session().elapsed - (10.0 + NOMINAL_FRAME_DT)).abs() < 1e-9);
        assert!(r.session().enemies[0].pos.y - y0 <= (vy + 100.0) * MAX_FRAME_DT);
    }

    #[test]
    fn test_slow_frames_time_out_on_the_wall_clock() {
        let mut r = runner(MemoryStore::new(), "2025-10-02");
        let mut now = 0.0;
        let status = loop {
            now += 200.0;
            assert!(now <= 31_000.0, "still running at {}ms", now);
            if let FrameStatus::Finished(result) = r.frame(now) {
                break result;
            }
        };
        assert!(matches!(status, ChallengeResult::TimedOut { enemies_left } if enemies_left > 0));
        let elapsed = r.session().elapsed;
        assert!(elapsed >= 30.0 && elapsed < 30.2 + NOMINAL_FRAME_DT);
    }

    #[test]
    fn test_input_applies_on_next_frame() {
        let mut r = runner(MemoryStore::new(), "2025-10-02");
        let x0 = r.session().player.pos.x;
        r.frame(0.0);
        assert_eq!(r.session().player.pos.x, x0);
        r.set_input(TickInput {
            steer_right: true,
            ..Default::default()
        });
        r.frame(20.0);
        assert!(r.session().player.pos.x > x0);
    }

    #[test]
    fn test_idle_session_times_out_and_resets_streak() {
        let mut store = MemoryStore::new();
        store.set(STREAK_KEY, "6").unwrap();
        store.set(BEST_TIME_KEY, "12.345").unwrap();
        store.set(LAST_DONE_KEY, "2025-10-01").unwrap();

        let mut r = Runner::new(sprint(), store, "2025-10-02");
        let result = r.run(1000.0 / 60.0, |_| TickInput::default());
        assert!(matches!(result, ChallengeResult::TimedOut { enemies_left } if enemies_left > 0));
        assert_eq!(r.store().get(STREAK_KEY).as_deref(), Some("0"));
        assert_eq!(r.store().get(BEST_TIME_KEY).as_deref(), Some("12.345"));
        assert_eq!(r.store().get(LAST_DONE_KEY).as_deref(), Some("2025-10-01"));

        // Later frames keep reporting the same result without touching the store
        assert_eq!(r.frame(1.0e9), FrameStatus::Finished(result));
    }

    #[test]
    fn test_autopilot_clear_persists_win() {
        let mut store = MemoryStore::new();
        store.set(STREAK_KEY, "2").unwrap();
        store.set(LAST_DONE_KEY, "2025-10-01").unwrap();

        let mut r = runner(store, "2025-10-02");
        let result = r.run(1000.0 / 60.0, autopilot_input);
        let ChallengeResult::Won { time, streak, .. } = result else {
            panic!("autopilot failed to clear: {:?}", result);
        };
        assert!(time > 0.0 && time <= r.config().time_limit_secs);
        assert_eq!(streak, 3);
        assert_eq!(r.store().get(STREAK_KEY).as_deref(), Some("3"));
        assert_eq!(r.store().get(LAST_DONE_KEY).as_deref(), Some("2025-10-02"));
        let best: f64 = r.store().get(BEST_TIME_KEY).unwrap().parse().unwrap();
        assert!((best - time).abs() < 0.0005);
    }

    #[test]
    fn test_restart_rereads_record() {
        let mut store = MemoryStore::new();
        let mut r = Runner::new(sprint(), &mut store, "2025-10-02");
        r.run(1000.0 / 60.0, |_| TickInput::default());
        r.restart("2025-10-03");
        assert!(r.session().is_running());
        assert_eq!(r.session().day_key, "2025-10-03");
        assert_eq!(r.record().streak, 0);
        assert!(r.result().is_none());
        drop(r);
        assert_eq!(store.get(STREAK_KEY).as_deref(), Some("0"));
    }

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable)
        }
    }

    #[test]
    fn test_failed_save_still_finishes() {
        let mut r = Runner::new(sprint(), ReadOnlyStore, "2025-10-02");
        let result = r.run(1000.0 / 60.0, |_| TickInput::default());
        assert!(matches!(result, ChallengeResult::TimedOut { .. }));
        assert_eq!(r.record().streak, 0);
    }
}
