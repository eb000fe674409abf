//! Daily Blitz entry point
//!
//! On the web this exposes a small handle for the page's render loop. The
//! native build plays a day's challenge headlessly with the demo pilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use daily_blitz::platform::{Clock, LocalStorageStore, WebClock};
    use daily_blitz::sim::TickInput;
    use daily_blitz::{FrameStatus, GameConfig, Runner};

    /// Handle owned by the page; call `frame` from requestAnimationFrame
    #[wasm_bindgen]
    pub struct DailyBlitz {
        runner: Runner<LocalStorageStore>,
    }

    #[wasm_bindgen]
    impl DailyBlitz {
        #[wasm_bindgen(constructor)]
        pub fn new() -> DailyBlitz {
            let today = WebClock.today();
            log::info!("Starting daily challenge {}", today);
            DailyBlitz {
                runner: Runner::new(GameConfig::load(), LocalStorageStore, &today),
            }
        }

        /// Latest input flags; they take effect on the next frame
        pub fn set_input(&mut self, steer_left: bool, steer_right: bool, firing: bool) {
            self.runner.set_input(TickInput {
                steer_left,
                steer_right,
                firing,
            });
        }

        /// Advance one frame; returns false once the session is over
        pub fn frame(&mut self, time_ms: f64) -> bool {
            match self.runner.frame(time_ms) {
                FrameStatus::Continue => true,
                FrameStatus::Finished(_) => false,
            }
        }

        /// Positions, remaining time and enemy count as JSON
        pub fn snapshot_json(&self) -> String {
            serde_json::to_string(&self.runner.session().snapshot()).unwrap_or_default()
        }

        /// Final result as JSON, once finished
        pub fn result_json(&self) -> Option<String> {
            self.runner
                .result()
                .and_then(|r| serde_json::to_string(r).ok())
        }

        /// Best time / streak record as JSON
        pub fn record_json(&self) -> String {
            serde_json::to_string(self.runner.record()).unwrap_or_default()
        }

        /// New attempt at today's challenge
        pub fn restart(&mut self) {
            let today = WebClock.today();
            if self.runner.record().completed_today(&today) {
                log::info!("Replaying {} (already cleared today)", today);
            }
            self.runner.restart(&today);
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("Daily Blitz starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use daily_blitz::persistence::MemoryStore;
    use daily_blitz::platform::{Clock, SystemClock};
    use daily_blitz::sim::{autopilot_input, parse_day_key};
    use daily_blitz::{ChallengeResult, GameConfig, Runner};

    env_logger::init();

    let today = match std::env::args().nth(1) {
        Some(arg) => match parse_day_key(&arg) {
            Some(_) => arg.trim().to_string(),
            None => {
                eprintln!("usage: daily-blitz [YYYY-MM-DD]");
                std::process::exit(2);
            }
        },
        None => SystemClock.today(),
    };
    log::info!("Daily Blitz (native) playing {} with the demo pilot", today);

    let mut runner = Runner::new(GameConfig::load(), MemoryStore::new(), &today);
    let result = runner.run(1000.0 / 60.0, |session| {
        log::trace!(
            "{}",
            serde_json::to_string(&session.snapshot()).unwrap_or_default()
        );
        autopilot_input(session)
    });

    let session = runner.session();
    match result {
        ChallengeResult::Won {
            time,
            best_time,
            streak,
            ..
        } => println!(
            "{}: cleared in {:.3}s ({} kills, {} escaped), best {:.3}s, streak {}",
            today, time, session.kills, session.escapes, best_time, streak
        ),
        ChallengeResult::TimedOut { enemies_left } => println!(
            "{}: time up with {} enemies left",
            today, enemies_left
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
