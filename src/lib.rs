#![forbid(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::all))]

//! # deskclock
//!
//! The time-state engine behind a desktop clock: current time in a small fixed set of zones,
//! one alarm, one countdown timer, and the once-per-second update protocol that feeds a
//! display.
//!
//! ## Features
//!
//! - **12/24-hour display** with analog hand angles
//! - **Fixed timezone registry** with a soft fallback to local time
//! - **Single alarm** with minute-granularity, fire-once matching
//! - **Countdown timer** up to 99:59:59
//! - **Edge flags** (`should_alert`) valid for exactly one tick
//! - **Update loop** driven by a tokio interval, display sinks as `tower::Service`s
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use deskclock::{ClockConfig, ClockEngine, UpdateLoop};
//! use deskclock::display::ConsoleSink;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = ClockConfig::default();
//!     let mut engine = ClockEngine::with_config(&config);
//!     engine.set_timer(0, 0, 5).expect("valid duration");
//!     engine.start_timer();
//!
//!     let (update_loop, _handle) = UpdateLoop::new(engine, ConsoleSink::stdout(), config);
//!     let engine = update_loop.run_for(6).await;
//!     assert!(engine.timer().is_finished());
//! }
//! ```

pub mod alarm;
pub mod clock;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod format;
pub mod input;
pub mod snapshot;
pub mod time_source;
pub mod timer;
pub mod timezone;
pub mod update_loop;

// Re-exports
pub use alarm::{AlarmState, AlarmStatus, AlarmTime};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{ClockConfig, ClockConfigBuilder};
pub use engine::ClockEngine;
pub use error::{ClockError, ConfigError};
pub use format::{DisplayFormatState, HourFormat};
pub use input::{parse_alarm_input, parse_timer_input, InputError, InputField};
pub use snapshot::DisplaySnapshot;
pub use time_source::{HandAngles, TimeSource, WallClockReading};
pub use timer::{TimerDuration, TimerState, TimerStatus};
pub use timezone::TimezoneKey;
pub use update_loop::{EngineCommand, UpdateLoop, UpdateLoopHandle};
