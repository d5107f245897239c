//! Combat-log event classification and per-job state tracking.
//!
//! Hosts feed tokenized log lines, player snapshots, and lifecycle
//! callbacks into an [`EventProcessor`] and poll the display objects
//! it owns. Every time-dependent entry point takes the caller's
//! `Instant`, so replays and tests drive the clock explicitly.

pub mod combo;
pub mod display;
pub mod dot;
pub mod effects;
pub mod error;
pub mod game_data;
pub mod jobs;
pub mod locale;
pub mod net_log;
pub mod options;
pub mod player;
pub mod processor;
pub mod session;

// Re-exports for convenience
pub use combo::{ComboTracker, ComboTransition};
pub use display::{
    Classification, DeferredSlot, ResourceBar, ResourceBox, TimerBar, TimerBox,
};
pub use dot::DotTracker;
pub use effects::{ActiveEffect, Bearer, EffectKey, EffectTracker};
pub use error::EngineError;
pub use game_data::Job;
pub use jobs::{JobDetail, JobTracker};
pub use locale::{Lang, LocaleRegexes};
pub use net_log::{LineType, LogEvent, RawLine};
pub use options::JobsOptions;
pub use player::{PlayerState, SpeedBuffs};
pub use processor::{EventProcessor, Notification};
pub use session::{CraftingState, PlayerSnapshot, SessionState};
