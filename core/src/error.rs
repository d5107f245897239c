//! Error types for the tracking engine

use thiserror::Error;

/// Fatal engine errors.
///
/// Malformed lines and unknown categories are not errors; they are
/// ignored during classification. Anything surfaced here means the
/// derived state can no longer be trusted.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The level-modifier table has no entry for the player's level.
    /// Continuing would silently produce wrong cooldown durations.
    #[error("speed modifier table has no entry for level {level}; derived timers would be wrong")]
    MissingLevelMod { level: u8 },

    #[error("failed to compile locale pattern '{name}'")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
}
