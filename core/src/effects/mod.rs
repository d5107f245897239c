//! Status effect tracking
//!
//! Maintains the set of currently-active status effects per bearer
//! (local player, party members, hostile entities). Expiry is passive:
//! readers compare the stored deadline against their own `now`, so no
//! background eviction loop is needed and staleness is bounded by the
//! next read.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::net_log::is_hostile_id;

#[cfg(test)]
mod tracker_tests;

/// Who is carrying an effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bearer {
    Me,
    Party,
    Mob,
}

/// The same effect id from two different casters on the same target is
/// tracked independently, so the source is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EffectKey {
    pub bearer_id: String,
    pub effect_id: String,
    pub source_id: String,
}

#[derive(Debug, Clone)]
pub struct ActiveEffect {
    pub bearer: Bearer,
    pub applied_at: Instant,
    /// `None` = indefinite; stays until an explicit loss event.
    pub expires_at: Option<Instant>,
    /// Stack count from the gain event; 0 for unstacked effects.
    pub stacks: u8,
}

impl ActiveEffect {
    pub fn is_active(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(at) => now < at,
            None => true,
        }
    }

    pub fn remaining(&self, now: Instant) -> Option<f32> {
        self.expires_at
            .map(|at| at.saturating_duration_since(now).as_secs_f32())
    }
}

/// Classify a bearer by entity id convention, the local player name,
/// and the current party roster. Entities outside those three groups
/// (alliance members, bystanders) are not tracked.
pub fn bearer_for(
    target_id: Option<&str>,
    target: Option<&str>,
    me: &str,
    party: &[String],
) -> Option<Bearer> {
    if target == Some(me) {
        Some(Bearer::Me)
    } else if target_id.is_some_and(is_hostile_id) {
        Some(Bearer::Mob)
    } else if target.is_some_and(|t| party.iter().any(|p| p == t)) {
        Some(Bearer::Party)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct EffectTracker {
    active: HashMap<EffectKey, ActiveEffect>,
}

impl EffectTracker {
    pub fn new() -> EffectTracker {
        EffectTracker::default()
    }

    /// Insert or overwrite on a gain event. Reapplication of the same
    /// bearer+effect+source simply restarts the clock.
    pub fn apply(
        &mut self,
        key: EffectKey,
        bearer: Bearer,
        duration_secs: Option<f32>,
        stacks: u8,
        now: Instant,
    ) {
        let expires_at = duration_secs
            .filter(|d| *d > 0.0)
            .map(|d| now + Duration::from_secs_f32(d));
        self.active.insert(
            key,
            ActiveEffect {
                bearer,
                applied_at: now,
                expires_at,
                stacks,
            },
        );
    }

    /// Remove the exactly matching entry on a loss event.
    pub fn remove(&mut self, key: &EffectKey) {
        self.active.remove(key);
    }

    pub fn is_active(&self, key: &EffectKey, now: Instant) -> bool {
        self.active.get(key).is_some_and(|e| e.is_active(now))
    }

    pub fn get(&self, key: &EffectKey) -> Option<&ActiveEffect> {
        self.active.get(key)
    }

    /// Whether any source has the effect active on the bearer.
    pub fn is_active_any_source(&self, bearer_id: &str, effect_id: &str, now: Instant) -> bool {
        self.active.iter().any(|(k, e)| {
            k.bearer_id == bearer_id && k.effect_id == effect_id && e.is_active(now)
        })
    }

    pub fn active_for_bearer<'a>(
        &'a self,
        bearer_id: &'a str,
        now: Instant,
    ) -> impl Iterator<Item = (&'a EffectKey, &'a ActiveEffect)> {
        self.active
            .iter()
            .filter(move |(k, e)| k.bearer_id == bearer_id && e.is_active(now))
    }

    /// Statuses do not carry across instances: clear everything on
    /// zone change or party wipe.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
