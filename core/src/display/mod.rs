//! Rendering sink state objects
//!
//! The engine never draws; it owns these value objects and pushes
//! durations, thresholds, and classifications into them. A renderer
//! polls them. `TimerBox` keeps its start instant so consumers can read
//! back elapsed time, which the monotonic-reconciliation rule needs.

use std::time::{Duration, Instant};

/// Visual classification bands pushed to the renderer in place of
/// style classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    #[default]
    Normal,
    /// Proc window currently active (elevated urgency)
    Active,
    Low,
    Mid,
    High,
    Full,
    /// Out of range of the current target
    Far,
    Fire,
    Ice,
    Bright,
    /// Resource stacks will overcap before they can be spent
    Overcap,
}

/// A countdown box for cooldowns and proc windows.
#[derive(Debug, Clone)]
pub struct TimerBox {
    duration: f32,
    started: Option<Instant>,
    pub threshold: f32,
    pub value_scale: f32,
    pub classification: Classification,
    pub notify_when_expired: bool,
    notified: bool,
}

impl Default for TimerBox {
    fn default() -> Self {
        TimerBox {
            duration: 0.0,
            started: None,
            threshold: 0.0,
            value_scale: 1.0,
            classification: Classification::Normal,
            notify_when_expired: false,
            notified: false,
        }
    }
}

impl TimerBox {
    pub fn with_threshold(threshold: f32) -> TimerBox {
        TimerBox {
            threshold,
            ..TimerBox::default()
        }
    }

    /// Restart the countdown. A non-positive duration clears the box.
    pub fn set_duration(&mut self, now: Instant, secs: f32) {
        if secs > 0.0 {
            self.duration = secs;
            self.started = Some(now);
        } else {
            self.duration = 0.0;
            self.started = None;
        }
        self.notified = false;
    }

    pub fn clear(&mut self) {
        self.duration = 0.0;
        self.started = None;
        self.notified = false;
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> f32 {
        match self.started {
            Some(start) => now.saturating_duration_since(start).as_secs_f32(),
            None => 0.0,
        }
    }

    pub fn remaining(&self, now: Instant) -> f32 {
        (self.duration - self.elapsed(now)).max(0.0)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.started.is_some() && self.remaining(now) <= 0.0
    }

    pub fn below_threshold(&self, now: Instant) -> bool {
        self.is_running() && self.remaining(now) < self.threshold
    }

    /// One-shot expiry notification; true exactly once per countdown
    /// when `notify_when_expired` is set.
    pub fn take_expiry(&mut self, now: Instant) -> bool {
        if self.notify_when_expired && !self.notified && self.is_expired(now) {
            self.notified = true;
            return true;
        }
        false
    }
}

/// A filling bar for HP/MP/CP/GP-style resources.
#[derive(Debug, Clone, Default)]
pub struct ResourceBar {
    pub value: u32,
    pub max: u32,
    /// Shield or other overlay amount drawn past `value`
    pub extra: u32,
    pub classification: Classification,
}

impl ResourceBar {
    pub fn set(&mut self, value: u32, max: u32) {
        self.value = value;
        self.max = max;
    }
}

/// A numeric gauge readout (stack counts, charge amounts).
#[derive(Debug, Clone, Default)]
pub struct ResourceBox {
    pub text: String,
    pub classification: Classification,
}

impl ResourceBox {
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

/// A plain countdown bar (pull timer, combo window), optionally looping.
#[derive(Debug, Clone, Default)]
pub struct TimerBar {
    duration: f32,
    started: Option<Instant>,
    pub looping: bool,
    pub classification: Classification,
}

impl TimerBar {
    pub fn set_duration(&mut self, now: Instant, secs: f32) {
        if secs > 0.0 {
            self.duration = secs;
            self.started = Some(now);
        } else {
            self.duration = 0.0;
            self.started = None;
        }
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn remaining(&self, now: Instant) -> f32 {
        match self.started {
            Some(start) => {
                let elapsed = now.saturating_duration_since(start).as_secs_f32();
                if self.looping && self.duration > 0.0 {
                    self.duration - elapsed % self.duration
                } else {
                    (self.duration - elapsed).max(0.0)
                }
            }
            None => 0.0,
        }
    }
}

/// A single cancellable deferred action slot.
///
/// Delayed state transitions (proc downgrades, latch expiries) are
/// explicit deadlines owned by the state that scheduled them. A new
/// schedule replaces the old deadline, reset cancels it, and `fire`
/// drains the action once the deadline passes; a cancelled deferral can
/// never run late.
#[derive(Debug, Clone)]
pub struct DeferredSlot<A> {
    pending: Option<(Instant, A)>,
}

impl<A> Default for DeferredSlot<A> {
    fn default() -> Self {
        DeferredSlot { pending: None }
    }
}

impl<A> DeferredSlot<A> {
    pub fn schedule(&mut self, now: Instant, delay: Duration, action: A) {
        self.pending = Some((now + delay, action));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Take the action if its deadline has passed.
    pub fn fire(&mut self, now: Instant) -> Option<A> {
        match &self.pending {
            Some((at, _)) if now >= *at => self.pending.take().map(|(_, a)| a),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn timer_box_counts_down_and_expires() {
        let t0 = Instant::now();
        let mut b = TimerBox::with_threshold(5.0);
        b.set_duration(t0, 10.0);
        assert!((b.remaining(t0) - 10.0).abs() < f32::EPSILON);
        let t6 = t0 + Duration::from_secs(6);
        assert!(b.below_threshold(t6));
        assert!(!b.is_expired(t6));
        assert!(b.is_expired(t0 + Duration::from_secs(11)));
    }

    #[test]
    fn expiry_notification_fires_once() {
        let t0 = Instant::now();
        let mut b = TimerBox::default();
        b.notify_when_expired = true;
        b.set_duration(t0, 1.0);
        let t2 = t0 + Duration::from_secs(2);
        assert!(b.take_expiry(t2));
        assert!(!b.take_expiry(t2));
        // New countdown re-arms the notification
        b.set_duration(t2, 1.0);
        assert!(b.take_expiry(t2 + Duration::from_secs(2)));
    }

    #[test]
    fn deferred_slot_replaces_and_cancels() {
        let t0 = Instant::now();
        let mut slot: DeferredSlot<u8> = DeferredSlot::default();
        slot.schedule(t0, Duration::from_secs(10), 1);
        // Superseding schedule wins
        slot.schedule(t0, Duration::from_secs(5), 2);
        assert_eq!(slot.fire(t0 + Duration::from_secs(6)), Some(2));
        assert_eq!(slot.fire(t0 + Duration::from_secs(60)), None);

        slot.schedule(t0, Duration::from_secs(1), 3);
        slot.cancel();
        assert_eq!(slot.fire(t0 + Duration::from_secs(60)), None);
    }

    #[test]
    fn looping_timer_bar_wraps() {
        let t0 = Instant::now();
        let mut bar = TimerBar::default();
        bar.looping = true;
        bar.set_duration(t0, 3.0);
        let r = bar.remaining(t0 + Duration::from_secs(4));
        assert!(r > 0.0 && r <= 3.0);
    }
}
