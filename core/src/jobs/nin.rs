//! Ninja
//!
//! Huton drives both a countdown box and the haste flag that feeds the
//! GCD derivation. The ninjutsu cooldown is latched: only the first
//! Mudra gain after a re-arm starts it, and Kassatsu suppresses the
//! latch for its own cast.

use std::time::{Duration, Instant};

use crate::combo::ComboTransition;
use crate::display::{Classification, DeferredSlot, ResourceBox, TimerBar, TimerBox};
use crate::game_data::{ability, effect};
use crate::player::PlayerState;

const TRICK_ATTACK_WINDOW_SECS: f32 = 15.0;
const TRICK_ATTACK_COOLDOWN_SECS: f32 = 45.0;

#[derive(Debug)]
pub struct NinTracker {
    pub ninki: ResourceBox,
    pub huton: TimerBox,
    pub trick_attack: TimerBox,
    pub bunshin: TimerBox,
    pub ninjutsu: TimerBox,
    pub combo: TimerBar,
    mudra_armed: bool,
    trick_downgrade: DeferredSlot<()>,
}

impl NinTracker {
    pub fn new() -> NinTracker {
        NinTracker {
            ninki: ResourceBox::default(),
            huton: TimerBox::with_threshold(20.0),
            trick_attack: TimerBox::default(),
            bunshin: TimerBox::default(),
            ninjutsu: TimerBox::default(),
            combo: TimerBar::default(),
            mudra_armed: true,
            trick_downgrade: DeferredSlot::default(),
        }
    }

    pub fn on_ability(&mut self, id: &str, now: Instant) {
        match id {
            ability::BUNSHIN => self.bunshin.set_duration(now, 90.0),
            ability::HIDE => self.ninjutsu.clear(),
            ability::TRICK_ATTACK => {
                self.trick_attack.set_duration(now, TRICK_ATTACK_WINDOW_SECS);
                self.trick_attack.threshold = 1000.0;
                self.trick_attack.classification = Classification::Active;
                self.trick_downgrade.schedule(
                    now,
                    Duration::from_secs_f32(TRICK_ATTACK_WINDOW_SECS),
                    (),
                );
            }
            _ => {}
        }
    }

    pub fn on_gain_effect(&mut self, effect_id: &str, now: Instant) {
        match effect_id {
            effect::MUDRA => {
                if !self.mudra_armed {
                    return;
                }
                let old = self.ninjutsu.remaining(now);
                if old > 0.0 {
                    self.ninjutsu.set_duration(now, old + 20.0);
                } else {
                    // First mudra; subtract the cast snapshot lag.
                    self.ninjutsu.set_duration(now, 20.0 - 0.5);
                }
                self.mudra_armed = false;
            }
            effect::KASSATSU => self.mudra_armed = false,
            _ => {}
        }
    }

    pub fn on_lose_effect(&mut self, effect_id: &str) {
        if effect_id == effect::MUDRA || effect_id == effect::KASSATSU {
            self.mudra_armed = true;
        }
    }

    /// Returns true when the huton haste flag flipped.
    pub fn on_snapshot(
        &mut self,
        ninki: u8,
        huton_milliseconds: u32,
        player: &mut PlayerState,
        now: Instant,
    ) -> bool {
        let huton_up = huton_milliseconds > 0;
        let speed_changed = player.speed_buffs.huton != huton_up;
        player.speed_buffs.huton = huton_up;

        self.ninki.set_text(ninki.to_string());
        self.ninki.classification = if ninki < 50 {
            Classification::Low
        } else if ninki >= 90 {
            Classification::High
        } else {
            Classification::Normal
        };

        // The snapshot may lag behind an extension we already applied;
        // only ever raise the displayed remaining.
        let seconds = huton_milliseconds as f32 / 1000.0;
        if !self.huton.is_running() || seconds > self.huton.remaining(now) {
            self.huton.set_duration(now, seconds);
        }

        speed_changed
    }

    pub fn on_stat_change(&mut self, gcd_skill: f64) {
        let gcd = gcd_skill as f32;
        self.trick_attack.value_scale = gcd;
        self.bunshin.value_scale = gcd;
        self.bunshin.threshold = gcd * 8.0;
        self.ninjutsu.value_scale = gcd;
        self.ninjutsu.threshold = gcd * 2.0;
    }

    pub fn on_combo(&mut self, transition: &ComboTransition, now: Instant) {
        self.combo.set_duration(now, 0.0);
        if transition.is_final {
            return;
        }
        if transition.skill.is_some() {
            self.combo.set_duration(now, 15.0);
        }
    }

    pub fn tick(&mut self, player: &PlayerState, now: Instant) {
        if self.trick_downgrade.fire(now).is_some() {
            self.trick_attack.set_duration(now, TRICK_ATTACK_COOLDOWN_SECS);
            self.trick_attack.threshold = player.gcd_skill as f32 * 4.0;
            self.trick_attack.classification = Classification::Normal;
        }
    }

    pub fn reset(&mut self, player: &PlayerState) {
        self.bunshin.clear();
        self.mudra_armed = true;
        self.ninjutsu.clear();
        self.trick_attack.clear();
        self.trick_attack.threshold = player.gcd_skill as f32 * 4.0;
        self.trick_attack.classification = Classification::Normal;
        self.huton.clear();
        self.combo = TimerBar::default();
        self.trick_downgrade.cancel();
    }

    pub fn has_pending_deferrals(&self) -> bool {
        self.trick_downgrade.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::NinTracker;
    use crate::display::Classification;
    use crate::game_data::{ability, effect};
    use crate::player::PlayerState;

    fn player() -> PlayerState {
        PlayerState {
            gcd_skill: 2.5,
            gcd_spell: 2.5,
            ..PlayerState::new()
        }
    }

    #[test]
    fn trick_attack_window_then_cooldown() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let p = player();

        t.on_ability(ability::TRICK_ATTACK, t0);
        assert_eq!(t.trick_attack.classification, Classification::Active);
        assert_eq!(t.trick_attack.duration(), 15.0);

        // Before the window ends nothing changes.
        t.tick(&p, t0 + Duration::from_secs(14));
        assert_eq!(t.trick_attack.classification, Classification::Active);

        let t15 = t0 + Duration::from_secs(15);
        t.tick(&p, t15);
        assert_eq!(t.trick_attack.classification, Classification::Normal);
        assert_eq!(t.trick_attack.duration(), 45.0);
        assert_eq!(t.trick_attack.threshold, 10.0);
    }

    #[test]
    fn recast_cancels_the_pending_downgrade() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let p = player();

        t.on_ability(ability::TRICK_ATTACK, t0);
        let t10 = t0 + Duration::from_secs(10);
        t.on_ability(ability::TRICK_ATTACK, t10);

        // The first deadline passes but was superseded.
        t.tick(&p, t0 + Duration::from_secs(16));
        assert_eq!(t.trick_attack.classification, Classification::Active);

        t.tick(&p, t10 + Duration::from_secs(15));
        assert_eq!(t.trick_attack.classification, Classification::Normal);
    }

    #[test]
    fn huton_snapshot_never_lowers_the_display() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let mut p = player();

        t.on_snapshot(50, 40_000, &mut p, t0);
        assert_eq!(t.huton.remaining(t0), 40.0);

        // A stale shorter report keeps the longer remaining.
        t.on_snapshot(50, 20_000, &mut p, t0);
        assert_eq!(t.huton.remaining(t0), 40.0);

        // A longer report raises it.
        t.on_snapshot(50, 55_000, &mut p, t0);
        assert_eq!(t.huton.remaining(t0), 55.0);
    }

    #[test]
    fn huton_toggles_the_haste_flag() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let mut p = player();

        assert!(t.on_snapshot(50, 40_000, &mut p, t0));
        assert!(p.speed_buffs.huton);
        assert!(!t.on_snapshot(50, 30_000, &mut p, t0 + Duration::from_secs(1)));
        assert!(t.on_snapshot(50, 0, &mut p, t0 + Duration::from_secs(2)));
        assert!(!p.speed_buffs.huton);
    }

    #[test]
    fn ninki_bands() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let mut p = player();

        t.on_snapshot(49, 0, &mut p, t0);
        assert_eq!(t.ninki.classification, Classification::Low);
        t.on_snapshot(50, 0, &mut p, t0);
        assert_eq!(t.ninki.classification, Classification::Normal);
        t.on_snapshot(90, 0, &mut p, t0);
        assert_eq!(t.ninki.classification, Classification::High);
    }

    #[test]
    fn mudra_latch_starts_the_ninjutsu_cooldown_once() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();

        t.on_gain_effect(effect::MUDRA, t0);
        assert_eq!(t.ninjutsu.duration(), 19.5);

        // Second mudra of the same ninjutsu: latch is disarmed.
        t.on_gain_effect(effect::MUDRA, t0 + Duration::from_secs(1));
        assert_eq!(t.ninjutsu.duration(), 19.5);

        // Mudra falls off, latch re-arms; the next gain extends what
        // is left on the clock.
        t.on_lose_effect(effect::MUDRA);
        let t5 = t0 + Duration::from_secs(5);
        t.on_gain_effect(effect::MUDRA, t5);
        assert!((t.ninjutsu.remaining(t5) - (19.5 - 5.0 + 20.0)).abs() < 0.01);
    }

    #[test]
    fn kassatsu_suppresses_the_latch() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();

        t.on_gain_effect(effect::KASSATSU, t0);
        t.on_gain_effect(effect::MUDRA, t0);
        assert!(!t.ninjutsu.is_running());

        t.on_lose_effect(effect::KASSATSU);
        t.on_gain_effect(effect::MUDRA, t0 + Duration::from_secs(1));
        assert!(t.ninjutsu.is_running());
    }

    #[test]
    fn hide_zeroes_the_ninjutsu_cooldown() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();

        t.on_gain_effect(effect::MUDRA, t0);
        t.on_ability(ability::HIDE, t0 + Duration::from_secs(2));
        assert!(!t.ninjutsu.is_running());
    }

    #[test]
    fn reset_cancels_everything() {
        let t0 = Instant::now();
        let mut t = NinTracker::new();
        let p = player();

        t.on_ability(ability::TRICK_ATTACK, t0);
        t.on_ability(ability::BUNSHIN, t0);
        t.reset(&p);
        assert!(!t.has_pending_deferrals());
        assert!(!t.trick_attack.is_running());
        assert!(!t.bunshin.is_running());

        // Idempotent on a fresh tracker.
        let mut fresh = NinTracker::new();
        fresh.reset(&p);
        assert!(!fresh.has_pending_deferrals());
    }
}
