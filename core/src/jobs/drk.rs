//! Dark Knight
//!
//! Three buff windows share the same shape: a short active window with
//! a fixed threshold, then a deferred flip to the long cooldown view.
//! Darkside follows the monotonic snapshot rule like huton.

use std::time::{Duration, Instant};

use crate::combo::ComboTransition;
use crate::display::{Classification, DeferredSlot, ResourceBox, TimerBar, TimerBox};
use crate::game_data::ability;
use crate::player::PlayerState;

#[derive(Debug)]
pub struct DrkTracker {
    pub blood: ResourceBox,
    pub darkside: TimerBox,
    pub blood_weapon: TimerBox,
    pub delirium: TimerBox,
    pub living_shadow: TimerBox,
    pub combo: TimerBar,
    blood_weapon_downgrade: DeferredSlot<()>,
    delirium_downgrade: DeferredSlot<()>,
    living_shadow_downgrade: DeferredSlot<()>,
}

impl DrkTracker {
    pub fn new() -> DrkTracker {
        DrkTracker {
            blood: ResourceBox::default(),
            darkside: TimerBox::with_threshold(10.0),
            blood_weapon: TimerBox::default(),
            delirium: TimerBox::default(),
            living_shadow: TimerBox::default(),
            combo: TimerBar::default(),
            blood_weapon_downgrade: DeferredSlot::default(),
            delirium_downgrade: DeferredSlot::default(),
            living_shadow_downgrade: DeferredSlot::default(),
        }
    }

    pub fn on_ability(&mut self, id: &str, now: Instant) {
        match id {
            ability::BLOOD_WEAPON => {
                self.blood_weapon.set_duration(now, 10.0);
                self.blood_weapon.threshold = 10.0;
                self.blood_weapon.classification = Classification::Active;
                self.blood_weapon_downgrade
                    .schedule(now, Duration::from_secs(10), ());
            }
            ability::DELIRIUM => {
                self.delirium.set_duration(now, 10.5);
                self.delirium.threshold = 20.0;
                self.delirium.classification = Classification::Active;
                self.delirium_downgrade
                    .schedule(now, Duration::from_secs(10), ());
            }
            ability::LIVING_SHADOW => {
                self.living_shadow.set_duration(now, 24.0);
                self.living_shadow.threshold = 24.0;
                self.living_shadow.classification = Classification::Active;
                self.living_shadow_downgrade
                    .schedule(now, Duration::from_secs(24), ());
            }
            _ => {}
        }
    }

    pub fn on_snapshot(&mut self, blood: u8, darkside_milliseconds: u32, now: Instant) {
        self.blood.set_text(blood.to_string());
        self.blood.classification = if blood < 50 {
            Classification::Low
        } else if blood < 90 {
            Classification::Mid
        } else {
            Classification::Normal
        };

        let seconds = darkside_milliseconds as f32 / 1000.0;
        if !self.darkside.is_running() || seconds > self.darkside.remaining(now) {
            self.darkside.set_duration(now, seconds);
        }
    }

    pub fn on_stat_change(&mut self, gcd_skill: f64) {
        let gcd = gcd_skill as f32;
        self.blood_weapon.value_scale = gcd;
        self.delirium.value_scale = gcd;
        self.living_shadow.value_scale = gcd;
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
        let gcd = player.gcd_skill as f32;
        if self.blood_weapon_downgrade.fire(now).is_some() {
            self.blood_weapon.set_duration(now, 50.0);
            self.blood_weapon.threshold = gcd * 2.0;
            self.blood_weapon.classification = Classification::Normal;
        }
        if self.delirium_downgrade.fire(now).is_some() {
            self.delirium.set_duration(now, 79.5);
            self.delirium.threshold = gcd * 2.0;
            self.delirium.classification = Classification::Normal;
        }
        if self.living_shadow_downgrade.fire(now).is_some() {
            self.living_shadow.set_duration(now, 96.0);
            self.living_shadow.threshold = gcd * 4.0;
            self.living_shadow.classification = Classification::Normal;
        }
    }

    pub fn reset(&mut self, player: &PlayerState) {
        let gcd = player.gcd_skill as f32;
        self.combo = TimerBar::default();
        self.blood_weapon.clear();
        self.blood_weapon.threshold = gcd * 2.0;
        self.blood_weapon.classification = Classification::Normal;
        self.delirium.clear();
        self.delirium.threshold = gcd * 2.0;
        self.delirium.classification = Classification::Normal;
        self.living_shadow.clear();
        self.living_shadow.threshold = gcd * 4.0;
        self.living_shadow.classification = Classification::Normal;
        self.darkside.clear();
        self.blood_weapon_downgrade.cancel();
        self.delirium_downgrade.cancel();
        self.living_shadow_downgrade.cancel();
    }

    pub fn has_pending_deferrals(&self) -> bool {
        self.blood_weapon_downgrade.is_pending()
            || self.delirium_downgrade.is_pending()
            || self.living_shadow_downgrade.is_pending()
    }
}
