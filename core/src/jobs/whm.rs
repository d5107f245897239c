//! White Mage
//!
//! The lily counter counts up in the snapshot, so the displayed value
//! is the time until the next stack. Presence of Mind is the job's
//! type-1 haste and is reported upward so the GCDs get recomputed.

use std::time::Instant;

use crate::display::{Classification, ResourceBox, TimerBar, TimerBox};
use crate::game_data::{ability, effect};
use crate::player::PlayerState;

const LILY_CYCLE_SECS: u32 = 30;

#[derive(Debug)]
pub struct WhmTracker {
    pub lily: ResourceBox,
    pub lily_seconds: ResourceBox,
    pub blood_lily: ResourceBox,
    pub dia: TimerBox,
    pub assize: TimerBox,
    pub lucid: TimerBox,
    pub dot_tick: TimerBar,
}

impl WhmTracker {
    pub fn new() -> WhmTracker {
        let mut dia = TimerBox::default();
        dia.notify_when_expired = true;
        WhmTracker {
            lily: ResourceBox::default(),
            lily_seconds: ResourceBox::default(),
            blood_lily: ResourceBox::default(),
            dia,
            assize: TimerBox::default(),
            lucid: TimerBox::default(),
            dot_tick: TimerBar::default(),
        }
    }

    pub fn on_ability(&mut self, id: &str, now: Instant) {
        match id {
            // Aero's 18s plus cast-to-apply lag.
            ability::AERO | ability::AERO2 => self.dia.set_duration(now, 18.0 + 1.0),
            ability::DIA => self.dia.set_duration(now, 30.0),
            ability::ASSIZE => self.assize.set_duration(now, 45.0),
            ability::LUCID_DREAMING => self.lucid.set_duration(now, 60.0),
            _ => {}
        }
    }

    /// Returns true when the haste flag flipped.
    pub fn on_gain_effect(&mut self, effect_id: &str, player: &mut PlayerState) -> bool {
        if effect_id == effect::PRESENCE_OF_MIND && !player.speed_buffs.presence_of_mind {
            player.speed_buffs.presence_of_mind = true;
            return true;
        }
        false
    }

    pub fn on_lose_effect(&mut self, effect_id: &str, player: &mut PlayerState) -> bool {
        if effect_id == effect::PRESENCE_OF_MIND && player.speed_buffs.presence_of_mind {
            player.speed_buffs.presence_of_mind = false;
            return true;
        }
        false
    }

    pub fn on_snapshot(&mut self, lily_stacks: u8, lily_milliseconds: u32, bloodlily_stacks: u8) {
        // The gauge counts up, so floor gives the whole seconds spent.
        let lily_second = lily_milliseconds / 1000;

        self.lily.set_text(lily_stacks.to_string());
        if lily_stacks == 3 {
            self.lily_seconds.set_text("");
        } else {
            self.lily_seconds
                .set_text((LILY_CYCLE_SECS - lily_second.min(LILY_CYCLE_SECS)).to_string());
        }
        self.blood_lily.set_text(bloodlily_stacks.to_string());

        let nearly_full =
            lily_stacks == 2 && LILY_CYCLE_SECS.saturating_sub(lily_second) <= 5;
        self.lily_seconds.classification = if nearly_full || lily_stacks == 3 {
            Classification::Full
        } else {
            Classification::Normal
        };
    }

    pub fn on_stat_change(&mut self, gcd_spell: f64) {
        let gcd = gcd_spell as f32;
        for timer in [&mut self.dia, &mut self.assize, &mut self.lucid] {
            timer.value_scale = gcd;
            timer.threshold = gcd + 1.0;
        }
    }

    pub fn on_dot_tick(&mut self, now: Instant) {
        self.dot_tick.set_duration(now, crate::game_data::MP_TICK_INTERVAL);
    }

    pub fn tick(&mut self, now: Instant) -> Vec<&'static str> {
        let mut expired = Vec::new();
        if self.dia.take_expiry(now) {
            expired.push("dia");
        }
        expired
    }

    pub fn reset(&mut self) {
        self.dia.clear();
        self.assize.clear();
        self.lucid.clear();
        self.dot_tick = TimerBar::default();
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::WhmTracker;
    use crate::display::Classification;
    use crate::game_data::{ability, effect};
    use crate::player::PlayerState;

    #[test]
    fn dia_and_aero_set_different_durations() {
        let t0 = Instant::now();
        let mut t = WhmTracker::new();

        t.on_ability(ability::AERO, t0);
        assert_eq!(t.dia.duration(), 19.0);
        t.on_ability(ability::DIA, t0);
        assert_eq!(t.dia.duration(), 30.0);
    }

    #[test]
    fn dia_expiry_notifies_once() {
        let t0 = Instant::now();
        let mut t = WhmTracker::new();

        t.on_ability(ability::DIA, t0);
        let t31 = t0 + Duration::from_secs(31);
        assert_eq!(t.tick(t31), vec!["dia"]);
        assert!(t.tick(t31).is_empty());
    }

    #[test]
    fn lily_gauge_counts_down_to_the_next_stack() {
        let mut t = WhmTracker::new();

        t.on_snapshot(1, 12_000, 0);
        assert_eq!(t.lily_seconds.text, "18");
        assert_eq!(t.lily_seconds.classification, Classification::Normal);

        t.on_snapshot(2, 26_000, 1);
        assert_eq!(t.lily_seconds.classification, Classification::Full);

        t.on_snapshot(3, 0, 3);
        assert_eq!(t.lily_seconds.text, "");
        assert_eq!(t.lily_seconds.classification, Classification::Full);
    }

    #[test]
    fn presence_of_mind_reports_a_speed_change_once() {
        let mut t = WhmTracker::new();
        let mut p = PlayerState::new();

        assert!(t.on_gain_effect(effect::PRESENCE_OF_MIND, &mut p));
        assert!(!t.on_gain_effect(effect::PRESENCE_OF_MIND, &mut p));
        assert!(t.on_lose_effect(effect::PRESENCE_OF_MIND, &mut p));
        assert!(!p.speed_buffs.presence_of_mind);
    }

    #[test]
    fn stat_change_scales_every_timer() {
        let mut t = WhmTracker::new();
        t.on_stat_change(2.5);
        assert_eq!(t.dia.threshold, 3.5);
        assert_eq!(t.assize.threshold, 3.5);
        assert_eq!(t.lucid.threshold, 3.5);
    }
}
