//! Scholar
//!
//! The aetherflow box doubles as an overcap warning: when the stacks
//! on hand could not all be spent before Aetherflow comes off cooldown
//! the stack readout flips to the overcap classification.

use std::time::Instant;

use crate::display::{Classification, ResourceBox, TimerBar, TimerBox};
use crate::game_data::ability;
use crate::player::PlayerState;

#[derive(Debug)]
pub struct SchTracker {
    pub aetherflow_stacks: ResourceBox,
    pub fairy_gauge: ResourceBox,
    pub bio: TimerBox,
    pub aetherflow: TimerBox,
    pub lucid: TimerBox,
    pub dot_tick: TimerBar,
}

impl SchTracker {
    pub fn new() -> SchTracker {
        let mut bio = TimerBox::default();
        bio.notify_when_expired = true;
        SchTracker {
            aetherflow_stacks: ResourceBox::default(),
            fairy_gauge: ResourceBox::default(),
            bio,
            aetherflow: TimerBox::default(),
            lucid: TimerBox::default(),
            dot_tick: TimerBar::default(),
        }
    }

    pub fn on_ability(&mut self, id: &str, now: Instant) {
        match id {
            ability::BIO | ability::BIO2 | ability::BIOLYSIS => self.bio.set_duration(now, 30.0),
            ability::AETHERFLOW => {
                self.aetherflow.set_duration(now, 60.0);
                self.aetherflow_stacks.classification = Classification::Normal;
            }
            ability::LUCID_DREAMING => self.lucid.set_duration(now, 60.0),
            _ => {}
        }
    }

    pub fn on_snapshot(
        &mut self,
        aetherflow: u8,
        fairy_gauge: u8,
        fairy_milliseconds: u32,
        player: &PlayerState,
        now: Instant,
    ) {
        self.aetherflow_stacks.set_text(aetherflow.to_string());

        // While seraph is out the gauge box shows its countdown.
        if fairy_milliseconds != 0 {
            let seconds = fairy_milliseconds.div_ceil(1000);
            self.fairy_gauge.set_text(seconds.to_string());
            self.fairy_gauge.classification = Classification::Bright;
        } else {
            self.fairy_gauge.set_text(fairy_gauge.to_string());
            self.fairy_gauge.classification = Classification::Normal;
        }

        // Threshold tracks how many casts the remaining stacks cover.
        let stacks = if aetherflow == 0 { 1 } else { aetherflow };
        self.aetherflow.threshold = player.gcd_spell as f32 * f32::from(stacks) + 1.0;

        let until_ready = self.aetherflow.remaining(now);
        self.aetherflow_stacks.classification = if f32::from(aetherflow) * 5.0 >= until_ready {
            Classification::Overcap
        } else {
            Classification::Normal
        };
    }

    pub fn on_stat_change(&mut self, gcd_spell: f64) {
        let gcd = gcd_spell as f32;
        self.bio.value_scale = gcd;
        self.bio.threshold = gcd + 1.0;
        self.aetherflow.value_scale = gcd;
        self.lucid.value_scale = gcd;
        self.lucid.threshold = gcd + 1.0;
    }

    pub fn on_dot_tick(&mut self, now: Instant) {
        self.dot_tick.set_duration(now, crate::game_data::MP_TICK_INTERVAL);
    }

    pub fn tick(&mut self, now: Instant) -> Vec<&'static str> {
        let mut expired = Vec::new();
        if self.bio.take_expiry(now) {
            expired.push("bio");
        }
        expired
    }

    pub fn reset(&mut self) {
        self.bio.clear();
        self.aetherflow.clear();
        self.lucid.clear();
        self.dot_tick = TimerBar::default();
    }
}
