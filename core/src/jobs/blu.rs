//! Blue Mage
//!
//! Off-guard and Peculiar Light share a 60s base recast that scales
//! with spell speed, so the displayed cooldown reuses the recast
//! formula with the long base delay.

use std::time::Instant;

use crate::display::{TimerBar, TimerBox};
use crate::error::EngineError;
use crate::game_data::ability;
use crate::player::PlayerState;

const OFF_GUARD_BASE_DELAY_MS: f64 = 60_000.0;

#[derive(Debug)]
pub struct BluTracker {
    pub off_guard: TimerBox,
    pub torment: TimerBox,
    pub lucid: TimerBox,
    pub dot_tick: TimerBar,
}

impl BluTracker {
    pub fn new() -> BluTracker {
        BluTracker {
            off_guard: TimerBox::default(),
            torment: TimerBox::default(),
            lucid: TimerBox::default(),
            dot_tick: TimerBar::default(),
        }
    }

    pub fn on_ability(
        &mut self,
        id: &str,
        player: &PlayerState,
        now: Instant,
    ) -> Result<(), EngineError> {
        match id {
            ability::OFF_GUARD | ability::PECULIAR_LIGHT => {
                let recast = player.gcd_from_stat(player.spell_speed, OFF_GUARD_BASE_DELAY_MS)?;
                self.off_guard.set_duration(now, recast as f32);
            }
            ability::SONG_OF_TORMENT => self.torment.set_duration(now, 30.0),
            // Animation delay before the bleed lands.
            ability::AETHERIAL_SPARK => self.torment.set_duration(now, 15.0 + 0.5),
            ability::NIGHTBLOOM => self.torment.set_duration(now, 60.0 + 0.8),
            ability::LUCID_DREAMING => self.lucid.set_duration(now, 60.0),
            _ => {}
        }
        Ok(())
    }

    pub fn on_stat_change(&mut self, gcd_spell: f64) {
        let gcd = gcd_spell as f32;
        self.off_guard.threshold = gcd * 2.0;
        self.torment.threshold = gcd * 3.0;
        self.lucid.threshold = gcd + 1.0;
    }

    pub fn on_dot_tick(&mut self, now: Instant) {
        self.dot_tick.set_duration(now, crate::game_data::MP_TICK_INTERVAL);
    }

    pub fn tick(&mut self, _now: Instant) {}

    pub fn reset(&mut self) {
        self.torment.clear();
        self.off_guard.clear();
        self.lucid.clear();
        self.dot_tick = TimerBar::default();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::BluTracker;
    use crate::game_data::{ability, Job};
    use crate::player::PlayerState;

    fn player(spell_speed: u32) -> PlayerState {
        PlayerState {
            job: Job::Blu,
            level: 80,
            spell_speed,
            ..PlayerState::new()
        }
    }

    #[test]
    fn off_guard_uses_the_long_recast() {
        let t0 = Instant::now();
        let mut t = BluTracker::new();

        t.on_ability(ability::OFF_GUARD, &player(380), t0).unwrap();
        assert_eq!(t.off_guard.duration(), 60.0);

        // Spell speed shortens it.
        t.on_ability(ability::PECULIAR_LIGHT, &player(1400), t0).unwrap();
        assert!(t.off_guard.duration() < 60.0);
    }

    #[test]
    fn torment_refreshers_carry_animation_delay() {
        let t0 = Instant::now();
        let mut t = BluTracker::new();

        t.on_ability(ability::SONG_OF_TORMENT, &player(380), t0).unwrap();
        assert_eq!(t.torment.duration(), 30.0);
        t.on_ability(ability::AETHERIAL_SPARK, &player(380), t0).unwrap();
        assert_eq!(t.torment.duration(), 15.5);
        t.on_ability(ability::NIGHTBLOOM, &player(380), t0).unwrap();
        assert_eq!(t.torment.duration(), 60.8);
    }

    #[test]
    fn unknown_level_propagates_the_table_error() {
        let t0 = Instant::now();
        let mut t = BluTracker::new();
        let mut p = player(380);
        p.level = 0;
        assert!(t.on_ability(ability::OFF_GUARD, &p, t0).is_err());
    }
}
