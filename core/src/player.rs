//! Local player state and derived recast timing
//!
//! Holds the slow-changing character snapshot (job, level, resource
//! pools, speed stats) plus the transient speed buffs that feed the
//! global-cooldown derivation. Timer thresholds around the codebase
//! are expressed in multiples of the current GCD, so both the skill-
//! and spell-speed variants are recomputed whenever an input changes.

use tracing::error;

use crate::error::EngineError;
use crate::game_data::{self, Job};

pub const DEFAULT_ACTION_DELAY_MS: f64 = 2500.0;

/// Active effects that scale recast speed. Which fields matter depends
/// on the job; the rest stay at their defaults.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SpeedBuffs {
    pub presence_of_mind: bool,
    pub shifu: bool,
    pub huton: bool,
    pub paeon_stacks: u8,
    pub muse_stacks: u8,
    pub circle_of_power: bool,
}

#[derive(Debug, Default, Clone)]
pub struct PlayerState {
    pub name: String,
    pub id: Option<String>,
    pub job: Job,
    pub level: u8,

    pub hp: u32,
    pub max_hp: u32,
    pub shield: u32,
    pub mp: u32,
    pub prev_mp: u32,
    pub max_mp: u32,
    pub cp: u32,
    pub max_cp: u32,
    pub gp: u32,
    pub max_gp: u32,

    pub skill_speed: u32,
    pub spell_speed: u32,
    pub speed_buffs: SpeedBuffs,
    pub umbral_stacks: i32,

    pub gcd_skill: f64,
    pub gcd_spell: f64,

    /// Yalms to the current target, negative when there is none.
    pub distance: i32,
}

impl PlayerState {
    pub fn new() -> PlayerState {
        PlayerState {
            distance: -1,
            gcd_skill: DEFAULT_ACTION_DELAY_MS / 1000.0,
            gcd_spell: DEFAULT_ACTION_DELAY_MS / 1000.0,
            ..Default::default()
        }
    }

    /// Recompute both GCD variants from the current stats and buffs.
    pub fn recompute_gcds(&mut self) -> Result<(), EngineError> {
        self.gcd_skill = self.gcd_from_stat(self.skill_speed, DEFAULT_ACTION_DELAY_MS)?;
        self.gcd_spell = self.gcd_from_stat(self.spell_speed, DEFAULT_ACTION_DELAY_MS)?;
        Ok(())
    }

    /// Recast in seconds for an action with the given base delay,
    /// derived from a speed stat and the active speed buffs.
    pub fn gcd_from_stat(&self, stat: u32, action_delay_ms: f64) -> Result<f64, EngineError> {
        if stat == 0 {
            return Ok(action_delay_ms / 1000.0);
        }

        let mut type1: f64 = 0.0;
        let mut type2: f64 = 0.0;
        match self.job {
            Job::Blm if self.speed_buffs.circle_of_power => type1 += 15.0,
            Job::Whm if self.speed_buffs.presence_of_mind => type1 += 20.0,
            Job::Sam if self.speed_buffs.shifu => {
                type1 += if self.level > 77 { 13.0 } else { 10.0 };
            }
            Job::Nin if self.speed_buffs.huton => type2 += 15.0,
            Job::Mnk => {
                type2 += 5.0 * f64::from(game_data::lightning_stacks_by_level(self.level));
            }
            Job::Brd => {
                type2 += 4.0 * f64::from(self.speed_buffs.paeon_stacks);
                type2 += match self.speed_buffs.muse_stacks {
                    1 => 1.0,
                    2 => 2.0,
                    3 => 4.0,
                    4 => 12.0,
                    _ => 0.0,
                };
            }
            _ => {}
        }

        let Some([sub, div]) = game_data::level_mod(self.level) else {
            error!(level = self.level, "no speed modifier entry for level");
            return Err(EngineError::MissingLevelMod { level: self.level });
        };

        let sub = f64::from(sub);
        let div = f64::from(div);
        let stat = f64::from(stat);

        let gcd_ms =
            (1000.0 - (130.0 * (stat - sub) / div).floor()).floor() * action_delay_ms / 1000.0;
        let a = (100.0 - type1) / 100.0;
        let b = (100.0 - type2) / 100.0;
        let gcd_c = (((a * gcd_ms).floor() * b).floor() * 100.0 / 100.0).floor();
        Ok(gcd_c / 1000.0)
    }
}
