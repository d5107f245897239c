//! Per-job derived state machines
//!
//! One tracker per supported job, selected at job-change time. The
//! variant owns every display object and deferral for that job, so
//! switching jobs drops the old state wholesale and a fresh tracker
//! starts with nothing pending.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::combo::ComboTransition;
use crate::error::EngineError;
use crate::game_data::{effect, Job};
use crate::player::PlayerState;

mod blu;
mod drk;
mod nin;
mod sch;
mod whm;

pub use blu::BluTracker;
pub use drk::DrkTracker;
pub use nin::NinTracker;
pub use sch::SchTracker;
pub use whm::WhmTracker;

/// Gauge payload delivered with player snapshots, keyed by job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "job", rename_all = "UPPERCASE", rename_all_fields = "camelCase")]
pub enum JobDetail {
    Whm {
        lily_stacks: u8,
        lily_milliseconds: u32,
        bloodlily_stacks: u8,
    },
    Sch {
        aetherflow_stacks: u8,
        fairy_gauge: u8,
        fairy_milliseconds: u32,
    },
    Nin {
        ninki_amount: u8,
        huton_milliseconds: u32,
    },
    Drk {
        blood: u8,
        darkside_milliseconds: u32,
    },
}

#[derive(Debug, Default)]
pub enum JobTracker {
    /// Jobs without a dedicated tracker still get the generic bars.
    #[default]
    None,
    Whm(WhmTracker),
    Sch(SchTracker),
    Nin(NinTracker),
    Drk(DrkTracker),
    Blu(BluTracker),
}

impl JobTracker {
    pub fn for_job(job: Job) -> JobTracker {
        match job {
            Job::Whm => JobTracker::Whm(WhmTracker::new()),
            Job::Sch => JobTracker::Sch(SchTracker::new()),
            Job::Nin => JobTracker::Nin(NinTracker::new()),
            Job::Drk => JobTracker::Drk(DrkTracker::new()),
            Job::Blu => JobTracker::Blu(BluTracker::new()),
            _ => JobTracker::None,
        }
    }

    /// An ability the local player used.
    pub fn on_ability(
        &mut self,
        id: &str,
        player: &PlayerState,
        now: Instant,
    ) -> Result<(), EngineError> {
        match self {
            JobTracker::None => Ok(()),
            JobTracker::Whm(t) => {
                t.on_ability(id, now);
                Ok(())
            }
            JobTracker::Sch(t) => {
                t.on_ability(id, now);
                Ok(())
            }
            JobTracker::Nin(t) => {
                t.on_ability(id, now);
                Ok(())
            }
            JobTracker::Drk(t) => {
                t.on_ability(id, now);
                Ok(())
            }
            JobTracker::Blu(t) => t.on_ability(id, player, now),
        }
    }

    /// Effect gained by the local player. Returns true when a speed
    /// buff flag changed and the GCDs must be recomputed.
    pub fn on_gain_effect(
        &mut self,
        effect_id: &str,
        player: &mut PlayerState,
        now: Instant,
    ) -> bool {
        match self {
            JobTracker::Whm(t) => t.on_gain_effect(effect_id, player),
            JobTracker::Nin(t) => {
                t.on_gain_effect(effect_id, now);
                false
            }
            _ => false,
        }
    }

    pub fn on_lose_effect(&mut self, effect_id: &str, player: &mut PlayerState) -> bool {
        match self {
            JobTracker::Whm(t) => t.on_lose_effect(effect_id, player),
            JobTracker::Nin(t) => {
                t.on_lose_effect(effect_id);
                false
            }
            _ => false,
        }
    }

    /// Gauge snapshot. Returns true when a speed buff flag changed.
    pub fn on_snapshot(&mut self, detail: &JobDetail, player: &mut PlayerState, now: Instant) -> bool {
        match (self, detail) {
            (JobTracker::Whm(t), JobDetail::Whm { lily_stacks, lily_milliseconds, bloodlily_stacks }) => {
                t.on_snapshot(*lily_stacks, *lily_milliseconds, *bloodlily_stacks);
                false
            }
            (JobTracker::Sch(t), JobDetail::Sch { aetherflow_stacks, fairy_gauge, fairy_milliseconds }) => {
                t.on_snapshot(*aetherflow_stacks, *fairy_gauge, *fairy_milliseconds, player, now);
                false
            }
            (JobTracker::Nin(t), JobDetail::Nin { ninki_amount, huton_milliseconds }) => {
                t.on_snapshot(*ninki_amount, *huton_milliseconds, player, now)
            }
            (JobTracker::Drk(t), JobDetail::Drk { blood, darkside_milliseconds }) => {
                t.on_snapshot(*blood, *darkside_milliseconds, now);
                false
            }
            _ => false,
        }
    }

    /// Recompute thresholds and scales after a GCD change.
    pub fn on_stat_change(&mut self, gcd_skill: f64, gcd_spell: f64) {
        match self {
            JobTracker::None => {}
            JobTracker::Whm(t) => t.on_stat_change(gcd_spell),
            JobTracker::Sch(t) => t.on_stat_change(gcd_spell),
            JobTracker::Nin(t) => t.on_stat_change(gcd_skill),
            JobTracker::Drk(t) => t.on_stat_change(gcd_skill),
            JobTracker::Blu(t) => t.on_stat_change(gcd_spell),
        }
    }

    pub fn on_combo(&mut self, transition: &ComboTransition, now: Instant) {
        match self {
            JobTracker::Nin(t) => t.on_combo(transition, now),
            JobTracker::Drk(t) => t.on_combo(transition, now),
            _ => {}
        }
    }

    /// A dot tick attributed to the local player on their main target.
    pub fn on_dot_tick(&mut self, now: Instant) {
        match self {
            JobTracker::Whm(t) => t.on_dot_tick(now),
            JobTracker::Sch(t) => t.on_dot_tick(now),
            JobTracker::Blu(t) => t.on_dot_tick(now),
            _ => {}
        }
    }

    /// Fire due deferrals and drain one-shot expiry alerts. Returns
    /// the names of timers that just expired with notification set.
    pub fn tick(&mut self, player: &PlayerState, now: Instant) -> Vec<&'static str> {
        match self {
            JobTracker::None => Vec::new(),
            JobTracker::Whm(t) => t.tick(now),
            JobTracker::Sch(t) => t.tick(now),
            JobTracker::Nin(t) => {
                t.tick(player, now);
                Vec::new()
            }
            JobTracker::Drk(t) => {
                t.tick(player, now);
                Vec::new()
            }
            JobTracker::Blu(t) => {
                t.tick(now);
                Vec::new()
            }
        }
    }

    /// Zero every box and cancel pending deferrals. Safe to call on a
    /// tracker that never received an event.
    pub fn reset(&mut self, player: &PlayerState) {
        match self {
            JobTracker::None => {}
            JobTracker::Whm(t) => t.reset(),
            JobTracker::Sch(t) => t.reset(),
            JobTracker::Nin(t) => t.reset(player),
            JobTracker::Drk(t) => t.reset(player),
            JobTracker::Blu(t) => t.reset(),
        }
    }

    /// Effect ids whose presence on hostiles this job wants followed
    /// for tick attribution.
    pub fn tracked_dot_effects(&self) -> &'static [&'static str] {
        match self {
            JobTracker::Whm(_) => &[effect::DIA, effect::AERO, effect::AERO2],
            JobTracker::Sch(_) => &[effect::BIO, effect::BIO2, effect::BIOLYSIS],
            JobTracker::Blu(_) => &[effect::BLEEDING],
            _ => &[],
        }
    }

    pub fn has_pending_deferrals(&self) -> bool {
        match self {
            JobTracker::Nin(t) => t.has_pending_deferrals(),
            JobTracker::Drk(t) => t.has_pending_deferrals(),
            _ => false,
        }
    }
}
