//! Session context
//!
//! Everything the orchestrator consults that is not player stats or a
//! tracker lives here as an explicit context object: identity, combat
//! and zone flags, the crafting state machine, and the latches that
//! gate notifications.

use std::time::Instant;

use serde::Deserialize;

use crate::display::DeferredSlot;
use crate::game_data::Job;
use crate::jobs::JobDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CraftingState {
    #[default]
    Idle,
    Crafting,
}

/// Player snapshot delivered by the host process.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerSnapshot {
    pub name: String,
    pub job: Job,
    pub level: u8,
    pub current_hp: u32,
    pub max_hp: u32,
    pub current_shield: u32,
    pub current_mp: u32,
    pub max_mp: u32,
    pub current_cp: u32,
    pub max_cp: u32,
    pub current_gp: u32,
    pub max_gp: u32,
    pub job_detail: Option<JobDetail>,
}

#[derive(Debug, Default)]
pub struct SessionState {
    pub me: String,
    pub in_combat: bool,
    pub content_type: Option<u32>,
    pub is_pvp_zone: bool,
    pub crafting: CraftingState,

    /// When the current food buff runs out; `None` when no food buff
    /// is up.
    pub food_expires_at: Option<Instant>,
    pub food_warning_visible: bool,

    /// Re-arms when GP drops below the alarm point so the alarm fires
    /// once per gathering cycle.
    pub gp_alarm_ready: bool,
    /// Suppresses the alarm briefly after drinking a cordial, whose GP
    /// jump would otherwise trip it.
    pub gp_potion: bool,
    pub(crate) gp_potion_reset: DeferredSlot<()>,

    pub party: Vec<String>,
}

impl SessionState {
    pub fn new() -> SessionState {
        SessionState::default()
    }

    pub fn food_remaining_secs(&self, now: Instant) -> Option<f32> {
        self.food_expires_at
            .map(|at| at.saturating_duration_since(now).as_secs_f32())
    }
}
