//! Injected configuration
//!
//! Hosts hand these in as data; every field has a default so partial
//! documents deserialize cleanly.

use serde::{Deserialize, Serialize};

use crate::locale::Lang;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobsOptions {
    /// Language the game client logs in; selects the pattern set.
    pub parser_language: Lang,

    /// HP fraction below which the bar turns low.
    pub low_health_threshold_percent: f64,
    /// HP fraction below which the bar turns mid.
    pub mid_health_threshold_percent: f64,

    /// Yalms beyond which offensive range is flagged.
    pub far_threshold_offence: i32,

    pub drk_low_mp_threshold: u32,
    pub drk_medium_mp_threshold: u32,
    pub pld_low_mp_threshold: u32,
    pub pld_medium_mp_threshold: u32,
    pub blm_low_mp_threshold: u32,
    pub blm_medium_mp_threshold: u32,

    /// GP value at which the gathering alarm fires; 0 disables it.
    pub gp_alarm_point: u32,

    /// Hide the food-buff warning while more than this many seconds
    /// remain; re-check when the horizon is crossed.
    pub hide_well_fed_above_seconds: f32,

    pub notify_expired_procs_in_combat: bool,
}

impl Default for JobsOptions {
    fn default() -> JobsOptions {
        JobsOptions {
            parser_language: Lang::default(),
            low_health_threshold_percent: 0.2,
            mid_health_threshold_percent: 0.8,
            far_threshold_offence: 24,
            drk_low_mp_threshold: 2999,
            drk_medium_mp_threshold: 5999,
            pld_low_mp_threshold: 3600,
            pld_medium_mp_threshold: 9400,
            blm_low_mp_threshold: 2399,
            blm_medium_mp_threshold: 3999,
            gp_alarm_point: 0,
            hide_well_fed_above_seconds: 15.0 * 60.0,
            notify_expired_procs_in_combat: true,
        }
    }
}

impl JobsOptions {
    /// MP bands for the jobs that watch their aggregate MP level.
    pub fn mp_thresholds(&self, job: crate::game_data::Job) -> Option<(u32, u32)> {
        use crate::game_data::Job;
        match job {
            Job::Drk => Some((self.drk_low_mp_threshold, self.drk_medium_mp_threshold)),
            Job::Pld => Some((self.pld_low_mp_threshold, self.pld_medium_mp_threshold)),
            Job::Blm => Some((self.blm_low_mp_threshold, self.blm_medium_mp_threshold)),
            _ => None,
        }
    }
}
