//! Event orchestrator
//!
//! Owns every tracker and display object and routes host events into
//! them: tokenized log lines, player snapshots, and the lifecycle
//! callbacks. Time never comes from a clock here; every entry point
//! takes the caller's `now` so replay and tests drive it explicitly.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::combo::ComboTracker;
use crate::display::{Classification, ResourceBar, TimerBar};
use crate::dot::DotTracker;
use crate::effects::{bearer_for, EffectKey, EffectTracker};
use crate::error::EngineError;
use crate::game_data::{self, effect, Job};
use crate::jobs::JobTracker;
use crate::locale::{is_cordial_ability, LocaleRegexes};
use crate::net_log::{classify, EffectFields, LogEvent, RawLine};
use crate::options::JobsOptions;
use crate::player::PlayerState;
use crate::session::{CraftingState, PlayerSnapshot, SessionState};


const GP_POTION_SUPPRESS_SECS: u64 = 2;

/// One-shot events drained by `tick`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// GP crossed the configured alarm point.
    GpAlarm,
    /// A notify-on-expire timer ran out (e.g. a dot fell off).
    TimerExpired(&'static str),
}

pub struct EventProcessor {
    options: JobsOptions,
    pub session: SessionState,
    pub player: PlayerState,
    pub combo: ComboTracker,
    pub effects: EffectTracker,
    pub dot: DotTracker,
    pub job: JobTracker,
    locale: LocaleRegexes,

    pub health_bar: ResourceBar,
    pub mana_bar: ResourceBar,
    pub mp_ticker: TimerBar,
    pub cp_bar: ResourceBar,
    pub gp_bar: ResourceBar,
    pub pull_countdown: TimerBar,

    pending: Vec<Notification>,
}

impl EventProcessor {
    pub fn new(options: JobsOptions) -> Result<EventProcessor, EngineError> {
        let locale = LocaleRegexes::new(options.parser_language)?;
        Ok(EventProcessor {
            options,
            session: SessionState::new(),
            player: PlayerState::new(),
            combo: ComboTracker::new(),
            effects: EffectTracker::new(),
            dot: DotTracker::new(),
            job: JobTracker::default(),
            locale,
            health_bar: ResourceBar::default(),
            mana_bar: ResourceBar::default(),
            mp_ticker: TimerBar::default(),
            cp_bar: ResourceBar::default(),
            gp_bar: ResourceBar::default(),
            pull_countdown: TimerBar::default(),
            pending: Vec::new(),
        })
    }

    // ─── ingest ───

    pub fn process_line(&mut self, raw: &RawLine<'_>, now: Instant) -> Result<(), EngineError> {
        let Some(event) = classify(raw) else {
            return Ok(());
        };

        match event {
            LogEvent::GameLog { line } => self.on_game_log(line, now),
            LogEvent::ChangeZone { zone_id } => {
                // Content type is host-supplied; the line alone only
                // identifies the zone.
                self.on_zone_change(zone_id, self.session.content_type, now);
            }
            LogEvent::PlayerStats { skill_speed, spell_speed } => {
                self.player.skill_speed = skill_speed.unwrap_or(0);
                self.player.spell_speed = spell_speed.unwrap_or(0);
                self.refresh_gcds()?;
            }
            LogEvent::GainsEffect(fields) => self.on_gains_effect(&fields, now)?,
            LogEvent::LosesEffect(fields) => self.on_loses_effect(&fields, now)?,
            LogEvent::Ability(fields) => {
                let Some(id) = fields.id else {
                    return Ok(());
                };
                if fields.source == Some(self.session.me.as_str()) {
                    if let Some(transition) = self.combo.on_ability(id, now) {
                        self.job.on_combo(&transition, now);
                    }
                    self.job.on_ability(id, &self.player, now)?;
                    if let Some(target_id) = fields.target_id {
                        self.dot.on_self_ability(target_id);
                    }
                    if is_cordial_ability(id) {
                        self.session.gp_potion = true;
                        self.session.gp_potion_reset.schedule(
                            now,
                            Duration::from_secs(GP_POTION_SUPPRESS_SECS),
                            (),
                        );
                    }
                }
            }
            LogEvent::DotTick(fields) => {
                if self.dot.attribute_tick(&fields, now).is_some() {
                    self.job.on_dot_tick(now);
                }
            }
        }
        Ok(())
    }

    fn on_game_log(&mut self, line: &str, now: Instant) {
        if let Some(seconds) = self.locale.countdown_seconds(line) {
            self.set_pull_countdown(seconds, now);
        }
        if self.locale.is_countdown_cancel(line) {
            self.set_pull_countdown(0.0, now);
        }
        if self.player.job.is_crafting() {
            self.on_crafting_log(line);
        }
    }

    fn on_crafting_log(&mut self, line: &str) {
        match self.session.crafting {
            CraftingState::Idle => {
                if self.locale.matches_crafting_start(line) {
                    debug!("crafting started");
                    self.session.crafting = CraftingState::Crafting;
                }
            }
            CraftingState::Crafting => {
                if self.locale.matches_crafting_stop(line) {
                    self.session.crafting = CraftingState::Idle;
                } else if let Some(player) = self.locale.crafting_finish_player(line) {
                    // An unattributed finish line, or one naming us.
                    if player.is_none() || player == Some(self.session.me.as_str()) {
                        self.session.crafting = CraftingState::Idle;
                    }
                }
            }
        }
    }

    fn on_gains_effect(
        &mut self,
        fields: &EffectFields<'_>,
        now: Instant,
    ) -> Result<(), EngineError> {
        let Some(effect_id) = fields.effect_id.as_deref() else {
            return Ok(());
        };

        if fields.target == Some(self.session.me.as_str()) {
            if effect_id == effect::WELL_FED {
                let secs = fields.duration.unwrap_or(0.0);
                self.session.food_expires_at = Some(now + Duration::from_secs_f32(secs.max(0.0)));
                self.update_food_warning(now);
            }
            if self.job.on_gain_effect(effect_id, &mut self.player, now) {
                self.refresh_gcds()?;
            }
        }

        let from_me = fields.source == Some(self.session.me.as_str());
        if let Some(target_id) = fields.target_id {
            if crate::net_log::is_hostile_id(target_id) && from_me && self.dot.tracks(effect_id) {
                self.dot.on_mob_gain(target_id, effect_id);
            }
            let bearer = bearer_for(
                fields.target_id,
                fields.target,
                &self.session.me,
                &self.session.party,
            );
            if let Some(bearer) = bearer {
                self.effects.apply(
                    effect_key(fields, effect_id),
                    bearer,
                    fields.duration,
                    fields.count.unwrap_or(0),
                    now,
                );
            }
        }
        Ok(())
    }

    fn on_loses_effect(
        &mut self,
        fields: &EffectFields<'_>,
        now: Instant,
    ) -> Result<(), EngineError> {
        let Some(effect_id) = fields.effect_id.as_deref() else {
            return Ok(());
        };

        if fields.target == Some(self.session.me.as_str()) {
            if effect_id == effect::WELL_FED {
                self.session.food_expires_at = None;
                self.update_food_warning(now);
            }
            if self.job.on_lose_effect(effect_id, &mut self.player) {
                self.refresh_gcds()?;
            }
        }

        let from_me = fields.source == Some(self.session.me.as_str());
        if let Some(target_id) = fields.target_id {
            if crate::net_log::is_hostile_id(target_id) && from_me && self.dot.tracks(effect_id) {
                self.dot.on_mob_lose(target_id, effect_id);
            }
            self.effects.remove(&effect_key(fields, effect_id));
        }
        Ok(())
    }

    // ─── lifecycle ───

    pub fn on_player_changed(
        &mut self,
        snapshot: &PlayerSnapshot,
        now: Instant,
    ) -> Result<(), EngineError> {
        if self.session.me != snapshot.name {
            self.session.me = snapshot.name.clone();
        }

        let mut update_hp = false;
        let mut update_mp = false;
        let mut update_cp = false;
        let mut update_gp = false;
        let mut job_changed = false;

        if snapshot.job != self.player.job {
            job_changed = true;
            debug!(job = ?snapshot.job, "job changed");
            self.player.job = snapshot.job;
            // Combos and speed buffs are job specific.
            self.combo.abort();
            self.player.umbral_stacks = 0;
            self.player.speed_buffs = Default::default();
            self.job = JobTracker::for_job(snapshot.job);
            self.dot
                .set_tracked_effects(self.job.tracked_dot_effects().iter().copied());
            if !snapshot.job.is_gathering() {
                self.session.gp_alarm_ready = false;
            }
            update_hp = true;
            update_mp = true;
            update_cp = true;
            update_gp = true;
        }
        if snapshot.level != self.player.level {
            self.player.level = snapshot.level;
            self.update_food_warning(now);
        }
        if job_changed {
            // Seed the fresh tracker's thresholds and scales from the
            // current stats; a stats line may never follow.
            self.refresh_gcds()?;
        }

        if snapshot.current_hp != self.player.hp
            || snapshot.max_hp != self.player.max_hp
            || snapshot.current_shield != self.player.shield
        {
            self.player.hp = snapshot.current_hp;
            self.player.max_hp = snapshot.max_hp;
            self.player.shield = snapshot.current_shield;
            update_hp = true;
            if self.player.hp == 0 {
                // Death resets combos.
                self.combo.abort();
            }
        }
        if snapshot.current_mp != self.player.mp || snapshot.max_mp != self.player.max_mp {
            self.player.mp = snapshot.current_mp;
            self.player.max_mp = snapshot.max_mp;
            update_mp = true;
        }
        if snapshot.current_cp != self.player.cp || snapshot.max_cp != self.player.max_cp {
            self.player.cp = snapshot.current_cp;
            self.player.max_cp = snapshot.max_cp;
            update_cp = true;
        }
        if snapshot.current_gp != self.player.gp || snapshot.max_gp != self.player.max_gp {
            self.player.gp = snapshot.current_gp;
            self.player.max_gp = snapshot.max_gp;
            update_gp = true;
        }

        if update_hp {
            self.update_health();
        }
        if update_mp {
            self.update_mana(now);
        }
        if update_cp {
            self.cp_bar.set(self.player.cp, self.player.max_cp);
        }
        if update_gp {
            self.update_gp();
        }

        if let Some(detail) = &snapshot.job_detail {
            if self.job.on_snapshot(detail, &mut self.player, now) {
                self.refresh_gcds()?;
            }
        }
        Ok(())
    }

    pub fn on_zone_change(&mut self, zone_id: Option<u32>, content_type: Option<u32>, now: Instant) {
        self.session.content_type = content_type;
        self.dot.clear();
        self.effects.clear();

        self.session.is_pvp_zone = content_type == Some(game_data::CONTENT_TYPE_PVP)
            || zone_id == Some(game_data::ZONE_ID_WOLVES_DEN_PIER);

        self.update_food_warning(now);
    }

    pub fn on_in_combat_change(&mut self, in_combat: bool, now: Instant) {
        if self.session.in_combat == in_combat {
            return;
        }
        self.session.in_combat = in_combat;
        if in_combat {
            self.set_pull_countdown(0.0, now);
        }
        self.update_food_warning(now);
        self.update_mp_ticker(now);
    }

    pub fn on_party_wipe(&mut self) {
        debug!("party wipe");
        self.job.reset(&self.player);
        self.effects.clear();
    }

    pub fn on_party_changed(&mut self, names: &[String]) {
        self.session.party = names.to_vec();
    }

    pub fn on_target_distance(&mut self, distance: i32, now: Instant) {
        if self.player.distance == distance {
            return;
        }
        self.player.distance = distance;
        self.update_health();
        self.update_mana(now);
    }

    /// Periodic drive: passive expiries, deferred downgrades, latches.
    /// Returns the notifications accumulated since the last tick.
    pub fn tick(&mut self, now: Instant) -> Vec<Notification> {
        if let Some(transition) = self.combo.tick(now) {
            self.job.on_combo(&transition, now);
        }
        let notify_expired =
            !self.session.in_combat || self.options.notify_expired_procs_in_combat;
        for name in self.job.tick(&self.player, now) {
            if notify_expired {
                self.pending.push(Notification::TimerExpired(name));
            }
        }
        if self.session.gp_potion_reset.fire(now).is_some() {
            self.session.gp_potion = false;
        }
        self.update_food_warning(now);
        std::mem::take(&mut self.pending)
    }

    // ─── derived display state ───

    fn refresh_gcds(&mut self) -> Result<(), EngineError> {
        // Stats can arrive before the first snapshot reports a level;
        // there is nothing to derive from yet. The speeds are kept and
        // picked up once the snapshot lands.
        if self.player.level == 0 {
            return Ok(());
        }
        self.player.recompute_gcds()?;
        self.job
            .on_stat_change(self.player.gcd_skill, self.player.gcd_spell);
        Ok(())
    }

    fn set_pull_countdown(&mut self, seconds: f32, now: Instant) {
        let in_countdown = seconds > 0.0;
        let showing = self.pull_countdown.remaining(now) > 0.0;
        if in_countdown != showing {
            self.pull_countdown.set_duration(now, seconds);
        }
    }

    fn update_health(&mut self) {
        self.health_bar.set(self.player.hp, self.player.max_hp);
        self.health_bar.extra = self.player.shield;

        let max = f64::from(self.player.max_hp);
        let percent = f64::from(self.player.hp + self.player.shield) / max;
        self.health_bar.classification = if self.player.max_hp > 0
            && percent < self.options.low_health_threshold_percent
        {
            Classification::Low
        } else if self.player.max_hp > 0 && percent < self.options.mid_health_threshold_percent {
            Classification::Mid
        } else {
            Classification::Normal
        };
    }

    fn update_mana(&mut self, now: Instant) {
        self.update_mp_ticker(now);
        self.mana_bar.set(self.player.mp, self.player.max_mp);

        let ranged_caster = matches!(
            self.player.job,
            Job::Rdm | Job::Blm | Job::Smn | Job::Acn
        );
        let bands = self.options.mp_thresholds(self.player.job);

        self.mana_bar.classification = if ranged_caster
            && self.player.distance > self.options.far_threshold_offence
        {
            Classification::Far
        } else if bands.is_some_and(|(low, _)| self.player.mp <= low) {
            Classification::Low
        } else if bands.is_some_and(|(_, medium)| self.player.mp <= medium) {
            Classification::Mid
        } else {
            Classification::Normal
        };
    }

    fn update_mp_ticker(&mut self, now: Instant) {
        let delta = i64::from(self.player.mp) - i64::from(self.player.prev_mp);
        self.player.prev_mp = self.player.mp;

        let base_rate = if self.session.in_combat {
            game_data::MP_COMBAT_RATE
        } else {
            game_data::MP_NORMAL_RATE
        };
        let umbral_rate = match self.player.umbral_stacks {
            -1 => game_data::MP_UI1_RATE,
            -2 => game_data::MP_UI2_RATE,
            -3 => game_data::MP_UI3_RATE,
            _ => 0.0,
        };

        let max_mp = f64::from(self.player.max_mp);
        let mp_tick = (max_mp * base_rate).floor() as i64 + (max_mp * umbral_rate).floor() as i64;
        // Astral fire disables natural regeneration entirely.
        if self.player.max_mp > 0 && delta == mp_tick && self.player.umbral_stacks <= 0 {
            self.mp_ticker.set_duration(now, game_data::MP_TICK_INTERVAL);
        }

        self.mp_ticker.classification = if self.player.umbral_stacks < 0 {
            Classification::Ice
        } else if self.player.umbral_stacks > 0 {
            Classification::Fire
        } else {
            Classification::Normal
        };
    }

    fn update_gp(&mut self) {
        self.gp_bar.set(self.player.gp, self.player.max_gp);

        if self.options.gp_alarm_point == 0 {
            return;
        }
        if self.player.gp < self.options.gp_alarm_point {
            self.session.gp_alarm_ready = true;
        } else if self.session.gp_alarm_ready && !self.session.gp_potion {
            self.session.gp_alarm_ready = false;
            self.pending.push(Notification::GpAlarm);
        }
    }

    fn update_food_warning(&mut self, now: Instant) {
        let can_show = self.options.hide_well_fed_above_seconds > 0.0
            && !self.session.in_combat
            && self
                .session
                .content_type
                .is_some_and(|ct| game_data::WELL_FED_CONTENT_TYPES.contains(&ct));

        let show = can_show
            && self
                .session
                .food_remaining_secs(now)
                .unwrap_or(0.0)
                <= self.options.hide_well_fed_above_seconds;
        self.session.food_warning_visible = show;
    }
}

fn effect_key(fields: &EffectFields<'_>, effect_id: &str) -> EffectKey {
    EffectKey {
        bearer_id: fields.target_id.unwrap_or_default().to_string(),
        effect_id: effect_id.to_string(),
        source_id: fields.source_id.unwrap_or_default().to_string(),
    }
}
