//! Damage-over-time target attribution
//!
//! Tick lines only name the bearer, not the caster, so ownership of a
//! tick has to be inferred. We remember which hostiles currently carry
//! one of the job's tracked dot effects from us, plus the most recent
//! such target we attacked, and only attribute a tick when both agree.

use std::collections::HashSet;
use std::time::Instant;

use crate::net_log::DotFields;

#[derive(Debug, Default)]
pub struct DotTracker {
    tracked_effects: HashSet<String>,
    /// Hostiles currently carrying one of our tracked dots, in
    /// application order.
    targets: Vec<String>,
    last_attacked: Option<String>,
}

impl DotTracker {
    pub fn new() -> DotTracker {
        DotTracker::default()
    }

    /// Swap in the active job's dot effect ids. Existing attribution
    /// state is dropped since it belonged to the previous job.
    pub fn set_tracked_effects<I>(&mut self, effect_ids: I)
    where
        I: IntoIterator<Item = &'static str>,
    {
        self.tracked_effects = effect_ids.into_iter().map(str::to_string).collect();
        self.clear();
    }

    pub fn tracks(&self, effect_id: &str) -> bool {
        self.tracked_effects.contains(effect_id)
    }

    pub fn on_mob_gain(&mut self, target_id: &str, effect_id: &str) {
        if !self.tracks(effect_id) {
            return;
        }
        if !self.targets.iter().any(|t| t == target_id) {
            self.targets.push(target_id.to_string());
        }
    }

    pub fn on_mob_lose(&mut self, target_id: &str, effect_id: &str) {
        if !self.tracks(effect_id) {
            return;
        }
        self.targets.retain(|t| t != target_id);
    }

    /// Record the latest directly-attacked dot bearer. Abilities on
    /// mobs we have no dot on do not disturb the attribution.
    pub fn on_self_ability(&mut self, target_id: &str) {
        if self.targets.iter().any(|t| t == target_id) {
            self.last_attacked = Some(target_id.to_string());
        }
    }

    /// Returns the tick timestamp when the tick belongs to us: an
    /// anonymous dot tick on the hostile we last attacked while it
    /// carried one of our tracked dots.
    pub fn attribute_tick(&self, fields: &DotFields<'_>, now: Instant) -> Option<Instant> {
        if fields.which != Some("DoT") || fields.effect_id != Some("0") {
            return None;
        }
        let target_id = fields.target_id?;
        if self.last_attacked.as_deref() != Some(target_id) {
            return None;
        }
        if !self.targets.iter().any(|t| t == target_id) {
            return None;
        }
        Some(now)
    }

    pub fn clear(&mut self) {
        self.targets.clear();
        self.last_attacked = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::DotTracker;
    use crate::net_log::DotFields;

    fn tick<'a>(target_id: &'a str) -> DotFields<'a> {
        DotFields {
            target_id: Some(target_id),
            which: Some("DoT"),
            effect_id: Some("0"),
        }
    }

    fn tracker() -> DotTracker {
        let mut t = DotTracker::new();
        t.set_tracked_effects(["74F"]);
        t
    }

    #[test]
    fn tick_on_last_attacked_dotted_target_is_ours() {
        let now = Instant::now();
        let mut t = tracker();
        t.on_mob_gain("40001111", "74F");
        t.on_self_ability("40001111");
        assert!(t.attribute_tick(&tick("40001111"), now).is_some());
    }

    #[test]
    fn attribution_follows_the_most_recent_attack() {
        let now = Instant::now();
        let mut t = tracker();
        t.on_mob_gain("40001111", "74F");
        t.on_mob_gain("40002222", "74F");
        t.on_self_ability("40001111");
        t.on_self_ability("40002222");
        assert!(t.attribute_tick(&tick("40001111"), now).is_none());
        assert!(t.attribute_tick(&tick("40002222"), now).is_some());
    }

    #[test]
    fn losing_the_dot_stops_attribution() {
        let now = Instant::now();
        let mut t = tracker();
        t.on_mob_gain("40001111", "74F");
        t.on_self_ability("40001111");
        t.on_mob_lose("40001111", "74F");
        assert!(t.attribute_tick(&tick("40001111"), now).is_none());
    }

    #[test]
    fn named_ticks_and_untracked_effects_are_ignored() {
        let now = Instant::now();
        let mut t = tracker();
        t.on_mob_gain("40001111", "74F");
        t.on_self_ability("40001111");

        let named = DotFields {
            target_id: Some("40001111"),
            which: Some("DoT"),
            effect_id: Some("74F"),
        };
        assert!(t.attribute_tick(&named, now).is_none());

        t.on_mob_gain("40002222", "B3");
        t.on_self_ability("40002222");
        assert!(t.attribute_tick(&tick("40002222"), now).is_none());
    }

    #[test]
    fn attacks_on_undotted_mobs_keep_prior_attribution() {
        let now = Instant::now();
        let mut t = tracker();
        t.on_mob_gain("40001111", "74F");
        t.on_self_ability("40001111");
        t.on_self_ability("40009999");
        assert!(t.attribute_tick(&tick("40001111"), now).is_some());
    }
}
