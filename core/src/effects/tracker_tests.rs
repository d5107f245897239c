use std::time::{Duration, Instant};

use super::{bearer_for, Bearer, EffectKey, EffectTracker};

fn key(bearer: &str, effect: &str, source: &str) -> EffectKey {
    EffectKey {
        bearer_id: bearer.to_string(),
        effect_id: effect.to_string(),
        source_id: source.to_string(),
    }
}

#[test]
fn gain_then_loss_leaves_no_trace() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let k = key("10001234", "74F", "10001234");
    tracker.apply(k.clone(), Bearer::Me, Some(30.0), 0, t0);
    assert!(tracker.is_active(&k, t0));

    tracker.remove(&k);
    assert!(!tracker.is_active(&k, t0));
    assert!(tracker.is_empty());
}

#[test]
fn timed_effect_expires_passively() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let k = key("10001234", "9D", "10001234");
    tracker.apply(k.clone(), Bearer::Me, Some(15.0), 0, t0);
    assert!(tracker.is_active(&k, t0 + Duration::from_secs(14)));
    assert!(!tracker.is_active(&k, t0 + Duration::from_secs(16)));
}

#[test]
fn missing_duration_means_indefinite() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let k = key("10001234", "1F0", "10001234");
    tracker.apply(k.clone(), Bearer::Me, None, 0, t0);
    assert!(tracker.is_active(&k, t0 + Duration::from_secs(3600)));
}

#[test]
fn reapplication_restarts_the_clock() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let k = key("40001111", "B3", "10001234");
    tracker.apply(k.clone(), Bearer::Mob, Some(30.0), 0, t0);
    tracker.apply(k.clone(), Bearer::Mob, Some(30.0), 0, t0 + Duration::from_secs(25));
    assert!(tracker.is_active(&k, t0 + Duration::from_secs(50)));
    assert_eq!(tracker.len(), 1);
}

#[test]
fn same_effect_from_two_sources_is_tracked_separately() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let mine = key("40001111", "B3", "10001234");
    let theirs = key("40001111", "B3", "10005678");
    tracker.apply(mine.clone(), Bearer::Mob, Some(30.0), 0, t0);
    tracker.apply(theirs.clone(), Bearer::Mob, Some(30.0), 0, t0);
    assert_eq!(tracker.len(), 2);

    tracker.remove(&theirs);
    assert!(tracker.is_active(&mine, t0));
    assert!(tracker.is_active_any_source("40001111", "B3", t0));
}

#[test]
fn clear_empties_everything() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    tracker.apply(key("10001234", "30", "10001234"), Bearer::Me, Some(1800.0), 0, t0);
    tracker.apply(key("40001111", "74F", "10001234"), Bearer::Mob, Some(30.0), 0, t0);
    tracker.clear();
    assert!(tracker.is_empty());
}

#[test]
fn stack_counts_are_recorded() {
    let t0 = Instant::now();
    let mut tracker = EffectTracker::new();

    let k = key("10001234", "1F0", "10001234");
    tracker.apply(k.clone(), Bearer::Me, None, 2, t0);
    assert_eq!(tracker.get(&k).map(|e| e.stacks), Some(2));
}

#[test]
fn bearer_classification_follows_id_and_roster() {
    let party = vec!["Tataru Taru".to_string()];
    assert_eq!(
        bearer_for(Some("10001234"), Some("Popoto Po"), "Popoto Po", &party),
        Some(Bearer::Me)
    );
    assert_eq!(
        bearer_for(Some("40001111"), Some("Striking Dummy"), "Popoto Po", &party),
        Some(Bearer::Mob)
    );
    assert_eq!(
        bearer_for(Some("10005678"), Some("Tataru Taru"), "Popoto Po", &party),
        Some(Bearer::Party)
    );
    // A player outside the roster is not a tracked bearer.
    assert_eq!(
        bearer_for(Some("10009999"), Some("Alliance Healer"), "Popoto Po", &party),
        None
    );
}
