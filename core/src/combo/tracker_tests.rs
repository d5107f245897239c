//! Tests for the combo chain state machine

use std::time::{Duration, Instant};

use super::*;
use crate::game_data::ability;

fn t0() -> Instant {
    Instant::now()
}

#[test]
fn chain_start_then_continuation() {
    let base = t0();
    let mut combo = ComboTracker::new();

    let first = combo.on_ability(ability::HARD_SLASH, base).unwrap();
    assert_eq!(first.skill.as_deref(), Some(ability::HARD_SLASH));
    assert!(!first.is_final);
    assert!(combo.is_in_combo());

    let second = combo
        .on_ability(ability::SYPHON_STRIKE, base + Duration::from_secs(2))
        .unwrap();
    assert_eq!(second.skill.as_deref(), Some(ability::SYPHON_STRIKE));
    assert!(!second.is_final);

    let third = combo
        .on_ability(ability::SOULEATER, base + Duration::from_secs(4))
        .unwrap();
    assert!(third.is_final);
    assert!(combo.is_final_skill());
}

#[test]
fn branching_chain_accepts_either_finisher() {
    let base = t0();
    for finisher in [ability::AEOLIAN_EDGE, ability::ARMOR_CRUSH] {
        let mut combo = ComboTracker::new();
        combo.on_ability(ability::SPINNING_EDGE, base);
        combo.on_ability(ability::GUST_SLASH, base);
        let done = combo.on_ability(finisher, base).unwrap();
        assert!(done.is_final, "finisher {finisher} should complete");
    }
}

#[test]
fn out_of_order_ability_breaks_the_chain() {
    let base = t0();
    let mut combo = ComboTracker::new();
    combo.on_ability(ability::HARD_SLASH, base);

    // Souleater requires Syphon Strike before it; it can't continue
    // and can't start a chain, so the chain clears.
    let broke = combo.on_ability(ability::SOULEATER, base).unwrap();
    assert_eq!(broke.skill, None);
    assert!(!combo.is_in_combo());
}

#[test]
fn untracked_ability_breaks_but_is_silent_when_idle() {
    let base = t0();
    let mut combo = ComboTracker::new();

    assert_eq!(combo.on_ability(ability::TRICK_ATTACK, base), None);

    combo.on_ability(ability::SPINNING_EDGE, base);
    let broke = combo.on_ability(ability::TRICK_ATTACK, base).unwrap();
    assert_eq!(broke.skill, None);
}

#[test]
fn timeout_forces_idle_with_notification() {
    let base = t0();
    let mut combo = ComboTracker::new();
    combo.on_ability(ability::SPINNING_EDGE, base);

    assert_eq!(combo.tick(base + Duration::from_secs(10)), None);

    let cleared = combo.tick(base + Duration::from_secs(16)).unwrap();
    assert_eq!(cleared.skill, None);
    assert!(!combo.is_in_combo());

    // No repeated notifications once idle.
    assert_eq!(combo.tick(base + Duration::from_secs(30)), None);
}

#[test]
fn expired_chain_cannot_be_continued() {
    let base = t0();
    let mut combo = ComboTracker::new();
    combo.on_ability(ability::SPINNING_EDGE, base);

    // Follow-up after the window restarts from the chain head instead.
    let late = combo
        .on_ability(ability::GUST_SLASH, base + Duration::from_secs(20))
        .unwrap();
    assert_eq!(late.skill, None, "Gust Slash alone cannot start a chain");
    assert!(!combo.is_in_combo());
}

#[test]
fn abort_is_silent() {
    let base = t0();
    let mut combo = ComboTracker::new();
    combo.on_ability(ability::HARD_SLASH, base);
    combo.abort();
    assert!(!combo.is_in_combo());
    assert_eq!(combo.tick(base + Duration::from_secs(60)), None);
}

#[test]
fn never_in_combo_past_deadline() {
    // After the window passes with no qualifying follow-up, the
    // tracker must not report in-combo.
    let base = t0();
    let mut combo = ComboTracker::new();
    combo.on_ability(ability::HARD_SLASH, base);
    let late = base + Duration::from_secs_f32(crate::game_data::COMBO_WINDOW_SECS + 0.1);
    combo.tick(late);
    assert!(!combo.is_in_combo());
}
