//! Combo chain tracking
//!
//! A finite-state machine over ability-use events by the local player.
//! Each accepted ability either continues, breaks, or completes a chain
//! from the static chain table; a deadline forces the chain back to
//! idle when no qualifying follow-up arrives in time.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::game_data::{COMBO_CHAINS, COMBO_WINDOW_SECS};

#[cfg(test)]
mod tracker_tests;

/// One observed transition, delivered to combo consumers.
/// `skill == None` reports a break or timeout (cleared chain).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComboTransition {
    pub skill: Option<String>,
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum ComboState {
    Idle,
    InCombo {
        last_ability: &'static str,
        deadline: Instant,
        is_final: bool,
    },
}

#[derive(Debug, Clone, Copy)]
struct ChainLink {
    prev: Option<&'static str>,
    is_final: bool,
}

/// Tracks the local player's active combo chain.
#[derive(Debug)]
pub struct ComboTracker {
    /// ability id → every chain position that ability occupies
    links: HashMap<&'static str, Vec<ChainLink>>,
    state: ComboState,
    window: Duration,
}

impl Default for ComboTracker {
    fn default() -> Self {
        ComboTracker::new()
    }
}

impl ComboTracker {
    pub fn new() -> ComboTracker {
        let mut links: HashMap<&'static str, Vec<ChainLink>> = HashMap::new();
        for chain in COMBO_CHAINS {
            for (i, &ability) in chain.iter().enumerate() {
                links.entry(ability).or_default().push(ChainLink {
                    prev: if i == 0 { None } else { Some(chain[i - 1]) },
                    is_final: i == chain.len() - 1,
                });
            }
        }
        ComboTracker {
            links,
            state: ComboState::Idle,
            window: Duration::from_secs_f32(COMBO_WINDOW_SECS),
        }
    }

    pub fn is_in_combo(&self) -> bool {
        matches!(self.state, ComboState::InCombo { .. })
    }

    /// Whether the current position completes its chain.
    pub fn is_final_skill(&self) -> bool {
        matches!(self.state, ComboState::InCombo { is_final: true, .. })
    }

    /// Feed an ability used by the local player.
    ///
    /// Returns the transition to report to listeners, or `None` when an
    /// untracked ability lands while already idle (nothing changed).
    pub fn on_ability(&mut self, ability_id: &str, now: Instant) -> Option<ComboTransition> {
        // A chain whose deadline already passed cannot be continued.
        // If the timeout tick hasn't run yet, the clear is reported here.
        let mut expired = false;
        if let ComboState::InCombo { deadline, .. } = self.state
            && now >= deadline
        {
            self.state = ComboState::Idle;
            expired = true;
        }

        let cleared = ComboTransition {
            skill: None,
            is_final: false,
        };

        let Some((link, id)) = self.lookup(ability_id) else {
            // Untracked ability: breaks an active chain.
            if self.is_in_combo() || expired {
                self.state = ComboState::Idle;
                return Some(cleared);
            }
            return None;
        };

        let continued = match self.state {
            ComboState::InCombo { last_ability, .. } => link
                .iter()
                .find(|l| l.prev == Some(last_ability))
                .copied(),
            ComboState::Idle => None,
        };

        let accepted = continued.or_else(|| link.iter().find(|l| l.prev.is_none()).copied());

        match accepted {
            Some(l) => {
                self.state = ComboState::InCombo {
                    last_ability: id,
                    deadline: now + self.window,
                    is_final: l.is_final,
                };
                Some(ComboTransition {
                    skill: Some(id.to_string()),
                    is_final: l.is_final,
                })
            }
            None => {
                // Tracked ability used out of order.
                let was_in_combo = self.is_in_combo();
                self.state = ComboState::Idle;
                (was_in_combo || expired).then_some(cleared)
            }
        }
    }

    /// Force idle when the deadline elapses without a follow-up.
    /// The cleared chain is reported so UIs can reset their countdown.
    pub fn tick(&mut self, now: Instant) -> Option<ComboTransition> {
        if let ComboState::InCombo { deadline, .. } = self.state
            && now >= deadline
        {
            self.state = ComboState::Idle;
            return Some(ComboTransition {
                skill: None,
                is_final: false,
            });
        }
        None
    }

    /// Abort without notifying (death, job change: the UI is being
    /// torn down anyway).
    pub fn abort(&mut self) {
        self.state = ComboState::Idle;
    }

    fn lookup(&self, ability_id: &str) -> Option<(Vec<ChainLink>, &'static str)> {
        self.links
            .get_key_value(ability_id)
            .map(|(id, links)| (links.clone(), *id))
    }
}
