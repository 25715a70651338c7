//! Purchasable timed upgrades

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::events::GameEvent;
use super::state::GameState;

/// Upgrades sold in the shop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Pulls the coin toward the player
    Vacuum,
    /// Enemy contact scores instead of hurting
    Invincibility,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 2] = [UpgradeKind::Vacuum, UpgradeKind::Invincibility];
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeKind::Vacuum => write!(f, "vacuum"),
            UpgradeKind::Invincibility => write!(f, "invincibility"),
        }
    }
}

/// A purchase the shop turned down. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("not enough money for {kind}: costs {cost}, have {available}")]
    InsufficientFunds {
        kind: UpgradeKind,
        cost: u32,
        available: u32,
    },
}

/// Countdown for one upgrade
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpgradeTimer {
    pub active: bool,
    /// Ticks since activation
    pub elapsed: u32,
}

impl UpgradeTimer {
    /// Activate, or re-arm the full duration if already active
    fn arm(&mut self) {
        self.active = true;
        self.elapsed = 0;
    }

    /// Count one tick; returns true on the tick the upgrade runs out
    fn step(&mut self, duration: u32) -> bool {
        if !self.active {
            return false;
        }
        self.elapsed += 1;
        if self.elapsed >= duration {
            self.active = false;
            return true;
        }
        false
    }

    /// Ticks left before expiry (0 when inactive)
    pub fn remaining(&self, duration: u32) -> u32 {
        if self.active {
            duration.saturating_sub(self.elapsed)
        } else {
            0
        }
    }
}

/// Both upgrade slots
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Upgrades {
    pub vacuum: UpgradeTimer,
    pub invincibility: UpgradeTimer,
}

impl Upgrades {
    pub fn get(&self, kind: UpgradeKind) -> &UpgradeTimer {
        match kind {
            UpgradeKind::Vacuum => &self.vacuum,
            UpgradeKind::Invincibility => &self.invincibility,
        }
    }

    pub fn get_mut(&mut self, kind: UpgradeKind) -> &mut UpgradeTimer {
        match kind {
            UpgradeKind::Vacuum => &mut self.vacuum,
            UpgradeKind::Invincibility => &mut self.invincibility,
        }
    }

    pub fn is_active(&self, kind: UpgradeKind) -> bool {
        self.get(kind).active
    }
}

impl GameState {
    /// Buy an upgrade. Works while paused (the shop pauses the game).
    ///
    /// Buying one that is already running restarts its full duration.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<(), PurchaseError> {
        let cost = self.tuning.upgrade(kind).cost;
        if self.currency < cost {
            log::debug!("Declined {kind}: costs {cost}, have {}", self.currency);
            return Err(PurchaseError::InsufficientFunds {
                kind,
                cost,
                available: self.currency,
            });
        }

        self.currency -= cost;
        self.upgrades.get_mut(kind).arm();
        self.events.push(GameEvent::UpgradeActivated(kind));
        log::debug!("Activated {kind}, currency left {}", self.currency);
        Ok(())
    }
}

/// Count down both upgrades
pub(crate) fn update_upgrades(state: &mut GameState) {
    for kind in UpgradeKind::ALL {
        let duration = state.tuning.upgrade(kind).duration_ticks;
        if state.upgrades.get_mut(kind).step(duration) {
            state.events.push(GameEvent::UpgradeExpired(kind));
            log::debug!("{kind} wore off");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn state_with_currency(currency: u32) -> GameState {
        let mut state = GameState::new(5, Tuning::default());
        state.drain_events().for_each(drop);
        state.currency = currency;
        state
    }

    #[test]
    fn test_purchase_declined() {
        let mut state = state_with_currency(50);
        let err = state.purchase(UpgradeKind::Vacuum).unwrap_err();

        assert_eq!(
            err,
            PurchaseError::InsufficientFunds {
                kind: UpgradeKind::Vacuum,
                cost: 100,
                available: 50
            }
        );
        assert_eq!(state.currency, 50);
        assert!(!state.upgrades.is_active(UpgradeKind::Vacuum));
        assert!(state.pending_events().is_empty());
        assert_eq!(
            err.to_string(),
            "not enough money for vacuum: costs 100, have 50"
        );
    }

    #[test]
    fn test_purchase_activates() {
        let mut state = state_with_currency(150);
        state.purchase(UpgradeKind::Invincibility).unwrap();

        assert_eq!(state.currency, 50);
        assert!(state.upgrades.is_active(UpgradeKind::Invincibility));
        assert!(!state.upgrades.is_active(UpgradeKind::Vacuum));
        assert_eq!(
            state.pending_events(),
            &[GameEvent::UpgradeActivated(UpgradeKind::Invincibility)]
        );
    }

    #[test]
    fn test_expires_after_duration() {
        let mut state = state_with_currency(100);
        state.purchase(UpgradeKind::Vacuum).unwrap();
        let duration = state.tuning.vacuum.duration_ticks;

        for _ in 0..duration - 1 {
            update_upgrades(&mut state);
        }
        assert!(state.upgrades.is_active(UpgradeKind::Vacuum));
        assert_eq!(state.upgrades.vacuum.remaining(duration), 1);

        update_upgrades(&mut state);
        assert!(!state.upgrades.is_active(UpgradeKind::Vacuum));
        assert_eq!(state.upgrades.vacuum.remaining(duration), 0);
        assert_eq!(
            state.pending_events().last(),
            Some(&GameEvent::UpgradeExpired(UpgradeKind::Vacuum))
        );
    }

    #[test]
    fn test_repurchase_rearms() {
        let mut state = state_with_currency(200);
        state.purchase(UpgradeKind::Vacuum).unwrap();
        for _ in 0..100 {
            update_upgrades(&mut state);
        }
        state.purchase(UpgradeKind::Vacuum).unwrap();

        assert_eq!(state.currency, 0);
        assert_eq!(state.upgrades.vacuum.elapsed, 0);
    }
}
