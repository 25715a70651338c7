//! Side effects raised by the simulation
//!
//! The tick never plays sounds or touches the page. It queues events on the
//! state; the host drains them after each frame.

use glam::Vec2;

use super::enemy::Edge;
use super::upgrades::UpgradeKind;

/// Named audio cue, fire-and-forget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Music,
    CoinPickup,
    MoneyPickup,
    EnemyCaught,
    Damage,
    VacuumOn,
    InvincibilityOn,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    CoinCollected { at: Vec2 },
    CoinExpired,
    MoneyBagSpawned { at: Vec2 },
    MoneyBagCollected { at: Vec2 },
    MoneyBagExpired,
    EnemySpawned { edge: Edge },
    /// Enemy touched the player while invincible
    EnemyCaught,
    /// Enemy touched the player
    PlayerHit,
    /// Enemy drifted off screen
    EnemyEscaped,
    UpgradeActivated(UpgradeKind),
    UpgradeExpired(UpgradeKind),
}

impl GameEvent {
    /// Sound to play for this event, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::SessionStarted => Some(Cue::Music),
            GameEvent::CoinCollected { .. } => Some(Cue::CoinPickup),
            GameEvent::MoneyBagCollected { .. } => Some(Cue::MoneyPickup),
            GameEvent::EnemyCaught => Some(Cue::EnemyCaught),
            GameEvent::PlayerHit => Some(Cue::Damage),
            GameEvent::UpgradeActivated(UpgradeKind::Vacuum) => Some(Cue::VacuumOn),
            GameEvent::UpgradeActivated(UpgradeKind::Invincibility) => Some(Cue::InvincibilityOn),
            GameEvent::CoinExpired
            | GameEvent::MoneyBagSpawned { .. }
            | GameEvent::MoneyBagExpired
            | GameEvent::EnemySpawned { .. }
            | GameEvent::EnemyEscaped
            | GameEvent::UpgradeExpired(_) => None,
        }
    }
}
