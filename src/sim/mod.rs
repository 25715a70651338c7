//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Whole ticks only (no wall-clock time)
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies; side effects are queued
//!   as events for the host

pub mod animation;
pub mod clock;
pub mod collectibles;
pub mod collision;
pub mod enemy;
pub mod events;
pub mod player;
pub mod state;
pub mod tick;
pub mod upgrades;

pub use animation::{PICKUP_SEQUENCE, PlayerFrame, ScaleSpring, SpriteAnimator};
pub use clock::FrameClock;
pub use collision::{WallContact, circles_overlap};
pub use enemy::Edge;
pub use events::{Cue, GameEvent};
pub use state::{Coin, Enemy, GamePhase, GameState, MoneyBag, PauseReason, Player};
pub use tick::{DirectionKeys, TickInput, joystick_vector, tick};
pub use upgrades::{PurchaseError, UpgradeKind, UpgradeTimer, Upgrades};
