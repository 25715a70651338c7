//! Coin Rush - A 2D arcade coin grabber
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player motion, spawners, enemy, upgrades)
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences (audio, pause behaviour)
//! - `audio`: Procedural Web Audio cues (wasm32 only)
//! - `web`: Browser host, started on module instantiation (wasm32 only)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Logical tick length in seconds (the game was balanced at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;
    /// Longest wall-clock gap a single frame may account for (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;

    /// Default canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 40.0;
    pub const PLAYER_ACCELERATION: f32 = 0.5;
    pub const PLAYER_MAX_SPEED: f32 = 10.0;
    pub const PLAYER_FRICTION: f32 = 0.95;
    /// Velocity factor applied when bouncing off a canvas edge
    pub const WALL_RESTITUTION: f32 = -0.5;

    /// Coin defaults
    pub const COIN_RADIUS: f32 = 15.0;
    pub const COIN_LIFETIME_TICKS: u32 = 4 * 60;

    /// Money bag pickup radius (not its drawn size)
    pub const MONEY_BAG_RADIUS: f32 = 20.0;

    /// Enemy sprite size (hit radius is half of this)
    pub const ENEMY_SIZE: f32 = 100.0;

    /// Distances at or below this are treated as "on top of" a target
    pub const PULL_EPSILON: f32 = 1.0;
}

/// Direction and length from `from` toward `to`.
///
/// Returns `None` when the points are within `epsilon` of each other so
/// callers never divide by a near-zero length.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2, epsilon: f32) -> Option<(Vec2, f32)> {
    let delta = to - from;
    let dist = delta.length();
    if dist > epsilon { Some((delta / dist, dist)) } else { None }
}

/// Unit vector at `angle` radians (screen space, +y points down)
#[inline]
pub fn unit_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
