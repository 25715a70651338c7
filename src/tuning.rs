//! Data-driven game balance
//!
//! Every number the simulation uses lives here so variants of the game can
//! be expressed as a JSON file instead of forked code. All timers are in
//! ticks, all distances in canvas pixels.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::UpgradeKind;

/// Reasons a tuning file is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be within {min}..={max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    #[error("canvas {width}x{height} cannot fit a player of radius {radius}")]
    CanvasTooSmall { width: f32, height: f32, radius: f32 },
    #[error("enemy launch speed range {min}..{max} is empty")]
    EmptyLaunchSpeedRange { min: f32, max: f32 },
    #[error("enemy escape margin {margin} must exceed its spawn offset {offset}")]
    EscapeInsideSpawn { margin: f32, offset: f32 },
}

/// Cost and duration of one purchasable upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeSpec {
    pub cost: u32,
    pub duration_ticks: u32,
}

/// Complete gameplay balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Extra spawn exclusion at the top and bottom edges (keeps pickups off the HUD)
    pub hud_margin: f32,

    // === Player ===
    pub player_radius: f32,
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    pub player_friction: f32,
    pub wall_restitution: f32,

    // === Bounce feedback ===
    pub start_scale: f32,
    pub rest_scale: f32,
    pub bounce_stiffness: f32,
    pub bounce_damping: f32,
    pub pop_scale: f32,
    pub pop_velocity: f32,
    /// Ticks each sprite frame is held during a sequence
    pub frame_interval: u32,

    // === Coin ===
    pub coin_radius: f32,
    pub coin_spawn_margin: f32,
    pub coin_lifetime: u32,
    pub coin_score: u32,
    /// Distance the coin travels toward the player per tick under vacuum
    pub vacuum_pull: f32,

    // === Money bag ===
    pub money_bag_radius: f32,
    pub money_bag_spawn_interval: u32,
    pub money_bag_lifetime: u32,
    pub money_bag_score: u32,
    pub money_bag_currency: u32,

    // === Enemy ===
    pub enemy_size: f32,
    /// How far outside the canvas a fresh enemy appears
    pub enemy_spawn_offset: f32,
    pub enemy_launch_speed_min: f32,
    pub enemy_launch_speed_max: f32,
    pub enemy_max_speed: f32,
    /// Per-tick velocity nudge toward the coin
    pub enemy_homing_pull: f32,
    /// Off-screen distance after which the enemy despawns
    pub enemy_escape_margin: f32,
    /// Upper bound (exclusive) of the random inactive delay, in ticks
    pub enemy_spawn_delay_max: u32,
    pub enemy_catch_score: u32,
    pub enemy_hit_penalty: u32,

    // === Upgrades ===
    pub vacuum: UpgradeSpec,
    pub invincibility: UpgradeSpec,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            hud_margin: 0.0,

            player_radius: PLAYER_RADIUS,
            player_acceleration: PLAYER_ACCELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            player_friction: PLAYER_FRICTION,
            wall_restitution: WALL_RESTITUTION,

            start_scale: 1.8,
            rest_scale: 1.0,
            bounce_stiffness: 0.5,
            bounce_damping: 0.2,
            pop_scale: 1.6,
            pop_velocity: 1.0,
            frame_interval: 20,

            coin_radius: COIN_RADIUS,
            coin_spawn_margin: 10.0,
            coin_lifetime: COIN_LIFETIME_TICKS,
            coin_score: 100,
            vacuum_pull: 5.0,

            money_bag_radius: MONEY_BAG_RADIUS,
            money_bag_spawn_interval: 200,
            money_bag_lifetime: 100,
            money_bag_score: 100,
            money_bag_currency: 100,

            enemy_size: ENEMY_SIZE,
            enemy_spawn_offset: 30.0,
            enemy_launch_speed_min: 2.0,
            enemy_launch_speed_max: 4.0,
            enemy_max_speed: 1.5,
            enemy_homing_pull: 0.1,
            enemy_escape_margin: 50.0,
            enemy_spawn_delay_max: 30,
            enemy_catch_score: 250,
            enemy_hit_penalty: 200,

            vacuum: UpgradeSpec {
                cost: 100,
                duration_ticks: 8 * 60,
            },
            invincibility: UpgradeSpec {
                cost: 100,
                duration_ticks: 9 * 60,
            },
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning file; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Same balance on a differently sized canvas
    pub fn with_canvas(mut self, width: f32, height: f32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    /// Default balance on a canvas of the given size, rejected if the canvas
    /// cannot host the game
    pub fn for_canvas(width: f32, height: f32) -> Result<Self, TuningError> {
        let tuning = Self::default().with_canvas(width, height);
        tuning.validate()?;
        Ok(tuning)
    }

    /// Look up the price and duration of an upgrade
    pub fn upgrade(&self, kind: UpgradeKind) -> UpgradeSpec {
        match kind {
            UpgradeKind::Vacuum => self.vacuum,
            UpgradeKind::Invincibility => self.invincibility,
        }
    }

    /// Radius at which the enemy touches the player
    pub fn enemy_contact_distance(&self) -> f32 {
        self.player_radius + self.enemy_size / 2.0
    }

    /// Reject balance values that would break simulation invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("player_radius", self.player_radius),
            ("player_max_speed", self.player_max_speed),
            ("coin_radius", self.coin_radius),
            ("money_bag_radius", self.money_bag_radius),
            ("enemy_size", self.enemy_size),
            ("enemy_max_speed", self.enemy_max_speed),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let unit_range = [
            ("player_friction", self.player_friction),
            ("bounce_damping", self.bounce_damping),
        ];
        for (field, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::OutOfRange {
                    field,
                    value,
                    min: 0.0,
                    max: 1.0,
                });
            }
        }
        if !(-1.0..=0.0).contains(&self.wall_restitution) {
            return Err(TuningError::OutOfRange {
                field: "wall_restitution",
                value: self.wall_restitution,
                min: -1.0,
                max: 0.0,
            });
        }

        let min_extent = 2.0 * (self.coin_radius + self.coin_spawn_margin + self.hud_margin)
            .max(self.player_radius);
        if self.canvas_width < min_extent || self.canvas_height < min_extent {
            return Err(TuningError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                radius: self.player_radius,
            });
        }

        if self.enemy_launch_speed_min > self.enemy_launch_speed_max {
            return Err(TuningError::EmptyLaunchSpeedRange {
                min: self.enemy_launch_speed_min,
                max: self.enemy_launch_speed_max,
            });
        }

        // Otherwise a fresh enemy is already out of bounds on its first tick
        if self.enemy_escape_margin <= self.enemy_spawn_offset {
            return Err(TuningError::EscapeInsideSpawn {
                margin: self.enemy_escape_margin,
                offset: self.enemy_spawn_offset,
            });
        }

        Ok(())
    }
}
