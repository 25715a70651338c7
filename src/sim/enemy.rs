//! Enemy controller
//!
//! The enemy waits a random number of ticks, enters from a random edge
//! heading into the arena, then homes in on the coin. It despawns when it
//! touches the player or drifts too far off screen.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{outside_margin, steer_toward};
use super::events::GameEvent;
use super::state::{Enemy, GameState};
use crate::tuning::Tuning;
use crate::unit_from_angle;

/// Canvas edge the enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Start of the quarter-turn heading window pointing into the arena
    /// (screen space, +y down)
    pub fn heading_start(self) -> f32 {
        match self {
            Edge::Top => FRAC_PI_4,
            Edge::Right => 3.0 * FRAC_PI_4,
            Edge::Bottom => 5.0 * FRAC_PI_4,
            Edge::Left => -FRAC_PI_4,
        }
    }

    /// Spawn point just outside this edge, `along` in `[0, 1)` of its length
    fn spawn_position(self, along: f32, offset: f32, size: Vec2) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(along * size.x, -offset),
            Edge::Right => Vec2::new(size.x + offset, along * size.y),
            Edge::Bottom => Vec2::new(along * size.x, size.y + offset),
            Edge::Left => Vec2::new(-offset, along * size.y),
        }
    }
}

/// Fresh random inactive delay
pub fn next_spawn_delay(rng: &mut Pcg32, tuning: &Tuning) -> u32 {
    if tuning.enemy_spawn_delay_max == 0 {
        0
    } else {
        rng.random_range(0..tuning.enemy_spawn_delay_max)
    }
}

impl Enemy {
    /// Enter the arena from `edge` with the given launch parameters
    pub fn launch(&mut self, edge: Edge, along: f32, heading: f32, speed: f32, tuning: &Tuning) {
        let size = Vec2::new(tuning.canvas_width, tuning.canvas_height);
        self.pos = edge.spawn_position(along, tuning.enemy_spawn_offset, size);
        self.vel = unit_from_angle(heading) * speed;
        self.active = true;
    }

    /// Enter from a uniformly chosen edge with a random inward heading
    pub fn spawn(&mut self, rng: &mut Pcg32, tuning: &Tuning) -> Edge {
        let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
        let along = rng.random_range(0.0..1.0);
        let heading = edge.heading_start() + rng.random_range(0.0..FRAC_PI_2);
        let speed = if tuning.enemy_launch_speed_max > tuning.enemy_launch_speed_min {
            rng.random_range(tuning.enemy_launch_speed_min..tuning.enemy_launch_speed_max)
        } else {
            tuning.enemy_launch_speed_min
        };
        self.launch(edge, along, heading, speed, tuning);
        edge
    }

    /// Go inactive and draw a new spawn delay
    pub fn retire(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        self.active = false;
        self.spawn_timer = 0;
        self.next_spawn = next_spawn_delay(rng, tuning);
    }

    /// Homing toward `target`, speed clamp, integration
    fn steer(&mut self, target: Vec2, tuning: &Tuning) {
        steer_toward(
            &mut self.vel,
            self.pos,
            target,
            tuning.enemy_homing_pull,
            f32::EPSILON,
        );
        self.vel = self.vel.clamp_length_max(tuning.enemy_max_speed);
        self.pos += self.vel;
    }
}

/// Spawn countdown, homing and collision outcome
pub(crate) fn update_enemy(state: &mut GameState) {
    if !state.enemy.active {
        state.enemy.spawn_timer += 1;
        if state.enemy.spawn_timer > state.enemy.next_spawn {
            let edge = state.enemy.spawn(&mut state.rng, &state.tuning);
            state.events.push(GameEvent::EnemySpawned { edge });
            log::debug!("Enemy entered from {edge:?} at {:?}", state.enemy.pos);
        }
        return;
    }

    state.enemy.steer(state.coin.pos, &state.tuning);

    let contact = state.tuning.enemy_contact_distance();
    if state.enemy.pos.distance(state.player.pos) < contact {
        state.enemy.retire(&mut state.rng, &state.tuning);
        if state.upgrades.invincibility.active {
            state.award(state.tuning.enemy_catch_score, 0);
            state.player.celebrate(&state.tuning);
            state.events.push(GameEvent::EnemyCaught);
            log::debug!("Enemy caught while invincible, score {}", state.score);
        } else {
            state.penalize(state.tuning.enemy_hit_penalty);
            state.player.sprite.hurt();
            state.events.push(GameEvent::PlayerHit);
            log::debug!("Player hit, score {}", state.score);
        }
        return;
    }

    let canvas = Vec2::new(state.tuning.canvas_width, state.tuning.canvas_height);
    if outside_margin(state.enemy.pos, canvas, state.tuning.enemy_escape_margin) {
        state.enemy.retire(&mut state.rng, &state.tuning);
        state.events.push(GameEvent::EnemyEscaped);
        log::trace!("Enemy left the arena");
    }
}
