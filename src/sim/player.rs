//! Player motion: acceleration, friction, speed clamp, wall bounce

use glam::Vec2;

use super::PICKUP_SEQUENCE;
use super::collision::bounce_inside_rect;
use super::state::Player;
use crate::tuning::Tuning;

impl Player {
    /// Integrate one tick of input.
    ///
    /// `direction` is the combined key/joystick vector; each axis adds
    /// `acceleration * component` to velocity. Diagonals are not
    /// normalized, so moving diagonally is faster.
    pub fn update_motion(&mut self, direction: Vec2, tuning: &Tuning) {
        self.vel += direction * tuning.player_acceleration;
        self.vel *= tuning.player_friction;

        let max = tuning.player_max_speed;
        self.vel = self.vel.clamp(Vec2::splat(-max), Vec2::splat(max));

        self.pos += self.vel;

        let canvas = Vec2::new(tuning.canvas_width, tuning.canvas_height);
        let contact = bounce_inside_rect(
            &mut self.pos,
            &mut self.vel,
            self.radius,
            canvas,
            tuning.wall_restitution,
        );
        if contact.any() {
            log::trace!("Player bounced off wall at {:?}", self.pos);
        }
    }

    /// Pickup feedback: pop the scale and play the pickup face
    pub fn celebrate(&mut self, tuning: &Tuning) {
        self.spring.pop(tuning.pop_scale, tuning.pop_velocity);
        self.sprite.play(PICKUP_SEQUENCE);
    }

    /// Advance the scale spring one tick
    pub fn step_spring(&mut self, tuning: &Tuning) {
        self.spring
            .step(tuning.rest_scale, tuning.bounce_stiffness, tuning.bounce_damping);
    }

    /// Advance the sprite sequence one tick
    pub fn step_sprite(&mut self, tuning: &Tuning) {
        self.sprite.step(tuning.frame_interval);
    }
}
