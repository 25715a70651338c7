//! Proximity tests and steering helpers
//!
//! Everything in the game is a circle on an axis-aligned canvas, so hit
//! testing is center distance against summed radii.

use glam::Vec2;

use crate::direction_to;

/// Which canvas edges a containment pass touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallContact {
    pub horizontal: bool,
    pub vertical: bool,
}

impl WallContact {
    pub fn any(&self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Strict overlap: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance(b) < a_radius + b_radius
}

/// Keep a circle inside `[0, size]` on both axes. Any velocity component
/// that pushed it across an edge is multiplied by `restitution`.
pub fn bounce_inside_rect(
    pos: &mut Vec2,
    vel: &mut Vec2,
    radius: f32,
    size: Vec2,
    restitution: f32,
) -> WallContact {
    let mut contact = WallContact::default();

    if pos.x - radius < 0.0 {
        pos.x = radius;
        vel.x *= restitution;
        contact.horizontal = true;
    }
    if pos.x + radius > size.x {
        pos.x = size.x - radius;
        vel.x *= restitution;
        contact.horizontal = true;
    }
    if pos.y - radius < 0.0 {
        pos.y = radius;
        vel.y *= restitution;
        contact.vertical = true;
    }
    if pos.y + radius > size.y {
        pos.y = size.y - radius;
        vel.y *= restitution;
        contact.vertical = true;
    }

    contact
}

/// True once a point has left the canvas by more than `margin`
#[inline]
pub fn outside_margin(pos: Vec2, size: Vec2, margin: f32) -> bool {
    pos.x < -margin || pos.x > size.x + margin || pos.y < -margin || pos.y > size.y + margin
}

/// Move `pos` up to `step` units toward `target`.
///
/// The step never overshoots, and nothing moves once the two points are
/// within `epsilon`. Returns whether `pos` moved.
pub fn pull_toward(pos: &mut Vec2, target: Vec2, step: f32, epsilon: f32) -> bool {
    match direction_to(*pos, target, epsilon) {
        Some((dir, dist)) => {
            *pos += dir * step.min(dist);
            true
        }
        None => false,
    }
}

/// Nudge a velocity by a fixed magnitude toward `target`
pub fn steer_toward(vel: &mut Vec2, from: Vec2, target: Vec2, strength: f32, epsilon: f32) {
    if let Some((dir, _)) = direction_to(from, target, epsilon) {
        *vel += dir * strength;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_overlap_is_strict() {
        assert!(circles_overlap(Vec2::ZERO, 40.0, Vec2::new(54.9, 0.0), 15.0));
        assert!(!circles_overlap(Vec2::ZERO, 40.0, Vec2::new(55.0, 0.0), 15.0));
    }

    #[test]
    fn test_bounce_left_wall() {
        let mut pos = Vec2::new(30.0, 300.0);
        let mut vel = Vec2::new(-8.0, 2.0);
        let contact = bounce_inside_rect(&mut pos, &mut vel, 40.0, CANVAS, -0.5);

        assert!(contact.horizontal && !contact.vertical);
        assert_eq!(pos, Vec2::new(40.0, 300.0));
        assert_eq!(vel, Vec2::new(4.0, 2.0));
    }

    #[test]
    fn test_bounce_corner() {
        let mut pos = Vec2::new(790.0, 595.0);
        let mut vel = Vec2::new(6.0, 6.0);
        let contact = bounce_inside_rect(&mut pos, &mut vel, 40.0, CANVAS, -0.5);

        assert!(contact.horizontal && contact.vertical);
        assert_eq!(pos, Vec2::new(760.0, 560.0));
        assert_eq!(vel, Vec2::new(-3.0, -3.0));
    }

    #[test]
    fn test_inside_untouched() {
        let mut pos = Vec2::new(400.0, 300.0);
        let mut vel = Vec2::new(3.0, -3.0);
        assert!(!bounce_inside_rect(&mut pos, &mut vel, 40.0, CANVAS, -0.5).any());
        assert_eq!(vel, Vec2::new(3.0, -3.0));
    }

    #[test]
    fn test_outside_margin() {
        assert!(!outside_margin(Vec2::new(-49.0, 10.0), CANVAS, 50.0));
        assert!(outside_margin(Vec2::new(-51.0, 10.0), CANVAS, 50.0));
        assert!(outside_margin(Vec2::new(400.0, 651.0), CANVAS, 50.0));
    }

    #[test]
    fn test_pull_does_not_overshoot() {
        let target = Vec2::new(100.0, 100.0);
        let mut pos = Vec2::new(103.0, 100.0);
        assert!(pull_toward(&mut pos, target, 5.0, 1.0));
        assert!(pos.distance(target) < 1e-4);
        assert!(!pull_toward(&mut pos, target, 5.0, 1.0));
    }

    #[test]
    fn test_steer_skips_zero_distance() {
        let mut vel = Vec2::new(1.0, 0.0);
        steer_toward(&mut vel, Vec2::ONE, Vec2::ONE, 0.1, f32::EPSILON);
        assert_eq!(vel, Vec2::new(1.0, 0.0));
        assert!(vel.is_finite());
    }
}
