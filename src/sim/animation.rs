//! Pickup feedback: a scale spring and a sprite-frame sequencer
//!
//! Both are purely numeric and only affect how the player is drawn.

/// Player sprite frames, in atlas order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerFrame {
    #[default]
    Idle,
    Bloodshot,
    EyesClosed,
    Hurt,
}

impl PlayerFrame {
    /// Index into the sprite atlas
    pub fn index(self) -> usize {
        match self {
            PlayerFrame::Idle => 0,
            PlayerFrame::Bloodshot => 1,
            PlayerFrame::EyesClosed => 2,
            PlayerFrame::Hurt => 3,
        }
    }
}

/// Played on every pickup
pub const PICKUP_SEQUENCE: &[PlayerFrame] = &[
    PlayerFrame::Bloodshot,
    PlayerFrame::EyesClosed,
    PlayerFrame::Bloodshot,
    PlayerFrame::Idle,
];

/// Damped spring pulling `scale` back to a rest value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleSpring {
    pub scale: f32,
    pub velocity: f32,
}

impl ScaleSpring {
    pub fn new(scale: f32) -> Self {
        Self {
            scale,
            velocity: 0.0,
        }
    }

    /// Perturb the spring (overshoot + kick)
    pub fn pop(&mut self, scale: f32, velocity: f32) {
        self.scale = scale;
        self.velocity = velocity;
    }

    /// Advance one tick toward `target`
    pub fn step(&mut self, target: f32, stiffness: f32, damping: f32) {
        let force = (target - self.scale) * stiffness;
        self.velocity = (self.velocity + force) * damping;
        self.scale += self.velocity;
    }
}

/// Steps through a frame sequence, holding each frame for a fixed
/// number of ticks, then falls back to `Idle`.
#[derive(Debug, Clone, Default)]
pub struct SpriteAnimator {
    pub frame: PlayerFrame,
    sequence: &'static [PlayerFrame],
    cursor: usize,
    hold: u32,
    animating: bool,
}

impl SpriteAnimator {
    /// Start `sequence` from its first frame
    pub fn play(&mut self, sequence: &'static [PlayerFrame]) {
        let Some(&first) = sequence.first() else {
            return;
        };
        self.sequence = sequence;
        self.cursor = 0;
        self.hold = 0;
        self.frame = first;
        self.animating = true;
    }

    /// Show the hurt face. Cancels any running sequence; the frame is held
    /// until the next `play`.
    pub fn hurt(&mut self) {
        self.animating = false;
        self.frame = PlayerFrame::Hurt;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advance one tick
    pub fn step(&mut self, frame_interval: u32) {
        if !self.animating {
            return;
        }
        self.hold += 1;
        if self.hold <= frame_interval {
            return;
        }
        self.hold = 0;
        self.cursor += 1;
        match self.sequence.get(self.cursor) {
            Some(&frame) => self.frame = frame,
            None => {
                self.animating = false;
                self.cursor = 0;
                self.frame = PlayerFrame::Idle;
            }
        }
    }
}
