//! Game state and entity slots
//!
//! Every entity is a fixed slot that is reused through its `active` flag or
//! respawn function. Nothing is allocated per spawn.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::animation::{ScaleSpring, SpriteAnimator};
use super::events::GameEvent;
use super::upgrades::Upgrades;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Simulation advances every tick
    Playing,
    /// Ticks still run but nothing moves
    Paused,
}

/// Why the simulation is paused. Each source is tracked separately so
/// one resuming does not cancel the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseReason {
    /// The upgrade shop is open
    UpgradeMenu,
    /// The page is hidden (tab switch, minimized)
    Hidden,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PauseFlags {
    menu: bool,
    hidden: bool,
}

impl PauseFlags {
    fn set(&mut self, reason: PauseReason, paused: bool) {
        match reason {
            PauseReason::UpgradeMenu => self.menu = paused,
            PauseReason::Hidden => self.hidden = paused,
        }
    }

    fn any(&self) -> bool {
        self.menu || self.hidden
    }
}

/// The player's avatar
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Nominal radius used for every hit test (not the drawn, scaled size)
    pub radius: f32,
    /// Squash/pop feedback; renderer multiplies the radius by `spring.scale`
    pub spring: ScaleSpring,
    pub sprite: SpriteAnimator,
}

impl Player {
    pub fn new(pos: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            spring: ScaleSpring::new(tuning.start_scale),
            sprite: SpriteAnimator::default(),
        }
    }

    /// Radius the renderer should draw at this tick
    pub fn drawn_radius(&self) -> f32 {
        self.radius * self.spring.scale
    }
}

/// The single coin. It always exists; pickup or timeout moves it.
#[derive(Debug, Clone)]
pub struct Coin {
    pub pos: Vec2,
    pub radius: f32,
    /// Ticks since the coin last (re)spawned
    pub age: u32,
}

/// Bonus pickup that grants score and currency
#[derive(Debug, Clone)]
pub struct MoneyBag {
    pub pos: Vec2,
    /// Pickup radius (independent of the sprite size)
    pub radius: f32,
    pub active: bool,
    /// Ticks spent active
    pub age: u32,
    /// Ticks spent inactive since the last transition
    pub cooldown: u32,
}

/// The chaser. Homes in on the coin, not the player.
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Contact radius (half the sprite size)
    pub radius: f32,
    pub active: bool,
    /// Ticks spent inactive since the last despawn
    pub spawn_timer: u32,
    /// Randomized delay the spawn timer must exceed
    pub next_spawn: u32,
}

/// Complete simulation state. Owned by one host, read by renderer and HUD.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub rng: Pcg32,
    /// Simulation tick counter (paused ticks not counted)
    pub time_ticks: u64,
    pub phase: GamePhase,
    pause: PauseFlags,
    pub player: Player,
    pub coin: Coin,
    pub money_bag: MoneyBag,
    pub enemy: Enemy,
    pub upgrades: Upgrades,
    pub score: u32,
    pub currency: u32,
    /// Side effects raised during ticks, drained by the host
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new session with the given seed and balance
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let center = Vec2::new(tuning.canvas_width / 2.0, tuning.canvas_height / 2.0);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            pause: PauseFlags::default(),
            player: Player::new(center, &tuning),
            coin: Coin {
                pos: center,
                radius: tuning.coin_radius,
                age: 0,
            },
            money_bag: MoneyBag {
                pos: center,
                radius: tuning.money_bag_radius,
                active: false,
                age: 0,
                cooldown: 0,
            },
            enemy: Enemy {
                pos: Vec2::ZERO,
                vel: Vec2::ZERO,
                radius: tuning.enemy_size / 2.0,
                active: false,
                spawn_timer: 0,
                next_spawn: 0,
            },
            upgrades: Upgrades::default(),
            score: 0,
            currency: 0,
            events: Vec::new(),
            tuning,
        };

        state.coin.respawn(&mut state.rng, &state.tuning);
        state.enemy.next_spawn = super::enemy::next_spawn_delay(&mut state.rng, &state.tuning);
        state.events.push(GameEvent::SessionStarted);
        log::debug!("New session (seed {seed})");

        state
    }

    /// Pause or resume for one reason; stays paused while any reason holds
    pub fn set_paused(&mut self, reason: PauseReason, paused: bool) {
        self.pause.set(reason, paused);
        let phase = if self.pause.any() {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        };
        if phase != self.phase {
            log::debug!("Phase {:?} -> {:?} ({:?})", self.phase, phase, reason);
            self.phase = phase;
        }
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Add score and currency, saturating
    pub fn award(&mut self, score: u32, currency: u32) {
        self.score = self.score.saturating_add(score);
        self.currency = self.currency.saturating_add(currency);
    }

    /// Subtract score, flooring at zero
    pub fn penalize(&mut self, score: u32) {
        self.score = self.score.saturating_sub(score);
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Events raised since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn currency_label(&self) -> String {
        format!("$: {}", self.currency)
    }
}
