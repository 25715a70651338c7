//! Coin and money-bag spawners
//!
//! The coin always exists and jumps to a fresh spot on pickup or timeout.
//! The money bag alternates between an inactive cooldown and a short
//! active window.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{circles_overlap, pull_toward};
use super::events::GameEvent;
use super::state::{Coin, GameState, MoneyBag};
use crate::consts::PULL_EPSILON;
use crate::tuning::Tuning;

/// Uniform in `[lo, hi)`, or the midpoint when the range is empty
fn uniform(rng: &mut Pcg32, lo: f32, hi: f32) -> f32 {
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        (lo + hi) / 2.0
    }
}

/// Random point inset by `inset` from every edge, with extra HUD clearance
/// at the top and bottom
pub fn spawn_point(rng: &mut Pcg32, tuning: &Tuning, inset: f32) -> Vec2 {
    let inset_y = inset + tuning.hud_margin;
    let x = uniform(rng, inset, tuning.canvas_width - inset);
    let y = uniform(rng, inset_y, tuning.canvas_height - inset_y);
    Vec2::new(x, y)
}

impl Coin {
    /// Move to a new random spot and restart the lifetime
    pub fn respawn(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        self.pos = spawn_point(rng, tuning, self.radius + tuning.coin_spawn_margin);
        self.age = 0;
    }
}

impl MoneyBag {
    fn activate(&mut self, rng: &mut Pcg32, tuning: &Tuning) {
        self.pos = spawn_point(rng, tuning, self.radius);
        self.active = true;
        self.age = 0;
        self.cooldown = 0;
    }

    fn deactivate(&mut self) {
        self.active = false;
        self.age = 0;
        self.cooldown = 0;
    }
}

/// Coin lifetime, vacuum pull and pickup
pub(crate) fn update_coin(state: &mut GameState) {
    state.coin.age += 1;
    if state.coin.age >= state.tuning.coin_lifetime {
        state.coin.respawn(&mut state.rng, &state.tuning);
        state.events.push(GameEvent::CoinExpired);
        log::trace!("Coin expired, respawned at {:?}", state.coin.pos);
    }

    // Pickup is decided on where the coin was before this tick's pull
    let reached = circles_overlap(
        state.player.pos,
        state.player.radius,
        state.coin.pos,
        state.coin.radius,
    );

    if state.upgrades.vacuum.active {
        pull_toward(
            &mut state.coin.pos,
            state.player.pos,
            state.tuning.vacuum_pull,
            PULL_EPSILON,
        );
    }

    if reached {
        let at = state.coin.pos;
        state.coin.respawn(&mut state.rng, &state.tuning);
        state.award(state.tuning.coin_score, 0);
        state.player.celebrate(&state.tuning);
        state.events.push(GameEvent::CoinCollected { at });
        log::trace!("Coin collected at {at:?}, score {}", state.score);
    }

    state.player.step_spring(&state.tuning);
}

/// Money-bag cooldown, lifetime and pickup
pub(crate) fn update_money_bag(state: &mut GameState) {
    let bag = &mut state.money_bag;
    if !bag.active {
        bag.cooldown += 1;
        if bag.cooldown > state.tuning.money_bag_spawn_interval {
            bag.activate(&mut state.rng, &state.tuning);
            state.events.push(GameEvent::MoneyBagSpawned { at: bag.pos });
            log::trace!("Money bag spawned at {:?}", bag.pos);
        }
    } else {
        bag.age += 1;
        if bag.age > state.tuning.money_bag_lifetime {
            bag.deactivate();
            state.events.push(GameEvent::MoneyBagExpired);
            log::trace!("Money bag expired");
        }
    }

    if state.money_bag.active
        && circles_overlap(
            state.player.pos,
            state.player.radius,
            state.money_bag.pos,
            state.money_bag.radius,
        )
    {
        let at = state.money_bag.pos;
        state.money_bag.deactivate();
        state.award(state.tuning.money_bag_score, state.tuning.money_bag_currency);
        state.player.celebrate(&state.tuning);
        state.events.push(GameEvent::MoneyBagCollected { at });
        log::trace!("Money bag collected, currency {}", state.currency);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::UpgradeKind;
    use rand::SeedableRng;

    fn quiet_state() -> GameState {
        let mut state = GameState::new(42, Tuning::default());
        state.drain_events().for_each(drop);
        state
    }

    #[test]
    fn test_spawn_point_respects_inset() {
        let tuning = Tuning {
            hud_margin: 60.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..500 {
            let p = spawn_point(&mut rng, &tuning, 25.0);
            assert!((25.0..=775.0).contains(&p.x));
            assert!((85.0..=515.0).contains(&p.y));
        }
    }

    #[test]
    fn test_spawn_point_degenerate_canvas() {
        let tuning = Tuning::default().with_canvas(40.0, 40.0);
        let mut rng = Pcg32::seed_from_u64(3);
        assert_eq!(spawn_point(&mut rng, &tuning, 25.0), Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_coin_pickup_on_contact() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(100.0, 100.0);
        state.coin.pos = Vec2::new(100.0, 100.0);
        state.coin.age = 17;

        update_coin(&mut state);

        assert_eq!(state.score, 100);
        assert_eq!(state.coin.age, 0);
        assert_ne!(state.coin.pos, Vec2::new(100.0, 100.0));
        assert!(matches!(
            state.pending_events(),
            [GameEvent::CoinCollected { .. }]
        ));
    }

    #[test]
    fn test_coin_times_out() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(-500.0, -500.0);
        state.coin.pos = Vec2::new(700.0, 500.0);
        state.coin.age = state.tuning.coin_lifetime - 1;

        update_coin(&mut state);

        assert_eq!(state.score, 0);
        assert_eq!(state.pending_events(), &[GameEvent::CoinExpired]);
        assert_eq!(state.coin.age, 0);
        assert_ne!(state.coin.pos, Vec2::new(700.0, 500.0));
    }

    #[test]
    fn test_vacuum_pulls_coin_closer() {
        let mut state = quiet_state();
        state.upgrades.get_mut(UpgradeKind::Vacuum).active = true;
        state.player.pos = Vec2::new(400.0, 300.0);
        state.coin.pos = Vec2::new(500.0, 300.0);

        let mut last = state.coin.pos.distance(state.player.pos);
        for _ in 0..5 {
            update_coin(&mut state);
            let dist = state.coin.pos.distance(state.player.pos);
            assert!((last - dist - 5.0).abs() < 1e-3);
            last = dist;
        }
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_vacuumed_coin_collected_on_next_tick() {
        let mut state = quiet_state();
        state.upgrades.get_mut(UpgradeKind::Vacuum).active = true;
        state.player.pos = Vec2::new(400.0, 300.0);
        state.coin.pos = Vec2::new(458.0, 300.0);

        // 58 apart at the start of the tick: pulled to 53, not yet collected
        update_coin(&mut state);
        assert_eq!(state.score, 0);
        assert!((state.coin.pos.x - 453.0).abs() < 1e-4);
        assert!(state.pending_events().is_empty());

        update_coin(&mut state);
        assert_eq!(state.score, 100);
        assert!(matches!(
            state.pending_events(),
            [GameEvent::CoinCollected { .. }]
        ));
    }

    #[test]
    fn test_coin_pickup_steps_spring_same_update() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(100.0, 100.0);
        state.coin.pos = Vec2::new(100.0, 100.0);

        update_coin(&mut state);

        // The spring steps once in the same update, after the pop
        assert!((state.player.spring.scale - 1.74).abs() < 1e-5);
    }

    #[test]
    fn test_money_bag_cycle() {
        let mut state = quiet_state();
        state.player.pos = Vec2::new(-1000.0, -1000.0);
        let interval = state.tuning.money_bag_spawn_interval;

        for _ in 0..interval {
            update_money_bag(&mut state);
        }
        assert!(!state.money_bag.active);
        update_money_bag(&mut state);
        assert!(state.money_bag.active);
        assert_eq!(state.money_bag.cooldown, 0);

        for _ in 0..=state.tuning.money_bag_lifetime {
            update_money_bag(&mut state);
        }
        assert!(!state.money_bag.active);
        assert_eq!(state.money_bag.cooldown, 0);
        assert!(matches!(
            state.pending_events(),
            [GameEvent::MoneyBagSpawned { .. }, GameEvent::MoneyBagExpired]
        ));
    }

    #[test]
    fn test_money_bag_pickup_rewards_both() {
        let mut state = quiet_state();
        state.money_bag.active = true;
        state.money_bag.pos = Vec2::new(200.0, 200.0);
        state.player.pos = Vec2::new(230.0, 200.0);

        update_money_bag(&mut state);

        assert!(!state.money_bag.active);
        assert_eq!(state.money_bag.cooldown, 0);
        assert_eq!(state.score, 100);
        assert_eq!(state.currency, 100);
        assert!(state.player.sprite.is_animating());
    }
}
