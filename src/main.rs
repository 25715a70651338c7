//! Coin Rush native entry point
//!
//! The browser build starts from `coin_rush::web::run`; natively this runs a
//! headless autopilot session.

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is coin_rush::web::run, this is just to satisfy the compiler
}

/// Headless autopilot session: `coin-rush [ticks] [seed] [tuning.json]`
#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use coin_rush::Tuning;
    use coin_rush::sim::{GameEvent, GameState, TickInput, UpgradeKind, tick};

    env_logger::init();
    log::info!("Coin Rush (native) starting headless autopilot run...");

    let mut args = std::env::args().skip(1);
    let ticks: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(60 * 60);
    let seed: u64 = args.next().map(|s| s.parse::<u64>()).transpose()?.unwrap_or(1);
    let tuning = match args.next() {
        Some(path) => Tuning::from_json(&std::fs::read_to_string(&path)?)?,
        None => Tuning::default(),
    };

    let mut state = GameState::new(seed, tuning);
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    let (mut coins, mut bags, mut hits, mut catches) = (0u32, 0u32, 0u32, 0u32);
    let mut next_upgrade = UpgradeKind::Invincibility;

    for _ in 0..ticks {
        tick(&mut state, &input);

        if state.purchase(next_upgrade).is_ok() {
            next_upgrade = match next_upgrade {
                UpgradeKind::Vacuum => UpgradeKind::Invincibility,
                UpgradeKind::Invincibility => UpgradeKind::Vacuum,
            };
        }

        let now = state.time_ticks;
        for event in state.drain_events() {
            log::debug!("t={now} {event:?}");
            match event {
                GameEvent::CoinCollected { .. } => coins += 1,
                GameEvent::MoneyBagCollected { .. } => bags += 1,
                GameEvent::PlayerHit => hits += 1,
                GameEvent::EnemyCaught => catches += 1,
                _ => {}
            }
        }
    }

    log::info!(
        "Run finished after {} ticks: coins {coins}, bags {bags}, hits {hits}, catches {catches}",
        state.time_ticks
    );
    println!("{}  {}", state.score_label(), state.currency_label());
    Ok(())
}
