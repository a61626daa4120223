//! pond-runner: headless driver for the fishpond game mechanics.
//!
//! Usage:
//!   pond-runner --db pond.db seed-demo
//!   pond-runner --db pond.db wipe-bomb alice 100
//!   pond-runner --db pond.db steal bob alice
//!   pond-runner --db pond.db history alice --limit 10

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use parking_lot::Mutex;

use fishpond_core::{
    clock::SystemClock,
    config::GameConfig,
    models::User,
    notifier::{HttpSink, OutcomeNotifier},
    rng::GameRng,
    store::GameStore,
    theft_engine::{StealOutcome, TheftEngine},
    wager_engine::{WagerEngine, WipeBombOutcome},
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = flag_value(&args, "--db").unwrap_or("pond.db");
    let limit: u32 = flag_value(&args, "--limit").unwrap_or("10").parse()?;

    let config = match flag_value(&args, "--config") {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let store = GameStore::open(db)?;
    store.migrate()?;
    log::info!("opened {db}");
    let store = Arc::new(Mutex::new(store));
    let clock = Arc::new(SystemClock);

    let notifier = if config.notifier.enabled {
        let sink = HttpSink::new(
            config.notifier.endpoint.clone(),
            Duration::from_secs(config.notifier.request_timeout_secs),
        )?;
        Some(OutcomeNotifier::new(sink))
    } else {
        None
    };

    let mut wager = WagerEngine::new(
        store.clone(),
        clock.clone(),
        config.wipe_bomb.clone(),
        notifier,
    )?;
    let mut theft = TheftEngine::new(store.clone(), clock, config.steal.clone())?;
    if let Some(seed) = flag_value(&args, "--seed") {
        let seed: u64 = seed.parse()?;
        wager = wager.with_rng(GameRng::seed_from_u64(seed));
        theft = theft.with_rng(GameRng::seed_from_u64(seed ^ 1));
    }

    let command = positionals(&args);
    match command.as_slice() {
        ["seed-demo"] => seed_demo(&store),
        ["wipe-bomb", user_id, amount] => {
            let amount: i64 = amount.parse()?;
            match wager.perform_wipe_bomb(user_id, amount)? {
                WipeBombOutcome::Success(r) => {
                    println!(
                        "x{:.2} -> reward {} (profit {}), attempt #{} today",
                        r.multiplier, r.reward, r.profit, r.attempts_today
                    );
                }
                WipeBombOutcome::Denied(denial) => println!("denied: {denial}"),
            }
            Ok(())
        }
        ["steal", thief_id, victim_id] => {
            match theft.steal_fish(thief_id, victim_id)? {
                StealOutcome::Success(r) => {
                    println!(
                        "stole {} ({}★, {} coins) from {}",
                        r.fish_name, r.rarity, r.base_value, r.victim_nickname
                    );
                }
                StealOutcome::Denied(denial) => println!("denied: {denial}"),
            }
            Ok(())
        }
        ["history", user_id] => {
            let logs = wager.history(user_id, limit)?;
            if args.iter().any(|a| a == "--json") {
                println!("{}", serde_json::to_string_pretty(&logs)?);
                return Ok(());
            }
            for log in logs {
                println!(
                    "#{} {} stake {} x{:.2} -> {}",
                    log.log_id,
                    log.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    log.contribution_amount,
                    log.reward_multiplier,
                    log.reward_amount
                );
            }
            Ok(())
        }
        _ => bail!(
            "usage: pond-runner [--db FILE] [--config FILE] [--seed N] [--limit N] [--json] \
             <seed-demo | wipe-bomb USER AMOUNT | steal THIEF VICTIM | history USER>"
        ),
    }
}

fn seed_demo(store: &Arc<Mutex<GameStore>>) -> Result<()> {
    let guard = store.lock();
    if guard.get_user("alice")?.is_some() {
        println!("demo users already present, nothing to do");
        return Ok(());
    }
    for (user_id, nickname, coins) in [
        ("alice", "Alice", 1_000),
        ("bob", "Bob", 500),
        ("carol", "Carol", 2_000),
    ] {
        guard.insert_user(&User {
            user_id: user_id.into(),
            nickname: nickname.into(),
            coins,
            last_steal_time: None,
        })?;
    }
    // Alice starts with a stocked pond so `steal bob alice` has targets.
    guard.adjust_fish_quantity("alice", "carp", 3, 10)?;
    guard.adjust_fish_quantity("alice", "perch", 1, 60)?;
    println!("seeded demo users: alice, bob, carol");
    Ok(())
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--json" {
            i += 1; // boolean flag
        } else if args[i].starts_with("--") {
            i += 2; // flag plus its value
        } else {
            out.push(args[i].as_str());
            i += 1;
        }
    }
    out
}
