//! Concurrency: currency conservation under contended wagers.
//!
//! Many threads hammer the same account; whatever the interleaving,
//! the final balance must equal the initial balance plus the sum of
//! every reported profit. A lost update shows up here immediately.

use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use fishpond_core::{
    clock::ManualClock,
    config::{RewardBand, WipeBombConfig},
    models::User,
    store::GameStore,
    wager_engine::{WagerEngine, WipeBombOutcome},
};

const INITIAL_BALANCE: i64 = 1_000_000;
const THREADS: usize = 8;
const WAGERS_PER_THREAD: usize = 50;

#[test]
fn concurrent_wipe_bombs_conserve_currency() {
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
        .insert_user(&User {
            user_id: "alice".into(),
            nickname: "Alice".into(),
            coins: INITIAL_BALANCE,
            last_steal_time: None,
        })
        .expect("insert user");
    let store = Arc::new(Mutex::new(store));
    let clock = Arc::new(ManualClock::at(
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
    ));

    let config = WipeBombConfig {
        reward_bands: vec![
            RewardBand::new(0.0, 0.5, 1.0),
            RewardBand::new(0.5, 1.5, 1.0),
        ],
    };
    let engine = Arc::new(
        WagerEngine::new(store.clone(), clock, config, None).expect("engine"),
    );

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let stake = (t as i64 + 1) * 10;
                let mut profit = 0;
                for _ in 0..WAGERS_PER_THREAD {
                    match engine.perform_wipe_bomb("alice", stake).expect("wager") {
                        WipeBombOutcome::Success(receipt) => profit += receipt.profit,
                        WipeBombOutcome::Denied(denial) => {
                            panic!("unexpected denial: {denial}")
                        }
                    }
                }
                profit
            })
        })
        .collect();

    let total_profit: i64 = handles
        .into_iter()
        .map(|h| h.join().expect("worker thread"))
        .sum();

    let final_balance = store.lock().get_user("alice").unwrap().unwrap().coins;
    assert_eq!(final_balance, INITIAL_BALANCE + total_profit);
    assert!(final_balance >= 0);

    // Every attempt left a log row.
    let attempts = store
        .lock()
        .list_wipe_bomb_logs("alice", (THREADS * WAGERS_PER_THREAD) as u32 + 1)
        .unwrap();
    assert_eq!(attempts.len(), THREADS * WAGERS_PER_THREAD);
}
