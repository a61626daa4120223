//! Outcome notifier contract tests.
//!
//! The contract under test: reports reach the sink, delivery failures
//! never reach the wager result, and the pool drains on shutdown.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use parking_lot::Mutex;

use fishpond_core::{
    clock::ManualClock,
    config::{RewardBand, WipeBombConfig},
    models::User,
    notifier::{OutcomeNotifier, ReportSink, WipeBombReport},
    store::GameStore,
    wager_engine::{WagerEngine, WipeBombOutcome},
};

#[derive(Clone, Default)]
struct RecordingSink {
    received: Arc<Mutex<Vec<WipeBombReport>>>,
}

impl ReportSink for RecordingSink {
    fn deliver(&self, report: &WipeBombReport) -> anyhow::Result<()> {
        self.received.lock().push(report.clone());
        Ok(())
    }
}

struct FailingSink;

impl ReportSink for FailingSink {
    fn deliver(&self, _report: &WipeBombReport) -> anyhow::Result<()> {
        anyhow::bail!("collector offline")
    }
}

fn engine_with_notifier(notifier: OutcomeNotifier) -> (Arc<Mutex<GameStore>>, WagerEngine) {
    let store = GameStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
        .insert_user(&User {
            user_id: "alice".into(),
            nickname: "Alice".into(),
            coins: 1_000,
            last_steal_time: None,
        })
        .expect("insert user");
    let store = Arc::new(Mutex::new(store));
    let clock = Arc::new(ManualClock::at(
        Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap(),
    ));
    let config = WipeBombConfig {
        reward_bands: vec![RewardBand::new(0.7, 0.7, 1.0)],
    };
    let engine = WagerEngine::new(store.clone(), clock, config, Some(notifier)).expect("engine");
    (store, engine)
}

#[test]
fn reports_reach_the_sink() {
    let sink = RecordingSink::default();
    let received = Arc::clone(&sink.received);
    let (_store, engine) = engine_with_notifier(OutcomeNotifier::new(sink));

    engine.perform_wipe_bomb("alice", 100).unwrap();
    drop(engine); // joins the pool, guaranteeing delivery

    let reports = received.lock();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].user_id, "alice");
    assert_eq!(reports[0].contribution_amount, 100);
    assert_eq!(reports[0].reward_multiplier, 0.7);
    assert_eq!(reports[0].reward_amount, 70);
    assert_eq!(reports[0].profit, -30);
}

/// A dead collector changes nothing about the wager itself.
#[test]
fn sink_failure_never_surfaces_to_the_caller() {
    let (store, engine) = engine_with_notifier(OutcomeNotifier::new(FailingSink));

    let outcome = engine.perform_wipe_bomb("alice", 100).unwrap();
    let WipeBombOutcome::Success(receipt) = outcome else {
        panic!("expected success despite failing sink");
    };
    assert_eq!(receipt.profit, -30);
    drop(engine);

    let guard = store.lock();
    assert_eq!(guard.get_user("alice").unwrap().unwrap().coins, 970);
    assert_eq!(guard.list_wipe_bomb_logs("alice", 10).unwrap().len(), 1);
}

/// Dropping the notifier drains every queued report.
#[test]
fn pool_drains_on_shutdown() {
    let sink = RecordingSink::default();
    let received = Arc::clone(&sink.received);
    let notifier = OutcomeNotifier::with_workers(sink, 2);

    for i in 0..20 {
        notifier.dispatch(WipeBombReport {
            user_id: format!("user-{i}"),
            contribution_amount: 10,
            reward_multiplier: 1.0,
            reward_amount: 10,
            profit: 0,
            timestamp: "2026-08-06T12:00:00+00:00".into(),
        });
    }
    drop(notifier);

    assert_eq!(received.lock().len(), 20);
}
