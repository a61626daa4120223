//! Fishpond game mechanics: the wipe bomb wager and fish theft, over a
//! SQLite-backed player economy.
//!
//! RULES:
//!   - The store owns all SQL; engines own all game rules.
//!   - Randomness and time flow through seams (`GameRng`, `Clock`).
//!   - Business denials are returned as data, never raised as errors.
//!   - Outcome reporting is best-effort and can never fail a wager.

pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod notifier;
pub mod rng;
pub mod sampler;
pub mod store;
pub mod theft_engine;
pub mod types;
pub mod wager_engine;
