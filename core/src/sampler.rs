//! Weighted reward sampling for the wipe bomb.

use crate::{config::RewardBand, rng::GameRng};

/// Sum of band weights. A non-positive total cannot be sampled; callers
/// reject that before calling [`sample`].
pub fn total_weight(bands: &[RewardBand]) -> f64 {
    bands.iter().map(|b| b.weight).sum()
}

/// Draw a reward multiplier from the configured bands.
///
/// A uniform roll in [0, total_weight) selects the band by cumulative
/// weight walk; a second independent roll picks the multiplier inside
/// the band, rounded to 2 decimals. Float drift that carries the roll
/// past the final cumulative weight falls back to the last band.
pub fn sample(bands: &[RewardBand], rng: &mut GameRng) -> f64 {
    debug_assert!(!bands.is_empty(), "bands must be non-empty");
    let total = total_weight(bands);
    debug_assert!(total > 0.0, "total weight must be positive");

    let roll = rng.uniform(0.0, total);
    let mut cumulative = 0.0;
    let mut selected = bands[bands.len() - 1];
    for band in bands {
        cumulative += band.weight;
        if roll <= cumulative {
            selected = *band;
            break;
        }
    }

    round2(rng.uniform(selected.low, selected.high))
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
