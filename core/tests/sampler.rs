//! Weighted reward sampler tests.

use fishpond_core::{
    config::{default_reward_bands, RewardBand},
    rng::GameRng,
    sampler,
};

/// The stock table: five bands, total weight 100. Payout behavior
/// depends on these exact numbers.
#[test]
fn default_band_table_is_preserved() {
    let bands = default_reward_bands();
    assert_eq!(bands.len(), 5);
    assert_eq!(bands[0], RewardBand::new(0.0, 0.5, 40.0));
    assert_eq!(bands[1], RewardBand::new(0.5, 0.9, 30.0));
    assert_eq!(bands[2], RewardBand::new(0.9, 1.2, 20.0));
    assert_eq!(bands[3], RewardBand::new(1.5, 3.0, 8.0));
    assert_eq!(bands[4], RewardBand::new(3.0, 5.0, 2.0));
    assert!((sampler::total_weight(&bands) - 100.0).abs() < 1e-9);
}

/// With disjoint bands, every draw lands inside exactly one band and
/// carries at most 2 decimals.
#[test]
fn draws_land_in_exactly_one_band() {
    let bands = vec![
        RewardBand::new(0.0, 1.0, 1.0),
        RewardBand::new(10.0, 11.0, 1.0),
    ];
    let mut rng = GameRng::seed_from_u64(7);
    for _ in 0..1_000 {
        let m = sampler::sample(&bands, &mut rng);
        let containing = bands.iter().filter(|b| b.low <= m && m <= b.high).count();
        assert_eq!(containing, 1, "multiplier {m} not in exactly one band");
        let scaled = m * 100.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "multiplier {m} has more than 2 decimals"
        );
    }
}

/// Per-band selection frequency converges to weight / total over a
/// large trial count.
#[test]
fn band_frequencies_converge_to_weights() {
    let bands = vec![
        RewardBand::new(0.0, 1.0, 40.0),
        RewardBand::new(10.0, 11.0, 30.0),
        RewardBand::new(20.0, 21.0, 20.0),
        RewardBand::new(30.0, 31.0, 8.0),
        RewardBand::new(40.0, 41.0, 2.0),
    ];
    let total = sampler::total_weight(&bands);
    let mut counts = [0usize; 5];
    let mut rng = GameRng::seed_from_u64(0xF154);

    const TRIALS: usize = 20_000;
    for _ in 0..TRIALS {
        let m = sampler::sample(&bands, &mut rng);
        let idx = bands
            .iter()
            .position(|b| b.low <= m && m <= b.high)
            .expect("draw outside every band");
        counts[idx] += 1;
    }

    for (i, band) in bands.iter().enumerate() {
        let expected = band.weight / total;
        let observed = counts[i] as f64 / TRIALS as f64;
        assert!(
            (observed - expected).abs() < 0.02,
            "band {i}: observed {observed:.3}, expected {expected:.3}"
        );
    }
}

/// A single-point band pins the multiplier exactly.
#[test]
fn single_point_band_pins_multiplier() {
    let bands = vec![RewardBand::new(0.7, 0.7, 1.0)];
    let mut rng = GameRng::seed_from_u64(1);
    for _ in 0..100 {
        assert_eq!(sampler::sample(&bands, &mut rng), 0.7);
    }
}

/// Zero-weight bands are never selected.
#[test]
fn zero_weight_band_is_skipped() {
    let bands = vec![
        RewardBand::new(0.0, 1.0, 0.0),
        RewardBand::new(5.0, 6.0, 1.0),
    ];
    let mut rng = GameRng::seed_from_u64(99);
    for _ in 0..1_000 {
        let m = sampler::sample(&bands, &mut rng);
        assert!((5.0..=6.0).contains(&m), "drew {m} from the dead band");
    }
}
