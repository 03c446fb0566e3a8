//! Randomized per-variant metric generators.
//!
//! Ranges deliberately overlap the warning and critical thresholds so a
//! running simulator produces a realistic mix of normal readings and alerts.

use rand::Rng;

use sentra_domain::metrics::MetricSet;
use sentra_domain::variant::Variant;

/// Generate one reading for `variant`.
pub fn generate(variant: Variant, rng: &mut impl Rng) -> MetricSet {
    match variant {
        Variant::Home => home(rng),
        Variant::Hospital => hospital(rng),
        Variant::Factory => factory(rng),
        Variant::Traffic => traffic(rng),
        Variant::Farm => farm(rng),
    }
}

fn home(rng: &mut impl Rng) -> MetricSet {
    MetricSet::new()
        .with("temp", round1(rng.gen_range(20.0..80.0)))
        .with("smoke", round1(rng.gen_range(0.0..100.0)))
        .with("door", i64::from(rng.gen_bool(0.1)))
        .with("motion", i64::from(rng.gen_bool(0.3)))
}

fn hospital(rng: &mut impl Rng) -> MetricSet {
    MetricSet::new()
        .with("heart_rate", rng.gen_range(60..160_i64))
        .with("spo2", rng.gen_range(88..100_i64))
        .with("blood_pressure", rng.gen_range(100..180_i64))
}

fn factory(rng: &mut impl Rng) -> MetricSet {
    MetricSet::new()
        .with("machine_temp", round1(rng.gen_range(30.0..110.0)))
        .with("vibration", round1(rng.gen_range(0.0..100.0)))
        .with("pressure", round1(rng.gen_range(5.0..40.0)))
}

fn traffic(rng: &mut impl Rng) -> MetricSet {
    let vehicle_density = rng.gen_range(0..120_i64);
    // Congestion is derived from density, not sampled independently.
    let congestion = if vehicle_density > 90 {
        2
    } else if vehicle_density > 60 {
        1
    } else {
        0
    };
    MetricSet::new()
        .with("vehicle_density", vehicle_density)
        .with("accident", i64::from(rng.gen_bool(0.05)))
        .with("congestion", congestion)
}

fn farm(rng: &mut impl Rng) -> MetricSet {
    MetricSet::new()
        .with("soil_moisture", round1(rng.gen_range(0.0..100.0)))
        .with("light_intensity", rng.gen_range(0..1200_i64))
        .with("ph", round1(rng.gen_range(4.0..10.0)))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
