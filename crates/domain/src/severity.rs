//! Severity — ordered alert level plus the per-variant evaluation chains.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricSet;
use crate::variant::Variant;

/// Ordered alert level: `Normal < Warning < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Normal,
    Warning,
    Critical,
}

impl Severity {
    /// Whether this level belongs in an alert log (anything above normal).
    #[must_use]
    pub fn is_alert(self) -> bool {
        self != Self::Normal
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => f.write_str("normal"),
            Self::Warning => f.write_str("warning"),
            Self::Critical => f.write_str("critical"),
        }
    }
}

/// Result of evaluating a reading against a variant's rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub status: Severity,
    pub message: String,
}

impl Assessment {
    fn new(status: Severity, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

/// Evaluate a reading against the rules of `variant`.
///
/// Pure and total: any metric keys the variant does not know are ignored,
/// and missing keys simply never trigger. Each chain checks critical
/// conditions first, then warning conditions; the first hit wins.
#[must_use]
pub fn evaluate(variant: Variant, metrics: &MetricSet) -> Assessment {
    match variant {
        Variant::Home => {
            if above(metrics, "temp", 50.0) || above(metrics, "smoke", 60.0) {
                Assessment::new(Severity::Critical, "🔥 FIRE ALERT!")
            } else if above(metrics, "temp", 40.0) || above(metrics, "smoke", 30.0) {
                Assessment::new(Severity::Warning, "⚠️ Elevated levels.")
            } else {
                Assessment::new(Severity::Normal, "All clear.")
            }
        }
        Variant::Hospital => {
            if above(metrics, "heart_rate", 120.0) || below(metrics, "spo2", 90.0) {
                Assessment::new(Severity::Critical, "🚨 CRITICAL vitals!")
            } else if above(metrics, "heart_rate", 100.0) || below(metrics, "spo2", 95.0) {
                Assessment::new(Severity::Warning, "⚠️ Vitals need attention.")
            } else {
                Assessment::new(Severity::Normal, "Stable.")
            }
        }
        Variant::Factory => {
            if above(metrics, "machine_temp", 90.0) || above(metrics, "vibration", 80.0) {
                Assessment::new(Severity::Critical, "🏭 Machine malfunction!")
            } else if above(metrics, "machine_temp", 70.0) || above(metrics, "vibration", 50.0) {
                Assessment::new(Severity::Warning, "⚠️ Outside norms.")
            } else {
                Assessment::new(Severity::Normal, "Normal.")
            }
        }
        Variant::Traffic => {
            if equals(metrics, "accident", 1) {
                Assessment::new(Severity::Critical, "🚗 ACCIDENT!")
            } else if equals(metrics, "congestion", 2) {
                Assessment::new(Severity::Warning, "🚦 Heavy congestion.")
            } else {
                Assessment::new(Severity::Normal, "Normal flow.")
            }
        }
        Variant::Farm => {
            if below(metrics, "soil_moisture", 20.0) || above(metrics, "ph", 9.0) {
                Assessment::new(Severity::Critical, "🌾 Soil danger!")
            } else if below(metrics, "soil_moisture", 30.0) || above(metrics, "ph", 8.0) {
                Assessment::new(Severity::Warning, "⚠️ Soil needs attention.")
            } else {
                Assessment::new(Severity::Normal, "Optimal.")
            }
        }
    }
}

fn above(metrics: &MetricSet, key: &str, limit: f64) -> bool {
    metrics.value(key).is_some_and(|v| v > limit)
}

fn below(metrics: &MetricSet, key: &str, limit: f64) -> bool {
    metrics.value(key).is_some_and(|v| v < limit)
}

fn equals(metrics: &MetricSet, key: &str, code: i64) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let target = code as f64;
    metrics.value(key).is_some_and(|v| (v - target).abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(pairs: &[(&str, f64)]) -> MetricSet {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).into()))
            .collect()
    }

    #[test]
    fn should_order_severity_levels() {
        assert!(Severity::Normal < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn should_flag_only_elevated_levels_as_alerts() {
        assert!(!Severity::Normal.is_alert());
        assert!(Severity::Warning.is_alert());
        assert!(Severity::Critical.is_alert());
    }

    #[test]
    fn should_serialize_severity_as_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
    }

    #[test]
    fn should_be_deterministic_for_same_inputs() {
        let m = metrics(&[("temp", 45.0), ("smoke", 10.0)]);
        let first = evaluate(Variant::Home, &m);
        let second = evaluate(Variant::Home, &m);
        assert_eq!(first, second);
    }

    #[test]
    fn should_prefer_critical_when_both_conditions_hold() {
        // heart_rate alone is critical while spo2 is fine; the chain must
        // never downgrade to warning.
        let m = metrics(&[("heart_rate", 130.0), ("spo2", 99.0)]);
        let result = evaluate(Variant::Hospital, &m);
        assert_eq!(result.status, Severity::Critical);
    }

    #[test]
    fn should_treat_heart_rate_boundary_as_exclusive() {
        let at_limit = metrics(&[("heart_rate", 120.0), ("spo2", 99.0)]);
        assert_eq!(
            evaluate(Variant::Hospital, &at_limit).status,
            Severity::Warning
        );

        let over_limit = metrics(&[("heart_rate", 121.0), ("spo2", 99.0)]);
        assert_eq!(
            evaluate(Variant::Hospital, &over_limit).status,
            Severity::Critical
        );
    }

    #[test]
    fn should_invert_comparison_for_spo2() {
        let m = metrics(&[("heart_rate", 80.0), ("spo2", 89.0)]);
        assert_eq!(evaluate(Variant::Hospital, &m).status, Severity::Critical);

        let m = metrics(&[("heart_rate", 80.0), ("spo2", 94.0)]);
        assert_eq!(evaluate(Variant::Hospital, &m).status, Severity::Warning);
    }

    #[test]
    fn should_raise_fire_alert_for_home_over_temperature() {
        let m = metrics(&[("temp", 55.0), ("smoke", 10.0)]);
        let result = evaluate(Variant::Home, &m);
        assert_eq!(result.status, Severity::Critical);
        assert_eq!(result.message, "🔥 FIRE ALERT!");
    }

    #[test]
    fn should_warn_for_home_smoke_between_thresholds() {
        let m = metrics(&[("temp", 25.0), ("smoke", 45.0)]);
        assert_eq!(evaluate(Variant::Home, &m).status, Severity::Warning);
    }

    #[test]
    fn should_escalate_factory_on_vibration() {
        let m = metrics(&[("machine_temp", 60.0), ("vibration", 85.0)]);
        assert_eq!(evaluate(Variant::Factory, &m).status, Severity::Critical);
    }

    #[test]
    fn should_escalate_traffic_on_accident_code() {
        let m = MetricSet::new()
            .with("vehicle_density", 30_i64)
            .with("accident", 1_i64)
            .with("congestion", 0_i64);
        let result = evaluate(Variant::Traffic, &m);
        assert_eq!(result.status, Severity::Critical);
        assert_eq!(result.message, "🚗 ACCIDENT!");
    }

    #[test]
    fn should_warn_traffic_on_heavy_congestion() {
        let m = MetricSet::new()
            .with("accident", 0_i64)
            .with("congestion", 2_i64);
        assert_eq!(evaluate(Variant::Traffic, &m).status, Severity::Warning);
    }

    #[test]
    fn should_flag_farm_dry_soil_as_critical() {
        let m = metrics(&[("soil_moisture", 15.0), ("ph", 6.5)]);
        assert_eq!(evaluate(Variant::Farm, &m).status, Severity::Critical);
    }

    #[test]
    fn should_report_normal_when_all_metrics_in_range() {
        let m = metrics(&[("temp", 22.0), ("smoke", 5.0)]);
        let result = evaluate(Variant::Home, &m);
        assert_eq!(result.status, Severity::Normal);
        assert_eq!(result.message, "All clear.");
    }

    #[test]
    fn should_ignore_unknown_and_missing_keys() {
        let m = metrics(&[("humidity", 99.0)]);
        assert_eq!(evaluate(Variant::Home, &m).status, Severity::Normal);
        assert_eq!(
            evaluate(Variant::Hospital, &MetricSet::new()).status,
            Severity::Normal
        );
    }
}
