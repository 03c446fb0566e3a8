//! Static per-variant configuration: threshold rules and widget layouts.
//!
//! The table is built once at first access and never mutated. Values mirror
//! what the dashboard renders: display metadata, per-metric threshold rules,
//! and the ordered widget list.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::variant::Variant;

/// A per-metric threshold rule.
///
/// Exactly one of the two shapes applies to a key: numeric warn/critical
/// bounds, or a mapping from a raw integer code to its display label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ThresholdRule {
    #[serde(rename_all = "camelCase")]
    Numeric {
        warn: f64,
        critical: f64,
        unit: String,
        /// When set, the alert fires *below* the bound instead of above it
        /// (oxygen saturation, soil moisture).
        #[serde(default, skip_serializing_if = "std::ops::Not::not")]
        invert_warning: bool,
    },
    Enumerated { values: BTreeMap<i64, String> },
}

impl ThresholdRule {
    /// Numeric rule with the usual above-the-bound direction.
    #[must_use]
    pub fn numeric(warn: f64, critical: f64, unit: &str) -> Self {
        Self::Numeric {
            warn,
            critical,
            unit: unit.to_string(),
            invert_warning: false,
        }
    }

    /// Numeric rule that alerts below the bound.
    #[must_use]
    pub fn numeric_inverted(warn: f64, critical: f64, unit: &str) -> Self {
        Self::Numeric {
            warn,
            critical,
            unit: unit.to_string(),
            invert_warning: true,
        }
    }

    /// Enumeration rule mapping raw codes to labels.
    #[must_use]
    pub fn enumerated<const N: usize>(values: [(i64, &str); N]) -> Self {
        Self::Enumerated {
            values: values
                .into_iter()
                .map(|(code, label)| (code, label.to_string()))
                .collect(),
        }
    }
}

/// How a widget renders a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Gauge,
    LineChart,
    Status,
    Card,
}

/// One widget slot in a variant's dashboard layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub key: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub icon: String,
}

impl Widget {
    #[must_use]
    pub fn gauge(key: &str, label: &str, unit: &str, min: f64, max: f64, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            unit: Some(unit.to_string()),
            kind: WidgetKind::Gauge,
            min: Some(min),
            max: Some(max),
            icon: icon.to_string(),
        }
    }

    #[must_use]
    pub fn line_chart(key: &str, label: &str, unit: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            unit: Some(unit.to_string()),
            kind: WidgetKind::LineChart,
            min: None,
            max: None,
            icon: icon.to_string(),
        }
    }

    #[must_use]
    pub fn status(key: &str, label: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            unit: None,
            kind: WidgetKind::Status,
            min: None,
            max: None,
            icon: icon.to_string(),
        }
    }

    #[must_use]
    pub fn card(key: &str, label: &str, unit: &str, icon: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            unit: Some(unit.to_string()),
            kind: WidgetKind::Card,
            min: None,
            max: None,
            icon: icon.to_string(),
        }
    }
}

/// Full configuration for one variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantConfig {
    pub id: Variant,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub color: String,
    pub thresholds: BTreeMap<String, ThresholdRule>,
    pub widgets: Vec<Widget>,
}

impl VariantConfig {
    /// Project the display metadata used by variant listings.
    #[must_use]
    pub fn summary(&self) -> VariantSummary {
        VariantSummary {
            id: self.id,
            label: self.label.clone(),
            description: self.description.clone(),
            icon: self.icon.clone(),
            color: self.color.clone(),
        }
    }
}

/// Display metadata for one variant, without rules or widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantSummary {
    pub id: Variant,
    pub label: String,
    pub description: String,
    pub icon: String,
    pub color: String,
}

/// Look up the configuration for a variant.
///
/// Total over the closed [`Variant`] set; unknown identifiers are rejected
/// earlier, when parsing the variant itself.
#[must_use]
pub fn get(variant: Variant) -> &'static VariantConfig {
    &all()[variant as usize]
}

/// All variant configurations, in [`Variant::ALL`] order.
#[must_use]
pub fn all() -> &'static [VariantConfig] {
    static REGISTRY: OnceLock<Vec<VariantConfig>> = OnceLock::new();
    REGISTRY.get_or_init(build_all)
}

fn build_all() -> Vec<VariantConfig> {
    vec![home(), hospital(), factory(), traffic(), farm()]
}

fn home() -> VariantConfig {
    VariantConfig {
        id: Variant::Home,
        label: "Smart Home Safety".to_string(),
        description: "Monitor home safety parameters: temperature, smoke, door, motion."
            .to_string(),
        icon: "Home".to_string(),
        color: "#3B82F6".to_string(),
        thresholds: BTreeMap::from([
            ("temp".to_string(), ThresholdRule::numeric(40.0, 50.0, "°C")),
            (
                "smoke".to_string(),
                ThresholdRule::numeric(30.0, 60.0, "%"),
            ),
            (
                "door".to_string(),
                ThresholdRule::enumerated([(0, "Closed"), (1, "Open")]),
            ),
            (
                "motion".to_string(),
                ThresholdRule::enumerated([(0, "None"), (1, "Detected")]),
            ),
        ]),
        widgets: vec![
            Widget::gauge("temp", "Temperature", "°C", 0.0, 100.0, "Thermometer"),
            Widget::gauge("smoke", "Smoke Level", "%", 0.0, 100.0, "Wind"),
            Widget::line_chart("temp", "Temperature History", "°C", "TrendingUp"),
            Widget::status("door", "Door Status", "DoorOpen"),
            Widget::status("motion", "Motion", "Eye"),
        ],
    }
}

fn hospital() -> VariantConfig {
    VariantConfig {
        id: Variant::Hospital,
        label: "Smart Hospital".to_string(),
        description: "Patient vital signs monitoring: heart rate, SpO2, blood pressure."
            .to_string(),
        icon: "Heart".to_string(),
        color: "#EF4444".to_string(),
        thresholds: BTreeMap::from([
            (
                "heart_rate".to_string(),
                ThresholdRule::numeric(100.0, 120.0, "bpm"),
            ),
            (
                "spo2".to_string(),
                ThresholdRule::numeric_inverted(95.0, 90.0, "%"),
            ),
            (
                "blood_pressure".to_string(),
                ThresholdRule::numeric(140.0, 160.0, "mmHg"),
            ),
        ]),
        widgets: vec![
            Widget::gauge("heart_rate", "Heart Rate", "bpm", 40.0, 200.0, "Activity"),
            Widget::gauge("spo2", "SpO2", "%", 80.0, 100.0, "Droplets"),
            Widget::line_chart("heart_rate", "Heart Rate History", "bpm", "TrendingUp"),
            Widget::line_chart("spo2", "SpO2 History", "%", "TrendingUp"),
            Widget::card("blood_pressure", "Blood Pressure", "mmHg", "Gauge"),
        ],
    }
}

fn factory() -> VariantConfig {
    VariantConfig {
        id: Variant::Factory,
        label: "Smart Factory".to_string(),
        description: "Machine operation monitoring: temperature, vibration, pressure.".to_string(),
        icon: "Factory".to_string(),
        color: "#F59E0B".to_string(),
        thresholds: BTreeMap::from([
            (
                "machine_temp".to_string(),
                ThresholdRule::numeric(70.0, 90.0, "°C"),
            ),
            (
                "vibration".to_string(),
                ThresholdRule::numeric(50.0, 80.0, "Hz"),
            ),
            (
                "pressure".to_string(),
                ThresholdRule::numeric(25.0, 35.0, "Psi"),
            ),
        ]),
        widgets: vec![
            Widget::gauge("machine_temp", "Machine Temp", "°C", 0.0, 120.0, "Thermometer"),
            Widget::gauge("vibration", "Vibration", "Hz", 0.0, 100.0, "Zap"),
            Widget::line_chart("vibration", "Vibration History", "Hz", "TrendingUp"),
            Widget::card("pressure", "Pressure", "Psi", "ArrowUpDown"),
        ],
    }
}

fn traffic() -> VariantConfig {
    VariantConfig {
        id: Variant::Traffic,
        label: "Smart Traffic".to_string(),
        description: "Traffic monitoring: vehicle density, accident alerts, congestion."
            .to_string(),
        icon: "Car".to_string(),
        color: "#10B981".to_string(),
        thresholds: BTreeMap::from([
            (
                "vehicle_density".to_string(),
                ThresholdRule::numeric(70.0, 90.0, "vehicles/min"),
            ),
            (
                "accident".to_string(),
                ThresholdRule::enumerated([(0, "Clear"), (1, "Accident Detected")]),
            ),
            (
                "congestion".to_string(),
                ThresholdRule::enumerated([(0, "Free"), (1, "Moderate"), (2, "Heavy")]),
            ),
        ]),
        widgets: vec![
            Widget::gauge("vehicle_density", "Vehicle Density", "v/min", 0.0, 120.0, "Car"),
            Widget::line_chart("vehicle_density", "Traffic Flow", "v/min", "TrendingUp"),
            Widget::status("accident", "Accident Alert", "AlertTriangle"),
            Widget::status("congestion", "Congestion Level", "Clock"),
        ],
    }
}

fn farm() -> VariantConfig {
    VariantConfig {
        id: Variant::Farm,
        label: "Smart Farm".to_string(),
        description: "Agriculture monitoring: soil moisture, light intensity, pH level."
            .to_string(),
        icon: "Leaf".to_string(),
        color: "#22C55E".to_string(),
        thresholds: BTreeMap::from([
            (
                "soil_moisture".to_string(),
                ThresholdRule::numeric_inverted(30.0, 20.0, "%"),
            ),
            (
                "light_intensity".to_string(),
                ThresholdRule::numeric(800.0, 1000.0, "lux"),
            ),
            ("ph".to_string(), ThresholdRule::numeric(8.0, 9.0, "pH")),
        ]),
        widgets: vec![
            Widget::gauge("soil_moisture", "Soil Moisture", "%", 0.0, 100.0, "Droplets"),
            Widget::gauge("light_intensity", "Light Intensity", "lux", 0.0, 1200.0, "Sun"),
            Widget::card("ph", "Soil pH", "pH", "TestTube"),
            Widget::line_chart("soil_moisture", "Moisture History", "%", "TrendingUp"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_provide_a_config_for_every_variant() {
        assert_eq!(all().len(), Variant::ALL.len());
        for variant in Variant::ALL {
            assert_eq!(get(variant).id, variant);
        }
    }

    #[test]
    fn should_expose_home_thresholds() {
        let config = get(Variant::Home);
        assert_eq!(
            config.thresholds.get("temp"),
            Some(&ThresholdRule::numeric(40.0, 50.0, "°C"))
        );
        assert_eq!(
            config.thresholds.get("door"),
            Some(&ThresholdRule::enumerated([(0, "Closed"), (1, "Open")]))
        );
    }

    #[test]
    fn should_mark_spo2_and_soil_moisture_as_inverted() {
        for (variant, key) in [(Variant::Hospital, "spo2"), (Variant::Farm, "soil_moisture")] {
            match get(variant).thresholds.get(key) {
                Some(ThresholdRule::Numeric { invert_warning, .. }) => {
                    assert!(*invert_warning, "{key} must invert its comparison");
                }
                other => panic!("expected numeric rule for {key}, got {other:?}"),
            }
        }
    }

    #[test]
    fn should_keep_widget_order_stable() {
        let widgets = &get(Variant::Hospital).widgets;
        let keys: Vec<&str> = widgets.iter().map(|w| w.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["heart_rate", "spo2", "heart_rate", "spo2", "blood_pressure"]
        );
    }

    #[test]
    fn should_serialize_numeric_rule_without_invert_flag_when_false() {
        let json = serde_json::to_value(ThresholdRule::numeric(40.0, 50.0, "°C")).unwrap();
        assert_eq!(json["warn"], 40.0);
        assert!(json.get("invertWarning").is_none());
    }

    #[test]
    fn should_serialize_inverted_rule_with_camel_case_flag() {
        let json =
            serde_json::to_value(ThresholdRule::numeric_inverted(95.0, 90.0, "%")).unwrap();
        assert_eq!(json["invertWarning"], true);
    }

    #[test]
    fn should_serialize_enumerated_rule_with_string_keys() {
        let json =
            serde_json::to_value(ThresholdRule::enumerated([(0, "Free"), (2, "Heavy")])).unwrap();
        assert_eq!(json["values"]["0"], "Free");
        assert_eq!(json["values"]["2"], "Heavy");
    }

    #[test]
    fn should_roundtrip_full_config_through_serde_json() {
        let config = get(Variant::Traffic);
        let json = serde_json::to_string(config).unwrap();
        let parsed: VariantConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(&parsed, config);
    }

    #[test]
    fn should_serialize_widget_kind_snake_case() {
        let widget = Widget::line_chart("temp", "Temperature History", "°C", "TrendingUp");
        let json = serde_json::to_value(&widget).unwrap();
        assert_eq!(json["type"], "line_chart");
        assert!(json.get("min").is_none());
    }

    #[test]
    fn should_project_summary_without_thresholds() {
        let summary = get(Variant::Farm).summary();
        assert_eq!(summary.label, "Smart Farm");
        assert_eq!(summary.color, "#22C55E");
    }
}
