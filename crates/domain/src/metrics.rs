//! Metric readings — typed values keyed by metric name.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single metric value as reported by a device.
///
/// Discrete channels (door, accident, congestion codes) arrive as integers,
/// analog channels as floats; both compare through [`as_f64`](Self::as_f64).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Int(i64),
    Float(f64),
}

impl MetricValue {
    /// The value as a float, for threshold comparisons.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            #[allow(clippy::cast_precision_loss)]
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// One reading: metric key → value, produced once per ingestion tick.
///
/// Keys are kept sorted so serialized output and iteration order are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricSet(BTreeMap<String, MetricValue>);

impl MetricSet {
    /// Create an empty reading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<MetricValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a raw value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<MetricValue> {
        self.0.get(key).copied()
    }

    /// Look up a value as a float, for threshold comparisons.
    #[must_use]
    pub fn value(&self, key: &str) -> Option<f64> {
        self.get(key).map(MetricValue::as_f64)
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MetricValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of metric keys present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the reading carries no metrics at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, MetricValue)> for MetricSet {
    fn from_iter<T: IntoIterator<Item = (String, MetricValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_serialize_int_value_as_number() {
        let json = serde_json::to_string(&MetricValue::Int(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn should_serialize_float_value_as_number() {
        let json = serde_json::to_string(&MetricValue::Float(21.5)).unwrap();
        assert_eq!(json, "21.5");
    }

    #[test]
    fn should_deserialize_whole_number_as_int() {
        let value: MetricValue = serde_json::from_str("55").unwrap();
        assert_eq!(value, MetricValue::Int(55));
    }

    #[test]
    fn should_deserialize_fraction_as_float() {
        let value: MetricValue = serde_json::from_str("55.5").unwrap();
        assert_eq!(value, MetricValue::Float(55.5));
    }

    #[test]
    fn should_convert_int_value_to_f64() {
        assert!((MetricValue::Int(3).as_f64() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn should_return_float_for_known_key() {
        let metrics = MetricSet::new().with("temp", 55.0).with("smoke", 10_i64);
        assert_eq!(metrics.value("temp"), Some(55.0));
        assert_eq!(metrics.value("smoke"), Some(10.0));
    }

    #[test]
    fn should_return_none_for_unknown_key() {
        let metrics = MetricSet::new().with("temp", 55.0);
        assert_eq!(metrics.value("humidity"), None);
    }

    #[test]
    fn should_roundtrip_through_serde_json_as_flat_object() {
        let metrics = MetricSet::new().with("temp", 55.5).with("door", 1_i64);
        let json = serde_json::to_string(&metrics).unwrap();
        assert_eq!(json, r#"{"door":1,"temp":55.5}"#);
        let parsed: MetricSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, metrics);
    }

    #[test]
    fn should_iterate_keys_in_sorted_order() {
        let metrics = MetricSet::new().with("z", 1_i64).with("a", 2_i64);
        let keys: Vec<&str> = metrics.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "z"]);
    }

    #[test]
    fn should_report_empty_when_no_metrics_present() {
        assert!(MetricSet::new().is_empty());
        assert_eq!(MetricSet::new().with("x", 1_i64).len(), 1);
    }
}
