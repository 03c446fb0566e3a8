//! Dashboard state machine — the per-client derived view of one variant.
//!
//! A dashboard follows exactly one variant at a time. Selecting a variant
//! discards every piece of derived state and waits for that variant's
//! configuration; once live, the machine folds the inbound event stream into
//! a current snapshot, bounded per-metric history, and a bounded alert log.
//!
//! The machine is pure: it owns no transport and no clock. Callers feed it
//! variant selections, configuration fetch results, and events, which makes
//! every transition directly testable.

use std::collections::{BTreeMap, VecDeque};

use sentra_domain::event::IngestEvent;
use sentra_domain::metrics::{MetricSet, MetricValue};
use sentra_domain::severity::Severity;
use sentra_domain::time::Timestamp;
use sentra_domain::variant::Variant;
use sentra_domain::variant_config::VariantConfig;

/// Rolling history keeps at most this many points per metric key.
pub const HISTORY_CAPACITY: usize = 30;

/// The alert log keeps at most this many events.
pub const ALERT_CAPACITY: usize = 20;

/// One sample in a metric's rolling history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoryPoint {
    pub timestamp: Timestamp,
    pub value: MetricValue,
}

/// Lifecycle of a dashboard.
#[derive(Debug, Default)]
pub enum DashboardState {
    /// No variant selected yet.
    #[default]
    Uninitialized,
    /// A variant is selected and its configuration fetch is pending.
    /// A failed fetch leaves the machine here; there is no automatic retry.
    Loading { variant: Variant },
    /// Configuration loaded; events for the variant are being folded in.
    Live(LiveState),
}

/// Derived state while a dashboard is live.
#[derive(Debug)]
pub struct LiveState {
    pub variant: Variant,
    pub config: VariantConfig,
    /// Metrics from the most recent event, replaced wholesale on arrival.
    pub snapshot: MetricSet,
    pub status: Severity,
    pub message: String,
    pub last_update: Option<Timestamp>,
    history: BTreeMap<String, VecDeque<HistoryPoint>>,
    alerts: VecDeque<IngestEvent>,
}

impl LiveState {
    fn new(config: VariantConfig) -> Self {
        Self {
            variant: config.id,
            config,
            snapshot: MetricSet::new(),
            status: Severity::Normal,
            message: String::new(),
            last_update: None,
            history: BTreeMap::new(),
            alerts: VecDeque::new(),
        }
    }

    /// The rolling history for a metric key, oldest point first.
    ///
    /// Points appear in arrival order; out-of-order timestamps are kept
    /// where they arrived, never re-sorted.
    pub fn history(&self, key: &str) -> impl Iterator<Item = &HistoryPoint> {
        self.history.get(key).into_iter().flatten()
    }

    /// Number of history points recorded for a metric key.
    #[must_use]
    pub fn history_len(&self, key: &str) -> usize {
        self.history.get(key).map_or(0, VecDeque::len)
    }

    /// Alert-worthy events, newest first.
    pub fn alerts(&self) -> impl Iterator<Item = &IngestEvent> {
        self.alerts.iter()
    }

    /// Number of events currently in the alert log.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }
}

/// The dashboard state machine.
#[derive(Debug, Default)]
pub struct Dashboard {
    state: DashboardState,
}

impl Dashboard {
    /// Create a dashboard with no variant selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// The live view, when configuration has loaded.
    #[must_use]
    pub fn live(&self) -> Option<&LiveState> {
        match &self.state {
            DashboardState::Live(live) => Some(live),
            _ => None,
        }
    }

    /// The variant this dashboard is following, if any.
    #[must_use]
    pub fn selected_variant(&self) -> Option<Variant> {
        match &self.state {
            DashboardState::Uninitialized => None,
            DashboardState::Loading { variant } => Some(*variant),
            DashboardState::Live(live) => Some(live.variant),
        }
    }

    /// Select a variant to follow.
    ///
    /// Unconditionally discards all derived state, including when the same
    /// variant is re-selected; configuration must be fetched again before
    /// the dashboard goes live.
    pub fn select_variant(&mut self, variant: Variant) {
        self.state = DashboardState::Loading { variant };
    }

    /// Apply the result of a configuration fetch.
    ///
    /// Returns `true` when the dashboard transitioned to live. A response
    /// for a variant that is no longer the selected one — the fetch raced a
    /// variant switch — is ignored and leaves the state untouched. A failed
    /// fetch is simply never applied: the machine stays in `Loading` and the
    /// caller keeps the error.
    pub fn apply_config(&mut self, config: VariantConfig) -> bool {
        match &self.state {
            DashboardState::Loading { variant } if *variant == config.id => {
                self.state = DashboardState::Live(LiveState::new(config));
                true
            }
            _ => false,
        }
    }

    /// Fold one inbound event into the live view.
    ///
    /// Returns `true` when the event changed state. Events are dropped when
    /// the dashboard is not live or the event belongs to another variant;
    /// there is no buffering for inactive variants.
    pub fn handle_event(&mut self, event: &IngestEvent) -> bool {
        let DashboardState::Live(live) = &mut self.state else {
            return false;
        };
        if event.variant != live.variant {
            return false;
        }

        live.snapshot = event.metrics.clone();
        live.status = event.status;
        live.message = event.message.clone();
        live.last_update = Some(event.timestamp);

        for (key, value) in event.metrics.iter() {
            let series = live.history.entry(key.to_string()).or_default();
            series.push_back(HistoryPoint {
                timestamp: event.timestamp,
                value,
            });
            while series.len() > HISTORY_CAPACITY {
                series.pop_front();
            }
        }

        if event.status.is_alert() {
            live.alerts.push_front(event.clone());
            live.alerts.truncate(ALERT_CAPACITY);
        }

        true
    }
}
