//! Observability hooks for flagged values
//!
//! The scorer reports each anomaly to an [`AnomalyObserver`] without knowing
//! where it ends up. [`TracingObserver`] is the default; [`NullObserver`]
//! reports itself disabled so the scorer skips building events, and
//! [`RecordingObserver`] keeps events in memory.

use crate::types::AnomalyEvent;
use tracing::info;

/// Receives one call per positive verdict
pub trait AnomalyObserver {
    fn on_anomaly(&mut self, event: &AnomalyEvent);

    /// The scorer skips `on_anomaly` entirely when this is `false`
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Logs each anomaly as a structured `tracing` event at INFO
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl AnomalyObserver for TracingObserver {
    fn on_anomaly(&mut self, event: &AnomalyEvent) {
        info!(
            value = event.value,
            timestamp = event.timestamp,
            trend = event.trend,
            "{}",
            event
        );
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl AnomalyObserver for NullObserver {
    fn on_anomaly(&mut self, _event: &AnomalyEvent) {}

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Keeps every event in arrival order
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    events: Vec<AnomalyEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AnomalyEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<AnomalyEvent> {
        self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AnomalyObserver for RecordingObserver {
    fn on_anomaly(&mut self, event: &AnomalyEvent) {
        self.events.push(*event);
    }
}

impl<O: AnomalyObserver + ?Sized> AnomalyObserver for &mut O {
    fn on_anomaly(&mut self, event: &AnomalyEvent) {
        (**self).on_anomaly(event)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

impl<O: AnomalyObserver + ?Sized> AnomalyObserver for Box<O> {
    fn on_anomaly(&mut self, event: &AnomalyEvent) {
        (**self).on_anomaly(event)
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}
