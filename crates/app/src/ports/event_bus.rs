//! Event bus port — publish side of the real-time fan-out.

use std::future::Future;

use sentra_domain::error::SentraError;
use sentra_domain::event::IngestEvent;

/// Publishes ingest events to interested subscribers.
///
/// Delivery is best-effort: implementations must return quickly and must
/// never block on subscriber processing.
pub trait EventPublisher {
    /// Publish an event to all current subscribers.
    fn publish(&self, event: IngestEvent) -> impl Future<Output = Result<(), SentraError>> + Send;
}

impl<T: EventPublisher + Send + Sync> EventPublisher for std::sync::Arc<T> {
    fn publish(&self, event: IngestEvent) -> impl Future<Output = Result<(), SentraError>> + Send {
        (**self).publish(event)
    }
}
