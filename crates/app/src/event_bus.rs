//! In-process event bus backed by a tokio broadcast channel.

use std::future::Future;

use tokio::sync::broadcast;

use sentra_domain::error::SentraError;
use sentra_domain::event::IngestEvent;

use crate::ports::EventPublisher;

/// In-process event bus using a tokio [`broadcast`] channel.
///
/// Publishing succeeds even when there are no active subscribers
/// (the event is simply dropped). Each subscriber receives events in
/// publish order; a subscriber that falls behind the channel capacity
/// loses the oldest events rather than back-pressuring publishers.
pub struct InProcessEventBus {
    sender: broadcast::Sender<IngestEvent>,
}

impl InProcessEventBus {
    /// Create a new event bus with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events on this bus.
    ///
    /// Returns a receiver that will get all events published *after*
    /// the subscription is created.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<IngestEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for InProcessEventBus {
    fn publish(&self, event: IngestEvent) -> impl Future<Output = Result<(), SentraError>> + Send {
        // broadcast::send fails only when there are zero receivers,
        // which is fine — we simply ignore the error.
        let _ = self.sender.send(event);
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentra_domain::id::DeviceId;
    use sentra_domain::metrics::MetricSet;
    use sentra_domain::severity::Severity;
    use sentra_domain::variant::Variant;

    fn test_event(device: &str) -> IngestEvent {
        IngestEvent::builder()
            .device_id(DeviceId::new(device).unwrap())
            .variant(Variant::Home)
            .metrics(MetricSet::new().with("temp", 22.0))
            .status(Severity::Normal)
            .message("All clear.")
            .build()
    }

    #[tokio::test]
    async fn should_deliver_event_to_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(test_event("dev_home_01")).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.device_id.as_str(), "dev_home_01");
    }

    #[tokio::test]
    async fn should_deliver_event_to_multiple_subscribers() {
        let bus = InProcessEventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(test_event("dev_home_01")).await.unwrap();

        let r1 = rx1.recv().await.unwrap();
        let r2 = rx2.recv().await.unwrap();
        assert_eq!(r1.device_id, r2.device_id);
    }

    #[tokio::test]
    async fn should_succeed_when_no_subscribers() {
        let bus = InProcessEventBus::new(16);
        let result = bus.publish(test_event("dev_home_01")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_not_deliver_events_published_before_subscription() {
        let bus = InProcessEventBus::new(16);

        bus.publish(test_event("dev_home_01")).await.unwrap();

        let mut rx = bus.subscribe();

        bus.publish(test_event("dev_home_02")).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.device_id.as_str(), "dev_home_02");
    }

    #[tokio::test]
    async fn should_preserve_publish_order_per_subscriber() {
        let bus = InProcessEventBus::new(16);
        let mut rx = bus.subscribe();

        for n in 0..5 {
            bus.publish(test_event(&format!("dev_{n}"))).await.unwrap();
        }

        for n in 0..5 {
            let received = rx.recv().await.unwrap();
            assert_eq!(received.device_id.as_str(), format!("dev_{n}"));
        }
    }
}
