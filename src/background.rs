use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::domain::events::{DomainEvent, EventBus};

/// Audit log of every domain event. Runs until the bus is dropped.
pub async fn start_event_listener(bus: EventBus) {
    info!("Starting domain event listener...");
    let receiver = bus.subscribe();
    drop(bus);
    listen(receiver).await;
}

async fn listen(mut receiver: broadcast::Receiver<DomainEvent>) {
    loop {
        match receiver.recv().await {
            Ok(event) => {
                let span = info_span!("domain_event", event = event.name());
                async {
                    match serde_json::to_string(&event) {
                        Ok(payload) => info!(%payload, "domain event"),
                        Err(e) => warn!("Failed to serialize event {}: {}", event.name(), e),
                    }
                }
                    .instrument(span)
                    .await;
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Event listener lagged, {} events skipped", skipped);
            }
            Err(RecvError::Closed) => {
                debug!("Event bus closed, stopping listener");
                break;
            }
        }
    }
}
