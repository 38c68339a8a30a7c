use async_trait::async_trait;
use tracing::warn;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;

#[async_trait]
pub trait EventPublisher: Sync + Send {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError>;
    async fn get_topics(&self) -> Result<Vec<String>, LibraryError>;
    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError>;
}

// Events are notifications; a failed publish never undoes the change it describes.
pub(crate) async fn publish_or_warn(publisher: &dyn EventPublisher, event: serde_json::Result<DomainEvent>) {
    match event {
        Ok(event) => {
            if let Err(err) = publisher.publish(&event).await {
                warn!(event = event.name.as_str(), key = event.key.as_str(), error = %err, "failed to publish event");
            }
        }
        Err(err) => {
            warn!(error = %err, "failed to build event");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::events::{publish_or_warn, EventPublisher};
    use crate::gateway::logs::publisher::LogPublisher;

    #[tokio::test]
    async fn test_should_publish_without_topic() {
        let publisher = LogPublisher::new();
        let event = DomainEvent::added("books", "books", "1", &HashMap::new(), &1);
        publish_or_warn(&publisher, event).await;
        assert_eq!(1, publisher.published().await.len());
        assert_eq!(vec!["books".to_string()], publisher.get_topics().await.expect("topics"));
    }
}
