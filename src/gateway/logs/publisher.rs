use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// LogPublisher writes events to the trace log and remembers them; it backs the
// in-memory store where no message bus is available.
#[derive(Debug, Default)]
pub struct LogPublisher {
    events: RwLock<Vec<DomainEvent>>,
}

impl LogPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn published(&self) -> Vec<String> {
        self.events.read().await.iter().map(|e| e.name.to_string()).collect()
    }
}

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        Ok(topic.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        let mut topics = self.published().await;
        topics.sort();
        topics.dedup();
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        info!(event = event.name.as_str(), group = event.group.as_str(), key = event.key.as_str(),
            kind = ?event.kind, data = event.json_data.as_str(), "domain event");
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
