use std::sync::Arc;
use aws_sdk_dynamodb::types::ScalarAttributeType;
use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::publisher::DDBPublisher;
use crate::gateway::events::EventPublisher;
use crate::gateway::GatewayPublisherVia;
use crate::gateway::logs::publisher::LogPublisher;
use crate::gateway::sns::publisher::SNSPublisher;
use crate::utils::ddb::{build_db_client, build_sns_client, create_table};

pub const EVENTS_TABLE: &str = "events";

pub async fn create_publisher(via: GatewayPublisherVia) -> Arc<dyn EventPublisher> {
    match via {
        GatewayPublisherVia::Sns => {
            let client = build_sns_client().await;
            Arc::new(SNSPublisher::new(client))
        }
        GatewayPublisherVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, EVENTS_TABLE, "event_id", ScalarAttributeType::S).await;
            Arc::new(DDBPublisher::new(client, EVENTS_TABLE))
        }
        GatewayPublisherVia::Logs => {
            Arc::new(LogPublisher::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use crate::core::events::DomainEvent;
    use crate::gateway::factory::create_publisher;
    use crate::gateway::GatewayPublisherVia;

    #[tokio::test]
    async fn test_should_create_log_publisher() {
        let publisher = create_publisher(GatewayPublisherVia::Logs).await;
        let event = DomainEvent::updated("books", "books", "1", &HashMap::new(), &1).expect("build event");
        publisher.publish(&event).await.expect("should publish");
        assert_eq!(vec!["books".to_string()], publisher.get_topics().await.expect("should get topics"));
    }
}
