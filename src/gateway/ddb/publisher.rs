use std::collections::BTreeSet;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use tokio::sync::RwLock;
use tracing::debug;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;
use crate::utils::ddb::parse_item;

// DDBPublisher appends events to a single table, one item per event id.
// Topics are only tracked by name so that event names can be listed.
#[derive(Debug)]
pub struct DDBPublisher {
    client: Client,
    table_name: String,
    topics: RwLock<BTreeSet<String>>,
}

impl DDBPublisher {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            topics: RwLock::new(BTreeSet::new()),
        }
    }
}

#[async_trait]
impl EventPublisher for DDBPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        self.topics.write().await.insert(topic.to_string());
        Ok(format!("{}/{}", self.table_name, topic))
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        Ok(self.topics.read().await.iter().cloned().collect())
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let _ = self.create_topic(event.name.as_str()).await?;
        let val = serde_json::to_value(event)?;
        let res = self.client
            .put_item()
            .table_name(self.table_name.as_str())
            .condition_expression("attribute_not_exists(event_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await;
        match res {
            Ok(_) => Ok(()),
            // same event id already stored
            Err(SdkError::ServiceError(ref ctx)) if matches!(ctx.err(), PutItemError::ConditionalCheckFailedException(_)) => {
                debug!(event_id = event.event_id.as_str(), "event already stored");
                Ok(())
            }
            Err(err) => Err(LibraryError::from(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use aws_sdk_dynamodb::types::ScalarAttributeType;
    use lazy_static::lazy_static;
    use crate::core::events::DomainEvent;
    use crate::core::repository::RepositoryStore;
    use crate::gateway::ddb::publisher::DDBPublisher;
    use crate::gateway::events::EventPublisher;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "events").await;
                let _ = create_table(&client, "events", "event_id", ScalarAttributeType::S).await;
                client
            });
    }

    #[tokio::test]
    #[ignore = "requires a local DynamoDB"]
    async fn test_should_store_book_event_once() {
        let stock = HashMap::from([("book_id", 1), ("stock", 2)]);
        let metadata = HashMap::from([("branch_id".to_string(), "test".to_string())]);
        let event = DomainEvent::updated("books", "catalog", "1", &metadata, &stock).expect("build event");
        let publisher = DDBPublisher::new(CLIENT.get().await.clone(), "events");
        publisher.publish(&event).await.expect("should publish");
        publisher.publish(&event).await.expect("duplicate publish is ignored");
        assert_eq!(vec!["books".to_string()], publisher.get_topics().await.expect("should get topics"));
    }
}
