use std::collections::HashMap;
use aws_sdk_sns::Client;
use async_trait::async_trait;
use aws_sdk_sns::error::SdkError;
use aws_sdk_sns::operation::create_topic::CreateTopicError;
use aws_sdk_sns::operation::list_topics::ListTopicsError;
use aws_sdk_sns::operation::publish::PublishError;
use tokio::sync::RwLock;
use tracing::info;
use crate::core::events::DomainEvent;
use crate::core::library::LibraryError;
use crate::gateway::events::EventPublisher;

// SNSPublisher sends each event to the topic named after it, creating the
// topic on first use.
#[derive(Debug)]
pub struct SNSPublisher {
    client: Client,
    topics: RwLock<HashMap<String, String>>,
}

impl SNSPublisher {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            topics: RwLock::new(HashMap::new()),
        }
    }

    async fn topic_arn(&self, topic: &str) -> Result<String, LibraryError> {
        if let Some(arn) = self.topics.read().await.get(topic) {
            return Ok(arn.to_string());
        }
        self.create_topic(topic).await
    }
}

#[async_trait]
impl EventPublisher for SNSPublisher {
    async fn create_topic(&self, topic: &str) -> Result<String, LibraryError> {
        let resp = self.client.create_topic().name(topic).send().await?;
        let arn = resp.topic_arn().unwrap_or_default();
        self.topics.write().await.insert(topic.to_string(), arn.to_string());
        info!(topic, arn, "created topic");
        Ok(arn.to_string())
    }

    async fn get_topics(&self) -> Result<Vec<String>, LibraryError> {
        let mut topics = vec![];
        let resp = self.client.list_topics().send().await?;
        for topic in resp.topics().unwrap_or_default() {
            topics.push(topic.topic_arn().unwrap_or_default().to_string());
        }
        Ok(topics)
    }

    async fn publish(&self, event: &DomainEvent) -> Result<(), LibraryError> {
        let arn = self.topic_arn(event.name.as_str()).await?;
        if arn.is_empty() {
            return Err(LibraryError::internal(format!("topic is not found {}", event.name).as_str(), None));
        }
        let json = serde_json::to_string(event)?;
        self.client.publish().topic_arn(arn).message(json).send().await?;
        Ok(())
    }
}

impl From<SdkError<CreateTopicError>> for LibraryError {
    fn from(err: SdkError<CreateTopicError>) -> Self {
        LibraryError::internal(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<ListTopicsError>> for LibraryError {
    fn from(err: SdkError<ListTopicsError>) -> Self {
        LibraryError::internal(format!("{:?}", err).as_str(), None)
    }
}

impl From<SdkError<PublishError>> for LibraryError {
    fn from(err: SdkError<PublishError>) -> Self {
        LibraryError::internal(format!("{:?}", err).as_str(), None)
    }
}
