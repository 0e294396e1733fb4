// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;
use crate::topic::TopicSubscriptionAPI;

#[derive(Clone)]
pub struct AwsTopicSubscriptionClient {
    client: aws_sdk_sns::Client,
}

impl AwsTopicSubscriptionClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_sns::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl TopicSubscriptionAPI for AwsTopicSubscriptionClient {
    async fn create_topic(&mut self, name: &str) -> anyhow::Result<String> {
        let out = self
            .client
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("create-topic failed for '{}': {}", name, err.into_service_error()))?;
        match out.topic_arn() {
            Some(arn) => Ok(arn.to_string()),
            None => Err(anyhow::anyhow!("create-topic returned no identifier for '{}'", name)),
        }
    }

    async fn subscribe(&mut self, topic_id: &str, endpoint: &FunctionIdentity) -> anyhow::Result<String> {
        // Subscribe is idempotent for an identical (topic, protocol,
        // endpoint) triple: the existing subscription is returned.
        let out = self
            .client
            .subscribe()
            .topic_arn(topic_id)
            .protocol("lambda")
            .endpoint(endpoint.as_str())
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("subscribe failed for topic '{}': {}", topic_id, err.into_service_error()))?;
        Ok(out.subscription_arn().unwrap_or("pending-confirmation").to_string())
    }
}
