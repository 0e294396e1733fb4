// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;

/// Declared pub/sub topic binding. The handler descriptor is opaque and
/// used only for display.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TopicBinding {
    pub topic_name: String,
    pub handler: String,
}

#[async_trait::async_trait]
pub trait TopicSubscriptionAPI: Sync + Send {
    /// Ensure a topic of the given name exists. The provider guarantees
    /// create-if-absent-else-return-existing semantics by name. Returns the
    /// provider's identifier for the topic.
    async fn create_topic(&mut self, name: &str) -> anyhow::Result<String>;

    /// Subscribe the function as an invocation endpoint of the topic.
    /// Returns the provider's identifier for the subscription.
    async fn subscribe(&mut self, topic_id: &str, endpoint: &FunctionIdentity) -> anyhow::Result<String>;
}
