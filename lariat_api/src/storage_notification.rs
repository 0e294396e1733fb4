// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;

/// Declared object-storage notification binding.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StorageBinding {
    pub bucket_name: String,
    pub events: Vec<String>,
    pub prefix_filter: Option<String>,
    pub suffix_filter: Option<String>,
}

/// The single notification-configuration entry installed on a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEntry {
    pub function: FunctionIdentity,
    pub events: Vec<String>,
    pub prefix_filter: Option<String>,
    pub suffix_filter: Option<String>,
}

#[async_trait::async_trait]
pub trait StorageNotificationAPI: Sync + Send {
    /// Install the entry as the bucket's notification configuration.
    ///
    /// This REPLACES the entire notification configuration of the bucket
    /// with the single entry given here. Configuration previously installed
    /// on the same bucket, including entries routing to other functions, is
    /// dropped.
    async fn put_bucket_notification(&mut self, bucket: &str, entry: NotificationEntry) -> anyhow::Result<()>;
}
