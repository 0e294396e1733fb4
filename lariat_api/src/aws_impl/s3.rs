// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use aws_sdk_s3::types::{
    Event, FilterRule, FilterRuleName, LambdaFunctionConfiguration, NotificationConfiguration, NotificationConfigurationFilter, S3KeyFilter,
};

use crate::storage_notification::{NotificationEntry, StorageNotificationAPI};

#[derive(Clone)]
pub struct AwsStorageNotificationClient {
    client: aws_sdk_s3::Client,
}

impl AwsStorageNotificationClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl StorageNotificationAPI for AwsStorageNotificationClient {
    async fn put_bucket_notification(&mut self, bucket: &str, entry: NotificationEntry) -> anyhow::Result<()> {
        let mut function_configuration = LambdaFunctionConfiguration::builder().lambda_function_arn(entry.function.as_str());
        for event in &entry.events {
            function_configuration = function_configuration.events(Event::from(event.as_str()));
        }

        let mut filter_rules = vec![];
        if let Some(prefix) = &entry.prefix_filter {
            filter_rules.push(FilterRule::builder().name(FilterRuleName::Prefix).value(prefix).build());
        }
        if let Some(suffix) = &entry.suffix_filter {
            filter_rules.push(FilterRule::builder().name(FilterRuleName::Suffix).value(suffix).build());
        }
        if !filter_rules.is_empty() {
            function_configuration = function_configuration.filter(
                NotificationConfigurationFilter::builder()
                    .key(S3KeyFilter::builder().set_filter_rules(Some(filter_rules)).build())
                    .build(),
            );
        }

        // The fresh configuration carries this single entry only: the call
        // replaces whatever notification configuration the bucket had.
        let configuration = NotificationConfiguration::builder()
            .lambda_function_configurations(function_configuration.build()?)
            .build();

        self.client
            .put_bucket_notification_configuration()
            .bucket(bucket)
            .notification_configuration(configuration)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("put-bucket-notification failed for bucket '{}': {}", bucket, err.into_service_error()))?;
        Ok(())
    }
}
