// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

/// Provider handle backed by the AWS SDK. One shared configuration is
/// loaded per run; every per-concern client is built from it. Timeouts and
/// retries are whatever the SDK defaults to.
pub struct AwsProvider {
    config: aws_config::SdkConfig,
}

impl AwsProvider {
    pub async fn new(profile: Option<String>) -> Self {
        let mut loader = aws_config::from_env();
        if let Some(profile) = profile {
            log::debug!("loading provider credentials from profile '{}'", profile);
            loader = loader.profile_name(profile);
        }
        Self { config: loader.load().await }
    }
}

impl crate::outer::provider::ProviderAPI for AwsProvider {
    fn invoke_permission_api(&mut self) -> Box<dyn crate::invoke_permission::InvokePermissionAPI> {
        Box::new(crate::aws_impl::lambda::AwsInvokePermissionClient::new(&self.config))
    }

    fn schedule_rule_api(&mut self) -> Box<dyn crate::schedule::ScheduleRuleAPI> {
        Box::new(crate::aws_impl::events::AwsScheduleRuleClient::new(&self.config))
    }

    fn topic_subscription_api(&mut self) -> Box<dyn crate::topic::TopicSubscriptionAPI> {
        Box::new(crate::aws_impl::sns::AwsTopicSubscriptionClient::new(&self.config))
    }

    fn storage_notification_api(&mut self) -> Box<dyn crate::storage_notification::StorageNotificationAPI> {
        Box::new(crate::aws_impl::s3::AwsStorageNotificationClient::new(&self.config))
    }
}
