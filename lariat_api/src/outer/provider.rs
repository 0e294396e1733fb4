// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT

/// Aggregate handle over the provider control-plane surfaces touched during
/// a deployment run. Each call site receives exactly the client it needs.
pub trait ProviderAPI {
    fn invoke_permission_api(&mut self) -> Box<dyn crate::invoke_permission::InvokePermissionAPI>;
    fn schedule_rule_api(&mut self) -> Box<dyn crate::schedule::ScheduleRuleAPI>;
    fn topic_subscription_api(&mut self) -> Box<dyn crate::topic::TopicSubscriptionAPI>;
    fn storage_notification_api(&mut self) -> Box<dyn crate::storage_notification::StorageNotificationAPI>;
}
