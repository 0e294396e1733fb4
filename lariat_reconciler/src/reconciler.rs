// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lariat_api::function_identity::FunctionIdentity;
use lariat_api::invoke_permission::{AddPermissionRequest, GrantOutcome};
use lariat_api::schedule::{InputTransform, RuleTarget, ScheduleBinding};
use lariat_api::storage_notification::{NotificationEntry, StorageBinding};
use lariat_api::topic::TopicBinding;

use crate::grant::{statement_id, GrantRecord, INVOKE_ACTION};

/// Service principals allowed to invoke the target function. The grants are
/// not scoped to a source account or source ARN.
pub const TRIGGER_SERVICE_PRINCIPALS: [&str; 4] = [
    "events.amazonaws.com",
    "sns.amazonaws.com",
    "s3.amazonaws.com",
    "apigateway.amazonaws.com",
];

/// The declarative set of desired event-source bindings, read once from the
/// application descriptor and never mutated. The three catalogs are
/// independent; within a catalog the declared order is kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriggerCatalog {
    pub schedules: Vec<ScheduleBinding>,
    pub topics: Vec<TopicBinding>,
    pub buckets: Vec<StorageBinding>,
}

/// Everything granted and registered (or simulated) during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileSummary {
    pub grants: Vec<GrantRecord>,
    pub rules: Vec<String>,
    pub subscriptions: Vec<String>,
    pub notifications: Vec<String>,
}

impl std::fmt::Display for ReconcileSummary {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        writeln!(fmt, "invoke grants:")?;
        for grant in &self.grants {
            writeln!(fmt, "  {} [{}]", grant.principal, grant.statement_id)?;
        }
        writeln!(fmt, "schedule rules:")?;
        for rule in &self.rules {
            writeln!(fmt, "  {}", rule)?;
        }
        writeln!(fmt, "topic subscriptions:")?;
        for subscription in &self.subscriptions {
            writeln!(fmt, "  {}", subscription)?;
        }
        writeln!(fmt, "bucket notifications:")?;
        for bucket in &self.notifications {
            writeln!(fmt, "  {}", bucket)?;
        }
        Ok(())
    }
}

/// Walks the trigger catalogs of an application and issues the provider
/// calls needed to wire every binding to the target function. Strictly
/// sequential; the first fatal error aborts the run with no cleanup. With
/// `dry_run` set, no mutation is issued and the computed plan is only
/// logged.
pub struct Reconciler {
    invoke_permission_client: Box<dyn lariat_api::invoke_permission::InvokePermissionAPI>,
    schedule_client: Box<dyn lariat_api::schedule::ScheduleRuleAPI>,
    topic_client: Box<dyn lariat_api::topic::TopicSubscriptionAPI>,
    storage_client: Box<dyn lariat_api::storage_notification::StorageNotificationAPI>,
    dry_run: bool,
}

impl Reconciler {
    pub fn new(provider: &mut dyn lariat_api::outer::provider::ProviderAPI, dry_run: bool) -> Self {
        Self {
            invoke_permission_client: provider.invoke_permission_api(),
            schedule_client: provider.schedule_rule_api(),
            topic_client: provider.topic_subscription_api(),
            storage_client: provider.storage_notification_api(),
            dry_run,
        }
    }

    /// Apply all three catalogs. The order between categories does not
    /// matter; it is fixed here only to keep runs comparable.
    pub async fn reconcile(&mut self, function: &FunctionIdentity, catalog: &TriggerCatalog) -> anyhow::Result<ReconcileSummary> {
        let mut summary = ReconcileSummary::default();
        self.grant_invoke_permissions(function, &mut summary).await?;
        self.register_schedules(function, &catalog.schedules, &mut summary).await?;
        self.register_topics(function, &catalog.topics, &mut summary).await?;
        self.register_storage_notifications(function, &catalog.buckets, &mut summary).await?;
        Ok(summary)
    }

    async fn grant_invoke_permissions(&mut self, function: &FunctionIdentity, summary: &mut ReconcileSummary) -> anyhow::Result<()> {
        for principal in TRIGGER_SERVICE_PRINCIPALS {
            let statement_id = statement_id(function, principal, INVOKE_ACTION);
            if self.dry_run {
                log::info!("[dry run] would grant invoke on '{}' to '{}' [{}]", function, principal, statement_id);
            } else {
                let outcome = self
                    .invoke_permission_client
                    .add_permission(AddPermissionRequest {
                        function: function.clone(),
                        statement_id: statement_id.clone(),
                        principal: principal.to_string(),
                        action: INVOKE_ACTION.to_string(),
                    })
                    .await?;
                match outcome {
                    GrantOutcome::Granted => log::info!("granted invoke on '{}' to '{}' [{}]", function, principal, statement_id),
                    GrantOutcome::AlreadyGranted => {
                        log::info!("invoke grant for '{}' already present [{}]", principal, statement_id)
                    }
                }
            }
            summary.grants.push(GrantRecord {
                principal: principal.to_string(),
                statement_id,
            });
        }
        Ok(())
    }

    async fn register_schedules(
        &mut self,
        function: &FunctionIdentity,
        schedules: &[ScheduleBinding],
        summary: &mut ReconcileSummary,
    ) -> anyhow::Result<()> {
        for binding in schedules {
            if binding.schedule_expression.is_none() && binding.event_pattern.is_none() {
                // Sent anyway: the provider decides what an empty rule means.
                log::warn!("schedule rule '{}' has neither a schedule expression nor an event pattern", binding.name);
            }
            if self.dry_run {
                log::info!("[dry run] would put rule '{}' with a payload-transforming target on '{}'", binding.name, function);
                summary.rules.push(binding.name.clone());
                continue;
            }
            let rule_id = self.schedule_client.put_rule(binding).await?;
            self.schedule_client
                .put_targets(RuleTarget {
                    rule_name: binding.name.clone(),
                    target_id: binding.name.clone(),
                    function: function.clone(),
                    transform: task_input_transform(&binding.name),
                })
                .await?;
            log::info!("put rule '{}' ({}) targeting '{}'", binding.name, rule_id, function);
            summary.rules.push(rule_id);
        }
        Ok(())
    }

    async fn register_topics(&mut self, function: &FunctionIdentity, topics: &[TopicBinding], summary: &mut ReconcileSummary) -> anyhow::Result<()> {
        for binding in topics {
            if self.dry_run {
                log::info!(
                    "[dry run] would create topic '{}' and subscribe '{}' (handler '{}')",
                    binding.topic_name,
                    function,
                    binding.handler
                );
                summary.subscriptions.push(binding.topic_name.clone());
                continue;
            }
            let topic_id = self.topic_client.create_topic(&binding.topic_name).await?;
            let subscription_id = self.topic_client.subscribe(&topic_id, function).await?;
            log::info!(
                "subscribed '{}' to topic '{}' ({}) for handler '{}'",
                function,
                binding.topic_name,
                subscription_id,
                binding.handler
            );
            summary.subscriptions.push(subscription_id);
        }
        Ok(())
    }

    async fn register_storage_notifications(
        &mut self,
        function: &FunctionIdentity,
        buckets: &[StorageBinding],
        summary: &mut ReconcileSummary,
    ) -> anyhow::Result<()> {
        for binding in buckets {
            if self.dry_run {
                log::info!(
                    "[dry run] would replace the notification configuration of bucket '{}' ({} event types) with target '{}'",
                    binding.bucket_name,
                    binding.events.len(),
                    function
                );
                summary.notifications.push(binding.bucket_name.clone());
                continue;
            }
            log::warn!("replacing the entire notification configuration of bucket '{}'", binding.bucket_name);
            self.storage_client
                .put_bucket_notification(
                    &binding.bucket_name,
                    NotificationEntry {
                        function: function.clone(),
                        events: binding.events.clone(),
                        prefix_filter: binding.prefix_filter.clone(),
                        suffix_filter: binding.suffix_filter.clone(),
                    },
                )
                .await?;
            log::info!(
                "installed the notification configuration of bucket '{}' ({} event types)",
                binding.bucket_name,
                binding.events.len()
            );
            summary.notifications.push(binding.bucket_name.clone());
        }
        Ok(())
    }
}

/// Transform attached to every rule target: the raw trigger event is mapped
/// to the `event` key and the literal task name is injected, so invocations
/// receive `{"task_name": <name>, "event": <original event>}`.
pub fn task_input_transform(task_name: &str) -> InputTransform {
    InputTransform {
        paths: std::collections::HashMap::from([(String::from("event"), String::from("$"))]),
        template: format!("{{\"task_name\": {}, \"event\": <event>}}", serde_json::Value::from(task_name)),
    }
}
