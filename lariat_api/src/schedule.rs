// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use crate::function_identity::FunctionIdentity;

/// Declared scheduled-rule binding. At least one of the two expression
/// fields is expected to be present for the rule to ever fire, but a binding
/// with neither is still legal and is sent to the provider unmodified.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleBinding {
    pub name: String,
    pub schedule_expression: Option<String>,
    pub event_pattern: Option<String>,
}

/// Payload transform applied by the provider before invoking the target:
/// `paths` extracts named values from the raw trigger event, `template`
/// rebuilds the invocation payload around them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputTransform {
    pub paths: std::collections::HashMap<String, String>,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTarget {
    pub rule_name: String,
    pub target_id: String,
    pub function: FunctionIdentity,
    pub transform: InputTransform,
}

#[async_trait::async_trait]
pub trait ScheduleRuleAPI: Sync + Send {
    /// Create or update the rule named in the binding. Calling again with
    /// the same name overwrites the existing rule definition. Returns the
    /// provider's identifier for the rule.
    async fn put_rule(&mut self, binding: &ScheduleBinding) -> anyhow::Result<String>;

    /// Attach a single payload-transforming target to an existing rule.
    async fn put_targets(&mut self, target: RuleTarget) -> anyhow::Result<()>;
}
