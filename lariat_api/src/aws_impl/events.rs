// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use aws_sdk_eventbridge::types::{InputTransformer, Target};

use crate::schedule::{RuleTarget, ScheduleBinding, ScheduleRuleAPI};

#[derive(Clone)]
pub struct AwsScheduleRuleClient {
    client: aws_sdk_eventbridge::Client,
}

impl AwsScheduleRuleClient {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_eventbridge::Client::new(config),
        }
    }
}

#[async_trait::async_trait]
impl ScheduleRuleAPI for AwsScheduleRuleClient {
    async fn put_rule(&mut self, binding: &ScheduleBinding) -> anyhow::Result<String> {
        let out = self
            .client
            .put_rule()
            .name(&binding.name)
            .set_schedule_expression(binding.schedule_expression.clone())
            .set_event_pattern(binding.event_pattern.clone())
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("put-rule failed for rule '{}': {}", binding.name, err.into_service_error()))?;
        Ok(out.rule_arn().unwrap_or(binding.name.as_str()).to_string())
    }

    async fn put_targets(&mut self, target: RuleTarget) -> anyhow::Result<()> {
        let mut transformer = InputTransformer::builder().input_template(&target.transform.template);
        for (key, path) in &target.transform.paths {
            transformer = transformer.input_paths_map(key, path);
        }
        let target_entry = Target::builder()
            .id(&target.target_id)
            .arn(target.function.as_str())
            .input_transformer(transformer.build()?)
            .build()?;
        let out = self
            .client
            .put_targets()
            .rule(&target.rule_name)
            .targets(target_entry)
            .send()
            .await
            .map_err(|err| anyhow::anyhow!("put-targets failed for rule '{}': {}", target.rule_name, err.into_service_error()))?;
        // Target-level failures are reported in-band, not as a call error.
        if out.failed_entry_count() > 0 {
            anyhow::bail!("put-targets failed for rule '{}': {:?}", target.rule_name, out.failed_entries());
        }
        Ok(())
    }
}
