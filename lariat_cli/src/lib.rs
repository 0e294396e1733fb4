// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use descriptor::ApplicationDescriptor;

pub mod deployment;
pub mod descriptor;

pub fn descriptor_to_catalog(descriptor: ApplicationDescriptor) -> lariat_reconciler::reconciler::TriggerCatalog {
    lariat_reconciler::reconciler::TriggerCatalog {
        schedules: descriptor
            .schedules
            .into_iter()
            .map(|schedule_spec| lariat_api::schedule::ScheduleBinding {
                name: schedule_spec.name,
                schedule_expression: schedule_spec.schedule_expression,
                event_pattern: schedule_spec.event_pattern,
            })
            .collect(),
        topics: descriptor
            .topics
            .into_iter()
            .map(|topic_spec| lariat_api::topic::TopicBinding {
                topic_name: topic_spec.name,
                handler: topic_spec.handler,
            })
            .collect(),
        buckets: descriptor
            .buckets
            .into_iter()
            .map(|bucket_spec| lariat_api::storage_notification::StorageBinding {
                bucket_name: bucket_spec.name,
                events: bucket_spec.events,
                prefix_filter: bucket_spec.prefix,
                suffix_filter: bucket_spec.suffix,
            })
            .collect(),
    }
}

pub fn lariat_default_descriptor() -> String {
    String::from(
        r##"# Event-source bindings of the application. Order within each catalog is
# the order in which the bindings are applied.

[[schedule]]
name = "daily"
schedule_expression = "rate(1 day)"
# event_pattern = '{"source": ["aws.codedeploy"]}'

[[topic]]
name = "alerts"
handler = "app.handlers.alert"

[[bucket]]
name = "incoming"
events = ["s3:ObjectCreated:*"]
prefix = "in/"
# suffix = ".csv"
"##,
    )
}
