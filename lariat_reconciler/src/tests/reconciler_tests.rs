// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-FileCopyrightText: © 2024 Claudio Cicconetti <c.cicconetti@iit.cnr.it>
// SPDX-License-Identifier: MIT
use lariat_api::function_identity::FunctionIdentity;
use lariat_api::schedule::ScheduleBinding;
use lariat_api::storage_notification::{NotificationEntry, StorageBinding};
use lariat_api::topic::TopicBinding;

use crate::reconciler::{Reconciler, TriggerCatalog, TRIGGER_SERVICE_PRINCIPALS};
use crate::tests::test_utils::*;

fn function() -> FunctionIdentity {
    FunctionIdentity::from("arn:aws:lambda:eu-west-1:000000000000:function:app")
}

fn daily_schedule() -> ScheduleBinding {
    ScheduleBinding {
        name: "daily".to_string(),
        schedule_expression: Some("rate(1 day)".to_string()),
        event_pattern: None,
    }
}

#[tokio::test]
async fn test_grants_survive_a_second_run() {
    init_logger();
    let (mut provider, mut receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog::default();
    let first = reconciler.reconcile(&function(), &catalog).await.unwrap();
    let second = reconciler.reconcile(&function(), &catalog).await.unwrap();

    // Same statement ids on both runs, and the re-run is not an error.
    assert_eq!(first, second);
    assert_eq!(first.grants.len(), TRIGGER_SERVICE_PRINCIPALS.len());
    let lck = state.lock().await;
    assert_eq!(lck.grants.len(), TRIGGER_SERVICE_PRINCIPALS.len());

    let events = drain_events(&mut receiver);
    assert_eq!(events.len(), 2 * TRIGGER_SERVICE_PRINCIPALS.len());
    assert!(events.iter().all(|event| event_to_string(event) == "add-permission"));
}

#[tokio::test]
async fn test_schedule_registration_idempotent() {
    init_logger();
    let (mut provider, _receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog {
        schedules: vec![daily_schedule()],
        ..Default::default()
    };
    reconciler.reconcile(&function(), &catalog).await.unwrap();
    let (rules_after_first, targets_after_first) = {
        let lck = state.lock().await;
        (lck.rules.clone(), lck.targets.clone())
    };

    reconciler.reconcile(&function(), &catalog).await.unwrap();
    let lck = state.lock().await;
    assert_eq!(lck.rules.len(), 1);
    assert_eq!(lck.targets.len(), 1);
    assert_eq!(lck.rules, rules_after_first);
    assert_eq!(lck.targets, targets_after_first);
}

#[tokio::test]
async fn test_daily_schedule_scenario() {
    init_logger();
    let (mut provider, _receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog {
        schedules: vec![daily_schedule()],
        ..Default::default()
    };
    let summary = reconciler.reconcile(&function(), &catalog).await.unwrap();
    assert_eq!(summary.rules, vec!["arn:aws:events:::rule/daily".to_string()]);

    let lck = state.lock().await;
    assert_eq!(lck.rules.get("daily").unwrap().schedule_expression, Some("rate(1 day)".to_string()));
    let target = lck.targets.get("daily").unwrap();
    assert_eq!(target.target_id, "daily");
    assert_eq!(target.function, function());
    assert_eq!(
        target.transform.paths,
        std::collections::HashMap::from([("event".to_string(), "$".to_string())])
    );
    assert_eq!(target.transform.template, r#"{"task_name": "daily", "event": <event>}"#);
}

#[tokio::test]
async fn test_schedule_with_no_expression_is_still_sent() {
    init_logger();
    let (mut provider, mut receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog {
        schedules: vec![ScheduleBinding {
            name: "inert".to_string(),
            schedule_expression: None,
            event_pattern: None,
        }],
        ..Default::default()
    };
    reconciler.reconcile(&function(), &catalog).await.unwrap();

    let lck = state.lock().await;
    assert!(lck.rules.contains_key("inert"));
    let events = drain_events(&mut receiver);
    assert!(events.iter().any(|event| event_to_string(event) == "put-rule"));
}

#[tokio::test]
async fn test_put_targets_failure_is_fatal_and_leaves_the_rule() {
    init_logger();
    let (mut provider, _receiver, state) = mock_provider();
    state.lock().await.fail_put_targets = true;
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog {
        schedules: vec![daily_schedule()],
        ..Default::default()
    };
    let result = reconciler.reconcile(&function(), &catalog).await;
    assert!(result.is_err());

    // No rollback: the rule exists with no target attached.
    let lck = state.lock().await;
    assert!(lck.rules.contains_key("daily"));
    assert!(lck.targets.is_empty());
}

#[tokio::test]
async fn test_topic_scenario() {
    init_logger();
    let (mut provider, _receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, false);

    let catalog = TriggerCatalog {
        topics: vec![TopicBinding {
            topic_name: "alerts".to_string(),
            handler: "app.handlers.alert".to_string(),
        }],
        ..Default::default()
    };
    reconciler.reconcile(&function(), &catalog).await.unwrap();
    // A re-run reuses the topic and does not duplicate the subscription.
    reconciler.reconcile(&function(), &catalog).await.unwrap();

    let lck = state.lock().await;
    assert_eq!(lck.topics.get("alerts"), Some(&"arn:aws:sns:::alerts".to_string()));
    assert_eq!(lck.subscriptions, vec![("arn:aws:sns:::alerts".to_string(), function())]);
}

#[tokio::test]
async fn test_storage_notification_replaces_prior_configuration() {
    init_logger();
    let (mut provider, _receiver, state) = mock_provider();

    // Unrelated configuration previously installed on the same bucket.
    let prior = NotificationEntry {
        function: FunctionIdentity::from("arn:aws:lambda:eu-west-1:000000000000:function:other"),
        events: vec!["s3:ObjectRemoved:*".to_string()],
        prefix_filter: None,
        suffix_filter: None,
    };
    state
        .lock()
        .await
        .bucket_notifications
        .insert("incoming".to_string(), vec![prior.clone()]);

    let mut reconciler = Reconciler::new(&mut provider, false);
    let catalog = TriggerCatalog {
        buckets: vec![StorageBinding {
            bucket_name: "incoming".to_string(),
            events: vec!["s3:ObjectCreated:*".to_string()],
            prefix_filter: Some("in/".to_string()),
            suffix_filter: None,
        }],
        ..Default::default()
    };
    reconciler.reconcile(&function(), &catalog).await.unwrap();

    let lck = state.lock().await;
    let entries = lck.bucket_notifications.get("incoming").unwrap();
    assert_eq!(entries.len(), 1);
    assert!(!entries.contains(&prior));
    assert_eq!(entries[0].function, function());
    assert_eq!(entries[0].events, vec!["s3:ObjectCreated:*".to_string()]);
    assert_eq!(entries[0].prefix_filter, Some("in/".to_string()));
}

#[tokio::test]
async fn test_dry_run_issues_no_mutation() {
    init_logger();
    let (mut provider, mut receiver, state) = mock_provider();
    let mut reconciler = Reconciler::new(&mut provider, true);

    let catalog = TriggerCatalog {
        schedules: vec![
            daily_schedule(),
            ScheduleBinding {
                name: "hourly".to_string(),
                schedule_expression: Some("rate(1 hour)".to_string()),
                event_pattern: None,
            },
        ],
        topics: vec![TopicBinding {
            topic_name: "alerts".to_string(),
            handler: "app.handlers.alert".to_string(),
        }],
        buckets: vec![StorageBinding {
            bucket_name: "incoming".to_string(),
            events: vec!["s3:ObjectCreated:*".to_string()],
            prefix_filter: None,
            suffix_filter: None,
        }],
    };
    let summary = reconciler.reconcile(&FunctionIdentity::placeholder(), &catalog).await.unwrap();

    // The plan is still fully computed.
    assert_eq!(summary.grants.len(), TRIGGER_SERVICE_PRINCIPALS.len());
    assert_eq!(summary.rules, vec!["daily".to_string(), "hourly".to_string()]);
    assert_eq!(summary.subscriptions, vec!["alerts".to_string()]);
    assert_eq!(summary.notifications, vec!["incoming".to_string()]);

    no_mutation_event(&mut receiver);
    let lck = state.lock().await;
    assert!(lck.grants.is_empty());
    assert!(lck.rules.is_empty());
    assert!(lck.targets.is_empty());
    assert!(lck.topics.is_empty());
    assert!(lck.subscriptions.is_empty());
    assert!(lck.bucket_notifications.is_empty());
}
