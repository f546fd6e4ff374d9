//! Integration tests for the workflow client's poll state machine

use super::test_utils::{completed, status, submitted, ScriptedGateway};
use lifecoord::error::GatewayError;
use lifecoord::workflow::{
    RetryPolicy, SubmitResponse, WorkflowClient, WorkflowEvent, WorkflowHandle, WorkflowOutcome,
    WorkflowRequest, WorkflowStatus,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

fn client(gateway: &Arc<ScriptedGateway>) -> WorkflowClient {
    WorkflowClient::new(gateway.clone())
}

fn meal_planning() -> WorkflowRequest {
    WorkflowRequest::new("meal_planning", "u1")
}

#[tokio::test(start_paused = true)]
async fn test_missing_workflow_id_is_submission_failure_without_polls() {
    let gateway = Arc::new(ScriptedGateway::new().with_submit(Ok(SubmitResponse {
        status: Some("started".to_string()),
        ..Default::default()
    })));

    let outcome = client(&gateway).run(&meal_planning()).await;

    assert!(matches!(outcome, WorkflowOutcome::SubmissionFailed { .. }));
    assert_eq!(outcome.attempts(), 0);
    assert_eq!(gateway.submit_calls(), 1);
    assert_eq!(gateway.poll_calls(""), 0);
}

#[tokio::test(start_paused = true)]
async fn test_empty_workflow_id_is_submission_failure() {
    let gateway = Arc::new(ScriptedGateway::new().with_submit(submitted("  ")));
    let outcome = client(&gateway).run(&meal_planning()).await;
    assert!(matches!(outcome, WorkflowOutcome::SubmissionFailed { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_submit_transport_error_carries_message() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(Err(GatewayError::Transport("connection refused".to_string()))),
    );
    match client(&gateway).run(&meal_planning()).await {
        WorkflowOutcome::SubmissionFailed { error } => assert!(error.contains("connection refused")),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_completes_on_tenth_poll() {
    let mut script: Vec<_> = (0..9).map(|_| status("running")).collect();
    script.push(completed(json!({"plan": "done"}), "nani"));
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_10"))
            .with_statuses("wf_10", script),
    );

    let outcome = client(&gateway).run(&meal_planning()).await;

    assert_eq!(
        outcome,
        WorkflowOutcome::Completed {
            workflow_id: "wf_10".to_string(),
            result: Some(json!({"plan": "done"})),
            primary_agent: Some("nani".to_string()),
            attempts: 10,
        }
    );
    assert_eq!(gateway.poll_calls("wf_10"), 10);
}

#[tokio::test(start_paused = true)]
async fn test_times_out_after_budget_without_eleventh_poll() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_slow"))
            .with_statuses("wf_slow", (0..11).map(|_| status("running"))),
    );

    let outcome = client(&gateway).run(&meal_planning()).await;

    assert_eq!(
        outcome,
        WorkflowOutcome::TimedOut {
            workflow_id: "wf_slow".to_string(),
            attempts: 10,
        }
    );
    assert_eq!(gateway.poll_calls("wf_slow"), 10);
}

#[tokio::test(start_paused = true)]
async fn test_poll_error_on_third_call_stops_polling() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_err"))
            .with_statuses(
                "wf_err",
                vec![
                    status("running"),
                    status("running"),
                    Err(GatewayError::Transport("connection reset".to_string())),
                    completed(json!("never seen"), "milo"),
                ],
            ),
    );

    let outcome = client(&gateway).run(&meal_planning()).await;

    match &outcome {
        WorkflowOutcome::PollError {
            workflow_id,
            error,
            attempts,
        } => {
            assert_eq!(workflow_id, "wf_err");
            assert!(error.contains("connection reset"));
            assert_eq!(*attempts, 3);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(gateway.poll_calls("wf_err"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_meal_plan_example() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_42"))
            .with_statuses(
                "wf_42",
                vec![
                    status("running"),
                    status("running"),
                    completed(json!("Here is your plan..."), "milo"),
                ],
            ),
    );

    let outcome = client(&gateway).run(&meal_planning()).await;

    assert_eq!(
        serde_json::to_value(&outcome).unwrap(),
        json!({
            "status": "completed",
            "workflow_id": "wf_42",
            "result": "Here is your plan...",
            "primary_agent": "milo",
            "attempts": 3
        })
    );
    assert_eq!(gateway.poll_calls("wf_42"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_remote_failure_is_distinct_from_poll_error() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_f"))
            .with_statuses(
                "wf_f",
                vec![Ok(lifecoord::workflow::StatusResponse {
                    status: "failed".to_string(),
                    error: Some("luna is offline".to_string()),
                    ..Default::default()
                })],
            ),
    );

    let outcome = client(&gateway).run(&meal_planning()).await;

    assert_eq!(
        outcome,
        WorkflowOutcome::Failed {
            workflow_id: "wf_f".to_string(),
            reason: "luna is offline".to_string(),
            attempts: 1,
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_status_keeps_polling() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_u"))
            .with_statuses(
                "wf_u",
                vec![
                    status("paused"),
                    status("pending"),
                    completed(json!("ok"), "bucky"),
                ],
            ),
    );
    let outcome = client(&gateway).run(&meal_planning()).await;
    assert!(outcome.is_success());
    assert_eq!(outcome.attempts(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_zero_budget_times_out_without_polling() {
    let gateway = Arc::new(ScriptedGateway::new().with_submit(submitted("wf_0")));
    let outcome = client(&gateway)
        .with_policy(RetryPolicy::fixed(0, Duration::from_millis(2000)))
        .run(&meal_planning())
        .await;

    assert_eq!(
        outcome,
        WorkflowOutcome::TimedOut {
            workflow_id: "wf_0".to_string(),
            attempts: 0,
        }
    );
    assert_eq!(gateway.poll_calls("wf_0"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_fixed_interval_between_polls() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_t"))
            .with_statuses("wf_t", (0..3).map(|_| status("running"))),
    );
    let started = tokio::time::Instant::now();
    let outcome = client(&gateway)
        .with_policy(RetryPolicy::fixed(3, Duration::from_millis(2000)))
        .run(&meal_planning())
        .await;

    assert!(matches!(outcome, WorkflowOutcome::TimedOut { attempts: 3, .. }));
    // Three 50ms polls plus two 2s waits; no wait after the final poll.
    assert_eq!(started.elapsed(), Duration::from_millis(4150));
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_workflows_poll_independently() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_statuses(
                "wf_a",
                vec![status("running"), completed(json!("a"), "milo")],
            )
            .with_statuses(
                "wf_b",
                vec![
                    status("running"),
                    status("running"),
                    status("running"),
                    completed(json!("b"), "luna"),
                ],
            )
            .with_statuses("wf_c", (0..10).map(|_| status("running"))),
    );
    let client = client(&gateway);

    let mut handles = vec![
        WorkflowHandle::new("wf_a", "meal_planning"),
        WorkflowHandle::new("wf_b", "health_analysis"),
        WorkflowHandle::new("wf_c", "schedule_optimization"),
    ];
    let outcomes = client.wait_all(&mut handles).await;

    assert_eq!(outcomes[0].attempts(), 2);
    assert!(outcomes[0].is_success());
    assert_eq!(outcomes[1].attempts(), 4);
    assert!(outcomes[1].is_success());
    assert!(matches!(outcomes[2], WorkflowOutcome::TimedOut { attempts: 10, .. }));

    assert_eq!(gateway.poll_calls("wf_a"), 2);
    assert_eq!(gateway.poll_calls("wf_b"), 4);
    assert_eq!(gateway.poll_calls("wf_c"), 10);
    assert_eq!(gateway.max_in_flight_per_workflow(), 1);

    assert_eq!(handles[0].status, WorkflowStatus::Completed);
    assert_eq!(handles[0].result, Some(json!("a")));
    assert_eq!(handles[2].status, WorkflowStatus::TimedOut);
}

#[tokio::test(start_paused = true)]
async fn test_events_follow_lifecycle() {
    let gateway = Arc::new(
        ScriptedGateway::new()
            .with_submit(submitted("wf_e"))
            .with_statuses("wf_e", vec![status("running"), completed(json!("done"), "nani")]),
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let outcome = client(&gateway).with_events(tx).run(&meal_planning()).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(events.len(), 4);
    match &events[0] {
        WorkflowEvent::Submitted {
            workflow_id,
            agents_involved,
            ..
        } => {
            assert_eq!(workflow_id, "wf_e");
            assert_eq!(agents_involved, &vec!["milo", "bucky", "nani"]);
        }
        other => panic!("unexpected first event: {:?}", other),
    }
    assert_eq!(
        events[1],
        WorkflowEvent::Polled {
            workflow_id: "wf_e".to_string(),
            attempt: 1,
            status: WorkflowStatus::Running,
        }
    );
    assert_eq!(
        events[2],
        WorkflowEvent::Polled {
            workflow_id: "wf_e".to_string(),
            attempt: 2,
            status: WorkflowStatus::Completed,
        }
    );
    assert_eq!(events[3], WorkflowEvent::Finished(outcome));
}

#[tokio::test(start_paused = true)]
async fn test_abandon_stops_polling_silently() {
    let gateway = Arc::new(
        ScriptedGateway::new().with_statuses("wf_x", (0..10).map(|_| status("running"))),
    );
    let client = client(&gateway);
    let mut handle = WorkflowHandle::new("wf_x", "general_query");

    // Abandon after the second poll has been issued but before the third.
    let abandon = tokio::time::sleep(Duration::from_millis(3000));
    let outcome = client.wait_or_abandon(&mut handle, abandon).await;

    assert!(outcome.is_none());
    assert_eq!(gateway.poll_calls("wf_x"), 2);
    assert_eq!(gateway.submit_calls(), 0);
    assert_eq!(handle.status, WorkflowStatus::Running);
    assert_eq!(handle.polls, 2);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(gateway.poll_calls("wf_x"), 2);
}

#[tokio::test(start_paused = true)]
async fn test_single_poll_updates_handle() {
    let gateway = Arc::new(
        ScriptedGateway::new().with_statuses("wf_s", vec![completed(json!("done"), "bucky")]),
    );
    let mut handle = WorkflowHandle::new("wf_s", "shopping_optimization");
    let status = client(&gateway).poll(&mut handle).await.unwrap();

    assert_eq!(status, WorkflowStatus::Completed);
    assert_eq!(handle.polls, 1);
    assert_eq!(handle.primary_agent.as_deref(), Some("bucky"));
}

#[tokio::test(start_paused = true)]
async fn test_wait_counts_polls_after_manual_poll() {
    let gateway = Arc::new(ScriptedGateway::new().with_statuses(
        "wf_m",
        vec![
            status("running"),
            status("running"),
            completed(json!("done"), "luna"),
        ],
    ));
    let client = client(&gateway);
    let mut handle = WorkflowHandle::new("wf_m", "health_analysis");

    client.poll(&mut handle).await.unwrap();
    let outcome = client.wait(&mut handle).await;

    assert_eq!(outcome.attempts(), 2);
    assert_eq!(handle.polls, 3);
    assert_eq!(handle.status, WorkflowStatus::Completed);
    assert_eq!(handle.result, Some(json!("done")));
}

#[tokio::test(start_paused = true)]
async fn test_poll_error_keeps_last_observed_status() {
    let gateway = Arc::new(ScriptedGateway::new().with_statuses(
        "wf_p",
        vec![
            status("running"),
            Err(GatewayError::Timeout("gateway slow".to_string())),
        ],
    ));
    let mut handle = WorkflowHandle::new("wf_p", "general_query");
    let outcome = client(&gateway).wait(&mut handle).await;

    assert!(matches!(outcome, WorkflowOutcome::PollError { attempts: 2, .. }));
    assert_eq!(handle.status, WorkflowStatus::Running);
    assert_eq!(handle.polls, 1);
    assert!(handle.error.as_deref().unwrap().contains("gateway slow"));
}
