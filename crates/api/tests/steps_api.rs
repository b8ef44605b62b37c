//! Integration tests for the step orchestration endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post, put_json, MockTaskExec};
use serde_json::json;
use stepline_core::state::RemoteState;

fn inputs() -> serde_json::Value {
    json!([{"task": "build", "image": "ci-runner"}])
}

// ---------------------------------------------------------------------------
// Create / get / list
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_step_returns_no_content_and_registers_the_step() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    let response = put_json(app.clone(), "/steps/s1", inputs()).await;
    common::assert_no_content(&response);

    let response = get(app, "/steps").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(["s1"]));
}

#[tokio::test]
async fn get_step_returns_record_with_task_group_id() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    put_json(app.clone(), "/steps/s1", inputs()).await;

    let response = get(app, "/steps/s1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["uid"], "s1");
    assert_eq!(json["input"], json!({}));
    assert_eq!(json["parameters"]["taskGroupId"], "g1");
    assert_eq!(json["parameters"]["state"], "running");
}

#[tokio::test]
async fn unknown_step_returns_404_with_message() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    let response = get(app, "/steps/missing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Step with uid missing unknown");
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[tokio::test]
async fn status_returns_single_state_field() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client.clone());

    put_json(app.clone(), "/steps/s1", inputs()).await;

    let response = get(app.clone(), "/steps/s1/status").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"state": "running"}));

    client.set_group_state(RemoteState::Failed);
    let response = get(app, "/steps/s1/status").await;
    assert_eq!(body_json(response).await, json!({"state": "cancelled"}));
}

#[tokio::test]
async fn unmapped_remote_state_is_a_configuration_error() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client.clone());

    put_json(app.clone(), "/steps/s1", inputs()).await;
    client.set_unknown_group_state("hibernating");

    let response = get(app, "/steps/s1/status").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["code"], "CONFIGURATION_ERROR");
}

// ---------------------------------------------------------------------------
// Task operations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancel_rerun_and_complete_return_no_content_for_known_task() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    put_json(app.clone(), "/steps/s1", inputs()).await;

    for uri in [
        "/steps/s1/cancel",
        "/steps/s1/tasks/t1/cancel",
        "/steps/s1/tasks/t1/rerun",
        "/steps/s1/tasks/t1/complete",
    ] {
        let response = post(app.clone(), uri).await;
        common::assert_no_content(&response);
    }
}

#[tokio::test]
async fn unknown_task_returns_its_own_404() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    put_json(app.clone(), "/steps/s1", inputs()).await;

    let response = post(app, "/steps/s1/tasks/t9/cancel").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Task t9 not found in task group for step s1");
}

#[tokio::test]
async fn rerun_moves_completed_step_back_to_running() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client.clone());

    put_json(app.clone(), "/steps/s1", inputs()).await;

    client.set_group_state(RemoteState::Completed);
    let response = get(app.clone(), "/steps/s1/status").await;
    assert_eq!(body_json(response).await, json!({"state": "completed"}));

    let response = post(app.clone(), "/steps/s1/tasks/t1/rerun").await;
    common::assert_no_content(&response);

    // The local record is running again without another status poll.
    let response = get(app, "/steps/s1").await;
    assert_eq!(body_json(response).await["parameters"]["state"], "running");
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn delete_removes_the_step_from_the_listing() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    put_json(app.clone(), "/steps/s1", inputs()).await;

    let response = delete(app.clone(), "/steps/s1").await;
    common::assert_no_content(&response);

    let response = get(app.clone(), "/steps").await;
    assert_eq!(body_json(response).await, json!([]));

    let response = get(app, "/steps/s1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn recreating_a_step_replaces_its_task_group() {
    let client = MockTaskExec::new();
    let app = common::build_test_app(client);

    put_json(app.clone(), "/steps/s1", inputs()).await;
    put_json(app.clone(), "/steps/s1", inputs()).await;

    let response = get(app, "/steps/s1").await;
    assert_eq!(body_json(response).await["parameters"]["taskGroupId"], "g2");
}
