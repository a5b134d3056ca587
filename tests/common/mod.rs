//! Shared fixtures for integration tests.
//!
//! Builds SSE bodies and mounts the three pipeline endpoints on a
//! wiremock server.

#![allow(dead_code)]

use std::time::Duration;

use agentdash::controller::{ControllerMessage, StreamController};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// One SSE message per JSON payload, each terminated by a blank line.
pub fn sse_body(payloads: &[Value]) -> String {
    payloads
        .iter()
        .map(|payload| format!("data: {}\n\n", payload))
        .collect()
}

/// The event sequence of a successful three-agent run.
pub fn happy_path_events() -> Vec<Value> {
    vec![
        json!({"type": "agent_started", "agent": "Research Agent"}),
        json!({"type": "tool_called", "agent": "Research Agent", "tool": "web_search"}),
        json!({"type": "agent_completed", "agent": "Research Agent"}),
        json!({"type": "agent_started", "agent": "Analysis Agent"}),
        json!({"type": "agent_completed", "agent": "Analysis Agent"}),
        json!({"type": "agent_started", "agent": "Report Agent"}),
        json!({"type": "agent_completed", "agent": "Report Agent"}),
        json!({"type": "final_report", "data": report_json()}),
    ]
}

pub fn report_json() -> Value {
    json!({
        "raw_output": "Here you go:\n{\"title\": \"Multi-Agent Trends\", \"summary\": \"Agents cooperate.\", \"key_points\": [\"tool use\", \"planning\"], \"limitations\": [\"small sample\"]}"
    })
}

pub fn sse_response(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/event-stream")
        .set_body_string(body)
}

/// Mount `POST /run` returning `run_id` and `GET /events/{run_id}` returning `body`.
pub async fn mount_run(server: &MockServer, run_id: &str, body: String) {
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"run_id": run_id})))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/events/{}", run_id)))
        .respond_with(sse_response(body))
        .mount(server)
        .await;
}

/// Feed controller messages until the run stops.
pub async fn drive_to_completion(
    controller: &mut StreamController,
    message_rx: &mut mpsc::UnboundedReceiver<ControllerMessage>,
) {
    while controller.is_running() {
        let message = tokio::time::timeout(Duration::from_secs(5), message_rx.recv())
            .await
            .expect("controller message in time")
            .expect("channel open");
        controller.handle(message);
    }
}
