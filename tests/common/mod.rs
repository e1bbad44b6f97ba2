//! Shared test helpers and a scripted `ThreadsApi`.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use threadrun::error::{Result, ThreadrunError};
use threadrun::threads::ThreadsApi;
use threadrun::types::*;

/// Every call the scripted API receives, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateMessage { thread_id: String, message: NewMessage },
    ListMessages { thread_id: String, limit: u32 },
    CreateThreadAndRun(CreateThreadAndRun),
    CreateRun { thread_id: String, request: CreateRun },
    ListRuns { thread_id: String, limit: u32 },
    RetrieveRun { thread_id: String, run_id: String },
    CancelRun { thread_id: String, run_id: String },
    SubmitToolOutputs { thread_id: String, run_id: String, outputs: Vec<ToolOutput> },
}

/// A `ThreadsApi` that replays queued responses and records calls.
#[derive(Default)]
pub struct ScriptedApi {
    calls: Mutex<Vec<Call>>,
    message_results: Mutex<VecDeque<Result<ThreadMessage>>>,
    message_lists: Mutex<VecDeque<Vec<ThreadMessage>>>,
    run_results: Mutex<VecDeque<Result<Run>>>,
    run_lists: Mutex<VecDeque<Vec<Run>>>,
    retrieved: Mutex<VecDeque<Run>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Result for the next `create_message`.
    pub fn queue_message_result(&self, result: Result<ThreadMessage>) {
        self.message_results.lock().unwrap().push_back(result);
    }

    /// Page for the next `list_messages`.
    pub fn queue_message_list(&self, messages: Vec<ThreadMessage>) {
        self.message_lists.lock().unwrap().push_back(messages);
    }

    /// Result for the next run-returning write (create, cancel, submit).
    pub fn queue_run_result(&self, result: Result<Run>) {
        self.run_results.lock().unwrap().push_back(result);
    }

    /// Page for the next `list_runs`.
    pub fn queue_run_list(&self, runs: Vec<Run>) {
        self.run_lists.lock().unwrap().push_back(runs);
    }

    /// Statuses returned by successive `retrieve_run` calls.
    pub fn queue_retrievals(&self, runs: impl IntoIterator<Item = Run>) {
        self.retrieved.lock().unwrap().extend(runs);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn retrieve_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::RetrieveRun { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_run_result(&self) -> Result<Run> {
        self.run_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ThreadrunError::InvalidState("no scripted run".into())))
    }
}

#[async_trait]
impl ThreadsApi for ScriptedApi {
    async fn create_message(
        &self,
        thread_id: &str,
        message: &NewMessage,
    ) -> Result<ThreadMessage> {
        self.record(Call::CreateMessage {
            thread_id: thread_id.to_string(),
            message: message.clone(),
        });
        self.message_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(user_message("msg_auto", thread_id)))
    }

    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>> {
        self.record(Call::ListMessages {
            thread_id: thread_id.to_string(),
            limit,
        });
        Ok(self.message_lists.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn create_thread_and_run(&self, request: &CreateThreadAndRun) -> Result<Run> {
        self.record(Call::CreateThreadAndRun(request.clone()));
        self.next_run_result()
    }

    async fn create_run(&self, thread_id: &str, request: &CreateRun) -> Result<Run> {
        self.record(Call::CreateRun {
            thread_id: thread_id.to_string(),
            request: request.clone(),
        });
        self.next_run_result()
    }

    async fn list_runs(&self, thread_id: &str, limit: u32) -> Result<Vec<Run>> {
        self.record(Call::ListRuns {
            thread_id: thread_id.to_string(),
            limit,
        });
        Ok(self.run_lists.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.record(Call::RetrieveRun {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        });
        self.retrieved
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ThreadrunError::InvalidState("no scripted retrieval".into()))
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.record(Call::CancelRun {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
        });
        self.next_run_result()
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        self.record(Call::SubmitToolOutputs {
            thread_id: thread_id.to_string(),
            run_id: run_id.to_string(),
            outputs: outputs.to_vec(),
        });
        self.next_run_result()
    }
}

pub fn run(id: &str, thread_id: &str, status: &str) -> Run {
    serde_json::from_value(json!({
        "id": id,
        "thread_id": thread_id,
        "assistant_id": "asst_1",
        "status": status,
        "created_at": 1_700_000_000,
        "usage": null
    }))
    .unwrap()
}

pub fn run_with_usage(id: &str, thread_id: &str, status: &str) -> Run {
    let mut run = run(id, thread_id, status);
    run.usage = Some(Usage {
        input_tokens: 11,
        output_tokens: 7,
        total_tokens: 18,
    });
    run
}

pub fn failed_run(id: &str, thread_id: &str, message: &str) -> Run {
    serde_json::from_value(json!({
        "id": id,
        "thread_id": thread_id,
        "status": "failed",
        "last_error": {"code": "server_error", "message": message}
    }))
    .unwrap()
}

/// A run in `requires_action` with `(call_id, name, arguments)` tool calls.
pub fn action_run(id: &str, thread_id: &str, calls: &[(&str, &str, &str)]) -> Run {
    let tool_calls: Vec<_> = calls
        .iter()
        .map(|(call_id, name, arguments)| {
            json!({
                "id": call_id,
                "type": "function",
                "function": {"name": name, "arguments": arguments}
            })
        })
        .collect();
    serde_json::from_value(json!({
        "id": id,
        "thread_id": thread_id,
        "status": "requires_action",
        "required_action": {
            "type": "submit_tool_outputs",
            "submit_tool_outputs": {"tool_calls": tool_calls}
        },
        "usage": {"prompt_tokens": 5, "completion_tokens": 3, "total_tokens": 8}
    }))
    .unwrap()
}

pub fn assistant_message(id: &str, thread_id: &str, text: &str, external_id: Option<&str>) -> ThreadMessage {
    let metadata = match external_id {
        Some(ext) => json!({"messageId": ext}),
        None => json!({}),
    };
    serde_json::from_value(json!({
        "id": id,
        "thread_id": thread_id,
        "role": "assistant",
        "created_at": 1_700_000_100,
        "content": [{
            "type": "text",
            "text": {
                "value": text,
                "annotations": [{"type": "file_citation", "text": "[1]", "start_index": 0, "end_index": 3}]
            }
        }],
        "metadata": metadata
    }))
    .unwrap()
}

pub fn user_message(id: &str, thread_id: &str) -> ThreadMessage {
    serde_json::from_value(json!({
        "id": id,
        "thread_id": thread_id,
        "role": "user",
        "content": [{"type": "text", "text": {"value": "question", "annotations": []}}],
        "metadata": {}
    }))
    .unwrap()
}

pub fn bad_request() -> ThreadrunError {
    ThreadrunError::api(400, "Can't add messages to thread while a run is active.")
}
