//! Run types and request bodies for the run endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::MessageBody;
use super::usage::Usage;

/// Status of a remote run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RunStatus {
    Queued,
    InProgress,
    RequiresAction,
    Cancelling,
    Cancelled,
    Failed,
    Completed,
    Incomplete,
    Expired,
    /// Any status this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Still being worked on by the service; keep polling.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Queued | Self::InProgress)
    }

    /// A run in this status can be joined by a concurrent `run_query`.
    pub fn is_joinable(self) -> bool {
        matches!(self, Self::InProgress | Self::RequiresAction)
    }
}

/// A run as reported by the service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    pub id: String,
    pub thread_id: String,
    #[serde(default)]
    pub assistant_id: String,
    pub status: RunStatus,
    #[serde(default)]
    pub required_action: Option<RequiredAction>,
    #[serde(default)]
    pub last_error: Option<LastError>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub instructions: Option<String>,
}

impl Run {
    /// Tool calls the run is waiting on, in the order the service issued them.
    pub fn pending_tool_calls(&self) -> &[ToolCall] {
        self.required_action
            .as_ref()
            .map(|action| action.submit_tool_outputs.tool_calls.as_slice())
            .unwrap_or_default()
    }
}

/// Identifies a run for observation or cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunRef {
    pub id: String,
    pub thread_id: String,
}

impl RunRef {
    pub fn new(thread_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            thread_id: thread_id.into(),
        }
    }
}

impl From<&Run> for RunRef {
    fn from(run: &Run) -> Self {
        Self::new(run.thread_id.clone(), run.id.clone())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequiredAction {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub submit_tool_outputs: SubmitToolOutputs,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitToolOutputs {
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

/// A function call the run wants the caller to execute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub function: FunctionInvocation,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FunctionInvocation {
    pub name: String,
    /// JSON-encoded arguments, as produced by the model.
    pub arguments: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LastError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Output for one tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolOutput {
    pub tool_call_id: String,
    pub output: String,
}

/// Body of `POST /threads/{thread_id}/runs`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateRun {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
}

/// Body of `POST /threads/runs`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CreateThreadAndRun {
    pub assistant_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_instructions: Option<String>,
    pub thread: ThreadSeed,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ThreadSeed {
    pub messages: Vec<MessageBody>,
}
