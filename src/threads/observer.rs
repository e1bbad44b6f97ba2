//! Observing a run until it settles, and resuming it with tool outputs.

use tracing::{debug, warn};

use super::api::ThreadsApi;
use crate::error::{Result, ThreadrunError};
use crate::types::{Run, RunRef, RunStatus, ToolOutput, Usage};
use crate::util::poll::PollSchedule;

/// Where a run ended up, from the caller's point of view.
///
/// `Error` is a finished-but-unsuccessful run, not a fault; faults come back
/// as `Err(ThreadrunError)` from [`observe_run`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Text(TextAnswer),
    Function(FunctionCalls),
    Error(RunFailure),
}

/// The assistant's reply from a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAnswer {
    pub content: String,
    pub annotations: Vec<serde_json::Value>,
    pub thread_id: String,
    pub usage: Option<Usage>,
    pub message_id: String,
}

/// Tool calls a run is waiting on.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCalls {
    /// One entry per tool call, in the order the service issued them.
    pub calls: Vec<FunctionCall>,
    pub thread_id: String,
    /// Pass to [`submit_tool_outputs`] to resume the run.
    pub handle: ToolOutputsHandle,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: serde_json::Value,
    pub usage: Option<Usage>,
}

/// A run that ended in any status other than `completed` or `requires_action`.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFailure {
    pub thread_id: String,
    pub run_id: String,
    pub status: RunStatus,
    /// The service's `last_error.message`, when it gave one.
    pub message: Option<String>,
    pub usage: Option<Usage>,
}

/// Resumption capability for a run in `requires_action`.
///
/// Outputs must be supplied in the same number and order as `tool_call_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutputsHandle {
    pub thread_id: String,
    pub run_id: String,
    pub tool_call_ids: Vec<String>,
}

impl ToolOutputsHandle {
    /// Pair output *i* with tool call *i*.
    pub fn pair(&self, outputs: Vec<String>) -> Result<Vec<ToolOutput>> {
        if outputs.len() != self.tool_call_ids.len() {
            return Err(ThreadrunError::InvalidArgument(format!(
                "Run {} expects {} tool outputs, got {}",
                self.run_id,
                self.tool_call_ids.len(),
                outputs.len()
            )));
        }

        Ok(self
            .tool_call_ids
            .iter()
            .zip(outputs)
            .map(|(id, output)| ToolOutput {
                tool_call_id: id.clone(),
                output,
            })
            .collect())
    }
}

/// Poll a run until it leaves `queued`/`in_progress`, then map its status.
///
/// There is no built-in timeout; cancel the run to stop waiting.
pub async fn observe_run(
    api: &dyn ThreadsApi,
    run: &RunRef,
    schedule: &PollSchedule,
) -> Result<RunOutcome> {
    let mut current = api.retrieve_run(&run.thread_id, &run.id).await?;
    let mut delays = schedule.delays();

    while current.status.is_in_flight() {
        let delay = delays.next().unwrap_or(schedule.min_delay);
        debug!(
            thread_id = %run.thread_id,
            run_id = %run.id,
            status = %current.status,
            delay_ms = delay.as_millis() as u64,
            "run in flight"
        );
        tokio::time::sleep(delay).await;
        current = api.retrieve_run(&run.thread_id, &run.id).await?;
    }

    settle(api, current).await
}

/// Map a run that is no longer in flight to an outcome.
pub async fn settle(api: &dyn ThreadsApi, run: Run) -> Result<RunOutcome> {
    match run.status {
        RunStatus::Completed => {
            let latest = api
                .list_messages(&run.thread_id, 1)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| {
                    ThreadrunError::InvalidState(format!(
                        "Run {} completed but thread {} has no messages",
                        run.id, run.thread_id
                    ))
                })?;
            let text = latest.first_text().ok_or_else(|| {
                ThreadrunError::InvalidState(format!(
                    "Latest message {} does not start with text content",
                    latest.id
                ))
            })?;

            Ok(RunOutcome::Text(TextAnswer {
                content: text.value.clone(),
                annotations: text.annotations.clone(),
                thread_id: run.thread_id,
                usage: run.usage,
                message_id: latest.id,
            }))
        }
        RunStatus::RequiresAction => {
            let tool_calls = run.pending_tool_calls();
            let calls = tool_calls
                .iter()
                .map(|call| {
                    Ok(FunctionCall {
                        name: call.function.name.clone(),
                        arguments: serde_json::from_str(&call.function.arguments)?,
                        usage: run.usage,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            let handle = ToolOutputsHandle {
                thread_id: run.thread_id.clone(),
                run_id: run.id.clone(),
                tool_call_ids: tool_calls.iter().map(|call| call.id.clone()).collect(),
            };

            Ok(RunOutcome::Function(FunctionCalls {
                calls,
                thread_id: run.thread_id,
                handle,
                usage: run.usage,
            }))
        }
        status => {
            let message = run.last_error.and_then(|error| error.message);
            warn!(
                thread_id = %run.thread_id,
                run_id = %run.id,
                %status,
                error = message.as_deref().unwrap_or(""),
                "run did not complete"
            );
            Ok(RunOutcome::Error(RunFailure {
                thread_id: run.thread_id,
                run_id: run.id,
                status,
                message,
                usage: run.usage,
            }))
        }
    }
}

/// Resume a run by submitting one output per pending tool call.
///
/// Returns the resumed run without waiting; observe it again to reach the
/// next terminal state.
pub async fn submit_tool_outputs(
    api: &dyn ThreadsApi,
    handle: &ToolOutputsHandle,
    outputs: Vec<String>,
) -> Result<Run> {
    let tool_outputs = handle.pair(outputs)?;
    api.submit_tool_outputs(&handle.thread_id, &handle.run_id, &tool_outputs)
        .await
}
