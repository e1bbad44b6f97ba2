//! Starting runs, or joining one that is already in flight.

use tracing::{debug, info};

use super::api::ThreadsApi;
use super::submitter::{submit_messages, SubmitOutcome};
use crate::error::Result;
use crate::types::{CreateRun, CreateThreadAndRun, MessageBody, NewMessage, Run, ThreadSeed};

/// Where and how to launch a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunQuery {
    /// Existing thread to continue; `None` creates a new one.
    pub thread_id: Option<String>,
    pub assistant_id: String,
    pub additional_instructions: Option<String>,
}

impl RunQuery {
    pub fn new(assistant_id: impl Into<String>) -> Self {
        Self {
            thread_id: None,
            assistant_id: assistant_id.into(),
            additional_instructions: None,
        }
    }

    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.additional_instructions = Some(instructions.into());
        self
    }
}

/// Launch a run for `messages`.
///
/// Without a thread id, the thread and run are created in one call. With one,
/// the messages are appended first. If the service refuses them because a run
/// is active, and the latest run is `in_progress` or `requires_action`, that
/// run is returned instead of starting a new one. Every other failure is
/// returned unchanged.
pub async fn run_query(
    api: &dyn ThreadsApi,
    messages: &[NewMessage],
    query: &RunQuery,
) -> Result<Run> {
    let Some(thread_id) = query.thread_id.as_deref() else {
        let request = CreateThreadAndRun {
            assistant_id: query.assistant_id.clone(),
            additional_instructions: query.additional_instructions.clone(),
            thread: ThreadSeed {
                messages: messages.iter().map(MessageBody::from).collect(),
            },
        };
        return api.create_thread_and_run(&request).await;
    };

    match submit_messages(api, thread_id, messages).await {
        SubmitOutcome::Submitted(created) => {
            debug!(thread_id, messages = created.len(), "messages submitted");
        }
        SubmitOutcome::Conflict(err) => {
            let latest = api.list_runs(thread_id, 1).await?.into_iter().next();
            return match latest {
                Some(run) if run.status.is_joinable() => {
                    info!(thread_id, run_id = %run.id, status = %run.status, "joining active run");
                    Ok(run)
                }
                _ => Err(err),
            };
        }
        SubmitOutcome::Fault(err) => return Err(err),
    }

    let request = CreateRun {
        assistant_id: query.assistant_id.clone(),
        additional_instructions: query.additional_instructions.clone(),
    };
    api.create_run(thread_id, &request).await
}
