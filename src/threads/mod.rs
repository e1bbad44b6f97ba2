//! Threads, runs, and the run-completion protocol.
//!
//! The flow for one turn is: [`run_query`] (which appends messages and starts
//! or joins a run), then [`observe_run`] until the run settles. A
//! [`RunOutcome::Function`] carries a [`ToolOutputsHandle`]; hand the outputs
//! to [`submit_tool_outputs`] and observe again.

pub mod api;
pub mod launcher;
pub mod observer;
pub mod reader;
pub mod submitter;

use std::sync::Arc;

pub use api::ThreadsApi;
pub use launcher::{run_query, RunQuery};
pub use observer::{
    observe_run, settle, submit_tool_outputs, FunctionCall, FunctionCalls, RunFailure,
    RunOutcome, TextAnswer, ToolOutputsHandle,
};
pub use reader::{last_thread_messages, ThreadMessages, DEFAULT_MESSAGE_LIMIT};
pub use submitter::{create_message, submit_messages, SubmitOutcome};

use crate::error::Result;
use crate::types::{NewMessage, Run, RunRef, ThreadMessage};
use crate::util::poll::PollSchedule;

/// Thread and run operations bound to one [`ThreadsApi`].
#[derive(Clone)]
pub struct Assistants {
    api: Arc<dyn ThreadsApi>,
    schedule: PollSchedule,
}

impl std::fmt::Debug for Assistants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistants")
            .field("schedule", &self.schedule)
            .finish_non_exhaustive()
    }
}

impl Assistants {
    pub fn new(api: Arc<dyn ThreadsApi>) -> Self {
        Self {
            api,
            schedule: PollSchedule::default(),
        }
    }

    pub fn with_poll_schedule(mut self, schedule: PollSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn poll_schedule(&self) -> &PollSchedule {
        &self.schedule
    }

    pub async fn run_query(&self, messages: &[NewMessage], query: &RunQuery) -> Result<Run> {
        run_query(self.api.as_ref(), messages, query).await
    }

    pub async fn create_message(
        &self,
        thread_id: &str,
        message: &NewMessage,
    ) -> Result<ThreadMessage> {
        create_message(self.api.as_ref(), thread_id, message).await
    }

    pub async fn last_thread_messages(&self, thread_id: &str, limit: u32) -> Result<ThreadMessages> {
        last_thread_messages(self.api.as_ref(), thread_id, limit).await
    }

    pub async fn cancel_run(&self, run: &RunRef) -> Result<Run> {
        self.api.cancel_run(&run.thread_id, &run.id).await
    }

    pub async fn observe_run(&self, run: &RunRef) -> Result<RunOutcome> {
        observe_run(self.api.as_ref(), run, &self.schedule).await
    }

    pub async fn submit_tool_outputs(
        &self,
        handle: &ToolOutputsHandle,
        outputs: Vec<String>,
    ) -> Result<Run> {
        submit_tool_outputs(self.api.as_ref(), handle, outputs).await
    }
}
