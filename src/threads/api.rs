//! The thread/run endpoints this crate drives.

use async_trait::async_trait;
use tracing::debug;

use crate::client::OpenAiClient;
use crate::error::Result;
use crate::types::{
    CreateRun, CreateThreadAndRun, ListPage, MessageBody, NewMessage, Run, ThreadMessage,
    ToolOutput,
};

/// Remote thread, message, and run operations.
///
/// [`OpenAiClient`] talks to the real service; tests substitute scripted
/// implementations.
#[async_trait]
pub trait ThreadsApi: Send + Sync {
    /// Append one message to a thread.
    async fn create_message(&self, thread_id: &str, message: &NewMessage)
        -> Result<ThreadMessage>;

    /// Most recent messages, newest first.
    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>>;

    /// Create a thread seeded with messages and start a run on it.
    async fn create_thread_and_run(&self, request: &CreateThreadAndRun) -> Result<Run>;

    async fn create_run(&self, thread_id: &str, request: &CreateRun) -> Result<Run>;

    /// Most recent runs, newest first.
    async fn list_runs(&self, thread_id: &str, limit: u32) -> Result<Vec<Run>>;

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run>;
}

#[async_trait]
impl ThreadsApi for OpenAiClient {
    async fn create_message(
        &self,
        thread_id: &str,
        message: &NewMessage,
    ) -> Result<ThreadMessage> {
        debug!(thread_id, role = %message.role, "create message");
        self.post_beta(
            &format!("threads/{thread_id}/messages"),
            &MessageBody::from(message),
        )
        .await
    }

    async fn list_messages(&self, thread_id: &str, limit: u32) -> Result<Vec<ThreadMessage>> {
        debug!(thread_id, limit, "list messages");
        let page: ListPage<ThreadMessage> = self
            .get_beta(
                &format!("threads/{thread_id}/messages"),
                &[("limit", limit.to_string()), ("order", "desc".to_string())],
            )
            .await?;
        Ok(page.data)
    }

    async fn create_thread_and_run(&self, request: &CreateThreadAndRun) -> Result<Run> {
        debug!(
            assistant_id = %request.assistant_id,
            messages = request.thread.messages.len(),
            "create thread and run"
        );
        self.post_beta("threads/runs", request).await
    }

    async fn create_run(&self, thread_id: &str, request: &CreateRun) -> Result<Run> {
        debug!(thread_id, assistant_id = %request.assistant_id, "create run");
        self.post_beta(&format!("threads/{thread_id}/runs"), request)
            .await
    }

    async fn list_runs(&self, thread_id: &str, limit: u32) -> Result<Vec<Run>> {
        debug!(thread_id, limit, "list runs");
        let page: ListPage<Run> = self
            .get_beta(
                &format!("threads/{thread_id}/runs"),
                &[("limit", limit.to_string()), ("order", "desc".to_string())],
            )
            .await?;
        Ok(page.data)
    }

    async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.get_beta(&format!("threads/{thread_id}/runs/{run_id}"), &[])
            .await
    }

    async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        debug!(thread_id, run_id, "cancel run");
        self.post_beta(
            &format!("threads/{thread_id}/runs/{run_id}/cancel"),
            &serde_json::json!({}),
        )
        .await
    }

    async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        outputs: &[ToolOutput],
    ) -> Result<Run> {
        debug!(thread_id, run_id, outputs = outputs.len(), "submit tool outputs");
        self.post_beta(
            &format!("threads/{thread_id}/runs/{run_id}/submit_tool_outputs"),
            &serde_json::json!({ "tool_outputs": outputs }),
        )
        .await
    }
}
