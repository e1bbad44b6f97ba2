//! Appending caller messages to a thread.

use tracing::debug;

use super::api::ThreadsApi;
use crate::error::{Result, ThreadrunError};
use crate::types::{NewMessage, ThreadMessage};

/// Result of submitting a batch of messages.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Every message was accepted, in order.
    Submitted(Vec<ThreadMessage>),
    /// The service rejected a message as a bad request, which it does while a
    /// run is active on the thread.
    Conflict(ThreadrunError),
    /// Any other failure.
    Fault(ThreadrunError),
}

/// Append one message to a thread.
pub async fn create_message(
    api: &dyn ThreadsApi,
    thread_id: &str,
    message: &NewMessage,
) -> Result<ThreadMessage> {
    api.create_message(thread_id, message).await
}

/// Append messages one at a time, each waiting for the previous to be
/// acknowledged. Stops at the first failure.
pub async fn submit_messages(
    api: &dyn ThreadsApi,
    thread_id: &str,
    messages: &[NewMessage],
) -> SubmitOutcome {
    let mut created = Vec::with_capacity(messages.len());
    for (index, message) in messages.iter().enumerate() {
        match api.create_message(thread_id, message).await {
            Ok(stored) => created.push(stored),
            Err(e) if e.is_bad_request() => {
                debug!(thread_id, index, error = %e, "message rejected as bad request");
                return SubmitOutcome::Conflict(e);
            }
            Err(e) => return SubmitOutcome::Fault(e),
        }
    }
    SubmitOutcome::Submitted(created)
}
