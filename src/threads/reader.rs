//! Reading recent assistant replies.

use super::api::ThreadsApi;
use crate::error::Result;
use crate::types::{Role, ThreadMessage};

pub const DEFAULT_MESSAGE_LIMIT: u32 = 4;

/// Recent assistant messages split by whether the caller has tagged them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadMessages {
    /// Messages carrying an external id. Newest first.
    pub sent: Vec<ThreadMessage>,
    /// Messages without one. Newest first.
    pub unsent: Vec<ThreadMessage>,
}

impl ThreadMessages {
    /// Partition assistant messages, keeping the given order in each half.
    pub fn partition(messages: impl IntoIterator<Item = ThreadMessage>) -> Self {
        let (sent, unsent) = messages
            .into_iter()
            .filter(|message| message.role == Role::Assistant)
            .partition(|message| message.external_id().is_some());
        Self { sent, unsent }
    }
}

/// Fetch the `limit` most recent messages and partition the assistant ones.
pub async fn last_thread_messages(
    api: &dyn ThreadsApi,
    thread_id: &str,
    limit: u32,
) -> Result<ThreadMessages> {
    let messages = api.list_messages(thread_id, limit).await?;
    Ok(ThreadMessages::partition(messages))
}
