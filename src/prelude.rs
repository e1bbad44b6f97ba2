//! Convenience re-exports for common use.

pub use crate::client::OpenAiClient;
pub use crate::config::ClientConfig;
pub use crate::error::{Result, ThreadrunError};
pub use crate::generation::{ChatMessage, CompletionOptions, Prompt};
pub use crate::threads::{
    Assistants, FunctionCalls, RunOutcome, RunQuery, ThreadMessages, ThreadsApi,
    ToolOutputsHandle,
};
pub use crate::types::{NewMessage, Role, Run, RunRef, RunStatus, ThreadMessage, Usage};
pub use crate::util::poll::PollSchedule;

#[cfg(feature = "audio")]
pub use crate::audio::AudioTranscriber;
