//! Stateless chat completion.

pub mod completion;

pub use completion::{ChatMessage, CompletionOptions, Prompt, DEFAULT_COMPLETION_MODEL};
