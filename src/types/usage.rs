//! Token usage types.

use serde::{Deserialize, Serialize};

/// Token usage reported for a run or completion.
///
/// Accepts the service's `prompt_tokens`/`completion_tokens` names on input.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Usage {
    #[serde(default, alias = "prompt_tokens")]
    pub input_tokens: u32,
    #[serde(default, alias = "completion_tokens")]
    pub output_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
