//! Threadrun — orchestration over the OpenAI Assistants API.
//!
//! Appends messages to hosted threads, launches runs, observes them until they
//! settle, and relays tool-call requests back to the caller. Also provides a
//! one-shot chat completion helper and an audio transcription helper.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use threadrun::prelude::*;
//!
//! # async fn example() -> threadrun::error::Result<()> {
//! let config = Arc::new(ClientConfig::from_env()?);
//! let assistants = Assistants::new(Arc::new(OpenAiClient::new(config)));
//!
//! let query = RunQuery::new("asst_123");
//! let run = assistants
//!     .run_query(&[NewMessage::user("Hello!").with_id("msg-1")], &query)
//!     .await?;
//!
//! match assistants.observe_run(&RunRef::from(&run)).await? {
//!     RunOutcome::Text(answer) => println!("{}", answer.content),
//!     RunOutcome::Function(calls) => println!("{} tool calls", calls.calls.len()),
//!     RunOutcome::Error(failure) => eprintln!("run ended: {:?}", failure.message),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod generation;
pub mod prelude;
pub mod threads;
pub mod types;
pub mod util;

#[cfg(feature = "audio")]
pub mod audio;

#[cfg(feature = "cli")]
pub mod cli;
