//! CLI entry point for Threadrun.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Threadrun CLI
#[derive(Parser, Debug)]
#[command(name = "threadrun", version, about = "Run OpenAI Assistants threads from the command line")]
pub struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-shot chat completion
    Ask(AskArgs),
    /// Transcribe an audio file
    Transcribe(TranscribeArgs),
    /// Send a message to an assistant and wait for the run to settle
    Run(RunArgs),
    /// Show recent assistant messages on a thread
    Messages(MessagesArgs),
    /// Cancel a run
    Cancel(CancelArgs),
}

/// Arguments for `threadrun ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Model override
    #[arg(short, long)]
    pub model: Option<String>,

    /// Max output tokens override
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Instruction, sent as a system message
    pub prompt: String,
}

/// Arguments for `threadrun transcribe`.
#[derive(Parser, Debug)]
pub struct TranscribeArgs {
    /// Audio file (mp3, m4a, wav, webm, ogg, flac)
    pub file: PathBuf,
}

/// Arguments for `threadrun run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Assistant id
    #[arg(short, long, env = "OPENAI_ASSISTANT_ID")]
    pub assistant: String,

    /// Existing thread to continue
    #[arg(short, long)]
    pub thread: Option<String>,

    /// Extra instructions for this run
    #[arg(short, long)]
    pub instructions: Option<String>,

    /// External id to tag the message with
    #[arg(long)]
    pub id: Option<String>,

    /// User message
    pub message: String,
}

/// Arguments for `threadrun messages`.
#[derive(Parser, Debug)]
pub struct MessagesArgs {
    pub thread: String,

    #[arg(short, long, default_value_t = crate::threads::DEFAULT_MESSAGE_LIMIT)]
    pub limit: u32,
}

/// Arguments for `threadrun cancel`.
#[derive(Parser, Debug)]
pub struct CancelArgs {
    pub thread: String,
    pub run: String,
}
