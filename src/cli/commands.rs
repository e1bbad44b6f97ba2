//! CLI command handlers.

use std::sync::Arc;

use crate::audio::AudioTranscriber;
use crate::client::OpenAiClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::generation::CompletionOptions;
use crate::threads::{Assistants, RunOutcome, RunQuery};
use crate::types::{NewMessage, RunRef};

use super::{AskArgs, CancelArgs, MessagesArgs, RunArgs, TranscribeArgs};

/// Build a client from the environment.
pub fn client_from_env() -> Result<Arc<OpenAiClient>> {
    let config = Arc::new(ClientConfig::from_env()?);
    Ok(Arc::new(OpenAiClient::new(config)))
}

/// Handle `threadrun ask`.
pub async fn handle_ask(client: &OpenAiClient, args: AskArgs) -> Result<()> {
    let mut options = CompletionOptions::new();
    if let Some(model) = args.model {
        options = options.model(model);
    }
    if let Some(max) = args.max_tokens {
        options = options.max_tokens(max);
    }

    let answer = client.get_answer(args.prompt, &options).await?;
    println!("{answer}");
    Ok(())
}

/// Handle `threadrun transcribe`.
pub async fn handle_transcribe(client: &OpenAiClient, args: TranscribeArgs) -> Result<()> {
    let audio = tokio::fs::read(&args.file).await?;
    let filename = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(crate::audio::DEFAULT_AUDIO_FILENAME);

    let text = client.transcribe_named(&audio, filename).await?;
    println!("{text}");
    Ok(())
}

/// Handle `threadrun run`.
///
/// Tool calls are printed rather than executed; the run is left waiting.
pub async fn handle_run(assistants: &Assistants, args: RunArgs) -> Result<()> {
    let mut query = RunQuery::new(args.assistant);
    if let Some(thread) = args.thread {
        query = query.with_thread(thread);
    }
    if let Some(instructions) = args.instructions {
        query = query.with_instructions(instructions);
    }

    let mut message = NewMessage::user(args.message);
    if let Some(id) = args.id {
        message = message.with_id(id);
    }

    let run = assistants.run_query(&[message], &query).await?;
    eprintln!("thread {} run {}", run.thread_id, run.id);

    match assistants.observe_run(&RunRef::from(&run)).await? {
        RunOutcome::Text(answer) => println!("{}", answer.content),
        RunOutcome::Function(calls) => {
            for (call, id) in calls.calls.iter().zip(&calls.handle.tool_call_ids) {
                println!("{} {} {}", id, call.name, call.arguments);
            }
            eprintln!(
                "run {} is waiting on {} tool output(s)",
                calls.handle.run_id,
                calls.calls.len()
            );
        }
        RunOutcome::Error(failure) => {
            eprintln!(
                "run {} ended {}: {}",
                failure.run_id,
                failure.status,
                failure.message.as_deref().unwrap_or("no error message")
            );
        }
    }
    Ok(())
}

/// Handle `threadrun messages`.
pub async fn handle_messages(assistants: &Assistants, args: MessagesArgs) -> Result<()> {
    let messages = assistants
        .last_thread_messages(&args.thread, args.limit)
        .await?;

    for (label, group) in [("sent", &messages.sent), ("unsent", &messages.unsent)] {
        println!("{label}:");
        for message in group {
            let text = message
                .first_text()
                .map(|text| text.value.as_str())
                .unwrap_or("");
            println!("  {} {}", message.id, text);
        }
    }
    Ok(())
}

/// Handle `threadrun cancel`.
pub async fn handle_cancel(assistants: &Assistants, args: CancelArgs) -> Result<()> {
    let run = assistants
        .cancel_run(&RunRef::new(args.thread, args.run))
        .await?;
    println!("run {} is {}", run.id, run.status);
    Ok(())
}
