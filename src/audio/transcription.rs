//! Speech-to-text via the Whisper endpoint (`/audio/transcriptions`).

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use super::multipart::{build_transcription_multipart, check_upload_filename, mime_for_filename};
use crate::client::http::{bearer_headers, parse_json, shared_client};
use crate::client::OpenAiClient;
use crate::error::{Result, ThreadrunError};
use crate::util::timeout::with_timeout;

pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";
pub const DEFAULT_AUDIO_FILENAME: &str = "speech.mp3";

/// Something that turns audio bytes into text.
#[async_trait]
pub trait AudioTranscriber: Send + Sync {
    /// Transcribe `audio`, uploaded under `filename`.
    async fn transcribe_named(&self, audio: &[u8], filename: &str) -> Result<String>;

    /// Transcribe an MP3 buffer.
    async fn transcribe(&self, audio: &[u8]) -> Result<String> {
        self.transcribe_named(audio, DEFAULT_AUDIO_FILENAME).await
    }
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

#[async_trait]
impl AudioTranscriber for OpenAiClient {
    async fn transcribe_named(&self, audio: &[u8], filename: &str) -> Result<String> {
        if audio.is_empty() {
            return Err(ThreadrunError::InvalidArgument(
                "Audio payload cannot be empty".to_string(),
            ));
        }
        let filename = check_upload_filename(filename)?;
        let mime_type = mime_for_filename(filename).ok_or_else(|| {
            ThreadrunError::InvalidArgument(format!("Unsupported audio file type: {filename}"))
        })?;

        let boundary = format!("threadrun-{}", Uuid::new_v4().simple());
        let body = build_transcription_multipart(
            &boundary,
            DEFAULT_TRANSCRIPTION_MODEL,
            audio,
            filename,
            mime_type,
        );

        let mut headers = bearer_headers(self.config());
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(&format!("multipart/form-data; boundary={boundary}")).map_err(
                |e| ThreadrunError::InvalidArgument(format!("Failed to build multipart content-type: {e}")),
            )?,
        );

        debug!(bytes = audio.len(), filename, "transcribe");

        let url = self.url("audio/transcriptions");
        let parsed: TranscriptionResponse = with_timeout(self.config().timeout(), async {
            let response = shared_client()
                .post(url)
                .headers(headers)
                .body(body)
                .send()
                .await?;
            parse_json(response).await
        })
        .await?;

        Ok(parsed.text)
    }
}
