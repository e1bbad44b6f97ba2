#![cfg(feature = "audio")]

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use threadrun::audio::AudioTranscriber;
use threadrun::client::OpenAiClient;
use threadrun::config::ClientConfig;
use threadrun::error::ThreadrunError;

fn client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(Arc::new(
        ClientConfig::new("test-key").with_base_url(server.uri()),
    ))
}

#[tokio::test]
async fn transcribe_uploads_speech_mp3_with_whisper() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_string_contains("name=\"model\""))
        .and(body_string_contains("whisper-1"))
        .and(body_string_contains("filename=\"speech.mp3\""))
        .and(body_string_contains("Content-Type: audio/mpeg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "turn on the lights"})))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server).transcribe(b"ID3fakemp3").await.unwrap();

    assert_eq!(text, "turn on the lights");
}

#[tokio::test]
async fn named_upload_uses_extension_mime() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .and(body_string_contains("filename=\"memo.wav\""))
        .and(body_string_contains("Content-Type: audio/wav"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "memo"})))
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .transcribe_named(b"RIFFfakewav", "memo.wav")
        .await
        .unwrap();

    assert_eq!(text, "memo");
}

#[tokio::test]
async fn empty_audio_is_rejected_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server).transcribe(b"").await.unwrap_err();

    assert!(matches!(err, ThreadrunError::InvalidArgument(_)));
}

#[tokio::test]
async fn unsupported_extension_is_rejected() {
    let client = OpenAiClient::new(Arc::new(ClientConfig::new("test-key")));

    let err = client
        .transcribe_named(b"data", "notes.txt")
        .await
        .unwrap_err();

    assert!(matches!(err, ThreadrunError::InvalidArgument(msg) if msg.contains("notes.txt")));
}

#[tokio::test]
async fn filename_with_quote_and_crlf_is_rejected_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client(&server)
        .transcribe_named(b"ID3", "my \"take\"\r\nX-Evil: 1.mp3")
        .await
        .unwrap_err();

    assert!(matches!(err, ThreadrunError::InvalidArgument(_)));
}

#[tokio::test]
async fn server_error_propagates() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server).transcribe(b"ID3").await.unwrap_err();

    assert!(matches!(err, ThreadrunError::Api { status: 500, .. }));
}
