//! Multipart body construction for the transcription upload.

use crate::error::{Result, ThreadrunError};

/// Check that `filename` can be written into a `Content-Disposition` header.
pub(super) fn check_upload_filename(filename: &str) -> Result<&str> {
    if filename.is_empty() || filename.chars().any(|c| c == '"' || c == '\\' || c.is_control()) {
        return Err(ThreadrunError::InvalidArgument(format!(
            "Audio filename cannot be used in an upload: {filename:?}"
        )));
    }
    Ok(filename)
}

pub(super) fn build_transcription_multipart(
    boundary: &str,
    model: &str,
    audio: &[u8],
    filename: &str,
    mime_type: &str,
) -> Vec<u8> {
    let mut body = Vec::with_capacity(audio.len() + 512);

    append_field(&mut body, boundary, "model", model);

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {mime_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(audio);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

fn append_field(body: &mut Vec<u8>, boundary: &str, name: &str, value: &str) {
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(value.as_bytes());
    body.extend_from_slice(b"\r\n");
}

/// MIME type for an upload, from its file extension.
pub(super) fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let (_, extension) = filename.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "mp3" | "mpga" | "mpeg" => Some("audio/mpeg"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "wav" => Some("audio/wav"),
        "webm" => Some("audio/webm"),
        "ogg" | "oga" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        _ => None,
    }
}
