//! Audio transcription.

mod multipart;
pub mod transcription;

pub use transcription::{AudioTranscriber, DEFAULT_AUDIO_FILENAME, DEFAULT_TRANSCRIPTION_MODEL};
