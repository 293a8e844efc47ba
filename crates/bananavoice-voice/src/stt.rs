use crate::error::VoiceError;
use serde::Serialize;

/// Maximum audio input size for STT (10 MiB). Prevents OOM from oversized payloads.
pub const MAX_STT_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Payloads at or below this size are treated as too short to contain speech.
const MIN_SPEECH_BYTES: usize = 1000;

/// Confidence reported for placeholder transcriptions.
const PLACEHOLDER_CONFIDENCE: f32 = 0.95;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcription {
    pub text: String,
    pub confidence: f32,
}

/// Acknowledges uploaded audio until a hosted STT provider is wired in.
#[derive(Debug, Clone, Default)]
pub struct SttService;

impl SttService {
    pub fn new() -> Self {
        Self
    }

    pub fn transcribe(&self, audio_data: &[u8]) -> Result<Transcription, VoiceError> {
        if audio_data.len() > MAX_STT_INPUT_BYTES {
            return Err(VoiceError::Stt(format!(
                "audio data exceeds maximum size: {} bytes (limit: {} bytes)",
                audio_data.len(),
                MAX_STT_INPUT_BYTES
            )));
        }

        let text = if audio_data.len() > MIN_SPEECH_BYTES {
            format!(
                "Processed audio of {} bytes - Hello from BananaVoice!",
                audio_data.len()
            )
        } else {
            "Audio too short to process".to_string()
        };

        Ok(Transcription {
            text,
            confidence: PLACEHOLDER_CONFIDENCE,
        })
    }
}
