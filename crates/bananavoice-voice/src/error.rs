use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("TTS error: {0}")]
    Tts(String),

    #[error("STT error: {0}")]
    Stt(String),
}

impl From<hound::Error> for VoiceError {
    fn from(e: hound::Error) -> Self {
        VoiceError::Tts(format!("WAV encoding failed: {}", e))
    }
}
