//! Local voice helpers for the BananaVoice service.
//!
//! Real-time conversations run through hosted speech providers. The helpers
//! here back the simple request/response voice endpoints: TTS renders a
//! placeholder tone as a WAV file, and STT acknowledges uploaded audio.

pub mod error;
pub mod stt;
pub mod tts;

pub use error::VoiceError;
pub use stt::{SttService, Transcription, MAX_STT_INPUT_BYTES};
pub use tts::TtsService;
