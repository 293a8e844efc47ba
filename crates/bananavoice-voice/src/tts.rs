use crate::error::VoiceError;
use std::f64::consts::TAU;
use std::io::Cursor;

/// Maximum text input size for TTS (4 KiB). Output length grows with the
/// text, so this also bounds the size of the rendered WAV.
const MAX_TTS_INPUT_BYTES: usize = 4 * 1024;

/// Shortest clip rendered, in seconds.
const MIN_DURATION_SECS: f64 = 1.0;

/// Seconds of audio rendered per character of input.
const SECS_PER_CHAR: f64 = 0.1;

/// Renders text to a placeholder tone until a hosted TTS provider is wired in.
#[derive(Debug, Clone)]
pub struct TtsService {
    sample_rate: u32,
    frequency_hz: f64,
    amplitude: f64,
}

impl Default for TtsService {
    fn default() -> Self {
        Self {
            sample_rate: 16_000,
            frequency_hz: 440.0,
            amplitude: 0.3,
        }
    }
}

impl TtsService {
    /// Duration of the clip rendered for `text`, in seconds.
    pub fn duration_for(text: &str) -> f64 {
        (text.chars().count() as f64 * SECS_PER_CHAR).max(MIN_DURATION_SECS)
    }

    /// Synthesizes `text` into a mono 16-bit PCM WAV file.
    pub fn synthesize(&self, text: &str) -> Result<Vec<u8>, VoiceError> {
        if text.len() > MAX_TTS_INPUT_BYTES {
            return Err(VoiceError::Tts(format!(
                "text exceeds maximum size: {} bytes (limit: {} bytes)",
                text.len(),
                MAX_TTS_INPUT_BYTES
            )));
        }
        if self.sample_rate == 0 {
            return Err(VoiceError::Tts("sample rate must be non-zero".to_string()));
        }

        let duration = Self::duration_for(text);
        let samples = (f64::from(self.sample_rate) * duration) as usize;
        let rate = f64::from(self.sample_rate);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut wav_cursor = Cursor::new(Vec::with_capacity(44 + samples * 2));
        {
            let mut writer = hound::WavWriter::new(&mut wav_cursor, spec)?;
            for n in 0..samples {
                let t = n as f64 / rate;
                let value = (TAU * self.frequency_hz * t).sin() * self.amplitude;
                writer.write_sample((value * f64::from(i16::MAX)) as i16)?;
            }
            writer.finalize()?;
        }

        tracing::debug!(chars = text.chars().count(), samples, "rendered tts clip");
        Ok(wav_cursor.into_inner())
    }
}
