//! Per-minute unit prices for the billed resources of a voice session.
//!
//! A [`PricingTable`] is built once from configuration and then shared
//! read-only between every tracker and projection that needs it. Totals are
//! always derived from the four configured rates.

use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minutes per hour, used for the hourly total.
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Default transport (audio-only WebRTC room) rate per minute.
pub const DEFAULT_TRANSPORT_RATE: f64 = 0.00099;
/// Default speech-to-text rate per minute.
pub const DEFAULT_STT_RATE: f64 = 0.003;
/// Default language-model rate per minute.
pub const DEFAULT_LLM_RATE: f64 = 0.0005;
/// Default speech-synthesis rate per minute.
pub const DEFAULT_TTS_RATE: f64 = 0.012;
/// Historical speech-to-text rate that savings figures are compared against.
pub const DEFAULT_BASELINE_STT_RATE: f64 = 0.006;

/// A resource billed per minute of voice session time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BilledResource {
    /// Audio transport through the WebRTC room provider.
    Transport,
    /// Transcription of participant speech.
    SpeechToText,
    /// Language-model response generation.
    LanguageModel,
    /// Synthesis of the bot's spoken replies.
    SpeechSynthesis,
}

impl BilledResource {
    /// All billed resources, in display order.
    pub const ALL: [BilledResource; 4] = [
        Self::Transport,
        Self::SpeechToText,
        Self::LanguageModel,
        Self::SpeechSynthesis,
    ];

    /// Returns the display label for this resource.
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "Transport (audio)",
            Self::SpeechToText => "Speech-to-text",
            Self::LanguageModel => "Language model",
            Self::SpeechSynthesis => "Speech synthesis",
        }
    }
}

/// Checks that a rate is usable as a unit price.
///
/// # Errors
///
/// Returns [`CostError::InvalidArgument`] naming `name` if `rate` is negative
/// or not finite.
pub fn validate_rate(name: &str, rate: f64) -> Result<(), CostError> {
    if !rate.is_finite() {
        return Err(CostError::InvalidArgument(format!(
            "{} rate must be finite, got {}",
            name, rate
        )));
    }
    if rate < 0.0 {
        return Err(CostError::InvalidArgument(format!(
            "{} rate must be non-negative, got {}",
            name, rate
        )));
    }
    Ok(())
}

/// Immutable per-minute rates for the four billed resources.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingTable {
    transport: f64,
    speech_to_text: f64,
    language_model: f64,
    speech_synthesis: f64,
}

impl Default for PricingTable {
    fn default() -> Self {
        Self {
            transport: DEFAULT_TRANSPORT_RATE,
            speech_to_text: DEFAULT_STT_RATE,
            language_model: DEFAULT_LLM_RATE,
            speech_synthesis: DEFAULT_TTS_RATE,
        }
    }
}

impl PricingTable {
    /// Creates a pricing table from four per-minute rates.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidArgument`] if any rate is negative, NaN or
    /// infinite.
    pub fn new(
        transport: f64,
        speech_to_text: f64,
        language_model: f64,
        speech_synthesis: f64,
    ) -> Result<Self, CostError> {
        validate_rate("transport", transport)?;
        validate_rate("speech-to-text", speech_to_text)?;
        validate_rate("language-model", language_model)?;
        validate_rate("speech-synthesis", speech_synthesis)?;

        Ok(Self {
            transport,
            speech_to_text,
            language_model,
            speech_synthesis,
        })
    }

    /// Returns a copy of this table with the speech-to-text rate replaced.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::InvalidArgument`] if `rate` is not a valid rate.
    pub fn with_stt_rate(&self, rate: f64) -> Result<Self, CostError> {
        validate_rate("speech-to-text", rate)?;
        Ok(Self {
            speech_to_text: rate,
            ..*self
        })
    }

    /// Returns the per-minute rate for a single resource.
    pub fn rate(&self, resource: BilledResource) -> f64 {
        match resource {
            BilledResource::Transport => self.transport,
            BilledResource::SpeechToText => self.speech_to_text,
            BilledResource::LanguageModel => self.language_model,
            BilledResource::SpeechSynthesis => self.speech_synthesis,
        }
    }

    pub fn transport(&self) -> f64 {
        self.transport
    }

    pub fn speech_to_text(&self) -> f64 {
        self.speech_to_text
    }

    pub fn language_model(&self) -> f64 {
        self.language_model
    }

    pub fn speech_synthesis(&self) -> f64 {
        self.speech_synthesis
    }

    /// Sum of the four per-minute rates.
    pub fn total_per_minute(&self) -> f64 {
        self.transport + self.speech_to_text + self.language_model + self.speech_synthesis
    }

    /// Cost of one hour of session time.
    pub fn total_per_hour(&self) -> f64 {
        self.total_per_minute() * MINUTES_PER_HOUR
    }

    /// Renders a multi-line summary of every rate and both totals.
    pub fn describe(&self) -> String {
        let rule = "=".repeat(41);
        let mut out = String::new();
        out.push_str("BananaVoice cost breakdown\n");
        out.push_str(&rule);
        out.push('\n');
        for resource in BilledResource::ALL {
            out.push_str(&format!(
                "{:<22}${:.5}/min\n",
                format!("{}:", resource.label()),
                self.rate(resource)
            ));
        }
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!("{:<22}${:.5}/min\n", "TOTAL:", self.total_per_minute()));
        out.push_str(&format!("{:<22}${:.3}/hour\n", "TOTAL:", self.total_per_hour()));
        out
    }
}

impl fmt::Display for PricingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
