use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_SPEED: f32 = 0.25;
pub const MAX_SPEED: f32 = 4.0;
pub const SPEED_STEP: f32 = 0.05;
const SPEED_STEPS_PER_UNIT: f32 = 20.0;
pub const DEFAULT_SPEED: f32 = 1.0;

/// MIME type used when a format id is not in the table
pub const FALLBACK_MIME_TYPE: &str = "audio/mpeg";

/// Secret token authenticating calls to the speech API
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Only a cleared field counts as missing; anything else goes to the API as typed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

/// Quality tier of the hosted speech model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeechModel {
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
}

impl SpeechModel {
    pub const ALL: [SpeechModel; 2] = [SpeechModel::Tts1, SpeechModel::Tts1Hd];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechModel::Tts1 => "tts-1",
            SpeechModel::Tts1Hd => "tts-1-hd",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Alloy,
    Echo,
    Fable,
    Onyx,
    Nova,
    Shimmer,
}

impl Voice {
    pub const ALL: [Voice; 6] = [
        Voice::Alloy,
        Voice::Echo,
        Voice::Fable,
        Voice::Onyx,
        Voice::Nova,
        Voice::Shimmer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Alloy => "alloy",
            Voice::Echo => "echo",
            Voice::Fable => "fable",
            Voice::Onyx => "onyx",
            Voice::Nova => "nova",
            Voice::Shimmer => "shimmer",
        }
    }
}

/// Encoding of the returned audio
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Mp3,
    Opus,
    Aac,
    Flac,
    Wav,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Mp3,
        OutputFormat::Opus,
        OutputFormat::Aac,
        OutputFormat::Flac,
        OutputFormat::Wav,
    ];

    /// Wire value sent as `response_format`, also used as the file extension
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "mp3",
            OutputFormat::Opus => "opus",
            OutputFormat::Aac => "aac",
            OutputFormat::Flac => "flac",
            OutputFormat::Wav => "wav",
        }
    }

    /// Human-readable label shown in the format selector
    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Mp3 => "MP3 (widely compatible)",
            OutputFormat::Opus => "Opus (low latency, web optimized)",
            OutputFormat::Aac => "AAC (best for Apple devices)",
            OutputFormat::Flac => "FLAC (lossless compression)",
            OutputFormat::Wav => "WAV (uncompressed, high quality)",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    pub fn mime_type(&self) -> &'static str {
        mime_type_for(self.as_str())
    }
}

/// Map a format id to its MIME type, falling back to `audio/mpeg`
pub fn mime_type_for(format: &str) -> &'static str {
    match format {
        "mp3" => "audio/mpeg",
        "opus" => "audio/opus",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "wav" => "audio/wav",
        _ => FALLBACK_MIME_TYPE,
    }
}

macro_rules! impl_wire_enum {
    ($ty:ty, $kind:literal) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim().to_lowercase();
                Self::ALL
                    .into_iter()
                    .find(|v| v.as_str() == wanted)
                    .ok_or_else(|| UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }
    };
}

impl_wire_enum!(SpeechModel, "model");
impl_wire_enum!(Voice, "voice");
impl_wire_enum!(OutputFormat, "output format");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct UnknownOption {
    pub kind: &'static str,
    pub value: String,
}

/// Playback speed multiplier, always within [0.25, 4.0] on the 0.05 grid
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct Speed(f32);

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("speed {0} is outside the supported range 0.25-4.0")]
pub struct SpeedOutOfRange(pub f32);

impl Speed {
    pub fn new(value: f32) -> Result<Self, SpeedOutOfRange> {
        if !value.is_finite() || !(MIN_SPEED..=MAX_SPEED).contains(&value) {
            return Err(SpeedOutOfRange(value));
        }

        // Whole steps divided back out keep grid values exact (0.9 stays 0.9)
        let steps = (value * SPEED_STEPS_PER_UNIT).round();
        Ok(Self(steps / SPEED_STEPS_PER_UNIT))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(DEFAULT_SPEED)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Everything needed for one synthesis request
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub credential: Credential,
    pub model: SpeechModel,
    pub voice: Voice,
    pub speed: Speed,
    pub output_format: OutputFormat,
    pub text: String,
}

/// Audio produced by a successful synthesis
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisResult {
    audio_bytes: Vec<u8>,
    mime_type: &'static str,
    timestamp: String,
    output_format: OutputFormat,
    speed: Speed,
}

impl SynthesisResult {
    pub fn new(
        audio_bytes: Vec<u8>,
        output_format: OutputFormat,
        speed: Speed,
        timestamp: String,
    ) -> Self {
        Self {
            audio_bytes,
            mime_type: output_format.mime_type(),
            timestamp,
            output_format,
            speed,
        }
    }

    pub fn audio_bytes(&self) -> &[u8] {
        &self.audio_bytes
    }

    pub fn into_audio_bytes(self) -> Vec<u8> {
        self.audio_bytes
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output_format
    }

    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Download name, e.g. `tts_output_20240611_153000.mp3`
    pub fn suggested_filename(&self) -> String {
        format!(
            "tts_output_{}.{}",
            self.timestamp,
            self.output_format.extension()
        )
    }

    /// Info line shown next to the player
    pub fn summary(&self) -> String {
        format!(
            "Generated with speed: {}x, Format: {}",
            self.speed,
            self.output_format.as_str().to_uppercase()
        )
    }
}
