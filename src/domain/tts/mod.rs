pub mod collector;
pub mod error;
pub mod model;
pub mod service;
pub mod transient_file;

pub use collector::{ConfigCollector, DEFAULT_TEXT};
pub use error::{CollectError, SynthesisError};
pub use model::{
    mime_type_for, Credential, OutputFormat, Speed, SpeechModel, SynthesisConfig,
    SynthesisResult, Voice,
};
pub use service::{TtsService, TtsServiceApi};
pub use transient_file::TransientFile;

use serde::{Deserialize, Serialize};

/// Request for POST /api/tts/synthesize
///
/// Every field is optional; absent fields take the form's pre-filled value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SynthesisForm {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response for GET /api/tts/options
#[derive(Debug, Serialize, Deserialize)]
pub struct FormOptions {
    pub models: Vec<SpeechModel>,
    pub voices: Vec<Voice>,
    pub formats: Vec<FormatOption>,
    pub speed: SpeedRange,
    pub default_text: String,
    pub default_credential_configured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FormatOption {
    pub value: OutputFormat,
    pub label: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpeedRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
}
