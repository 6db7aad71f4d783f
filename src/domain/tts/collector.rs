use super::error::CollectError;
use super::model::{
    Credential, OutputFormat, Speed, SpeechModel, SynthesisConfig, Voice, DEFAULT_SPEED,
    MAX_SPEED, MIN_SPEED, SPEED_STEP,
};
use super::{FormatOption, FormOptions, SpeedRange, SynthesisForm};

/// Text pre-filled in the input area
pub const DEFAULT_TEXT: &str = "The quick brown fox jumped over the lazy dog.";

/// Turns submitted form fields into a `SynthesisConfig`.
///
/// Empty credential or text are collected as-is; the pipeline rejects them at
/// submission time so the user can see and fix the form.
#[derive(Debug, Clone, Default)]
pub struct ConfigCollector {
    default_credential: Option<Credential>,
}

impl ConfigCollector {
    pub fn new(default_credential: Option<String>) -> Self {
        let default_credential = default_credential
            .map(Credential::new)
            .filter(|c| !c.is_empty());

        Self { default_credential }
    }

    pub fn has_default_credential(&self) -> bool {
        self.default_credential.is_some()
    }

    pub fn collect(&self, form: SynthesisForm) -> Result<SynthesisConfig, CollectError> {
        // An absent field means "keep the pre-filled default"; an explicit empty
        // string means the user cleared it.
        let credential = match form.api_key {
            Some(key) => Credential::new(key),
            None => self.default_credential.clone().unwrap_or_default(),
        };

        let model = match form.model.as_deref() {
            Some(raw) => raw.parse::<SpeechModel>()?,
            None => SpeechModel::default(),
        };

        let voice = match form.voice.as_deref() {
            Some(raw) => raw.parse::<Voice>()?,
            None => Voice::default(),
        };

        let output_format = match form.output_format.as_deref() {
            Some(raw) => raw.parse::<OutputFormat>()?,
            None => OutputFormat::default(),
        };

        let speed = match form.speed {
            Some(value) => Speed::new(value)?,
            None => Speed::default(),
        };

        let text = form.text.unwrap_or_else(|| DEFAULT_TEXT.to_string());

        tracing::debug!(
            model = %model,
            voice = %voice,
            speed = %speed,
            output_format = %output_format,
            text_length = text.len(),
            has_credential = !credential.is_empty(),
            "Synthesis form collected"
        );

        Ok(SynthesisConfig {
            credential,
            model,
            voice,
            speed,
            output_format,
            text,
        })
    }

    /// Describe the selectable values for rendering the form
    pub fn form_options(&self) -> FormOptions {
        FormOptions {
            models: SpeechModel::ALL.to_vec(),
            voices: Voice::ALL.to_vec(),
            formats: OutputFormat::ALL
                .into_iter()
                .map(|format| FormatOption {
                    value: format,
                    label: format.label().to_string(),
                })
                .collect(),
            speed: SpeedRange {
                min: MIN_SPEED,
                max: MAX_SPEED,
                step: SPEED_STEP,
                default: DEFAULT_SPEED,
            },
            default_text: DEFAULT_TEXT.to_string(),
            default_credential_configured: self.has_default_credential(),
        }
    }
}
