use super::error::SynthesisError;
use super::model::{SynthesisConfig, SynthesisResult};
use super::transient_file::TransientFile;
use crate::infrastructure::repositories::{SpeechRequest, TtsRepository};
use async_trait::async_trait;
use chrono::Local;
use futures::StreamExt;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;

/// `YYYYMMDD_HHMMSS`, sortable and safe in file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Steps of one synthesis invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStage {
    Validating,
    Requesting,
    Streaming,
    Materializing,
}

impl fmt::Display for SynthesisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SynthesisStage::Validating => "validating",
            SynthesisStage::Requesting => "requesting",
            SynthesisStage::Streaming => "streaming",
            SynthesisStage::Materializing => "materializing",
        };
        write!(f, "{}", name)
    }
}

pub struct TtsService {
    tts_repo: Arc<dyn TtsRepository>,
    transient_dir: PathBuf,
}

impl TtsService {
    pub fn new(tts_repo: Arc<dyn TtsRepository>, transient_dir: PathBuf) -> Self {
        Self {
            tts_repo,
            transient_dir,
        }
    }
}

#[async_trait]
pub trait TtsServiceApi: Send + Sync {
    /// Run one synthesis request end to end
    ///
    /// This operation:
    /// - Rejects a missing credential or blank text without calling the API
    /// - Streams the API response into a transient file
    /// - Reads the file back and removes it, whatever the outcome
    ///
    /// Returns the audio bytes with MIME type and timestamp
    async fn synthesize(
        &self,
        config: SynthesisConfig,
    ) -> Result<SynthesisResult, SynthesisError>;
}

#[async_trait]
impl TtsServiceApi for TtsService {
    async fn synthesize(
        &self,
        config: SynthesisConfig,
    ) -> Result<SynthesisResult, SynthesisError> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            model = %config.model,
            voice = %config.voice,
            speed = %config.speed,
            output_format = %config.output_format,
            text_length = config.text.len(),
            "TTS synthesis request"
        );

        // 1. Pre-flight checks, no network call on failure
        Self::enter(SynthesisStage::Validating);
        Self::validate(&config)?;

        // 2. Acquire the transient file; it is removed on every path below
        let transient = TransientFile::create_in(&self.transient_dir, config.output_format)
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    dir = %self.transient_dir.display(),
                    "Failed to create transient file"
                );
                SynthesisError::SynthesisFailed(format!(
                    "failed to create temporary file: {}",
                    e
                ))
            })?;

        // 3-5. Request, stream, read back
        let outcome = self.fetch_audio(&config, transient.path()).await;
        transient.release();

        let audio_data = outcome.map_err(|(stage, message)| {
            tracing::warn!(
                stage = %stage,
                error = %message,
                latency_ms = start_time.elapsed().as_millis(),
                "TTS synthesis failed"
            );
            SynthesisError::SynthesisFailed(message)
        })?;

        // 6-7. MIME type and timestamp
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let result = SynthesisResult::new(audio_data, config.output_format, config.speed, timestamp);

        tracing::info!(
            provider = "openai",
            model = %config.model,
            voice = %config.voice,
            mime_type = result.mime_type(),
            audio_size_bytes = result.audio_bytes().len(),
            filename = %result.suggested_filename(),
            latency_ms = start_time.elapsed().as_millis(),
            "TTS synthesis completed"
        );

        Ok(result)
    }
}

impl TtsService {
    fn enter(stage: SynthesisStage) {
        tracing::debug!(stage = %stage, "TTS synthesis stage");
    }

    fn validate(config: &SynthesisConfig) -> Result<(), SynthesisError> {
        if config.credential.is_empty() {
            tracing::warn!("TTS synthesis rejected: missing credential");
            return Err(SynthesisError::MissingCredential);
        }

        if config.text.trim().is_empty() {
            tracing::warn!("TTS synthesis rejected: empty input text");
            return Err(SynthesisError::EmptyInput);
        }

        Ok(())
    }

    /// Call the provider, stream the body to `path` and read it back
    async fn fetch_audio(
        &self,
        config: &SynthesisConfig,
        path: &Path,
    ) -> Result<Vec<u8>, (SynthesisStage, String)> {
        let request = SpeechRequest {
            model: config.model,
            input: config.text.clone(),
            voice: config.voice,
            response_format: config.output_format,
            speed: config.speed,
        };

        Self::enter(SynthesisStage::Requesting);
        let mut stream = self
            .tts_repo
            .stream_speech(&config.credential, &request)
            .await
            .map_err(|e| (SynthesisStage::Requesting, e))?;

        Self::enter(SynthesisStage::Streaming);
        let streaming_error = |e: std::io::Error| {
            (
                SynthesisStage::Streaming,
                format!("failed to write audio to temporary file: {}", e),
            )
        };

        let mut file = tokio::fs::File::create(path).await.map_err(streaming_error)?;
        let mut chunk_count = 0usize;
        let mut bytes_written = 0usize;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| (SynthesisStage::Streaming, e))?;
            file.write_all(&chunk).await.map_err(streaming_error)?;
            chunk_count += 1;
            bytes_written += chunk.len();
        }

        file.flush().await.map_err(streaming_error)?;
        drop(file);

        tracing::debug!(
            chunk_count = chunk_count,
            bytes_written = bytes_written,
            "Audio stream written to transient file"
        );

        Self::enter(SynthesisStage::Materializing);
        tokio::fs::read(path).await.map_err(|e| {
            (
                SynthesisStage::Materializing,
                format!("failed to read temporary audio file: {}", e),
            )
        })
    }
}
