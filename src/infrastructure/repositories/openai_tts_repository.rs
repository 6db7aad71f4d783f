use super::tts_repository::{SpeechRequest, SpeechStream, TtsRepository};
use crate::domain::tts::Credential;
use async_openai::config::{Config, OpenAIConfig};
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use std::time::Duration;

const SPEECH_PATH: &str = "/audio/speech";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error envelope returned by the OpenAI API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// OpenAI TTS implementation of TTS repository
pub struct OpenAiTtsRepository {
    http: reqwest::Client,
    api_base: String,
}

impl OpenAiTtsRepository {
    /// `request_timeout` bounds the whole call, body streaming included
    pub fn new(api_base: String, request_timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(request_timeout)
            .build()?;

        Ok(Self { http, api_base })
    }

    /// Keys must form a valid bearer header; the SDK unwraps it
    fn check_credential(credential: &Credential) -> Result<(), String> {
        HeaderValue::from_str(&format!("Bearer {}", credential.expose()))
            .map(|_| ())
            .map_err(|_| {
                "OpenAI API key contains characters that are not allowed in an HTTP header"
                    .to_string()
            })
    }

    /// Endpoint and auth headers for one caller-supplied credential
    fn client_config(&self, credential: &Credential) -> OpenAIConfig {
        OpenAIConfig::new()
            .with_api_base(self.api_base.trim_end_matches('/'))
            .with_api_key(credential.expose())
    }

    /// Pull the human-readable message out of an error body
    fn error_message(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => parsed.error.message,
            Err(_) if body.trim().is_empty() => "empty error response".to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn stream_speech(
        &self,
        credential: &Credential,
        request: &SpeechRequest,
    ) -> Result<SpeechStream, String> {
        Self::check_credential(credential).inspect_err(|e| {
            tracing::warn!(error = %e, "Refusing to call OpenAI TTS API");
        })?;

        let config = self.client_config(credential);
        let url = config.url(SPEECH_PATH);

        tracing::info!(
            model = %request.model,
            voice = %request.voice,
            speed = %request.speed,
            response_format = %request.response_format,
            text_length = request.input.len(),
            "Calling OpenAI TTS API"
        );

        if tracing::enabled!(tracing::Level::DEBUG) {
            let text_preview: String = request.input.chars().take(200).collect();
            tracing::debug!(text_preview = %text_preview, "OpenAI TTS input");
        }

        let mut builder = self.http.post(&url).json(request);
        for (name, value) in config.headers().iter() {
            builder = builder.header(name.as_str(), value.as_bytes());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %request.model,
                voice = %request.voice,
                "OpenAI TTS API call failed"
            );
            format!("OpenAI TTS request failed: {}", e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = Self::error_message(&body);
            tracing::error!(
                status = status.as_u16(),
                error = %message,
                model = %request.model,
                voice = %request.voice,
                "OpenAI TTS API returned an error"
            );
            return Err(format!("OpenAI TTS error ({}): {}", status, message));
        }

        tracing::debug!(
            status = status.as_u16(),
            content_length = ?response.content_length(),
            "OpenAI TTS response headers received, streaming body"
        );

        let stream = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(|e| format!("OpenAI TTS stream interrupted: {}", e)))
            .boxed();

        Ok(stream)
    }
}
