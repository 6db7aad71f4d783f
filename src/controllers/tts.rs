use axum::{
    body::Body,
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use std::sync::Arc;

use crate::{
    domain::tts::{ConfigCollector, FormOptions, SynthesisForm, TtsService, TtsServiceApi},
    error::{AppError, AppResult},
};

pub const SUCCESS_MESSAGE: &str = "Audio generation complete!";

pub struct TtsController {
    tts_service: Arc<TtsService>,
    collector: Arc<ConfigCollector>,
}

impl TtsController {
    pub fn new(tts_service: Arc<TtsService>, collector: Arc<ConfigCollector>) -> Self {
        Self {
            tts_service,
            collector,
        }
    }

    /// GET /api/tts/options - Selectable values for the form
    pub async fn options(State(controller): State<Arc<TtsController>>) -> Json<FormOptions> {
        Json(controller.collector.form_options())
    }

    /// POST /api/tts/synthesize - Convert text to speech
    pub async fn synthesize(
        State(controller): State<Arc<TtsController>>,
        payload: Result<Json<SynthesisForm>, JsonRejection>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let Json(form) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        let config = controller.collector.collect(form)?;

        let result = controller.tts_service.synthesize(config).await?;

        let filename = result.suggested_filename();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(result.mime_type()),
        );
        headers.insert(
            header::CONTENT_DISPOSITION,
            header_value(format!("inline; filename=\"{}\"", filename))?,
        );
        headers.insert(
            "x-output-format",
            HeaderValue::from_static(result.output_format().as_str()),
        );
        headers.insert("x-speed", header_value(result.speed().to_string())?);
        headers.insert("x-timestamp", header_value(result.timestamp().to_string())?);
        headers.insert("x-message", HeaderValue::from_static(SUCCESS_MESSAGE));
        headers.insert("x-summary", header_value(result.summary())?);

        Ok((StatusCode::OK, headers, Body::from(result.into_audio_bytes())))
    }
}

fn header_value(value: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&value)
        .map_err(|e| AppError::Internal(format!("invalid header value {:?}: {}", value, e)))
}
