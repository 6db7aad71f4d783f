use crate::domain::tts::{Credential, OutputFormat, Speed, SpeechModel, Voice};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use serde::Serialize;

/// Incrementally delivered audio body
pub type SpeechStream = BoxStream<'static, Result<Bytes, String>>;

/// Payload of one speech synthesis call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub model: SpeechModel,
    pub input: String,
    pub voice: Voice,
    pub response_format: OutputFormat,
    pub speed: Speed,
}

/// Repository for TTS synthesis operations.
/// Abstracts the hosted speech provider behind a streaming interface.
///
/// Implementations are responsible for:
/// - Authenticating with the credential out of band (never in the payload)
/// - Turning provider-reported failures into readable messages
/// - Delivering the audio body in chunks as it arrives
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Start a synthesis call and return the audio body as a stream
    ///
    /// # Errors
    /// Returns the provider's message if the call is rejected or the network
    /// fails before the body starts. Errors while reading the body are yielded
    /// by the stream itself.
    async fn stream_speech(
        &self,
        credential: &Credential,
        request: &SpeechRequest,
    ) -> Result<SpeechStream, String>;
}
