use crate::e2e::helpers::openai_mocks::{mock_audio_bytes, mock_speech_error, mock_speech_success};

use futures::StreamExt;
use speech_studio::domain::tts::{Credential, OutputFormat, Speed, SpeechModel, Voice};
use speech_studio::infrastructure::repositories::{
    OpenAiTtsRepository, SpeechRequest, TtsRepository,
};
use std::time::Duration;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn request() -> SpeechRequest {
    SpeechRequest {
        model: SpeechModel::Tts1,
        input: "Hello world".to_string(),
        voice: Voice::Alloy,
        response_format: OutputFormat::Mp3,
        speed: Speed::default(),
    }
}

fn repository(server: &MockServer) -> OpenAiTtsRepository {
    OpenAiTtsRepository::new(format!("{}/v1", server.uri()), Duration::from_secs(5)).unwrap()
}

async fn collect(repo: &OpenAiTtsRepository, key: &str) -> Result<Vec<u8>, String> {
    let mut stream = repo
        .stream_speech(&Credential::new(key), &request())
        .await?;

    let mut audio = Vec::new();
    while let Some(chunk) = stream.next().await {
        audio.extend_from_slice(&chunk?);
    }
    Ok(audio)
}

#[tokio::test]
async fn it_should_stream_the_audio_body() {
    let server = MockServer::start().await;
    let audio = mock_audio_bytes(64 * 1024);
    mock_speech_success(&server, "sk-test", audio.clone(), "audio/mpeg").await;

    let received = collect(&repository(&server), "sk-test").await.unwrap();

    assert_eq!(received, audio);
}

#[tokio::test]
async fn it_should_keep_the_credential_out_of_the_payload() {
    let server = MockServer::start().await;
    mock_speech_success(&server, "sk-secret", mock_audio_bytes(16), "audio/mpeg").await;

    collect(&repository(&server), "sk-secret").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(!body.contains("sk-secret"));
}

#[tokio::test]
async fn it_should_report_api_error_message_and_status() {
    let server = MockServer::start().await;
    mock_speech_error(&server, 400, "Invalid value for 'voice'").await;

    let err = collect(&repository(&server), "sk-test").await.unwrap_err();

    assert!(err.contains("400"), "missing status in {}", err);
    assert!(err.contains("Invalid value for 'voice'"), "missing message in {}", err);
}

#[tokio::test]
async fn it_should_report_plain_text_errors_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = collect(&repository(&server), "sk-test").await.unwrap_err();

    assert!(err.contains("503"));
    assert!(err.contains("upstream overloaded"));
}

#[tokio::test]
async fn it_should_report_unreachable_service() {
    // Nothing listens on the discard port
    let repo =
        OpenAiTtsRepository::new("http://127.0.0.1:9/v1".to_string(), Duration::from_secs(2))
            .unwrap();

    let err = collect(&repo, "sk-test").await.unwrap_err();

    assert!(err.starts_with("OpenAI TTS request failed"), "got {}", err);
}

#[tokio::test]
async fn it_should_time_out_slow_responses() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/audio/speech"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(mock_audio_bytes(16))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let repo =
        OpenAiTtsRepository::new(format!("{}/v1", server.uri()), Duration::from_millis(300))
            .unwrap();

    let err = collect(&repo, "sk-test").await.unwrap_err();

    assert!(err.contains("OpenAI TTS"), "got {}", err);
}
