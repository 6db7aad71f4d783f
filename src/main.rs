use std::sync::Arc;
use speech_studio::controllers::tts::TtsController;
use speech_studio::domain::tts::{ConfigCollector, TtsService};
use speech_studio::infrastructure::config::{Config, LogFormat};
use speech_studio::infrastructure::http::start_http_server;
use speech_studio::infrastructure::repositories::OpenAiTtsRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Speech Studio on {}:{}",
        config.host,
        config.port
    );

    tracing::info!(
        api_base = %config.openai_api_base,
        has_default_api_key = config.openai_api_key.is_some(),
        request_timeout_secs = config.tts_request_timeout_secs,
        transient_dir = %config.tts_transient_dir.display(),
        development = config.is_development(),
        "OpenAI TTS settings loaded"
    );

    if config.openai_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY not set. Users must enter an API key in the form.");
    }

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Repository
    let tts_repo = Arc::new(OpenAiTtsRepository::new(
        config.openai_api_base.clone(),
        config.request_timeout(),
    )?);

    // 2. Services
    let collector = Arc::new(ConfigCollector::new(config.openai_api_key.clone()));
    let tts_service = Arc::new(TtsService::new(
        tts_repo,
        config.tts_transient_dir.clone(),
    ));

    // 3. Controllers
    let tts_controller = Arc::new(TtsController::new(tts_service, collector.clone()));

    let config = Arc::new(config);
    start_http_server(config, collector, tts_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "speech_studio=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
