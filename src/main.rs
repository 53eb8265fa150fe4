use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use zaimu_anki::domain::ports::{
    DevicePrompt, IdentityProviderPort, SessionClient, SessionProviderPort, TokenStoragePort,
};
use zaimu_anki::domain::ProviderInitError;
use zaimu_anki::infrastructure::{
    AppConfig, CliArgs, FirebaseApp, FirebaseSessionProvider, GoogleDeviceAuthorizer,
    KeyringTokenStorage, MemoryTokenStorage, StorageManager,
};
use zaimu_anki::presentation::App;

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<AppConfig> {
    let args = CliArgs::parse();
    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

fn token_storage(config: &AppConfig) -> Arc<dyn TokenStoragePort> {
    if config.auth.persist_session {
        Arc::new(KeyringTokenStorage::new())
    } else {
        Arc::new(MemoryTokenStorage::new())
    }
}

/// Builds the Firebase-backed provider, or records why it is unavailable.
fn create_session_client(
    config: &AppConfig,
    prompts: mpsc::UnboundedSender<DevicePrompt>,
) -> (SessionClient, Option<Arc<FirebaseSessionProvider>>) {
    let provider = FirebaseApp::initialize(&config.firebase).and_then(|app| {
        let google: Arc<dyn IdentityProviderPort> =
            Arc::new(GoogleDeviceAuthorizer::new(&config.google, prompts)?);
        Ok::<_, ProviderInitError>(Arc::new(FirebaseSessionProvider::new(
            &app,
            google,
            token_storage(config),
        )))
    });

    match provider {
        Ok(provider) => {
            let client = SessionClient::from_init(Ok(
                Arc::clone(&provider) as Arc<dyn SessionProviderPort>
            ));
            (client, Some(provider))
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize authentication");
            (SessionClient::from_init(Err(e)), None)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _ = dotenvy::dotenv();

    let config = load_config()?;
    init_logging(&config)?;

    info!(version = zaimu_anki::VERSION, "Starting {}", zaimu_anki::NAME);

    let (prompt_tx, prompt_rx) = mpsc::unbounded_channel();
    let (client, provider) = create_session_client(&config, prompt_tx);
    let app = App::new(client, &config.ui, prompt_rx);

    // The app is subscribed now, so the restored session reaches it.
    if let Some(provider) = provider {
        tokio::spawn(async move { provider.restore().await });
    }

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal).await;

    ratatui::restore();

    result
}
