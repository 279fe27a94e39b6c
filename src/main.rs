use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crewclock::domain::ports::TokenStoragePort;
use crewclock::infrastructure::{
    ApiClient, AppConfig, CliArgs, KeyringTokenStorage, LoadedConfig, MemoryTokenStorage,
    StorageManager,
};
use crewclock::presentation::{Backend, CommandRunner};

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

fn create_runner(args: &CliArgs) -> Result<CommandRunner> {
    let storage = StorageManager::new()?;
    let LoadedConfig { mut config, origin } = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    init_logging(&config)?;
    origin.log();

    info!(
        version = crewclock::VERSION,
        api_url = %config.api_url,
        "Starting crewclock"
    );

    let client = Arc::new(ApiClient::new(&config.api_url, config.request_timeout())?);
    let tokens: Arc<dyn TokenStoragePort> = if config.persist_token {
        Arc::new(KeyringTokenStorage::with_service(&config.keyring_service))
    } else {
        Arc::new(MemoryTokenStorage::new())
    };

    let backend = Backend {
        auth: client.clone(),
        directory: client.clone(),
        jobsites: client.clone(),
        records: client,
        tokens,
    };

    Ok(CommandRunner::new(
        backend,
        storage,
        &config,
        args.token.clone(),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    color_eyre::install()?;

    let args = CliArgs::parse();
    let runner = create_runner(&args)?;

    runner.run(args.command).await
}
