use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use profile_image_server::{
    adapters::inbound::http::router::create_router,
    app::{AppBuilder, AppConfig, RepositoryBackend, StorageBackend},
    config::{AwsSettings, DEFAULT_PROPERTIES_PATH, Properties},
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StorageKind {
    Memory,
    S3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RepositoryKind {
    Memory,
    Sqlite,
}

#[derive(Parser, Debug)]
#[command(name = "profile-image-server")]
#[command(about = "HTTP service for user profiles and their profile images", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Storage backend type
    #[arg(long, env = "STORAGE_BACKEND", value_enum, default_value = "memory")]
    storage_backend: StorageKind,

    /// Repository backend type
    #[arg(long, env = "REPOSITORY_BACKEND", value_enum, default_value = "memory")]
    repository_backend: RepositoryKind,

    /// Database URL for the sqlite repository backend
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://profiles.db")]
    database_url: String,

    /// Properties file with `aws.*` settings
    #[arg(long = "config", env = "APP_CONFIG", default_value = DEFAULT_PROPERTIES_PATH)]
    config_path: String,

    /// Log level, used when RUST_LOG is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self, settings: &AwsSettings) -> AppConfig {
        let storage_backend = match self.storage_backend {
            StorageKind::Memory => StorageBackend::InMemory,
            StorageKind::S3 => settings.storage_backend(),
        };

        let repository_backend = match self.repository_backend {
            RepositoryKind::Memory => RepositoryBackend::InMemory,
            RepositoryKind::Sqlite => RepositoryBackend::Sqlite {
                database_url: self.database_url.clone(),
            },
        };

        AppConfig {
            storage_backend,
            repository_backend,
            bucket: settings.bucket.clone(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };

        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{level},tower_http={level},sqlx=warn"))
        })
    }

    fn init_logging(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .context("Failed to initialize logging")?;

        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting Profile Image Server");

    let properties = Properties::load(&cli.config_path)
        .with_context(|| format!("Failed to load properties from {}", cli.config_path))?;
    let settings = AwsSettings::from_env(&properties).context("Failed to resolve AWS settings")?;
    let config = cli.to_app_config(&settings);

    info!(
        storage_backend = ?cli.storage_backend,
        repository_backend = ?cli.repository_backend,
        bucket = %config.bucket,
        "Resolved configuration"
    );

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = create_router(app_services.app_state());

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("Invalid listen address")?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .await
        .context("Failed to start server")?;

    Ok(())
}
