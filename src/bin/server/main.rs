use anyhow::{Context, Result};
use clap::Parser;
use customer_store_server::app::{AppBuilder, AppConfig, GeolocationConfig, RepositoryBackend};
use std::{net::SocketAddr, str::FromStr, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "customer-store-server")]
#[command(about = "Customer management API with address geolocation", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value = "3000")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Repository backend type
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// Database URL for repository backend (SQLite)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// PositionStack API base URL
    #[arg(long, env = "POSITIONSTACK_URL", default_value = "http://api.positionstack.com")]
    positionstack_url: String,

    /// PositionStack access key
    #[arg(long, env = "POSITIONSTACK_API_KEY", hide_env_values = true)]
    positionstack_api_key: Option<String>,

    /// Timeout for geolocation requests, in seconds
    #[arg(long, env = "POSITIONSTACK_TIMEOUT_SECS", default_value = "30")]
    positionstack_timeout_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            _ => anyhow::bail!("Unknown repository backend: {}", self.repository_backend),
        };

        Ok(AppConfig {
            repository_backend,
            geolocation: GeolocationConfig {
                base_url: self.positionstack_url.clone(),
                access_key: self.positionstack_api_key.clone(),
                timeout: Duration::from_secs(self.positionstack_timeout_secs),
            },
        })
    }

    fn init_logging(&self) -> Result<()> {
        let level = LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::INFO);

        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(level)
            .try_init()
            .context("Failed to install tracing subscriber")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging()?;

    info!("Starting Customer Store Server");
    info!("Repository backend: {}", cli.repository_backend);
    if cli.positionstack_api_key.is_none() {
        warn!("POSITIONSTACK_API_KEY is not set; geolocation lookups will fail");
    }

    let config = cli.to_app_config()?;

    let app_services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    let router = app_services.router();

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to start server")?;

    Ok(())
}
