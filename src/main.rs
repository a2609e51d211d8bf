use anyhow::Result;
use clap::Parser;
use natureremo_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// Nature Remo access token (overrides config)
    #[arg(long, env = "NATURE_REMO_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Nature Remo API base URL (overrides config)
    #[arg(long, env = "NATURE_REMO_API_URL")]
    api_url: Option<String>,

    /// Port to listen on for metrics (overrides config)
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "HOST")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting Nature Remo Prometheus Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(token) = args.token {
        config.natureremo.token = secrecy::SecretString::from(token);
    }
    if let Some(api_url) = args.api_url {
        config.natureremo.api_url = api_url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }

    config.validate()?;

    info!("Configuration loaded successfully");
    info!("Nature Remo API: {}", config.natureremo.api_url);
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
