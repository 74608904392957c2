use std::net::SocketAddr;

use clap::Parser;
use coverage_engine::api::{AppState, create_router};
use coverage_engine::config::ConfigLoader;
use coverage_engine::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "coverage-engine",
    about = "Serve staffed-hours and FTE computation over HTTP",
    version
)]
struct Cli {
    /// Configuration directory holding engine.yaml and holidays.yaml
    #[arg(long, default_value = "./config/default")]
    config: String,
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 3000)]
    port: u16,
    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init(&cli.log_level)?;

    let loader = ConfigLoader::load(&cli.config)?;
    info!(
        config = %cli.config,
        name = %loader.metadata().name,
        version = %loader.metadata().version,
        "Configuration ready"
    );

    let app = create_router(AppState::new(loader));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "coverage engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run(Cli::parse()).await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}
