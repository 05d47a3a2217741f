use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::{error, info};

use chess_relay::banner::{BannerInfo, print_banner, print_farewell};
use chess_relay::consts::{DEFAULT_ENGINE, DEFAULT_HOST, DEFAULT_PORT, SEARCH_DEPTH};
use chess_relay::engine::EngineConfig;
use chess_relay::engine::uci::UciEngine;
use chess_relay::relay::Relay;
use chess_relay::server::RelayServer;

#[derive(Parser)]
#[command(
    name = "chess-relay",
    version,
    about = "Relays chess move requests from WebSocket clients to a UCI engine."
)]
struct Cli {
    /// Interface to listen on
    #[arg(long, env = "CHESS_RELAY_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "CHESS_RELAY_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// UCI engine executable, spawned once per move request
    #[arg(short, long, env = "CHESS_RELAY_ENGINE", default_value = DEFAULT_ENGINE)]
    engine: String,

    /// Extra argument passed to the engine (repeatable)
    #[arg(long = "engine-arg", allow_hyphen_values = true)]
    engine_args: Vec<String>,

    /// Search depth sent with `go depth`
    #[arg(long, default_value_t = SEARCH_DEPTH)]
    depth: u32,

    /// Give up on a search after this many seconds (default: wait forever)
    #[arg(long)]
    search_timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = EngineConfig {
        program: cli.engine,
        args: cli.engine_args,
        depth: cli.depth,
        search_timeout: cli.search_timeout.map(Duration::from_secs),
    };

    let relay = Relay::new(Arc::new(UciEngine::new(config.clone())));
    let server = RelayServer::bind((cli.host.as_str(), cli.port), relay)
        .await
        .with_context(|| format!("cannot listen on {}:{}", cli.host, cli.port))?;
    let listen = server.local_addr()?;

    print_banner(&BannerInfo {
        listen,
        engine: &config.program,
        engine_args: &config.args,
        depth: config.depth,
        search_timeout: config.search_timeout,
    });
    info!("Server running on ws://{listen}");

    server
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("failed to listen for Ctrl+C: {e}");
                std::future::pending::<()>().await;
            }
            info!("shutting down");
        })
        .await?;

    print_farewell();
    Ok(())
}
