use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use laborrag_cli::server::{router, AppState};
use laborrag_cli::{init_tracing, load_settings};
use laborrag_hybrid::build_context;

#[derive(Parser, Debug)]
#[command(name = "laborrag-server", about = "HTTP question answering over the labor-law corpus")]
struct ServerCli {
    /// Config file (defaults to ./config.toml).
    #[arg(long, env = "LABORRAG_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind (host:port); overrides `server.bind`.
    #[arg(long, env = "LABORRAG_BIND")]
    bind: Option<String>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = ServerCli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let bind = cli.bind.unwrap_or_else(|| settings.server.bind.clone());
    let addr: SocketAddr = bind.parse().with_context(|| format!("invalid bind address {bind}"))?;

    // Model clients are blocking; build them before the runtime starts.
    let context = Arc::new(build_context(settings).context("failed to build the search context")?);
    tracing::info!(chunks = context.corpus().len(), "corpus indexed");

    let app = router(AppState::new(context));
    tokio::runtime::Runtime::new()?.block_on(async move {
        let listener = tokio::net::TcpListener::bind(addr).await.with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("listening on http://{}", addr);
        axum::serve(listener, app).await.context("server error")
    })
}
