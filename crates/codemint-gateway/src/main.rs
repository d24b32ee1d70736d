mod app;
mod cli;
mod error;
mod handlers;
mod model;
mod state;

use crate::cli::{StorageBackendArg, CLI};
use crate::state::AppState;
use anyhow::Context;
use clap::Parser;
use codemint_core::CodeIssuer;
use codemint_issuer::{IssuerService, RandomGenerator};
use codemint_storage::{InMemoryStore, MySqlStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::try_parse()?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        "starting codemint gateway"
    );

    let issuer: Arc<dyn CodeIssuer> = match config.storage {
        StorageBackendArg::InMemory => Arc::new(IssuerService::new(
            InMemoryStore::new(),
            RandomGenerator::new(),
        )),
        StorageBackendArg::Mysql => {
            let mysql_dsn = config
                .mysql_dsn
                .context("mysql dsn is required when storage backend is mysql")?;
            let store = MySqlStore::connect(&mysql_dsn).await?;
            Arc::new(IssuerService::new(store, RandomGenerator::new()))
        }
    };

    run(config.listen_addr, issuer).await
}

async fn run(listen_addr: SocketAddr, issuer: Arc<dyn CodeIssuer>) -> anyhow::Result<()> {
    let router = app::App::router(AppState::new(issuer));

    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, router).await?;
    Ok(())
}
