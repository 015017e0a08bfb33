mod cli;
mod fixture;
mod prompt;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use fixture::load_fixture;
use mongo_persistor::{Dispatcher, Persistor, PersistorConfig};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => PersistorConfig::from_path(path)?,
        None => PersistorConfig::default(),
    };
    config.fake = true;

    let fixture = load_fixture(&cli.fixture, cli.collection.as_deref().unwrap_or("default"))?;
    let collection = cli.collection.clone().unwrap_or_else(|| fixture.name.clone());
    if fixture.is_empty() {
        warn!(fixture = %cli.fixture.display(), "fixture holds no documents");
    }

    let persistor = Arc::new(Persistor::new(config)?);
    let dispatcher = Dispatcher::spawn(persistor, cli.workers)?;
    for document in fixture.documents {
        let reply = dispatcher.request(json!({
            "action": "save",
            "collection": collection,
            "document": document,
        }))?;
        expect_ok(&reply)?;
    }
    info!(%collection, "fixture loaded");

    let stdin = std::io::stdin();
    prompt::run(
        &dispatcher,
        &collection,
        stdin.lock(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )?;

    dispatcher.shutdown()
}

fn expect_ok(reply: &Value) -> Result<()> {
    if reply["status"] == "ok" {
        Ok(())
    } else {
        anyhow::bail!("persistor rejected fixture document: {reply}")
    }
}
