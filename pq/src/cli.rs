use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
pub struct Cli {
    /// JSON file holding an array of documents, or `{"name", "documents"}`.
    #[clap(long)]
    pub fixture: PathBuf,
    /// Collection the fixture is loaded into and queries run against.
    /// Defaults to the fixture's own name, then to `default`.
    #[clap(long)]
    pub collection: Option<String>,
    /// Persistor config file; fake mode is forced on.
    #[clap(long)]
    pub config: Option<PathBuf>,
    #[clap(long, default_value_t = 2)]
    pub workers: usize,
}
