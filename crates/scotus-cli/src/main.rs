mod config;
mod report;
mod update;

use clap::Parser;
use scotus_ai::AnthropicClient;
use scotus_store::JsonStore;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::info!("scotus-tracker v{}", env!("CARGO_PKG_VERSION"));

    // Credential check happens before the dataset is touched.
    let config = Config::from_args(args)?;

    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
    let client = AnthropicClient::new(config.api_key)
        .with_base_url(&config.api_base)
        .with_model(config.model)
        .with_max_tokens(config.max_tokens);
    let store = JsonStore::new(config.cases_path);

    let report = update::run_update(&store, &client, &today, config.dry_run).await?;
    for line in report::summary_lines(&report) {
        println!("{line}");
    }
    Ok(())
}
