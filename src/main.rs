use cash_machine::{
    config::Config,
    ledger::account::Account,
    output, run,
    sync::{HttpQuoteProvider, RateSynchronizer},
};

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let provider = HttpQuoteProvider::new(&config.api_url, &config.api_key, config.timeout())
        .context("failed to build the rate provider client")?;
    let synchronizer = RateSynchronizer::new(config.staff_secret.as_str(), provider);

    let mut account =
        Account::new(config.opening_balance).context("failed to open the account")?;

    let stdout = std::io::stdout();
    match &config.script {
        Some(path) => {
            let script = File::open(path)
                .with_context(|| format!("failed to open script {}", path.display()))?;
            let summary = run::replay(
                script,
                &mut account,
                &synchronizer,
                config.credential(),
                stdout.lock(),
            )?;
            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected,
                malformed = summary.malformed,
                "script replayed"
            );
        }
        None => run::demo(&mut account, &synchronizer, config.credential(), stdout.lock())?,
    }

    if let Some(path) = &config.history_csv {
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        output::write_history(file, account.transactions())
            .with_context(|| format!("failed to export history to {}", path.display()))?;
    }

    Ok(())
}
