use crate::ledger::Amount;

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://api.exchangeratesapi.io/v1/latest";

/// Every setting can come from the command line or from the environment.
/// Secrets are only ever read from there, never compiled in.
#[derive(Debug, Parser)]
#[clap(
    name = "cash_machine",
    about = "Runs a UAH cash machine: deposits, withdrawals, and withdrawals in USD, EUR or PLN at synced rates."
)]
pub struct Config {
    /// Balance the account is opened with, in UAH.
    #[clap(long, env = "CASH_MACHINE_OPENING_BALANCE", default_value = "0")]
    pub opening_balance: Amount,

    /// Secret staff must present to sync exchange rates.
    #[clap(long, env = "CASH_MACHINE_STAFF_SECRET", hide_env_values = true)]
    pub staff_secret: String,

    /// Credential presented when syncing. Defaults to the staff secret.
    #[clap(long, env = "CASH_MACHINE_CREDENTIAL", hide_env_values = true)]
    pub credential: Option<String>,

    /// Endpoint serving the latest rates.
    #[clap(long, env = "CASH_MACHINE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Access key sent to the rate provider.
    #[clap(long, env = "CASH_MACHINE_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// How long a rate sync may take before it is abandoned.
    #[clap(long, env = "CASH_MACHINE_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,

    /// CSV script of operations to replay instead of the built-in demo.
    #[clap(long)]
    pub script: Option<PathBuf>,

    /// Where to export the transaction history as CSV once done.
    #[clap(long)]
    pub history_csv: Option<PathBuf>,
}

impl Config {
    pub fn credential(&self) -> &str {
        self.credential.as_deref().unwrap_or(&self.staff_secret)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
