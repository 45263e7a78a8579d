//! A single-account cash machine.
//!
//! The account keeps a UAH balance and an append-only history. Withdrawals
//! can be requested in USD, EUR or PLN once their rates have been synced
//! from a remote quote provider.

pub mod config;
pub mod error_handler;
pub mod input;
pub mod ledger;
pub mod output;
pub mod run;
pub mod sync;
