pub mod account;
pub mod balance;
mod deposit;
mod exchange;
mod withdrawal;

pub use account::{Account, TransactionError};
