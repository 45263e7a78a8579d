use crate::ledger::{
    currency::{Currency, UnsupportedCurrency},
    rates::Rates,
    transaction::Transaction,
    Amount,
};

use super::balance::Balance;
use rust_decimal_macros::dec;
use std::sync::Arc;

/// Every way an operation on the account can be rejected.
/// A rejected operation never changes the balance, the history or the rates.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TransactionError {
    /// Deposits and withdrawals must move a strictly positive amount.
    #[error("amount must be greater than 0")]
    NonPositiveAmount,

    /// The account can't be opened with a debt.
    #[error("opening balance can't be negative")]
    NegativeOpeningBalance,

    /// Funds in the account are insufficient for a withdrawal.
    #[error("insufficient funds")]
    NotEnoughFunds,

    /// The requested currency is not one the cash machine handles.
    #[error("currency {0} not supported")]
    UnsupportedCurrency(String),

    /// The currency is supported, but no rate has been synced for it yet.
    #[error("exchange rate not found for {0}")]
    RateUnavailable(Currency),

    /// Adding or removing that much money would overflow.
    #[error("amount overflows the balance")]
    Overflow,
}

impl From<UnsupportedCurrency> for TransactionError {
    fn from(err: UnsupportedCurrency) -> Self {
        Self::UnsupportedCurrency(err.0)
    }
}

/// The one account the cash machine manages.
///
/// It owns the balance, the append-only history and the current rate
/// snapshot. It is handed around by reference: whoever constructs it is its
/// only owner, so a balance update and its history entry always land
/// together.
#[derive(Debug)]
pub struct Account {
    pub(super) balance: Balance,
    pub(super) history: Vec<Transaction>,
    pub(super) rates: Arc<Rates>,
}

impl Account {
    /// Open the account. The history starts with a zero-amount entry, whatever
    /// the opening balance is.
    pub fn new(opening_balance: Amount) -> Result<Self, TransactionError> {
        Ok(Self {
            balance: Balance::opening(opening_balance)?,
            history: vec![Transaction::deposit(dec!(0))],
            rates: Arc::new(Rates::new()),
        })
    }

    pub fn balance(&self) -> Amount {
        self.balance.amount()
    }

    /// Every history entry, oldest first, joined on a single line.
    pub fn history(&self) -> String {
        self.history
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.history
    }

    /// The rate snapshot currently used for conversions.
    pub fn rates(&self) -> Arc<Rates> {
        Arc::clone(&self.rates)
    }

    /// Swap in a new, fully assembled rate snapshot.
    pub fn install_rates(&mut self, rates: Rates) {
        self.rates = Arc::new(rates);
    }

    pub fn rates_report(&self) -> String {
        self.rates.to_string()
    }

    /// Amounts are taken exactly as requested; only their display is rounded.
    pub(super) fn checked_amount(amount: Amount) -> Result<Amount, TransactionError> {
        if amount <= dec!(0) {
            return Err(TransactionError::NonPositiveAmount);
        }

        Ok(amount)
    }
}
