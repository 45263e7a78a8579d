use crate::ledger::Amount;

use super::account::TransactionError;
use rust_decimal_macros::dec;

/// Money held by the account, in home-currency units.
///
/// It can't go below zero: a debit larger than what's held is refused and
/// leaves the balance as it was.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance(Amount);

impl Balance {
    pub fn opening(amount: Amount) -> Result<Self, TransactionError> {
        if amount < dec!(0) {
            return Err(TransactionError::NegativeOpeningBalance);
        }

        Ok(Self(amount))
    }

    pub fn amount(&self) -> Amount {
        self.0
    }

    pub fn credit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.0 = self
            .0
            .checked_add(amount)
            .ok_or(TransactionError::Overflow)?;

        Ok(())
    }

    pub fn debit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        if amount > self.0 {
            return Err(TransactionError::NotEnoughFunds);
        }

        self.0 -= amount;
        Ok(())
    }
}
