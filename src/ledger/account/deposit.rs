use crate::ledger::{transaction::Transaction, Amount};

use super::account::{Account, TransactionError};

impl Account {
    /// Add money to the balance, in the home currency.
    pub fn deposit(&mut self, amount: Amount) -> Result<(), TransactionError> {
        let amount = Self::checked_amount(amount)?;

        self.balance.credit(amount)?;
        self.history.push(Transaction::deposit(amount));

        tracing::info!(
            "Deposited {}. Current balance: {} UAH",
            amount,
            self.balance()
        );

        Ok(())
    }
}
