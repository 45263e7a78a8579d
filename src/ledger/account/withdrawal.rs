use crate::ledger::{
    currency::{Currency, HOME},
    transaction::Transaction,
    Amount,
};

use super::account::{Account, TransactionError};

impl Account {
    /// Remove money from the balance, in the home currency.
    pub fn withdraw(&mut self, amount: Amount) -> Result<(), TransactionError> {
        self.withdraw_tagged(amount, HOME, true)
    }

    /// Remove `amount` home-currency units from the balance, and tag the
    /// history entry with `currency`.
    ///
    /// The tag is a label only: no rate is applied here. Converting
    /// withdrawals go through [`Account::withdraw_in_currency`].
    pub fn withdraw_tagged(
        &mut self,
        amount: Amount,
        currency: Currency,
        display: bool,
    ) -> Result<(), TransactionError> {
        let amount = Self::checked_amount(amount)?;

        self.balance.debit(amount)?;
        self.history.push(Transaction::withdrawal(amount, currency));

        if display {
            tracing::info!(
                "Withdrawn: {} {}. Current balance: {} UAH",
                amount,
                currency,
                self.balance()
            );
        }

        Ok(())
    }
}
