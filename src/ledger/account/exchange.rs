use crate::ledger::{
    currency::{is_supported, Currency},
    transaction::Transaction,
    Amount,
};

use super::account::{Account, TransactionError};

impl Account {
    /// Withdraw `amount` units of a foreign currency, converted into home
    /// units at the current rate.
    ///
    /// The balance goes down by exactly `amount * rate`; the history entry
    /// keeps both the converted and the requested amount.
    pub fn withdraw_in_currency(
        &mut self,
        currency_code: &str,
        amount: Amount,
    ) -> Result<(), TransactionError> {
        if !is_supported(currency_code) {
            return Err(TransactionError::UnsupportedCurrency(
                currency_code.to_string(),
            ));
        }
        let currency: Currency = currency_code.parse()?;
        let amount = Self::checked_amount(amount)?;

        let rate = self
            .rates
            .get(currency)
            .ok_or(TransactionError::RateUnavailable(currency))?;

        let amount_in_home = amount
            .checked_mul(rate)
            .ok_or(TransactionError::Overflow)?;

        self.balance.debit(amount_in_home)?;
        self.history
            .push(Transaction::exchange(amount_in_home, amount, currency));

        tracing::info!(
            "Withdrawn: {} {} (equivalent to {} UAH). Current balance: {} UAH",
            amount,
            currency,
            amount_in_home,
            self.balance()
        );

        Ok(())
    }
}
