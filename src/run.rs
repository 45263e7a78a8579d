//! Drives the account: either the fixed demo sequence, or a replayed script.
//!
//! The account is owned by the caller and only ever mutated from the calling
//! thread, one operation at a time.

use crate::error_handler;
use crate::input;
use crate::ledger::{
    account::{Account, TransactionError},
    currency::{Currency, HOME},
    Amount,
};
use crate::sync::{QuoteProvider, RateSynchronizer, SyncError};

use rust_decimal_macros::dec;
use std::io::{self, Write};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Deposit(Amount),

    /// Home-currency withdrawal; the currency is only a tag on the history entry.
    Withdrawal(Amount, Currency),

    /// Withdrawal of an amount in a foreign currency. The code is kept as
    /// given so that the account decides whether it is supported.
    Exchange(String, Amount),

    Sync,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Sync(#[from] SyncError),
}

pub fn apply<P: QuoteProvider>(
    operation: &Operation,
    account: &mut Account,
    synchronizer: &RateSynchronizer<P>,
    credential: &str,
) -> Result<(), OperationError> {
    match operation {
        Operation::Deposit(amount) => account.deposit(*amount)?,
        Operation::Withdrawal(amount, currency) => {
            account.withdraw_tagged(*amount, *currency, true)?
        }
        Operation::Exchange(code, amount) => account.withdraw_in_currency(code, *amount)?,
        Operation::Sync => {
            synchronizer.sync(credential, account)?;
        }
    }

    Ok(())
}

/// Apply an operation, and report a rejection instead of propagating it:
/// a rejected operation leaves the account as it was, so the run goes on.
fn apply_or_report<P: QuoteProvider>(
    operation: &Operation,
    account: &mut Account,
    synchronizer: &RateSynchronizer<P>,
    credential: &str,
) -> bool {
    match apply(operation, account, synchronizer, credential) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(?operation, "{}", err);
            false
        }
    }
}

/// The canonical session: sync rates, deposit 1230, withdraw 100, show the
/// balance, withdraw 1000, withdraw 1 USD, show the history.
pub fn demo<P: QuoteProvider>(
    account: &mut Account,
    synchronizer: &RateSynchronizer<P>,
    credential: &str,
    mut out: impl Write,
) -> io::Result<()> {
    for operation in [
        Operation::Sync,
        Operation::Deposit(dec!(1230)),
        Operation::Withdrawal(dec!(100), HOME),
    ] {
        apply_or_report(&operation, account, synchronizer, credential);
    }

    writeln!(out, "Current balance: {} UAH", account.balance())?;

    for operation in [
        Operation::Withdrawal(dec!(1000), HOME),
        Operation::Exchange(Currency::USD.to_string(), dec!(1)),
    ] {
        apply_or_report(&operation, account, synchronizer, credential);
    }

    writeln!(out, "Transaction History: {}", account.history())?;

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub applied: usize,
    pub rejected: usize,
    pub malformed: usize,
}

/// Replay a CSV script of operations against the account, then write the
/// final balance and history to `out`.
pub fn replay<P: QuoteProvider>(
    input_stream: impl io::Read + Send + 'static,
    account: &mut Account,
    synchronizer: &RateSynchronizer<P>,
    credential: &str,
    mut out: impl Write,
) -> io::Result<Summary> {
    let (operations, input_errors) = input::parse(input_stream);
    let reporter = error_handler::report(input_errors);

    let mut summary = Summary::default();
    for operation in operations {
        if apply_or_report(&operation, account, synchronizer, credential) {
            summary.applied += 1;
        } else {
            summary.rejected += 1;
        }
    }

    summary.malformed = reporter.join().unwrap_or_else(|_| {
        tracing::error!("input error reporter panicked");
        0
    });

    writeln!(out, "Current balance: {} UAH", account.balance())?;
    writeln!(out, "Transaction History: {}", account.history())?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::{apply, demo, replay, Operation, OperationError, Summary};
    use crate::ledger::{account::Account, currency::Currency};
    use crate::sync::{QuoteProvider, Quotes, RateSynchronizer, SyncError};

    use rust_decimal_macros::dec;

    struct FixedQuotes(Quotes);

    impl QuoteProvider for FixedQuotes {
        fn latest(&self) -> Result<Quotes, SyncError> {
            Ok(self.0.clone())
        }
    }

    fn synchronizer() -> RateSynchronizer<FixedQuotes> {
        let quotes = vec![
            ("UAH".to_string(), 1.0),
            ("USD".to_string(), 0.025),
            ("EUR".to_string(), 0.023),
        ];
        RateSynchronizer::new("staff", FixedQuotes(quotes.into_iter().collect()))
    }

    #[test]
    fn test_demo() {
        let mut acc = Account::new(dec!(0)).unwrap();
        let mut out = Vec::new();

        demo(&mut acc, &synchronizer(), "staff", &mut out).unwrap();

        // 0 + 1230 - 100 - 1000 - (1 USD * 40)
        assert_eq!(dec!(90), acc.balance());
        assert_eq!(5, acc.transactions().len());

        let out = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(2, lines.len());
        assert_eq!("Current balance: 1130 UAH", lines[0]);
        assert!(lines[1].starts_with("Transaction History: "));
        assert!(lines[1].ends_with(" -40 UAH (inCur 1 USD)"));
    }

    #[test]
    fn test_demo_without_rates() {
        // A bad credential skips the sync: the USD withdrawal has no rate.
        let mut acc = Account::new(dec!(0)).unwrap();

        demo(&mut acc, &synchronizer(), "intruder", std::io::sink()).unwrap();

        assert_eq!(dec!(130), acc.balance());
        assert_eq!(4, acc.transactions().len());
        assert!(acc.rates().is_empty());
    }

    #[test]
    fn test_apply_reports_errors() {
        let mut acc = Account::new(dec!(10)).unwrap();
        let synchronizer = synchronizer();

        assert_eq!(
            Err(OperationError::Sync(SyncError::AuthenticationFailed)),
            apply(&Operation::Sync, &mut acc, &synchronizer, "wrong")
        );
        assert_eq!(
            Err(OperationError::Transaction(
                crate::ledger::account::TransactionError::NotEnoughFunds
            )),
            apply(
                &Operation::Withdrawal(dec!(11), Currency::UAH),
                &mut acc,
                &synchronizer,
                "staff"
            )
        );
        assert_eq!(dec!(10), acc.balance());
    }

    #[test]
    fn test_replay() {
        let data = r#"op,amount,currency
sync,,
deposit,1230,
withdrawal,100,
withdrawal,1000,
exchange,1,USD
exchange,1,GBP
exchange,1,PLN
withdrawal,500,
teleport,1,
deposit,,
withdrawal,10,EUR"#;
        let mut acc = Account::new(dec!(0)).unwrap();
        let mut out = Vec::new();

        let summary = replay(
            std::io::Cursor::new(data),
            &mut acc,
            &synchronizer(),
            "staff",
            &mut out,
        )
        .unwrap();

        assert_eq!(
            Summary {
                applied: 6,
                rejected: 3, // GBP unsupported, PLN has no rate, 500 > 90
                malformed: 2,
            },
            summary
        );
        assert_eq!(dec!(80), acc.balance());
        assert_eq!(6, acc.transactions().len());
        assert!(acc.history().ends_with(" -10 EUR"));

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("Current balance: 80 UAH\n"));
    }
}
