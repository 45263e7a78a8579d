use super::currency::{Currency, HOME};
use super::{Amount, DECIMAL_PRECISION};

use chrono::{DateTime, Local};
use std::fmt;

/// Layout of the timestamp at the start of every history entry,
/// e.g. `19/10/2026 06:09 PM`.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %I:%M %p";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Type {
    Deposit,    // Money added to the balance.
    Withdrawal, // Money removed from the balance.
}

/// One entry of the account history. Entries are only ever appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub timestamp: DateTime<Local>,
    pub tx_type: Type,

    /// Always expressed in home-currency units.
    pub amount: Amount,

    /// Cosmetic tag for plain withdrawals, the home currency otherwise.
    pub currency: Currency,

    /// Amount and currency the withdrawal was requested in, when it went
    /// through a conversion.
    pub original: Option<(Amount, Currency)>,
}

impl Transaction {
    pub fn deposit(amount: Amount) -> Self {
        Self {
            timestamp: Local::now(),
            tx_type: Type::Deposit,
            amount,
            currency: HOME,
            original: None,
        }
    }

    pub fn withdrawal(amount: Amount, currency: Currency) -> Self {
        Self {
            timestamp: Local::now(),
            tx_type: Type::Withdrawal,
            amount,
            currency,
            original: None,
        }
    }

    pub fn exchange(amount_in_home: Amount, original_amount: Amount, original: Currency) -> Self {
        Self {
            timestamp: Local::now(),
            tx_type: Type::Withdrawal,
            amount: amount_in_home,
            currency: HOME,
            original: Some((original_amount, original)),
        }
    }

    pub fn sign(&self) -> char {
        match self.tx_type {
            Type::Deposit => '+',
            Type::Withdrawal => '-',
        }
    }
}

/// Presentation only: converted amounts can carry many decimal places, which
/// are trimmed here but kept in the stored value.
pub fn display_amount(amount: Amount) -> Amount {
    amount.round_dp(DECIMAL_PRECISION).normalize()
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.sign(),
            display_amount(self.amount),
            self.currency
        )?;

        if let (Type::Withdrawal, Some((amount, currency))) = (self.tx_type, self.original) {
            write!(f, " (inCur {} {})", display_amount(amount), currency)?;
        }

        Ok(())
    }
}
