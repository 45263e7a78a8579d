use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Currencies the cash machine knows about.
///
/// The set is closed on purpose: a code that doesn't parse into a `Currency`
/// is not supported, whether or not a rate provider quotes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Currency {
    UAH,
    USD,
    EUR,
    PLN,
}

/// The currency the balance is kept in.
pub const HOME: Currency = Currency::UAH;

/// Every code accepted by [`is_supported`].
pub const SUPPORTED: [Currency; 4] = [Currency::UAH, Currency::USD, Currency::EUR, Currency::PLN];

/// Currencies a rate is synced for, i.e. the supported ones minus the home currency.
pub const FOREIGN: [Currency; 3] = [Currency::USD, Currency::EUR, Currency::PLN];

impl Currency {
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::UAH => "UAH",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::PLN => "PLN",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
#[error("currency {0} not supported")]
pub struct UnsupportedCurrency(pub String);

impl FromStr for Currency {
    type Err = UnsupportedCurrency;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        SUPPORTED
            .into_iter()
            .find(|currency| currency.code() == code)
            .ok_or_else(|| UnsupportedCurrency(code.to_string()))
    }
}

/// Pure membership test, independent of whether a rate is currently known.
pub fn is_supported(code: &str) -> bool {
    code.parse::<Currency>().is_ok()
}
