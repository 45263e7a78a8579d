use super::currency::{Currency, FOREIGN};
use super::transaction::display_amount;
use super::Rate;

use std::collections::HashMap;
use std::fmt;

/// A snapshot of the known exchange rates, in home units per foreign unit.
///
/// Snapshots are never mutated once they are installed in an account: a sync
/// assembles a whole new `Rates` and swaps it in, so anyone holding the
/// previous snapshot keeps a consistent view.
/// A missing entry means the rate is unknown, never that it is zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rates {
    rates: HashMap<Currency, Rate>,
}

impl Rates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, currency: Currency) -> Option<Rate> {
        self.rates.get(&currency).copied()
    }

    pub fn set(&mut self, currency: Currency, rate: Rate) {
        self.rates.insert(currency, rate);
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl FromIterator<(Currency, Rate)> for Rates {
    fn from_iter<I: IntoIterator<Item = (Currency, Rate)>>(iter: I) -> Self {
        Self {
            rates: iter.into_iter().collect(),
        }
    }
}

// One line per foreign currency, in a fixed order, whether its rate is known or not.
impl fmt::Display for Rates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, currency) in FOREIGN.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match self.get(*currency) {
                Some(rate) => write!(f, "{}: {}", currency, display_amount(rate))?,
                None => write!(f, "{}: Rate not available", currency)?,
            }
        }

        Ok(())
    }
}
