use super::{QuoteProvider, Quotes, SyncError};
use crate::ledger::{
    account::Account,
    currency::{Currency, FOREIGN, HOME},
    rates::Rates,
    Rate,
};

use rust_decimal::Decimal;
use std::str::FromStr;

/// What a successful sync changed.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Currencies that got a fresh rate, with that rate.
    pub updated: Vec<(Currency, Rate)>,

    /// Currencies the provider didn't quote. They keep their previous rate,
    /// or stay unknown if they never had one.
    pub missing: Vec<Currency>,

    /// Currencies quoted with a value no rate can be derived from (zero,
    /// negative, not a number). Like missing ones, they keep their previous rate.
    pub invalid: Vec<Currency>,
}

impl SyncReport {
    pub fn is_partial(&self) -> bool {
        !self.missing.is_empty() || !self.invalid.is_empty()
    }
}

/// Pulls rates from a provider into an account, for staff only.
pub struct RateSynchronizer<P> {
    staff_secret: String,
    provider: P,
}

impl<P: QuoteProvider> RateSynchronizer<P> {
    pub fn new(staff_secret: impl Into<String>, provider: P) -> Self {
        Self {
            staff_secret: staff_secret.into(),
            provider,
        }
    }

    /// Fetch the latest quotes and install the derived rates in `account`.
    ///
    /// On any error the account keeps its current rates. Otherwise each
    /// supported currency is updated on its own: one that is missing or badly
    /// quoted keeps its previous rate, and the others still get theirs.
    pub fn sync(&self, credential: &str, account: &mut Account) -> Result<SyncReport, SyncError> {
        if credential != self.staff_secret {
            return Err(SyncError::AuthenticationFailed);
        }

        let quotes = self.provider.latest()?;
        let (rates, report) = derive_rates(&account.rates(), &quotes)?;
        account.install_rates(rates);

        tracing::info!("Exchange rates updated successfully.");
        if !report.missing.is_empty() {
            tracing::warn!(missing = ?report.missing, "provider did not quote every supported currency, keeping their previous rates");
        }
        if !report.invalid.is_empty() {
            tracing::warn!(invalid = ?report.invalid, "provider sent unusable quotes, keeping their previous rates");
        }

        tracing::info!("Current Exchange Rates:");
        for line in account.rates_report().lines() {
            tracing::info!("{}", line);
        }

        Ok(report)
    }
}

/// Build the next rate snapshot from the previous one and a set of quotes.
///
/// Quotes are "foreign units per home unit", so the home-per-foreign rate of
/// a currency is `quotes[HOME] / quotes[currency]`. Currencies missing from
/// the quotes, or quoted with an unusable value, keep the rate they have in
/// `previous`. Only a missing or unusable home quote fails the whole derivation.
pub fn derive_rates(previous: &Rates, quotes: &Quotes) -> Result<(Rates, SyncReport), SyncError> {
    let base = quote(quotes, HOME)?
        .ok_or_else(|| SyncError::Provider(format!("no {} rate in response", HOME)))?;

    let mut rates = previous.clone();
    let mut report = SyncReport {
        updated: Vec::new(),
        missing: Vec::new(),
        invalid: Vec::new(),
    };

    for currency in FOREIGN {
        match quote(quotes, currency) {
            Ok(Some(foreign)) => match base.checked_div(foreign) {
                Some(rate) => {
                    rates.set(currency, rate);
                    report.updated.push((currency, rate));
                }
                None => {
                    tracing::debug!(%currency, "rate overflows, skipping");
                    report.invalid.push(currency);
                }
            },
            Ok(None) => report.missing.push(currency),
            Err(err) => {
                tracing::debug!(%currency, "{}", err);
                report.invalid.push(currency);
            }
        }
    }

    Ok((rates, report))
}

// Quotes arrive as floats. Going through their shortest decimal representation
// turns 0.025 into exactly 0.025 rather than its binary approximation.
fn quote(quotes: &Quotes, currency: Currency) -> Result<Option<Decimal>, SyncError> {
    let raw = match quotes.get(currency.code()) {
        Some(raw) => *raw,
        None => return Ok(None),
    };

    let invalid = || SyncError::Provider(format!("invalid {} rate: {}", currency, raw));
    if !raw.is_finite() || raw <= 0.0 {
        return Err(invalid());
    }

    Decimal::from_str(&raw.to_string())
        .map(Some)
        .map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::{derive_rates, RateSynchronizer, SyncReport};
    use crate::ledger::{account::Account, currency::Currency, rates::Rates};
    use crate::sync::{QuoteProvider, Quotes, SyncError};

    use rust_decimal_macros::dec;
    use std::cell::Cell;

    /// Serves a fixed answer and counts how often it was asked.
    struct FixedQuotes {
        answer: Result<Quotes, SyncError>,
        calls: Cell<usize>,
    }

    impl FixedQuotes {
        fn new(answer: Result<Quotes, SyncError>) -> Self {
            Self {
                answer,
                calls: Cell::new(0),
            }
        }

        fn ok(quotes: &[(&str, f64)]) -> Self {
            Self::new(Ok(quotes
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect()))
        }
    }

    impl QuoteProvider for FixedQuotes {
        fn latest(&self) -> Result<Quotes, SyncError> {
            self.calls.set(self.calls.get() + 1);
            self.answer.clone()
        }
    }

    #[test]
    fn test_sync_ok() {
        let provider = FixedQuotes::ok(&[("UAH", 1.0), ("USD", 0.025), ("EUR", 0.023), ("PLN", 0.1)]);
        let synchronizer = RateSynchronizer::new("secret", &provider);
        let mut acc = Account::new(dec!(0)).unwrap();

        let report = synchronizer.sync("secret", &mut acc).expect("sync should succeed");

        assert!(!report.is_partial());
        assert_eq!(3, report.updated.len());
        assert_eq!(Some(dec!(40)), acc.rates().get(Currency::USD));
        assert_eq!(Some(dec!(10)), acc.rates().get(Currency::PLN));
        assert_eq!(
            dec!(43.48),
            acc.rates().get(Currency::EUR).unwrap().round_dp(2)
        );
    }

    #[test]
    fn test_sync_wrong_credential() {
        let provider = FixedQuotes::ok(&[("UAH", 1.0), ("USD", 0.025)]);
        let synchronizer = RateSynchronizer::new("secret", &provider);
        let mut acc = Account::new(dec!(130)).unwrap();
        acc.install_rates(vec![(Currency::USD, dec!(38))].into_iter().collect());

        let got = synchronizer.sync("not the secret", &mut acc);

        assert_eq!(Err(SyncError::AuthenticationFailed), got);
        assert_eq!(0, provider.calls.get());
        assert_eq!(Some(dec!(38)), acc.rates().get(Currency::USD));
        assert_eq!(dec!(130), acc.balance());
    }

    #[test]
    fn test_sync_provider_failure_keeps_rates() {
        for err in vec![
            SyncError::Network("connection refused".to_string()),
            SyncError::Provider("500 Internal Server Error".to_string()),
        ] {
            let provider = FixedQuotes::new(Err(err.clone()));
            let synchronizer = RateSynchronizer::new("secret", &provider);
            let mut acc = Account::new(dec!(0)).unwrap();
            acc.install_rates(vec![(Currency::EUR, dec!(45))].into_iter().collect());

            assert_eq!(Err(err), synchronizer.sync("secret", &mut acc));
            assert_eq!(Some(dec!(45)), acc.rates().get(Currency::EUR));
        }
    }

    #[test]
    fn test_sync_partial_keeps_stale_rates() {
        let provider = FixedQuotes::ok(&[("UAH", 1.0), ("USD", 0.02)]);
        let synchronizer = RateSynchronizer::new("secret", &provider);
        let mut acc = Account::new(dec!(0)).unwrap();
        acc.install_rates(
            vec![(Currency::USD, dec!(40)), (Currency::EUR, dec!(45))]
                .into_iter()
                .collect(),
        );

        let report = synchronizer.sync("secret", &mut acc).unwrap();

        assert_eq!(
            SyncReport {
                updated: vec![(Currency::USD, dec!(50))],
                missing: vec![Currency::EUR, Currency::PLN],
                invalid: vec![],
            },
            report
        );
        assert!(report.is_partial());
        assert_eq!(Some(dec!(50)), acc.rates().get(Currency::USD));
        assert_eq!(Some(dec!(45)), acc.rates().get(Currency::EUR)); // stale
        assert_eq!(None, acc.rates().get(Currency::PLN)); // never synced
    }

    #[test]
    fn test_derive_rates_non_unit_base() {
        // Quotes based on EUR: the home rate is not 1.
        let quotes: Quotes = vec![("UAH".to_string(), 44.0), ("USD".to_string(), 1.1)]
            .into_iter()
            .collect();

        let (rates, _) = derive_rates(&Rates::new(), &quotes).unwrap();
        assert_eq!(Some(dec!(40)), rates.get(Currency::USD));
    }

    #[test]
    fn test_derive_rates_missing_home_quote() {
        let quotes: Quotes = vec![("USD".to_string(), 0.025)].into_iter().collect();

        assert_eq!(
            Err(SyncError::Provider("no UAH rate in response".to_string())),
            derive_rates(&Rates::new(), &quotes)
        );
    }

    #[test]
    fn test_derive_rates_skips_invalid_quotes() {
        for bad in vec![0.0, -0.5, f64::NAN, f64::INFINITY] {
            let quotes: Quotes = vec![
                ("UAH".to_string(), 1.0),
                ("USD".to_string(), 0.025),
                ("EUR".to_string(), bad),
            ]
            .into_iter()
            .collect();
            let previous: Rates = vec![(Currency::EUR, dec!(45))].into_iter().collect();

            let (rates, report) = derive_rates(&previous, &quotes)
                .unwrap_or_else(|err| panic!("{} should only skip EUR: {}", bad, err));

            assert_eq!(Some(dec!(40)), rates.get(Currency::USD));
            assert_eq!(Some(dec!(45)), rates.get(Currency::EUR), "{}", bad);
            assert_eq!(vec![(Currency::USD, dec!(40))], report.updated);
            assert_eq!(vec![Currency::EUR], report.invalid);
            assert_eq!(vec![Currency::PLN], report.missing);
        }
    }

    #[test]
    fn test_derive_rates_invalid_home_quote() {
        for bad in vec![0.0, -1.0, f64::NAN] {
            let quotes: Quotes = vec![("UAH".to_string(), bad), ("USD".to_string(), 0.025)]
                .into_iter()
                .collect();

            assert!(
                matches!(derive_rates(&Rates::new(), &quotes), Err(SyncError::Provider(_))),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_sync_bad_quote_updates_the_others() {
        let provider = FixedQuotes::ok(&[("UAH", 1.0), ("USD", 0.025), ("EUR", 0.0), ("PLN", 0.1)]);
        let synchronizer = RateSynchronizer::new("secret", &provider);
        let mut acc = Account::new(dec!(0)).unwrap();

        let report = synchronizer.sync("secret", &mut acc).unwrap();

        assert!(report.is_partial());
        assert_eq!(Some(dec!(40)), acc.rates().get(Currency::USD));
        assert_eq!(Some(dec!(10)), acc.rates().get(Currency::PLN));
        assert_eq!(None, acc.rates().get(Currency::EUR));
    }

    #[test]
    fn test_derive_rates_ignores_unsupported() {
        let quotes: Quotes = vec![("UAH".to_string(), 1.0), ("GBP".to_string(), 0.02)]
            .into_iter()
            .collect();

        let (rates, report) = derive_rates(&Rates::new(), &quotes).unwrap();
        assert!(rates.is_empty());
        assert!(report.updated.is_empty());
        assert_eq!(3, report.missing.len());
    }
}
