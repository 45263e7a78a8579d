use super::SyncError;

use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// Latest quotes, keyed by ISO currency code, in foreign units per one
/// home-currency unit.
pub type Quotes = HashMap<String, f64>;

/// Where rates come from. The HTTP implementation is the real one; anything
/// returning a fixed table works for tests and offline runs.
pub trait QuoteProvider {
    fn latest(&self) -> Result<Quotes, SyncError>;
}

impl<P: QuoteProvider + ?Sized> QuoteProvider for &P {
    fn latest(&self) -> Result<Quotes, SyncError> {
        (**self).latest()
    }
}

/// Fetches quotes from an exchangeratesapi.io compatible endpoint:
/// `GET <url>?access_key=<key>`, answering `{"rates": {"USD": 0.025, ...}}`.
pub struct HttpQuoteProvider {
    client: reqwest::blocking::Client,
    url: String,
    api_key: String,
}

impl HttpQuoteProvider {
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }
}

impl QuoteProvider for HttpQuoteProvider {
    fn latest(&self) -> Result<Quotes, SyncError> {
        tracing::debug!(url = %self.url, "fetching latest rates");

        let response = self
            .client
            .get(&self.url)
            .query(&[("access_key", &self.api_key)])
            .send()
            .map_err(|err| SyncError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Provider(status.to_string()));
        }

        let body = response
            .text()
            .map_err(|err| SyncError::Network(err.to_string()))?;

        parse_latest(&body)
    }
}

#[derive(Debug, Deserialize)]
struct LatestResponse {
    // Some providers answer 200 with `"success": false` and an error object.
    success: Option<bool>,
    error: Option<serde_json::Value>,
    rates: Option<Quotes>,
}

/// Extract the `rates` object from a provider response body.
pub fn parse_latest(body: &str) -> Result<Quotes, SyncError> {
    let response: LatestResponse =
        serde_json::from_str(body).map_err(|err| SyncError::Provider(err.to_string()))?;

    if response.success == Some(false) {
        let reason = response
            .error
            .map(|err| err.to_string())
            .unwrap_or_else(|| "provider reported a failure".to_string());
        return Err(SyncError::Provider(reason));
    }

    response
        .rates
        .ok_or_else(|| SyncError::Provider("missing `rates` in response".to_string()))
}
