//! Keeps the account's exchange rates in line with a remote quote provider.
//!
//! Provider: fetches the latest quotes, as "foreign units per one home unit".
//! Synchronizer: checks the staff credential, derives "home units per one
//! foreign unit" from the quotes, and installs the new rates in the account.

pub mod provider;
pub mod synchronizer;

pub use provider::{HttpQuoteProvider, QuoteProvider, Quotes};
pub use synchronizer::{RateSynchronizer, SyncReport};

/// Everything that makes a sync fail as a whole.
/// When a sync fails, the account's rates are left exactly as they were.
///
/// A response that just lacks some currencies is not an error: those
/// currencies keep their previous rate, and the `SyncReport` lists them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyncError {
    /// The staff credential doesn't match the configured secret.
    #[error("invalid password")]
    AuthenticationFailed,

    /// The provider couldn't be reached, or the transfer failed midway.
    #[error("network error while syncing currencies: {0}")]
    Network(String),

    /// The provider answered, but not with usable rates.
    #[error("failed to retrieve exchange rates: {0}")]
    Provider(String),
}
