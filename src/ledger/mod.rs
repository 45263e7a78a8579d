pub mod account;
pub mod currency;
pub mod rates;
pub mod transaction;

// Named types don't add any compiler help, but they read much better than raw
// decimals: `HashMap<Currency, Rate>` says what it holds, `HashMap<Currency, Decimal>`
// would need a comment.
//
// A decimal library is used instead of f32/f64 so that balances never pick up
// binary rounding noise, and so a conversion lands on the exact product.
pub type Amount = rust_decimal::Decimal;

/// Home-currency units for one unit of a foreign currency.
pub type Rate = rust_decimal::Decimal;

/// Decimal places amounts and rates are shown with. Stored values are never
/// rounded.
pub const DECIMAL_PRECISION: u32 = 4;
