use crate::ledger::{
    currency::Currency,
    transaction::{self, Transaction, TIMESTAMP_FORMAT},
    Amount,
};

use serde::Serialize;

#[derive(Serialize)]
struct HistoryRecord {
    timestamp: String,

    #[serde(rename = "type")]
    tx_type: &'static str,

    amount: Amount,
    currency: Currency,
    original_amount: Option<Amount>,
    original_currency: Option<Currency>,
}

impl HistoryRecord {
    fn new(tx: &Transaction) -> Self {
        Self {
            timestamp: tx.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            tx_type: match tx.tx_type {
                transaction::Type::Deposit => "deposit",
                transaction::Type::Withdrawal => "withdrawal",
            },
            amount: tx.amount,
            currency: tx.currency,
            original_amount: tx.original.map(|(amount, _)| amount),
            original_currency: tx.original.map(|(_, currency)| currency),
        }
    }
}

// Writes the account history to the given stream, oldest entry first.
pub fn write_history(
    output_stream: impl std::io::Write,
    transactions: &[Transaction],
) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_writer(output_stream);

    for tx in transactions {
        writer.serialize(HistoryRecord::new(tx))?;
    }
    writer.flush()?;

    Ok(())
}
