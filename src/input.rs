use crate::ledger::{
    currency::{Currency, HOME},
    Amount,
};
use crate::run::Operation;

use serde::Deserialize;
use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Debug, PartialEq)]
pub enum Error {
    Csv(String),    // CSV is malformed
    Format(String), // Data format is incorrect
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<<OperationRecord as TryInto<Operation>>::Error> for Error {
    fn from(err: <OperationRecord as TryInto<Operation>>::Error) -> Self {
        Self::Format(err)
    }
}

// A malformed row is reported and skipped: the rows around it are still
// valid operations on the account, and the account itself rejects anything
// that doesn't make sense for its current state.
pub fn parse(
    input_stream: (impl std::io::Read + Send + 'static),
) -> (Receiver<Operation>, Receiver<Error>) {
    let (operation_tx, operation_rx): (Sender<Operation>, Receiver<Operation>) =
        mpsc::channel();
    let (error_tx, error_rx): (Sender<Error>, Receiver<Error>) = mpsc::channel();

    let buffered = std::io::BufReader::new(input_stream);
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(buffered);

    // Reading happens on its own thread, so operations can be applied as soon as they're parsed.
    std::thread::spawn(move || {
        for record in reader.deserialize::<OperationRecord>() {
            // Sending only fails once the receiving side is gone, and then
            // there is nobody left to read what's parsed anyway.
            let sent = match convert(record) {
                Ok(operation) => operation_tx.send(operation).is_ok(),
                Err(err) => error_tx.send(err).is_ok(),
            };
            if !sent {
                break;
            }
        }
    });

    (operation_rx, error_rx)
}

// Convert from a csv deserialise result into an operation result.
fn convert(record: Result<OperationRecord, csv::Error>) -> Result<Operation, Error> {
    Ok(record?.try_into()?)
}

// The CSV layout is kept separate from `Operation`: rows are flat, with
// optional columns, while operations only carry what they need.
#[derive(Debug, Deserialize)]
pub struct OperationRecord {
    op: OperationRecordType,
    amount: Option<Amount>,
    currency: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationRecordType {
    Deposit,
    Withdrawal,
    Exchange,
    Sync,
}

impl TryFrom<OperationRecord> for Operation {
    type Error = String;
    fn try_from(record: OperationRecord) -> Result<Self, Self::Error> {
        let operation = match record.op {
            OperationRecordType::Deposit => Operation::Deposit(match record.amount {
                Some(amount) => amount,
                None => return Err("missing amount for deposit".to_string()),
            }),
            OperationRecordType::Withdrawal => {
                let amount = match record.amount {
                    Some(amount) => amount,
                    None => return Err("missing amount for withdrawal".to_string()),
                };
                let currency = match record.currency {
                    Some(code) => code.parse::<Currency>().map_err(|err| err.to_string())?,
                    None => HOME,
                };
                Operation::Withdrawal(amount, currency)
            }
            OperationRecordType::Exchange => {
                let amount = match record.amount {
                    Some(amount) => amount,
                    None => return Err("missing amount for exchange".to_string()),
                };
                match record.currency {
                    Some(code) => Operation::Exchange(code, amount),
                    None => return Err("missing currency for exchange".to_string()),
                }
            }
            OperationRecordType::Sync => Operation::Sync,
        };

        Ok(operation)
    }
}
