use crate::input::Error;

use std::{sync::mpsc::Receiver, thread::JoinHandle};

// Malformed script rows don't stop a replay: each one is logged, and the
// replay moves on to the next row. The handle yields how many were seen, so
// callers can tell a clean script from a partially applied one.
pub fn report(input_errors: Receiver<Error>) -> JoinHandle<usize> {
    std::thread::spawn(move || {
        let mut count = 0;
        for err in input_errors {
            match err {
                Error::Csv(msg) => tracing::warn!("failed to read record: {}", msg),
                Error::Format(msg) => tracing::warn!("invalid operation: {}", msg),
            }
            count += 1;
        }
        count
    })
}
