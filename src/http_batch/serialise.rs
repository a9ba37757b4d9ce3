//! Request body encoding for batch ingestion APIs.

use serde::Serialize;

use crate::log_record::LogRecord;

#[derive(Serialize)]
struct Envelope<'a> {
    logs: Vec<&'a LogRecord>,
}

/// Encode `records` as `{"logs":[...]}`.
///
/// Records are embedded verbatim and in order; no fields are added.
pub fn encode_batch<'a>(
    records: impl IntoIterator<Item = &'a LogRecord>,
) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(&Envelope {
        logs: records.into_iter().collect(),
    })
}
