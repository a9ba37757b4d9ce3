//! Line encoding and enrichment for collector-bound records.

use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::log_record::LogRecord;

pub const TIMESTAMP_FIELD: &str = "@timestamp";
pub const VERSION_FIELD: &str = "@version";
pub const RECORD_VERSION: &str = "1";

/// Render `at` as RFC 3339 with exactly nine fractional digits and a `Z`
/// suffix, e.g. `2024-05-01T12:00:00.000000001Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Stamp the reserved collector fields onto `record`.
pub fn enrich_record(record: &mut LogRecord, at: DateTime<Utc>) {
    record.insert(TIMESTAMP_FIELD, format_timestamp(at));
    record.insert(VERSION_FIELD, RECORD_VERSION);
}

/// Encode a record as one compact JSON object terminated by `\n`.
pub fn encode_line(record: &LogRecord) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(256);
    serde_json::to_writer(&mut buf, record).map_err(io::Error::other)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Write every record in order, stopping at the first failure.
pub(crate) fn write_records<'a, W: Write>(
    out: &mut W,
    records: impl IntoIterator<Item = &'a LogRecord>,
) -> io::Result<()> {
    for record in records {
        let line = encode_line(record)?;
        out.write_all(&line)?;
    }
    out.flush()
}
