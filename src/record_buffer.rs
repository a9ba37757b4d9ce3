//! Bounded FIFO of records awaiting delivery.
//!
//! Records leave the buffer only in two ways: a transport clears it after a
//! fully successful flush, or the bound is hit and the oldest record is
//! evicted to make room.

use std::collections::VecDeque;

use crate::log_record::LogRecord;

/// Default number of records that triggers an automatic flush.
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Default upper bound on records held while a backend is unavailable.
pub const DEFAULT_MAX_BUFFERED: usize = 10_000;

#[derive(Clone, Debug)]
pub struct RecordBuffer {
    records: VecDeque<LogRecord>,
    batch_size: usize,
    max_buffered: usize,
    evicted: u64,
}

impl RecordBuffer {
    /// Create a buffer flushing at `batch_size` and holding at most
    /// `max_buffered` records.
    ///
    /// Both values are clamped to at least one, and `max_buffered` to at least
    /// `batch_size`, so a batch can always be assembled.
    pub fn new(batch_size: usize, max_buffered: usize) -> Self {
        let batch_size = batch_size.max(1);
        let max_buffered = max_buffered.max(batch_size);
        Self {
            records: VecDeque::with_capacity(batch_size),
            batch_size,
            max_buffered,
            evicted: 0,
        }
    }

    /// Append a record, returning the evicted record when the bound was hit.
    pub fn push(&mut self, record: LogRecord) -> Option<LogRecord> {
        let evicted = if self.records.len() >= self.max_buffered {
            self.evicted += 1;
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    /// Whether the buffer holds enough records to warrant a flush.
    pub fn is_due(&self) -> bool {
        self.records.len() >= self.batch_size
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop every record after a successful delivery.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogRecord> {
        self.records.iter()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn max_buffered(&self) -> usize {
        self.max_buffered
    }

    /// Total number of records evicted over the buffer's lifetime.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }
}

impl Default for RecordBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_MAX_BUFFERED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    fn record(seq: usize) -> LogRecord {
        let serde_json::Value::Object(fields) = json!({ "seq": seq }) else {
            unreachable!("json! object literal");
        };
        LogRecord::from_fields(fields)
    }

    fn seqs(buffer: &RecordBuffer) -> Vec<u64> {
        buffer
            .iter()
            .map(|r| r.get("seq").and_then(|v| v.as_u64()).expect("seq field"))
            .collect()
    }

    #[rstest]
    fn becomes_due_at_batch_size() {
        let mut buffer = RecordBuffer::new(3, 10);
        buffer.push(record(0));
        buffer.push(record(1));
        assert!(!buffer.is_due());
        buffer.push(record(2));
        assert!(buffer.is_due());
    }

    #[rstest]
    fn clear_empties_buffer() {
        let mut buffer = RecordBuffer::new(2, 4);
        buffer.push(record(0));
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.evicted(), 0);
    }

    #[rstest]
    #[case(0, 0, 1, 1)]
    #[case(5, 2, 5, 5)]
    #[case(5, 50, 5, 50)]
    fn clamps_limits(
        #[case] batch: usize,
        #[case] max: usize,
        #[case] expected_batch: usize,
        #[case] expected_max: usize,
    ) {
        let buffer = RecordBuffer::new(batch, max);
        assert_eq!(buffer.batch_size(), expected_batch);
        assert_eq!(buffer.max_buffered(), expected_max);
    }

    #[rstest]
    fn evicts_oldest_when_full() {
        let mut buffer = RecordBuffer::new(2, 3);
        for seq in 0..3 {
            assert!(buffer.push(record(seq)).is_none());
        }
        let evicted = buffer.push(record(3)).expect("oldest record evicted");
        assert_eq!(evicted.get("seq").and_then(|v| v.as_u64()), Some(0));
        assert_eq!(seqs(&buffer), vec![1, 2, 3]);
        assert_eq!(buffer.evicted(), 1);
    }

    proptest! {
        #[test]
        fn keeps_newest_records_in_order(max in 1usize..40, extra in 0usize..40) {
            let mut buffer = RecordBuffer::new(1, max);
            let total = max + extra;
            for seq in 0..total {
                buffer.push(record(seq));
            }
            let expected: Vec<u64> = (extra..total).map(|s| s as u64).collect();
            prop_assert_eq!(seqs(&buffer), expected);
            prop_assert_eq!(buffer.evicted(), extra as u64);
        }
    }
}
