use std::collections::VecDeque;

use record::LogRecord;

/// Append-only FIFO queue of pending log records.
///
/// The buffer is plain data: mutual exclusion is provided by the logger
/// core's lock, so appending never blocks beyond acquiring that lock and
/// never fails. Ordering is strictly insertion order with no deduplication
/// and no dropping.
#[derive(Debug, Default)]
pub struct RecordBuffer {
    records: VecDeque<LogRecord>,
}

impl RecordBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record at the tail.
    pub fn append(&mut self, record: LogRecord) {
        self.records.push_back(record);
    }

    /// Removes and returns all buffered records in insertion order.
    #[must_use]
    pub fn drain(&mut self) -> Vec<LogRecord> {
        self.records.drain(..).collect()
    }

    /// Restores undelivered records at the head of the queue.
    ///
    /// Used after a partial flush so the retried records keep their position
    /// ahead of anything emitted in the meantime; `records` must be the
    /// undelivered tail in its original order.
    pub fn requeue_front(&mut self, records: Vec<LogRecord>) {
        for record in records.into_iter().rev() {
            self.records.push_front(record);
        }
    }

    /// Returns the number of buffered records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the buffer holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use record::{Level, Origin};

    fn record(message: &str) -> LogRecord {
        LogRecord::new(Level::Info, message, Origin::new(1, "test"))
    }

    fn messages(buffer: &mut RecordBuffer) -> Vec<String> {
        buffer
            .drain()
            .into_iter()
            .map(|record| record.message().to_owned())
            .collect()
    }

    #[test]
    fn drain_returns_records_in_insertion_order() {
        let mut buffer = RecordBuffer::new();
        buffer.append(record("a"));
        buffer.append(record("b"));
        buffer.append(record("c"));

        assert_eq!(messages(&mut buffer), ["a", "b", "c"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn requeue_front_preserves_order_ahead_of_new_appends() {
        let mut buffer = RecordBuffer::new();
        buffer.append(record("late"));
        buffer.requeue_front(vec![record("first"), record("second")]);

        assert_eq!(messages(&mut buffer), ["first", "second", "late"]);
    }

    #[test]
    fn len_tracks_appends_and_drains() {
        let mut buffer = RecordBuffer::new();
        assert_eq!(buffer.len(), 0);
        buffer.append(record("one"));
        buffer.append(record("two"));
        assert_eq!(buffer.len(), 2);
        let _ = buffer.drain();
        assert_eq!(buffer.len(), 0);
    }
}
