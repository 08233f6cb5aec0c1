//! The byte ring: a mutable byte window shared, in spirit, by both the
//! reader and the writer cores. The reader's variant additionally tracks a
//! `mark` and drives refills from a [`crate::reader`] source; the writer's
//! variant (`OutBuf` below) only ever appends and flushes, so it does not
//! need `tail`/`mark` bookkeeping at all.

use crate::error::{Position, ReaderError, SyntaxError};

/// Reader-side byte window: `buf[head..tail]` holds unconsumed bytes.
///
/// Invariants (enforced by construction, not re-checked per call):
/// `0 <= head <= tail <= buf.len()`; when `mark` is `Some(m)`, `m <= head`
/// and bytes in `[m, head)` are never discarded by a refill.
#[derive(Debug)]
pub(crate) struct ByteRing {
    pub(crate) buf: Vec<u8>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
    pub(crate) mark: Option<usize>,
    /// Cumulative bytes consumed across all refills, for absolute offsets.
    pub(crate) total_consumed: u64,
    pub(crate) line: usize,
    pub(crate) column: usize,
    max_buf_size: usize,
}

impl ByteRing {
    pub(crate) fn new(preferred_buf_size: usize, max_buf_size: usize) -> Self {
        Self {
            buf: vec![0u8; preferred_buf_size.min(max_buf_size).max(64)],
            head: 0,
            tail: 0,
            mark: None,
            total_consumed: 0,
            line: 1,
            column: 1,
            max_buf_size,
        }
    }

    /// Resets the ring to operate over caller-owned bytes (the slice/string
    /// input carriers), with no refill ever possible.
    pub(crate) fn reset_over(&mut self, bytes: &[u8]) {
        self.buf.clear();
        self.buf.extend_from_slice(bytes);
        self.head = 0;
        self.tail = bytes.len();
        self.mark = None;
        self.total_consumed = 0;
        self.line = 1;
        self.column = 1;
    }

    /// Resets bookkeeping for a fresh top-level call that will refill via a
    /// stream; keeps the allocation, truncating the live region to empty.
    pub(crate) fn reset_empty(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.mark = None;
        self.total_consumed = 0;
        self.line = 1;
        self.column = 1;
    }

    #[inline]
    pub(crate) fn current_offset(&self) -> u64 {
        self.total_consumed + self.head as u64
    }

    #[inline]
    pub(crate) fn position(&self) -> Position {
        Position {
            offset: self.current_offset(),
            line: self.line,
            column: self.column,
        }
    }

    #[inline]
    pub(crate) fn remaining(&self) -> &[u8] {
        &self.buf[self.head..self.tail]
    }

    pub(crate) fn set_mark(&mut self) -> Result<(), ReaderError> {
        if self.mark.is_some() {
            return Err(crate::error::PreconditionError::IllegalState(
                "setMark called while a mark is already active",
            )
            .into());
        }
        self.mark = Some(self.head);
        Ok(())
    }

    pub(crate) fn reset_mark(&mut self) -> Result<(), ReaderError> {
        if self.mark.take().is_none() {
            return Err(crate::error::PreconditionError::IllegalState(
                "resetMark called with no active mark",
            )
            .into());
        }
        Ok(())
    }

    pub(crate) fn rollback_to_mark(&mut self) -> Result<(), ReaderError> {
        match self.mark.take() {
            Some(m) => {
                self.head = m;
                Ok(())
            }
            None => Err(crate::error::PreconditionError::IllegalState(
                "rollbackToMark called with no active mark",
            )
            .into()),
        }
    }

    /// Prepares space for a refill of at least one more byte, compacting or
    /// growing as needed. Returns `Err(TooLongInput)` if the ring is already
    /// at `max_buf_size` and still full.
    pub(crate) fn make_room(&mut self) -> Result<(), ReaderError> {
        if self.tail < self.buf.len() {
            return Ok(());
        }

        let offset = self.mark.unwrap_or(self.head);
        if offset > 0 {
            self.buf.copy_within(offset..self.tail, 0);
            self.head -= offset;
            self.tail -= offset;
            if let Some(m) = self.mark.as_mut() {
                *m -= offset;
            }
            self.total_consumed += offset as u64;
            return Ok(());
        }

        if self.buf.len() >= self.max_buf_size {
            return Err(crate::error::ReaderError::syntax(
                SyntaxError::TooLongInput,
                self.position(),
                None,
            ));
        }
        let new_len = (self.buf.len() * 2).min(self.max_buf_size).max(self.buf.len() + 1);
        self.buf.resize(new_len, 0);
        Ok(())
    }

    /// Records bytes pulled into `buf[tail..tail+n]` by the caller.
    pub(crate) fn commit_refill(&mut self, n: usize) {
        self.tail += n;
    }

    /// Advances past one byte, updating line/column. Caller guarantees a
    /// byte is actually present.
    #[inline]
    pub(crate) fn advance(&mut self) -> u8 {
        let b = self.buf[self.head];
        self.head += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        b
    }

    /// Shrinks the backing allocation back towards `preferred` if it grew
    /// larger servicing a big value, called on exit from a top-level call.
    pub(crate) fn reclaim(&mut self, preferred: usize) {
        if self.buf.len() > preferred {
            self.buf.truncate(preferred.max(64));
            self.buf.shrink_to_fit();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compaction_preserves_mark() {
        let mut ring = ByteRing::new(4, 64);
        ring.reset_empty();
        ring.buf = vec![b'a', b'b', b'c', b'd'];
        ring.tail = 4;
        ring.head = 3;
        ring.mark = Some(1);
        ring.make_room().unwrap();
        assert_eq!(ring.head, 2);
        assert_eq!(ring.mark, Some(0));
        assert_eq!(&ring.buf[..ring.tail], b"bcd");
    }

    #[test]
    fn grows_when_compaction_frees_nothing() {
        let mut ring = ByteRing::new(2, 64);
        ring.reset_empty();
        ring.buf = vec![b'a', b'b'];
        ring.tail = 2;
        ring.head = 0;
        ring.make_room().unwrap();
        assert!(ring.buf.len() > 2);
    }

    #[test]
    fn refuses_growth_past_cap() {
        let mut ring = ByteRing::new(2, 2);
        ring.reset_empty();
        ring.buf = vec![b'a', b'b'];
        ring.tail = 2;
        ring.head = 0;
        assert!(ring.make_room().is_err());
    }
}
