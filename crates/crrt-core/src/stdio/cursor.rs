//! Bounded write cursor over a caller-owned byte buffer.

/// Single-writer cursor that advances monotonically through `buf`.
///
/// The last byte of the buffer is reserved for the NUL terminator, so at most
/// `buf.len() - 1` content bytes are stored. Bytes pushed past that limit are
/// dropped but still counted in [`required`](Self::required), which lets the
/// interpreter report how large the buffer would have had to be.
#[derive(Debug)]
pub struct OutputCursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
    required: usize,
}

impl<'a> OutputCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            required: 0,
        }
    }

    /// Maximum number of content bytes (capacity minus the terminator slot).
    #[must_use]
    pub fn limit(&self) -> usize {
        self.buf.len().saturating_sub(1)
    }

    /// Total capacity of the underlying buffer, terminator slot included.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes actually stored so far.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes the output needs so far, including any that were dropped.
    #[must_use]
    pub fn required(&self) -> usize {
        self.required
    }

    /// True once at least one byte has been dropped.
    #[must_use]
    pub fn overflowed(&self) -> bool {
        self.required > self.pos
    }

    /// Append one byte, dropping it if the buffer is full.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.required += 1;
        if self.pos < self.limit() {
            self.buf[self.pos] = byte;
            self.pos += 1;
        }
    }

    /// Append a run of bytes.
    pub fn extend(&mut self, bytes: &[u8]) {
        let room = self.limit() - self.pos;
        let take = bytes.len().min(room);
        self.buf[self.pos..self.pos + take].copy_from_slice(&bytes[..take]);
        self.pos += take;
        self.required += bytes.len();
    }

    /// Write the NUL terminator at the cursor. Does not advance.
    ///
    /// Returns false only for a zero-capacity buffer, where no terminator fits.
    pub fn terminate(&mut self) -> bool {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = 0;
                true
            }
            None => false,
        }
    }

    /// The bytes written so far (without terminator).
    #[must_use]
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}
