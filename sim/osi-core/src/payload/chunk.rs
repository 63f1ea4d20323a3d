use std::sync::Arc;

/// A shared window onto a byte buffer; one header, trailer, or body inside a
/// [`Payload`](super::Payload).
///
/// Cloning a chunk or splitting it never copies the underlying bytes.
#[derive(Debug, Clone)]
pub struct Chunk {
    bytes: Arc<[u8]>,
    start: usize,
    end: usize,
}

impl Chunk {
    /// Returns a new chunk owning the given bytes.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        let bytes = bytes.into();
        Self {
            start: 0,
            end: bytes.len(),
            bytes,
        }
    }

    /// The visible bytes of the chunk.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[self.start..self.end]
    }

    /// The number of visible bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the chunk has no visible bytes.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Splits off the first `at` bytes into a new chunk that shares the same
    /// buffer. `self` keeps the rest.
    pub(super) fn split_to(&mut self, at: usize) -> Self {
        debug_assert!(at <= self.len());
        let front = Self {
            bytes: self.bytes.clone(),
            start: self.start,
            end: self.start + at,
        };
        self.start += at;
        front
    }

    /// Shortens the chunk to its first `len` bytes.
    pub(super) fn truncate(&mut self, len: usize) {
        debug_assert!(len <= self.len());
        self.end = self.start + len;
    }
}

impl PartialEq for Chunk {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for Chunk {}

impl From<Vec<u8>> for Chunk {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for Chunk {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Chunk {
    fn from(bytes: [u8; N]) -> Self {
        Self::new(bytes.as_slice())
    }
}

impl<const N: usize> From<&[u8; N]> for Chunk {
    fn from(bytes: &[u8; N]) -> Self {
        Self::new(bytes.as_slice())
    }
}

impl From<&str> for Chunk {
    fn from(text: &str) -> Self {
        Self::new(text.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_shares_buffer() {
        let mut chunk = Chunk::from("header");
        let front = chunk.split_to(4);
        assert_eq!(front.as_slice(), b"head");
        assert_eq!(chunk.as_slice(), b"er");
        assert!(Arc::ptr_eq(&front.bytes, &chunk.bytes));
    }

    #[test]
    fn truncate() {
        let mut chunk = Chunk::from("header");
        chunk.truncate(2);
        assert_eq!(chunk.len(), 2);
        assert_eq!(chunk.as_slice(), b"he");
    }
}
