//! The byte container passed between layers.
//!
//! This module primarily implements the [`Payload`] collection.

use std::{
    collections::VecDeque,
    fmt::{self, Display, Formatter},
};

mod chunk;
pub use chunk::Chunk;

mod payload_bytes;
pub use payload_bytes::PayloadBytes;

/// An encoded payload, built up from shared byte chunks.
///
/// Encapsulating a message mostly means putting a header in front of whatever
/// the layer above produced, and decapsulating it means taking that header off
/// again. A payload keeps every header and trailer as its own [`Chunk`], so
/// neither direction copies the bytes that are already inside.
///
/// Empty chunks are never stored.
#[derive(Debug, Clone, Default)]
pub struct Payload {
    chunks: VecDeque<Chunk>,
    len: usize,
}

impl Payload {
    /// Creates a payload holding the given body.
    ///
    /// # Examples
    ///
    /// ```
    /// # use osi_core::Payload;
    /// let payload = Payload::new("hello");
    /// assert_eq!(payload.len(), 5);
    /// ```
    pub fn new(body: impl Into<Chunk>) -> Self {
        let mut payload = Self::default();
        payload.trailer(body);
        payload
    }

    /// Puts `header` in front of the payload.
    ///
    /// # Examples
    ///
    /// ```
    /// # use osi_core::Payload;
    /// let mut payload = Payload::new("body");
    /// payload.header("head:");
    /// assert_eq!(payload.to_vec(), b"head:body");
    /// ```
    pub fn header(&mut self, header: impl Into<Chunk>) {
        let header = header.into();
        if header.is_empty() {
            return;
        }
        self.len += header.len();
        self.chunks.push_front(header);
    }

    /// Puts `trailer` after the end of the payload.
    pub fn trailer(&mut self, trailer: impl Into<Chunk>) {
        let trailer = trailer.into();
        if trailer.is_empty() {
            return;
        }
        self.len += trailer.len();
        self.chunks.push_back(trailer);
    }

    /// Removes the first `len` bytes and returns them as a new payload.
    ///
    /// Panics if `len` is greater than the length of the payload.
    pub fn cut(&mut self, len: usize) -> Self {
        assert!(len <= self.len, "cut {len} bytes from a {} byte payload", self.len);
        let mut front = VecDeque::new();
        let mut remaining = len;
        while remaining > 0 {
            let Some(mut head) = self.chunks.pop_front() else {
                break;
            };
            if head.len() <= remaining {
                remaining -= head.len();
                front.push_back(head);
            } else {
                front.push_back(head.split_to(remaining));
                self.chunks.push_front(head);
                remaining = 0;
            }
        }
        self.len -= len;
        Self { chunks: front, len }
    }

    /// Discards the first `len` bytes.
    ///
    /// Panics if `len` is greater than the length of the payload.
    pub fn remove_front(&mut self, len: usize) {
        self.cut(len);
    }

    /// Discards the last `len` bytes.
    ///
    /// Panics if `len` is greater than the length of the payload.
    pub fn remove_back(&mut self, len: usize) {
        assert!(len <= self.len, "removed {len} bytes from a {} byte payload", self.len);
        self.len -= len;
        let mut remaining = len;
        while remaining > 0 {
            let Some(tail) = self.chunks.back_mut() else {
                break;
            };
            let tail_len = tail.len();
            if tail_len <= remaining {
                remaining -= tail_len;
                self.chunks.pop_back();
            } else {
                tail.truncate(tail_len - remaining);
                remaining = 0;
            }
        }
    }

    /// The number of bytes in the payload.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the payload contains no bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an iterator over every byte of the payload.
    pub fn iter(&self) -> PayloadBytes<'_> {
        PayloadBytes::new(&self.chunks)
    }

    /// Copies the payload into a contiguous vector.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len);
        for chunk in self.chunks.iter() {
            out.extend_from_slice(chunk.as_slice());
        }
        out
    }
}

impl Display for Payload {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Payload {}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::new(bytes)
    }
}

impl From<&[u8]> for Payload {
    fn from(bytes: &[u8]) -> Self {
        Payload::new(bytes)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::new(text)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::new(text.into_bytes())
    }
}
