//! Contains utilities for building and parsing envelopes.

use super::ParseError;
use crate::Payload;

/// The number of bytes in a length prefix.
pub const LENGTH_OCTETS: usize = 4;

/// A calculator for the Internet checksum, used here as a frame check
/// sequence.
///
/// Without the `compute_checksum` feature every checksum is zero.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Checksum(u16);

impl Checksum {
    /// Creates a new checksum calculator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `u16` to the checksum value.
    #[cfg(feature = "compute_checksum")]
    pub fn add_u16(&mut self, value: u16) {
        let (sum, carry) = self.0.overflowing_add(value);
        self.0 = sum + carry as u16;
    }

    #[cfg(not(feature = "compute_checksum"))]
    pub fn add_u16(&mut self, _value: u16) {}

    /// Adds the `u16` formed by two `u8`s to the checksum value.
    pub fn add_u8(&mut self, a: u8, b: u8) {
        self.add_u16(u16::from_be_bytes([a, b]));
    }

    /// Adds every byte of `bytes`, two at a time. An odd trailing byte is
    /// padded with zero.
    pub fn accumulate_remainder(&mut self, mut bytes: impl Iterator<Item = u8>) {
        while let Some(a) = bytes.next() {
            self.add_u8(a, bytes.next().unwrap_or(0));
        }
    }

    /// Computes the final checksum value.
    #[cfg(feature = "compute_checksum")]
    pub fn as_u16(&self) -> u16 {
        match self.0 {
            // Both one's complement zeros are possible; keep the nonzero one so
            // that a computed checksum is never confused with an unused one.
            0xffff => 0xffff,
            sum => !sum,
        }
    }

    #[cfg(not(feature = "compute_checksum"))]
    pub fn as_u16(&self) -> u16 {
        0
    }
}

/// An extension trait for `Iterator<Item = u8>` that reads big-endian fields.
pub trait BytesExt: Iterator<Item = u8> {
    /// Functions identically to `Iterator<Item = u8>::next`.
    fn next_u8(&mut self) -> Option<u8> {
        self.next()
    }

    /// Combines the next 2 bytes in big-endian order into a `u16`.
    fn next_u16_be(&mut self) -> Option<u16> {
        self.next_n().map(u16::from_be_bytes)
    }

    /// Combines the next 4 bytes in big-endian order into a `u32`.
    fn next_u32_be(&mut self) -> Option<u32> {
        self.next_n().map(u32::from_be_bytes)
    }

    /// Collects the next `N` bytes into an array, or returns `None` if fewer
    /// than `N` remain.
    fn next_n<const N: usize>(&mut self) -> Option<[u8; N]> {
        let mut result = [0; N];
        for element in &mut result {
            *element = self.next()?;
        }
        Some(result)
    }
}

impl<T: Iterator<Item = u8>> BytesExt for T {}

/// Builds the length field that precedes a payload of `len` bytes. Returns
/// `None` if `len` does not fit.
pub fn length_prefix(len: usize) -> Option<[u8; LENGTH_OCTETS]> {
    u32::try_from(len).ok().map(u32::to_be_bytes)
}

/// Removes a length field and the bytes it covers from the front of
/// `payload`, returning those bytes.
pub fn take_length_prefixed(payload: &mut Payload) -> Result<Payload, ParseError> {
    let len = payload
        .iter()
        .next_u32_be()
        .ok_or(ParseError::HeaderTooShort)? as usize;
    payload.remove_front(LENGTH_OCTETS);
    if payload.len() < len {
        Err(ParseError::PayloadTooShort {
            expected: len,
            actual: payload.len(),
        })?
    }
    Ok(payload.cut(len))
}

/// Fails if anything is left over after an envelope has been parsed.
pub fn expect_end(payload: &Payload) -> Result<(), ParseError> {
    match payload.len() {
        0 => Ok(()),
        extra => Err(ParseError::TrailingBytes(extra)),
    }
}
