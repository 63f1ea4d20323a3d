//! The presentation layer, which records how the payload is represented.
//!
//! Envelope: one encoding tag byte followed by the length-prefixed payload.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed, BytesExt},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use tracing::info;

/// How the bytes of a payload should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    /// Arbitrary bytes
    Binary,
    /// UTF-8 text
    Text,
}

impl Encoding {
    /// Picks the most specific encoding that describes `payload`.
    pub fn detect(payload: &Payload) -> Self {
        match std::str::from_utf8(&payload.to_vec()) {
            Ok(_) => Encoding::Text,
            Err(_) => Encoding::Binary,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            Encoding::Binary => 0x00,
            Encoding::Text => 0x01,
        }
    }

    pub fn from_tag(tag: u8) -> Result<Self, ParseError> {
        match tag {
            0x00 => Ok(Encoding::Binary),
            0x01 => Ok(Encoding::Text),
            other => Err(ParseError::UnknownEncoding(other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Presentation;

impl Presentation {
    pub const NAME: &'static str = "Presentation";
}

impl Layer for Presentation {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        let encoding = Encoding::detect(&payload);
        info!(layer = Self::NAME, ?encoding, "Encoding data");
        let length = length_prefix(payload.len())
            .ok_or(LayerError::OverlyLongPayload { layer: Self::NAME })?;
        payload.header(length);
        payload.header([encoding.tag()]);
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let (encoding, payload) = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(layer = Self::NAME, ?encoding, "Decoding data");
        Ok(payload)
    }
}

fn parse(mut payload: Payload) -> Result<(Encoding, Payload), ParseError> {
    let tag = payload.iter().next_u8().ok_or(ParseError::HeaderTooShort)?;
    let encoding = Encoding::from_tag(tag)?;
    payload.remove_front(1);
    let body = take_length_prefixed(&mut payload)?;
    expect_end(&payload)?;
    if encoding == Encoding::Text && std::str::from_utf8(&body.to_vec()).is_err() {
        Err(ParseError::InvalidUtf8)?
    }
    Ok((encoding, body))
}
