//! The physical layer, which turns frames into the raw bits put on the
//! medium.
//!
//! Envelope: a seven byte preamble, the start frame delimiter, then the
//! length-prefixed frame.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed, BytesExt},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use tracing::info;

/// Alternating bits that let a receiver synchronize its clock.
pub const PREAMBLE: [u8; 7] = [0x55; 7];
/// Marks the end of the preamble.
pub const START_FRAME_DELIMITER: u8 = 0xD5;

const SYNC_OCTETS: usize = PREAMBLE.len() + 1;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Physical;

impl Physical {
    pub const NAME: &'static str = "Physical";
}

impl Layer for Physical {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        info!(layer = Self::NAME, bytes = payload.len(), "Sending raw bits");
        let length = length_prefix(payload.len())
            .ok_or(LayerError::OverlyLongPayload { layer: Self::NAME })?;
        payload.header(length);
        payload.header([START_FRAME_DELIMITER]);
        payload.header(PREAMBLE);
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let payload = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(layer = Self::NAME, bytes = payload.len(), "Receiving raw bits");
        Ok(payload)
    }
}

fn parse(mut bits: Payload) -> Result<Payload, ParseError> {
    let mut bytes = bits.iter();
    let preamble = bytes.next_n::<7>().ok_or(ParseError::HeaderTooShort)?;
    let delimiter = bytes.next_u8().ok_or(ParseError::HeaderTooShort)?;
    if preamble != PREAMBLE || delimiter != START_FRAME_DELIMITER {
        Err(ParseError::Preamble)?
    }
    bits.remove_front(SYNC_OCTETS);
    let frame = take_length_prefixed(&mut bits)?;
    expect_end(&bits)?;
    Ok(frame)
}
