//! The transport layer, which numbers segments.
//!
//! Envelope: a fixed-width `u32` sequence number followed by the
//! length-prefixed payload.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed, BytesExt},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use tracing::info;

/// The sequence number carried by every segment.
pub const SEQUENCE_NUMBER: u32 = 1001;

/// The number of bytes in the sequence number field
pub const SEQUENCE_OCTETS: usize = 4;

/// A TCP-like transport layer. Every segment carries the same sequence number.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transport;

impl Transport {
    pub const NAME: &'static str = "Transport";
}

impl Layer for Transport {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        info!(
            layer = Self::NAME,
            sequence = SEQUENCE_NUMBER,
            "Adding TCP-like sequencing"
        );
        let length = length_prefix(payload.len())
            .ok_or(LayerError::OverlyLongPayload { layer: Self::NAME })?;
        payload.header(length);
        payload.header(SEQUENCE_NUMBER.to_be_bytes());
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let (sequence, payload) = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(layer = Self::NAME, sequence, "Processing TCP-like sequence");
        Ok(payload)
    }
}

fn parse(mut payload: Payload) -> Result<(u32, Payload), ParseError> {
    let sequence = payload
        .iter()
        .next_u32_be()
        .ok_or(ParseError::HeaderTooShort)?;
    if sequence != SEQUENCE_NUMBER {
        Err(ParseError::Sequence {
            expected: SEQUENCE_NUMBER,
            actual: sequence,
        })?
    }
    payload.remove_front(SEQUENCE_OCTETS);
    let body = take_length_prefixed(&mut payload)?;
    expect_end(&payload)?;
    Ok((sequence, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepends_sequence_number() -> anyhow::Result<()> {
        let encoded = Transport.encode(Payload::new("hello"))?;
        let bytes = encoded.to_vec();
        assert_eq!(bytes[..SEQUENCE_OCTETS], 1001u32.to_be_bytes());
        assert_eq!(bytes.len(), SEQUENCE_OCTETS + 4 + 5);
        Ok(())
    }

    #[test]
    fn rejects_missing_sequence_number() -> anyhow::Result<()> {
        let mut encoded = Transport.encode(Payload::new("hello"))?;
        encoded.remove_front(SEQUENCE_OCTETS);
        assert_eq!(
            Transport.decode(encoded),
            Err(LayerError::MalformedEnvelope {
                layer: Transport::NAME,
                source: ParseError::Sequence {
                    expected: SEQUENCE_NUMBER,
                    actual: 5,
                },
            })
        );
        Ok(())
    }

    #[test]
    fn rejects_short_segment() {
        assert_eq!(
            Transport.decode(Payload::new([0u8, 0, 3])),
            Err(LayerError::MalformedEnvelope {
                layer: Transport::NAME,
                source: ParseError::HeaderTooShort,
            })
        );
    }
}
