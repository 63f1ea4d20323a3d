//! The data link layer, which frames packets for a single hop.
//!
//! Envelope: destination and source MAC addresses, the length-prefixed
//! payload, then a 16 bit frame check sequence computed over everything before
//! it.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed, BytesExt, Checksum},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use std::fmt::{self, Display, Formatter};
use tracing::info;

/// A hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl Display for MacAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

/// The hardware address frames are sent from.
pub const SOURCE: MacAddress = MacAddress([0xAA, 0xBB, 0xCC, 0xD1, 0xD2, 0xD3]);
/// The hardware address frames are sent to.
pub const DESTINATION: MacAddress = MacAddress([0xFF, 0xEE, 0xDD, 0xCC, 0xBB, 0xAA]);

/// The number of bytes in the address pair
const ADDRESS_OCTETS: usize = 12;
/// The number of bytes in the frame check sequence
const FCS_OCTETS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacHeader {
    pub destination: MacAddress,
    pub source: MacAddress,
}

impl MacHeader {
    pub fn to_bytes(self) -> [u8; ADDRESS_OCTETS] {
        let mut out = [0; ADDRESS_OCTETS];
        out[..6].copy_from_slice(&self.destination.0);
        out[6..].copy_from_slice(&self.source.0);
        out
    }

    pub fn from_bytes(mut bytes: impl Iterator<Item = u8>) -> Result<Self, ParseError> {
        const HTS: ParseError = ParseError::HeaderTooShort;
        let destination = MacAddress(bytes.next_n().ok_or(HTS)?);
        let source = MacAddress(bytes.next_n().ok_or(HTS)?);
        Ok(Self {
            destination,
            source,
        })
    }
}

/// The header put on every outgoing frame.
pub const HEADER: MacHeader = MacHeader {
    destination: DESTINATION,
    source: SOURCE,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DataLink;

impl DataLink {
    pub const NAME: &'static str = "Data Link";
}

impl Layer for DataLink {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        info!(
            layer = Self::NAME,
            source = %HEADER.source,
            destination = %HEADER.destination,
            "Framing data with MAC header"
        );
        let length = length_prefix(payload.len())
            .ok_or(LayerError::OverlyLongPayload { layer: Self::NAME })?;
        payload.header(length);
        payload.header(HEADER.to_bytes());
        let mut fcs = Checksum::new();
        fcs.accumulate_remainder(payload.iter());
        payload.trailer(fcs.as_u16().to_be_bytes());
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let (header, payload) = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(
            layer = Self::NAME,
            source = %header.source,
            destination = %header.destination,
            "Unframing data with MAC header"
        );
        Ok(payload)
    }
}

fn parse(mut frame: Payload) -> Result<(MacHeader, Payload), ParseError> {
    if frame.len() < ADDRESS_OCTETS + FCS_OCTETS {
        Err(ParseError::HeaderTooShort)?
    }
    let covered = frame.len() - FCS_OCTETS;
    let expected = frame
        .iter()
        .skip(covered)
        .next_u16_be()
        .ok_or(ParseError::HeaderTooShort)?;
    let mut fcs = Checksum::new();
    fcs.accumulate_remainder(frame.iter().take(covered));
    let actual = fcs.as_u16();
    if actual != expected {
        Err(ParseError::Checksum { actual, expected })?
    }
    frame.remove_back(FCS_OCTETS);

    let header = MacHeader::from_bytes(frame.iter())?;
    if header.destination != DESTINATION {
        Err(ParseError::Address {
            field: "destination",
            expected: DESTINATION.to_string(),
            actual: header.destination.to_string(),
        })?
    }
    frame.remove_front(ADDRESS_OCTETS);
    let body = take_length_prefixed(&mut frame)?;
    expect_end(&frame)?;
    Ok((header, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_mac_address() {
        assert_eq!(SOURCE.to_string(), "AA:BB:CC:D1:D2:D3");
        assert_eq!(DESTINATION.to_string(), "FF:EE:DD:CC:BB:AA");
    }

    #[test]
    fn frame_layout() -> anyhow::Result<()> {
        let frame = DataLink.encode(Payload::new("hi"))?.to_vec();
        assert_eq!(frame.len(), ADDRESS_OCTETS + 4 + 2 + FCS_OCTETS);
        assert_eq!(frame[..6], DESTINATION.0);
        assert_eq!(frame[6..12], SOURCE.0);
        assert_eq!(frame[12..16], [0u8, 0, 0, 2]);
        assert_eq!(&frame[16..18], b"hi");
        Ok(())
    }

    #[test]
    fn rejects_other_destination() -> anyhow::Result<()> {
        let mut frame = Payload::new([0u8, 0, 0, 0]);
        frame.header(MacHeader {
            destination: MacAddress([0x01, 0x02, 0x03, 0x04, 0x05, 0x06]),
            source: SOURCE,
        }
        .to_bytes());
        let mut fcs = Checksum::new();
        fcs.accumulate_remainder(frame.iter());
        frame.trailer(fcs.as_u16().to_be_bytes());

        let err = DataLink.decode(frame).unwrap_err();
        assert!(matches!(
            err,
            LayerError::MalformedEnvelope {
                source: ParseError::Address { .. },
                ..
            }
        ));
        Ok(())
    }

    #[cfg(feature = "compute_checksum")]
    #[test]
    fn rejects_corrupted_frame() -> anyhow::Result<()> {
        let frame = DataLink.encode(Payload::new("hello"))?;
        let mut bytes = frame.to_vec();
        bytes[17] ^= 0x20;
        let err = DataLink.decode(Payload::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            LayerError::MalformedEnvelope {
                source: ParseError::Checksum { .. },
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn rejects_short_frame() {
        assert_eq!(
            DataLink.decode(Payload::new([0xFFu8, 0xEE, 0xDD])),
            Err(LayerError::MalformedEnvelope {
                layer: DataLink::NAME,
                source: ParseError::HeaderTooShort,
            })
        );
    }
}
