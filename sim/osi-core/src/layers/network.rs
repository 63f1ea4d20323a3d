//! The network layer, which addresses packets from one host to another.
//!
//! Envelope: source and destination IPv4 addresses followed by the
//! length-prefixed payload.

use super::{
    utility::{expect_end, length_prefix, take_length_prefixed, BytesExt},
    ParseError,
};
use crate::{Layer, LayerError, Payload};
use std::net::Ipv4Addr;
use tracing::info;

/// The address packets are sent from.
pub const SOURCE: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);
/// The address packets are sent to.
pub const DESTINATION: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 2);

/// The number of bytes in the address pair
const ADDRESS_OCTETS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IpHeader {
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
}

impl IpHeader {
    /// Serializes the address pair.
    pub fn to_bytes(self) -> [u8; ADDRESS_OCTETS] {
        let mut out = [0; ADDRESS_OCTETS];
        out[..4].copy_from_slice(&self.source.octets());
        out[4..].copy_from_slice(&self.destination.octets());
        out
    }

    /// Parses the address pair from a byte iterator.
    pub fn from_bytes(mut bytes: impl Iterator<Item = u8>) -> Result<Self, ParseError> {
        const HTS: ParseError = ParseError::HeaderTooShort;
        let source = Ipv4Addr::from(bytes.next_n::<4>().ok_or(HTS)?);
        let destination = Ipv4Addr::from(bytes.next_n::<4>().ok_or(HTS)?);
        Ok(Self {
            source,
            destination,
        })
    }
}

/// The header put on every outgoing packet.
pub const HEADER: IpHeader = IpHeader {
    source: SOURCE,
    destination: DESTINATION,
};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Network;

impl Network {
    pub const NAME: &'static str = "Network";
}

impl Layer for Network {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn encode(&self, mut payload: Payload) -> Result<Payload, LayerError> {
        info!(
            layer = Self::NAME,
            source = %HEADER.source,
            destination = %HEADER.destination,
            "Adding IP header"
        );
        let length = length_prefix(payload.len())
            .ok_or(LayerError::OverlyLongPayload { layer: Self::NAME })?;
        payload.header(length);
        payload.header(HEADER.to_bytes());
        Ok(payload)
    }

    fn decode(&self, payload: Payload) -> Result<Payload, LayerError> {
        let (header, payload) = parse(payload).map_err(LayerError::malformed(Self::NAME))?;
        info!(
            layer = Self::NAME,
            source = %header.source,
            destination = %header.destination,
            "Stripping IP header"
        );
        Ok(payload)
    }
}

fn parse(mut payload: Payload) -> Result<(IpHeader, Payload), ParseError> {
    let header = IpHeader::from_bytes(payload.iter())?;
    if header.destination != DESTINATION {
        Err(ParseError::Address {
            field: "destination",
            expected: DESTINATION.to_string(),
            actual: header.destination.to_string(),
        })?
    }
    payload.remove_front(ADDRESS_OCTETS);
    let body = take_length_prefixed(&mut payload)?;
    expect_end(&payload)?;
    Ok((header, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_address_pair() -> anyhow::Result<()> {
        let encoded = Network.encode(Payload::new("hi"))?;
        assert_eq!(
            encoded.to_vec(),
            [192, 168, 1, 1, 192, 168, 1, 2, 0, 0, 0, 2, b'h', b'i']
        );
        Ok(())
    }

    #[test]
    fn parses_header() -> anyhow::Result<()> {
        let header = IpHeader::from_bytes(HEADER.to_bytes().into_iter())?;
        assert_eq!(header, HEADER);
        Ok(())
    }

    #[test]
    fn rejects_other_destination() {
        let payload = Payload::new([192u8, 168, 1, 1, 10, 0, 0, 1, 0, 0, 0, 0]);
        assert_eq!(
            Network.decode(payload),
            Err(LayerError::MalformedEnvelope {
                layer: Network::NAME,
                source: ParseError::Address {
                    field: "destination",
                    expected: "192.168.1.2".to_string(),
                    actual: "10.0.0.1".to_string(),
                },
            })
        );
    }

    #[test]
    fn rejects_short_header() {
        assert_eq!(
            Network.decode(Payload::new([192u8, 168, 1, 1, 192])),
            Err(LayerError::MalformedEnvelope {
                layer: Network::NAME,
                source: ParseError::HeaderTooShort,
            })
        );
    }
}
