use osi_core::{
    layers::{
        osi_layers, transport::SEQUENCE_OCTETS, DataLink, Network, ParseError, Physical, Session,
        Transport,
    },
    Layer, LayerError, Payload, Stack, StackError,
};

fn malformed(err: &LayerError) -> Option<&ParseError> {
    match err {
        LayerError::MalformedEnvelope { source, .. } => Some(source),
        _ => None,
    }
}

#[test]
fn transport_without_sequence_prefix() -> anyhow::Result<()> {
    let mut segment = Transport.encode(Payload::new("hello"))?;
    segment.remove_front(SEQUENCE_OCTETS);
    let err = Transport.decode(segment).unwrap_err();
    assert_eq!(err.layer(), Transport::NAME);
    assert!(matches!(malformed(&err), Some(ParseError::Sequence { .. })));
    Ok(())
}

#[test]
fn transport_prefix_only() -> anyhow::Result<()> {
    let segment = Payload::new(1001u32.to_be_bytes());
    let err = Transport.decode(segment).unwrap_err();
    assert_eq!(malformed(&err), Some(&ParseError::HeaderTooShort));
    Ok(())
}

#[test]
fn every_truncation_is_rejected() -> anyhow::Result<()> {
    for layer in osi_layers() {
        let envelope = layer.encode(Payload::new("hello"))?;
        for keep in 0..envelope.len() {
            let mut truncated = envelope.clone();
            truncated.remove_back(envelope.len() - keep);
            let err = layer.decode(truncated).unwrap_err();
            assert_eq!(err.layer(), layer.name());
            assert!(
                malformed(&err).is_some(),
                "{} kept {keep} bytes: {err}",
                layer.name()
            );
        }
    }
    Ok(())
}

#[test]
fn appended_bytes_are_rejected() -> anyhow::Result<()> {
    for layer in [
        Box::new(Session) as Box<dyn Layer>,
        Box::new(Transport),
        Box::new(Network),
        Box::new(Physical),
    ] {
        let mut envelope = layer.encode(Payload::new("hello"))?;
        envelope.trailer("!");
        let err = layer.decode(envelope).unwrap_err();
        assert_eq!(
            malformed(&err),
            Some(&ParseError::TrailingBytes(1)),
            "{}",
            layer.name()
        );
    }
    Ok(())
}

#[test]
fn data_link_trailer_is_checked() -> anyhow::Result<()> {
    let mut frame = DataLink.encode(Payload::new("hello"))?;
    frame.trailer([0x12u8, 0x34]);
    let err = DataLink.decode(frame).unwrap_err();
    assert!(malformed(&err).is_some());
    Ok(())
}

#[test]
fn corruption_aborts_the_whole_run() -> anyhow::Result<()> {
    let stack = Stack::osi();
    let frame = stack.send("hello")?;
    let mut bytes = frame.to_vec();
    // Physical sync and length, then data link addresses and length, then the
    // network source address
    let destination = 12 + 16 + 4;
    bytes[destination..destination + 4].copy_from_slice(&[10, 0, 0, 1]);
    let err = match stack.receive(Payload::new(bytes)) {
        Err(StackError::Layer(err)) => err,
        other => panic!("expected a layer error, got {other:?}"),
    };
    // Without a computed frame check sequence the network layer is the first
    // to notice.
    if cfg!(feature = "compute_checksum") {
        assert_eq!(err.layer(), DataLink::NAME);
    } else {
        assert_eq!(err.layer(), Network::NAME);
    }
    Ok(())
}
