use spdy_sans_io::SpdyDecoder;

use crate::support::RecordingSink;

#[test]
fn unknown_control_type_produces_no_events() {
    let mut frame = vec![0x80, 0x03, 0x00, 0x05, 0xFF, 0x00, 0x00, 0x08];
    frame.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&frame);

    assert!(decoder.sink().events.is_empty());
}

#[test]
fn unknown_control_type_discards_exact_declared_length() {
    let header = [0x80, 0x03, 0x00, 0x05, 0xFF, 0x00, 0x00, 0x08];
    let payload = [1u8, 2, 3, 4, 5, 6, 7, 8];
    let mut trailing = vec![0x80, 0x03, 0x00, 0x06, 0x00, 0x00, 0x00, 0x04];
    trailing.extend_from_slice(&9u32.to_be_bytes());

    let mut frame = header.to_vec();
    frame.extend_from_slice(&payload);
    frame.extend_from_slice(&trailing);

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&frame);

    // The unknown frame's 8 bytes were fully discarded; the following
    // PING frame must still be decoded correctly, proving no desync.
    assert_eq!(
        decoder.sink().events,
        vec![crate::support::Event::Ping { id: 9 }]
    );
}

#[test]
fn unknown_type_with_progressive_delivery_still_emits_nothing() {
    let header = [0x80, 0x03, 0x00, 0x05, 0xFF, 0x00, 0x00, 0x08];

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&header);
    decoder.decode(&[0u8; 4]);
    decoder.decode(&[0u8; 4]);

    assert!(decoder.sink().events.is_empty());
}

#[test]
fn unused_noop_type_is_treated_like_any_other_unknown_type() {
    let mut frame = vec![0x80, 0x03, 0x00, 0x05, 0x00, 0x00, 0x00, 0x02];
    frame.extend_from_slice(&[0xAA, 0xBB]);

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&frame);

    assert!(decoder.sink().events.is_empty());
}
