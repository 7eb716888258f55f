//! Decoding a concatenation of N valid frames must produce the same event
//! sequence as decoding each frame individually, and must consume the
//! entire input buffer regardless of how many frames it contains.

use spdy_sans_io::SpdyDecoder;

use crate::support::{Event, RecordingSink};

fn ping_frame(id: u32) -> Vec<u8> {
    let mut frame = vec![0x80, 0x03, 0x00, 0x06, 0x00, 0x00, 0x00, 0x04];
    frame.extend_from_slice(&id.to_be_bytes());
    frame
}

fn goaway_frame(last_good_stream_id: u32, status_code: u32) -> Vec<u8> {
    let mut frame = vec![0x80, 0x03, 0x00, 0x07, 0x00, 0x00, 0x00, 0x08];
    frame.extend_from_slice(&last_good_stream_id.to_be_bytes());
    frame.extend_from_slice(&status_code.to_be_bytes());
    frame
}

fn data_frame(stream_id: u32, fin: bool, payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(8 + payload.len());
    frame.extend_from_slice(&(stream_id & 0x7FFF_FFFF).to_be_bytes());
    let flags = if fin { 0x01 } else { 0x00 };
    let length = payload.len() as u32;
    frame.push(flags);
    frame.push((length >> 16) as u8);
    frame.push((length >> 8) as u8);
    frame.push(length as u8);
    frame.extend_from_slice(payload);
    frame
}

#[test]
fn three_pings_back_to_back_match_three_separate_calls() {
    let mut concatenated = Vec::new();
    for id in [1u32, 2, 3] {
        concatenated.extend_from_slice(&ping_frame(id));
    }

    let mut together = SpdyDecoder::new(3, RecordingSink::default());
    together.decode(&concatenated);

    let mut separate = SpdyDecoder::new(3, RecordingSink::default());
    for id in [1u32, 2, 3] {
        separate.decode(&ping_frame(id));
    }

    assert_eq!(
        together.sink().events,
        vec![
            Event::Ping { id: 1 },
            Event::Ping { id: 2 },
            Event::Ping { id: 3 },
        ]
    );
    assert_eq!(together.sink().events, separate.sink().events);
}

#[test]
fn mixed_control_and_data_frames_are_each_fully_decoded() {
    let mut concatenated = Vec::new();
    concatenated.extend_from_slice(&data_frame(1, false, b"hello "));
    concatenated.extend_from_slice(&ping_frame(42));
    concatenated.extend_from_slice(&data_frame(1, true, b"world"));
    concatenated.extend_from_slice(&goaway_frame(1, 0));

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&concatenated);

    assert_eq!(
        decoder.sink().coalesced(),
        vec![
            Event::Data {
                stream_id: 1,
                fin: false,
                data: b"hello ".to_vec(),
            },
            Event::Ping { id: 42 },
            Event::Data {
                stream_id: 1,
                fin: true,
                data: b"world".to_vec(),
            },
            Event::GoAway {
                last_good_stream_id: 1,
                status_code: 0,
            },
        ]
    );
}

#[test]
fn entire_buffer_is_consumed_across_many_frames() {
    let mut concatenated = Vec::new();
    for id in 0..50u32 {
        concatenated.extend_from_slice(&ping_frame(id));
    }

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&concatenated);

    assert_eq!(decoder.sink().events.len(), 50);
    for (i, event) in decoder.sink().events.iter().enumerate() {
        assert_eq!(*event, Event::Ping { id: i as u32 });
    }
}

#[test]
fn a_frame_split_across_two_decode_calls_followed_by_another_frame() {
    let ping1 = ping_frame(100);
    let ping2 = ping_frame(200);
    let mut concatenated = ping1.clone();
    concatenated.extend_from_slice(&ping2);

    let mut decoder = SpdyDecoder::new(3, RecordingSink::default());
    decoder.decode(&concatenated[..ping1.len() - 2]);
    decoder.decode(&concatenated[ping1.len() - 2..]);

    assert_eq!(
        decoder.sink().events,
        vec![Event::Ping { id: 100 }, Event::Ping { id: 200 }]
    );
}
