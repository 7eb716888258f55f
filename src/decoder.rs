//! The SPDY/3.1 frame state machine.
//!
//! [`SpdyDecoder::decode`] is the only public operation: feed it whatever
//! bytes are available and it advances as far as it can, emitting events
//! through the sink it owns, and returns once the buffer is exhausted or
//! it is blocked waiting for more bytes of the frame currently in flight.
//! It never fails synchronously — every malformed frame resolves to a
//! `read_frame_error` call followed by discarding that frame's declared
//! payload length, never a panic or an `Err`.

use crate::frame::{
    self, flags, frame_type, mask_31, CommonHeader, HEADER_LEN, MAX_FIXED_PREFIX_LEN,
    SETTINGS_ENTRY_LEN,
};
use crate::sink::FrameSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlKind {
    SynStream,
    SynReply,
    RstStream,
    Settings,
    Ping,
    GoAway,
    Headers,
    WindowUpdate,
}

#[derive(Debug, Clone, Copy)]
struct PendingControl {
    kind: ControlKind,
    flags: u8,
    length: u32,
    fixed_len: usize,
}

#[derive(Debug, Clone, Copy)]
enum State {
    ReadCommonHeader,
    ReadControlFixed(PendingControl),
    ReadSettingsEntry { remaining_entries: u32 },
    ReadHeaderBlock { remaining: u32 },
    ReadDataPayload { stream_id: u32, fin: bool, remaining: u32 },
    DiscardFrame { remaining: u32 },
}

/// A resumable SPDY/3.1 frame decoder bound to a protocol version and a
/// sink, for the lifetime of one connection.
///
/// `S` is held by value — no trait object, no shared ownership — so a
/// production dispatcher, a test recorder, or [`crate::sink::NullSink`]
/// all cost exactly the same to plug in.
#[derive(Debug)]
pub struct SpdyDecoder<S: FrameSink> {
    version: u16,
    state: State,
    scratch: [u8; MAX_FIXED_PREFIX_LEN],
    scratch_len: usize,
    sink: S,
}

impl<S: FrameSink> SpdyDecoder<S> {
    /// Create a decoder expecting the given SPDY wire version
    /// (`3` for SPDY/3.1, see [`frame::DEFAULT_VERSION`]) and delivering
    /// events to `sink`.
    pub fn new(version: u16, sink: S) -> Self {
        Self {
            version,
            state: State::ReadCommonHeader,
            scratch: [0; MAX_FIXED_PREFIX_LEN],
            scratch_len: 0,
            sink,
        }
    }

    /// Borrow the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutably borrow the sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Consume the decoder, returning its sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Feed `input` to the decoder. Consumes as many leading bytes as
    /// possible, emitting sink events as frames (or parts of frames)
    /// complete; any bytes left unconsumed belong to a frame still in
    /// flight and are simply not in `input` on the next call.
    pub fn decode(&mut self, mut input: &[u8]) {
        loop {
            match self.state {
                State::ReadCommonHeader => {
                    if !self.fill_scratch(&mut input, HEADER_LEN) {
                        return;
                    }
                    self.handle_common_header();
                }
                State::ReadControlFixed(pending) => {
                    if !self.fill_scratch(&mut input, pending.fixed_len) {
                        return;
                    }
                    self.handle_control_fixed(pending);
                }
                State::ReadSettingsEntry { remaining_entries } => {
                    if !self.fill_scratch(&mut input, SETTINGS_ENTRY_LEN) {
                        return;
                    }
                    self.handle_settings_entry(remaining_entries);
                }
                State::ReadHeaderBlock { remaining } => {
                    if input.is_empty() {
                        return;
                    }
                    let take = (remaining as usize).min(input.len());
                    let (chunk, rest) = input.split_at(take);
                    self.sink.read_header_block(chunk);
                    input = rest;
                    let remaining = remaining - take as u32;
                    if remaining == 0 {
                        self.sink.read_header_block_end();
                        self.state = State::ReadCommonHeader;
                    } else {
                        self.state = State::ReadHeaderBlock { remaining };
                    }
                }
                State::ReadDataPayload {
                    stream_id,
                    fin,
                    remaining,
                } => {
                    if input.is_empty() {
                        return;
                    }
                    let take = (remaining as usize).min(input.len());
                    let (chunk, rest) = input.split_at(take);
                    let remaining = remaining - take as u32;
                    let chunk_fin = fin && remaining == 0;
                    self.sink.read_data_frame(stream_id, chunk_fin, chunk);
                    input = rest;
                    if remaining == 0 {
                        self.state = State::ReadCommonHeader;
                    } else {
                        self.state = State::ReadDataPayload {
                            stream_id,
                            fin,
                            remaining,
                        };
                    }
                }
                State::DiscardFrame { remaining } => {
                    if input.is_empty() {
                        return;
                    }
                    let take = (remaining as usize).min(input.len());
                    input = &input[take..];
                    let remaining = remaining - take as u32;
                    self.state = if remaining == 0 {
                        State::ReadCommonHeader
                    } else {
                        State::DiscardFrame { remaining }
                    };
                }
            }
        }
    }

    /// Copy bytes from `*input` into `self.scratch` until it holds `need`
    /// bytes total. Returns whether `need` bytes are now available.
    fn fill_scratch(&mut self, input: &mut &[u8], need: usize) -> bool {
        if self.scratch_len < need {
            let take = (need - self.scratch_len).min(input.len());
            self.scratch[self.scratch_len..self.scratch_len + take]
                .copy_from_slice(&input[..take]);
            self.scratch_len += take;
            *input = &input[take..];
        }
        self.scratch_len == need
    }

    /// Move straight to discarding `length` bytes (or back to reading
    /// the next common header, if `length` is already zero).
    fn enter_discard(&mut self, length: u32) {
        self.state = if length == 0 {
            State::ReadCommonHeader
        } else {
            State::DiscardFrame { remaining: length }
        };
    }

    /// Move to streaming `remaining` header-block bytes (or emit the
    /// terminal event immediately if the block is empty).
    fn enter_header_block(&mut self, remaining: u32) {
        if remaining == 0 {
            self.sink.read_header_block_end();
            self.state = State::ReadCommonHeader;
        } else {
            self.state = State::ReadHeaderBlock { remaining };
        }
    }

    fn handle_common_header(&mut self) {
        let buf = self.scratch;
        self.scratch_len = 0;
        match CommonHeader::parse(&buf[..HEADER_LEN]) {
            CommonHeader::Data {
                stream_id,
                flags: data_flags,
                length,
            } => {
                if stream_id == 0 {
                    self.sink.read_frame_error("Invalid data frame");
                    self.enter_discard(length);
                    return;
                }
                let fin = data_flags & flags::data::FIN != 0;
                if length == 0 {
                    self.sink.read_data_frame(stream_id, fin, &[]);
                    self.state = State::ReadCommonHeader;
                } else {
                    self.state = State::ReadDataPayload {
                        stream_id,
                        fin,
                        remaining: length,
                    };
                }
            }
            CommonHeader::Control {
                version,
                frame_type,
                flags: control_flags,
                length,
            } => {
                if version != self.version {
                    self.sink.read_frame_error("Unsupported version");
                    self.enter_discard(length);
                    return;
                }
                self.dispatch_control(frame_type, control_flags, length);
            }
        }
    }

    fn dispatch_control(&mut self, ty: u16, flags: u8, length: u32) {
        let (kind, min_len, exact) = match ty {
            frame_type::SYN_STREAM => (ControlKind::SynStream, 10, false),
            frame_type::SYN_REPLY => (ControlKind::SynReply, 4, false),
            frame_type::RST_STREAM => (ControlKind::RstStream, 8, true),
            frame_type::SETTINGS => (ControlKind::Settings, 4, false),
            frame_type::PING => (ControlKind::Ping, 4, true),
            frame_type::GOAWAY => (ControlKind::GoAway, 8, true),
            frame_type::HEADERS => (ControlKind::Headers, 4, false),
            frame_type::WINDOW_UPDATE => (ControlKind::WindowUpdate, 8, true),
            _ => {
                // Unknown frame type (including the deprecated NOOP=5):
                // not an error, silently discarded.
                self.enter_discard(length);
                return;
            }
        };

        if kind == ControlKind::Settings {
            if length < 4 || (length - 4) % SETTINGS_ENTRY_LEN as u32 != 0 {
                self.sink.read_frame_error("Invalid SETTINGS");
                self.enter_discard(length);
                return;
            }
        } else if exact {
            if length != min_len {
                self.sink.read_frame_error("Invalid frame length");
                self.enter_discard(length);
                return;
            }
        } else if length < min_len {
            self.sink.read_frame_error("Invalid frame length");
            self.enter_discard(length);
            return;
        }

        self.state = State::ReadControlFixed(PendingControl {
            kind,
            flags,
            length,
            fixed_len: min_len as usize,
        });
    }

    fn handle_control_fixed(&mut self, pending: PendingControl) {
        let buf = self.scratch;
        self.scratch_len = 0;
        match pending.kind {
            ControlKind::SynStream => self.finish_syn_stream(&buf, pending.flags, pending.length),
            ControlKind::SynReply => self.finish_syn_reply(&buf, pending.flags, pending.length),
            ControlKind::RstStream => self.finish_rst_stream(&buf, pending.flags),
            ControlKind::Settings => self.finish_settings_header(&buf, pending.flags, pending.length),
            ControlKind::Ping => self.finish_ping(&buf),
            ControlKind::GoAway => self.finish_goaway(&buf),
            ControlKind::Headers => self.finish_headers(&buf, pending.flags, pending.length),
            ControlKind::WindowUpdate => self.finish_window_update(&buf),
        }
    }

    fn finish_syn_stream(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN], control_flags: u8, length: u32) {
        let stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        if stream_id == 0 {
            self.sink.read_frame_error("Invalid SYN_STREAM");
            self.enter_discard(length - 10);
            return;
        }
        let assoc_stream_id = mask_31(u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]));
        let priority = (buf[8] >> 5) & 0x07;
        let fin = control_flags & flags::syn_stream::FIN != 0;
        let unidirectional = control_flags & flags::syn_stream::UNIDIRECTIONAL != 0;
        self.sink
            .read_syn_stream_frame(stream_id, assoc_stream_id, priority, fin, unidirectional);
        self.enter_header_block(length - 10);
    }

    fn finish_syn_reply(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN], control_flags: u8, length: u32) {
        let stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        if stream_id == 0 {
            self.sink.read_frame_error("Invalid SYN_REPLY");
            self.enter_discard(length - 4);
            return;
        }
        let fin = control_flags & flags::syn_reply::FIN != 0;
        self.sink.read_syn_reply_frame(stream_id, fin);
        self.enter_header_block(length - 4);
    }

    fn finish_rst_stream(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN], control_flags: u8) {
        // Entry state guarantees length == 8 exactly (the exact-length
        // check in dispatch_control), so the whole payload is already in
        // `buf` and nothing is ever left to discard here.
        if control_flags != 0 {
            self.sink.read_frame_error("Invalid RST_STREAM flags");
            self.state = State::ReadCommonHeader;
            return;
        }
        let stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        if stream_id == 0 {
            self.sink.read_frame_error("Invalid RST_STREAM");
            self.state = State::ReadCommonHeader;
            return;
        }
        let status_code = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if status_code == 0 {
            self.sink.read_frame_error("Invalid RST_STREAM");
            self.state = State::ReadCommonHeader;
            return;
        }
        self.sink.read_rst_stream_frame(stream_id, status_code);
        self.state = State::ReadCommonHeader;
    }

    fn finish_settings_header(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN], control_flags: u8, length: u32) {
        let num_settings = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let expected = (length - 4) / SETTINGS_ENTRY_LEN as u32;
        if num_settings != expected {
            self.sink.read_frame_error("Invalid SETTINGS");
            self.enter_discard(length - 4);
            return;
        }
        let clear = control_flags & flags::settings::CLEAR_PERSISTED != 0;
        self.sink.read_settings_frame(clear);
        if num_settings == 0 {
            self.sink.read_settings_end();
            self.state = State::ReadCommonHeader;
        } else {
            self.state = State::ReadSettingsEntry {
                remaining_entries: num_settings,
            };
        }
    }

    fn handle_settings_entry(&mut self, remaining_entries: u32) {
        let buf = self.scratch;
        self.scratch_len = 0;
        let id_flags = buf[0];
        let id = u32::from_be_bytes([0, buf[1], buf[2], buf[3]]);
        let value = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let persist_value = id_flags & flags::setting_entry::PERSIST_VALUE != 0;
        let persisted = id_flags & flags::setting_entry::PERSISTED != 0;
        self.sink.read_setting(id, value, persist_value, persisted);

        let remaining_entries = remaining_entries - 1;
        if remaining_entries == 0 {
            self.sink.read_settings_end();
            self.state = State::ReadCommonHeader;
        } else {
            self.state = State::ReadSettingsEntry { remaining_entries };
        }
    }

    fn finish_ping(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN]) {
        let id = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        self.sink.read_ping_frame(id);
        self.state = State::ReadCommonHeader;
    }

    fn finish_goaway(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN]) {
        let last_good_stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        let status_code = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        self.sink.read_go_away_frame(last_good_stream_id, status_code);
        self.state = State::ReadCommonHeader;
    }

    fn finish_headers(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN], control_flags: u8, length: u32) {
        let stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        if stream_id == 0 {
            self.sink.read_frame_error("Invalid HEADERS");
            self.enter_discard(length - 4);
            return;
        }
        let fin = control_flags & flags::headers::FIN != 0;
        self.sink.read_headers_frame(stream_id, fin);
        self.enter_header_block(length - 4);
    }

    fn finish_window_update(&mut self, buf: &[u8; MAX_FIXED_PREFIX_LEN]) {
        let stream_id = mask_31(u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]));
        let delta_window_size = mask_31(u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]));
        if delta_window_size == 0 {
            self.sink.read_frame_error("Invalid WINDOW_UPDATE");
            self.state = State::ReadCommonHeader;
            return;
        }
        self.sink.read_window_update_frame(stream_id, delta_window_size);
        self.state = State::ReadCommonHeader;
    }
}

impl<S: FrameSink + Default> Default for SpdyDecoder<S> {
    fn default() -> Self {
        Self::new(frame::DEFAULT_VERSION, S::default())
    }
}
