//! The caller-supplied receiver of decoded SPDY frame events.
//!
//! A sink is a flat set of callback capabilities rather than a class
//! hierarchy: every method has a no-op default, so a consumer that only
//! cares about, say, `read_data_frame` and `read_frame_error` implements
//! just those two and inherits no-ops for the rest. Production dispatcher,
//! test recorder, and [`NullSink`] are all the same shape.
//!
//! All callbacks are synchronous and return nothing; slices are borrowed
//! from the buffer passed to [`crate::SpdyDecoder::decode`] and are only
//! valid for the duration of the call — a sink that needs the bytes to
//! outlive the callback must copy them.
pub trait FrameSink {
    /// A chunk of a DATA frame's payload. `fin` is `true` only on the
    /// chunk that exhausts the frame (see the crate-level FIN note).
    fn read_data_frame(&mut self, stream_id: u32, fin: bool, data: &[u8]) {
        let _ = (stream_id, fin, data);
    }

    /// The fixed fields of a SYN_STREAM frame, before its header block.
    fn read_syn_stream_frame(
        &mut self,
        stream_id: u32,
        assoc_stream_id: u32,
        priority: u8,
        fin: bool,
        unidirectional: bool,
    ) {
        let _ = (stream_id, assoc_stream_id, priority, fin, unidirectional);
    }

    /// The fixed fields of a SYN_REPLY frame, before its header block.
    fn read_syn_reply_frame(&mut self, stream_id: u32, fin: bool) {
        let _ = (stream_id, fin);
    }

    fn read_rst_stream_frame(&mut self, stream_id: u32, status_code: u32) {
        let _ = (stream_id, status_code);
    }

    /// The SETTINGS frame header, before its entries.
    fn read_settings_frame(&mut self, clear_persisted: bool) {
        let _ = clear_persisted;
    }

    /// One SETTINGS entry. Emitted once per entry, in wire order.
    fn read_setting(&mut self, id: u32, value: u32, persist_value: bool, persisted: bool) {
        let _ = (id, value, persist_value, persisted);
    }

    /// Marks the end of a SETTINGS frame's entry list.
    fn read_settings_end(&mut self) {}

    fn read_ping_frame(&mut self, id: u32) {
        let _ = id;
    }

    fn read_go_away_frame(&mut self, last_good_stream_id: u32, status_code: u32) {
        let _ = (last_good_stream_id, status_code);
    }

    /// The fixed fields of a HEADERS frame, before its header block.
    fn read_headers_frame(&mut self, stream_id: u32, fin: bool) {
        let _ = (stream_id, fin);
    }

    fn read_window_update_frame(&mut self, stream_id: u32, delta_window_size: u32) {
        let _ = (stream_id, delta_window_size);
    }

    /// A chunk of a SYN_STREAM/SYN_REPLY/HEADERS header block, raw
    /// (still zlib-compressed) bytes. The caller's zlib inflater is an
    /// external collaborator; this decoder never looks inside the block.
    fn read_header_block(&mut self, slice: &[u8]) {
        let _ = slice;
    }

    /// Marks the end of a header block's chunk sequence.
    fn read_header_block_end(&mut self) {}

    /// A frame-level structural violation. `reason` is a short, static,
    /// human-readable description; the offending frame's remaining
    /// payload bytes are discarded immediately after this call.
    fn read_frame_error(&mut self, reason: &str) {
        let _ = reason;
    }
}

/// A sink that discards every event. Useful for benchmarking the FSM in
/// isolation, or as a placeholder before a real dispatcher is wired up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl FrameSink for NullSink {}
