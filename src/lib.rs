//! spdy-sans-io: a minimal, sans-I/O SPDY/3.1 frame decoder
//!
//! This crate provides a synchronous, streaming SPDY/3.1 frame parser for
//! environments that cannot use async runtimes (e.g., WebAssembly, embedded
//! systems) or that simply want protocol parsing decoupled from I/O.
//!
//! # Features
//!
//! - **Sans-I/O design**: no async runtime dependency, no socket handling
//! - **Pure Rust**: no C bindings
//! - **SPDY/3.1 framing**: SYN_STREAM, SYN_REPLY, RST_STREAM, SETTINGS,
//!   PING, GOAWAY, HEADERS, WINDOW_UPDATE and raw DATA frames
//! - **Resumable**: feed it bytes in any chunking and it picks up where it
//!   left off — a frame, or even a frame's fixed header, may arrive split
//!   across many calls
//! - **Zero-copy**: header-block and data bytes are handed to the sink as
//!   slices borrowed from the caller's buffer, never copied or buffered
//!
//! # Quick start
//!
//! ```rust
//! use spdy_sans_io::{FrameSink, SpdyDecoder};
//!
//! #[derive(Default)]
//! struct Print;
//!
//! impl FrameSink for Print {
//!     fn read_data_frame(&mut self, stream_id: u32, fin: bool, data: &[u8]) {
//!         println!("stream {stream_id}: {} bytes (fin={fin})", data.len());
//!     }
//! }
//!
//! let mut decoder = SpdyDecoder::new(3, Print);
//! let frame = [0, 0, 0, 0x2A, 0x01, 0, 0, 5, b'h', b'e', b'l', b'l', b'o'];
//! decoder.decode(&frame);
//! ```
//!
//! # Architecture
//!
//! This crate is intentionally minimal. It provides:
//! - Frame parsing (bytes → sink events)
//!
//! It does NOT provide:
//! - TCP/TLS transport (you provide the bytes)
//! - zlib header-block decompression (the header-block bytes handed to the
//!   sink are still compressed on the wire; decompress them yourself)
//! - SPDY session/stream-multiplexing state (your responsibility)
//! - Frame encoding (this is a decoder only)
//!
//! # Use cases
//!
//! - Protocol analyzers and test harnesses that need exact SPDY/3.1 framing
//!   without pulling in a full server/client stack
//! - WASM or embedded proxies translating SPDY framing at the edge
//! - Fuzzing and conformance testing of the framing layer in isolation

pub mod decoder;
pub mod frame;
pub mod sink;

pub use decoder::SpdyDecoder;
pub use frame::{
    flags, frame_type, settings_id, CommonHeader, DEFAULT_VERSION, HEADER_LEN, MAX_FRAME_LENGTH,
};
pub use sink::{FrameSink, NullSink};
