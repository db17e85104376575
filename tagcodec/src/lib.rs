//! Decode and re-encode the binary frames and chunks that hold audio metadata.
//!
//! Three container conventions are supported:
//!
//! * `ID3v2` frames, see [`id3::v2`]
//! * ASF objects, keyed by 128-bit GUIDs, see [`asf`]
//! * AIFF chunks, keyed by FourCCs, see [`iff::aiff`]
//!
//! Frames and chunks are made up of typed [fields](field). Reading a field records how many bytes it
//! consumed, and writing it recomputes that size, so a frame that is read and written again without
//! changes produces the same bytes.
//!
//! Every read and write takes a [`CodecOptions`](config::CodecOptions), which decides how strict
//! parsing is and how text is written back. There is no global state.
//!
//! # Examples
//!
//! ## Reading a frame
//!
//! ```rust
//! # fn main() -> tagcodec::error::Result<()> {
//! use tagcodec::config::CodecOptions;
//! use tagcodec::id3::v2::{Id3v2Version, ParsedFrame};
//!
//! // "Hello" in UTF-16, with a little endian BOM
//! let bytes = b"TIT2\x00\x00\x00\x0D\x00\x00\x01\xFF\xFEH\x00e\x00l\x00l\x00o\x00";
//!
//! let ParsedFrame::Next { frame, consumed } =
//! 	tagcodec::id3::v2::Frame::read(bytes, Id3v2Version::V4, CodecOptions::new())?
//! else {
//! 	unreachable!()
//! };
//!
//! assert_eq!(consumed, bytes.len());
//! assert_eq!(frame.body().field("Text").unwrap().value().as_text(), Some("Hello"));
//! # Ok(()) }
//! ```
//!
//! ## Upgrading an `ID3v2.3` frame
//!
//! ```rust
//! # fn main() -> tagcodec::error::Result<()> {
//! use tagcodec::config::CodecOptions;
//! use tagcodec::id3::v2::{Id3v2Version, ParsedFrame};
//!
//! let bytes = b"TYER\x00\x00\x00\x05\x00\x00\x002024";
//!
//! let ParsedFrame::Next { frame, .. } =
//! 	tagcodec::id3::v2::Frame::read(bytes, Id3v2Version::V3, CodecOptions::new())?
//! else {
//! 	unreachable!()
//! };
//!
//! let mut upgraded = frame.upgrade();
//! assert_eq!(upgraded.id().as_str(), "TDRC");
//!
//! let written = upgraded.write(Id3v2Version::V4, CodecOptions::new())?;
//! assert_eq!(written, b"TDRC\x00\x00\x00\x05\x00\x00\x002024");
//! # Ok(()) }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod asf;
pub mod config;
pub mod error;
pub mod field;
pub mod id3;
pub mod iff;
pub(crate) mod macros;
mod util;

pub use util::text::TextEncoding;
