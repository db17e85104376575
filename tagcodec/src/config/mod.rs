//! Various configuration options to control tagcodec
//!
//! Nothing here is global. A [`CodecOptions`] value is handed to every read and write call,
//! so two parsers with different options can run side by side.

mod codec_options;
mod parsing_mode;

pub use codec_options::CodecOptions;
pub use parsing_mode::ParsingMode;
