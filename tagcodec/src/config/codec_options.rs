use super::ParsingMode;

/// Options to control how tagcodec reads and writes fields, frames and chunks
///
/// This replaces what would otherwise be process-wide switches. Every read and write call
/// takes a `CodecOptions`, which keeps field behavior deterministic and testable in isolation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct CodecOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) strip_trailing_terminator_on_write: bool,
	pub(crate) encode_utf16_bom_as_little_endian: bool,
	pub(crate) copy_slices: bool,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) allocation_limit: usize,
}

impl Default for CodecOptions {
	/// The default implementation for `CodecOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// CodecOptions {
	/// 	parsing_mode: ParsingMode::BestAttempt,
	/// 	strip_trailing_terminator_on_write: true,
	/// 	encode_utf16_bom_as_little_endian: true,
	/// 	copy_slices: false,
	/// 	lossy_text_encoding: true,
	/// 	allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl CodecOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::BestAttempt;

	/// Default allocation limit for any single field, frame or chunk
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `CodecOptions`, alias for `Default` implementation
	///
	/// See also: [`CodecOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// let options = CodecOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			strip_trailing_terminator_on_write: true,
			encode_utf16_bom_as_little_endian: true,
			copy_slices: false,
			lossy_text_encoding: true,
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::{CodecOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::BestAttempt. Here, we need absolute correctness.
	/// let options = CodecOptions::new().parsing_mode(ParsingMode::Strict);
	/// ```
	pub fn parsing_mode(mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		self
	}

	/// Whether to remove a trailing null terminator from size-terminated text before writing
	///
	/// Some applications write a terminator after the final value of a text frame, even though
	/// one is not needed. With this enabled, `"Jazz\0"` is written as `"Jazz"`. With it disabled,
	/// the terminator is kept so the original bytes are reproduced exactly.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// // I want my tags written back exactly how they were read
	/// let options = CodecOptions::new().strip_trailing_terminator_on_write(false);
	/// ```
	pub fn strip_trailing_terminator_on_write(mut self, strip: bool) -> Self {
		self.strip_trailing_terminator_on_write = strip;
		self
	}

	/// The byte order to use when writing UTF-16 text with a byte order mark
	///
	/// This only affects [`TextEncoding::UTF16`](crate::TextEncoding::UTF16). When disabled, big endian is used.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// // Write "FE FF" byte order marks
	/// let options = CodecOptions::new().encode_utf16_bom_as_little_endian(false);
	/// ```
	pub fn encode_utf16_bom_as_little_endian(mut self, little_endian: bool) -> Self {
		self.encode_utf16_bom_as_little_endian = little_endian;
		self
	}

	/// Copy each field's span into its own buffer before decoding
	///
	/// Some constrained runtimes have decoders that ignore the offset of a borrowed slice.
	/// With this enabled, every size-terminated field decodes from an owned copy of exactly
	/// its declared bytes. The output is identical either way.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// let options = CodecOptions::new().copy_slices(true);
	/// ```
	pub fn copy_slices(mut self, copy_slices: bool) -> Self {
		self.copy_slices = copy_slices;
		self
	}

	/// Whether to substitute characters that cannot be represented in the target encoding
	///
	/// When writing ISO-8859-1 text, characters outside of `U+0000..=U+00FF` are replaced
	/// with `'?'`. If disabled, writing fails with [`ErrorKind::TextEncode`](crate::error::ErrorKind::TextEncode).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// // I'd rather fail than lose characters
	/// let options = CodecOptions::new().lossy_text_encoding(false);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// The maximum number of bytes to allocate for any single field, frame or chunk
	///
	/// This is a safety measure on top of the length checks made against the source. If a
	/// declared length exceeds this limit, reading fails with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	///
	/// // I have gigantic embedded payloads, I'll double the allocation limit!
	/// let options = CodecOptions::new().allocation_limit(32 * 1024 * 1024);
	/// ```
	pub fn allocation_limit(mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		self
	}
}
