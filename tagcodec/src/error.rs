//! Contains the errors that can arise within tagcodec
//!
//! The primary error is [`TagCodecError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, TagCodecError>`
pub type Result<T> = std::result::Result<T, TagCodecError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Field related errors
	/// A field has fewer bytes available than it structurally requires
	///
	/// This also arises when a size-terminated field is given a declared length that exceeds
	/// the bytes remaining in its source.
	InvalidField(&'static str),
	/// A text encoding indicator outside of the known set (0..=3)
	UnsupportedCharset(u8),
	/// Attempted to access a value of a multi-value field that does not exist
	ValueOutOfRange {
		/// The requested index
		index: usize,
		/// The number of values actually held
		len: usize,
	},
	/// A field value does not match the type its kind expects
	///
	/// For example, assigning text to a [`FieldKind::NumberFixedLength`](crate::field::FieldKind::NumberFixedLength).
	ValueMismatch(&'static str),

	// Structure related errors
	/// The declared length of a chunk or frame does not match its content
	///
	/// This covers declared lengths that exceed the remaining source, as well as
	/// chunks where the field decoders consumed a different number of bytes than declared.
	Corruption(&'static str),
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,

	// Format specific errors
	/// Errors that arise while handling ID3v2 frames
	Id3v2(Id3v2Error),

	// Text related errors
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The types of errors that can occur while interacting with ID3v2 frames
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when attempting to write a frame for a version that cannot be written (ID3v2.2),
	/// or a frame whose ID is outdated
	UnsupportedVersion,
	/// Arises when reading an encrypted frame with no data length indicator
	MissingDataLengthIndicator,

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::UnsupportedVersion => write!(
				f,
				"Attempted to write a frame using ID3v2.2 or an outdated frame ID"
			),
			Self::MissingDataLengthIndicator => write!(
				f,
				"Encountered an encrypted frame without a data length indicator"
			),

			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while interacting with an ID3v2 frame
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within tagcodec
pub struct TagCodecError {
	pub(crate) kind: ErrorKind,
}

impl TagCodecError {
	/// Create a `TagCodecError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::error::{ErrorKind, TagCodecError};
	///
	/// let bad_charset = TagCodecError::new(ErrorKind::UnsupportedCharset(7));
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::error::{ErrorKind, TagCodecError};
	///
	/// let corrupt = TagCodecError::new(ErrorKind::Corruption("Chunk is too short"));
	/// if let ErrorKind::Corruption(reason) = corrupt.kind() {
	/// 	println!("Giving up on this chunk: {reason}");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this error signals a structurally broken frame or chunk
	///
	/// These errors are fatal for the item being parsed, but the surrounding container
	/// can skip the item and carry on with its siblings.
	pub fn is_structural(&self) -> bool {
		matches!(
			self.kind,
			ErrorKind::InvalidField(_)
				| ErrorKind::Corruption(_)
				| ErrorKind::TooMuchData
				| ErrorKind::UnsupportedCharset(_)
				| ErrorKind::Id3v2(_)
		)
	}
}

impl std::error::Error for TagCodecError {}

impl Debug for TagCodecError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for TagCodecError {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<TextEncodingError> for TagCodecError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for TagCodecError {
	fn from(input: std::io::Error) -> Self {
		// All input is already in memory, so running dry can only mean a truncated structure
		if input.kind() == std::io::ErrorKind::UnexpectedEof {
			return Self {
				kind: ErrorKind::Corruption("Unexpected end of data"),
			};
		}

		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::collections::TryReserveError> for TagCodecError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for TagCodecError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for TagCodecError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::InvalidField(message) => write!(f, "Invalid field: {message}"),
			ErrorKind::UnsupportedCharset(byte) => {
				write!(f, "Unsupported text encoding indicator: {byte}")
			},
			ErrorKind::ValueOutOfRange { index, len } => write!(
				f,
				"Attempted to access value {index}, but the field only holds {len} value(s)"
			),
			ErrorKind::ValueMismatch(message) => write!(f, "Field value mismatch: {message}"),
			ErrorKind::Corruption(message) => write!(f, "Corrupt data: {message}"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}
