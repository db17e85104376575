use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::err;

use std::borrow::Cow;

const BOM: char = '\u{FEFF}';

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
}

impl TextEncodingError {
	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The character index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}
}

impl core::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		write!(
			f,
			"invalid {} sequence from index {}",
			self.encoding.name(),
			self.valid_up_to
		)
	}
}

impl core::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
///
/// This is selected by the text encoding indicator byte that precedes the text fields of a frame.
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	UTF16 = 1,
	/// UTF-16 big endian
	UTF16BE = 2,
	/// UTF-8
	UTF8 = 3,
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::TextEncoding;
	///
	/// assert_eq!(TextEncoding::from_u8(1), Some(TextEncoding::UTF16));
	/// assert_eq!(TextEncoding::from_u8(4), None);
	/// ```
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// Same as [`TextEncoding::from_u8`], but unknown indicators are an error
	pub(crate) fn from_indicator(byte: u8) -> Result<Self> {
		match Self::from_u8(byte) {
			Some(encoding) => Ok(encoding),
			None => err!(UnsupportedCharset(byte)),
		}
	}

	/// The size of a null terminator in this encoding
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::TextEncoding;
	///
	/// assert_eq!(TextEncoding::Latin1.terminator_len(), 1);
	/// assert_eq!(TextEncoding::UTF16BE.terminator_len(), 2);
	/// ```
	pub fn terminator_len(self) -> usize {
		match self {
			Self::Latin1 | Self::UTF8 => 1,
			Self::UTF16 | Self::UTF16BE => 2,
		}
	}

	fn name(self) -> &'static str {
		match self {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16BE => "UTF-16 BE",
		}
	}

	/// Encode a single string, with an optional terminator
	///
	/// `TextEncoding::UTF16` gets exactly one byte order mark, in the byte order selected by
	/// [`CodecOptions::encode_utf16_bom_as_little_endian`].
	pub(crate) fn encode(
		self,
		text: &str,
		terminated: bool,
		options: CodecOptions,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		match self {
			TextEncoding::Latin1 => {
				let mut out = latin1_encode(text, options.lossy_text_encoding)
					.collect::<std::result::Result<Vec<u8>, _>>()?;
				if terminated {
					out.push(0)
				}

				Ok(out)
			},
			TextEncoding::UTF16 => {
				let endianness = if options.encode_utf16_bom_as_little_endian {
					u16::to_le_bytes
				} else {
					u16::to_be_bytes
				};

				Ok(utf16_encode(text, endianness, true, terminated))
			},
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
		}
	}
}

/// The result of a lenient decode
#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodedText {
	pub(crate) content: String,
	/// Whether any malformed sequence had to be replaced with U+FFFD
	pub(crate) substituted: bool,
}

/// Decode an entire span, never failing
///
/// Malformed or unmappable sequences are replaced with U+FFFD and a warning is logged.
/// For [`TextEncoding::UTF16`], every byte order mark is removed from the output, and each one
/// selects the byte order of the text that follows it.
pub(crate) fn decode_lossy(bytes: &[u8], encoding: TextEncoding) -> DecodedText {
	let decoded = match encoding {
		TextEncoding::Latin1 => DecodedText {
			content: latin1_decode(bytes),
			substituted: false,
		},
		TextEncoding::UTF8 => match String::from_utf8_lossy(bytes) {
			Cow::Borrowed(valid) => DecodedText {
				content: valid.to_owned(),
				substituted: false,
			},
			Cow::Owned(replaced) => DecodedText {
				content: replaced,
				substituted: true,
			},
		},
		TextEncoding::UTF16 => utf16_decode_with_boms(bytes),
		TextEncoding::UTF16BE => utf16_decode_lossy(bytes, u16::from_be_bytes),
	};

	if decoded.substituted {
		log::warn!(
			"Replaced malformed {} sequences while decoding {} bytes",
			encoding.name(),
			bytes.len()
		);
	}

	decoded
}

/// Find the start of the first null terminator in `bytes`
///
/// For UTF-16, only terminators aligned to a code unit are considered.
pub(crate) fn find_terminator(bytes: &[u8], encoding: TextEncoding) -> Option<usize> {
	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => bytes.iter().position(|b| *b == 0),
		TextEncoding::UTF16 | TextEncoding::UTF16BE => bytes
			.chunks_exact(2)
			.position(|unit| unit == [0, 0])
			.map(|unit_index| unit_index * 2),
	}
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	bytes.iter().map(|c| *c as char).collect::<String>()
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| {
		if (c as u32) <= 255 {
			Ok(c as u8)
		} else if lossy {
			Ok(b'?')
		} else {
			Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index, // All characters up to this point are single-byte
			})
		}
	})
}

pub(crate) fn utf16_decode_lossy(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> DecodedText {
	let units = bytes
		.chunks_exact(2)
		.map(|c| endianness([c[0], c[1]]))
		.collect::<Vec<u16>>();

	let mut decoded = decode_units(&units);

	// A dangling byte can't make up a code unit
	if bytes.len() % 2 != 0 {
		decoded.content.push(char::REPLACEMENT_CHARACTER);
		decoded.substituted = true;
	}

	decoded
}

// In ID3v2, it is possible to have multiple UTF-16 strings separated by null, each with
// its own BOM. Some encoders will even mix byte orders within a single frame.
fn utf16_decode_with_boms(bytes: &[u8]) -> DecodedText {
	// Without any BOM, UTF-16 is assumed to be big endian
	let mut endianness: fn([u8; 2]) -> u16 = u16::from_be_bytes;
	let mut units = Vec::with_capacity(bytes.len() / 2);

	for c in bytes.chunks_exact(2) {
		match c {
			[0xFF, 0xFE] => endianness = u16::from_le_bytes,
			[0xFE, 0xFF] => endianness = u16::from_be_bytes,
			_ => units.push(endianness([c[0], c[1]])),
		}
	}

	let mut decoded = decode_units(&units);
	if bytes.len() % 2 != 0 {
		decoded.content.push(char::REPLACEMENT_CHARACTER);
		decoded.substituted = true;
	}

	decoded
}

fn decode_units(units: &[u16]) -> DecodedText {
	let mut substituted = false;
	let content = char::decode_utf16(units.iter().copied())
		.map(|r| {
			r.unwrap_or_else(|_| {
				substituted = true;
				char::REPLACEMENT_CHARACTER
			})
		})
		.filter(|c| *c != BOM)
		.collect::<String>();

	DecodedText {
		content,
		substituted,
	}
}

pub(crate) fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}
