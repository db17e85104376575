//! Typed wire fields, the building blocks of frame and chunk bodies
//!
//! A body is an ordered list of [`Field`]s. Each field knows how to read itself from a byte span,
//! write itself back, and how many bytes it consumed. Fields may look at the fields that precede
//! them in the same body (through a [`FieldContext`]), but never modify them.
//!
//! # Examples
//!
//! ```rust
//! use tagcodec::config::CodecOptions;
//! use tagcodec::field::{self, Field, FieldKind};
//!
//! # fn main() -> tagcodec::error::Result<()> {
//! let mut body = [
//! 	Field::new("TextEncoding", FieldKind::TextEncoding),
//! 	Field::new("Text", FieldKind::TextSizeTerminated),
//! ];
//!
//! let consumed = field::read_fields(&mut body, b"\x00Rock\x00Pop", CodecOptions::new())?;
//! assert_eq!(consumed, 9);
//! assert_eq!(body[1].values(), ["Rock", "Pop"]);
//! # Ok(()) }
//! ```

mod number;
mod text;

use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::util::text::{TextEncoding, latin1_decode, latin1_encode};

/// The wire layout of a [`Field`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
	/// A single byte selecting the [`TextEncoding`] of the text fields that follow it
	TextEncoding,
	/// A big endian unsigned integer, occupying exactly `n` (1..=8) bytes
	NumberFixedLength(u8),
	/// A big endian unsigned integer consuming the rest of the body
	///
	/// It is at least `min` bytes long, and is written with as few bytes as possible.
	NumberVariableLength(u8),
	/// ISO-8859-1 text occupying exactly `n` bytes, such as a language code
	StringFixedLength(u8),
	/// ISO-8859-1 text, terminated by a single null byte
	StringNullTerminated,
	/// ISO-8859-1 text consuming the rest of the body
	StringSizeTerminated,
	/// Text in the body's [`TextEncoding`], terminated by a null the size of one code unit
	TextNullTerminated,
	/// Text in the body's [`TextEncoding`] consuming the rest of the body
	///
	/// The text may hold multiple values, separated by nulls. See [`Field::values`].
	TextSizeTerminated,
	/// Raw bytes consuming the rest of the body
	ByteArraySizeTerminated,
}

impl FieldKind {
	/// Whether this kind consumes every remaining byte of its body
	pub fn is_size_terminated(self) -> bool {
		matches!(
			self,
			Self::NumberVariableLength(_)
				| Self::StringSizeTerminated
				| Self::TextSizeTerminated
				| Self::ByteArraySizeTerminated
		)
	}

	fn default_value(self) -> FieldValue {
		match self {
			Self::TextEncoding | Self::NumberFixedLength(_) | Self::NumberVariableLength(_) => {
				FieldValue::Number(0)
			},
			Self::StringFixedLength(_)
			| Self::StringNullTerminated
			| Self::StringSizeTerminated
			| Self::TextNullTerminated
			| Self::TextSizeTerminated => FieldValue::Text(String::new()),
			Self::ByteArraySizeTerminated => FieldValue::Binary(Vec::new()),
		}
	}
}

/// The decoded value of a [`Field`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
	/// An unsigned integer
	Number(u64),
	/// Decoded text
	Text(String),
	/// Raw bytes
	Binary(Vec<u8>),
}

impl FieldValue {
	/// Returns the number, if the value is a [`FieldValue::Number`]
	pub fn as_number(&self) -> Option<u64> {
		match self {
			Self::Number(number) => Some(*number),
			_ => None,
		}
	}

	/// Returns the text, if the value is a [`FieldValue::Text`]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			_ => None,
		}
	}

	/// Returns the bytes, if the value is a [`FieldValue::Binary`]
	pub fn as_binary(&self) -> Option<&[u8]> {
		match self {
			Self::Binary(binary) => Some(binary),
			_ => None,
		}
	}

	fn matches(&self, kind: FieldKind) -> bool {
		matches!(
			(self, kind.default_value()),
			(Self::Number(_), FieldValue::Number(_))
				| (Self::Text(_), FieldValue::Text(_))
				| (Self::Binary(_), FieldValue::Binary(_))
		)
	}
}

/// The state a field may consult while reading or writing
///
/// This holds the fields that precede the current one in its body, for example the
/// text encoding indicator that decides how a text field is interpreted.
#[derive(Debug, Copy, Clone, Default)]
pub struct FieldContext<'a> {
	preceding: &'a [Field],
	encoding: Option<TextEncoding>,
}

impl<'a> FieldContext<'a> {
	/// Create a context from the fields that precede the current one
	pub fn new(preceding: &'a [Field]) -> Self {
		Self {
			preceding,
			encoding: None,
		}
	}

	/// Create a context with a fixed text encoding
	///
	/// This is used by containers that have no text encoding indicator of their own.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::TextEncoding;
	/// use tagcodec::field::FieldContext;
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let context = FieldContext::with_encoding(TextEncoding::UTF8);
	/// assert_eq!(context.text_encoding()?, TextEncoding::UTF8);
	/// # Ok(()) }
	/// ```
	pub fn with_encoding(encoding: TextEncoding) -> Self {
		Self {
			preceding: &[],
			encoding: Some(encoding),
		}
	}

	/// The fields that were decoded before the current one
	pub fn preceding(&self) -> &'a [Field] {
		self.preceding
	}

	/// The text encoding in effect for the current field
	///
	/// This is the fixed encoding, if one was given, otherwise the value of the closest
	/// preceding [`FieldKind::TextEncoding`] field. Without either, ISO-8859-1 is assumed.
	///
	/// # Errors
	///
	/// The indicator is not a known [`TextEncoding`]
	pub fn text_encoding(&self) -> Result<TextEncoding> {
		if let Some(encoding) = self.encoding {
			return Ok(encoding);
		}

		let indicator = self
			.preceding
			.iter()
			.rev()
			.find(|field| field.kind == FieldKind::TextEncoding)
			.and_then(|field| field.value.as_number());

		match indicator {
			Some(indicator) => match u8::try_from(indicator) {
				Ok(byte) => TextEncoding::from_indicator(byte),
				Err(_) => err!(UnsupportedCharset(u8::MAX)),
			},
			None => Ok(TextEncoding::Latin1),
		}
	}
}

/// A named, typed unit of a frame or chunk body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
	identifier: &'static str,
	kind: FieldKind,
	value: FieldValue,
	size: Option<usize>,
}

impl Field {
	/// Create an empty field
	///
	/// The value starts out as `0`, an empty string, or no bytes, depending on `kind`.
	pub fn new(identifier: &'static str, kind: FieldKind) -> Self {
		Self {
			identifier,
			kind,
			value: kind.default_value(),
			size: None,
		}
	}

	/// Create a field with an initial value
	///
	/// # Errors
	///
	/// See [`Field::set_value`]
	pub fn with_value(identifier: &'static str, kind: FieldKind, value: FieldValue) -> Result<Self> {
		let mut field = Self::new(identifier, kind);
		field.set_value(value)?;
		Ok(field)
	}

	/// A size-terminated byte array holding `content`
	pub(crate) fn binary(identifier: &'static str, content: Vec<u8>) -> Self {
		Self {
			identifier,
			kind: FieldKind::ByteArraySizeTerminated,
			value: FieldValue::Binary(content),
			size: None,
		}
	}

	/// The name of the field within its body
	pub fn identifier(&self) -> &'static str {
		self.identifier
	}

	/// The wire layout of the field
	pub fn kind(&self) -> FieldKind {
		self.kind
	}

	/// The current value
	pub fn value(&self) -> &FieldValue {
		&self.value
	}

	/// Replace the value
	///
	/// This resets the size, it will be known again after the next write.
	///
	/// # Errors
	///
	/// * The value type doesn't match the field kind, for example text in a number field
	/// * A number doesn't fit in a [`FieldKind::NumberFixedLength`]
	/// * A [`FieldKind::TextEncoding`] value is not a known indicator
	pub fn set_value(&mut self, value: FieldValue) -> Result<()> {
		if !value.matches(self.kind) {
			err!(ValueMismatch("value type does not match the field kind"));
		}

		match (self.kind, &value) {
			(FieldKind::TextEncoding, FieldValue::Number(n))
				if u8::try_from(*n).ok().and_then(TextEncoding::from_u8).is_none() =>
			{
				err!(UnsupportedCharset(u8::try_from(*n).unwrap_or(u8::MAX)))
			},
			(FieldKind::NumberFixedLength(n), FieldValue::Number(number))
				if !number::fits_in(*number, n) =>
			{
				err!(ValueMismatch("number does not fit in its fixed length"))
			},
			_ => {},
		}

		self.value = value;
		self.size = None;
		Ok(())
	}

	/// The number of bytes consumed by the last read or produced by the last write
	///
	/// This is `None` for a field that has not yet been read or written, or whose value has
	/// changed since.
	pub fn size(&self) -> Option<usize> {
		self.size
	}

	/// Read the field from `source`, advancing it past the consumed bytes
	///
	/// `declared_size` is the number of bytes the field may use. Size-terminated kinds consume all of them.
	///
	/// # Errors
	///
	/// * `declared_size` exceeds the length of `source`
	/// * Fewer bytes are available than the field kind requires
	/// * A text encoding indicator is unknown
	pub fn read(
		&mut self,
		source: &mut &[u8],
		declared_size: usize,
		context: &FieldContext<'_>,
		options: CodecOptions,
	) -> Result<()> {
		if declared_size > source.len() {
			err!(InvalidField("declared size exceeds the remaining data"));
		}

		let span = &source[..declared_size];
		let (value, consumed) = match self.kind {
			FieldKind::TextEncoding => {
				let Some(indicator) = span.first() else {
					err!(InvalidField("missing text encoding indicator"));
				};

				let encoding = TextEncoding::from_indicator(*indicator)?;
				(FieldValue::Number(encoding as u64), 1)
			},
			FieldKind::NumberFixedLength(n) => {
				(FieldValue::Number(number::read_fixed(span, n)?), usize::from(n))
			},
			FieldKind::NumberVariableLength(min) => (
				FieldValue::Number(number::read_variable(span, min)?),
				declared_size,
			),
			FieldKind::StringFixedLength(n) => {
				let Some(bytes) = span.get(..usize::from(n)) else {
					err!(InvalidField("fixed length string is too short"));
				};

				(FieldValue::Text(latin1_decode(bytes)), usize::from(n))
			},
			FieldKind::StringNullTerminated => {
				let (text, consumed) = text::read_null_terminated(span, TextEncoding::Latin1)?;
				(FieldValue::Text(text), consumed)
			},
			FieldKind::StringSizeTerminated => {
				(FieldValue::Text(latin1_decode(span)), declared_size)
			},
			FieldKind::TextNullTerminated => {
				let (text, consumed) = text::read_null_terminated(span, context.text_encoding()?)?;
				(FieldValue::Text(text), consumed)
			},
			FieldKind::TextSizeTerminated => {
				let text = text::read_size_terminated(span, context.text_encoding()?, options)?;
				(FieldValue::Text(text), declared_size)
			},
			FieldKind::ByteArraySizeTerminated => {
				let mut content = try_vec![0; declared_size, options.allocation_limit];
				content.copy_from_slice(span);
				(FieldValue::Binary(content), declared_size)
			},
		};

		log::trace!(
			"Read field `{}` ({:?}), consumed {consumed} bytes",
			self.identifier,
			self.kind
		);

		*source = &source[consumed..];
		self.value = value;
		self.size = Some(consumed);
		Ok(())
	}

	/// Serialize the field, updating its size
	///
	/// # Errors
	///
	/// * The text cannot be represented in the body's encoding, and [`CodecOptions::lossy_text_encoding`] is disabled
	/// * A fixed length string is too long
	/// * The value type doesn't match the field kind
	pub fn write(&mut self, context: &FieldContext<'_>, options: CodecOptions) -> Result<Vec<u8>> {
		let bytes = match (self.kind, &self.value) {
			(FieldKind::TextEncoding, FieldValue::Number(indicator)) => vec![*indicator as u8],
			(FieldKind::NumberFixedLength(n), FieldValue::Number(number)) => {
				number::write_fixed(*number, n)?
			},
			(FieldKind::NumberVariableLength(min), FieldValue::Number(number)) => {
				number::write_variable(*number, min)
			},
			(FieldKind::StringFixedLength(n), FieldValue::Text(text)) => {
				let mut bytes = latin1_encode(text, options.lossy_text_encoding)
					.collect::<std::result::Result<Vec<u8>, _>>()?;
				if bytes.len() > usize::from(n) {
					err!(ValueMismatch("fixed length string is too long"));
				}

				bytes.resize(usize::from(n), b' ');
				bytes
			},
			(FieldKind::StringNullTerminated, FieldValue::Text(text)) => {
				TextEncoding::Latin1.encode(text, true, options)?
			},
			(FieldKind::StringSizeTerminated, FieldValue::Text(text)) => {
				TextEncoding::Latin1.encode(text, false, options)?
			},
			(FieldKind::TextNullTerminated, FieldValue::Text(text)) => {
				context.text_encoding()?.encode(text, true, options)?
			},
			(FieldKind::TextSizeTerminated, FieldValue::Text(text)) => {
				text::write_size_terminated(text, context.text_encoding()?, options)?
			},
			(FieldKind::ByteArraySizeTerminated, FieldValue::Binary(content)) => content.clone(),
			_ => err!(ValueMismatch("value type does not match the field kind")),
		};

		log::trace!(
			"Wrote field `{}` ({:?}), produced {} bytes",
			self.identifier,
			self.kind,
			bytes.len()
		);

		self.size = Some(bytes.len());
		Ok(bytes)
	}

	/// Forget the consumed size
	pub(crate) fn invalidate_size(&mut self) {
		self.size = None;
	}

	/// Carry over the value of `other` without reinterpreting it
	///
	/// Returns `false` if the value type doesn't fit this field, in which case nothing changes.
	pub(crate) fn copy_value_from(&mut self, other: &Field) -> bool {
		if !other.value.matches(self.kind) {
			return false;
		}

		self.value = other.value.clone();
		self.size = None;
		true
	}
}

/// Read every field of a body from `source`, in order
///
/// Each field is given the remainder of `source` as its declared size, so only the final
/// field may be size-terminated.
///
/// Returns the total number of bytes consumed.
///
/// # Errors
///
/// Any error from [`Field::read`]. Fields that come after the failing one are left untouched.
pub fn read_fields(fields: &mut [Field], source: &[u8], options: CodecOptions) -> Result<usize> {
	let mut remaining = source;
	for index in 0..fields.len() {
		let (preceding, current) = fields.split_at_mut(index);
		let context = FieldContext::new(preceding);

		let declared_size = remaining.len();
		current[0].read(&mut remaining, declared_size, &context, options)?;
	}

	Ok(source.len() - remaining.len())
}

/// Write every field of a body, in order
///
/// # Errors
///
/// Any error from [`Field::write`]
pub fn write_fields(fields: &mut [Field], options: CodecOptions) -> Result<Vec<u8>> {
	let mut out = Vec::new();
	for index in 0..fields.len() {
		let (preceding, current) = fields.split_at_mut(index);
		let context = FieldContext::new(preceding);

		out.extend(current[0].write(&context, options)?);
	}

	Ok(out)
}
