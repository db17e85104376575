use super::read::{read_text_chunks, verify_aiff};
use crate::TextEncoding;
use crate::config::CodecOptions;
use crate::error::Result;
use crate::field::{Field, FieldContext, FieldKind, FieldValue};
use crate::iff::chunk::write_chunk;
use crate::macros::err;

use byteorder::{BigEndian, WriteBytesExt};

/// Represents an AIFF `COMT` chunk
///
/// This is preferred over the `ANNO` chunk, for its additional information.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct Comment {
	/// The creation time of the comment
	///
	/// The unit is the number of seconds since January 1, 1904.
	pub timestamp: u32,
	/// An optional linking to a marker
	///
	/// This is for storing descriptions of markers as a comment.
	/// An id of 0 means the comment is not linked to a marker,
	/// otherwise it should be the ID of a marker.
	pub marker_id: u16,
	/// The comment itself
	///
	/// The size of the comment is restricted to [`u16::MAX`].
	pub text: String,
}

/// `AIFF` text chunks
///
/// ## Supported file types
///
/// * AIFF and AIFC
///
/// ## Conversions
///
/// Each field is filled by the first chunk of its kind, except for `annotations` and
/// `comments`, which collect every `ANNO` chunk and the first `COMT` chunk respectively.
///
/// # Examples
///
/// ```rust
/// use tagcodec::config::CodecOptions;
/// use tagcodec::iff::aiff::AiffTextChunks;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let text_chunks = AiffTextChunks {
/// 	name: Some(String::from("Foo title")),
/// 	annotations: Some(vec![String::from("Bar annotation")]),
/// 	..AiffTextChunks::default()
/// };
///
/// let bytes = text_chunks.write(CodecOptions::new())?;
/// assert_eq!(&bytes[..8], b"NAME\x00\x00\x00\x09");
///
/// let read = AiffTextChunks::read_chunks(&bytes, CodecOptions::new())?;
/// assert_eq!(read, text_chunks);
/// # Ok(()) }
/// ```
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct AiffTextChunks {
	/// The name of the piece
	pub name: Option<String>,
	/// The author of the piece
	pub author: Option<String>,
	/// A copyright notice consisting of the date followed
	/// by the copyright owner
	pub copyright: Option<String>,
	/// Basic comments
	///
	/// The use of these chunks is discouraged, as the `comments`
	/// field is more powerful.
	pub annotations: Option<Vec<String>>,
	/// A more feature-rich comment
	///
	/// These are preferred over `annotations`. See [`Comment`]
	pub comments: Option<Vec<Comment>>,
}

impl AiffTextChunks {
	/// Read the text chunks from a sequence of chunks
	///
	/// Chunks that don't hold text are skipped.
	///
	/// # Errors
	///
	/// * A chunk declares a size larger than the remaining data
	/// * A `COMT` chunk is malformed, and the parsing mode is [`ParsingMode::Strict`](crate::config::ParsingMode::Strict)
	pub fn read_chunks(data: &[u8], options: CodecOptions) -> Result<Self> {
		read_text_chunks(data, options)
	}

	/// Read the text chunks from a complete `FORM` chunk
	///
	/// The `FORM` type must be `AIFF` or `AIFC`.
	///
	/// # Errors
	///
	/// * `data` does not start with a valid `FORM` header
	/// * See [`AiffTextChunks::read_chunks`]
	pub fn read_form(data: &[u8], options: CodecOptions) -> Result<Self> {
		let body = verify_aiff(data)?;
		read_text_chunks(body, options)
	}

	/// Whether no text chunk is present
	pub fn is_empty(&self) -> bool {
		matches!(
			self,
			AiffTextChunks {
				name: None,
				author: None,
				copyright: None,
				annotations: None,
				comments: None,
			}
		)
	}

	/// Write every text chunk, with recomputed sizes and padding
	///
	/// # Errors
	///
	/// * A value is too large for its chunk
	/// * A value cannot be represented in ISO-8859-1, and [`CodecOptions::lossy_text_encoding`] is disabled
	pub fn write(&self, options: CodecOptions) -> Result<Vec<u8>> {
		let mut text_chunks = Vec::new();

		for (fourcc, value) in [
			(b"NAME", &self.name),
			(b"AUTH", &self.author),
			(b"(c) ", &self.copyright),
		] {
			if let Some(value) = value {
				write_chunk::<BigEndian>(&mut text_chunks, fourcc, &encode_text(value, options)?)?;
			}
		}

		for annotation in self.annotations.iter().flatten() {
			write_chunk::<BigEndian>(
				&mut text_chunks,
				b"ANNO",
				&encode_text(annotation, options)?,
			)?;
		}

		if let Some(comments) = self.comments.as_deref().filter(|c| !c.is_empty()) {
			let Ok(comment_count) = u16::try_from(comments.len()) else {
				err!(TooMuchData);
			};

			let mut content = Vec::new();
			content.write_u16::<BigEndian>(comment_count)?;

			for comt in comments {
				let text = encode_text(&comt.text, options)?;
				let Ok(len) = u16::try_from(text.len()) else {
					err!(TooMuchData);
				};

				content.write_u32::<BigEndian>(comt.timestamp)?;
				content.write_u16::<BigEndian>(comt.marker_id)?;
				content.write_u16::<BigEndian>(len)?;
				content.extend(text);

				if len % 2 != 0 {
					content.push(0);
				}
			}

			write_chunk::<BigEndian>(&mut text_chunks, b"COMT", &content)?;
		}

		Ok(text_chunks)
	}
}

fn encode_text(value: &str, options: CodecOptions) -> Result<Vec<u8>> {
	let mut field = Field::with_value(
		"Text",
		FieldKind::TextSizeTerminated,
		FieldValue::Text(value.to_owned()),
	)?;

	field.write(&FieldContext::with_encoding(TextEncoding::Latin1), options)
}
