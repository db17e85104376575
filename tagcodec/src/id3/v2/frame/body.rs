use crate::config::CodecOptions;
use crate::error::Result;
use crate::field::{self, Field, FieldKind};
use crate::macros::corrupt;

/// The ordered fields of a frame
///
/// The layout is fixed by the frame ID when the body is created. The last field of every layout
/// is size-terminated, so a body always consumes its entire frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBody {
	fields: Vec<Field>,
}

impl FrameBody {
	/// Create an empty body with the layout used by `id`
	///
	/// Both ID3v2.2 and ID3v2.3/4 IDs are understood. Unknown IDs get a single binary `Data` field.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::id3::v2::FrameBody;
	///
	/// let comment = FrameBody::for_id("COMM");
	/// let identifiers = comment
	/// 	.fields()
	/// 	.iter()
	/// 	.map(|field| field.identifier())
	/// 	.collect::<Vec<_>>();
	///
	/// assert_eq!(identifiers, ["TextEncoding", "Language", "Description", "Text"]);
	/// ```
	pub fn for_id(id: &str) -> Self {
		let fields = match id {
			"TXXX" | "TXX" => vec![
				Field::new("TextEncoding", FieldKind::TextEncoding),
				Field::new("Description", FieldKind::TextNullTerminated),
				Field::new("Text", FieldKind::TextSizeTerminated),
			],
			"WXXX" | "WXX" => vec![
				Field::new("TextEncoding", FieldKind::TextEncoding),
				Field::new("Description", FieldKind::TextNullTerminated),
				Field::new("URL", FieldKind::StringSizeTerminated),
			],
			"COMM" | "COM" | "USLT" | "ULT" => vec![
				Field::new("TextEncoding", FieldKind::TextEncoding),
				Field::new("Language", FieldKind::StringFixedLength(3)),
				Field::new("Description", FieldKind::TextNullTerminated),
				Field::new("Text", FieldKind::TextSizeTerminated),
			],
			"PCNT" | "CNT" => vec![Field::new("Counter", FieldKind::NumberVariableLength(4))],
			_ if id.starts_with('T') => vec![
				Field::new("TextEncoding", FieldKind::TextEncoding),
				Field::new("Text", FieldKind::TextSizeTerminated),
			],
			_ if id.starts_with('W') => vec![Field::new("URL", FieldKind::StringSizeTerminated)],
			// Includes every relative volume adjustment frame, their layouts are left to the caller
			_ => vec![Field::new("Data", FieldKind::ByteArraySizeTerminated)],
		};

		Self { fields }
	}

	/// Create a body holding nothing but opaque `content`
	pub(crate) fn opaque(content: Vec<u8>) -> Self {
		Self {
			fields: vec![Field::binary("Data", content)],
		}
	}

	/// The fields of the body, in wire order
	pub fn fields(&self) -> &[Field] {
		&self.fields
	}

	/// Mutable access to the fields of the body
	///
	/// The layout itself cannot be changed.
	pub fn fields_mut(&mut self) -> &mut [Field] {
		&mut self.fields
	}

	/// Find a field by its identifier
	pub fn field(&self, identifier: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.identifier() == identifier)
	}

	/// Find a field by its identifier, mutably
	pub fn field_mut(&mut self, identifier: &str) -> Option<&mut Field> {
		self.fields.iter_mut().find(|f| f.identifier() == identifier)
	}

	/// The total size of the body, known once every field has been read or written
	pub fn size(&self) -> Option<usize> {
		self.fields.iter().map(Field::size).sum()
	}

	/// Read every field from `content`, which must be consumed entirely
	///
	/// # Errors
	///
	/// * Any error from [`Field::read`]
	/// * The fields did not consume all of `content`
	pub fn read(&mut self, content: &[u8], options: CodecOptions) -> Result<()> {
		let consumed = field::read_fields(&mut self.fields, content, options)?;
		if consumed != content.len() {
			return Err(corrupt!("Frame body is larger than its fields"));
		}

		Ok(())
	}

	/// Write every field
	///
	/// # Errors
	///
	/// Any error from [`Field::write`]
	pub fn write(&mut self, options: CodecOptions) -> Result<Vec<u8>> {
		field::write_fields(&mut self.fields, options)
	}
}
