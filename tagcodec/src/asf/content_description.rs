use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{corrupt, err, try_vec};
use crate::util::text::{utf16_decode_lossy, utf16_encode};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// The Content Description Object
///
/// Holds five UTF-16 strings, any of which may be empty.
///
/// # Examples
///
/// ```rust
/// use tagcodec::asf::{Chunk, ContentDescriptionChunk};
/// use tagcodec::config::CodecOptions;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let description = ContentDescriptionChunk {
/// 	title: String::from("Foo title"),
/// 	author: String::from("Bar artist"),
/// 	..ContentDescriptionChunk::default()
/// };
///
/// let bytes = Chunk::ContentDescription(description.clone()).write(CodecOptions::new())?;
/// let (read, _) = Chunk::read(&bytes, CodecOptions::new())?;
/// assert_eq!(read, Chunk::ContentDescription(description));
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContentDescriptionChunk {
	/// Title
	pub title: String,
	/// Author
	pub author: String,
	/// Copyright
	pub copyright: String,
	/// Description
	pub description: String,
	/// Rating
	pub rating: String,
}

impl ContentDescriptionChunk {
	pub(crate) fn read(payload: &[u8], options: CodecOptions) -> Result<Self> {
		let mut reader = payload;

		let mut lengths = [0_usize; 5];
		for len in &mut lengths {
			*len = reader
				.read_u16::<LittleEndian>()
				.map_err(|_| corrupt!("Content description object is too short"))?
				as usize;
		}

		if lengths.iter().sum::<usize>() != reader.len() {
			corrupt!(@BAIL "Content description string lengths do not match the object size");
		}

		let [title, author, copyright, description, rating] = lengths.map(|len| {
			let (raw, rest) = reader.split_at(len);
			reader = rest;
			read_string(raw, options)
		});

		Ok(Self {
			title: title?,
			author: author?,
			copyright: copyright?,
			description: description?,
			rating: rating?,
		})
	}

	pub(crate) fn write_payload(&self) -> Result<Vec<u8>> {
		let strings = [
			&self.title,
			&self.author,
			&self.copyright,
			&self.description,
			&self.rating,
		]
		.map(|s| write_string(s));

		let mut out = Vec::with_capacity(10 + strings.iter().map(Vec::len).sum::<usize>());
		for encoded in &strings {
			let Ok(len) = u16::try_from(encoded.len()) else {
				err!(TooMuchData);
			};

			out.write_u16::<LittleEndian>(len)?;
		}

		for encoded in strings {
			out.extend(encoded);
		}

		Ok(out)
	}
}

fn read_string(raw: &[u8], options: CodecOptions) -> Result<String> {
	let mut owned = try_vec![0; raw.len(), options.allocation_limit];
	owned.copy_from_slice(raw);

	let decoded = utf16_decode_lossy(&owned, u16::from_le_bytes);
	if decoded.substituted {
		log::warn!("Substituted invalid characters in a content description string");
	}

	Ok(decoded.content.trim_end_matches('\0').to_owned())
}

fn write_string(value: &str) -> Vec<u8> {
	if value.is_empty() {
		return Vec::new();
	}

	utf16_encode(value, u16::to_le_bytes, false, true)
}
