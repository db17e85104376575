use super::chunk::{CHUNK_HEADER_LEN, Chunk, ChunkHeader, UnknownChunk};
use super::guid::Guid;
use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{corrupt, err, parse_mode_choice};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

// Child count and two reserved bytes
const HEADER_FIXED_LEN: usize = 6;

/// The Header Object
///
/// The header holds every other top-level object that describes the file. Each child is
/// isolated from its siblings, so one malformed child does not prevent reading the rest (see
/// [`ParsingMode`](crate::config::ParsingMode)).
///
/// # Examples
///
/// ```rust
/// use tagcodec::asf::{Chunk, ContentDescriptionChunk, HeaderChunk};
/// use tagcodec::config::CodecOptions;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let mut header = HeaderChunk::default();
/// header.push(Chunk::ContentDescription(ContentDescriptionChunk {
/// 	title: String::from("Foo title"),
/// 	..ContentDescriptionChunk::default()
/// }));
///
/// let bytes = Chunk::Header(header.clone()).write(CodecOptions::new())?;
/// let (read, consumed) = Chunk::read(&bytes, CodecOptions::new())?;
/// assert_eq!(consumed, bytes.len());
/// assert_eq!(read, Chunk::Header(header));
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderChunk {
	children: Vec<Chunk>,
	reserved: [u8; 2],
}

impl Default for HeaderChunk {
	fn default() -> Self {
		Self {
			children: Vec::new(),
			reserved: [0x01, 0x02],
		}
	}
}

impl HeaderChunk {
	pub(crate) fn read(payload: &[u8], options: CodecOptions) -> Result<Self> {
		let parse_mode = options.parsing_mode;

		if payload.len() < HEADER_FIXED_LEN {
			corrupt!(@BAIL "Header object is too short");
		}

		let mut reader = payload;
		let declared_children = reader.read_u32::<LittleEndian>()?;
		let reserved = [reader.read_u8()?, reader.read_u8()?];

		let mut children = Vec::new();
		while !reader.is_empty() {
			// Without a valid header, there is no way to find the next child
			let child_header = ChunkHeader::read(reader)?;
			let child_bytes = &reader[..child_header.size];

			// Header objects only appear at the top level
			if child_header.guid == Guid::HEADER_OBJECT {
				parse_mode_choice!(
					parse_mode,
					STRICT: corrupt!(@BAIL "Header object nested in another header"),
					DEFAULT: {
						log::warn!("Keeping nested header object as-is");

						let payload = &child_bytes[CHUNK_HEADER_LEN..];
						children.push(Chunk::Unknown(UnknownChunk::read(
							child_header.guid,
							payload,
							options,
						)?));
					}
				);

				reader = &reader[child_header.size..];
				continue;
			}

			match Chunk::read(child_bytes, options) {
				Ok((child, _)) => children.push(child),
				Err(e) => {
					parse_mode_choice!(
						parse_mode,
						STRICT: return Err(e),
						DEFAULT: {
							log::warn!(
								"Failed to read header child {}, keeping it as-is: {e}",
								child_header.guid
							);

							let payload = &child_bytes[CHUNK_HEADER_LEN..];
							children.push(Chunk::Unknown(UnknownChunk::read(
								child_header.guid,
								payload,
								options,
							)?));
						}
					);
				},
			}

			reader = &reader[child_header.size..];
		}

		if children.len() != declared_children as usize {
			parse_mode_choice!(
				parse_mode,
				STRICT: corrupt!(@BAIL "Header object child count does not match its contents"),
				RELAXED: {},
				DEFAULT: log::warn!(
					"Header object declares {declared_children} children, found {}",
					children.len()
				)
			);
		}

		log::debug!("Read header object with {} children", children.len());
		Ok(Self { children, reserved })
	}

	pub(crate) fn write_payload(&self, options: CodecOptions) -> Result<Vec<u8>> {
		let Ok(count) = u32::try_from(self.children.len()) else {
			err!(TooMuchData);
		};

		let mut out = Vec::new();
		out.write_u32::<LittleEndian>(count)?;
		out.extend_from_slice(&self.reserved);

		for child in &self.children {
			out.extend(child.write(options)?);
		}

		Ok(out)
	}

	/// The child chunks, in file order
	pub fn children(&self) -> &[Chunk] {
		&self.children
	}

	/// Mutable access to the child chunks
	pub fn children_mut(&mut self) -> &mut Vec<Chunk> {
		&mut self.children
	}

	/// Append a child chunk
	pub fn push(&mut self, child: Chunk) {
		self.children.push(child);
	}
}
