use super::content_description::ContentDescriptionChunk;
use super::guid::Guid;
use super::header::HeaderChunk;
use super::stream::StreamChunk;
use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{corrupt, err, try_vec};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// The size of a chunk header, a GUID followed by a 64-bit size
pub(crate) const CHUNK_HEADER_LEN: usize = 24;

/// The header shared by every chunk
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChunkHeader {
	pub(crate) guid: Guid,
	/// The size of the entire chunk, including this header
	pub(crate) size: usize,
}

impl ChunkHeader {
	/// Read a chunk header, verifying the declared size against `source`
	pub(crate) fn read(source: &[u8]) -> Result<Self> {
		if source.len() < CHUNK_HEADER_LEN {
			corrupt!(@BAIL "Not enough data for a chunk header");
		}

		let mut reader = source;
		let guid = Guid::read(&mut reader)?;
		let size = reader.read_u64::<LittleEndian>()?;

		if size < CHUNK_HEADER_LEN as u64 {
			corrupt!(@BAIL "Chunk size is smaller than its header");
		}

		// Checked before anything is allocated for the payload
		let Ok(size) = usize::try_from(size) else {
			err!(TooMuchData);
		};

		if size > source.len() {
			log::debug!(
				"Chunk {guid} declares {size} bytes, only {} remain",
				source.len()
			);
			corrupt!(@BAIL "Chunk size exceeds the remaining data");
		}

		Ok(Self { guid, size })
	}
}

pub(crate) fn write_chunk(guid: Guid, payload: &[u8]) -> Result<Vec<u8>> {
	let size = (CHUNK_HEADER_LEN + payload.len()) as u64;

	let mut out = Vec::with_capacity(CHUNK_HEADER_LEN + payload.len());
	out.extend_from_slice(guid.as_bytes());
	out.write_u64::<LittleEndian>(size)?;
	out.extend_from_slice(payload);

	Ok(out)
}

/// A chunk of an ASF file
///
/// Chunks are matched against a closed set of known GUIDs. Anything else is kept as an
/// [`UnknownChunk`], which is written back byte for byte.
///
/// # Examples
///
/// ```rust
/// use tagcodec::asf::{Chunk, Guid};
/// use tagcodec::config::CodecOptions;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let mut bytes = vec![0xAB; 16];
/// bytes.extend_from_slice(&27u64.to_le_bytes());
/// bytes.extend_from_slice(b"foo");
///
/// let (chunk, consumed) = Chunk::read(&bytes, CodecOptions::new())?;
/// assert_eq!(consumed, 27);
/// assert_eq!(chunk.guid(), Guid::from_bytes([0xAB; 16]));
/// assert_eq!(chunk.write(CodecOptions::new())?, bytes);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum Chunk {
	/// The Header Object, a container for other chunks
	Header(HeaderChunk),
	/// A Stream Properties Object for an audio or video stream
	StreamProperties(StreamChunk),
	/// The Content Description Object
	ContentDescription(ContentDescriptionChunk),
	/// Any other chunk
	Unknown(UnknownChunk),
}

impl Chunk {
	/// Read a single chunk from the start of `source`
	///
	/// On success, this returns the chunk and the number of bytes it occupied, which is always its
	/// declared size.
	///
	/// # Errors
	///
	/// * The chunk header is incomplete, or declares a size larger than `source`
	/// * The chunk body does not match its declared size
	/// * Any error reading a known chunk's body
	pub fn read(source: &[u8], options: CodecOptions) -> Result<(Self, usize)> {
		let header = ChunkHeader::read(source)?;
		let payload = &source[CHUNK_HEADER_LEN..header.size];

		let chunk = match header.guid {
			Guid::HEADER_OBJECT => Chunk::Header(HeaderChunk::read(payload, options)?),
			Guid::STREAM_PROPERTIES_OBJECT => match StreamChunk::read(payload, options)? {
				Some(stream) => Chunk::StreamProperties(stream),
				None => Chunk::Unknown(UnknownChunk::read(header.guid, payload, options)?),
			},
			Guid::CONTENT_DESCRIPTION_OBJECT => {
				Chunk::ContentDescription(ContentDescriptionChunk::read(payload, options)?)
			},
			guid => {
				log::debug!("Keeping unknown chunk {guid} ({} bytes) as-is", header.size);
				Chunk::Unknown(UnknownChunk::read(guid, payload, options)?)
			},
		};

		Ok((chunk, header.size))
	}

	/// The chunk's GUID
	pub fn guid(&self) -> Guid {
		match self {
			Chunk::Header(_) => Guid::HEADER_OBJECT,
			Chunk::StreamProperties(_) => Guid::STREAM_PROPERTIES_OBJECT,
			Chunk::ContentDescription(_) => Guid::CONTENT_DESCRIPTION_OBJECT,
			Chunk::Unknown(unknown) => unknown.guid,
		}
	}

	/// Write the chunk, including its header
	///
	/// All sizes are recomputed.
	///
	/// # Errors
	///
	/// * A size no longer fits in its field
	/// * A header child fails to write
	pub fn write(&self, options: CodecOptions) -> Result<Vec<u8>> {
		let payload = match self {
			Chunk::Header(header) => header.write_payload(options)?,
			Chunk::StreamProperties(stream) => stream.write_payload()?,
			Chunk::ContentDescription(description) => description.write_payload()?,
			Chunk::Unknown(unknown) => return write_chunk(unknown.guid, &unknown.data),
		};

		write_chunk(self.guid(), &payload)
	}
}

/// A chunk with an unrecognized GUID, or a known GUID that could not be interpreted
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownChunk {
	guid: Guid,
	data: Vec<u8>,
}

impl UnknownChunk {
	/// Create a new `UnknownChunk`
	pub fn new(guid: Guid, data: Vec<u8>) -> Self {
		Self { guid, data }
	}

	pub(crate) fn read(guid: Guid, payload: &[u8], options: CodecOptions) -> Result<Self> {
		let mut data = try_vec![0; payload.len(), options.allocation_limit];
		data.copy_from_slice(payload);

		Ok(Self { guid, data })
	}

	/// The chunk's GUID
	pub fn guid(&self) -> Guid {
		self.guid
	}

	/// The chunk's payload, excluding the header
	pub fn data(&self) -> &[u8] {
		&self.data
	}
}
