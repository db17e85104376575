use crate::error::Result;
use crate::macros::{corrupt, err};

use std::marker::PhantomData;

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};

const IFF_CHUNK_HEADER_SIZE: usize = 8;

/// Walks the chunks of an IFF body
///
/// Each chunk is a FourCC, a `B` ordered 32-bit size, and that many bytes of content. Chunks
/// with an odd size are followed by a pad byte, which is not included in the size.
pub(crate) struct Chunks<'a, B>
where
	B: ByteOrder,
{
	pub fourcc: [u8; 4],
	pub size: u32,
	data: &'a [u8],
	_phantom: PhantomData<B>,
}

impl<'a, B: ByteOrder> Chunks<'a, B> {
	#[must_use]
	pub const fn new(data: &'a [u8]) -> Self {
		Self {
			fourcc: [0; 4],
			size: 0,
			data,
			_phantom: PhantomData,
		}
	}

	/// Move on to the next chunk header, returning `false` once there is no room for another
	pub fn next(&mut self) -> Result<bool> {
		if self.data.len() < IFF_CHUNK_HEADER_SIZE {
			return Ok(false);
		}

		let (fourcc, mut rest) = self.data.split_at(4);
		self.fourcc.copy_from_slice(fourcc);
		self.size = rest.read_u32::<B>()?;
		self.data = rest;

		Ok(true)
	}

	/// The content of the current chunk
	///
	/// This moves past the content, and the pad byte if there is one.
	pub fn content(&mut self) -> Result<&'a [u8]> {
		let size = self.size as usize;
		if size > self.data.len() {
			log::debug!(
				"Chunk {:?} declares {size} bytes, only {} remain",
				String::from_utf8_lossy(&self.fourcc),
				self.data.len()
			);
			corrupt!(@BAIL "Chunk size exceeds the remaining data");
		}

		let (content, rest) = self.data.split_at(size);
		self.data = rest;
		self.correct_position();

		Ok(content)
	}

	pub fn skip(&mut self) -> Result<()> {
		self.content().map(|_| ())
	}

	fn correct_position(&mut self) {
		// Chunks are expected to start on even boundaries, and are padded
		// with a 0 if necessary. This is NOT the null terminator of the value,
		// and it is NOT included in the chunk's size
		if self.size % 2 != 0 {
			self.data = self.data.get(1..).unwrap_or_default();
		}
	}
}

/// Append a chunk, padding it to an even boundary
pub(crate) fn write_chunk<B: ByteOrder>(
	writer: &mut Vec<u8>,
	fourcc: &[u8; 4],
	content: &[u8],
) -> Result<()> {
	let Ok(len) = u32::try_from(content.len()) else {
		err!(TooMuchData);
	};

	writer.extend(fourcc);
	writer.write_u32::<B>(len)?;
	writer.extend(content);

	if len % 2 != 0 {
		writer.push(0);
	}

	Ok(())
}
