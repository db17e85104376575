use super::FrameId;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::FrameFlags;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;

use byteorder::{BigEndian, ByteOrder};

/// A frame header, split from the rest of the frame
pub(in crate::id3::v2::frame) struct RawFrameHeader {
	pub(in crate::id3::v2::frame) id: Result<FrameId>,
	pub(in crate::id3::v2::frame) size: u32,
	pub(in crate::id3::v2::frame) flags: FrameFlags,
}

/// Parse a frame header from the start of `header`
///
/// Returns `None` if there is not enough data for a header, or if padding was reached.
///
/// A bad frame ID does not stop parsing, the size is still needed to skip the frame.
pub(in crate::id3::v2::frame) fn parse_header(
	header: &[u8],
	version: Id3v2Version,
) -> Option<RawFrameHeader> {
	let header = header.get(..version.frame_header_len())?;

	// Assume we just started reading padding
	if header[0] == 0 {
		return None;
	}

	if version == Id3v2Version::V2 {
		// V2 doesn't store flags
		return Some(RawFrameHeader {
			id: parse_id(&header[..3]),
			size: BigEndian::read_u24(&header[3..6]),
			flags: FrameFlags::default(),
		});
	}

	let synchsafe = version == Id3v2Version::V4;

	let mut size = BigEndian::read_u32(&header[4..8]);
	if synchsafe {
		size = size.unsynch();
	}

	// For some reason, some apps make v3 tags with v2 frame IDs.
	// The actual frame header is v3 though
	let mut id_end = 4;
	if header[3] == 0 && !synchsafe {
		log::warn!("Found a v2 frame ID in a v3 frame header");
		id_end = 3;
	}

	let flags = BigEndian::read_u16(&header[8..10]);
	let flags = if synchsafe {
		FrameFlags::parse_id3v24(flags)
	} else {
		FrameFlags::parse_id3v23(flags)
	};

	Some(RawFrameHeader {
		id: parse_id(&header[..id_end]),
		size,
		flags,
	})
}

fn parse_id(id_bytes: &[u8]) -> Result<FrameId> {
	let id_str = std::str::from_utf8(id_bytes)
		.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id_bytes.to_vec())))?;

	FrameId::new(id_str.to_owned())
}
