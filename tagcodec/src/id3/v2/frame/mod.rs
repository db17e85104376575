mod body;
mod conversion;
pub(super) mod header;
mod read;
mod write;

pub use body::FrameBody;
pub use header::FrameId;
pub use read::ParsedFrame;

use super::header::Id3v2Version;

/// An `ID3v2` frame
///
/// A frame is an ID, a set of flags, and a [`FrameBody`] whose layout is determined by the ID.
///
/// # Examples
///
/// ```rust
/// use tagcodec::config::CodecOptions;
/// use tagcodec::field::FieldValue;
/// use tagcodec::id3::v2::{Frame, FrameId, Id3v2Version};
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let mut title = Frame::new(FrameId::new("TIT2")?, Id3v2Version::V4);
/// title
/// 	.body_mut()
/// 	.field_mut("Text")
/// 	.unwrap()
/// 	.set_value(FieldValue::Text(String::from("Foo title")))?;
///
/// let bytes = title.write(Id3v2Version::V4, CodecOptions::new())?;
/// assert_eq!(&bytes[..4], b"TIT2");
/// assert_eq!(bytes.len(), 10 + 1 + 9);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: FrameId,
	/// The frame's flags
	pub flags: FrameFlags,
	pub(crate) body: FrameBody,
	pub(crate) version: Id3v2Version,
}

impl Frame {
	/// Create an empty frame
	///
	/// `version` is the revision whose frame layouts `id` follows. This only matters for [`Frame::upgrade`].
	pub fn new(id: FrameId, version: Id3v2Version) -> Self {
		let body = FrameBody::for_id(id.as_str());
		Self {
			id,
			flags: FrameFlags::default(),
			body,
			version,
		}
	}

	/// Get the ID of the frame
	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// The revision the frame was read from, or created for
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// The frame's body
	pub fn body(&self) -> &FrameBody {
		&self.body
	}

	/// Mutable access to the frame's body
	pub fn body_mut(&mut self) -> &mut FrameBody {
		&mut self.body
	}

	/// The size of the body, as of the last read or write
	///
	/// This is `None` if a value changed since. It does not include the frame header, or any data
	/// added by the flags.
	pub fn size(&self) -> Option<usize> {
		self.body.size()
	}
}

/// Various flags to describe the content of an item
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	///
	/// This is cleared once the frame is decompressed, frames are never written compressed.
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// NOTE: Since the encryption method is unknown, the body of an encrypted frame is kept as-is.
	pub encryption: Option<u8>,
	/// Frame is unsynchronised
	///
	/// In short, this makes all "0xFF X (X >= 0xE0)" combinations into "0xFF 0x00 X" to avoid confusion
	/// with the MPEG frame header. This is cleared once the content is read, and never written.
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	///
	/// The data length indicator is the size of the frame if the flags were all zeroed out.
	/// It is **required** for encrypted frames.
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x4000 == 0x4000,
			file_alter_preservation: flags & 0x2000 == 0x2000,
			read_only: flags & 0x1000 == 0x1000,
			grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
			compression: flags & 0x0008 == 0x0008,
			encryption: (flags & 0x0004 == 0x0004).then_some(0),
			unsynchronisation: flags & 0x0002 == 0x0002,
			data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	pub fn parse_id3v23(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & 0x8000 == 0x8000,
			file_alter_preservation: flags & 0x4000 == 0x4000,
			read_only: flags & 0x2000 == 0x2000,
			grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
			compression: flags & 0x0080 == 0x0080,
			encryption: (flags & 0x0040 == 0x0040).then_some(0),
			unsynchronisation: false,
			data_length_indicator: None,
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, 0x4000),
			(self.file_alter_preservation, 0x2000),
			(self.read_only, 0x1000),
			(self.grouping_identity.is_some(), 0x0040),
			(self.compression, 0x0008),
			(self.encryption.is_some(), 0x0004),
			(self.unsynchronisation, 0x0002),
			(self.data_length_indicator.is_some(), 0x0001),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}

	/// Get the ID3v2.3 byte representation of the flags
	pub fn as_id3v23_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, 0x8000),
			(self.file_alter_preservation, 0x4000),
			(self.read_only, 0x2000),
			(self.grouping_identity.is_some(), 0x0020),
			(self.compression, 0x0080),
			(self.encryption.is_some(), 0x0040),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}
}
