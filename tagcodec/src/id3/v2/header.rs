/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// Get the version from the major version number of a tag header
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::id3::v2::Id3v2Version;
	///
	/// assert_eq!(Id3v2Version::from_major(3), Some(Id3v2Version::V3));
	/// assert_eq!(Id3v2Version::from_major(5), None);
	/// ```
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}

	/// The size of a frame header in this version
	pub fn frame_header_len(self) -> usize {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}
}
