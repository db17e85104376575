use crate::error::{ErrorKind, Result, TagCodecError};
use crate::macros::corrupt;

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

use data_encoding::{HEXLOWER_PERMISSIVE, HEXUPPER};

/// A 128-bit ASF object identifier
///
/// The bytes are stored in wire order, where the first three groups of the canonical string
/// form are little endian.
///
/// # Examples
///
/// ```rust
/// use tagcodec::asf::Guid;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let header: Guid = "75B22630-668E-11CF-A6D9-00AA0062CE6C".parse()?;
/// assert_eq!(header, Guid::HEADER_OBJECT);
/// assert_eq!(&header.as_bytes()[..4], &[0x30, 0x26, 0xB2, 0x75]);
/// assert_eq!(header.to_string(), "75B22630-668E-11CF-A6D9-00AA0062CE6C");
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
	/// The top level Header Object
	pub const HEADER_OBJECT: Guid = Guid::from_fields(
		0x75B2_2630,
		0x668E,
		0x11CF,
		[0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C],
	);
	/// The Stream Properties Object
	pub const STREAM_PROPERTIES_OBJECT: Guid = Guid::from_fields(
		0xB7DC_0791,
		0xA9B7,
		0x11CF,
		[0x8E, 0xE6, 0x00, 0xC0, 0x0C, 0x20, 0x53, 0x65],
	);
	/// The Content Description Object
	pub const CONTENT_DESCRIPTION_OBJECT: Guid = Guid::from_fields(
		0x75B2_2633,
		0x668E,
		0x11CF,
		[0xA6, 0xD9, 0x00, 0xAA, 0x00, 0x62, 0xCE, 0x6C],
	);
	/// Stream type: audio
	pub const AUDIO_MEDIA: Guid = Guid::from_fields(
		0xF869_9E40,
		0x5B4D,
		0x11CF,
		[0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B],
	);
	/// Stream type: video
	pub const VIDEO_MEDIA: Guid = Guid::from_fields(
		0xBC19_EFC0,
		0x5B4D,
		0x11CF,
		[0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B],
	);
	/// Error correction type: none
	pub const NO_ERROR_CORRECTION: Guid = Guid::from_fields(
		0x20FB_5700,
		0x5B55,
		0x11CF,
		[0xA8, 0xFD, 0x00, 0x80, 0x5F, 0x5C, 0x44, 0x2B],
	);
	/// Error correction type: audio spread
	pub const AUDIO_SPREAD: Guid = Guid::from_fields(
		0xBFC3_CD50,
		0x618F,
		0x11CF,
		[0x8B, 0xB2, 0x00, 0xAA, 0x00, 0xB4, 0xE2, 0x20],
	);

	/// Create a `Guid` from its wire bytes
	pub const fn from_bytes(bytes: [u8; 16]) -> Self {
		Self(bytes)
	}

	/// Create a `Guid` from the groups of its canonical form
	///
	/// `data1`, `data2` and `data3` are the first three groups, `data4` holds the last two.
	pub const fn from_fields(data1: u32, data2: u16, data3: u16, data4: [u8; 8]) -> Self {
		let d1 = data1.to_le_bytes();
		let d2 = data2.to_le_bytes();
		let d3 = data3.to_le_bytes();

		Self([
			d1[0], d1[1], d1[2], d1[3], d2[0], d2[1], d3[0], d3[1], data4[0], data4[1], data4[2],
			data4[3], data4[4], data4[5], data4[6], data4[7],
		])
	}

	/// The wire bytes
	pub fn as_bytes(&self) -> &[u8; 16] {
		&self.0
	}

	pub(crate) fn read(source: &mut &[u8]) -> Result<Self> {
		let Some((guid, rest)) = source.split_first_chunk::<16>() else {
			return Err(corrupt!("Not enough data for a GUID"));
		};

		*source = rest;
		Ok(Self(*guid))
	}
}

impl Display for Guid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let b = &self.0;
		write!(
			f,
			"{}-{}-{}-{}-{}",
			HEXUPPER.encode(&[b[3], b[2], b[1], b[0]]),
			HEXUPPER.encode(&[b[5], b[4]]),
			HEXUPPER.encode(&[b[7], b[6]]),
			HEXUPPER.encode(&b[8..10]),
			HEXUPPER.encode(&b[10..]),
		)
	}
}

impl Debug for Guid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "Guid({self})")
	}
}

impl FromStr for Guid {
	type Err = TagCodecError;

	fn from_str(s: &str) -> Result<Self> {
		const GROUP_LENGTHS: [usize; 5] = [8, 4, 4, 4, 12];

		let groups = s.split('-').collect::<Vec<_>>();
		if groups.len() != GROUP_LENGTHS.len()
			|| groups
				.iter()
				.zip(GROUP_LENGTHS)
				.any(|(group, len)| group.len() != len)
		{
			return Err(TagCodecError::new(ErrorKind::InvalidField(
				"GUID must be in the form XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX",
			)));
		}

		let decoded = HEXLOWER_PERMISSIVE
			.decode(groups.concat().as_bytes())
			.map_err(|_| TagCodecError::new(ErrorKind::InvalidField("GUID contains non-hex digits")))?;

		let mut bytes = [0; 16];
		bytes.copy_from_slice(&decoded);

		// The first three groups are stored little endian
		bytes[..4].reverse();
		bytes[4..6].reverse();
		bytes[6..8].reverse();

		Ok(Self(bytes))
	}
}
