use super::Frame;
use crate::config::CodecOptions;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::err;

use byteorder::{BigEndian, WriteBytesExt};

impl Frame {
	/// Write the frame, including its header
	///
	/// The size is recomputed from the body. Unsynchronisation and compression are never written.
	/// Encrypted frames are written back exactly as they were read.
	///
	/// # Errors
	///
	/// * `version` is [`Id3v2Version::V2`], or the ID is outdated
	/// * An encrypted frame has no data length indicator
	/// * The frame is too large for its header
	/// * Any error from [`FrameBody::write`](crate::id3::v2::FrameBody::write)
	pub fn write(&mut self, version: Id3v2Version, options: CodecOptions) -> Result<Vec<u8>> {
		if version == Id3v2Version::V2 || self.id.is_outdated() {
			log::warn!("Refusing to write frame {} as {:?}", self.id, version);
			return Err(Id3v2Error::new(Id3v2ErrorKind::UnsupportedVersion).into());
		}

		let mut flags = self.flags;
		flags.unsynchronisation = false;

		let is_encrypted = flags.encryption.is_some();
		if is_encrypted {
			if flags.data_length_indicator.is_none() {
				return Err(Id3v2Error::new(Id3v2ErrorKind::MissingDataLengthIndicator).into());
			}
		} else {
			flags.compression = false;
			flags.data_length_indicator = None;
		}

		let body = self.body.write(options)?;

		let mut prefix = Vec::new();
		if version == Id3v2Version::V4 {
			if let Some(group) = flags.grouping_identity {
				prefix.push(group);
			}

			if let Some(method) = flags.encryption {
				prefix.push(method);
			}

			if let Some(len) = flags.data_length_indicator {
				prefix.write_u32::<BigEndian>(len.synch()?)?;
			}
		} else {
			if let (true, Some(len)) = (flags.compression, flags.data_length_indicator) {
				prefix.write_u32::<BigEndian>(len)?;
			}

			if let Some(method) = flags.encryption {
				prefix.push(method);
			}

			if let Some(group) = flags.grouping_identity {
				prefix.push(group);
			}
		}

		let Ok(mut len) = u32::try_from(prefix.len() + body.len()) else {
			err!(TooMuchData);
		};

		let flag_bytes = if version == Id3v2Version::V4 {
			len = len.synch()?;
			flags.as_id3v24_bytes()
		} else {
			flags.as_id3v23_bytes()
		};

		log::trace!("Writing frame {} with {} bytes of content", self.id, body.len());

		let mut out = Vec::with_capacity(10 + prefix.len() + body.len());
		out.extend_from_slice(self.id.as_str().as_bytes());
		out.write_u32::<BigEndian>(len)?;
		out.write_u16::<BigEndian>(flag_bytes)?;
		out.extend(prefix);
		out.extend(body);

		Ok(out)
	}
}
