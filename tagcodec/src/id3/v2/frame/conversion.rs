use super::{Frame, FrameBody, FrameId};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::upgrade::{bridge_target, upgrade_v2, upgrade_v3};

use std::borrow::Cow;

impl FrameBody {
	/// Create a body for `id` from an older body carrying the same information
	///
	/// Every field of the new layout takes the value of the old field with the same identifier,
	/// without it being reinterpreted. Fields without a counterpart keep their default value.
	/// None of the fields have a size until the body is written.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	/// use tagcodec::id3::v2::FrameBody;
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let mut rvad = FrameBody::for_id("RVAD");
	/// rvad.read(&[0x03, 0x10, 0x01, 0x00, 0x02, 0x00], CodecOptions::new())?;
	///
	/// let rva2 = FrameBody::bridge("RVA2", &rvad);
	/// assert_eq!(rva2.fields()[0].value(), rvad.fields()[0].value());
	/// # Ok(()) }
	/// ```
	pub fn bridge(id: &str, old: &FrameBody) -> Self {
		let mut body = Self::for_id(id);
		for field in body.fields_mut() {
			let Some(old_field) = old.field(field.identifier()) else {
				log::debug!("No counterpart for field `{}` in {id}", field.identifier());
				continue;
			};

			if !field.copy_value_from(old_field) {
				log::warn!(
					"Field `{}` changed type in {id}, keeping the default value",
					field.identifier()
				);
			}
		}

		body
	}
}

impl Frame {
	/// Convert an outdated frame to its ID3v2.4 counterpart
	///
	/// ID3v2.2 and ID3v2.3 frames are mapped with [`upgrade_v2`] and [`upgrade_v3`], falling back
	/// to [`bridge_target`]. The body is carried over with [`FrameBody::bridge`], or kept as-is
	/// if the frame is encrypted.
	///
	/// Frames with no mapping are returned unchanged. Note that an ID3v2.2 frame with no mapping will
	/// keep its [`FrameId::Outdated`] ID, and cannot be written.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	/// use tagcodec::id3::v2::{Frame, Id3v2Version, ParsedFrame};
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let source = b"TT2\x00\x00\x04\x00Foo";
	/// let ParsedFrame::Next { frame, .. } = Frame::read(source, Id3v2Version::V2, CodecOptions::new())? else {
	/// 	unreachable!()
	/// };
	///
	/// let upgraded = frame.upgrade();
	/// assert_eq!(upgraded.id().as_str(), "TIT2");
	/// assert_eq!(upgraded.version(), Id3v2Version::V4);
	/// # Ok(()) }
	/// ```
	#[must_use]
	pub fn upgrade(self) -> Self {
		let id = self.id.as_str();
		let target = match self.version {
			Id3v2Version::V2 => upgrade_v2(id).or_else(|| bridge_target(id)),
			Id3v2Version::V3 => upgrade_v3(id).or_else(|| bridge_target(id)),
			Id3v2Version::V4 => None,
		};

		let Some(target) = target else {
			if self.id.is_outdated() {
				log::warn!("Unable to upgrade frame {}, it will not be written", self.id);
			}

			return self;
		};

		log::debug!("Upgrading frame {} to {target}", self.id);

		let body = if self.flags.encryption.is_some() {
			self.body
		} else {
			FrameBody::bridge(target, &self.body)
		};

		Frame {
			id: FrameId::Valid(Cow::Borrowed(target)),
			flags: self.flags,
			body,
			version: Id3v2Version::V4,
		}
	}
}
