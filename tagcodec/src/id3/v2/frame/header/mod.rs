pub(super) mod parse;

use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// An `ID3v2` frame ID
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub enum FrameId {
	/// A valid `ID3v2.3/4` frame
	Valid(Cow<'static, str>),
	/// An `ID3v2.2` frame ID
	///
	/// This **will not** be written. See [`Frame::upgrade`](crate::id3::v2::Frame::upgrade).
	Outdated(Cow<'static, str>),
}

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// NOTE: This will not upgrade IDs.
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::id3::v2::FrameId;
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// assert!(FrameId::new("TPE1")?.is_valid());
	/// assert!(FrameId::new("TP1")?.is_outdated());
	/// assert!(FrameId::new("tpe1").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new<I>(id: I) -> Result<Self>
	where
		I: Into<Cow<'static, str>>,
	{
		let id = id.into();
		Self::verify_id(&id)?;

		match id.len() {
			3 => Ok(FrameId::Outdated(id)),
			4 => Ok(FrameId::Valid(id)),
			_ => Err(
				Id3v2Error::new(Id3v2ErrorKind::BadFrameId(id.into_owned().into_bytes())).into(),
			),
		}
	}

	/// Whether this frame ID represents an outdated (ID3v2.2) ID
	pub fn is_outdated(&self) -> bool {
		matches!(self, FrameId::Outdated(_))
	}

	/// Whether this frame ID represents a valid (ID3v2.3 or ID3v2.4) ID
	pub fn is_valid(&self) -> bool {
		matches!(self, FrameId::Valid(_))
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		match self {
			FrameId::Valid(v) | FrameId::Outdated(v) => v,
		}
	}

	fn verify_id(id_str: &str) -> Result<()> {
		if id_str
			.chars()
			.any(|c| !c.is_ascii_uppercase() && !c.is_ascii_digit())
		{
			return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameId(
				id_str.as_bytes().to_vec(),
			))
			.into());
		}

		Ok(())
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
