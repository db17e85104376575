//! Utilities for working with unsynchronized ID3v2 content

use crate::config::CodecOptions;
use crate::error::Result;
use crate::util::alloc::VecFallibleCapacity;

/// Remove the unsynchronisation scheme from frame content
///
/// Every `0xFF 0x00` pair is turned back into a lone `0xFF`. Any other byte following `0xFF` is left alone.
pub(crate) fn resynchronize(content: &[u8], options: CodecOptions) -> Result<Vec<u8>> {
	let mut out = Vec::try_with_capacity_stable(content.len(), options.allocation_limit)?;

	let mut encountered_ff = false;
	for byte in content.iter().copied() {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the byte if this is valid unsynchronization
			if byte == 0 {
				continue;
			}
		}

		out.push(byte);
		encountered_ff = byte == 0xFF;
	}

	Ok(out)
}

/// An integer that can be converted to and from synchsafe variants
pub(crate) trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// Fails if `self` doesn't fit in 28 bits
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		// 7 bits are available per byte
		const MAXIMUM_INTEGER: u32 = 0xFFF_FFFF;

		if self > MAXIMUM_INTEGER {
			crate::macros::err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}
