use super::header::parse::parse_header;
use super::{Frame, FrameBody, FrameFlags, FrameId};
use crate::config::{CodecOptions, ParsingMode};
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, resynchronize};
use crate::macros::corrupt;

use std::borrow::Cow;

use byteorder::{BigEndian, ReadBytesExt};

/// The outcome of reading a single frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedFrame {
	/// A frame was read
	Next {
		/// The frame
		frame: Frame,
		/// The number of bytes taken up by the frame, including its header
		consumed: usize,
	},
	/// A frame was present, but could not be read
	///
	/// This only happens outside of [`ParsingMode::Strict`].
	Skip {
		/// The number of bytes to skip to get to the next frame
		consumed: usize,
	},
	/// There are no more frames, either the data ran out or padding was reached
	Eof,
}

impl Frame {
	/// Read a single frame from the start of `source`
	///
	/// All of the frame headers are supported, as well as the flags that change the content
	/// (unsynchronisation, compression, grouping, data length indicators). The body of an
	/// encrypted frame is kept as a single opaque `Data` field.
	///
	/// # Errors
	///
	/// * The declared frame size exceeds `source`
	/// * [`ParsingMode::Strict`]: The frame ID is invalid, or the frame content is malformed
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::config::CodecOptions;
	/// use tagcodec::id3::v2::{Frame, Id3v2Version, ParsedFrame};
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let source = b"TIT2\x00\x00\x00\x04\x00\x00\x00Foo";
	///
	/// let ParsedFrame::Next { frame, consumed } =
	/// 	Frame::read(source, Id3v2Version::V4, CodecOptions::new())?
	/// else {
	/// 	unreachable!()
	/// };
	///
	/// assert_eq!(consumed, 14);
	/// assert_eq!(frame.body().field("Text").unwrap().value_at(0)?, "Foo");
	/// # Ok(()) }
	/// ```
	pub fn read(
		source: &[u8],
		version: Id3v2Version,
		options: CodecOptions,
	) -> Result<ParsedFrame> {
		let Some(header) = parse_header(source, version) else {
			return Ok(ParsedFrame::Eof);
		};

		let header_len = version.frame_header_len();
		let size = header.size as usize;
		let Some(content) = source.get(header_len..header_len + size) else {
			return Err(corrupt!("Frame size exceeds the remaining data"));
		};

		let consumed = header_len + size;
		let parsing_mode = options.parsing_mode;

		let id = match header.id {
			Ok(id) => id,
			Err(err) => match parsing_mode {
				ParsingMode::Strict => return Err(err),
				ParsingMode::BestAttempt | ParsingMode::Relaxed => {
					log::warn!("Failed to read frame header, skipping: {}", err);
					return Ok(ParsedFrame::Skip { consumed });
				},
			},
		};

		if size == 0 {
			if parsing_mode == ParsingMode::Strict {
				return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into());
			}

			log::debug!("Encountered a zero length frame ({id}), skipping");
			return Ok(ParsedFrame::Skip { consumed });
		}

		match read_content(content, &id, header.flags, version, options) {
			Ok((flags, body)) => Ok(ParsedFrame::Next {
				frame: Frame {
					id,
					flags,
					body,
					version,
				},
				consumed,
			}),
			Err(err) if err.is_structural() && parsing_mode != ParsingMode::Strict => {
				log::warn!("Failed to read frame {id}, skipping: {err}");
				Ok(ParsedFrame::Skip { consumed })
			},
			Err(err) => Err(err),
		}
	}
}

fn read_content(
	mut content: &[u8],
	id: &FrameId,
	mut flags: FrameFlags,
	version: Id3v2Version,
	options: CodecOptions,
) -> Result<(FrameFlags, FrameBody)> {
	// The additional data comes in a different order per version
	match version {
		Id3v2Version::V2 => {},
		Id3v2Version::V3 => {
			if flags.compression {
				log::trace!("Reading decompressed size");
				flags.data_length_indicator = Some(read_prefix_u32(&mut content)?);
			}

			if let Some(enc) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*enc = read_prefix_u8(&mut content)?;
			}

			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = read_prefix_u8(&mut content)?;
			}
		},
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = read_prefix_u8(&mut content)?;
			}

			if let Some(enc) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*enc = read_prefix_u8(&mut content)?;
			}

			// Some writers include a data length indicator
			// without setting its flag
			if flags.data_length_indicator.is_some() || flags.compression {
				log::trace!("Reading data length indicator");
				flags.data_length_indicator = Some(read_prefix_u32(&mut content)?.unsynch());
			}
		},
	}

	// Frames must have at least 1 byte, *after* all of the additional data flags can provide
	if content.is_empty() {
		return Err(Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into());
	}

	let mut content = Cow::Borrowed(content);
	if flags.unsynchronisation {
		content = Cow::Owned(resynchronize(&content, options)?);
		flags.unsynchronisation = false;
	}

	// Nothing further we can do with encrypted frames
	if flags.encryption.is_some() {
		if flags.data_length_indicator.is_none() {
			return Err(Id3v2Error::new(Id3v2ErrorKind::MissingDataLengthIndicator).into());
		}

		log::debug!("Keeping the content of encrypted frame {id} as-is");
		return Ok((flags, FrameBody::opaque(content.into_owned())));
	}

	if flags.compression {
		content = Cow::Owned(decompress(&content, flags.data_length_indicator, options)?);
		flags.compression = false;
		flags.data_length_indicator = None;
	}

	let mut body = FrameBody::for_id(id.as_str());
	body.read(&content, options)?;

	Ok((flags, body))
}

fn read_prefix_u8(content: &mut &[u8]) -> Result<u8> {
	content
		.read_u8()
		.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into())
}

fn read_prefix_u32(content: &mut &[u8]) -> Result<u32> {
	content
		.read_u32::<BigEndian>()
		.map_err(|_| Id3v2Error::new(Id3v2ErrorKind::BadFrameLength).into())
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(
	content: &[u8],
	decompressed_size: Option<u32>,
	options: CodecOptions,
) -> Result<Vec<u8>> {
	use crate::util::alloc::VecFallibleCapacity;
	use std::io::Read;

	let limit = options.allocation_limit;
	let capacity = decompressed_size.map_or(content.len(), |size| size as usize);

	let mut decompressed = Vec::try_with_capacity_stable(capacity.min(limit), limit)?;
	flate2::read::ZlibDecoder::new(content)
		.take(limit as u64 + 1)
		.read_to_end(&mut decompressed)
		.map_err(|err| Id3v2Error::new(Id3v2ErrorKind::Decompression(err)))?;

	if decompressed.len() > limit {
		crate::macros::err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
#[allow(clippy::unnecessary_wraps)]
fn decompress(_: &[u8], _: Option<u32>, _: CodecOptions) -> Result<Vec<u8>> {
	Err(Id3v2Error::new(Id3v2ErrorKind::CompressedFrameEncountered).into())
}

#[cfg(test)]
mod tests {
	use crate::config::{CodecOptions, ParsingMode};
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::{Frame, Id3v2Version, ParsedFrame};

	fn expect_frame(parsed: ParsedFrame) -> (Frame, usize) {
		match parsed {
			ParsedFrame::Next { frame, consumed } => (frame, consumed),
			other => panic!("Expected a frame, got {other:?}"),
		}
	}

	#[test_log::test]
	fn v2_header() {
		let source = b"TT2\x00\x00\x04\x00Foo";
		let (frame, consumed) =
			expect_frame(Frame::read(source, Id3v2Version::V2, CodecOptions::new()).unwrap());

		assert_eq!(consumed, 10);
		assert!(frame.id().is_outdated());
		assert_eq!(frame.id().as_str(), "TT2");
		assert_eq!(frame.body().field("Text").unwrap().value_at(0).unwrap(), "Foo");
	}

	#[test_log::test]
	fn v3_header_with_v2_id() {
		let source = b"TT2\x00\x00\x00\x00\x04\x00\x00\x00Foo";
		let (frame, _) =
			expect_frame(Frame::read(source, Id3v2Version::V3, CodecOptions::new()).unwrap());

		assert!(frame.id().is_outdated());
	}

	#[test_log::test]
	fn v4_synchsafe_size() {
		// 0x0101 synchsafe = 129 bytes
		let mut source = b"TXXX\x00\x00\x01\x01\x00\x00\x00".to_vec();
		source.push(0);
		source.extend(std::iter::repeat_n(b'a', 127));

		let (frame, consumed) =
			expect_frame(Frame::read(&source, Id3v2Version::V4, CodecOptions::new()).unwrap());

		assert_eq!(consumed, 139);
		assert_eq!(frame.size(), Some(129));
		assert_eq!(frame.body().field("Text").unwrap().value().as_text().unwrap().len(), 127);
	}

	#[test_log::test]
	fn padding_is_eof() {
		let parsed = Frame::read(&[0; 20], Id3v2Version::V4, CodecOptions::new()).unwrap();
		assert_eq!(parsed, ParsedFrame::Eof);

		let parsed = Frame::read(b"TIT2", Id3v2Version::V4, CodecOptions::new()).unwrap();
		assert_eq!(parsed, ParsedFrame::Eof);
	}

	#[test_log::test]
	fn size_exceeds_source() {
		let source = b"TIT2\x00\x00\x7F\x7F\x00\x00\x00Foo";
		let err = Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Corruption(_)));
	}

	#[test_log::test]
	fn bad_id_by_parsing_mode() {
		let source = b"tit2\x00\x00\x00\x04\x00\x00\x00FooTIT2";

		let parsed = Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap();
		assert_eq!(parsed, ParsedFrame::Skip { consumed: 14 });

		let strict = CodecOptions::new().parsing_mode(ParsingMode::Strict);
		let err = Frame::read(source, Id3v2Version::V4, strict).unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::BadFrameId(_))
		));
	}

	#[test_log::test]
	fn bad_body_does_not_poison_siblings() {
		// Unknown text encoding in the first frame
		let mut source = b"TIT2\x00\x00\x00\x04\x00\x00\x09Foo".to_vec();
		source.extend(b"TALB\x00\x00\x00\x04\x00\x00\x00Bar");

		let parsed = Frame::read(&source, Id3v2Version::V4, CodecOptions::new()).unwrap();
		let ParsedFrame::Skip { consumed } = parsed else {
			panic!("Expected the first frame to be skipped");
		};

		let (frame, _) = expect_frame(
			Frame::read(&source[consumed..], Id3v2Version::V4, CodecOptions::new()).unwrap(),
		);
		assert_eq!(frame.id().as_str(), "TALB");

		let strict = CodecOptions::new().parsing_mode(ParsingMode::Strict);
		let err = Frame::read(&source, Id3v2Version::V4, strict).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnsupportedCharset(9)));
	}

	#[test_log::test]
	fn unsynchronised_content() {
		// Flags: unsynchronisation
		let source = b"PRIV\x00\x00\x00\x04\x00\x02\xFF\x00\xE0\x01";
		let (frame, _) =
			expect_frame(Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap());

		assert!(!frame.flags.unsynchronisation);
		assert_eq!(
			frame.body().field("Data").unwrap().value().as_binary(),
			Some(&[0xFF, 0xE0, 0x01][..])
		);
	}

	#[test_log::test]
	fn grouped_frame() {
		// Flags: grouping identity
		let source = b"TIT2\x00\x00\x00\x05\x00\x40\x07\x00Foo";
		let (frame, _) =
			expect_frame(Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap());

		assert_eq!(frame.flags.grouping_identity, Some(7));
		assert_eq!(frame.body().field("Text").unwrap().value_at(0).unwrap(), "Foo");
	}

	#[test_log::test]
	fn encrypted_frame() {
		// Flags: encryption + data length indicator
		let source = b"TIT2\x00\x00\x00\x08\x00\x05\x80\x00\x00\x00\x03\xAA\xBB\xCC";
		let (frame, _) =
			expect_frame(Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap());

		assert_eq!(frame.flags.encryption, Some(0x80));
		assert_eq!(frame.flags.data_length_indicator, Some(3));
		assert_eq!(
			frame.body().field("Data").unwrap().value().as_binary(),
			Some(&[0xAA, 0xBB, 0xCC][..])
		);

		// Encrypted frames need a data length indicator
		let source = b"TIT2\x00\x00\x00\x04\x00\x04\x80\xAA\xBB\xCC";
		let strict = CodecOptions::new().parsing_mode(ParsingMode::Strict);
		let err = Frame::read(source, Id3v2Version::V4, strict).unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::MissingDataLengthIndicator)
		));
	}

	#[test_log::test]
	fn zero_length_frame() {
		let source = b"TIT2\x00\x00\x00\x00\x00\x00";
		let parsed = Frame::read(source, Id3v2Version::V4, CodecOptions::new()).unwrap();
		assert_eq!(parsed, ParsedFrame::Skip { consumed: 10 });
	}

	#[test_log::test]
	#[cfg(feature = "id3v2_compression_support")]
	fn compressed_frame() {
		use flate2::Compression;
		use flate2::write::ZlibEncoder;
		use std::io::Write;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"\x00Compressed title").unwrap();
		let compressed = encoder.finish().unwrap();

		// Flags: compression + data length indicator
		let mut source = b"TIT2".to_vec();
		source.extend(((compressed.len() + 4) as u32).to_be_bytes());
		source.extend([0x00, 0x09]);
		source.extend(17u32.to_be_bytes());
		source.extend(&compressed);

		let (frame, consumed) =
			expect_frame(Frame::read(&source, Id3v2Version::V4, CodecOptions::new()).unwrap());

		assert_eq!(consumed, source.len());
		assert!(!frame.flags.compression);
		assert_eq!(
			frame.body().field("Text").unwrap().value_at(0).unwrap(),
			"Compressed title"
		);
	}
}
