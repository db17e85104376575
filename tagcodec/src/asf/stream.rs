use super::guid::Guid;
use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{corrupt, err, try_vec};

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

// Everything before the type-specific data
const STREAM_PROPERTIES_FIXED_LEN: usize = 54;

const STREAM_NUMBER_MASK: u16 = 0x007F;
const ENCRYPTED_CONTENT_FLAG: u16 = 0x8000;

/// The properties of a single audio or video stream
///
/// The kind of stream is fixed once the chunk is created. Streams of any other kind are read as
/// [`UnknownChunk`](crate::asf::UnknownChunk)s.
///
/// # Examples
///
/// ```rust
/// use tagcodec::asf::{Chunk, StreamChunk, StreamProperties, VideoStreamProperties};
/// use tagcodec::config::CodecOptions;
///
/// # fn main() -> tagcodec::error::Result<()> {
/// let video = VideoStreamProperties::new(*b"XVID", 640, 480);
/// let mut stream = StreamChunk::new(StreamProperties::Video(video));
/// stream.set_stream_number(2)?;
///
/// let bytes = Chunk::StreamProperties(stream.clone()).write(CodecOptions::new())?;
/// let (read, _) = Chunk::read(&bytes, CodecOptions::new())?;
/// assert_eq!(read, Chunk::StreamProperties(stream));
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamChunk {
	properties: StreamProperties,
	error_correction_type: Guid,
	time_offset: u64,
	stream_number: u8,
	content_encrypted: bool,
	// Flag bits with no defined meaning, kept so they can be written back
	reserved_flags: u16,
	reserved: u32,
	error_correction_data: Vec<u8>,
}

impl StreamChunk {
	/// Create a new stream with no error correction, numbered 1
	pub fn new(properties: StreamProperties) -> Self {
		Self {
			properties,
			error_correction_type: Guid::NO_ERROR_CORRECTION,
			time_offset: 0,
			stream_number: 1,
			content_encrypted: false,
			reserved_flags: 0,
			reserved: 0,
			error_correction_data: Vec::new(),
		}
	}

	/// Read a stream properties payload
	///
	/// This returns `None` for streams that are neither audio nor video.
	pub(crate) fn read(payload: &[u8], options: CodecOptions) -> Result<Option<Self>> {
		if payload.len() < STREAM_PROPERTIES_FIXED_LEN {
			corrupt!(@BAIL "Stream properties object is too short");
		}

		let mut reader = payload;

		let stream_type = Guid::read(&mut reader)?;
		let error_correction_type = Guid::read(&mut reader)?;
		let time_offset = reader.read_u64::<LittleEndian>()?;
		let type_specific_len = reader.read_u32::<LittleEndian>()? as usize;
		let error_correction_len = reader.read_u32::<LittleEndian>()? as usize;
		let flags = reader.read_u16::<LittleEndian>()?;
		let reserved = reader.read_u32::<LittleEndian>()?;

		// The object size decides where the stream ends, the inner sizes have to agree with it
		let end = STREAM_PROPERTIES_FIXED_LEN
			.checked_add(type_specific_len)
			.and_then(|len| len.checked_add(error_correction_len));
		if end != Some(payload.len()) {
			log::warn!(
				"Stream properties declare {type_specific_len} + {error_correction_len} bytes of \
				 data, the object holds {}",
				reader.len()
			);
			corrupt!(@BAIL "Stream properties sizes do not match the object size");
		}

		let (type_specific, error_correction) = reader.split_at(type_specific_len);

		let properties = match stream_type {
			Guid::AUDIO_MEDIA => {
				StreamProperties::Audio(AudioStreamProperties::read(type_specific, options)?)
			},
			Guid::VIDEO_MEDIA => {
				StreamProperties::Video(VideoStreamProperties::read(type_specific, options)?)
			},
			other => {
				log::debug!("Stream type {other} is neither audio nor video");
				return Ok(None);
			},
		};

		let mut error_correction_data =
			try_vec![0; error_correction.len(), options.allocation_limit];
		error_correction_data.copy_from_slice(error_correction);

		Ok(Some(Self {
			properties,
			error_correction_type,
			time_offset,
			stream_number: (flags & STREAM_NUMBER_MASK) as u8,
			content_encrypted: flags & ENCRYPTED_CONTENT_FLAG == ENCRYPTED_CONTENT_FLAG,
			reserved_flags: flags & !(STREAM_NUMBER_MASK | ENCRYPTED_CONTENT_FLAG),
			reserved,
			error_correction_data,
		}))
	}

	pub(crate) fn write_payload(&self) -> Result<Vec<u8>> {
		let type_specific = self.properties.write()?;

		let (Ok(type_specific_len), Ok(error_correction_len)) = (
			u32::try_from(type_specific.len()),
			u32::try_from(self.error_correction_data.len()),
		) else {
			err!(TooMuchData);
		};

		let mut flags = self.reserved_flags | u16::from(self.stream_number);
		if self.content_encrypted {
			flags |= ENCRYPTED_CONTENT_FLAG;
		}

		let mut out = Vec::with_capacity(
			STREAM_PROPERTIES_FIXED_LEN + type_specific.len() + self.error_correction_data.len(),
		);
		out.extend_from_slice(self.stream_type().as_bytes());
		out.extend_from_slice(self.error_correction_type.as_bytes());
		out.write_u64::<LittleEndian>(self.time_offset)?;
		out.write_u32::<LittleEndian>(type_specific_len)?;
		out.write_u32::<LittleEndian>(error_correction_len)?;
		out.write_u16::<LittleEndian>(flags)?;
		out.write_u32::<LittleEndian>(self.reserved)?;
		out.extend(type_specific);
		out.extend_from_slice(&self.error_correction_data);

		Ok(out)
	}

	/// The stream type GUID
	pub fn stream_type(&self) -> Guid {
		match self.properties {
			StreamProperties::Audio(_) => Guid::AUDIO_MEDIA,
			StreamProperties::Video(_) => Guid::VIDEO_MEDIA,
		}
	}

	/// The type-specific properties
	pub fn properties(&self) -> &StreamProperties {
		&self.properties
	}

	/// The audio properties, if this is an audio stream
	pub fn audio(&self) -> Option<&AudioStreamProperties> {
		match &self.properties {
			StreamProperties::Audio(audio) => Some(audio),
			StreamProperties::Video(_) => None,
		}
	}

	/// Mutable access to the audio properties, if this is an audio stream
	pub fn audio_mut(&mut self) -> Option<&mut AudioStreamProperties> {
		match &mut self.properties {
			StreamProperties::Audio(audio) => Some(audio),
			StreamProperties::Video(_) => None,
		}
	}

	/// The video properties, if this is a video stream
	pub fn video(&self) -> Option<&VideoStreamProperties> {
		match &self.properties {
			StreamProperties::Video(video) => Some(video),
			StreamProperties::Audio(_) => None,
		}
	}

	/// Mutable access to the video properties, if this is a video stream
	pub fn video_mut(&mut self) -> Option<&mut VideoStreamProperties> {
		match &mut self.properties {
			StreamProperties::Video(video) => Some(video),
			StreamProperties::Audio(_) => None,
		}
	}

	/// The stream number, in `1..=127`
	pub fn stream_number(&self) -> u8 {
		self.stream_number
	}

	/// Set the stream number
	///
	/// # Errors
	///
	/// `number` does not fit in 7 bits
	pub fn set_stream_number(&mut self, number: u8) -> Result<()> {
		if u16::from(number) > STREAM_NUMBER_MASK {
			err!(ValueMismatch("stream numbers are at most 127"));
		}

		self.stream_number = number;
		Ok(())
	}

	/// Whether the stream's content is encrypted
	pub fn content_encrypted(&self) -> bool {
		self.content_encrypted
	}

	/// Set whether the stream's content is encrypted
	pub fn set_content_encrypted(&mut self, encrypted: bool) {
		self.content_encrypted = encrypted;
	}

	/// The presentation time offset of the stream, in 100-nanosecond units
	pub fn time_offset(&self) -> u64 {
		self.time_offset
	}

	/// Set the presentation time offset
	pub fn set_time_offset(&mut self, time_offset: u64) {
		self.time_offset = time_offset;
	}

	/// The error correction type GUID
	pub fn error_correction_type(&self) -> Guid {
		self.error_correction_type
	}

	/// The error correction data
	pub fn error_correction_data(&self) -> &[u8] {
		&self.error_correction_data
	}

	/// Set the error correction type and its data
	pub fn set_error_correction(&mut self, error_correction_type: Guid, data: Vec<u8>) {
		self.error_correction_type = error_correction_type;
		self.error_correction_data = data;
	}

	/// The size of the type-specific data, as it would be written
	pub fn type_specific_data_len(&self) -> usize {
		match &self.properties {
			StreamProperties::Audio(audio) => audio.len(),
			StreamProperties::Video(video) => video.len(),
		}
	}

	/// The size of the error correction data
	pub fn error_correction_data_len(&self) -> usize {
		self.error_correction_data.len()
	}
}

/// The type-specific part of a [`StreamChunk`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StreamProperties {
	/// An audio stream
	Audio(AudioStreamProperties),
	/// A video stream
	Video(VideoStreamProperties),
}

impl StreamProperties {
	fn write(&self) -> Result<Vec<u8>> {
		match self {
			StreamProperties::Audio(audio) => audio.write(),
			StreamProperties::Video(video) => video.write(),
		}
	}
}

const WAVEFORMAT_LEN: usize = 16;

/// The properties of an audio stream, stored as a `WAVEFORMATEX`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AudioStreamProperties {
	/// The format tag, such as `0x0161` for WMA
	pub codec_id: u16,
	/// Channel count
	pub channels: u16,
	/// Sample rate, in Hz
	pub sample_rate: u32,
	/// Average number of bytes per second
	pub average_bytes_per_second: u32,
	/// Block alignment, in bytes
	pub block_align: u16,
	/// Bits per sample
	pub bits_per_sample: u16,
	/// Codec specific data
	///
	/// This is `None` if the structure does not even store its size.
	pub codec_specific_data: Option<Vec<u8>>,
}

impl AudioStreamProperties {
	fn read(data: &[u8], options: CodecOptions) -> Result<Self> {
		if data.len() < WAVEFORMAT_LEN {
			corrupt!(@BAIL "Audio stream properties are too short");
		}

		let mut reader = data;
		let mut properties = Self {
			codec_id: reader.read_u16::<LittleEndian>()?,
			channels: reader.read_u16::<LittleEndian>()?,
			sample_rate: reader.read_u32::<LittleEndian>()?,
			average_bytes_per_second: reader.read_u32::<LittleEndian>()?,
			block_align: reader.read_u16::<LittleEndian>()?,
			bits_per_sample: reader.read_u16::<LittleEndian>()?,
			codec_specific_data: None,
		};

		if reader.is_empty() {
			return Ok(properties);
		}

		let codec_specific_len = reader.read_u16::<LittleEndian>()? as usize;
		if codec_specific_len != reader.len() {
			corrupt!(@BAIL "Codec specific data size does not match the audio stream properties");
		}

		let mut codec_specific_data = try_vec![0; codec_specific_len, options.allocation_limit];
		codec_specific_data.copy_from_slice(reader);
		properties.codec_specific_data = Some(codec_specific_data);

		Ok(properties)
	}

	fn len(&self) -> usize {
		WAVEFORMAT_LEN + self.codec_specific_data.as_ref().map_or(0, |data| 2 + data.len())
	}

	fn write(&self) -> Result<Vec<u8>> {
		let mut out = Vec::with_capacity(self.len());
		out.write_u16::<LittleEndian>(self.codec_id)?;
		out.write_u16::<LittleEndian>(self.channels)?;
		out.write_u32::<LittleEndian>(self.sample_rate)?;
		out.write_u32::<LittleEndian>(self.average_bytes_per_second)?;
		out.write_u16::<LittleEndian>(self.block_align)?;
		out.write_u16::<LittleEndian>(self.bits_per_sample)?;

		if let Some(data) = &self.codec_specific_data {
			let Ok(len) = u16::try_from(data.len()) else {
				err!(TooMuchData);
			};

			out.write_u16::<LittleEndian>(len)?;
			out.extend_from_slice(data);
		}

		Ok(out)
	}
}

// Picture width and height, flags, and the format data size
const VIDEO_FIXED_LEN: usize = 11;
const BITMAP_INFO_HEADER_LEN: usize = 40;

/// The properties of a video stream
///
/// This is the encoded picture size, followed by a `BITMAPINFOHEADER`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VideoStreamProperties {
	/// The width of the encoded image, in pixels
	pub width: u32,
	/// The height of the encoded image, in pixels
	pub height: u32,
	/// Reserved, should be 2
	pub flags: u8,
	/// The image width as stored in the `BITMAPINFOHEADER`
	pub bitmap_width: i32,
	/// The image height as stored in the `BITMAPINFOHEADER`
	pub bitmap_height: i32,
	/// Reserved, should be 1
	pub reserved: u16,
	/// Bits per pixel
	pub bits_per_pixel: u16,
	/// The compression ID, usually a FourCC such as `XVID`
	pub codec_id: [u8; 4],
	/// The size of the image
	pub image_size: u32,
	/// Horizontal resolution, in pixels per meter
	pub horizontal_pixels_per_meter: i32,
	/// Vertical resolution, in pixels per meter
	pub vertical_pixels_per_meter: i32,
	/// The number of color indices in the color table
	pub colors_used: u32,
	/// The number of color indices required to display the image
	pub important_colors: u32,
	/// Codec specific data
	pub codec_data: Vec<u8>,
}

impl VideoStreamProperties {
	/// Create a new set of video properties
	///
	/// The `BITMAPINFOHEADER` gets the same dimensions, with 24 bits per pixel.
	pub fn new(codec_id: [u8; 4], width: u32, height: u32) -> Self {
		Self {
			width,
			height,
			flags: 2,
			bitmap_width: width as i32,
			bitmap_height: height as i32,
			reserved: 1,
			bits_per_pixel: 24,
			codec_id,
			image_size: 0,
			horizontal_pixels_per_meter: 0,
			vertical_pixels_per_meter: 0,
			colors_used: 0,
			important_colors: 0,
			codec_data: Vec::new(),
		}
	}

	fn read(data: &[u8], options: CodecOptions) -> Result<Self> {
		if data.len() < VIDEO_FIXED_LEN + BITMAP_INFO_HEADER_LEN {
			corrupt!(@BAIL "Video stream properties are too short");
		}

		let mut reader = data;

		let width = reader.read_u32::<LittleEndian>()?;
		let height = reader.read_u32::<LittleEndian>()?;
		let flags = reader.read_u8()?;
		let format_data_size = reader.read_u16::<LittleEndian>()? as usize;
		if format_data_size != reader.len() {
			corrupt!(@BAIL "Format data size does not match the video stream properties");
		}

		let bitmap_info_size = reader.read_u32::<LittleEndian>()?;
		if bitmap_info_size as usize != format_data_size {
			log::warn!(
				"BITMAPINFOHEADER size ({bitmap_info_size}) differs from the format data size \
				 ({format_data_size})"
			);
		}

		let bitmap_width = reader.read_i32::<LittleEndian>()?;
		let bitmap_height = reader.read_i32::<LittleEndian>()?;
		let reserved = reader.read_u16::<LittleEndian>()?;
		let bits_per_pixel = reader.read_u16::<LittleEndian>()?;

		let mut codec_id = [0; 4];
		reader.read_exact(&mut codec_id)?;

		let image_size = reader.read_u32::<LittleEndian>()?;
		let horizontal_pixels_per_meter = reader.read_i32::<LittleEndian>()?;
		let vertical_pixels_per_meter = reader.read_i32::<LittleEndian>()?;
		let colors_used = reader.read_u32::<LittleEndian>()?;
		let important_colors = reader.read_u32::<LittleEndian>()?;

		let mut codec_data = try_vec![0; reader.len(), options.allocation_limit];
		codec_data.copy_from_slice(reader);

		log::trace!(
			"Video stream: {}, {width}x{height}",
			String::from_utf8_lossy(&codec_id)
		);

		Ok(Self {
			width,
			height,
			flags,
			bitmap_width,
			bitmap_height,
			reserved,
			bits_per_pixel,
			codec_id,
			image_size,
			horizontal_pixels_per_meter,
			vertical_pixels_per_meter,
			colors_used,
			important_colors,
			codec_data,
		})
	}

	fn len(&self) -> usize {
		VIDEO_FIXED_LEN + BITMAP_INFO_HEADER_LEN + self.codec_data.len()
	}

	fn write(&self) -> Result<Vec<u8>> {
		let Ok(format_data_size) = u16::try_from(BITMAP_INFO_HEADER_LEN + self.codec_data.len())
		else {
			err!(TooMuchData);
		};

		let mut out = Vec::with_capacity(self.len());
		out.write_u32::<LittleEndian>(self.width)?;
		out.write_u32::<LittleEndian>(self.height)?;
		out.write_u8(self.flags)?;
		out.write_u16::<LittleEndian>(format_data_size)?;

		out.write_u32::<LittleEndian>(u32::from(format_data_size))?;
		out.write_i32::<LittleEndian>(self.bitmap_width)?;
		out.write_i32::<LittleEndian>(self.bitmap_height)?;
		out.write_u16::<LittleEndian>(self.reserved)?;
		out.write_u16::<LittleEndian>(self.bits_per_pixel)?;
		out.extend_from_slice(&self.codec_id);
		out.write_u32::<LittleEndian>(self.image_size)?;
		out.write_i32::<LittleEndian>(self.horizontal_pixels_per_meter)?;
		out.write_i32::<LittleEndian>(self.vertical_pixels_per_meter)?;
		out.write_u32::<LittleEndian>(self.colors_used)?;
		out.write_u32::<LittleEndian>(self.important_colors)?;
		out.extend_from_slice(&self.codec_data);

		Ok(out)
	}
}

#[cfg(test)]
mod tests {
	use crate::asf::{
		AudioStreamProperties, Chunk, Guid, StreamChunk, StreamProperties, VideoStreamProperties,
	};
	use crate::config::CodecOptions;
	use crate::error::ErrorKind;

	fn read_stream(bytes: &[u8]) -> StreamChunk {
		match Chunk::read(bytes, CodecOptions::new()).unwrap() {
			(Chunk::StreamProperties(stream), consumed) => {
				assert_eq!(consumed, bytes.len());
				stream
			},
			(other, _) => panic!("Expected a stream chunk, got {other:?}"),
		}
	}

	fn xvid_chunk() -> Vec<u8> {
		let stream = StreamChunk::new(StreamProperties::Video(VideoStreamProperties::new(
			*b"XVID", 640, 480,
		)));
		Chunk::StreamProperties(stream)
			.write(CodecOptions::new())
			.unwrap()
	}

	#[test_log::test]
	fn xvid_video_stream_roundtrip() {
		let bytes = xvid_chunk();
		assert_eq!(bytes.len(), 24 + 54 + 11 + 40);

		// Type-specific data length, then the codec ID inside the BITMAPINFOHEADER
		assert_eq!(&bytes[24 + 40..24 + 44], &51u32.to_le_bytes());
		assert_eq!(&bytes[24 + 54 + 11 + 16..24 + 54 + 11 + 20], b"XVID");

		let stream = read_stream(&bytes);
		assert_eq!(stream.stream_type(), Guid::VIDEO_MEDIA);
		assert_eq!(stream.type_specific_data_len(), 51);
		assert_eq!(stream.error_correction_data_len(), 0);

		let video = stream.video().unwrap();
		assert_eq!(&video.codec_id, b"XVID");
		assert_eq!((video.width, video.height), (640, 480));
		assert_eq!((video.bitmap_width, video.bitmap_height), (640, 480));
		assert!(stream.audio().is_none());

		assert_eq!(
			Chunk::StreamProperties(stream)
				.write(CodecOptions::new())
				.unwrap(),
			bytes
		);
	}

	#[test_log::test]
	fn oversized_type_specific_data() {
		let mut bytes = xvid_chunk();
		bytes[24 + 40..24 + 44].copy_from_slice(&1000u32.to_le_bytes());

		let err = Chunk::read(&bytes, CodecOptions::new()).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Corruption(_)));
	}

	#[test_log::test]
	fn undersized_type_specific_data() {
		let mut bytes = xvid_chunk();
		bytes[24 + 40..24 + 44].copy_from_slice(&50u32.to_le_bytes());

		assert!(matches!(
			Chunk::read(&bytes, CodecOptions::new()).unwrap_err().kind(),
			ErrorKind::Corruption(_)
		));
	}

	#[test_log::test]
	fn audio_stream_with_error_correction() {
		let audio = AudioStreamProperties {
			codec_id: 0x0161,
			channels: 2,
			sample_rate: 44100,
			average_bytes_per_second: 16000,
			block_align: 0x0B9F,
			bits_per_sample: 16,
			codec_specific_data: Some(vec![0, 0x88, 0, 0, 0x0F, 0, 0, 0, 0, 0]),
		};

		let mut stream = StreamChunk::new(StreamProperties::Audio(audio.clone()));
		stream.set_stream_number(1).unwrap();
		stream.set_content_encrypted(true);
		stream.set_time_offset(500);
		stream.set_error_correction(
			Guid::AUDIO_SPREAD,
			vec![1, 0x9F, 0x0B, 0x9F, 0x0B, 1, 0, 0],
		);

		let bytes = Chunk::StreamProperties(stream.clone())
			.write(CodecOptions::new())
			.unwrap();
		let read = read_stream(&bytes);

		assert_eq!(read, stream);
		assert_eq!(read.audio(), Some(&audio));
		assert!(read.content_encrypted());
		assert_eq!(read.stream_number(), 1);
		assert_eq!(read.error_correction_type(), Guid::AUDIO_SPREAD);
		assert_eq!(read.error_correction_data_len(), 8);
		assert_eq!(read.type_specific_data_len(), 28);
	}

	#[test_log::test]
	fn waveformat_without_size_field() {
		let audio = AudioStreamProperties {
			codec_id: 1,
			channels: 1,
			sample_rate: 8000,
			..AudioStreamProperties::default()
		};

		let bytes = Chunk::StreamProperties(StreamChunk::new(StreamProperties::Audio(audio)))
			.write(CodecOptions::new())
			.unwrap();
		assert_eq!(bytes.len(), 24 + 54 + 16);

		let read = read_stream(&bytes);
		assert_eq!(read.audio().unwrap().codec_specific_data, None);
	}

	#[test_log::test]
	fn other_stream_types_stay_opaque() {
		let mut bytes = xvid_chunk();
		// Command media
		bytes[24..40].copy_from_slice(
			Guid::from_fields(
				0x59DA_CFC0,
				0x59E6,
				0x11D0,
				[0xA3, 0xAC, 0x00, 0xA0, 0xC9, 0x03, 0x48, 0xF6],
			)
			.as_bytes(),
		);

		let (chunk, _) = Chunk::read(&bytes, CodecOptions::new()).unwrap();
		assert!(matches!(chunk, Chunk::Unknown(_)));
		assert_eq!(chunk.guid(), Guid::STREAM_PROPERTIES_OBJECT);
		assert_eq!(chunk.write(CodecOptions::new()).unwrap(), bytes);
	}

	#[test_log::test]
	fn stream_number_range() {
		let mut stream = StreamChunk::new(StreamProperties::Video(VideoStreamProperties::new(
			*b"WMV3", 1, 1,
		)));

		assert!(stream.set_stream_number(127).is_ok());
		assert!(stream.set_stream_number(128).is_err());
		assert_eq!(stream.stream_number(), 127);
	}

	#[test_log::test]
	fn reserved_flag_bits_preserved() {
		let mut bytes = xvid_chunk();
		// Flags sit after both GUIDs, the time offset and both lengths
		let flags_offset = 24 + 16 + 16 + 8 + 4 + 4;
		bytes[flags_offset..flags_offset + 2].copy_from_slice(&0x0F03u16.to_le_bytes());

		let stream = read_stream(&bytes);
		assert_eq!(stream.stream_number(), 3);
		assert!(!stream.content_encrypted());
		assert_eq!(
			Chunk::StreamProperties(stream)
				.write(CodecOptions::new())
				.unwrap(),
			bytes
		);
	}
}
