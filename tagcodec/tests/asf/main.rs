#![allow(missing_docs)]

#[path = "../util/mod.rs"]
mod util;

use util::asf_chunk;

use tagcodec::asf::{
	Chunk, ContentDescriptionChunk, Guid, HeaderChunk, StreamChunk, StreamProperties,
	VideoStreamProperties,
};
use tagcodec::config::{CodecOptions, ParsingMode};
use tagcodec::error::ErrorKind;

fn xvid_stream_payload(type_specific_len: u32) -> Vec<u8> {
	let mut payload = Vec::new();
	payload.extend_from_slice(Guid::VIDEO_MEDIA.as_bytes());
	payload.extend_from_slice(Guid::NO_ERROR_CORRECTION.as_bytes());
	payload.extend_from_slice(&0u64.to_le_bytes()); // Time offset
	payload.extend_from_slice(&type_specific_len.to_le_bytes());
	payload.extend_from_slice(&0u32.to_le_bytes()); // Error correction data length
	payload.extend_from_slice(&1u16.to_le_bytes()); // Stream number 1
	payload.extend_from_slice(&0u32.to_le_bytes()); // Reserved

	// Encoded image size, flags, format data size
	payload.extend_from_slice(&640u32.to_le_bytes());
	payload.extend_from_slice(&480u32.to_le_bytes());
	payload.push(2);
	payload.extend_from_slice(&40u16.to_le_bytes());

	// BITMAPINFOHEADER
	payload.extend_from_slice(&40u32.to_le_bytes());
	payload.extend_from_slice(&640i32.to_le_bytes());
	payload.extend_from_slice(&480i32.to_le_bytes());
	payload.extend_from_slice(&1u16.to_le_bytes());
	payload.extend_from_slice(&24u16.to_le_bytes());
	payload.extend_from_slice(b"XVID");
	payload.extend_from_slice(&(640u32 * 480 * 3).to_le_bytes());
	payload.extend_from_slice(&[0; 16]);

	payload
}

#[test_log::test]
fn xvid_stream_from_bytes() {
	let bytes = asf_chunk(Guid::STREAM_PROPERTIES_OBJECT, &xvid_stream_payload(51));

	let (chunk, consumed) = Chunk::read(&bytes, CodecOptions::new()).unwrap();
	assert_eq!(consumed, bytes.len());

	let Chunk::StreamProperties(stream) = &chunk else {
		panic!("Expected a stream, got {chunk:?}");
	};
	assert_eq!(stream.stream_type(), Guid::VIDEO_MEDIA);
	assert_eq!(stream.stream_number(), 1);

	let video = stream.video().unwrap();
	assert_eq!(&video.codec_id, b"XVID");
	assert_eq!(video.width, 640);
	assert_eq!(video.height, 480);
	assert_eq!(video.image_size, 640 * 480 * 3);

	assert_eq!(chunk.write(CodecOptions::new()).unwrap(), bytes);
}

#[test_log::test]
fn oversized_type_specific_data() {
	let bytes = asf_chunk(Guid::STREAM_PROPERTIES_OBJECT, &xvid_stream_payload(4096));

	for mode in [
		ParsingMode::Strict,
		ParsingMode::BestAttempt,
		ParsingMode::Relaxed,
	] {
		let err = Chunk::read(&bytes, CodecOptions::new().parsing_mode(mode)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Corruption(_)));
	}
}

#[test_log::test]
fn header_with_unknown_and_broken_children() {
	let unknown = asf_chunk(Guid::from_bytes([0x42; 16]), b"opaque bytes");
	let broken = asf_chunk(Guid::STREAM_PROPERTIES_OBJECT, &xvid_stream_payload(4096));
	let stream = asf_chunk(Guid::STREAM_PROPERTIES_OBJECT, &xvid_stream_payload(51));

	let mut payload = 3u32.to_le_bytes().to_vec();
	payload.extend_from_slice(&[1, 2]);
	payload.extend_from_slice(&unknown);
	payload.extend_from_slice(&broken);
	payload.extend_from_slice(&stream);
	let bytes = asf_chunk(Guid::HEADER_OBJECT, &payload);

	let (chunk, _) = Chunk::read(&bytes, CodecOptions::new()).unwrap();
	let Chunk::Header(header) = &chunk else {
		panic!("Expected a header, got {chunk:?}");
	};

	let children = header.children();
	assert_eq!(children.len(), 3);
	assert!(matches!(children[0], Chunk::Unknown(_)));
	assert!(matches!(children[1], Chunk::Unknown(_)));
	assert!(matches!(children[2], Chunk::StreamProperties(_)));

	// Everything, including the broken child, is written back as it was
	assert_eq!(chunk.write(CodecOptions::new()).unwrap(), bytes);

	assert!(Chunk::read(&bytes, CodecOptions::new().parsing_mode(ParsingMode::Strict)).is_err());
}

#[test_log::test]
fn build_header() {
	let mut stream = StreamChunk::new(StreamProperties::Video(VideoStreamProperties::new(
		*b"WMV3", 1920, 1080,
	)));
	stream.set_stream_number(2).unwrap();

	let mut header = HeaderChunk::default();
	header.push(Chunk::StreamProperties(stream));
	header.push(Chunk::ContentDescription(ContentDescriptionChunk {
		title: String::from("Foo title"),
		author: String::from("Bar artist"),
		copyright: String::from("2024"),
		description: String::from("Baz description"),
		rating: String::new(),
	}));

	let bytes = Chunk::Header(header.clone())
		.write(CodecOptions::new())
		.unwrap();
	assert_eq!(&bytes[..16], Guid::HEADER_OBJECT.as_bytes());
	assert_eq!(
		u64::from_le_bytes(bytes[16..24].try_into().unwrap()),
		bytes.len() as u64
	);

	let (read, _) = Chunk::read(&bytes, CodecOptions::new()).unwrap();
	assert_eq!(read, Chunk::Header(header));
}

#[test_log::test]
fn guid_strings() {
	assert_eq!(
		Guid::STREAM_PROPERTIES_OBJECT.to_string(),
		"B7DC0791-A9B7-11CF-8EE6-00C00C205365"
	);
	assert_eq!(
		"bfc3cd50-618f-11cf-8bb2-00aa00b4e220"
			.parse::<Guid>()
			.unwrap(),
		Guid::AUDIO_SPREAD
	);
}
