#![allow(missing_docs)]

#[path = "../util/mod.rs"]
mod util;

use util::{id3v2_frame, read_frame};

use tagcodec::config::{CodecOptions, ParsingMode};
use tagcodec::field::FieldValue;
use tagcodec::id3::v2::{Frame, FrameId, Id3v2Version, ParsedFrame};

fn read_all(mut source: &[u8], version: Id3v2Version, options: CodecOptions) -> Vec<Frame> {
	let mut frames = Vec::new();
	loop {
		match Frame::read(source, version, options).unwrap() {
			ParsedFrame::Next { frame, consumed } => {
				frames.push(frame);
				source = &source[consumed..];
			},
			ParsedFrame::Skip { consumed } => source = &source[consumed..],
			ParsedFrame::Eof => break,
		}
	}

	frames
}

#[test_log::test]
fn utf16_bom_hello() {
	let bytes = id3v2_frame(
		"TIT2",
		Id3v2Version::V3,
		&[
			0x01, 0xFF, 0xFE, b'H', 0, b'e', 0, b'l', 0, b'l', 0, b'o', 0,
		],
	);

	let mut frame = read_frame(&bytes, Id3v2Version::V3, CodecOptions::new());
	let text = frame.body().field("Text").unwrap();
	assert_eq!(text.value().as_text(), Some("Hello"));
	assert_eq!(text.size(), Some(12));

	assert_eq!(
		frame.write(Id3v2Version::V3, CodecOptions::new()).unwrap(),
		bytes
	);
}

#[test_log::test]
fn utf16_bom_hello_terminated() {
	let content = [
		0x01, 0xFF, 0xFE, b'H', 0, b'e', 0, b'l', 0, b'l', 0, b'o', 0, 0, 0,
	];
	let bytes = id3v2_frame("TIT2", Id3v2Version::V3, &content);

	let mut frame = read_frame(&bytes, Id3v2Version::V3, CodecOptions::new());
	let text = frame.body().field("Text").unwrap();
	assert_eq!(text.size(), Some(14));
	assert_eq!(text.value().as_text(), Some("Hello\0"));
	assert_eq!(text.values(), ["Hello"]);
	assert_eq!(text.value_at(0).unwrap(), "Hello");

	let options = CodecOptions::new().strip_trailing_terminator_on_write(false);
	assert_eq!(frame.write(Id3v2Version::V3, options).unwrap(), bytes);
	assert_eq!(
		frame.write(Id3v2Version::V3, CodecOptions::new()).unwrap(),
		id3v2_frame("TIT2", Id3v2Version::V3, &content[..13])
	);
}

#[test_log::test]
fn multiple_genres() {
	let bytes = id3v2_frame("TCON", Id3v2Version::V4, b"\x00Rock\x00Pop");

	let frame = read_frame(&bytes, Id3v2Version::V4, CodecOptions::new());
	let genres = frame.body().field("Text").unwrap();
	assert_eq!(genres.value_count(), 2);
	assert_eq!(genres.value_at(0).unwrap(), "Rock");
	assert_eq!(genres.value_at(1).unwrap(), "Pop");
	assert!(genres.value_at(2).is_err());
}

#[test_log::test]
fn trailing_terminator() {
	let bytes = id3v2_frame("TCON", Id3v2Version::V4, b"\x00Jazz\x00");

	let mut frame = read_frame(&bytes, Id3v2Version::V4, CodecOptions::new());
	assert_eq!(
		frame.write(Id3v2Version::V4, CodecOptions::new()).unwrap(),
		id3v2_frame("TCON", Id3v2Version::V4, b"\x00Jazz")
	);

	let keep = CodecOptions::new().strip_trailing_terminator_on_write(false);
	let mut frame = read_frame(&bytes, Id3v2Version::V4, keep);
	assert_eq!(frame.write(Id3v2Version::V4, keep).unwrap(), bytes);
}

#[test_log::test]
fn walk_frames_until_padding() {
	let mut tag = Vec::new();
	tag.extend(id3v2_frame("TIT2", Id3v2Version::V4, b"\x03Foo title"));
	// Not a valid ID, the frame is skipped
	tag.extend(id3v2_frame("T!T2", Id3v2Version::V4, b"\x00junk"));
	tag.extend(id3v2_frame(
		"COMM",
		Id3v2Version::V4,
		b"\x00engdesc\x00Qux comment",
	));
	tag.extend([0; 32]);

	let frames = read_all(&tag, Id3v2Version::V4, CodecOptions::new());
	let ids = frames.iter().map(|f| f.id().as_str()).collect::<Vec<_>>();
	assert_eq!(ids, ["TIT2", "COMM"]);

	let comment = frames[1].body();
	assert_eq!(
		comment.field("Language").unwrap().value().as_text(),
		Some("eng")
	);
	assert_eq!(
		comment.field("Text").unwrap().value().as_text(),
		Some("Qux comment")
	);

	let strict = CodecOptions::new().parsing_mode(ParsingMode::Strict);
	let mut source = &tag[..];
	let ParsedFrame::Next { consumed, .. } =
		Frame::read(source, Id3v2Version::V4, strict).unwrap()
	else {
		panic!("Expected TIT2");
	};
	source = &source[consumed..];
	assert!(Frame::read(source, Id3v2Version::V4, strict).is_err());
}

#[test_log::test]
fn id3v22_upgrade_chain() {
	let bytes = id3v2_frame("TT2", Id3v2Version::V2, b"\x00Foo title");
	let frame = read_frame(&bytes, Id3v2Version::V2, CodecOptions::new());
	assert!(frame.id().is_outdated());

	let mut upgraded = frame.upgrade();
	assert_eq!(upgraded.id(), &FrameId::new("TIT2").unwrap());
	assert_eq!(
		upgraded.write(Id3v2Version::V3, CodecOptions::new()).unwrap(),
		id3v2_frame("TIT2", Id3v2Version::V3, b"\x00Foo title")
	);
}

#[test_log::test]
fn volume_adjustment_bridge_preserves_payload() {
	let payload = [
		0x03, 0x10, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x00, 0x7F, 0x80,
	];
	let bytes = id3v2_frame("RVAD", Id3v2Version::V3, &payload);

	let mut upgraded = read_frame(&bytes, Id3v2Version::V3, CodecOptions::new()).upgrade();
	assert_eq!(upgraded.id().as_str(), "RVA2");
	assert_eq!(
		upgraded.body().field("Data").unwrap().value().as_binary(),
		Some(&payload[..])
	);

	assert_eq!(
		upgraded.write(Id3v2Version::V4, CodecOptions::new()).unwrap(),
		id3v2_frame("RVA2", Id3v2Version::V4, &payload)
	);
}

#[test_log::test]
fn declared_size_exceeds_source() {
	let mut bytes = id3v2_frame("TIT2", Id3v2Version::V3, b"\x00Foo");
	bytes[4..8].copy_from_slice(&0x7FFF_FFFFu32.to_be_bytes());

	for mode in [
		ParsingMode::Strict,
		ParsingMode::BestAttempt,
		ParsingMode::Relaxed,
	] {
		let options = CodecOptions::new().parsing_mode(mode);
		assert!(Frame::read(&bytes, Id3v2Version::V3, options).is_err());
	}
}

#[test_log::test]
fn unsupported_charset_skipped() {
	let bytes = id3v2_frame("TIT2", Id3v2Version::V4, b"\x07Foo");

	assert!(matches!(
		Frame::read(&bytes, Id3v2Version::V4, CodecOptions::new()).unwrap(),
		ParsedFrame::Skip { consumed: 14 }
	));
	assert!(
		Frame::read(
			&bytes,
			Id3v2Version::V4,
			CodecOptions::new().parsing_mode(ParsingMode::Strict)
		)
		.is_err()
	);
}

#[test_log::test]
fn build_new_comment() {
	let mut frame = Frame::new(FrameId::new("COMM").unwrap(), Id3v2Version::V4);
	let body = frame.body_mut();
	body.field_mut("TextEncoding")
		.unwrap()
		.set_value(FieldValue::Number(3))
		.unwrap();
	body.field_mut("Language")
		.unwrap()
		.set_value(FieldValue::Text(String::from("eng")))
		.unwrap();
	body.field_mut("Text")
		.unwrap()
		.set_value(FieldValue::Text(String::from("Qux \u{00e9}")))
		.unwrap();

	let written = frame.write(Id3v2Version::V4, CodecOptions::new()).unwrap();
	assert_eq!(
		written,
		id3v2_frame("COMM", Id3v2Version::V4, b"\x03eng\x00Qux \xC3\xA9")
	);

	let read = read_frame(&written, Id3v2Version::V4, CodecOptions::new());
	assert_eq!(
		read.body().field("Text").unwrap().value().as_text(),
		Some("Qux \u{00e9}")
	);
}

macro_rules! text_frame_roundtrip {
	($($id:ident),+) => {
		paste::paste! {
			$(
				#[test_log::test]
				fn [<roundtrip_ $id:lower>]() {
					for version in [Id3v2Version::V3, Id3v2Version::V4] {
						for body in [&b"\x00Foo"[..], b"\x01\xFF\xFEF\x00o\x00o\x00", b"\x03Foo\x00Bar"] {
							let bytes = id3v2_frame(stringify!($id), version, body);
							let mut frame = read_frame(&bytes, version, CodecOptions::new());
							assert_eq!(frame.write(version, CodecOptions::new()).unwrap(), bytes);
						}
					}
				}
			)+
		}
	};
}

text_frame_roundtrip!(TIT2, TPE1, TPE2, TALB, TCON, TDRC);
