#![allow(missing_docs)]

#[path = "../util/mod.rs"]
mod util;

use util::{aiff_chunk, aiff_form};

use tagcodec::config::CodecOptions;
use tagcodec::error::ErrorKind;
use tagcodec::iff::aiff::{AiffTextChunks, Comment};

fn sample_form() -> Vec<u8> {
	let mut chunks = Vec::new();
	chunks.extend(aiff_chunk(b"COMM", &[0; 18]));
	chunks.extend(aiff_chunk(b"NAME", b"Foo title"));
	chunks.extend(aiff_chunk(b"AUTH", b"Bar artist"));
	chunks.extend(aiff_chunk(b"(c) ", b"1988 Apple Computer, Inc."));
	chunks.extend(aiff_chunk(b"ANNO", b"Qux annotation"));
	chunks.extend(aiff_chunk(b"SSND", &[0; 9]));
	chunks.extend(aiff_chunk(b"ANNO", b"Quux"));

	aiff_form(&chunks)
}

#[test_log::test]
fn read_text_chunks() {
	let text_chunks = AiffTextChunks::read_form(&sample_form(), CodecOptions::new()).unwrap();

	assert_eq!(text_chunks.name.as_deref(), Some("Foo title"));
	assert_eq!(text_chunks.author.as_deref(), Some("Bar artist"));
	assert_eq!(
		text_chunks.copyright.as_deref(),
		Some("1988 Apple Computer, Inc.")
	);
	assert_eq!(
		text_chunks.annotations,
		Some(vec![String::from("Qux annotation"), String::from("Quux")])
	);
}

#[test_log::test]
fn written_chunks_match_source() {
	let text_chunks = AiffTextChunks::read_form(&sample_form(), CodecOptions::new()).unwrap();

	let mut expected = Vec::new();
	expected.extend(aiff_chunk(b"NAME", b"Foo title"));
	expected.extend(aiff_chunk(b"AUTH", b"Bar artist"));
	expected.extend(aiff_chunk(b"(c) ", b"1988 Apple Computer, Inc."));
	expected.extend(aiff_chunk(b"ANNO", b"Qux annotation"));
	expected.extend(aiff_chunk(b"ANNO", b"Quux"));

	assert_eq!(text_chunks.write(CodecOptions::new()).unwrap(), expected);
}

#[test_log::test]
fn comments_roundtrip() {
	let text_chunks = AiffTextChunks {
		comments: Some(vec![Comment {
			timestamp: 0xAABB_CCDD,
			marker_id: 0,
			text: String::from("Foo comment"),
		}]),
		..AiffTextChunks::default()
	};

	let bytes = aiff_form(&text_chunks.write(CodecOptions::new()).unwrap());
	assert_eq!(
		AiffTextChunks::read_form(&bytes, CodecOptions::new()).unwrap(),
		text_chunks
	);
}

#[test_log::test]
fn truncated_chunk() {
	let mut form = sample_form();
	form.truncate(form.len() - 3);

	let err = AiffTextChunks::read_form(&form, CodecOptions::new()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Corruption(_)));
}

#[test_log::test]
fn not_aiff() {
	assert!(AiffTextChunks::read_form(b"RIFF\x00\x00\x00\x04WAVE", CodecOptions::new()).is_err());
}
