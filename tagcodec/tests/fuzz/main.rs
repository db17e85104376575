#![allow(missing_docs)]

#[path = "../util/mod.rs"]
mod util;

use util::{aiff_chunk, asf_chunk, id3v2_frame};

use tagcodec::asf::{Chunk, Guid};
use tagcodec::config::{CodecOptions, ParsingMode};
use tagcodec::id3::v2::{Frame, Id3v2Version};
use tagcodec::iff::aiff::AiffTextChunks;

// Deterministic byte flips, so failures are reproducible
fn mutations(seed: &[u8]) -> impl Iterator<Item = Vec<u8>> + '_ {
	let mut state = 0x2545_F491_4F6C_DD1D_u64;
	(0..256).map(move |_| {
		let mut data = seed.to_vec();
		for _ in 0..4 {
			state ^= state << 13;
			state ^= state >> 7;
			state ^= state << 17;

			let index = (state % data.len() as u64) as usize;
			data[index] = (state >> 32) as u8;
		}
		data
	})
}

fn all_modes() -> [CodecOptions; 3] {
	[
		ParsingMode::Strict,
		ParsingMode::BestAttempt,
		ParsingMode::Relaxed,
	]
	.map(|mode| CodecOptions::new().parsing_mode(mode))
}

#[test_log::test]
fn id3v2_frames_never_panic() {
	let seeds = [
		(
			id3v2_frame("TXXX", Id3v2Version::V4, b"\x01\xFF\xFEa\x00\x00\x00b\x00"),
			Id3v2Version::V4,
		),
		(
			id3v2_frame("COMM", Id3v2Version::V3, b"\x00engdesc\x00text"),
			Id3v2Version::V3,
		),
		(
			id3v2_frame("PCNT", Id3v2Version::V4, &[0, 0, 0, 1]),
			Id3v2Version::V4,
		),
		(
			id3v2_frame("ULT", Id3v2Version::V2, b"\x00engd\x00lyrics"),
			Id3v2Version::V2,
		),
	];

	for (seed, version) in &seeds {
		for data in mutations(seed) {
			for options in all_modes() {
				let _ = Frame::read(&data, *version, options);
			}
		}
	}
}

#[test_log::test]
fn asf_chunks_never_panic() {
	let mut description = Vec::new();
	for len in [4u16, 2, 0, 0, 0] {
		description.extend_from_slice(&len.to_le_bytes());
	}
	description.extend_from_slice(&[b'a', 0, 0, 0, 0, 0]);

	let mut header = 1u32.to_le_bytes().to_vec();
	header.extend_from_slice(&[1, 2]);
	header.extend(asf_chunk(Guid::CONTENT_DESCRIPTION_OBJECT, &description));

	let mut nested = 1u32.to_le_bytes().to_vec();
	nested.extend_from_slice(&[1, 2]);
	nested.extend(asf_chunk(Guid::HEADER_OBJECT, &header));

	for seed in [
		asf_chunk(Guid::CONTENT_DESCRIPTION_OBJECT, &description),
		asf_chunk(Guid::HEADER_OBJECT, &header),
		asf_chunk(Guid::HEADER_OBJECT, &nested),
	] {
		for data in mutations(&seed) {
			for options in all_modes() {
				let _ = Chunk::read(&data, options);
			}
		}
	}
}

#[test_log::test]
fn aiff_chunks_never_panic() {
	let mut seed = aiff_chunk(b"NAME", b"Foo");
	seed.extend(aiff_chunk(b"COMT", b"\x00\x01\x00\x00\x00\x01\x00\x00\x00\x02ab"));
	seed.extend(aiff_chunk(b"ANNO", b"Bar"));

	for data in mutations(&seed) {
		for options in all_modes() {
			let _ = AiffTextChunks::read_chunks(&data, options);
		}
	}
}

#[test_log::test]
fn huge_declared_sizes() {
	let mut frame = id3v2_frame("APIC", Id3v2Version::V3, b"data");
	frame[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
	assert!(Frame::read(&frame, Id3v2Version::V3, CodecOptions::new()).is_err());

	let mut chunk = asf_chunk(Guid::from_bytes([1; 16]), b"data");
	chunk[16..24].copy_from_slice(&(u64::MAX / 2).to_le_bytes());
	assert!(Chunk::read(&chunk, CodecOptions::new()).is_err());

	assert!(AiffTextChunks::read_chunks(b"ANNO\xFF\xFF\xFF\xFFdata", CodecOptions::new()).is_err());
}
