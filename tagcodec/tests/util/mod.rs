#![allow(dead_code)]

use tagcodec::asf::Guid;
use tagcodec::config::CodecOptions;
use tagcodec::id3::v2::{Frame, Id3v2Version, ParsedFrame};

/// Build a frame with no flags
pub fn id3v2_frame(id: &str, version: Id3v2Version, body: &[u8]) -> Vec<u8> {
	let mut out = id.as_bytes().to_vec();
	match version {
		Id3v2Version::V2 => out.extend_from_slice(&(body.len() as u32).to_be_bytes()[1..]),
		Id3v2Version::V3 => out.extend_from_slice(&(body.len() as u32).to_be_bytes()),
		Id3v2Version::V4 => {
			let len = body.len() as u32;
			let synch = (len & 0x7F)
				| ((len & 0x3F80) << 1)
				| ((len & 0x001F_C000) << 2)
				| ((len & 0x0FE0_0000) << 3);
			out.extend_from_slice(&synch.to_be_bytes());
		},
	}

	if version != Id3v2Version::V2 {
		out.extend_from_slice(&[0, 0]);
	}

	out.extend_from_slice(body);
	out
}

#[allow(clippy::missing_panics_doc)]
pub fn read_frame(bytes: &[u8], version: Id3v2Version, options: CodecOptions) -> Frame {
	match Frame::read(bytes, version, options).unwrap() {
		ParsedFrame::Next { frame, consumed } => {
			assert_eq!(consumed, bytes.len());
			frame
		},
		other => panic!("Expected a frame, got {other:?}"),
	}
}

pub fn asf_chunk(guid: Guid, payload: &[u8]) -> Vec<u8> {
	let mut out = guid.as_bytes().to_vec();
	out.extend_from_slice(&(24 + payload.len() as u64).to_le_bytes());
	out.extend_from_slice(payload);
	out
}

pub fn aiff_chunk(fourcc: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut out = fourcc.to_vec();
	out.extend_from_slice(&(content.len() as u32).to_be_bytes());
	out.extend_from_slice(content);
	if content.len() % 2 != 0 {
		out.push(0);
	}
	out
}

pub fn aiff_form(chunks: &[u8]) -> Vec<u8> {
	let mut out = b"FORM".to_vec();
	out.extend_from_slice(&(chunks.len() as u32 + 4).to_be_bytes());
	out.extend_from_slice(b"AIFF");
	out.extend_from_slice(chunks);
	out
}
