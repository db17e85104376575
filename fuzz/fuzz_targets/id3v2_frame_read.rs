#![no_main]
use libfuzzer_sys::fuzz_target;
use tagcodec::config::CodecOptions;
use tagcodec::id3::v2::{Frame, Id3v2Version, ParsedFrame};

fuzz_target!(|data: &[u8]| {
	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		if let Ok(ParsedFrame::Next { frame, .. }) = Frame::read(data, version, CodecOptions::new())
		{
			let _ = frame.upgrade().write(Id3v2Version::V4, CodecOptions::new());
		}
	}
});
