#![no_main]
use libfuzzer_sys::fuzz_target;
use tagcodec::config::CodecOptions;
use tagcodec::iff::aiff::AiffTextChunks;

fuzz_target!(|data: &[u8]| {
	let _ = AiffTextChunks::read_form(data, CodecOptions::new());
	if let Ok(text_chunks) = AiffTextChunks::read_chunks(data, CodecOptions::new()) {
		let _ = text_chunks.write(CodecOptions::new());
	}
});
