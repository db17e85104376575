#![no_main]
use libfuzzer_sys::fuzz_target;
use tagcodec::asf::Chunk;
use tagcodec::config::CodecOptions;

fuzz_target!(|data: &[u8]| {
	if let Ok((chunk, _)) = Chunk::read(data, CodecOptions::new()) {
		let _ = chunk.write(CodecOptions::new());
	}
});
