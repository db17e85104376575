use super::tag::{AiffTextChunks, Comment};
use crate::TextEncoding;
use crate::config::CodecOptions;
use crate::error::Result;
use crate::field::{Field, FieldContext, FieldKind};
use crate::iff::chunk::Chunks;
use crate::macros::{corrupt, err, parse_mode_choice};

use byteorder::{BigEndian, ReadBytesExt};

/// Verify the FORM header, returning the chunks it holds
pub(super) fn verify_aiff(data: &[u8]) -> Result<&[u8]> {
	let Some((id, body)) = data.split_first_chunk::<12>() else {
		err!(InvalidField("not enough data for a FORM header"));
	};

	if &id[..4] != b"FORM" {
		err!(InvalidField("missing FORM identifier"));
	}

	let compression_present = match &id[8..] {
		b"AIFF" => false,
		b"AIFC" => true,
		_ => err!(InvalidField("FORM type is not AIFF or AIFC")),
	};

	// The form type is included in the FORM size
	let form_size = u32::from_be_bytes([id[4], id[5], id[6], id[7]]) as usize;
	let body_len = form_size.saturating_sub(4);
	if body_len > body.len() {
		log::warn!(
			"FORM declares {body_len} bytes of chunks, only {} remain",
			body.len()
		);
	}

	log::debug!("Data verified to be AIFF, compression present: {compression_present}");
	Ok(&body[..body_len.min(body.len())])
}

/// Read the text of a chunk as a single size-terminated field
pub(super) fn read_text(content: &[u8], options: CodecOptions) -> Result<String> {
	let mut field = Field::new("Text", FieldKind::TextSizeTerminated);
	let context = FieldContext::with_encoding(TextEncoding::Latin1);

	let mut reader = content;
	field.read(&mut reader, content.len(), &context, options)?;

	Ok(field.value().as_text().unwrap_or_default().to_owned())
}

fn read_comments(content: &[u8], options: CodecOptions) -> Result<Vec<Comment>> {
	let mut reader = content;
	let num_comments = reader.read_u16::<BigEndian>()?;

	let mut comments = Vec::new();
	for _ in 0..num_comments {
		let timestamp = reader.read_u32::<BigEndian>()?;
		let marker_id = reader.read_u16::<BigEndian>()?;
		let size = reader.read_u16::<BigEndian>()? as usize;

		let Some(text) = reader.get(..size) else {
			corrupt!(@BAIL "Comment text exceeds the COMT chunk");
		};

		comments.push(Comment {
			timestamp,
			marker_id,
			text: read_text(text, options)?,
		});

		// Padded to an even boundary, same as chunks
		let padded = size + (size % 2);
		reader = reader.get(padded..).unwrap_or_default();
	}

	Ok(comments)
}

pub(super) fn read_text_chunks(data: &[u8], options: CodecOptions) -> Result<AiffTextChunks> {
	let parse_mode = options.parsing_mode;

	let mut text_chunks = AiffTextChunks::default();
	let mut annotations = Vec::new();
	let mut comments = Vec::new();

	let mut chunks = Chunks::<BigEndian>::new(data);

	while chunks.next()? {
		match &chunks.fourcc {
			b"ANNO" => {
				annotations.push(read_text(chunks.content()?, options)?);
			},
			// These four chunks are expected to appear at most once per file,
			// so there's no need to replace anything we already read
			b"COMT" if comments.is_empty() => {
				let content = chunks.content()?;
				match read_comments(content, options) {
					Ok(read) => comments = read,
					Err(e) => parse_mode_choice!(
						parse_mode,
						STRICT: return Err(e),
						DEFAULT: log::warn!("Skipping malformed COMT chunk: {e}")
					),
				}
			},
			b"NAME" if text_chunks.name.is_none() => {
				text_chunks.name = Some(read_text(chunks.content()?, options)?);
			},
			b"AUTH" if text_chunks.author.is_none() => {
				text_chunks.author = Some(read_text(chunks.content()?, options)?);
			},
			b"(c) " if text_chunks.copyright.is_none() => {
				text_chunks.copyright = Some(read_text(chunks.content()?, options)?);
			},
			fourcc => {
				log::trace!(
					"Skipping chunk {:?} ({} bytes)",
					String::from_utf8_lossy(fourcc),
					chunks.size
				);
				chunks.skip()?;
			},
		}
	}

	if !annotations.is_empty() {
		text_chunks.annotations = Some(annotations);
	}

	if !comments.is_empty() {
		text_chunks.comments = Some(comments);
	}

	Ok(text_chunks)
}
