use super::{Field, FieldValue};
use crate::config::CodecOptions;
use crate::error::Result;
use crate::macros::{err, try_vec};
use crate::util::text::{TextEncoding, decode_lossy, find_terminator};

use std::borrow::Cow;

const SEPARATOR: char = '\0';

/// Split a multi-value string on its null separators
///
/// Trailing empty values are dropped, but there is always at least one value. Splitting a
/// joined list only gives the list back when its last value is non-empty (or it is `[""]`), so
/// `["Rock", ""]` comes back as `["Rock"]`.
pub(crate) fn split_values(value: &str) -> Vec<&str> {
	let mut values = value.split(SEPARATOR).collect::<Vec<_>>();
	while values.len() > 1 && values.last().is_some_and(|v| v.is_empty()) {
		values.pop();
	}

	values
}

pub(super) fn read_size_terminated(
	span: &[u8],
	encoding: TextEncoding,
	options: CodecOptions,
) -> Result<String> {
	let span = if options.copy_slices {
		let mut owned = try_vec![0; span.len(), options.allocation_limit];
		owned.copy_from_slice(span);
		Cow::Owned(owned)
	} else {
		Cow::Borrowed(span)
	};

	Ok(decode_lossy(&span, encoding).content)
}

pub(super) fn read_null_terminated(span: &[u8], encoding: TextEncoding) -> Result<(String, usize)> {
	let Some(end) = find_terminator(span, encoding) else {
		err!(InvalidField("missing null terminator"));
	};

	let decoded = decode_lossy(&span[..end], encoding);
	Ok((decoded.content, end + encoding.terminator_len()))
}

pub(super) fn write_size_terminated(
	value: &str,
	encoding: TextEncoding,
	options: CodecOptions,
) -> Result<Vec<u8>> {
	let mut text = value;
	if options.strip_trailing_terminator_on_write {
		text = text.strip_suffix(SEPARATOR).unwrap_or(text);
	}

	let values = split_values(text);

	// Splitting drops trailing terminators, they have to be put back to reproduce the input
	let trailing_terminators = if options.strip_trailing_terminator_on_write {
		0
	} else {
		text.len() - text.trim_end_matches(SEPARATOR).len()
	};

	let last = values.len() - 1;
	let mut out = Vec::new();
	for (index, segment) in values.into_iter().enumerate() {
		if index == last && trailing_terminators > 0 {
			let mut segment = segment.to_owned();
			segment.extend(std::iter::repeat_n(SEPARATOR, trailing_terminators));
			out.extend(encoding.encode(&segment, false, options)?);
			continue;
		}

		out.extend(encoding.encode(segment, index != last, options)?);
	}

	Ok(out)
}

impl Field {
	/// The number of null-separated values held
	///
	/// A text field always holds at least one (possibly empty) value. Non-text fields hold none.
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::field::{Field, FieldKind, FieldValue};
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let genres = Field::with_value(
	/// 	"Text",
	/// 	FieldKind::TextSizeTerminated,
	/// 	FieldValue::Text(String::from("Rock\0Pop")),
	/// )?;
	/// assert_eq!(genres.value_count(), 2);
	/// # Ok(()) }
	/// ```
	pub fn value_count(&self) -> usize {
		self.values().len()
	}

	/// Every null-separated value
	///
	/// Trailing empty values are not included, so `"Rock\0"` holds the single value `"Rock"`.
	pub fn values(&self) -> Vec<&str> {
		match &self.value {
			FieldValue::Text(text) => split_values(text),
			_ => Vec::new(),
		}
	}

	/// Get the value at `index`
	///
	/// # Errors
	///
	/// `index` is not within `0..value_count()`
	pub fn value_at(&self, index: usize) -> Result<&str> {
		let values = self.values();
		match values.get(index).copied() {
			Some(value) => Ok(value),
			None => err!(ValueOutOfRange {
				index,
				len: values.len()
			}),
		}
	}

	/// Add a value after the existing ones
	///
	/// This always adds a separator, so appending to an empty field yields an empty
	/// first value.
	///
	/// # Errors
	///
	/// The field does not hold text
	pub fn append_value(&mut self, value: &str) -> Result<()> {
		let FieldValue::Text(text) = &mut self.value else {
			err!(ValueMismatch("only text fields hold multiple values"));
		};

		text.push(SEPARATOR);
		text.push_str(value);
		self.invalidate_size();
		Ok(())
	}

	/// The value, with any trailing separators removed
	///
	/// # Examples
	///
	/// ```rust
	/// use tagcodec::field::{Field, FieldKind, FieldValue};
	///
	/// # fn main() -> tagcodec::error::Result<()> {
	/// let genre = Field::with_value(
	/// 	"Text",
	/// 	FieldKind::TextSizeTerminated,
	/// 	FieldValue::Text(String::from("Jazz\0")),
	/// )?;
	/// assert_eq!(genre.value_without_trailing_null(), "Jazz");
	/// # Ok(()) }
	/// ```
	pub fn value_without_trailing_null(&self) -> String {
		self.values().join("\0")
	}
}
