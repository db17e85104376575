use crate::error::Result;
use crate::macros::err;

use byteorder::{BigEndian, ByteOrder};

pub(super) fn fits_in(number: u64, len: u8) -> bool {
	len >= 8 || number >> (u32::from(len) * 8) == 0
}

pub(super) fn read_fixed(span: &[u8], len: u8) -> Result<u64> {
	if !(1..=8).contains(&len) {
		err!(InvalidField("fixed length numbers must be 1-8 bytes"));
	}

	let Some(bytes) = span.get(..usize::from(len)) else {
		err!(InvalidField("fixed length number is too short"));
	};

	Ok(BigEndian::read_uint(bytes, bytes.len()))
}

pub(super) fn write_fixed(number: u64, len: u8) -> Result<Vec<u8>> {
	if !(1..=8).contains(&len) {
		err!(InvalidField("fixed length numbers must be 1-8 bytes"));
	}

	if !fits_in(number, len) {
		err!(ValueMismatch("number does not fit in its fixed length"));
	}

	let mut bytes = vec![0; usize::from(len)];
	BigEndian::write_uint(&mut bytes, number, usize::from(len));
	Ok(bytes)
}

pub(super) fn read_variable(span: &[u8], min: u8) -> Result<u64> {
	if span.len() < usize::from(min) {
		err!(InvalidField("variable length number is shorter than its minimum"));
	}

	// Counters may be padded with any number of leading zeroes
	let significant = match span.iter().position(|b| *b != 0) {
		Some(start) => &span[start..],
		None => return Ok(0),
	};

	if significant.len() > 8 {
		err!(InvalidField("variable length number does not fit in 64 bits"));
	}

	Ok(BigEndian::read_uint(significant, significant.len()))
}

pub(super) fn write_variable(number: u64, min: u8) -> Vec<u8> {
	let needed = (8 - number.leading_zeros() as usize / 8).max(1);
	let len = needed.max(usize::from(min));

	let mut bytes = vec![0; len];
	BigEndian::write_uint(&mut bytes[len - needed..], number, needed);
	bytes
}
