//! Formats built on IFF chunks
//!
//! Chunks are identified by a FourCC, followed by a 32-bit size and the content. A chunk with an
//! odd size is followed by a pad byte.

pub mod aiff;
pub(crate) mod chunk;
