//! AIFF specific items
//!
//! Only the text chunks are handled here: `NAME`, `AUTH`, `(c) `, `ANNO` and `COMT`. Their text is
//! read as ISO-8859-1.

mod read;
mod tag;

pub use tag::{AiffTextChunks, Comment};
