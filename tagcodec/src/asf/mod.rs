//! ASF (WMA/WMV) objects
//!
//! Every object, referred to here as a chunk, is laid out as:
//!
//! ```text
//! [16-byte GUID][u64 LE size of the entire chunk][payload]
//! ```
//!
//! Only the objects that carry stream properties or textual metadata are interpreted. Everything
//! else is kept as an [`UnknownChunk`] and written back unchanged.

mod chunk;
mod content_description;
mod guid;
mod header;
mod stream;

pub use chunk::{Chunk, UnknownChunk};
pub use content_description::ContentDescriptionChunk;
pub use guid::Guid;
pub use header::HeaderChunk;
pub use stream::{AudioStreamProperties, StreamChunk, StreamProperties, VideoStreamProperties};
