//! ID3 specific items
//!
//! Only ID3v2 frames are handled here. Locating and assembling the tag itself is left to the caller.

pub mod v2;
