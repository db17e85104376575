//! ID3v2 frames
//!
//! A frame is read with [`Frame::read`], which handles every revision of the frame header, and
//! written with [`Frame::write`]. Frames from older revisions can be brought up to date with
//! [`Frame::upgrade`].
//!
//! The tag header, extended header and footer are the caller's business.

mod frame;
pub(crate) mod header;
pub(crate) mod util;

pub use frame::{Frame, FrameBody, FrameFlags, FrameId, ParsedFrame};
pub use header::Id3v2Version;
pub use util::upgrade::{bridge_target, upgrade_v2, upgrade_v3};
