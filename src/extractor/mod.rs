//! Channel extraction from CZI containers
//!
//! This module turns an opened container into the plane data the export
//! stage writes out: it detects how the instrument stored the channels,
//! selects the sub-blocks of one channel and assembles them into an
//! ordered focal-plane stack.

mod plane;
mod layout;
mod channel_extractor;

pub use plane::{ChannelPlane, ChannelStack};
pub use layout::{detect_channel_layout, ChannelLayout};
pub use channel_extractor::ChannelExtractor;
