//! Flag sets and node classification for context menu invocations.
//!
//! Bit layouts match the embedding engine's own enumerations. Each category has
//! its own type so that a media flag can never be compared against an edit flag.

use crate::errors::DelegateError;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

bitflags! {
    /// Kind of node the context menu was invoked on. Multiple bits may be set at once.
    #[derive(Default)]
    pub struct ContextMenuTypeFlags: u32 {
        /// The top page is selected
        const PAGE      = 1 << 0;
        /// A subframe page is selected
        const FRAME     = 1 << 1;
        /// A link is selected
        const LINK      = 1 << 2;
        /// A media node is selected
        const MEDIA     = 1 << 3;
        /// There is a textual or mixed selection
        const SELECTION = 1 << 4;
        /// An editable element is selected
        const EDITABLE  = 1 << 5;
    }
}

bitflags! {
    /// State and capabilities of the media element in context.
    #[derive(Default)]
    pub struct MediaStateFlags: u32 {
        const ERROR               = 1 << 0;
        const PAUSED              = 1 << 1;
        const MUTED               = 1 << 2;
        const LOOP                = 1 << 3;
        const CAN_SAVE            = 1 << 4;
        const HAS_AUDIO           = 1 << 5;
        const HAS_VIDEO           = 1 << 6;
        const CONTROL_ROOT_ELEMENT = 1 << 7;
        const CAN_PRINT           = 1 << 8;
        const CAN_ROTATE          = 1 << 9;
    }
}

bitflags! {
    /// Actions supported by the editable node in context.
    #[derive(Default)]
    pub struct EditStateFlags: u32 {
        const CAN_UNDO       = 1 << 0;
        const CAN_REDO       = 1 << 1;
        const CAN_CUT        = 1 << 2;
        const CAN_COPY       = 1 << 3;
        const CAN_PASTE      = 1 << 4;
        const CAN_DELETE     = 1 << 5;
        const CAN_SELECT_ALL = 1 << 6;
        const CAN_TRANSLATE  = 1 << 7;
    }
}

impl Display for ContextMenuTypeFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if self.contains(ContextMenuTypeFlags::PAGE) {
            parts.push("Page");
        }
        if self.contains(ContextMenuTypeFlags::FRAME) {
            parts.push("Frame");
        }
        if self.contains(ContextMenuTypeFlags::LINK) {
            parts.push("Link");
        }
        if self.contains(ContextMenuTypeFlags::MEDIA) {
            parts.push("Media");
        }
        if self.contains(ContextMenuTypeFlags::SELECTION) {
            parts.push("Selection");
        }
        if self.contains(ContextMenuTypeFlags::EDITABLE) {
            parts.push("Editable");
        }

        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

/// Type of context node. Unlike the flag sets, exactly one value applies.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum MediaType {
    /// No special node is in context
    #[default]
    None = 0,
    /// An image node is selected
    Image = 1,
    /// A video node is selected
    Video = 2,
    /// An audio node is selected
    Audio = 3,
    /// A file node is selected
    File = 4,
    /// A plugin node is selected
    Plugin = 5,
}

impl From<MediaType> for i32 {
    fn from(value: MediaType) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for MediaType {
    type Error = DelegateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MediaType::None),
            1 => Ok(MediaType::Image),
            2 => Ok(MediaType::Video),
            3 => Ok(MediaType::Audio),
            4 => Ok(MediaType::File),
            5 => Ok(MediaType::Plugin),
            other => Err(DelegateError::InvalidMediaType(other)),
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::None => write!(f, "None"),
            MediaType::Image => write!(f, "Image"),
            MediaType::Video => write!(f, "Video"),
            MediaType::Audio => write!(f, "Audio"),
            MediaType::File => write!(f, "File"),
            MediaType::Plugin => write!(f, "Plugin"),
        }
    }
}
