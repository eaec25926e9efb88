//! Snapshot of the node a context menu was invoked on.
//!
//! The engine forwards a [`RawContextMenuParams`] (plain numbers and strings, safe to
//! ship across a process boundary). The dispatcher turns it into an immutable
//! [`ContextMenuParams`], which is the only form the host ever sees. Hosts cannot
//! construct a snapshot themselves.
//!
//! Fields describing media or edit capabilities only carry meaning when the matching
//! type flag is set. Use [`ContextMenuParams::media_state`] and
//! [`ContextMenuParams::edit_state`] to read them with that check applied.

use crate::menu::flags::{ContextMenuTypeFlags, EditStateFlags, MediaStateFlags, MediaType};
use serde::{Deserialize, Serialize};
use url::Url;

/// Context menu parameters as delivered by the engine, before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContextMenuParams {
    /// X coordinate of the mouse, relative to the render surface origin
    pub x: i32,
    /// Y coordinate of the mouse, relative to the render surface origin
    pub y: i32,
    /// Bits of [`ContextMenuTypeFlags`]
    pub type_flags: u32,
    pub link_url: String,
    pub unfiltered_link_url: String,
    pub source_url: String,
    pub page_url: String,
    pub frame_url: String,
    pub frame_charset: String,
    pub has_image_contents: bool,
    pub title_text: String,
    /// Numeric value of [`MediaType`]
    pub media_type: i32,
    /// Bits of [`MediaStateFlags`]
    pub media_state_flags: u32,
    pub selection_text: String,
    pub is_editable: bool,
    /// Bits of [`EditStateFlags`]
    pub edit_state_flags: u32,
}

/// Provides information about the context menu state.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenuParams {
    x: i32,
    y: i32,
    type_flags: ContextMenuTypeFlags,
    link_url: Option<Url>,
    unfiltered_link_url: String,
    source_url: Option<Url>,
    page_url: Option<Url>,
    frame_url: Option<Url>,
    frame_charset: String,
    has_image_contents: bool,
    title_text: String,
    media_type: MediaType,
    media_state_flags: MediaStateFlags,
    selection_text: String,
    is_editable: bool,
    edit_state_flags: EditStateFlags,
}

impl ContextMenuParams {
    /// Builds the snapshot from engine data. Unknown bits are dropped, unknown media
    /// types fall back to [`MediaType::None`] and unparseable URLs become absent.
    pub(crate) fn from_raw(raw: &RawContextMenuParams) -> Self {
        let media_type = MediaType::try_from(raw.media_type).unwrap_or_else(|e| {
            log::warn!("ContextMenuParams: {}, using MediaType::None", e);
            MediaType::None
        });

        Self {
            x: raw.x,
            y: raw.y,
            type_flags: ContextMenuTypeFlags::from_bits_truncate(raw.type_flags),
            link_url: parse_optional_url("link_url", &raw.link_url),
            unfiltered_link_url: raw.unfiltered_link_url.clone(),
            source_url: parse_optional_url("source_url", &raw.source_url),
            page_url: parse_optional_url("page_url", &raw.page_url),
            frame_url: parse_optional_url("frame_url", &raw.frame_url),
            frame_charset: raw.frame_charset.clone(),
            has_image_contents: raw.has_image_contents,
            title_text: raw.title_text.clone(),
            media_type,
            media_state_flags: MediaStateFlags::from_bits_truncate(raw.media_state_flags),
            selection_text: raw.selection_text.clone(),
            is_editable: raw.is_editable,
            edit_state_flags: EditStateFlags::from_bits_truncate(raw.edit_state_flags),
        }
    }

    /// X coordinate of the mouse where the menu was invoked, relative to the render surface.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y coordinate of the mouse where the menu was invoked, relative to the render surface.
    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Flags representing the type of node the menu was invoked on.
    pub fn type_flags(&self) -> ContextMenuTypeFlags {
        self.type_flags
    }

    pub fn has_type(&self, flag: ContextMenuTypeFlags) -> bool {
        self.type_flags.contains(flag)
    }

    /// URL of the link, if any, that encloses the node.
    pub fn link_url(&self) -> Option<&Url> {
        self.link_url.as_ref()
    }

    /// Link URL exactly as the page presented it. It is not validated and must only
    /// be used for "copy link address", never to decide where to navigate.
    pub fn unfiltered_link_url(&self) -> &str {
        &self.unfiltered_link_url
    }

    /// Source URL of the element (img, audio, video).
    pub fn source_url(&self) -> Option<&Url> {
        self.source_url.as_ref()
    }

    /// URL of the top level page.
    pub fn page_url(&self) -> Option<&Url> {
        self.page_url.as_ref()
    }

    /// URL of the subframe.
    pub fn frame_url(&self) -> Option<&Url> {
        self.frame_url.as_ref()
    }

    /// Character encoding of the subframe. Empty when unknown.
    pub fn frame_charset(&self) -> &str {
        &self.frame_charset
    }

    /// True if the menu was invoked on an image with non-empty contents.
    pub fn has_image_contents(&self) -> bool {
        self.has_image_contents
    }

    /// Title text, or alt text for images.
    pub fn title_text(&self) -> &str {
        &self.title_text
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn media_state_flags(&self) -> MediaStateFlags {
        self.media_state_flags
    }

    /// Media type and state, only when a media node is in context.
    pub fn media_state(&self) -> Option<(MediaType, MediaStateFlags)> {
        self.has_type(ContextMenuTypeFlags::MEDIA)
            .then_some((self.media_type, self.media_state_flags))
    }

    /// Selected text. Empty unless the selection type flag is set.
    pub fn selection_text(&self) -> &str {
        &self.selection_text
    }

    pub fn is_editable(&self) -> bool {
        self.is_editable
    }

    pub fn edit_state_flags(&self) -> EditStateFlags {
        self.edit_state_flags
    }

    /// Edit capabilities, only when an editable node is in context.
    pub fn edit_state(&self) -> Option<EditStateFlags> {
        self.has_type(ContextMenuTypeFlags::EDITABLE)
            .then_some(self.edit_state_flags)
    }
}

fn parse_optional_url(field: &str, value: &str) -> Option<Url> {
    if value.is_empty() {
        return None;
    }

    match Url::parse(value) {
        Ok(url) => Some(url),
        Err(e) => {
            log::warn!("ContextMenuParams: cannot parse {} '{}': {}", field, value, e);
            None
        }
    }
}
