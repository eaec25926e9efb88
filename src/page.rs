//! Page handle passed to the context menu hook and to menu item callbacks.

use std::fmt::{Display, Formatter};
use url::Url;
use uuid::Uuid;

/// A unique identifier for a web page, represented as a UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Host-side view of the page a browser surface is showing.
///
/// The rendering surface itself is owned by the host toolkit; this handle only
/// carries what callbacks need to identify and describe the originating page.
#[derive(Debug, Clone, PartialEq)]
pub struct WebPage {
    id: PageId,
    url: Option<Url>,
    title: String,
}

impl WebPage {
    pub fn new() -> Self {
        Self {
            id: PageId::new(),
            url: None,
            title: String::new(),
        }
    }

    pub fn with_url(url: Url) -> Self {
        Self {
            url: Some(url),
            ..Self::new()
        }
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    pub fn set_url(&mut self, url: Url) {
        self.url = Some(url);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }
}

impl Default for WebPage {
    fn default() -> Self {
        Self::new()
    }
}
