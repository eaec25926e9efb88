//! Host-side hooks into the browser surface.
//!
//! The host installs one [`BrowserEventDelegate`] per browser surface. The dispatcher calls
//! it synchronously on the surface's UI thread at four points of the engine lifecycle:
//!
//! | Hook | When | Decision |
//! |---|---|---|
//! | [`on_before_browse`](BrowserEventDelegate::on_before_browse) | before a navigation or redirect commits | `true` cancels |
//! | [`on_before_context_menu`](BrowserEventDelegate::on_before_context_menu) | before the native context menu shows | host fills the menu |
//! | [`on_before_popup`](BrowserEventDelegate::on_before_popup) | before a popup surface is created | `true` creates the default popup |
//! | [`on_pre_key_event`](BrowserEventDelegate::on_pre_key_event) | before a key event reaches the page | observation only |
//!
//! Calls never overlap and the hooks hold no state between calls on the dispatcher's side.
//! Every hook must return promptly: navigation and rendering wait on the answer.

use crate::errors::DelegateError;
use crate::events::KeyEvent;
use crate::menu::{ContextMenu, ContextMenuParams};
use crate::page::WebPage;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use url::Url;

/// The manner in which a link click should be opened.
///
/// The values match the engine's own window open disposition and must not be renumbered.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum WindowOpenDisposition {
    #[default]
    Unknown = 0,
    CurrentTab = 1,
    SingletonTab = 2,
    NewForegroundTab = 3,
    NewBackgroundTab = 4,
    NewPopup = 5,
    NewWindow = 6,
    SaveToDisk = 7,
    OffTheRecord = 8,
    IgnoreAction = 9,
}

impl From<WindowOpenDisposition> for i32 {
    fn from(value: WindowOpenDisposition) -> Self {
        value as i32
    }
}

impl TryFrom<i32> for WindowOpenDisposition {
    type Error = DelegateError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        use WindowOpenDisposition::*;

        match value {
            0 => Ok(Unknown),
            1 => Ok(CurrentTab),
            2 => Ok(SingletonTab),
            3 => Ok(NewForegroundTab),
            4 => Ok(NewBackgroundTab),
            5 => Ok(NewPopup),
            6 => Ok(NewWindow),
            7 => Ok(SaveToDisk),
            8 => Ok(OffTheRecord),
            9 => Ok(IgnoreAction),
            other => Err(DelegateError::InvalidDisposition(other)),
        }
    }
}

impl Display for WindowOpenDisposition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WindowOpenDisposition::Unknown => "Unknown",
            WindowOpenDisposition::CurrentTab => "CurrentTab",
            WindowOpenDisposition::SingletonTab => "SingletonTab",
            WindowOpenDisposition::NewForegroundTab => "NewForegroundTab",
            WindowOpenDisposition::NewBackgroundTab => "NewBackgroundTab",
            WindowOpenDisposition::NewPopup => "NewPopup",
            WindowOpenDisposition::NewWindow => "NewWindow",
            WindowOpenDisposition::SaveToDisk => "SaveToDisk",
            WindowOpenDisposition::OffTheRecord => "OffTheRecord",
            WindowOpenDisposition::IgnoreAction => "IgnoreAction",
        };
        write!(f, "{}", name)
    }
}

/// Implement this trait to handle navigation, popup, context menu and key events of a
/// browser surface. Every method has a permissive default so hosts only override what
/// they care about.
pub trait BrowserEventDelegate {
    /// Return true to cancel the navigation to `url`, false to let it proceed.
    ///
    /// Must decide without calling back into the engine.
    fn on_before_browse(&mut self, url: &Url, is_redirect: bool) -> bool {
        let _ = (url, is_redirect);
        false
    }

    /// Populate `menu` with host entries. The page, menu and params are only valid for
    /// the duration of this call.
    fn on_before_context_menu(&mut self, page: &WebPage, menu: &mut ContextMenu, params: &ContextMenuParams) {
        let _ = (page, menu, params);
    }

    /// Called before a popup surface for `url` is created. Return true to let the default
    /// popup be created, false when the host handles it and no surface must be created.
    fn on_before_popup(&mut self, url: &Url, disposition: WindowOpenDisposition) -> bool {
        let _ = (url, disposition);
        true
    }

    /// Called before a key event is sent to the page. The event cannot be cancelled here.
    fn on_pre_key_event(&mut self, event: &KeyEvent) {
        let _ = event;
    }
}

type BrowseFn = Box<dyn FnMut(&Url, bool) -> bool>;
type ContextMenuFn = Box<dyn FnMut(&WebPage, &mut ContextMenu, &ContextMenuParams)>;
type PopupFn = Box<dyn FnMut(&Url, WindowOpenDisposition) -> bool>;
type KeyEventFn = Box<dyn FnMut(&KeyEvent)>;

/// Delegate assembled from closures. Capabilities that are not set behave like the
/// defaults of [`BrowserEventDelegate`].
///
/// ```
/// use gosub_browser_delegate::delegate::FnDelegate;
///
/// let delegate = FnDelegate::new()
///     .before_browse(|url, _| url.scheme() != "https")
///     .before_popup(|_, _| false);
/// ```
#[derive(Default)]
pub struct FnDelegate {
    before_browse: Option<BrowseFn>,
    before_context_menu: Option<ContextMenuFn>,
    before_popup: Option<PopupFn>,
    pre_key_event: Option<KeyEventFn>,
}

impl FnDelegate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn before_browse(mut self, f: impl FnMut(&Url, bool) -> bool + 'static) -> Self {
        self.before_browse = Some(Box::new(f));
        self
    }

    pub fn before_context_menu(
        mut self,
        f: impl FnMut(&WebPage, &mut ContextMenu, &ContextMenuParams) + 'static,
    ) -> Self {
        self.before_context_menu = Some(Box::new(f));
        self
    }

    pub fn before_popup(mut self, f: impl FnMut(&Url, WindowOpenDisposition) -> bool + 'static) -> Self {
        self.before_popup = Some(Box::new(f));
        self
    }

    pub fn pre_key_event(mut self, f: impl FnMut(&KeyEvent) + 'static) -> Self {
        self.pre_key_event = Some(Box::new(f));
        self
    }
}

impl BrowserEventDelegate for FnDelegate {
    fn on_before_browse(&mut self, url: &Url, is_redirect: bool) -> bool {
        match self.before_browse.as_mut() {
            Some(f) => f(url, is_redirect),
            None => false,
        }
    }

    fn on_before_context_menu(&mut self, page: &WebPage, menu: &mut ContextMenu, params: &ContextMenuParams) {
        if let Some(f) = self.before_context_menu.as_mut() {
            f(page, menu, params);
        }
    }

    fn on_before_popup(&mut self, url: &Url, disposition: WindowOpenDisposition) -> bool {
        match self.before_popup.as_mut() {
            Some(f) => f(url, disposition),
            None => true,
        }
    }

    fn on_pre_key_event(&mut self, event: &KeyEvent) {
        if let Some(f) = self.pre_key_event.as_mut() {
            f(event);
        }
    }
}
