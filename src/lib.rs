//! Contract between a host application and an embedded browser surface.
//!
//! The host implements [`BrowserEventDelegate`] to intercept navigation, popups, context
//! menu construction and key events. The [`EventDispatcher`] is the engine-side half: it
//! turns raw engine events into [`ContextMenuParams`] snapshots and fresh [`ContextMenu`]s,
//! calls the delegate, and interprets the answers.

pub mod config;
pub mod delegate;
pub mod dispatch;
pub mod errors;
pub mod events;
pub mod menu;
pub mod page;

pub use config::{DispatcherConfig, EmptyMenuPolicy};
pub use delegate::{BrowserEventDelegate, FnDelegate, WindowOpenDisposition};
pub use dispatch::{BrowseDecision, EventDispatcher, MenuPresentation, PopupDecision};
pub use errors::{ConfigError, DelegateError};
pub use events::{KeyEvent, KeyEventKind, Modifiers};
pub use menu::{
    ContextMenu, ContextMenuParams, ContextMenuTypeFlags, EditStateFlags, MediaStateFlags, MediaType, MenuCallback,
    MenuId, MenuItem, MenuItemKind, RawContextMenuParams, MENU_ID_USER_FIRST, MENU_ID_USER_LAST,
};
pub use page::{PageId, WebPage};
