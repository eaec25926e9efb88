//! Context menu builder handed to the host during a single context menu event.
//!
//! A [`ContextMenu`] is created fresh by the dispatcher for every invocation, populated
//! by the host in [`BrowserEventDelegate::on_before_context_menu`], and then read back to
//! build the native menu and to dispatch the user's selection. Neither the menu nor its
//! [`ContextMenuParams`] may be kept beyond that window.
//!
//! Host ids must lie in `[MENU_ID_USER_FIRST, MENU_ID_USER_LAST)`. Ids outside that range
//! collide with commands of the engine or other embedders. Violations (and duplicate ids)
//! are caught by debug assertions only.
//!
//! [`BrowserEventDelegate::on_before_context_menu`]: crate::delegate::BrowserEventDelegate::on_before_context_menu

pub mod flags;
pub mod params;

pub use flags::{ContextMenuTypeFlags, EditStateFlags, MediaStateFlags, MediaType};
pub use params::{ContextMenuParams, RawContextMenuParams};

use crate::page::WebPage;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

/// Command id of a menu entry.
pub type MenuId = i32;

/// First id (inclusive) reserved for host menu items.
pub const MENU_ID_USER_FIRST: MenuId = 26500;
/// End (exclusive) of the id range reserved for host menu items.
pub const MENU_ID_USER_LAST: MenuId = 28500;

/// Returns true when `id` lies in the host's reserved range.
pub fn is_user_menu_id(id: MenuId) -> bool {
    (MENU_ID_USER_FIRST..MENU_ID_USER_LAST).contains(&id)
}

/// Triggered when the matching menu item is activated.
pub type MenuCallback = Box<dyn Fn(&WebPage)>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuItemKind {
    Item,
    Separator,
}

/// A single entry of a context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuItem {
    /// Selectable entry
    Item {
        id: MenuId,
        label: String,
        enabled: bool,
    },
    /// Visual separator, consumes no id
    Separator,
}

impl MenuItem {
    pub fn kind(&self) -> MenuItemKind {
        match self {
            MenuItem::Item { .. } => MenuItemKind::Item,
            MenuItem::Separator => MenuItemKind::Separator,
        }
    }

    pub fn id(&self) -> Option<MenuId> {
        match self {
            MenuItem::Item { id, .. } => Some(*id),
            MenuItem::Separator => None,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            MenuItem::Item { label, .. } => Some(label),
            MenuItem::Separator => None,
        }
    }

    /// Separators are never enabled.
    pub fn is_enabled(&self) -> bool {
        matches!(self, MenuItem::Item { enabled: true, .. })
    }

    pub fn is_separator(&self) -> bool {
        matches!(self, MenuItem::Separator)
    }
}

#[derive(Default)]
pub struct ContextMenu {
    items: Vec<MenuItem>,
    callbacks: BTreeMap<MenuId, MenuCallback>,
}

impl ContextMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a menu item whose activation runs `callback`.
    ///
    /// `id` must be unique in this menu and lie in `[MENU_ID_USER_FIRST, MENU_ID_USER_LAST)`.
    /// `label` may be a localized string.
    pub fn add_item<S, F>(&mut self, id: MenuId, label: S, enabled: bool, callback: F)
    where
        S: Into<String>,
        F: Fn(&WebPage) + 'static,
    {
        self.push_item(id, label.into(), enabled);
        self.callbacks.insert(id, Box::new(callback));
    }

    /// Appends a menu item with nothing to run on activation.
    pub fn add_item_without_callback<S: Into<String>>(&mut self, id: MenuId, label: S, enabled: bool) {
        self.push_item(id, label.into(), enabled);
    }

    pub fn add_separator(&mut self) {
        self.items.push(MenuItem::Separator);
    }

    /// Removes all entries together with their callbacks.
    pub fn clear(&mut self) {
        self.items.clear();
        self.callbacks.clear();
    }

    /// Entries in the order they were added.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Callbacks keyed by menu id.
    pub fn callbacks(&self) -> &BTreeMap<MenuId, MenuCallback> {
        &self.callbacks
    }

    pub fn callback(&self, id: MenuId) -> Option<&MenuCallback> {
        self.callbacks.get(&id)
    }

    pub fn item(&self, id: MenuId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == Some(id))
    }

    pub fn contains_id(&self, id: MenuId) -> bool {
        self.item(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when at least one selectable item is present. Separators alone do not count.
    pub fn has_items(&self) -> bool {
        self.items.iter().any(|item| !item.is_separator())
    }

    /// Drops every item with an id outside the user range. Returns the dropped ids.
    pub(crate) fn remove_foreign_ids(&mut self) -> Vec<MenuId> {
        let mut removed = Vec::new();

        self.items.retain(|item| match item.id() {
            Some(id) if !is_user_menu_id(id) => {
                removed.push(id);
                false
            }
            _ => true,
        });

        for id in &removed {
            self.callbacks.remove(id);
        }

        removed
    }

    /// Keeps the first `max` entries. Returns how many were dropped.
    pub(crate) fn truncate(&mut self, max: usize) -> usize {
        if self.items.len() <= max {
            return 0;
        }

        let dropped = self.items.split_off(max);
        for id in dropped.iter().filter_map(MenuItem::id) {
            self.callbacks.remove(&id);
        }

        dropped.len()
    }

    /// Removes leading, trailing and repeated separators. Returns how many were removed.
    pub(crate) fn collapse_separators(&mut self) -> usize {
        let before = self.items.len();
        let mut previous_was_separator = true;

        self.items.retain(|item| {
            let keep = !(item.is_separator() && previous_was_separator);
            if keep {
                previous_was_separator = item.is_separator();
            }
            keep
        });

        if matches!(self.items.last(), Some(MenuItem::Separator)) {
            self.items.pop();
        }

        before - self.items.len()
    }

    /// Appends an item without the id checks, to simulate hosts that broke the id contract.
    #[cfg(test)]
    pub(crate) fn push_unchecked(&mut self, id: MenuId, label: &str, callback: Option<MenuCallback>) {
        self.items.push(MenuItem::Item {
            id,
            label: label.to_string(),
            enabled: true,
        });
        if let Some(callback) = callback {
            self.callbacks.insert(id, callback);
        }
    }

    fn push_item(&mut self, id: MenuId, label: String, enabled: bool) {
        debug_assert!(
            is_user_menu_id(id),
            "menu id {} outside [{}, {})",
            id,
            MENU_ID_USER_FIRST,
            MENU_ID_USER_LAST
        );
        debug_assert!(!self.contains_id(id), "duplicate menu id {}", id);

        self.items.push(MenuItem::Item { id, label, enabled });
    }
}

impl Debug for ContextMenu {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenu")
            .field("items", &self.items)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
