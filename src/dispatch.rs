//! Engine-side integration of a [`BrowserEventDelegate`].
//!
//! The [`EventDispatcher`] sits between the engine and the host. The toolkit glue forwards
//! raw engine events to it; it builds the snapshots the host is allowed to see, calls the
//! installed delegate, and turns the host's answers into decisions the engine can act on.
//!
//! All calls happen on the thread that owns the browser surface, one at a time. Nothing in
//! here is `Send`, and nothing is remembered between calls apart from the configuration and
//! the delegate itself.

use crate::config::{DispatcherConfig, EmptyMenuPolicy};
use crate::delegate::{BrowserEventDelegate, WindowOpenDisposition};
use crate::errors::DelegateError;
use crate::events::KeyEvent;
use crate::menu::{ContextMenu, ContextMenuParams, MenuId, RawContextMenuParams};
use crate::page::WebPage;
use url::Url;

/// What the engine should do with a pending navigation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BrowseDecision {
    Proceed,
    Cancel,
}

/// What the engine should do with a pending popup.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PopupDecision {
    /// Let the engine create its default popup surface
    CreateDefault,
    /// The host takes care of it; no surface must be created
    HandledByHost,
}

/// Result of a context menu event, ready to be turned into a native menu.
#[derive(Debug)]
pub struct MenuPresentation {
    /// Host entries, already checked against the configuration
    pub menu: ContextMenu,
    /// Whether the engine's built-in entries should be shown
    pub show_builtin_items: bool,
}

impl MenuPresentation {
    /// False when there is nothing to show at all.
    pub fn is_visible(&self) -> bool {
        self.show_builtin_items || self.menu.has_items()
    }
}

pub struct EventDispatcher {
    config: DispatcherConfig,
    delegate: Option<Box<dyn BrowserEventDelegate>>,
}

impl EventDispatcher {
    pub fn new(config: DispatcherConfig, delegate: Box<dyn BrowserEventDelegate>) -> Self {
        Self {
            config,
            delegate: Some(delegate),
        }
    }

    /// Dispatcher that answers every hook with the configured fallbacks.
    pub fn without_delegate(config: DispatcherConfig) -> Self {
        Self { config, delegate: None }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn has_delegate(&self) -> bool {
        self.delegate.is_some()
    }

    /// Installs `delegate`, returning the previous one.
    pub fn set_delegate(&mut self, delegate: Box<dyn BrowserEventDelegate>) -> Option<Box<dyn BrowserEventDelegate>> {
        self.delegate.replace(delegate)
    }

    pub fn take_delegate(&mut self) -> Option<Box<dyn BrowserEventDelegate>> {
        self.delegate.take()
    }

    /// Asks the host whether a navigation (or redirect) to `url` may commit.
    pub fn before_browse(&mut self, url: &Url, is_redirect: bool) -> BrowseDecision {
        let cancel = match self.delegate.as_mut() {
            Some(delegate) => delegate.on_before_browse(url, is_redirect),
            None => false,
        };

        log::debug!(
            "Dispatcher: before_browse {} (redirect: {}) -> {}",
            url,
            is_redirect,
            if cancel { "cancel" } else { "proceed" }
        );

        if cancel {
            BrowseDecision::Cancel
        } else {
            BrowseDecision::Proceed
        }
    }

    /// Asks the host whether the engine should create a popup surface for `url`.
    pub fn before_popup(&mut self, url: &Url, disposition: WindowOpenDisposition) -> PopupDecision {
        let create_default = match self.delegate.as_mut() {
            Some(delegate) => delegate.on_before_popup(url, disposition),
            None => self.config.allow_popups_without_delegate,
        };

        log::debug!(
            "Dispatcher: before_popup {} ({}) -> {}",
            url,
            disposition,
            if create_default { "create default" } else { "handled by host" }
        );

        if create_default {
            PopupDecision::CreateDefault
        } else {
            PopupDecision::HandledByHost
        }
    }

    /// Same as [`before_popup`](Self::before_popup), with the disposition as the engine's
    /// numeric value. Unknown values are passed on as [`WindowOpenDisposition::Unknown`].
    pub fn before_popup_raw(&mut self, url: &Url, disposition: i32) -> PopupDecision {
        let disposition = WindowOpenDisposition::try_from(disposition).unwrap_or_else(|e| {
            log::warn!("Dispatcher: {}, using Unknown", e);
            WindowOpenDisposition::Unknown
        });
        self.before_popup(url, disposition)
    }

    /// Lets the host observe a key event before it reaches the page.
    pub fn pre_key_event(&mut self, event: &KeyEvent) {
        if self.config.log_key_events {
            log::trace!("Dispatcher: pre_key_event {}", event);
        }

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_pre_key_event(event);
        }
    }

    /// Builds the params snapshot and a fresh menu, lets the host populate it, and applies
    /// the configured limits to the result.
    pub fn before_context_menu(&mut self, page: &WebPage, raw: &RawContextMenuParams) -> MenuPresentation {
        let params = ContextMenuParams::from_raw(raw);
        let mut menu = ContextMenu::new();

        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_before_context_menu(page, &mut menu, &params);
        }

        let mut dropped_entries = false;

        if self.config.enforce_menu_id_range {
            let removed = menu.remove_foreign_ids();
            if !removed.is_empty() {
                dropped_entries = true;
                log::warn!(
                    "Dispatcher[{}]: dropped menu items with ids outside the user range: {:?}",
                    page.id(),
                    removed
                );
            }
        }

        let truncated = menu.truncate(self.config.max_menu_items);
        if truncated > 0 {
            dropped_entries = true;
            log::warn!(
                "Dispatcher[{}]: dropped {} menu entries over the limit of {}",
                page.id(),
                truncated,
                self.config.max_menu_items
            );
        }

        // Separators the host placed around dropped entries would otherwise dangle.
        if dropped_entries {
            menu.collapse_separators();
        }

        let show_builtin_items = !menu.has_items() && self.config.empty_menu_policy == EmptyMenuPolicy::ShowBuiltin;

        log::debug!(
            "Dispatcher[{}]: context menu at {:?} ({}) with {} host entries",
            page.id(),
            params.position(),
            params.type_flags(),
            menu.len()
        );

        MenuPresentation {
            menu,
            show_builtin_items,
        }
    }

    /// Runs the callback registered for `id` after the user picked it.
    ///
    /// Returns `Ok(false)` when the item exists but was added without a callback.
    pub fn activate_menu_item(&self, menu: &ContextMenu, id: MenuId, page: &WebPage) -> Result<bool, DelegateError> {
        let item = menu.item(id).ok_or(DelegateError::UnknownMenuId(id))?;
        if !item.is_enabled() {
            return Err(DelegateError::MenuItemDisabled(id));
        }

        match menu.callback(id) {
            Some(callback) => {
                log::debug!("Dispatcher[{}]: activating menu item {}", page.id(), id);
                callback(page);
                Ok(true)
            }
            None => {
                log::debug!("Dispatcher[{}]: menu item {} has no callback", page.id(), id);
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::KeyEventKind;
    use crate::delegate::FnDelegate;
    use crate::menu::{ContextMenuTypeFlags, MenuCallback, MenuItem, MENU_ID_USER_FIRST, MENU_ID_USER_LAST};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    /// Records what it saw and answers with fixed decisions.
    #[derive(Default)]
    struct Recorder {
        browsed: Rc<RefCell<Vec<(String, bool)>>>,
        popups: Rc<RefCell<Vec<WindowOpenDisposition>>>,
        keys: Rc<RefCell<Vec<i32>>>,
        cancel_redirects: bool,
        handle_popups: bool,
    }

    impl BrowserEventDelegate for Recorder {
        fn on_before_browse(&mut self, url: &Url, is_redirect: bool) -> bool {
            self.browsed.borrow_mut().push((url.to_string(), is_redirect));
            is_redirect && self.cancel_redirects
        }

        fn on_before_popup(&mut self, _url: &Url, disposition: WindowOpenDisposition) -> bool {
            self.popups.borrow_mut().push(disposition);
            !self.handle_popups
        }

        fn on_pre_key_event(&mut self, event: &KeyEvent) {
            self.keys.borrow_mut().push(event.native_key_code);
        }
    }

    struct CustomMenu {
        hits: Rc<Cell<u32>>,
    }

    impl BrowserEventDelegate for CustomMenu {
        fn on_before_context_menu(&mut self, _page: &WebPage, menu: &mut ContextMenu, _params: &ContextMenuParams) {
            let hits = self.hits.clone();
            menu.add_item(26500, "Custom", true, move |_| hits.set(hits.get() + 1));
            menu.add_separator();
        }
    }

    #[test]
    fn browse_allowed_navigation_proceeds() {
        let recorder = Recorder::default();
        let browsed = recorder.browsed.clone();
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(recorder));

        let decision = dispatcher.before_browse(&url("https://example.com"), false);
        assert_eq!(decision, BrowseDecision::Proceed);
        assert_eq!(*browsed.borrow(), vec![("https://example.com/".to_string(), false)]);
    }

    #[test]
    fn browse_cancel_is_forwarded() {
        let recorder = Recorder {
            cancel_redirects: true,
            ..Default::default()
        };
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(recorder));

        assert_eq!(dispatcher.before_browse(&url("https://a.test/"), true), BrowseDecision::Cancel);
        assert_eq!(dispatcher.before_browse(&url("https://a.test/"), false), BrowseDecision::Proceed);
    }

    #[test]
    fn popup_decisions() {
        let recorder = Recorder {
            handle_popups: true,
            ..Default::default()
        };
        let popups = recorder.popups.clone();
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(recorder));

        let decision = dispatcher.before_popup(&url("https://popup.test/"), WindowOpenDisposition::NewPopup);
        assert_eq!(decision, PopupDecision::HandledByHost);

        dispatcher.before_popup_raw(&url("https://popup.test/"), 6);
        dispatcher.before_popup_raw(&url("https://popup.test/"), 1234);
        assert_eq!(
            *popups.borrow(),
            vec![
                WindowOpenDisposition::NewPopup,
                WindowOpenDisposition::NewWindow,
                WindowOpenDisposition::Unknown
            ]
        );
    }

    #[test]
    fn fallbacks_without_delegate() {
        let mut dispatcher = EventDispatcher::without_delegate(DispatcherConfig::default());
        assert!(!dispatcher.has_delegate());
        assert_eq!(dispatcher.before_browse(&url("https://example.com"), false), BrowseDecision::Proceed);
        assert_eq!(
            dispatcher.before_popup(&url("https://example.com"), WindowOpenDisposition::NewForegroundTab),
            PopupDecision::CreateDefault
        );

        let cfg = DispatcherConfig::builder().allow_popups_without_delegate(false).build().unwrap();
        let mut dispatcher = EventDispatcher::without_delegate(cfg);
        assert_eq!(
            dispatcher.before_popup(&url("https://example.com"), WindowOpenDisposition::NewWindow),
            PopupDecision::HandledByHost
        );

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert!(presentation.menu.is_empty());
        assert!(presentation.show_builtin_items);
        dispatcher.pre_key_event(&KeyEvent::new(KeyEventKind::KeyUp, 0x41, 0x1e));
    }

    #[test]
    fn key_events_are_observed_in_order() {
        let recorder = Recorder::default();
        let keys = recorder.keys.clone();
        let cfg = DispatcherConfig::builder().log_key_events(true).build().unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(recorder));

        dispatcher.pre_key_event(&KeyEvent::new(KeyEventKind::RawKeyDown, 0x41, 0x1e));
        dispatcher.pre_key_event(&KeyEvent::new(KeyEventKind::Char, 'a' as i32, 0x1e).with_character('a'));
        dispatcher.pre_key_event(&KeyEvent::new(KeyEventKind::KeyUp, 0x41, 0x1f));

        assert_eq!(*keys.borrow(), vec![0x1e, 0x1e, 0x1f]);
    }

    #[test]
    fn custom_item_and_separator_round_trip() {
        let hits = Rc::new(Cell::new(0));
        let delegate = CustomMenu { hits: hits.clone() };
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(delegate));
        let page = WebPage::new();

        let raw = RawContextMenuParams {
            type_flags: ContextMenuTypeFlags::PAGE.bits(),
            page_url: "https://example.com/".into(),
            ..Default::default()
        };
        let presentation = dispatcher.before_context_menu(&page, &raw);

        assert_eq!(
            presentation.menu.items(),
            &[
                MenuItem::Item {
                    id: 26500,
                    label: "Custom".into(),
                    enabled: true
                },
                MenuItem::Separator
            ]
        );
        assert!(!presentation.show_builtin_items);
        assert!(presentation.is_visible());

        let ran = dispatcher.activate_menu_item(&presentation.menu, 26500, &page).unwrap();
        assert!(ran);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn params_reach_the_delegate() {
        let seen = Rc::new(RefCell::new(None));
        let seen_in_hook = seen.clone();
        let delegate = FnDelegate::new().before_context_menu(move |_, _, params| {
            *seen_in_hook.borrow_mut() = Some((params.position(), params.selection_text().to_string()));
        });
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(delegate));

        let raw = RawContextMenuParams {
            x: 10,
            y: 20,
            type_flags: ContextMenuTypeFlags::SELECTION.bits(),
            selection_text: "selected words".into(),
            ..Default::default()
        };
        dispatcher.before_context_menu(&WebPage::new(), &raw);

        assert_eq!(*seen.borrow(), Some(((10, 20), "selected words".to_string())));
    }

    #[test]
    fn empty_menu_policy_suppress_hides_menu() {
        let cfg = DispatcherConfig::builder()
            .empty_menu_policy(EmptyMenuPolicy::Suppress)
            .build()
            .unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(Recorder::default()));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert!(!presentation.show_builtin_items);
        assert!(!presentation.is_visible());
    }

    #[test]
    fn menu_is_limited_to_max_items() {
        let delegate = FnDelegate::new().before_context_menu(|_, menu, _| {
            for i in 0..5 {
                menu.add_item(MENU_ID_USER_FIRST + i, format!("Item {i}"), true, |_| {});
            }
        });
        let cfg = DispatcherConfig::builder().max_menu_items(3).build().unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(delegate));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert_eq!(presentation.menu.len(), 3);
        assert_eq!(presentation.menu.callbacks().len(), 3);
        assert!(presentation.menu.callback(MENU_ID_USER_FIRST + 4).is_none());
    }

    #[test]
    fn activation_errors() {
        let dispatcher = EventDispatcher::without_delegate(DispatcherConfig::default());
        let page = WebPage::new();
        let mut menu = ContextMenu::new();
        menu.add_item(26500, "Disabled", false, |_| panic!("must not run"));
        menu.add_item_without_callback(26501, "Inert", true);

        assert!(matches!(
            dispatcher.activate_menu_item(&menu, 26999, &page),
            Err(DelegateError::UnknownMenuId(26999))
        ));
        assert!(matches!(
            dispatcher.activate_menu_item(&menu, 26500, &page),
            Err(DelegateError::MenuItemDisabled(26500))
        ));
        assert!(!dispatcher.activate_menu_item(&menu, 26501, &page).unwrap());
    }

    /// Host that mixes a valid item, a separator and an engine-range id.
    fn foreign_id_delegate() -> FnDelegate {
        FnDelegate::new().before_context_menu(|_, menu, _| {
            menu.add_item(26500, "Ours", true, |_| {});
            menu.add_separator();
            let engine_cb: MenuCallback = Box::new(|_| {});
            menu.push_unchecked(100, "Engine", Some(engine_cb));
        })
    }

    #[test]
    fn foreign_ids_are_dropped_when_enforced() {
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(foreign_id_delegate()));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert_eq!(
            presentation.menu.items(),
            &[MenuItem::Item {
                id: 26500,
                label: "Ours".into(),
                enabled: true
            }]
        );
        assert!(presentation.menu.callback(100).is_none());
        assert_eq!(presentation.menu.callbacks().len(), 1);
    }

    #[test]
    fn foreign_ids_are_kept_when_not_enforced() {
        let cfg = DispatcherConfig::builder().enforce_menu_id_range(false).build().unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(foreign_id_delegate()));
        let page = WebPage::new();

        let presentation = dispatcher.before_context_menu(&page, &RawContextMenuParams::default());
        assert_eq!(presentation.menu.len(), 3);
        assert!(presentation.menu.contains_id(100));
        assert!(dispatcher.activate_menu_item(&presentation.menu, 100, &page).unwrap());
    }

    #[test]
    fn separator_only_menu_falls_back_to_builtin() {
        let delegate = FnDelegate::new().before_context_menu(|_, menu, _| {
            menu.push_unchecked(MENU_ID_USER_LAST, "Past the range", None);
            menu.add_separator();
        });
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(delegate));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert!(presentation.menu.is_empty());
        assert!(presentation.show_builtin_items);
        assert!(presentation.is_visible());
    }

    #[test]
    fn host_separators_alone_do_not_hide_builtin_items() {
        let delegate = FnDelegate::new().before_context_menu(|_, menu, _| menu.add_separator());
        let mut dispatcher = EventDispatcher::new(DispatcherConfig::default(), Box::new(delegate));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert!(!presentation.menu.has_items());
        assert!(presentation.show_builtin_items);
    }

    #[test]
    fn separator_only_menu_is_hidden_when_suppressed() {
        let delegate = FnDelegate::new().before_context_menu(|_, menu, _| {
            menu.push_unchecked(100, "Engine", None);
            menu.add_separator();
        });
        let cfg = DispatcherConfig::builder()
            .empty_menu_policy(EmptyMenuPolicy::Suppress)
            .build()
            .unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(delegate));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        assert!(!presentation.show_builtin_items);
        assert!(!presentation.is_visible());
    }

    #[test]
    fn truncation_does_not_leave_trailing_separator() {
        let delegate = FnDelegate::new().before_context_menu(|_, menu, _| {
            menu.add_item(26500, "A", true, |_| {});
            menu.add_separator();
            menu.add_item(26501, "B", true, |_| {});
        });
        let cfg = DispatcherConfig::builder().max_menu_items(2).build().unwrap();
        let mut dispatcher = EventDispatcher::new(cfg, Box::new(delegate));

        let presentation = dispatcher.before_context_menu(&WebPage::new(), &RawContextMenuParams::default());
        let ids: Vec<_> = presentation.menu.items().iter().map(MenuItem::id).collect();
        assert_eq!(ids, vec![Some(26500)]);
        assert!(presentation.menu.callback(26501).is_none());
    }

    #[test]
    fn delegate_can_be_swapped() {
        let mut dispatcher = EventDispatcher::without_delegate(DispatcherConfig::default());
        assert!(dispatcher.set_delegate(Box::new(Recorder::default())).is_none());
        assert!(dispatcher.has_delegate());

        let cancel_all = FnDelegate::new().before_browse(|_, _| true);
        assert!(dispatcher.set_delegate(Box::new(cancel_all)).is_some());
        assert_eq!(dispatcher.before_browse(&url("https://example.com"), false), BrowseDecision::Cancel);

        assert!(dispatcher.take_delegate().is_some());
        assert!(!dispatcher.has_delegate());
        assert_eq!(dispatcher.before_browse(&url("https://example.com"), false), BrowseDecision::Proceed);
    }
}
