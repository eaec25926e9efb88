//! Raw key events seen by the pre-dispatch key hook.
//!
//! These mirror what the engine receives from the native window. No toolkit key
//! mapping is available at this point, only native and windows key codes.
//!
//! # Main Types
//!
//! - [`KeyEventKind`]: raw key down, key up or character input.
//! - [`Modifiers`]: modifier state at the time of the event.
//! - [`KeyEvent`]: the event handed to [`BrowserEventDelegate::on_pre_key_event`].
//!
//! [`BrowserEventDelegate::on_pre_key_event`]: crate::delegate::BrowserEventDelegate::on_pre_key_event

use bitflags::bitflags;
use std::fmt::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KeyEventKind {
    /// Key pressed, before any character translation
    RawKeyDown,
    /// Key released
    KeyUp,
    /// Character produced by the key press
    Char,
}

impl Display for KeyEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyEventKind::RawKeyDown => write!(f, "RawKeyDown"),
            KeyEventKind::KeyUp => write!(f, "KeyUp"),
            KeyEventKind::Char => write!(f, "Char"),
        }
    }
}

bitflags! {
    /// Modifier bits, laid out as the engine's event flags.
    #[derive(Default)]
    pub struct Modifiers: u32 {
        const CAPS_LOCK  = 1 << 0;
        const SHIFT      = 1 << 1;
        const CONTROL    = 1 << 2;
        const ALT        = 1 << 3;
        const META       = 1 << 7;
        const NUM_LOCK   = 1 << 8;
        const IS_KEY_PAD = 1 << 9;
        const IS_REPEAT  = 1 << 13;
    }
}

impl Display for Modifiers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut parts = Vec::new();

        if self.contains(Modifiers::SHIFT) {
            parts.push("Shift");
        }
        if self.contains(Modifiers::CONTROL) {
            parts.push("Control");
        }
        if self.contains(Modifiers::ALT) {
            parts.push("Alt");
        }
        if self.contains(Modifiers::META) {
            parts.push("Meta");
        }

        if parts.is_empty() {
            write!(f, "None")
        } else {
            write!(f, "{}", parts.join("+"))
        }
    }
}

/// A key event as it is about to be sent to the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// Virtual key code (or the character code for [`KeyEventKind::Char`])
    pub windows_key_code: i32,
    /// Platform scan code / native key code
    pub native_key_code: i32,
    pub modifiers: Modifiers,
    /// True for system keys (Alt combinations on Windows)
    pub is_system_key: bool,
    pub character: Option<char>,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, windows_key_code: i32, native_key_code: i32) -> Self {
        Self {
            kind,
            windows_key_code,
            native_key_code,
            modifiers: Modifiers::empty(),
            is_system_key: false,
            character: None,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_character(mut self, ch: char) -> Self {
        self.character = Some(ch);
        self
    }

    pub fn system_key(mut self, is_system_key: bool) -> Self {
        self.is_system_key = is_system_key;
        self
    }
}

impl Display for KeyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} native={} vk={} mods={}",
            self.kind, self.native_key_code, self.windows_key_code, self.modifiers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_display_empty_is_none() {
        assert_eq!(Modifiers::empty().to_string(), "None");
        // lock and keypad bits are not shown
        assert_eq!((Modifiers::CAPS_LOCK | Modifiers::IS_KEY_PAD).to_string(), "None");
    }

    #[test]
    fn modifiers_display_combo_in_order() {
        let all = Modifiers::META | Modifiers::ALT | Modifiers::CONTROL | Modifiers::SHIFT;
        assert_eq!(all.to_string(), "Shift+Control+Alt+Meta");
        assert_eq!((Modifiers::SHIFT | Modifiers::ALT).to_string(), "Shift+Alt");
    }

    #[test]
    fn modifier_bits_match_engine_layout() {
        assert_eq!(Modifiers::SHIFT.bits(), 2);
        assert_eq!(Modifiers::CONTROL.bits(), 4);
        assert_eq!(Modifiers::ALT.bits(), 8);
        assert_eq!(Modifiers::META.bits(), 128);
        assert_eq!(
            Modifiers::from_bits_truncate(0b10_0000_0000_0110),
            Modifiers::SHIFT | Modifiers::CONTROL | Modifiers::IS_REPEAT
        );
    }

    #[test]
    fn key_event_builder_and_display() {
        let ev = KeyEvent::new(KeyEventKind::RawKeyDown, 0x41, 0x1e)
            .with_modifiers(Modifiers::CONTROL)
            .system_key(false);

        assert_eq!(ev.kind, KeyEventKind::RawKeyDown);
        assert_eq!(ev.character, None);
        assert_eq!(ev.to_string(), "RawKeyDown native=30 vk=65 mods=Control");

        let ch = KeyEvent::new(KeyEventKind::Char, 'a' as i32, 0x1e).with_character('a');
        assert_eq!(ch.character, Some('a'));
        assert!(!ch.is_system_key);
    }
}
