//! Dispatcher configuration.
//!
//! `DispatcherConfig` controls how the [`EventDispatcher`](crate::dispatch::EventDispatcher)
//! interprets what the host hands back: what happens to an empty context menu, whether
//! out-of-range menu ids reach the native menu, and the fallbacks used when no delegate
//! is installed.
//!
//! # Examples
//!
//! ```rust
//! use gosub_browser_delegate::config::{DispatcherConfig, EmptyMenuPolicy};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cfg = DispatcherConfig::builder()
//!     .empty_menu_policy(EmptyMenuPolicy::Suppress)
//!     .max_menu_items(32)
//!     .log_key_events(true)
//!     .build()?;
//! assert_eq!(cfg.max_menu_items, 32);
//! # Ok(()) }
//! ```
//!
//! # Errors
//!
//! [`DispatcherConfigBuilder::build`] returns [`ConfigError::ZeroMenuItems`] when
//! `max_menu_items` is zero.

use crate::errors::ConfigError;

/// What the integration layer shows when the host added nothing to the context menu.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum EmptyMenuPolicy {
    /// Show the engine's built-in entries
    #[default]
    ShowBuiltin,
    /// Do not show a menu at all
    Suppress,
}

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// Policy for menus the host left empty
    pub empty_menu_policy: EmptyMenuPolicy,
    /// Drop entries with ids outside the user range before they reach the native menu
    pub enforce_menu_id_range: bool,
    /// Maximum number of entries forwarded to the native menu
    pub max_menu_items: usize,
    /// Popup decision when no delegate is installed
    pub allow_popups_without_delegate: bool,
    /// Trace-log every pre-dispatch key event
    pub log_key_events: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            empty_menu_policy: EmptyMenuPolicy::ShowBuiltin,
            enforce_menu_id_range: true,
            max_menu_items: 256,
            allow_popups_without_delegate: true,
            log_key_events: false,
        }
    }
}

impl DispatcherConfig {
    pub fn builder() -> DispatcherConfigBuilder {
        DispatcherConfigBuilder::default()
    }
}

/// Builder for [`DispatcherConfig`].
#[derive(Debug, Clone, Default)]
pub struct DispatcherConfigBuilder {
    inner: DispatcherConfig,
}

impl DispatcherConfigBuilder {
    #[inline]
    fn map(mut self, f: impl FnOnce(&mut DispatcherConfig)) -> Self {
        f(&mut self.inner);
        self
    }

    pub fn empty_menu_policy(self, policy: EmptyMenuPolicy) -> Self { self.map(|c| c.empty_menu_policy = policy) }
    pub fn enforce_menu_id_range(self, on: bool) -> Self { self.map(|c| c.enforce_menu_id_range = on) }
    pub fn max_menu_items(self, n: usize) -> Self { self.map(|c| c.max_menu_items = n) }
    pub fn allow_popups_without_delegate(self, on: bool) -> Self { self.map(|c| c.allow_popups_without_delegate = on) }
    pub fn log_key_events(self, on: bool) -> Self { self.map(|c| c.log_key_events = on) }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut DispatcherConfig)) -> Self { self.map(f) }

    /// Validate and build the final config.
    pub fn build(self) -> Result<DispatcherConfig, ConfigError> {
        validate(&self.inner)?;
        Ok(self.inner)
    }
}

fn validate(c: &DispatcherConfig) -> Result<(), ConfigError> {
    if c.max_menu_items == 0 {
        return Err(ConfigError::ZeroMenuItems);
    }
    Ok(())
}
