use crate::menu::MenuId;

#[derive(Debug, thiserror::Error)]
pub enum DelegateError {
    #[error("Unknown menu id: {0}")]
    UnknownMenuId(MenuId),

    #[error("Menu item {0} is disabled")]
    MenuItemDisabled(MenuId),

    #[error("Invalid window open disposition: {0}")]
    InvalidDisposition(i32),

    #[error("Invalid context menu media type: {0}")]
    InvalidMediaType(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_menu_items must be at least 1")]
    ZeroMenuItems,
}
