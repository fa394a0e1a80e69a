//! User-facing editor options shared by all windows
//!
//! Options are never passed between windows directly. A window that changes
//! one writes it to the store, and every window re-reads the whole set.

use anyhow::Result;

use crate::config::store::{self, SettingsStore};
use crate::constants::keys;

/// Snapshot of every shared option as last read from the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    pub word_wrap: bool,
    pub toolbar_text: bool,
    pub toolbar_enabled: bool,
    pub statusbar_enabled: bool,
    /// Highlight the line holding the cursor
    pub hc_line_enabled: bool,
    pub large_icons: bool,
    pub line_numbers_enabled: bool,
    pub icon_theme: String,
    pub color_scheme: String,
}

fn default_theme() -> String {
    "default".to_string()
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            word_wrap: true,
            toolbar_text: false,
            toolbar_enabled: true,
            statusbar_enabled: true,
            hc_line_enabled: true,
            large_icons: false,
            line_numbers_enabled: true,
            icon_theme: default_theme(),
            color_scheme: default_theme(),
        }
    }
}

impl EditorOptions {
    /// Read every option from the store, keeping defaults for missing keys
    pub fn load(settings: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        Self {
            word_wrap: store::read_or(settings, keys::WORD_WRAP, defaults.word_wrap),
            toolbar_text: store::read_or(settings, keys::TOOLBAR_TEXT, defaults.toolbar_text),
            toolbar_enabled: store::read_or(settings, keys::TOOLBAR_ENABLED, defaults.toolbar_enabled),
            statusbar_enabled: store::read_or(settings, keys::STATUSBAR_ENABLED, defaults.statusbar_enabled),
            hc_line_enabled: store::read_or(settings, keys::HC_LINE_ENABLED, defaults.hc_line_enabled),
            large_icons: store::read_or(settings, keys::LARGE_ICONS, defaults.large_icons),
            line_numbers_enabled: store::read_or(
                settings,
                keys::LINE_NUMBERS_ENABLED,
                defaults.line_numbers_enabled,
            ),
            icon_theme: store::read_or(settings, keys::ICON_THEME, defaults.icon_theme),
            color_scheme: store::read_or(settings, keys::COLOR_SCHEME, defaults.color_scheme),
        }
    }
}

/// A single option edit made from one window's menus or toolbar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionChange {
    WordWrap(bool),
    ToolbarText(bool),
    ToolbarEnabled(bool),
    StatusBarEnabled(bool),
    HcLineEnabled(bool),
    LargeIcons(bool),
    LineNumbersEnabled(bool),
    IconTheme(String),
    ColorScheme(String),
}

impl OptionChange {
    pub fn key(&self) -> &'static str {
        match self {
            OptionChange::WordWrap(_) => keys::WORD_WRAP,
            OptionChange::ToolbarText(_) => keys::TOOLBAR_TEXT,
            OptionChange::ToolbarEnabled(_) => keys::TOOLBAR_ENABLED,
            OptionChange::StatusBarEnabled(_) => keys::STATUSBAR_ENABLED,
            OptionChange::HcLineEnabled(_) => keys::HC_LINE_ENABLED,
            OptionChange::LargeIcons(_) => keys::LARGE_ICONS,
            OptionChange::LineNumbersEnabled(_) => keys::LINE_NUMBERS_ENABLED,
            OptionChange::IconTheme(_) => keys::ICON_THEME,
            OptionChange::ColorScheme(_) => keys::COLOR_SCHEME,
        }
    }

    /// Persist this edit to the shared store
    pub fn write(&self, settings: &mut dyn SettingsStore) -> Result<()> {
        match self {
            OptionChange::WordWrap(v)
            | OptionChange::ToolbarText(v)
            | OptionChange::ToolbarEnabled(v)
            | OptionChange::StatusBarEnabled(v)
            | OptionChange::HcLineEnabled(v)
            | OptionChange::LargeIcons(v)
            | OptionChange::LineNumbersEnabled(v) => store::write(settings, self.key(), v),
            OptionChange::IconTheme(v) | OptionChange::ColorScheme(v) => {
                store::write(settings, self.key(), v)
            }
        }
    }
}
