//! Application-wide constants
//!
//! Settings keys, geometry defaults and title fragments live here so the
//! coordinator and the stores agree on a single source of truth.

/// Application identity defaults
pub mod app {
    /// Organization scope for the settings store
    pub const ORGANIZATION: &str = "Quillpad";

    /// Application name shown at the end of every window title
    pub const NAME: &str = "Quillpad";

    /// Title base used while a document has no path
    pub const UNTITLED: &str = "Untitled";

    /// File extension of the JSON settings file
    pub const SETTINGS_EXTENSION: &str = "json";
}

/// Window geometry constants
pub mod geometry {
    /// Default window width when nothing is stored
    pub const DEFAULT_WIDTH: u32 = 640;

    /// Default window height when nothing is stored
    pub const DEFAULT_HEIGHT: u32 = 420;

    /// Default window position when nothing is stored
    pub const DEFAULT_X: i32 = 200;
    pub const DEFAULT_Y: i32 = 200;

    /// Minimum window size, enforced regardless of stored values
    pub const MIN_WIDTH: u32 = 420;
    pub const MIN_HEIGHT: u32 = 420;

    /// Offset applied to a spawned window relative to its parent (both axes)
    pub const CASCADE_OFFSET: i32 = 30;
}

/// Title derivation fragments
pub mod title {
    /// Prefix for documents with unsaved changes
    pub const MODIFIED_MARKER: &str = "* - ";

    /// Prefix for clean documents
    pub const CLEAN_MARKER: &str = " - ";

    /// Separator between the document name and the application name
    pub const SEPARATOR: &str = " - ";
}

/// Settings store keys
pub mod keys {
    pub const SIZE: &str = "size";
    pub const POSITION: &str = "position";
    pub const MAXIMIZED: &str = "maximized";

    pub const WORD_WRAP: &str = "wordwrap-enabled";
    pub const TOOLBAR_TEXT: &str = "toolbar-text";
    pub const TOOLBAR_ENABLED: &str = "toolbar-enabled";
    pub const STATUSBAR_ENABLED: &str = "statusbar-enabled";
    pub const HC_LINE_ENABLED: &str = "hc-line-enabled";
    pub const LARGE_ICONS: &str = "large-icons";
    pub const LINE_NUMBERS_ENABLED: &str = "line-numbers-enabled";
    pub const ICON_THEME: &str = "icon-theme";
    pub const COLOR_SCHEME: &str = "color-scheme";
}
