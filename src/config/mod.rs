//! Configuration for the session coordinator
//!
//! This module provides:
//! - **store**: the persisted key/value SettingsStore shared by every window
//! - **options**: the typed user-facing options kept in that store

pub mod options;
pub mod store;

// Re-export commonly used types
pub use options::{EditorOptions, OptionChange};
pub use store::{JsonSettingsStore, MemorySettingsStore, SettingsStore};

use crate::constants::app;

/// Who the running application is
/// Scopes the settings store and feeds the window title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub organization: String,
    pub application: String,
    /// Localized title base for documents without a path
    pub untitled_label: String,
}

impl AppIdentity {
    pub fn new(organization: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            organization: organization.into(),
            application: application.into(),
            untitled_label: app::UNTITLED.to_string(),
        }
    }

    pub fn with_untitled_label(mut self, label: impl Into<String>) -> Self {
        self.untitled_label = label.into();
        self
    }
}

impl Default for AppIdentity {
    fn default() -> Self {
        Self::new(app::ORGANIZATION, app::NAME)
    }
}
