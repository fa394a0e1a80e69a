//! One live top-level window and the editing widget it hosts

use anyhow::Result;
use std::io;
use std::path::Path;
use tracing::debug;

use crate::config::EditorOptions;
use crate::document::DocumentState;
use crate::geometry::GeometrySnapshot;
use crate::types::WindowId;

/// Answer of the editing widget when its window is asked to close
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseDecision {
    /// Unsaved work was saved or discarded; the window may close
    Proceed,
    /// The user cancelled; the window stays open
    Veto,
}

/// The text-editing widget hosted by a window
pub trait Editor {
    /// Replace the buffer with the contents of `path`
    fn load(&mut self, path: &Path) -> io::Result<()>;

    fn is_modified(&self) -> bool;

    fn set_read_only(&mut self, read_only: bool);

    /// Re-apply shared view options (wrap, line numbers, theme...)
    fn apply_options(&mut self, options: &EditorOptions);

    /// Ask whether unsaved changes may be dropped (save/discard/cancel prompt)
    fn confirm_close(&mut self) -> CloseDecision;
}

/// Creates the editing widget for each new window
pub trait EditorFactory {
    fn create(&mut self) -> Result<Box<dyn Editor>>;
}

/// Coordinator-side state of a live window
pub struct SessionWindow {
    id: WindowId,
    pub(crate) editor: Box<dyn Editor>,
    pub(crate) document: DocumentState,
    pub(crate) geometry: GeometrySnapshot,
    pub(crate) options: EditorOptions,
    pub(crate) title: String,
    pub(crate) save_enabled: bool,
    /// Sibling broadcasts that changed this window's options
    pub(crate) settings_syncs: usize,
}

impl SessionWindow {
    pub(crate) fn new(
        id: WindowId,
        mut editor: Box<dyn Editor>,
        geometry: GeometrySnapshot,
        options: EditorOptions,
    ) -> Self {
        editor.apply_options(&options);
        Self {
            id,
            editor,
            document: DocumentState::new(),
            geometry,
            options,
            title: String::new(),
            save_enabled: true,
            settings_syncs: 0,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn document(&self) -> &DocumentState {
        &self.document
    }

    pub fn geometry(&self) -> GeometrySnapshot {
        self.geometry
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_save_enabled(&self) -> bool {
        self.save_enabled
    }

    /// Broadcasts that actually changed options; no-op deliveries are not counted
    pub fn settings_syncs(&self) -> usize {
        self.settings_syncs
    }

    /// Take the freshly read options and push them into the editor
    /// Returns false when nothing changed
    pub(crate) fn apply_options(&mut self, options: EditorOptions) -> bool {
        if self.options == options {
            debug!(window = %self.id, "Options unchanged, nothing to apply");
            return false;
        }
        self.editor.apply_options(&options);
        self.options = options;
        true
    }
}

impl std::fmt::Debug for SessionWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWindow")
            .field("id", &self.id)
            .field("document", &self.document)
            .field("geometry", &self.geometry)
            .field("title", &self.title)
            .field("save_enabled", &self.save_enabled)
            .finish_non_exhaustive()
    }
}

/// Title shown for `document`: `<marker><name> - <application>`
pub fn derive_title(document: &DocumentState, application: &str, untitled_label: &str) -> String {
    use crate::constants::title;

    let base = document
        .file_name()
        .unwrap_or_else(|| untitled_label.to_string());
    let marker = if document.is_modified() {
        title::MODIFIED_MARKER
    } else {
        title::CLEAN_MARKER
    };
    format!("{marker}{base}{}{application}", title::SEPARATOR)
}

/// Save stays available unless the document is named and clean
pub fn save_enabled(document: &DocumentState) -> bool {
    document.is_untitled() || document.is_modified()
}
