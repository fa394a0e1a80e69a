//! Plain in-memory text buffer used by the headless driver

use anyhow::Result;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{info, warn};

use crate::config::EditorOptions;
use crate::window::{CloseDecision, Editor, EditorFactory};

#[derive(Debug, Default)]
pub struct TextBuffer {
    text: String,
    modified: bool,
    read_only: bool,
    options: EditorOptions,
    discard_unsaved: bool,
}

impl TextBuffer {
    pub fn new(discard_unsaved: bool) -> Self {
        Self { discard_unsaved, ..Self::default() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Append typed text; ignored while read-only
    pub fn insert(&mut self, text: &str) -> bool {
        if self.read_only {
            return false;
        }
        self.text.push_str(text);
        self.modified = true;
        true
    }
}

impl Editor for TextBuffer {
    fn load(&mut self, path: &Path) -> io::Result<()> {
        self.text = fs::read_to_string(path)?;
        self.modified = false;
        info!(path = %path.display(), bytes = self.text.len(), "Read file into buffer");
        Ok(())
    }

    fn is_modified(&self) -> bool {
        self.modified
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn apply_options(&mut self, options: &EditorOptions) {
        self.options = options.clone();
    }

    fn confirm_close(&mut self) -> CloseDecision {
        if !self.modified {
            return CloseDecision::Proceed;
        }
        if self.discard_unsaved {
            warn!(bytes = self.text.len(), "Discarding unsaved changes");
            CloseDecision::Proceed
        } else {
            CloseDecision::Veto
        }
    }
}

/// Creates a fresh TextBuffer for every window
#[derive(Debug, Default, Clone, Copy)]
pub struct TextBufferFactory {
    pub discard_unsaved: bool,
}

impl EditorFactory for TextBufferFactory {
    fn create(&mut self) -> Result<Box<dyn Editor>> {
        Ok(Box::new(TextBuffer::new(self.discard_unsaved)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_file_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        let mut buffer = TextBuffer::new(false);
        buffer.insert("scratch");
        buffer.load(&path).unwrap();

        assert_eq!(buffer.text(), "hello");
        assert!(!buffer.is_modified());
    }

    #[test]
    fn test_load_missing_file_keeps_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = TextBuffer::new(false);
        buffer.insert("keep me");

        assert!(buffer.load(&dir.path().join("absent.txt")).is_err());
        assert_eq!(buffer.text(), "keep me");
        assert!(buffer.is_modified());
    }

    #[test]
    fn test_modified_buffer_vetoes_close_unless_discarding() {
        let mut keep = TextBuffer::new(false);
        keep.insert("x");
        assert_eq!(keep.confirm_close(), CloseDecision::Veto);

        let mut discard = TextBuffer::new(true);
        discard.insert("x");
        assert_eq!(discard.confirm_close(), CloseDecision::Proceed);

        assert_eq!(TextBuffer::new(false).confirm_close(), CloseDecision::Proceed);
    }

    #[test]
    fn test_read_only_blocks_edits() {
        let mut buffer = TextBuffer::new(false);
        buffer.set_read_only(true);
        assert!(!buffer.insert("x"));
        assert!(!buffer.is_modified());
    }
}
