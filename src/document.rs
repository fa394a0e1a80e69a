use std::path::{Path, PathBuf};

/// Document identity and dirty state of a single window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentState {
    /// `None` while the document is untitled
    path: Option<PathBuf>,
    modified: bool,
    read_only: bool,
}

impl DocumentState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.path.is_none()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Only an untitled document with no edits may be replaced in place
    pub fn can_be_replaced(&self) -> bool {
        self.is_untitled() && !self.modified
    }

    /// File name shown in the title, if the document has a path
    pub fn file_name(&self) -> Option<String> {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().into_owned())
    }

    /// Returns true if the flag actually changed
    pub fn set_modified(&mut self, modified: bool) -> bool {
        let changed = self.modified != modified;
        self.modified = modified;
        changed
    }

    /// Returns true if the path actually changed
    pub fn set_path(&mut self, path: Option<PathBuf>) -> bool {
        let changed = self.path != path;
        self.path = path;
        changed
    }

    pub fn set_read_only(&mut self, read_only: bool) -> bool {
        let changed = self.read_only != read_only;
        self.read_only = read_only;
        changed
    }
}
