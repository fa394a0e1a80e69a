//! Scriptable editor doubles shared by the unit tests

use anyhow::{Result, anyhow};
use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::config::EditorOptions;
use crate::window::{CloseDecision, Editor, EditorFactory};

/// Any path containing this fails to load
pub const MISSING_MARKER: &str = "missing";

#[derive(Debug)]
struct MockState {
    loaded: Vec<PathBuf>,
    modified_after_load: bool,
    modified: bool,
    read_only: bool,
    applied: Vec<EditorOptions>,
    close_decision: CloseDecision,
}

/// Shared view into one mock editor after it was boxed into a window
#[derive(Debug, Clone)]
pub struct MockHandle(Rc<RefCell<MockState>>);

impl MockHandle {
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.0.borrow().loaded.clone()
    }

    pub fn read_only(&self) -> bool {
        self.0.borrow().read_only
    }

    pub fn applied_count(&self) -> usize {
        self.0.borrow().applied.len()
    }

    pub fn last_options(&self) -> Option<EditorOptions> {
        self.0.borrow().applied.last().cloned()
    }

    pub fn set_close_decision(&self, decision: CloseDecision) {
        self.0.borrow_mut().close_decision = decision;
    }
}

struct MockEditor(MockHandle);

impl Editor for MockEditor {
    fn load(&mut self, path: &Path) -> io::Result<()> {
        let mut state = self.0.0.borrow_mut();
        if path.to_string_lossy().contains(MISSING_MARKER) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        }
        state.loaded.push(path.to_path_buf());
        state.modified = state.modified_after_load;
        Ok(())
    }

    fn is_modified(&self) -> bool {
        self.0.0.borrow().modified
    }

    fn set_read_only(&mut self, read_only: bool) {
        self.0.0.borrow_mut().read_only = read_only;
    }

    fn apply_options(&mut self, options: &EditorOptions) {
        self.0.0.borrow_mut().applied.push(options.clone());
    }

    fn confirm_close(&mut self) -> CloseDecision {
        self.0.0.borrow().close_decision
    }
}

#[derive(Debug, Default)]
struct FactoryState {
    editors: Vec<MockHandle>,
    fail_next: bool,
    modified_after_load: bool,
}

/// Hands out mock editors and remembers them in creation order
#[derive(Debug, Clone, Default)]
pub struct MockFactory(Rc<RefCell<FactoryState>>);

impl MockFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Editor created `index`-th (0-based)
    pub fn editor(&self, index: usize) -> MockHandle {
        self.0.borrow().editors[index].clone()
    }

    pub fn fail_next_create(&self) {
        self.0.borrow_mut().fail_next = true;
    }

    /// Editors created from now on report their buffer as modified after a load
    pub fn modified_after_load(&self, modified: bool) {
        self.0.borrow_mut().modified_after_load = modified;
    }
}

impl EditorFactory for MockFactory {
    fn create(&mut self) -> Result<Box<dyn Editor>> {
        let mut factory = self.0.borrow_mut();
        if factory.fail_next {
            factory.fail_next = false;
            return Err(anyhow!("window handle limit reached"));
        }

        let handle = MockHandle(Rc::new(RefCell::new(MockState {
            loaded: Vec::new(),
            modified_after_load: factory.modified_after_load,
            modified: false,
            read_only: false,
            applied: Vec::new(),
            close_decision: CloseDecision::Proceed,
        })));
        factory.editors.push(handle.clone());
        Ok(Box::new(MockEditor(handle)))
    }
}
