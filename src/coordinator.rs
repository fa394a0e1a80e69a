//! Multi-window session coordination
//!
//! The coordinator owns every live window of the running instance together
//! with the shared settings store and the window registry. It decides where
//! an opened file goes (reuse the requesting window or spawn a new one),
//! places spawned windows relative to their parent, keeps each window's title
//! and save affordance in step with its document, and fans settings changes
//! out to every sibling window.
//!
//! Everything runs on the UI thread. Each operation completes before the next
//! event is handled, so no window ever observes another half-updated.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::config::{AppIdentity, EditorOptions, OptionChange, SettingsStore};
use crate::errors::{SessionError, SessionResult};
use crate::geometry::{self, GeometrySnapshot};
use crate::registry::WindowRegistry;
use crate::types::{GroupTag, WindowId};
use crate::window::{self, CloseDecision, EditorFactory, SessionWindow};

/// Changes the surrounding UI layer reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionNotification {
    WindowOpened(WindowId),
    TitleChanged { window: WindowId, title: String },
    SaveEnabledChanged { window: WindowId, enabled: bool },
    ReadOnlyChanged { window: WindowId, read_only: bool },
    WindowClosed(WindowId),
}

/// Where an opened file ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOutcome {
    pub window: WindowId,
    /// True when the requesting window was reused
    pub reused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    Closed,
    Vetoed,
}

pub struct SessionCoordinator {
    identity: AppIdentity,
    settings: Box<dyn SettingsStore>,
    registry: WindowRegistry,
    windows: BTreeMap<WindowId, SessionWindow>,
    factory: Box<dyn EditorFactory>,
    group: GroupTag,
    next_id: u64,
    notifier: Sender<SessionNotification>,
}

fn lookup(windows: &BTreeMap<WindowId, SessionWindow>, id: WindowId) -> SessionResult<&SessionWindow> {
    windows.get(&id).ok_or(SessionError::UnknownWindow(id))
}

fn lookup_mut(
    windows: &mut BTreeMap<WindowId, SessionWindow>,
    id: WindowId,
) -> SessionResult<&mut SessionWindow> {
    windows.get_mut(&id).ok_or(SessionError::UnknownWindow(id))
}

impl SessionCoordinator {
    /// Build a coordinator and the receiving end of its notifications
    pub fn new(
        identity: AppIdentity,
        settings: Box<dyn SettingsStore>,
        factory: Box<dyn EditorFactory>,
    ) -> (Self, Receiver<SessionNotification>) {
        let (notifier, notifications) = mpsc::channel();
        let coordinator = Self {
            identity,
            settings,
            registry: WindowRegistry::new(),
            windows: BTreeMap::new(),
            factory,
            group: GroupTag::new(std::process::id()),
            next_id: 1,
            notifier,
        };
        (coordinator, notifications)
    }

    pub fn identity(&self) -> &AppIdentity {
        &self.identity
    }

    pub fn settings(&self) -> &dyn SettingsStore {
        &*self.settings
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn window(&self, id: WindowId) -> Option<&SessionWindow> {
        self.windows.get(&id)
    }

    pub fn window_ids(&self) -> Vec<WindowId> {
        self.windows.keys().copied().collect()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    fn notify(&self, notification: SessionNotification) {
        // A dropped receiver is ignored
        let _ = self.notifier.send(notification);
    }

    /// Allocate the window and its editor without registering it anywhere
    fn build_window(&mut self, geometry: GeometrySnapshot) -> SessionResult<WindowId> {
        let editor = self.factory.create().map_err(SessionError::WindowCreation)?;
        let id = WindowId::new(self.next_id);
        self.next_id += 1;

        let options = EditorOptions::load(&*self.settings);
        self.windows.insert(id, SessionWindow::new(id, editor, geometry, options));
        Ok(id)
    }

    /// Open a parentless window using the stored default geometry
    pub fn create_window(&mut self) -> SessionResult<WindowId> {
        let geometry = geometry::initial_geometry(&*self.settings);
        let id = self.build_window(geometry)?;
        self.registry.register(id, self.group);
        self.recompute_title_and_affordances(id)?;

        info!(window = %id, ?geometry, "Opened window");
        self.notify(SessionNotification::WindowOpened(id));
        Ok(id)
    }

    /// Open a new empty window cascaded from `parent`
    pub fn spawn_window(&mut self, parent: WindowId) -> SessionResult<WindowId> {
        let parent_geometry = lookup(&self.windows, parent)?.geometry;

        // The next parentless window starts where the parent is now
        if let Err(e) = geometry::persist(&mut *self.settings, &parent_geometry) {
            error!(window = %parent, error = ?e, "Failed to persist parent geometry before spawn");
        }

        let geometry = geometry::cascaded_geometry(&parent_geometry);
        let id = self.build_window(geometry)?;
        if let Err(e) = self.registry.register_with(id, parent) {
            self.windows.remove(&id);
            return Err(e);
        }
        self.recompute_title_and_affordances(id)?;

        info!(window = %id, parent = %parent, ?geometry, "Spawned window");
        self.notify(SessionNotification::WindowOpened(id));
        Ok(id)
    }

    /// "New" action: an empty window next to `window`
    pub fn new_file(&mut self, window: WindowId) -> SessionResult<WindowId> {
        self.spawn_window(window)
    }

    /// Route `path` to `window` if it holds nothing worth keeping, otherwise
    /// to a freshly spawned window
    pub fn open_file(&mut self, window: WindowId, path: impl AsRef<Path>) -> SessionResult<OpenOutcome> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(SessionError::EmptyPath);
        }

        let reused = lookup(&self.windows, window)?.document.can_be_replaced();
        let target = if reused {
            window
        } else {
            self.spawn_window(window)?
        };

        self.load_into(target, path)?;
        debug!(window = %target, reused, "Routed open request");
        Ok(OpenOutcome { window: target, reused })
    }

    /// "Open..." action: every non-empty path in order, one result per attempt
    pub fn open_files(&mut self, window: WindowId, paths: &[PathBuf]) -> Vec<SessionResult<OpenOutcome>> {
        paths
            .iter()
            .filter(|path| !path.as_os_str().is_empty())
            .map(|path| self.open_file(window, path))
            .collect()
    }

    fn load_into(&mut self, id: WindowId, path: &Path) -> SessionResult<()> {
        let target = lookup_mut(&mut self.windows, id)?;
        target.editor.load(path).map_err(|source| SessionError::Load {
            window: id,
            path: path.to_path_buf(),
            source,
        })?;

        let modified = target.editor.is_modified();
        target.document.set_path(Some(path.to_path_buf()));
        target.document.set_modified(modified);
        info!(window = %id, path = %path.display(), "Loaded file");

        self.recompute_title_and_affordances(id)
    }

    /// Rebuild the title and the save affordance from the document state
    /// The only place either is computed
    pub fn recompute_title_and_affordances(&mut self, id: WindowId) -> SessionResult<()> {
        let target = lookup_mut(&mut self.windows, id)?;
        let first = target.title.is_empty();

        let title = window::derive_title(
            &target.document,
            &self.identity.application,
            &self.identity.untitled_label,
        );
        let save_enabled = window::save_enabled(&target.document);

        let title_changed = title != target.title;
        let save_changed = first || save_enabled != target.save_enabled;
        target.title = title.clone();
        target.save_enabled = save_enabled;

        if title_changed {
            debug!(window = %id, title = %title, "Title changed");
            self.notify(SessionNotification::TitleChanged { window: id, title });
        }
        if save_changed {
            self.notify(SessionNotification::SaveEnabledChanged { window: id, enabled: save_enabled });
        }
        Ok(())
    }

    /// Edit notification from the editing widget
    pub fn document_modified(&mut self, id: WindowId, modified: bool) -> SessionResult<()> {
        if lookup_mut(&mut self.windows, id)?.document.set_modified(modified) {
            self.recompute_title_and_affordances(id)?;
        }
        Ok(())
    }

    /// The editing widget saved its buffer to `path`
    pub fn document_saved(&mut self, id: WindowId, path: PathBuf) -> SessionResult<()> {
        let target = lookup_mut(&mut self.windows, id)?;
        target.document.set_path(Some(path));
        target.document.set_modified(false);
        self.recompute_title_and_affordances(id)
    }

    /// The editing widget changed its document identity without saving
    pub fn document_path_changed(&mut self, id: WindowId, path: Option<PathBuf>) -> SessionResult<()> {
        if lookup_mut(&mut self.windows, id)?.document.set_path(path) {
            self.recompute_title_and_affordances(id)?;
        }
        Ok(())
    }

    /// Store one option edit made in `id`, then sync every window
    pub fn set_option(&mut self, id: WindowId, change: OptionChange) -> SessionResult<usize> {
        lookup(&self.windows, id)?;
        change.write(&mut *self.settings)?;
        info!(window = %id, key = change.key(), "Option changed");
        self.notify_local_change(id)
    }

    /// Re-apply shared settings in `id`, then in every sibling
    /// Returns how many siblings were notified
    pub fn notify_local_change(&mut self, id: WindowId) -> SessionResult<usize> {
        let options = EditorOptions::load(&*self.settings);
        lookup_mut(&mut self.windows, id)?.apply_options(options);

        let settings = &*self.settings;
        let windows = &mut self.windows;
        let delivered = self.registry.broadcast_settings_changed(id, |sibling| {
            let Some(target) = windows.get_mut(&sibling) else {
                warn!(window = %sibling, "Registered window missing from session");
                return;
            };
            // Siblings re-read the store; the value is never forwarded
            if target.apply_options(EditorOptions::load(settings)) {
                target.settings_syncs += 1;
            }
        });
        Ok(delivered)
    }

    /// Per-window toggle; not shared with siblings
    pub fn set_read_only(&mut self, id: WindowId, read_only: bool) -> SessionResult<()> {
        let target = lookup_mut(&mut self.windows, id)?;
        if target.document.set_read_only(read_only) {
            target.editor.set_read_only(read_only);
            self.notify(SessionNotification::ReadOnlyChanged { window: id, read_only });
        }
        Ok(())
    }

    /// Windowing-layer report of a move, resize or (un)maximize
    pub fn update_geometry(&mut self, id: WindowId, snapshot: GeometrySnapshot) -> SessionResult<()> {
        let target = lookup_mut(&mut self.windows, id)?;
        if snapshot.maximized {
            // Transient geometry belongs to the windowing layer
            target.geometry.maximized = true;
        } else {
            target.geometry = GeometrySnapshot {
                size: geometry::clamp_to_minimum(snapshot.size),
                position: snapshot.position,
                maximized: false,
            };
        }
        Ok(())
    }

    /// Close `id` unless its editor vetoes
    pub fn request_close(&mut self, id: WindowId) -> SessionResult<CloseOutcome> {
        let target = lookup_mut(&mut self.windows, id)?;

        if let Err(e) = geometry::persist(&mut *self.settings, &target.geometry) {
            error!(window = %id, error = ?e, "Failed to persist geometry on close");
        }

        if target.editor.confirm_close() == CloseDecision::Veto {
            info!(window = %id, "Close vetoed by editor");
            return Ok(CloseOutcome::Vetoed);
        }

        self.registry.unregister(id);
        self.windows.remove(&id);
        info!(window = %id, remaining = self.windows.len(), "Closed window");
        self.notify(SessionNotification::WindowClosed(id));
        Ok(CloseOutcome::Closed)
    }

    /// Application quit: close everything, returning the windows that refused
    pub fn close_all(&mut self) -> Vec<WindowId> {
        let mut vetoed = Vec::new();
        for id in self.window_ids() {
            match self.request_close(id) {
                Ok(CloseOutcome::Closed) => {}
                Ok(CloseOutcome::Vetoed) => vetoed.push(id),
                Err(e) => {
                    error!(window = %id, error = %e, "Failed to close window");
                    vetoed.push(id);
                }
            }
        }
        vetoed
    }
}
