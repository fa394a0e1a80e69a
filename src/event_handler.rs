use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::OptionChange;
use crate::coordinator::{CloseOutcome, SessionCoordinator};
use crate::geometry::GeometrySnapshot;
use crate::types::WindowId;

/// Discrete UI events delivered to the session, one at a time
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// "Open..." picked these files in `window`
    OpenFiles { window: WindowId, paths: Vec<PathBuf> },
    NewWindow { window: WindowId },
    DocumentModified { window: WindowId, modified: bool },
    DocumentSaved { window: WindowId, path: PathBuf },
    OptionChanged { window: WindowId, change: OptionChange },
    ReadOnlyToggled { window: WindowId, read_only: bool },
    GeometryChanged { window: WindowId, geometry: GeometrySnapshot },
    CloseRequested { window: WindowId },
    /// Application is about to quit; every window gets a close request
    Quit,
}

pub fn handle_event(coordinator: &mut SessionCoordinator, event: SessionEvent) -> Result<()> {
    match event {
        SessionEvent::OpenFiles { window, paths } => {
            let mut failures = Vec::new();
            for result in coordinator.open_files(window, &paths) {
                if let Err(e) = result {
                    warn!(window = %window, error = %e, "Open failed");
                    failures.push(e.to_string());
                }
            }
            if !failures.is_empty() {
                anyhow::bail!("{} file(s) could not be opened: {}", failures.len(), failures.join("; "));
            }
        }
        SessionEvent::NewWindow { window } => {
            coordinator.new_file(window)?;
        }
        SessionEvent::DocumentModified { window, modified } => {
            coordinator.document_modified(window, modified)?;
        }
        SessionEvent::DocumentSaved { window, path } => {
            coordinator.document_saved(window, path)?;
        }
        SessionEvent::OptionChanged { window, change } => {
            coordinator.set_option(window, change)?;
        }
        SessionEvent::ReadOnlyToggled { window, read_only } => {
            coordinator.set_read_only(window, read_only)?;
        }
        SessionEvent::GeometryChanged { window, geometry } => {
            coordinator.update_geometry(window, geometry)?;
        }
        SessionEvent::CloseRequested { window } => {
            if coordinator.request_close(window)? == CloseOutcome::Vetoed {
                info!(window = %window, "Window kept open");
            }
        }
        SessionEvent::Quit => {
            let vetoed = coordinator.close_all();
            if !vetoed.is_empty() {
                info!(count = vetoed.len(), "Quit cancelled by windows with unsaved changes");
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppIdentity, MemorySettingsStore};
    use crate::testing::MockFactory;
    use crate::window::CloseDecision;

    fn session() -> (SessionCoordinator, MockFactory, WindowId) {
        let factory = MockFactory::new();
        let (mut coordinator, _rx) = SessionCoordinator::new(
            AppIdentity::new("Org", "AppName"),
            Box::new(MemorySettingsStore::new()),
            Box::new(factory.clone()),
        );
        let first = coordinator.create_window().unwrap();
        (coordinator, factory, first)
    }

    #[test]
    fn test_open_files_event_routes_each_path() {
        let (mut coordinator, _, first) = session();
        let event = SessionEvent::OpenFiles {
            window: first,
            paths: vec![PathBuf::from("/tmp/a.txt"), PathBuf::from("/tmp/b.txt")],
        };

        handle_event(&mut coordinator, event).unwrap();
        assert_eq!(coordinator.window_count(), 2);
    }

    #[test]
    fn test_open_files_event_reports_failures() {
        let (mut coordinator, _, first) = session();
        let event = SessionEvent::OpenFiles {
            window: first,
            paths: vec![PathBuf::from("/tmp/missing.txt")],
        };

        let err = handle_event(&mut coordinator, event).unwrap_err();
        assert!(err.to_string().contains("1 file(s) could not be opened"));
    }

    #[test]
    fn test_option_event_reaches_siblings() {
        let (mut coordinator, _, first) = session();
        handle_event(&mut coordinator, SessionEvent::NewWindow { window: first }).unwrap();
        let second = coordinator.window_ids()[1];

        let event = SessionEvent::OptionChanged {
            window: second,
            change: OptionChange::StatusBarEnabled(false),
        };
        handle_event(&mut coordinator, event).unwrap();

        assert!(!coordinator.window(first).unwrap().options().statusbar_enabled);
    }

    #[test]
    fn test_quit_keeps_vetoing_windows() {
        let (mut coordinator, factory, first) = session();
        handle_event(&mut coordinator, SessionEvent::NewWindow { window: first }).unwrap();
        factory.editor(0).set_close_decision(CloseDecision::Veto);

        handle_event(&mut coordinator, SessionEvent::Quit).unwrap();
        assert_eq!(coordinator.window_ids(), vec![first]);
    }

    #[test]
    fn test_unknown_window_event_is_error() {
        let (mut coordinator, _, _) = session();
        let event = SessionEvent::CloseRequested { window: WindowId::new(77) };
        assert!(handle_event(&mut coordinator, event).is_err());
    }
}
