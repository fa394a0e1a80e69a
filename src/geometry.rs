use anyhow::Result;
use tracing::{debug, info};

use crate::config::SettingsStore;
use crate::config::store;
use crate::constants::{geometry, keys};
use crate::types::{Position, Size};

/// Size, position and maximized state of one window
/// While maximized, size/position hold the last normal-state geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeometrySnapshot {
    pub size: Size,
    pub position: Position,
    pub maximized: bool,
}

impl GeometrySnapshot {
    pub fn new(size: Size, position: Position, maximized: bool) -> Self {
        Self { size, position, maximized }
    }
}

impl Default for GeometrySnapshot {
    fn default() -> Self {
        Self {
            size: Size::new(geometry::DEFAULT_WIDTH, geometry::DEFAULT_HEIGHT),
            position: Position::new(geometry::DEFAULT_X, geometry::DEFAULT_Y),
            maximized: false,
        }
    }
}

/// Apply the minimum window size floor
pub fn clamp_to_minimum(size: Size) -> Size {
    Size::new(
        size.width.max(geometry::MIN_WIDTH),
        size.height.max(geometry::MIN_HEIGHT),
    )
}

/// Geometry for a window opened without a parent (first window, or default)
/// Priority: stored values > built-in defaults, then the size floor
pub fn initial_geometry(settings: &dyn SettingsStore) -> GeometrySnapshot {
    let defaults = GeometrySnapshot::default();
    let size = store::read_or(settings, keys::SIZE, defaults.size);
    let position = store::read_or(settings, keys::POSITION, defaults.position);
    let maximized = store::read_or(settings, keys::MAXIMIZED, defaults.maximized);

    let snapshot = GeometrySnapshot::new(clamp_to_minimum(size), position, maximized);
    debug!(?snapshot, "Computed initial window geometry");
    snapshot
}

/// Geometry for a window spawned from `parent`
/// Same size, offset down-right so the two never overlap exactly.
/// Not clamped to the screen: repeated spawning can walk windows off-screen.
pub fn cascaded_geometry(parent: &GeometrySnapshot) -> GeometrySnapshot {
    GeometrySnapshot {
        size: parent.size,
        position: parent.position.offset(geometry::CASCADE_OFFSET),
        maximized: parent.maximized,
    }
}

/// Store geometry so the next parentless window inherits it
/// Maximized windows only record the flag, keeping the last normal geometry
pub fn persist(settings: &mut dyn SettingsStore, snapshot: &GeometrySnapshot) -> Result<()> {
    store::write(settings, keys::MAXIMIZED, &snapshot.maximized)?;

    if !snapshot.maximized {
        store::write(settings, keys::SIZE, &snapshot.size)?;
        store::write(settings, keys::POSITION, &snapshot.position)?;
        info!(
            width = snapshot.size.width,
            height = snapshot.size.height,
            x = snapshot.position.x,
            y = snapshot.position.y,
            "Saved window geometry"
        );
    }
    Ok(())
}
