//! Small value types shared across the session modules

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a live top-level window
/// Allocated by the coordinator, never reused within a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

/// Identity of a window family that shares configuration broadcasts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupTag(u32);

impl GroupTag {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for GroupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

/// Top-left corner of a window in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Same offset applied to both axes, saturating at the coordinate limits
    pub fn offset(self, delta: i32) -> Self {
        Self::new(self.x.saturating_add(delta), self.y.saturating_add(delta))
    }
}

/// Outer size of a window in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_offset_applies_to_both_axes() {
        assert_eq!(Position::new(200, 150).offset(30), Position::new(230, 180));
        assert_eq!(Position::new(-10, 0).offset(30), Position::new(20, 30));
    }

    #[test]
    fn test_position_serializes_as_object() {
        let json = serde_json::to_value(Position::new(5, 7)).unwrap();
        assert_eq!(json, serde_json::json!({ "x": 5, "y": 7 }));
    }

    #[test]
    fn test_window_id_display() {
        assert_eq!(WindowId::new(3).to_string(), "w3");
        assert_eq!(GroupTag::new(1).to_string(), "g1");
    }
}
