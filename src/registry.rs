//! Live window membership and settings fan-out
//!
//! The registry only tracks identities. Windows themselves are owned by the
//! coordinator; a record here never keeps a window alive.

use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

use crate::errors::{SessionError, SessionResult};
use crate::types::{GroupTag, WindowId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowRecord {
    pub window: WindowId,
    pub group: GroupTag,
}

#[derive(Debug, Default)]
pub struct WindowRegistry {
    records: HashMap<WindowId, WindowRecord>,
    groups: HashMap<GroupTag, BTreeSet<WindowId>>,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `window` to `group`; it receives every later broadcast of that group
    pub fn register(&mut self, window: WindowId, group: GroupTag) {
        if let Some(existing) = self.records.get(&window) {
            warn!(window = %window, group = %existing.group, "Window already registered, ignoring");
            return;
        }
        self.records.insert(window, WindowRecord { window, group });
        self.groups.entry(group).or_default().insert(window);
        info!(window = %window, group = %group, members = self.groups[&group].len(), "Registered window");
    }

    /// Join `sibling`'s group, linking both ways with every existing member
    pub fn register_with(&mut self, window: WindowId, sibling: WindowId) -> SessionResult<GroupTag> {
        let group = self
            .group_of(sibling)
            .ok_or(SessionError::UnknownWindow(sibling))?;
        self.register(window, group);
        Ok(group)
    }

    /// Remove `window`; a no-op for windows that never finished registering
    pub fn unregister(&mut self, window: WindowId) -> bool {
        let Some(record) = self.records.remove(&window) else {
            debug!(window = %window, "Unregister for unknown window, nothing to do");
            return false;
        };

        if let Some(members) = self.groups.get_mut(&record.group) {
            members.remove(&window);
            if members.is_empty() {
                self.groups.remove(&record.group);
            }
        }
        info!(window = %window, group = %record.group, "Unregistered window");
        true
    }

    /// Call `deliver` once for every other member of `origin`'s group
    /// Returns the number of deliveries
    pub fn broadcast_settings_changed<F>(&self, origin: WindowId, mut deliver: F) -> usize
    where
        F: FnMut(WindowId),
    {
        let Some(record) = self.records.get(&origin) else {
            warn!(window = %origin, "Broadcast from unregistered window dropped");
            return 0;
        };

        let mut delivered = 0;
        for &sibling in self.groups.get(&record.group).into_iter().flatten() {
            if sibling != origin {
                deliver(sibling);
                delivered += 1;
            }
        }
        debug!(origin = %origin, group = %record.group, delivered, "Broadcast settings change");
        delivered
    }

    pub fn group_of(&self, window: WindowId) -> Option<GroupTag> {
        self.records.get(&window).map(|r| r.group)
    }

    pub fn contains(&self, window: WindowId) -> bool {
        self.records.contains_key(&window)
    }

    pub fn members(&self, group: GroupTag) -> Vec<WindowId> {
        self.groups
            .get(&group)
            .map(|members| members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn ids(n: u64) -> Vec<WindowId> {
        (1..=n).map(WindowId::new).collect()
    }

    #[test]
    fn test_broadcast_excludes_origin() {
        let mut registry = WindowRegistry::new();
        let group = GroupTag::new(1);
        for id in ids(3) {
            registry.register(id, group);
        }

        let mut received = Vec::new();
        let count = registry.broadcast_settings_changed(WindowId::new(2), |w| received.push(w));

        assert_eq!(count, 2);
        received.sort();
        assert_eq!(received, vec![WindowId::new(1), WindowId::new(3)]);
    }

    #[test]
    fn test_broadcast_reaches_every_sibling_exactly_once() {
        let mut registry = WindowRegistry::new();
        let group = GroupTag::new(1);
        let windows = ids(8);
        registry.register(windows[0], group);
        for pair in windows.windows(2) {
            registry.register_with(pair[1], pair[0]).unwrap();
        }

        for &origin in &windows {
            let mut hits: HashMap<WindowId, usize> = HashMap::new();
            registry.broadcast_settings_changed(origin, |w| *hits.entry(w).or_default() += 1);

            assert_eq!(hits.len(), windows.len() - 1);
            assert!(!hits.contains_key(&origin));
            assert!(hits.values().all(|&n| n == 1));
        }
    }

    #[test]
    fn test_link_is_symmetric() {
        let mut registry = WindowRegistry::new();
        let (a, b) = (WindowId::new(1), WindowId::new(2));
        registry.register(a, GroupTag::new(7));
        registry.register_with(b, a).unwrap();

        let mut from_a = Vec::new();
        registry.broadcast_settings_changed(a, |w| from_a.push(w));
        let mut from_b = Vec::new();
        registry.broadcast_settings_changed(b, |w| from_b.push(w));

        assert_eq!(from_a, vec![b]);
        assert_eq!(from_b, vec![a]);
    }

    #[test]
    fn test_groups_are_isolated() {
        let mut registry = WindowRegistry::new();
        registry.register(WindowId::new(1), GroupTag::new(1));
        registry.register(WindowId::new(2), GroupTag::new(2));

        let count = registry.broadcast_settings_changed(WindowId::new(1), |_| {});
        assert_eq!(count, 0);
    }

    #[test]
    fn test_unregister_unknown_is_noop() {
        let mut registry = WindowRegistry::new();
        assert!(!registry.unregister(WindowId::new(42)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unregister_stops_delivery() {
        let mut registry = WindowRegistry::new();
        let group = GroupTag::new(1);
        for id in ids(3) {
            registry.register(id, group);
        }
        assert!(registry.unregister(WindowId::new(3)));
        assert!(!registry.contains(WindowId::new(3)));

        let mut received = Vec::new();
        registry.broadcast_settings_changed(WindowId::new(1), |w| received.push(w));
        assert_eq!(received, vec![WindowId::new(2)]);
        assert_eq!(registry.members(group), vec![WindowId::new(1), WindowId::new(2)]);
    }

    #[test]
    fn test_register_with_unknown_sibling_fails() {
        let mut registry = WindowRegistry::new();
        let err = registry.register_with(WindowId::new(2), WindowId::new(1)).unwrap_err();
        assert!(matches!(err, SessionError::UnknownWindow(id) if id == WindowId::new(1)));
        assert!(!registry.contains(WindowId::new(2)));
    }

    #[test]
    fn test_duplicate_register_keeps_single_record() {
        let mut registry = WindowRegistry::new();
        registry.register(WindowId::new(1), GroupTag::new(1));
        registry.register(WindowId::new(1), GroupTag::new(2));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.group_of(WindowId::new(1)), Some(GroupTag::new(1)));
    }
}
