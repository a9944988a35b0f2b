// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry registry: per-element bounds in stack-local coordinates and slot lookup.
//!
//! Layout reports bounds through [`GeometryRegistry::register`]; the drag
//! machinery asks [`GeometryRegistry::index_for_point`] which insertion slot a
//! point falls into. Slot boundaries are the midpoints of each element's
//! extent along the primary axis, so a dragged item swaps with a neighbor once
//! it crosses that neighbor's middle rather than its far edge.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_autoscroll::Axis;
//! use understory_reorder::geometry::GeometryRegistry;
//!
//! let mut geometry = GeometryRegistry::new(Axis::Vertical);
//! geometry.register('a', Rect::new(0.0, 0.0, 100.0, 10.0));
//! geometry.register('b', Rect::new(0.0, 10.0, 100.0, 20.0));
//!
//! // Before the first midpoint.
//! assert_eq!(geometry.index_for_point(Point::new(50.0, 4.0)), 0);
//! // Between the two midpoints.
//! assert_eq!(geometry.index_for_point(Point::new(50.0, 12.0)), 1);
//! // Past the last midpoint.
//! assert_eq!(geometry.index_for_point(Point::new(50.0, 16.0)), 2);
//! ```

use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use understory_autoscroll::Axis;

/// Bounds of every registered element, keyed by element identity.
///
/// Registration is last-write-wins and idempotent: writing the same bounds
/// twice changes nothing, including the [revision](Self::revision).
#[derive(Clone, Debug)]
pub struct GeometryRegistry<K> {
    axis: Axis,
    bounds: HashMap<K, Slot>,
    next_order: u64,
    revision: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Slot {
    rect: Rect,
    /// First-registration order; breaks ties between equal extents.
    order: u64,
}

impl<K> GeometryRegistry<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty registry for a stack ordered along `axis`.
    #[must_use]
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            bounds: HashMap::new(),
            next_order: 0,
            revision: 0,
        }
    }

    /// Returns the primary axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Returns a counter that increases whenever registered geometry changes.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Records the stack-local bounds of `key`.
    ///
    /// Returns `true` if anything changed.
    pub fn register(&mut self, key: K, bounds: Rect) -> bool {
        match self.bounds.get_mut(&key) {
            Some(slot) if slot.rect == bounds => return false,
            Some(slot) => slot.rect = bounds,
            None => {
                let order = self.next_order;
                self.next_order += 1;
                self.bounds.insert(key, Slot { rect: bounds, order });
            }
        }
        self.revision += 1;
        true
    }

    /// Forgets `key`, returning its last bounds.
    pub fn remove(&mut self, key: &K) -> Option<Rect> {
        let removed = self.bounds.remove(key).map(|slot| slot.rect);
        if removed.is_some() {
            self.revision += 1;
        }
        removed
    }

    /// Keeps only the elements for which `keep` returns `true`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        let before = self.bounds.len();
        self.bounds.retain(|key, _| keep(key));
        if self.bounds.len() != before {
            self.revision += 1;
        }
    }

    /// Forgets every element.
    pub fn clear(&mut self) {
        if !self.bounds.is_empty() {
            self.bounds.clear();
            self.revision += 1;
        }
    }

    /// Returns the bounds last registered for `key`.
    #[must_use]
    pub fn bounds(&self, key: &K) -> Option<Rect> {
        self.bounds.get(key).map(|slot| slot.rect)
    }

    /// Returns `true` if `key` has registered bounds.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.bounds.contains_key(key)
    }

    /// Iterates over every element and its bounds, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (K, Rect)> + '_ {
        self.bounds.iter().map(|(key, slot)| (*key, slot.rect))
    }

    /// Returns the insertion slot for a stack-space point.
    ///
    /// The result is the number of elements whose midpoint along the primary
    /// axis lies strictly before the point: `0` before the first midpoint,
    /// [`len`](Self::len) past the last one, and `0` when nothing is
    /// registered. It never decreases as the point moves forward along the
    /// axis.
    #[must_use]
    pub fn index_for_point(&self, point: Point) -> usize {
        let p = self.axis.of_point(point);
        self.bounds
            .values()
            .filter(|slot| self.midpoint(slot.rect) < p)
            .count()
    }

    /// Returns the element whose extent along the primary axis contains the point.
    ///
    /// Extents are half-open: an element spanning `[0, 10)` owns `9.9` but not
    /// `10.0`.
    #[must_use]
    pub fn element_at(&self, point: Point) -> Option<K> {
        let p = self.axis.of_point(point);
        self.bounds.iter().find_map(|(key, slot)| {
            let (start, end) = self.axis.span(slot.rect);
            (start <= p && p < end).then_some(*key)
        })
    }

    /// Returns the position of `key` among registered elements, ordered by
    /// midpoint along the primary axis.
    ///
    /// This is the element's index in the sequence as currently laid out.
    /// Equal midpoints are ordered by extent start, then by first
    /// registration, so every element gets a distinct index.
    #[must_use]
    pub fn index_of(&self, key: &K) -> Option<usize> {
        let this = self.rank(self.bounds.get(key)?);
        Some(
            self.bounds
                .values()
                .filter(|slot| self.rank(slot) < this)
                .count(),
        )
    }

    fn midpoint(&self, rect: Rect) -> f64 {
        let (start, end) = self.axis.span(rect);
        (start + end) * 0.5
    }

    fn rank(&self, slot: &Slot) -> (f64, f64, u64) {
        (self.midpoint(slot.rect), self.axis.span(slot.rect).0, slot.order)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn column(heights: &[f64]) -> GeometryRegistry<usize> {
        let mut registry = GeometryRegistry::new(Axis::Vertical);
        let mut y = 0.0;
        for (i, h) in heights.iter().enumerate() {
            registry.register(i, Rect::new(0.0, y, 50.0, y + h));
            y += h;
        }
        registry
    }

    fn at(y: f64) -> Point {
        Point::new(25.0, y)
    }

    #[test]
    fn empty_registry_returns_zero() {
        let registry = GeometryRegistry::<u32>::new(Axis::Vertical);
        assert_eq!(registry.index_for_point(at(100.0)), 0);
        assert_eq!(registry.element_at(at(0.0)), None);
    }

    #[test]
    fn midpoints_are_slot_boundaries() {
        let registry = column(&[10.0, 10.0]);
        assert_eq!(registry.index_for_point(at(-5.0)), 0);
        assert_eq!(registry.index_for_point(at(4.9)), 0);
        assert_eq!(registry.index_for_point(at(5.1)), 1);
        // The shared edge is not a boundary.
        assert_eq!(registry.index_for_point(at(9.9)), 1);
        assert_eq!(registry.index_for_point(at(10.1)), 1);
        assert_eq!(registry.index_for_point(at(14.9)), 1);
        assert_eq!(registry.index_for_point(at(15.1)), 2);
        assert_eq!(registry.index_for_point(at(500.0)), 2);
    }

    #[test]
    fn element_at_uses_edges() {
        let registry = column(&[10.0, 10.0]);
        assert_eq!(registry.element_at(at(9.9)), Some(0));
        assert_eq!(registry.element_at(at(10.0)), Some(1));
        assert_eq!(registry.element_at(at(10.1)), Some(1));
        assert_eq!(registry.element_at(at(20.0)), None);
    }

    #[test]
    fn index_is_monotonic_along_axis() {
        let registry = column(&[12.0, 3.0, 40.0, 7.5, 22.0]);
        let mut last = 0;
        let mut y = -10.0;
        while y < 100.0 {
            let index = registry.index_for_point(at(y));
            assert!(index >= last, "index went backwards at {y}");
            last = index;
            y += 0.25;
        }
        assert_eq!(last, 5);
    }

    #[test]
    fn reregistering_is_idempotent() {
        let mut registry = column(&[10.0, 10.0, 10.0]);
        let before: [usize; 4] = [0.0, 12.0, 18.0, 29.0].map(|y| registry.index_for_point(at(y)));
        let revision = registry.revision();

        assert!(!registry.register(1, Rect::new(0.0, 10.0, 50.0, 20.0)));
        assert!(!registry.register(1, Rect::new(0.0, 10.0, 50.0, 20.0)));

        let after: [usize; 4] = [0.0, 12.0, 18.0, 29.0].map(|y| registry.index_for_point(at(y)));
        assert_eq!(before, after);
        assert_eq!(registry.revision(), revision);
    }

    #[test]
    fn last_write_wins_and_remove() {
        let mut registry = column(&[10.0, 10.0]);
        assert!(registry.register(0, Rect::new(0.0, 100.0, 50.0, 110.0)));
        assert_eq!(registry.index_of(&0), Some(1));
        assert_eq!(registry.index_of(&1), Some(0));

        assert!(registry.remove(&0).is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.index_of(&0), None);
        assert!(registry.remove(&0).is_none());

        registry.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn equal_midpoints_get_distinct_indices() {
        let mut registry = GeometryRegistry::new(Axis::Vertical);
        // Zero-extent rows registered in reverse, sharing a midpoint.
        registry.register('z', Rect::new(0.0, 10.0, 50.0, 10.0));
        registry.register('y', Rect::new(0.0, 10.0, 50.0, 10.0));
        // Overlapping mid-animation: same midpoint, earlier start.
        registry.register('x', Rect::new(0.0, 5.0, 50.0, 15.0));

        assert_eq!(registry.index_of(&'x'), Some(0));
        assert_eq!(registry.index_of(&'z'), Some(1));
        assert_eq!(registry.index_of(&'y'), Some(2));

        // Moving a row away and back keeps its registration order.
        registry.register('z', Rect::new(0.0, 40.0, 50.0, 40.0));
        assert_eq!(registry.index_of(&'z'), Some(2));
        registry.register('z', Rect::new(0.0, 10.0, 50.0, 10.0));
        assert_eq!(registry.index_of(&'z'), Some(1));
    }

    #[test]
    fn retain_and_iter_track_membership() {
        let mut registry = column(&[10.0, 10.0, 10.0]);
        let revision = registry.revision();

        registry.retain(|_| true);
        assert_eq!(registry.revision(), revision);

        registry.retain(|key| *key != 1);
        assert!(registry.revision() > revision);
        assert!(!registry.contains(&1));
        assert!(registry.contains(&2));
        assert_eq!(registry.index_of(&2), Some(1));

        let mut keys: Vec<usize> = registry.iter().map(|(key, _)| key).collect();
        keys.sort_unstable();
        assert_eq!(keys, [0, 2]);
    }

    #[test]
    fn horizontal_uses_x() {
        let mut registry = GeometryRegistry::new(Axis::Horizontal);
        registry.register("left", Rect::new(0.0, 0.0, 30.0, 10.0));
        registry.register("right", Rect::new(30.0, 0.0, 60.0, 10.0));
        assert_eq!(registry.index_for_point(Point::new(20.0, 999.0)), 1);
        assert_eq!(registry.element_at(Point::new(45.0, -3.0)), Some("right"));
        assert_eq!(registry.index_of(&"right"), Some(1));
    }
}
