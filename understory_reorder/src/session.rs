// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag session: the transient state of one active drag.

use core::hash::Hash;

use kurbo::{Point, Vec2};

use crate::bridge::ResolvedSample;
use crate::geometry::GeometryRegistry;

/// Phase of the drag state machine.
///
/// Drops and cancellations are terminal and return to [`DragPhase::Idle`]
/// within the same call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum DragPhase {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag session is active.
    Dragging,
}

/// State of one active drag gesture.
///
/// Slot geometry is captured when the session starts so that the target
/// index follows the pointer only: a host reflowing rows in response to a
/// preview cannot feed back into the index computation. Membership is not
/// frozen. Each sample drops elements that left the registry and adopts the
/// live bounds of elements that joined it, including the dragged element
/// itself if it had no geometry yet.
#[derive(Clone, Debug)]
pub struct DragSession<K> {
    element: K,
    origin: ResolvedSample,
    last: ResolvedSample,
    origin_index: Option<usize>,
    target_index: Option<usize>,
    slots: GeometryRegistry<K>,
}

impl<K> DragSession<K>
where
    K: Copy + Eq + Hash,
{
    pub(crate) fn start(
        element: K,
        origin: ResolvedSample,
        geometry: &GeometryRegistry<K>,
    ) -> Self {
        let origin_index = geometry.index_of(&element);
        Self {
            element,
            origin,
            last: origin,
            origin_index,
            target_index: origin_index,
            slots: geometry.clone(),
        }
    }

    /// Returns the dragged element.
    #[must_use]
    pub fn element(&self) -> K {
        self.element
    }

    /// Returns the pointer-down position in stack space.
    #[must_use]
    pub fn origin_stack(&self) -> Point {
        self.origin.stack
    }

    /// Returns the pointer-down position in container space.
    #[must_use]
    pub fn origin_container(&self) -> Point {
        self.origin.container
    }

    /// Returns the latest pointer position in stack space.
    #[must_use]
    pub fn last_stack(&self) -> Point {
        self.last.stack
    }

    /// Returns the latest pointer position in container space.
    #[must_use]
    pub fn last_container(&self) -> Point {
        self.last.container
    }

    /// Returns the scroll offset paired with the latest pointer position.
    #[must_use]
    pub fn scroll_offset(&self) -> Vec2 {
        self.last.scroll_offset
    }

    /// Returns the dragged element's index in the sequence, once known.
    ///
    /// This is its index when the drag started, adjusted if siblings were
    /// added or removed since.
    #[must_use]
    pub fn origin_index(&self) -> Option<usize> {
        self.origin_index
    }

    /// Returns the index the element would land at if dropped now.
    #[must_use]
    pub fn target_index(&self) -> Option<usize> {
        self.target_index
    }

    /// Returns how far the dragged element should be drawn from its layout
    /// position, in stack space.
    ///
    /// Scrolling is included, so the element stays under the pointer while
    /// the container autoscrolls.
    #[must_use]
    pub fn drag_offset(&self) -> Vec2 {
        self.last.stack - self.origin.stack
    }

    /// Records a sample and recomputes the target index.
    ///
    /// Returns `(origin, target)` when the target changed.
    pub(crate) fn update(
        &mut self,
        sample: ResolvedSample,
        geometry: &GeometryRegistry<K>,
    ) -> Option<(usize, usize)> {
        self.last = sample;
        self.sync_members(geometry);
        let Some(origin) = self.slots.index_of(&self.element) else {
            self.origin_index = None;
            self.target_index = None;
            return None;
        };

        let slot = self.slots.index_for_point(sample.stack);
        // Slots count the dragged element itself; landing after it shifts left by one.
        let target = if slot > origin { slot - 1 } else { slot };
        if self.origin_index == Some(origin) && self.target_index == Some(target) {
            return None;
        }
        self.origin_index = Some(origin);
        self.target_index = Some(target);
        Some((origin, target))
    }

    fn sync_members(&mut self, geometry: &GeometryRegistry<K>) {
        self.slots.retain(|key| geometry.contains(key));
        for (key, bounds) in geometry.iter() {
            if !self.slots.contains(&key) {
                self.slots.register(key, bounds);
            }
        }
    }
}
