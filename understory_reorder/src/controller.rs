// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder controller: one ordered pipeline for pointer samples and frame ticks.
//!
//! ## Usage
//!
//! 1) Report element geometry with [`ReorderController::on_bounds_changed`]
//!    and the scroll container with [`ReorderController::set_container`].
//! 2) Route pointer down/move/up/cancel into the matching methods. Each
//!    returns the [`ReorderEvent`]s it produced.
//! 3) Call [`ReorderController::tick`] from the frame clock while a drag is
//!    active so autoscroll keeps going when the pointer is held still.
//!
//! Within a sample, the drag state (target index) is always updated before
//! the autoscroll state, and both see the same scroll offset.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};
use understory_autoscroll::{
    AutoscrollConfig, AutoscrollState, Autoscroller, Axis, ContainerAttributes,
};

use crate::bridge::{CoordinateBridge, PointerSample};
use crate::event::{ReorderEvent, ReorderEvents};
use crate::geometry::GeometryRegistry;
use crate::handle::{HandleGate, UnknownNode};
use crate::session::{DragPhase, DragSession};

/// Configuration for a [`ReorderController`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReorderConfig {
    /// Primary axis of the stack.
    pub axis: Axis,
    /// Whether dragging is enabled for the whole stack.
    pub enabled: bool,
    /// Whether the enclosing container autoscrolls during drags.
    pub autoscroll_enabled: bool,
    /// Autoscroll tuning.
    pub autoscroll: AutoscrollConfig,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            axis: Axis::Vertical,
            enabled: true,
            autoscroll_enabled: true,
            autoscroll: AutoscrollConfig::default(),
        }
    }
}

impl ReorderConfig {
    /// Default configuration for a stack ordered along `axis`.
    #[must_use]
    pub fn for_axis(axis: Axis) -> Self {
        Self {
            axis,
            ..Self::default()
        }
    }
}

/// Drives drag-to-reorder for one stack.
///
/// The controller never touches the caller's sequence. It reports moves as
/// [`ReorderEvent::Commit`], and scroll changes as
/// [`ReorderEvent::ScrollTo`].
#[derive(Clone, Debug)]
pub struct ReorderController<K> {
    axis: Axis,
    geometry: GeometryRegistry<K>,
    gate: HandleGate<K>,
    bridge: CoordinateBridge,
    autoscroller: Autoscroller,
    container: Option<ContainerAttributes>,
    session: Option<DragSession<K>>,
}

impl<K> ReorderController<K>
where
    K: Copy + Eq + Hash + Debug,
{
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: ReorderConfig) -> Self {
        let mut gate = HandleGate::new();
        gate.set_enabled(config.enabled);
        let mut autoscroller = Autoscroller::new(config.axis, config.autoscroll);
        autoscroller.set_enabled(config.autoscroll_enabled);
        Self {
            axis: config.axis,
            geometry: GeometryRegistry::new(config.axis),
            gate,
            bridge: CoordinateBridge::default(),
            autoscroller,
            container: None,
            session: None,
        }
    }

    /// Returns the primary axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns `true` if dragging is enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.gate.is_enabled()
    }

    /// Enables or disables dragging. Disabling cancels an active drag.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.gate.set_enabled(enabled);
        if !enabled {
            self.cancel();
        }
    }

    /// Returns `true` if autoscroll is enabled.
    #[must_use]
    pub fn is_autoscroll_enabled(&self) -> bool {
        self.autoscroller.is_enabled()
    }

    /// Enables or disables autoscroll for the enclosing container.
    pub fn set_autoscroll_enabled(&mut self, enabled: bool) {
        self.autoscroller.set_enabled(enabled);
    }

    /// Replaces the autoscroll tuning.
    pub fn set_autoscroll_config(&mut self, config: AutoscrollConfig) {
        self.autoscroller.set_config(config);
    }

    /// Returns the current autoscroll state.
    #[must_use]
    pub fn autoscroll_state(&self) -> AutoscrollState {
        self.autoscroller.state()
    }

    /// Returns the geometry registry.
    #[must_use]
    pub fn geometry(&self) -> &GeometryRegistry<K> {
        &self.geometry
    }

    /// Returns the handle gate.
    #[must_use]
    pub fn gate(&self) -> &HandleGate<K> {
        &self.gate
    }

    /// Returns the coordinate bridge.
    #[must_use]
    pub fn bridge(&self) -> &CoordinateBridge {
        &self.bridge
    }

    /// Sets where the stack's origin sits inside the scroll content.
    pub fn set_stack_origin(&mut self, origin: Point) {
        self.bridge.set_stack_origin(origin);
    }

    /// Returns the latest container snapshot, including any offset requested
    /// since the host last refreshed it.
    #[must_use]
    pub fn container(&self) -> Option<&ContainerAttributes> {
        self.container.as_ref()
    }

    /// Replaces the container snapshot. Hosts call this whenever the scroll
    /// container lays out or scrolls.
    pub fn set_container(&mut self, container: ContainerAttributes) {
        self.container = Some(container);
    }

    /// Detaches the scroll container; autoscroll stops.
    pub fn clear_container(&mut self) {
        self.container = None;
        self.autoscroller.stop();
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.session.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Returns the active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession<K>> {
        self.session.as_ref()
    }

    /// Registers `element` with the handle gate before its first layout.
    ///
    /// Such an element can start a drag; its index is resolved once its
    /// bounds arrive.
    pub fn insert_element(&mut self, element: K) {
        self.gate.insert_element(element);
    }

    /// Records the stack-local bounds of `element` and registers it with the
    /// handle gate if it is new.
    pub fn on_bounds_changed(&mut self, element: K, bounds: Rect) {
        self.gate.insert_element(element);
        self.geometry.register(element, bounds);
    }

    /// Forgets `element`, its geometry, and its handle subtree.
    ///
    /// Removing the dragged element cancels the drag.
    pub fn remove_element(&mut self, element: K) {
        if self.session.as_ref().is_some_and(|s| s.element() == element) {
            self.cancel();
        }
        self.geometry.remove(&element);
        self.gate.remove(element);
    }

    /// Registers a subview of an element (or of another subview).
    pub fn insert_subview(&mut self, node: K, parent: K) -> Result<(), UnknownNode<K>> {
        self.gate.insert_subview(node, parent).inspect_err(|err| {
            tracing::warn!(%err, "cannot attach subview");
        })
    }

    /// Declares `node` as the drag handle of its element.
    ///
    /// An enabled handle on a subview makes it the only place the element
    /// can be dragged from.
    pub fn drag_handle(&mut self, node: K, is_enabled: bool) -> Result<(), UnknownNode<K>> {
        self.gate.drag_handle(node, is_enabled).inspect_err(|err| {
            tracing::warn!(%err, "cannot declare drag handle");
        })
    }

    /// Starts a drag if `hit` resolves to a draggable element.
    ///
    /// Returns `true` if a session started. A pointer-down while a drag is
    /// already active is ignored.
    pub fn pointer_down(&mut self, hit: K, sample: PointerSample) -> bool {
        if let Some(session) = &self.session {
            tracing::warn!(active = ?session.element(), ?hit, "drag already active; ignoring");
            return false;
        }
        if self.gate.is_stale() {
            self.gate.aggregate();
        }
        let Some(element) = self.gate.resolve(hit) else {
            return false;
        };

        let resolved = self.bridge.resolve(sample);
        let session = DragSession::start(element, resolved, &self.geometry);
        tracing::debug!(?element, index = ?session.origin_index(), "drag started");
        self.session = Some(session);
        if let Some(container) = &self.container {
            self.autoscroller.update_pointer(resolved.container, container);
        }
        true
    }

    /// Processes a pointer move.
    pub fn pointer_move(&mut self, sample: PointerSample) -> ReorderEvents {
        let mut events = ReorderEvents::new();
        let Some(session) = self.session.as_mut() else {
            return events;
        };
        let resolved = self.bridge.resolve(sample);
        if let Some((from, to)) = session.update(resolved, &self.geometry) {
            tracing::debug!(from, to, "drop target changed");
            events.push(ReorderEvent::Preview { from, to });
        }
        if let Some(container) = &self.container {
            self.autoscroller.update_pointer(resolved.container, container);
        }
        events
    }

    /// Processes the final sample and drops.
    ///
    /// The sample is handled like a move first; a commit follows if the
    /// dragged element's index is known.
    pub fn pointer_up(&mut self, sample: PointerSample) -> ReorderEvents {
        let mut events = self.pointer_move(sample);
        let Some(session) = self.session.take() else {
            return events;
        };
        self.autoscroller.stop();
        match (session.origin_index(), session.target_index()) {
            (Some(from), Some(to)) => {
                tracing::debug!(element = ?session.element(), from, to, "drag dropped");
                events.push(ReorderEvent::Commit { from, to });
            }
            _ => {
                tracing::debug!(element = ?session.element(), "drag dropped without geometry");
            }
        }
        events
    }

    /// Cancels the active drag without committing. Safe to call at any time.
    ///
    /// Returns `true` if a drag was active.
    pub fn cancel(&mut self) -> bool {
        self.autoscroller.stop();
        match self.session.take() {
            Some(session) => {
                tracing::debug!(element = ?session.element(), "drag cancelled");
                true
            }
            None => false,
        }
    }

    /// Advances autoscroll by `dt` seconds.
    ///
    /// When the offset moves, the stack-space pointer is re-derived from the
    /// last container-space pointer and the newly requested offset, so the
    /// target index tracks content scrolling under a stationary pointer.
    pub fn tick(&mut self, dt: f64) -> ReorderEvents {
        let mut events = ReorderEvents::new();
        let (Some(session), Some(container)) = (self.session.as_mut(), self.container.as_mut())
        else {
            return events;
        };
        let Some(next) = self.autoscroller.tick(dt, container) else {
            return events;
        };

        let offset = self.axis.with_vec(container.offset, next);
        container.offset = offset;
        tracing::debug!(?offset, "autoscroll request");
        events.push(ReorderEvent::ScrollTo(offset));

        let sample = PointerSample::container(session.last_container(), offset);
        let resolved = self.bridge.resolve(sample);
        if let Some((from, to)) = session.update(resolved, &self.geometry) {
            tracing::debug!(from, to, "drop target changed while scrolling");
            events.push(ReorderEvent::Preview { from, to });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Size, Vec2};

    use super::*;

    fn controller() -> ReorderController<u32> {
        let mut c = ReorderController::new(ReorderConfig::default());
        for i in 0..4_u32 {
            let y = f64::from(i) * 10.0;
            c.on_bounds_changed(i, Rect::new(0.0, y, 100.0, y + 10.0));
        }
        c
    }

    fn at(y: f64) -> PointerSample {
        PointerSample::stack(Point::new(50.0, y), Vec2::ZERO)
    }

    #[test]
    fn down_move_up_commits() {
        let mut c = controller();
        assert!(c.pointer_down(0, at(5.0)));
        assert_eq!(c.phase(), DragPhase::Dragging);
        let events = c.pointer_move(at(27.0));
        assert_eq!(events.as_slice(), &[ReorderEvent::Preview { from: 0, to: 2 }]);
        let events = c.pointer_up(at(27.0));
        assert_eq!(events.as_slice(), &[ReorderEvent::Commit { from: 0, to: 2 }]);
        assert_eq!(c.phase(), DragPhase::Idle);
    }

    #[test]
    fn up_processes_final_sample() {
        let mut c = controller();
        c.pointer_down(1, at(15.0));
        let events = c.pointer_up(at(36.0));
        assert_eq!(
            events.as_slice(),
            &[
                ReorderEvent::Preview { from: 1, to: 3 },
                ReorderEvent::Commit { from: 1, to: 3 }
            ]
        );
    }

    #[test]
    fn second_down_is_ignored() {
        let mut c = controller();
        assert!(c.pointer_down(0, at(5.0)));
        assert!(!c.pointer_down(2, at(25.0)));
        assert_eq!(c.session().map(DragSession::element), Some(0));
    }

    #[test]
    fn disabled_stack_does_not_start() {
        let mut c = controller();
        c.set_enabled(false);
        assert!(!c.pointer_down(0, at(5.0)));
        assert_eq!(c.phase(), DragPhase::Idle);
    }

    #[test]
    fn disabling_mid_drag_cancels() {
        let mut c = controller();
        c.pointer_down(0, at(5.0));
        c.set_enabled(false);
        assert_eq!(c.phase(), DragPhase::Idle);
        assert!(c.pointer_up(at(30.0)).is_empty());
    }

    #[test]
    fn removing_dragged_element_cancels() {
        let mut c = controller();
        c.pointer_down(2, at(25.0));
        c.remove_element(2);
        assert_eq!(c.phase(), DragPhase::Idle);
        assert_eq!(c.geometry().len(), 3);
        assert!(!c.gate().contains(&2));
    }

    #[test]
    fn moves_without_session_are_ignored() {
        let mut c = controller();
        assert!(c.pointer_move(at(20.0)).is_empty());
        assert!(c.pointer_up(at(20.0)).is_empty());
        assert!(c.tick(0.1).is_empty());
        assert!(!c.cancel());
    }

    #[test]
    fn tick_scrolls_and_updates_target() {
        let mut c = ReorderController::new(ReorderConfig::default());
        // 20 rows of 50 in a 200 tall viewport.
        for i in 0..20_u32 {
            let y = f64::from(i) * 50.0;
            c.on_bounds_changed(i, Rect::new(0.0, y, 100.0, y + 50.0));
        }
        c.set_container(ContainerAttributes::new(
            Size::new(100.0, 200.0),
            Size::new(100.0, 1000.0),
            Vec2::ZERO,
        ));

        assert!(c.pointer_down(0, PointerSample::container(Point::new(50.0, 25.0), Vec2::ZERO)));
        c.pointer_move(PointerSample::container(Point::new(50.0, 199.0), Vec2::ZERO));
        assert!(c.autoscroll_state().is_scrolling());

        let mut last_offset = 0.0;
        let mut last_target = c.session().and_then(DragSession::target_index).unwrap();
        for _ in 0..30 {
            for event in c.tick(1.0 / 60.0) {
                match event {
                    ReorderEvent::ScrollTo(offset) => {
                        assert!(offset.y > last_offset);
                        assert!(offset.y <= 800.0);
                        last_offset = offset.y;
                    }
                    ReorderEvent::Preview { from, to } => {
                        assert_eq!(from, 0);
                        assert!(to > last_target);
                        last_target = to;
                    }
                    ReorderEvent::Commit { .. } => panic!("tick never commits"),
                }
            }
        }
        assert!(last_offset > 0.0);
        assert_eq!(c.container().map(|c| c.offset.y), Some(last_offset));
        let session = c.session().unwrap();
        assert_eq!(session.last_stack().y, 199.0 + last_offset);
        assert!((session.drag_offset().y - (174.0 + last_offset)).abs() < 1e-9);
    }

    #[test]
    fn cancel_stops_autoscroll_in_the_same_call() {
        let mut c = controller();
        c.set_container(ContainerAttributes::new(
            Size::new(100.0, 20.0),
            Size::new(100.0, 40.0),
            Vec2::ZERO,
        ));
        c.pointer_down(0, PointerSample::container(Point::new(50.0, 19.0), Vec2::ZERO));
        assert!(c.autoscroll_state().is_scrolling());
        assert!(c.cancel());
        assert_eq!(c.autoscroll_state(), AutoscrollState::Idle);
        assert!(c.tick(1.0).is_empty());
    }
}
