// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Edge autoscroll controller: pointer proximity in, clamped offsets out.
//!
//! ## Usage
//!
//! 1) Feed every pointer position (relative to the container's visible
//!    bounds) into [`Autoscroller::update_pointer`].
//! 2) On every frame, call [`Autoscroller::tick`] with the elapsed time. A
//!    returned offset is a scroll request for the host to apply.
//! 3) Call [`Autoscroller::stop`] when the drag ends or is cancelled.
//!
//! Ticks keep producing offsets while the pointer is held still inside an
//! activation band, which is why the controller is driven by a frame clock
//! rather than by pointer events alone.

use kurbo::Point;

use crate::{AutoscrollConfig, Axis, ContainerAttributes};

/// Which end of the container the pointer is close to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top for vertical stacks, left for horizontal stacks.
    Leading,
    /// Bottom for vertical stacks, right for horizontal stacks.
    Trailing,
}

/// Current state of an [`Autoscroller`].
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub enum AutoscrollState {
    /// The pointer is outside both activation bands, or there is nothing to scroll.
    #[default]
    Idle,
    /// The pointer is inside an activation band.
    Scrolling {
        /// The edge being approached.
        edge: Edge,
        /// Signed velocity in logical units per second along the primary axis.
        ///
        /// Negative values scroll toward the leading edge.
        velocity: f64,
    },
}

impl AutoscrollState {
    /// Returns `true` while scrolling.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        matches!(self, Self::Scrolling { .. })
    }

    /// Returns the signed velocity, or `0.0` when idle.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        match self {
            Self::Idle => 0.0,
            Self::Scrolling { velocity, .. } => *velocity,
        }
    }
}

/// Converts pointer proximity to a container edge into scroll offsets.
#[derive(Clone, Debug)]
pub struct Autoscroller {
    axis: Axis,
    config: AutoscrollConfig,
    enabled: bool,
    pointer: Option<f64>,
    state: AutoscrollState,
}

impl Autoscroller {
    /// Creates an idle, enabled controller scrolling along `axis`.
    #[must_use]
    pub fn new(axis: Axis, config: AutoscrollConfig) -> Self {
        Self {
            axis,
            config,
            enabled: true,
            pointer: None,
            state: AutoscrollState::Idle,
        }
    }

    /// Returns the scroll axis.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the tuning in use.
    #[must_use]
    pub fn config(&self) -> &AutoscrollConfig {
        &self.config
    }

    /// Replaces the tuning. Takes effect on the next update or tick.
    pub fn set_config(&mut self, config: AutoscrollConfig) {
        self.config = config;
    }

    /// Returns `true` if the controller may scroll at all.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables autoscroll. Disabling stops immediately.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.stop();
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> AutoscrollState {
        self.state
    }

    /// Records a pointer position relative to the container's visible bounds
    /// and re-evaluates the state.
    pub fn update_pointer(
        &mut self,
        pointer: Point,
        container: &ContainerAttributes,
    ) -> AutoscrollState {
        let coord = self.axis.of_point(pointer);
        self.pointer = coord.is_finite().then_some(coord);
        self.refresh(container);
        self.state
    }

    /// Advances by `dt` seconds and returns the new offset along the axis, if
    /// it changed.
    ///
    /// The result is always within `[0, content - viewport]`. Nothing is
    /// returned while idle, when `dt` is not a positive finite number, or when
    /// the offset is already pinned at the limit being approached.
    pub fn tick(&mut self, dt: f64, container: &ContainerAttributes) -> Option<f64> {
        self.refresh(container);
        let AutoscrollState::Scrolling { velocity, .. } = self.state else {
            return None;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        let current = container.clamp_offset(self.axis, self.axis.of_vec(container.offset));
        let next = container.clamp_offset(self.axis, current + velocity * dt);
        (next != current).then_some(next)
    }

    /// Forces the controller back to idle and forgets the pointer.
    pub fn stop(&mut self) {
        self.pointer = None;
        self.transition(AutoscrollState::Idle);
    }

    /// Computes the scrolling state for a pointer coordinate along the axis.
    ///
    /// This is the pure core of the controller: it has no side effects and
    /// ignores the enabled flag.
    #[must_use]
    pub fn evaluate(&self, pointer: f64, container: &ContainerAttributes) -> AutoscrollState {
        if !pointer.is_finite() || !container.can_scroll(self.axis) {
            return AutoscrollState::Idle;
        }
        let viewport = self.axis.of_size(container.viewport);
        let margin = self.config.edge_margin(viewport);
        if margin <= 0.0 {
            return AutoscrollState::Idle;
        }

        let to_leading = pointer;
        let to_trailing = viewport - pointer;
        let (edge, distance) = if to_leading <= to_trailing {
            (Edge::Leading, to_leading)
        } else {
            (Edge::Trailing, to_trailing)
        };
        if distance >= margin {
            return AutoscrollState::Idle;
        }

        let t = (margin - distance) / margin;
        let speed = self.config.max_speed() * self.config.ramp().apply(t);
        let velocity = match edge {
            Edge::Leading => -speed,
            Edge::Trailing => speed,
        };
        AutoscrollState::Scrolling { edge, velocity }
    }

    fn refresh(&mut self, container: &ContainerAttributes) {
        let next = match self.pointer {
            Some(pointer) if self.enabled => self.evaluate(pointer, container),
            _ => AutoscrollState::Idle,
        };
        self.transition(next);
    }

    fn transition(&mut self, next: AutoscrollState) {
        match (self.state.is_scrolling(), next) {
            (false, AutoscrollState::Scrolling { edge, velocity }) => {
                tracing::debug!(?edge, velocity, "autoscroll started");
            }
            (true, AutoscrollState::Idle) => {
                tracing::debug!("autoscroll stopped");
            }
            _ => {}
        }
        self.state = next;
    }
}
