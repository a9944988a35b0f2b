// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: headless drag-to-reorder for stacks.
//!
//! This crate turns raw pointer samples into reorder decisions for a vertical
//! or horizontal stack that may live inside a scroll container. It is made of
//! small pieces that can be used on their own or through the
//! [`ReorderController`]:
//!
//! - [`geometry`]: element bounds in stack-local space and midpoint-based slot lookup.
//! - [`handle`]: which node inside an element owns the drag gesture; the
//!   innermost enabled handle wins.
//! - [`bridge`]: conversion between container space and stack space using the
//!   scroll offset captured with each pointer sample.
//! - [`session`]: the state of one active drag.
//! - [`controller`]: the state machine that serializes pointer samples and
//!   frame ticks, drives edge autoscroll through `understory_autoscroll`, and
//!   emits [`ReorderEvent`]s.
//!
//! The crate never owns the items being reordered. Hosts keep their own
//! sequence and apply [`ReorderEvent::Commit`] to it (for example with
//! [`apply_move`]), apply [`ReorderEvent::ScrollTo`] to their scroll view, and
//! may use [`ReorderEvent::Preview`] to animate a placeholder.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_reorder::{
//!     apply_move, PointerSample, ReorderConfig, ReorderController, ReorderEvent,
//! };
//!
//! let mut items = vec!['A', 'B', 'C', 'D'];
//! let mut stack = ReorderController::new(ReorderConfig::default());
//!
//! // Layout reports each row's bounds in stack-local coordinates.
//! for (i, item) in items.iter().enumerate() {
//!     let y = i as f64 * 10.0;
//!     stack.on_bounds_changed(*item, Rect::new(0.0, y, 100.0, y + 10.0));
//! }
//!
//! // Press on A, drag over the lower half of C, release.
//! let at = |y| PointerSample::stack(Point::new(50.0, y), Vec2::ZERO);
//! assert!(stack.pointer_down('A', at(5.0)));
//! stack.pointer_move(at(27.0));
//! for event in stack.pointer_up(at(27.0)) {
//!     if let ReorderEvent::Commit { from, to } = event {
//!         apply_move(&mut items, from, to);
//!     }
//! }
//! assert_eq!(items, ['B', 'C', 'A', 'D']);
//! ```
//!
//! ## Diagnostics
//!
//! Drag lifecycle, target changes, and autoscroll requests are reported
//! through [`tracing`](https://docs.rs/tracing) at `debug` level; samples the
//! bridge cannot convert are reported at `warn`. No subscriber is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod bridge;
pub mod controller;
mod event;
pub mod geometry;
pub mod handle;
pub mod session;

pub use bridge::{CoordinateBridge, CoordinateSpace, PointerSample, ResolvedSample};
pub use controller::{ReorderConfig, ReorderController};
pub use event::{ReorderEvent, ReorderEvents, apply_move};
pub use geometry::GeometryRegistry;
pub use handle::{HandleGate, UnknownNode};
pub use session::{DragPhase, DragSession};
pub use understory_autoscroll::{AutoscrollConfig, AutoscrollState, Axis, ContainerAttributes};
