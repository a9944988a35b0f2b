// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_autoscroll --heading-base-level=0

//! Understory Autoscroll: edge autoscroll for drag interactions.
//!
//! When a drag approaches the edge of a scroll container, the container
//! should scroll on its own, and keep scrolling while the pointer is held
//! still near that edge. This crate provides a small, headless controller for
//! that behavior:
//!
//! - [`Axis`]: the primary axis (vertical or horizontal) along which to scroll.
//! - [`ContainerAttributes`]: a snapshot of the container's viewport size,
//!   content size, and content offset, supplied by the host.
//! - [`AutoscrollConfig`]: activation band and speed tuning, with validation.
//! - [`Autoscroller`]: a two-state (idle / scrolling) controller that turns
//!   pointer proximity into a signed velocity and integrates it per frame
//!   into offsets clamped to `[0, content - viewport]`.
//!
//! The crate does not own a timer or a scroll view. Hosts call
//! [`Autoscroller::tick`] from their frame clock and apply the returned
//! offset to their own container.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use understory_autoscroll::{AutoscrollConfig, Autoscroller, Axis, ContainerAttributes};
//!
//! let mut container = ContainerAttributes::new(
//!     Size::new(320.0, 480.0),
//!     Size::new(320.0, 2000.0),
//!     Vec2::new(0.0, 300.0),
//! );
//! let mut auto = Autoscroller::new(Axis::Vertical, AutoscrollConfig::default());
//!
//! // Pointer held right at the bottom edge of the visible bounds.
//! auto.update_pointer(Point::new(160.0, 478.0), &container);
//! assert!(auto.state().is_scrolling());
//!
//! // One 60 Hz frame later the host receives a new offset to apply.
//! let next = auto.tick(1.0 / 60.0, &container).unwrap();
//! assert!(next > 300.0);
//! container.offset.y = next;
//!
//! // Drag ended.
//! auto.stop();
//! assert!(!auto.state().is_scrolling());
//! ```
//!
//! Degenerate containers (zero viewport or content extent, or content that
//! fits in the viewport) never scroll.
//!
//! This crate is `no_std`.

#![no_std]

mod axis;
mod config;
mod container;
pub mod controller;

pub use axis::Axis;
pub use config::{AutoscrollConfig, ConfigError, Ramp};
pub use container::ContainerAttributes;
pub use controller::{AutoscrollState, Autoscroller, Edge};
