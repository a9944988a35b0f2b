// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Size, Vec2};

use crate::Axis;

/// Snapshot of a scroll container as last reported by its host.
///
/// - `viewport` is the size of the visible bounds.
/// - `content` is the size of the scrollable content.
/// - `offset` is the content offset (how far the content is scrolled).
///
/// Hosts refresh this whenever the container lays out or scrolls. The
/// autoscroll machinery only ever writes back the offset, and only through
/// scroll requests.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ContainerAttributes {
    /// Size of the visible bounds.
    pub viewport: Size,
    /// Size of the scrollable content.
    pub content: Size,
    /// Current content offset.
    pub offset: Vec2,
}

impl ContainerAttributes {
    /// Creates a new snapshot.
    #[must_use]
    pub fn new(viewport: Size, content: Size, offset: Vec2) -> Self {
        Self {
            viewport,
            content,
            offset,
        }
    }

    /// Returns the largest valid offset along `axis`.
    ///
    /// Degenerate or non-finite extents yield `0.0`, meaning there is no room
    /// to scroll.
    #[must_use]
    pub fn max_offset(&self, axis: Axis) -> f64 {
        let viewport = axis.of_size(self.viewport);
        let content = axis.of_size(self.content);
        if !viewport.is_finite() || !content.is_finite() || viewport <= 0.0 || content <= 0.0 {
            return 0.0;
        }
        (content - viewport).max(0.0)
    }

    /// Returns `true` if the content is larger than the viewport along `axis`.
    #[must_use]
    pub fn can_scroll(&self, axis: Axis) -> bool {
        self.max_offset(axis) > 0.0
    }

    /// Clamps `offset` along `axis` into `[0, max_offset]`.
    ///
    /// Non-finite values clamp to `0.0`.
    #[must_use]
    pub fn clamp_offset(&self, axis: Axis, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset(axis))
    }
}
