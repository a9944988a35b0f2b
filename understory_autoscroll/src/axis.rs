// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

/// Primary axis of a stack: the axis along which its elements are ordered.
///
/// A column (vertical stack) orders along Y; a row (horizontal stack) orders
/// along X. Autoscroll only ever moves the scroll offset along this axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Elements are stacked top to bottom.
    #[default]
    Vertical,
    /// Elements are stacked leading to trailing.
    Horizontal,
}

impl Axis {
    /// Returns the coordinate of `point` along this axis.
    #[must_use]
    pub fn of_point(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Returns the component of `vec` along this axis.
    #[must_use]
    pub fn of_vec(self, vec: Vec2) -> f64 {
        match self {
            Self::Vertical => vec.y,
            Self::Horizontal => vec.x,
        }
    }

    /// Returns the extent of `size` along this axis.
    #[must_use]
    pub fn of_size(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Returns the `(start, end)` span of `rect` along this axis.
    #[must_use]
    pub fn span(self, rect: Rect) -> (f64, f64) {
        match self {
            Self::Vertical => (rect.y0, rect.y1),
            Self::Horizontal => (rect.x0, rect.x1),
        }
    }

    /// Returns `vec` with its component along this axis replaced by `value`.
    ///
    /// The cross-axis component is left untouched.
    #[must_use]
    pub fn with_vec(self, vec: Vec2, value: f64) -> Vec2 {
        match self {
            Self::Vertical => Vec2::new(vec.x, value),
            Self::Horizontal => Vec2::new(value, vec.y),
        }
    }
}
