// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate bridge between the scroll container and the stack.
//!
//! Pointer samples arrive either in the container's space (relative to its
//! visible bounds) or in the stack's local space. Converting between the two
//! needs the scroll offset, and autoscroll keeps changing that offset. Every
//! [`PointerSample`] therefore carries the offset that was current when the
//! pointer was sampled, and the bridge only ever converts with that value.

use kurbo::{Point, Vec2};

/// Coordinate space a pointer position was captured in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CoordinateSpace {
    /// Local to the stack (the content of the scroll container).
    Stack,
    /// Relative to the scroll container's visible bounds.
    Container,
    /// Any space the bridge has no transform for, such as window coordinates.
    ///
    /// Positions in this space are passed through unconverted.
    Global,
}

/// A pointer position plus the scroll offset captured with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    /// Pointer position in [`space`](Self::space).
    pub position: Point,
    /// Space `position` is expressed in.
    pub space: CoordinateSpace,
    /// Scroll container content offset at the time of sampling.
    pub scroll_offset: Vec2,
}

impl PointerSample {
    /// Creates a sample.
    #[must_use]
    pub fn new(position: Point, space: CoordinateSpace, scroll_offset: Vec2) -> Self {
        Self {
            position,
            space,
            scroll_offset,
        }
    }

    /// Creates a sample in stack space.
    #[must_use]
    pub fn stack(position: Point, scroll_offset: Vec2) -> Self {
        Self::new(position, CoordinateSpace::Stack, scroll_offset)
    }

    /// Creates a sample in container space.
    #[must_use]
    pub fn container(position: Point, scroll_offset: Vec2) -> Self {
        Self::new(position, CoordinateSpace::Container, scroll_offset)
    }
}

/// A sample expressed in both spaces at once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSample {
    /// Position in stack space.
    pub stack: Point,
    /// Position in container space.
    pub container: Point,
    /// Offset both positions were derived with.
    pub scroll_offset: Vec2,
    /// `false` if the sample was passed through unconverted.
    pub converted: bool,
}

/// Converts points between container space and stack space.
///
/// `stack_origin` is where the stack's local origin sits inside the scroll
/// content, for stacks that do not start at the top of their container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CoordinateBridge {
    stack_origin: Point,
}

impl CoordinateBridge {
    /// Creates a bridge for a stack placed at `stack_origin` in content space.
    #[must_use]
    pub fn new(stack_origin: Point) -> Self {
        Self { stack_origin }
    }

    /// Returns the stack origin in content space.
    #[must_use]
    pub fn stack_origin(&self) -> Point {
        self.stack_origin
    }

    /// Moves the stack origin.
    pub fn set_stack_origin(&mut self, origin: Point) {
        self.stack_origin = origin;
    }

    /// Converts a container-space point to stack space using `offset`.
    #[must_use]
    pub fn to_stack_space(&self, point: Point, offset: Vec2) -> Point {
        point + offset - self.stack_origin.to_vec2()
    }

    /// Converts a stack-space point to container space using `offset`.
    #[must_use]
    pub fn to_container_space(&self, point: Point, offset: Vec2) -> Point {
        point - offset + self.stack_origin.to_vec2()
    }

    /// Expresses `sample` in both spaces using the offset it carries.
    #[must_use]
    pub fn resolve(&self, sample: PointerSample) -> ResolvedSample {
        let PointerSample {
            position,
            space,
            scroll_offset,
        } = sample;
        let (stack, container, converted) = match space {
            CoordinateSpace::Stack => (
                position,
                self.to_container_space(position, scroll_offset),
                true,
            ),
            CoordinateSpace::Container => (
                self.to_stack_space(position, scroll_offset),
                position,
                true,
            ),
            CoordinateSpace::Global => {
                tracing::warn!(?position, "pointer sample in unsupported space; passing through");
                (position, position, false)
            }
        };
        tracing::trace!(?stack, ?container, ?scroll_offset, "resolved pointer sample");
        ResolvedSample {
            stack,
            container,
            scroll_offset,
            converted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_invert_each_other() {
        let bridge = CoordinateBridge::new(Point::new(0.0, 40.0));
        let offset = Vec2::new(0.0, 120.0);
        let container = Point::new(10.0, 30.0);
        let stack = bridge.to_stack_space(container, offset);
        assert_eq!(stack, Point::new(10.0, 110.0));
        assert_eq!(bridge.to_container_space(stack, offset), container);
    }

    #[test]
    fn resolve_uses_the_sample_offset() {
        let bridge = CoordinateBridge::default();
        let early = bridge.resolve(PointerSample::container(
            Point::new(5.0, 50.0),
            Vec2::new(0.0, 100.0),
        ));
        let late = bridge.resolve(PointerSample::container(
            Point::new(5.0, 50.0),
            Vec2::new(0.0, 160.0),
        ));
        assert_eq!(early.stack, Point::new(5.0, 150.0));
        assert_eq!(late.stack, Point::new(5.0, 210.0));
        assert_eq!(early.container, late.container);
    }

    #[test]
    fn stack_samples_produce_container_positions() {
        let bridge = CoordinateBridge::default();
        let resolved = bridge.resolve(PointerSample::stack(
            Point::new(5.0, 150.0),
            Vec2::new(0.0, 100.0),
        ));
        assert!(resolved.converted);
        assert_eq!(resolved.container, Point::new(5.0, 50.0));
        assert_eq!(resolved.stack, Point::new(5.0, 150.0));
    }

    #[test]
    fn unknown_space_passes_through() {
        let bridge = CoordinateBridge::new(Point::new(3.0, 4.0));
        let sample = PointerSample::new(
            Point::new(7.0, 8.0),
            CoordinateSpace::Global,
            Vec2::new(0.0, 999.0),
        );
        let resolved = bridge.resolve(sample);
        assert!(!resolved.converted);
        assert_eq!(resolved.stack, Point::new(7.0, 8.0));
        assert_eq!(resolved.container, Point::new(7.0, 8.0));
    }
}
