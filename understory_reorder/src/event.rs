// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use smallvec::SmallVec;

/// Output of the reorder controller.
///
/// Indices are positions in the caller's sequence. `to` is the *final*
/// position of the dragged item: remove it at `from`, then insert it at `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReorderEvent {
    /// The drop target changed. Advisory; use it to animate a placeholder.
    Preview {
        /// Index of the dragged item when the drag started.
        from: usize,
        /// Index the item would land at if dropped now.
        to: usize,
    },
    /// The drag ended with a drop. The caller must apply this move.
    Commit {
        /// Index of the dragged item when the drag started.
        from: usize,
        /// Final index of the dragged item.
        to: usize,
    },
    /// The scroll container should move to this content offset.
    ScrollTo(Vec2),
}

/// Events produced by one pointer sample or one tick.
pub type ReorderEvents = SmallVec<[ReorderEvent; 2]>;

/// Applies a committed move to a caller-owned sequence.
///
/// Removes the item at `from` and reinserts it at `to`. Returns `false` and
/// leaves `items` untouched if either index is out of range.
///
/// ```
/// use understory_reorder::apply_move;
///
/// let mut items = ['A', 'B', 'C', 'D'];
/// assert!(apply_move(&mut items, 0, 2));
/// assert_eq!(items, ['B', 'C', 'A', 'D']);
/// ```
pub fn apply_move<T>(items: &mut [T], from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    if from < to {
        items[from..=to].rotate_left(1);
    } else if to < from {
        items[to..=from].rotate_right(1);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::apply_move;

    #[test]
    fn moves_forward_and_backward() {
        let mut items = [1, 2, 3, 4, 5];
        assert!(apply_move(&mut items, 1, 3));
        assert_eq!(items, [1, 3, 4, 2, 5]);
        assert!(apply_move(&mut items, 3, 1));
        assert_eq!(items, [1, 2, 3, 4, 5]);
        assert!(apply_move(&mut items, 4, 0));
        assert_eq!(items, [5, 1, 2, 3, 4]);
    }

    #[test]
    fn same_index_and_out_of_range() {
        let mut items = [1, 2, 3];
        assert!(apply_move(&mut items, 1, 1));
        assert_eq!(items, [1, 2, 3]);
        assert!(!apply_move(&mut items, 3, 0));
        assert!(!apply_move(&mut items, 0, 3));
        assert_eq!(items, [1, 2, 3]);
    }
}
