// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag handle gate: decide which node inside an element owns the drag gesture.
//!
//! Every element root is implicitly a handle, so an element without any
//! nested handle can be dragged from anywhere. Declaring a handle on a nested
//! subview *claims* the gesture for that subview: an explicit bottom-up pass,
//! [`HandleGate::aggregate`], folds those claims toward the stack root, and
//! every ancestor holding a claim below it stops reacting. Only the innermost
//! enabled handle on a path responds.
//!
//! ## Minimal example
//!
//! ```
//! use understory_reorder::handle::HandleGate;
//!
//! let mut gate = HandleGate::new();
//! gate.insert_element(1_u32);
//! gate.insert_subview(10, 1).unwrap(); // row body
//! gate.insert_subview(11, 1).unwrap(); // grip icon
//!
//! // No nested handle yet: the whole row drags.
//! gate.aggregate();
//! assert_eq!(gate.resolve(10), Some(1));
//!
//! // Make the grip the handle: the body no longer starts drags.
//! gate.drag_handle(11, true).unwrap();
//! gate.aggregate();
//! assert_eq!(gate.resolve(10), None);
//! assert_eq!(gate.resolve(11), Some(1));
//! ```

use alloc::vec::Vec;
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Error returned when an operation names a node the gate does not know.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct UnknownNode<K>(pub K);

impl<K: fmt::Debug> fmt::Debug for UnknownNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnknownNode({:?})", self.0)
    }
}

impl<K: fmt::Debug> fmt::Display for UnknownNode<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {:?} is not registered with the handle gate", self.0)
    }
}

impl<K: fmt::Debug> core::error::Error for UnknownNode<K> {}

#[derive(Clone, Debug)]
struct HandleNode<K> {
    parent: Option<K>,
    element: K,
    children: SmallVec<[K; 4]>,
    /// `Some(enabled)` when this node is a declared handle.
    handle: Option<bool>,
    /// Set by [`HandleGate::aggregate`]: an enabled handle exists strictly below.
    claimed_below: bool,
}

impl<K> HandleNode<K> {
    fn is_active_handle(&self) -> bool {
        self.handle == Some(true)
    }
}

/// Tracks element subtrees and their declared drag handles.
///
/// Node ids share one key space: element roots and subviews are all `K`.
#[derive(Clone, Debug)]
pub struct HandleGate<K> {
    nodes: HashMap<K, HandleNode<K>>,
    enabled: bool,
    stale: bool,
}

impl<K> Default for HandleGate<K>
where
    K: Copy + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> HandleGate<K>
where
    K: Copy + Eq + Hash,
{
    /// Creates an empty, enabled gate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            enabled: true,
            stale: false,
        }
    }

    /// Returns `true` if the drag feature is enabled for the whole stack.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables dragging for the whole stack.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns `true` if handle declarations changed since the last
    /// [`aggregate`](Self::aggregate).
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Returns `true` if `node` is known to the gate.
    #[must_use]
    pub fn contains(&self, node: &K) -> bool {
        self.nodes.contains_key(node)
    }

    /// Registers an element root, which is an enabled handle by default.
    ///
    /// Registering an existing node is a no-op.
    pub fn insert_element(&mut self, element: K) {
        if self.nodes.contains_key(&element) {
            return;
        }
        self.nodes.insert(
            element,
            HandleNode {
                parent: None,
                element,
                children: SmallVec::new(),
                handle: Some(true),
                claimed_below: false,
            },
        );
        self.stale = true;
    }

    /// Registers `node` as a subview of `parent`, inside the same element.
    ///
    /// Registering an existing node is a no-op.
    pub fn insert_subview(&mut self, node: K, parent: K) -> Result<(), UnknownNode<K>> {
        let element = self.nodes.get(&parent).ok_or(UnknownNode(parent))?.element;
        if self.nodes.contains_key(&node) {
            return Ok(());
        }
        self.nodes.insert(
            node,
            HandleNode {
                parent: Some(parent),
                element,
                children: SmallVec::new(),
                handle: None,
                claimed_below: false,
            },
        );
        if let Some(parent) = self.nodes.get_mut(&parent) {
            parent.children.push(node);
        }
        self.stale = true;
        Ok(())
    }

    /// Declares `node` as a drag handle.
    ///
    /// An enabled handle starts drags for its element and suppresses every
    /// ancestor handle. A disabled handle does neither.
    pub fn drag_handle(&mut self, node: K, is_enabled: bool) -> Result<(), UnknownNode<K>> {
        let entry = self.nodes.get_mut(&node).ok_or(UnknownNode(node))?;
        if entry.handle != Some(is_enabled) {
            entry.handle = Some(is_enabled);
            self.stale = true;
        }
        Ok(())
    }

    /// Removes the handle declaration from `node`.
    ///
    /// Clearing an element root makes it non-draggable unless a nested handle exists.
    pub fn clear_handle(&mut self, node: K) -> Result<(), UnknownNode<K>> {
        let entry = self.nodes.get_mut(&node).ok_or(UnknownNode(node))?;
        if entry.handle.take().is_some() {
            self.stale = true;
        }
        Ok(())
    }

    /// Removes `node` and its whole subtree. Returns `false` if it was unknown.
    pub fn remove(&mut self, node: K) -> bool {
        let Some(removed) = self.nodes.remove(&node) else {
            return false;
        };
        if let Some(parent) = removed.parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|child| *child != node);
        }
        let mut pending: Vec<K> = removed.children.into_vec();
        while let Some(next) = pending.pop() {
            if let Some(child) = self.nodes.remove(&next) {
                pending.extend(child.children);
            }
        }
        self.stale = true;
        true
    }

    /// Folds handle claims from every node up to its element root.
    ///
    /// After this pass, a node is marked as claimed when some enabled handle
    /// exists strictly below it. Queries made before the next `aggregate` see
    /// the claims as of this call.
    pub fn aggregate(&mut self) {
        for node in self.nodes.values_mut() {
            node.claimed_below = false;
        }
        let sources: Vec<K> = self
            .nodes
            .values()
            .filter(|node| node.is_active_handle())
            .filter_map(|node| node.parent)
            .collect();
        for mut current in sources {
            loop {
                let Some(node) = self.nodes.get_mut(&current) else {
                    break;
                };
                if node.claimed_below {
                    // Everything above was marked by an earlier walk.
                    break;
                }
                node.claimed_below = true;
                match node.parent {
                    Some(parent) => current = parent,
                    None => break,
                }
            }
        }
        self.stale = false;
    }

    /// Returns `true` if an enabled handle exists strictly below `node`.
    #[must_use]
    pub fn has_claim_below(&self, node: &K) -> bool {
        self.nodes.get(node).is_some_and(|n| n.claimed_below)
    }

    /// Returns `true` if `node` itself reacts to drag gestures.
    ///
    /// That is the case when it is an enabled handle, the stack has dragging
    /// enabled, and no enabled handle exists below it.
    #[must_use]
    pub fn is_gesture_enabled(&self, node: &K) -> bool {
        self.enabled
            && self
                .nodes
                .get(node)
                .is_some_and(|n| n.is_active_handle() && !n.claimed_below)
    }

    /// Resolves a pointer-down on `hit` to the element whose drag it starts.
    ///
    /// Walks from `hit` toward its element root and returns the element of the
    /// first node whose gesture is enabled.
    #[must_use]
    pub fn resolve(&self, hit: K) -> Option<K> {
        let mut current = Some(hit);
        while let Some(key) = current {
            let node = self.nodes.get(&key)?;
            if self.is_gesture_enabled(&key) {
                return Some(node.element);
            }
            current = node.parent;
        }
        None
    }
}
