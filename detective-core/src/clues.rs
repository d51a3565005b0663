//! The clue notebook: an ordered, duplicate-free set of discovered clues.
//!
//! Clues are kept in an unbalanced binary search tree ordered by their raw
//! bytes. The catalog of clues in a mansion is small, so no rebalancing is
//! done; inserting clues in sorted order degrades the tree to a list, which
//! [`ClueSet::depth`] makes visible.

use std::cmp::Ordering;
use tracing::debug;

use crate::bounded;

/// Maximum stored length of a clue, in bytes.
pub const MAX_CLUE_LEN: usize = 127;

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    clue: String,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(clue: String) -> Self {
        Self {
            clue,
            left: None,
            right: None,
        }
    }
}

/// Ordered set of clue strings.
///
/// The first insertion of a clue wins; later insertions of the same text are
/// ignored. Iteration always yields clues in ascending byte order.
#[derive(Debug, Default)]
pub struct ClueSet {
    root: Link,
    len: usize,
}

impl ClueSet {
    /// Create an empty notebook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a clue to the set.
    ///
    /// Blank clues and clues already present leave the set unchanged.
    /// Returns `true` when the set grew.
    pub fn insert(&mut self, clue: &str) -> bool {
        let clue = bounded(clue, MAX_CLUE_LEN);
        if clue.trim().is_empty() {
            return false;
        }

        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match clue.as_bytes().cmp(node.clue.as_bytes()) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(Node::leaf(clue.to_string())));
        self.len += 1;

        debug!(clue, total = self.len, "clue collected");
        true
    }

    /// Whether `clue` is in the set (exact, case-sensitive match).
    pub fn contains(&self, clue: &str) -> bool {
        let clue = bounded(clue, MAX_CLUE_LEN);
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match clue.as_bytes().cmp(node.clue.as_bytes()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return true,
            };
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Iterate over the clues in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// All clues in ascending order.
    ///
    /// Non-destructive: calling this twice without an insert in between
    /// returns the same sequence.
    pub fn in_order(&self) -> Vec<&str> {
        self.iter().collect()
    }

    /// Height of the tree (0 for an empty set).
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, level)) = pending.pop() {
            deepest = deepest.max(level);
            pending.extend(node.left.as_deref().map(|n| (n, level + 1)));
            pending.extend(node.right.as_deref().map(|n| (n, level + 1)));
        }
        deepest
    }

    /// Release every node, returning how many were released.
    ///
    /// The set is empty and reusable afterwards. Teardown is iterative, so a
    /// degenerate tree of any depth is safe to release.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
            released += 1;
        }
        self.len = 0;
        released
    }
}

impl Drop for ClueSet {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a> IntoIterator for &'a ClueSet {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S: AsRef<str>> Extend<S> for ClueSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, clues: I) {
        for clue in clues {
            self.insert(clue.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for ClueSet {
    fn from_iter<I: IntoIterator<Item = S>>(clues: I) -> Self {
        let mut set = ClueSet::new();
        set.extend(clues);
        set
    }
}

/// In-order iterator over a [`ClueSet`].
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn push_left_spine(&mut self, mut cursor: Option<&'a Node>) {
        while let Some(node) = cursor {
            self.stack.push(node);
            cursor = node.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(node.clue.as_str())
    }
}
