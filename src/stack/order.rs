//! Presentation order of stacks.
//!
//! Stacks are presented strictly on top of one another, so tearing one down
//! must also tear down everything presented after it. `StackOrder` keeps the
//! chronological chain as a singly linked list and supports truncating the
//! chain at a given value.

use super::stack::StackId;
use crate::errors::{NavError, Result};

/// A single link in the presentation chain
#[derive(Debug)]
pub struct StackOrderNode {
    value: StackId,
    next: Option<Box<StackOrderNode>>,
}

impl StackOrderNode {
    pub fn value(&self) -> StackId {
        self.value
    }

    pub fn next(&self) -> Option<&StackOrderNode> {
        self.next.as_deref()
    }
}

/// Insertion-ordered, duplicate-free sequence of stack ids
#[derive(Debug, Default)]
pub struct StackOrder {
    head: Option<Box<StackOrderNode>>,
}

impl StackOrder {
    pub fn new() -> Self {
        Self { head: None }
    }

    /// Append `id` at the end. Appending a value that is already present does nothing.
    pub fn append(&mut self, id: StackId) {
        if self.contains(id) {
            tracing::debug!("Stack {} already in presentation order", id.short());
            return;
        }
        *self.tail_slot() = Some(Box::new(StackOrderNode {
            value: id,
            next: None,
        }));
    }

    /// Append `id`, failing if it is already present
    pub fn try_append(&mut self, id: StackId) -> Result<()> {
        if self.contains(id) {
            return Err(NavError::invariant(format!(
                "Attempted to add duplicate stack {id} to the presentation order"
            )));
        }
        self.append(id);
        Ok(())
    }

    /// Remove `id` and every value inserted after it.
    ///
    /// Removing the head clears the list; removing an absent value does nothing.
    /// Returns the removed values in order.
    pub fn remove_from(&mut self, id: StackId) -> Vec<StackId> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.value != id) {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        let mut removed = Vec::new();
        let mut detached = cursor.take();
        while let Some(mut node) = detached {
            removed.push(node.value);
            detached = node.next.take();
        }
        removed
    }

    pub fn contains(&self, id: StackId) -> bool {
        self.iter().any(|value| value == id)
    }

    /// Index of `id` in the chain
    pub fn position(&self, id: StackId) -> Option<usize> {
        self.iter().position(|value| value == id)
    }

    /// All values in order
    pub fn values(&self) -> Vec<StackId> {
        self.iter().collect()
    }

    /// Node at `index`, if the chain is long enough
    pub fn node_at(&self, index: usize) -> Option<&StackOrderNode> {
        let mut current = self.head.as_deref();
        for _ in 0..index {
            current = current?.next.as_deref();
        }
        current
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    fn tail_slot(&mut self) -> &mut Option<Box<StackOrderNode>> {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        cursor
    }
}

impl Drop for StackOrder {
    fn drop(&mut self) {
        let mut current = self.head.take();
        while let Some(mut node) = current {
            current = node.next.take();
        }
    }
}

pub struct Iter<'a> {
    next: Option<&'a StackOrderNode>,
}

impl Iterator for Iter<'_> {
    type Item = StackId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(node.value)
    }
}

impl<'a> IntoIterator for &'a StackOrder {
    type Item = StackId;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
