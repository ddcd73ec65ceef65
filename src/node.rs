//! Node: one value slot in a chain, linked to its neighbours by handle.

use slotmap::DefaultKey;
use std::rc::Rc;

/// Generational handle to a node stored in a chain's arena, branded with
/// the id of the chain that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeHandle {
    chain: u64,
    key: DefaultKey,
}

impl NodeHandle {
    pub(crate) fn new(chain: u64, key: DefaultKey) -> Self {
        NodeHandle { chain, key }
    }
    pub(crate) fn chain_id(&self) -> u64 {
        self.chain
    }
    pub(crate) fn raw_handle(&self) -> DefaultKey {
        self.key
    }
}

/// A value slot with backward/forward links. The node shares the value it
/// references; dropping a node never drops the caller's copy of the `Rc`.
#[derive(Debug)]
pub struct Node<T> {
    pub(crate) prev: Option<NodeHandle>,
    pub(crate) next: Option<NodeHandle>,
    value: Option<Rc<T>>,
}

impl<T> Node<T> {
    pub fn new() -> Self {
        Self {
            prev: None,
            next: None,
            value: None,
        }
    }

    pub(crate) fn with_value(value: Rc<T>) -> Self {
        Self {
            prev: None,
            next: None,
            value: Some(value),
        }
    }

    pub fn value(&self) -> Option<&Rc<T>> {
        self.value.as_ref()
    }

    /// Store `value`, replacing any previous reference, and return it.
    pub fn set_value(&mut self, value: Rc<T>) -> &Rc<T> {
        self.value.insert(value)
    }

    pub(crate) fn take_value(&mut self) -> Option<Rc<T>> {
        self.value.take()
    }

    pub fn prev(&self) -> Option<NodeHandle> {
        self.prev
    }

    pub fn next(&self) -> Option<NodeHandle> {
        self.next
    }

    /// Whether either link is missing; inside a chain that marks a sentinel.
    pub(crate) fn is_sentinel(&self) -> bool {
        self.prev.is_none() || self.next.is_none()
    }
}

impl<T> Default for Node<T> {
    fn default() -> Self {
        Self::new()
    }
}
