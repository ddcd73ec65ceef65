//! Chain: one bucket's doubly-linked list, stored in a slotmap arena.
//!
//! Two sentinel nodes (head and tail) are allocated at construction and live
//! as long as the chain, so the empty check is `head.next == tail` and
//! insertion before the tail never branches on emptiness. Values are
//! compared by identity (`Rc::ptr_eq`): two `Rc`s holding equal contents are
//! distinct values, and the same `Rc` may appear at most once.

use crate::error::{Error, Result};
use crate::node::{Node, NodeHandle};
use log::trace;
use slotmap::{DefaultKey, SlotMap};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CHAIN_ID: AtomicU64 = AtomicU64::new(0);

pub struct Chain<T, P = ()> {
    id: u64, // brands every NodeHandle this chain issues
    index: usize,
    len: usize,
    head: NodeHandle,
    tail: NodeHandle,
    nodes: SlotMap<DefaultKey, Node<T>>, // sentinels plus data nodes
    payload: Option<Rc<P>>,
}

impl<T, P> Chain<T, P> {
    /// Create an empty chain for bucket `index`.
    pub fn new(index: usize) -> Self {
        let id = NEXT_CHAIN_ID.fetch_add(1, Ordering::Relaxed);
        let mut nodes = SlotMap::with_key();
        let head = NodeHandle::new(id, nodes.insert(Node::new()));
        let tail = NodeHandle::new(id, nodes.insert(Node::new()));
        nodes[head.raw_handle()].next = Some(tail);
        nodes[tail.raw_handle()].prev = Some(head);
        Self {
            id,
            index,
            len: 0,
            head,
            tail,
            nodes,
            payload: None,
        }
    }

    fn slot(&self, h: NodeHandle) -> &Node<T> {
        &self.nodes[h.raw_handle()]
    }

    fn slot_mut(&mut self, h: NodeHandle) -> &mut Node<T> {
        &mut self.nodes[h.raw_handle()]
    }

    fn next_of(&self, h: NodeHandle) -> NodeHandle {
        self.slot(h)
            .next
            .expect("only the tail sentinel lacks a next link")
    }

    fn prev_of(&self, h: NodeHandle) -> NodeHandle {
        self.slot(h)
            .prev
            .expect("only the head sentinel lacks a prev link")
    }

    fn owns(&self, h: NodeHandle) -> bool {
        h.chain_id() == self.id
    }

    fn is_data_node(&self, h: NodeHandle) -> bool {
        self.nodes
            .get(h.raw_handle())
            .is_some_and(|n| !n.is_sentinel())
    }

    #[cfg(test)]
    pub(crate) fn nodes_in_arena(&self) -> usize {
        self.nodes.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.next_of(self.head) == self.tail
    }

    pub fn payload(&self) -> Option<&Rc<P>> {
        self.payload.as_ref()
    }

    /// Attach an auxiliary payload; it is independent of the node list.
    pub fn set_payload(&mut self, payload: Rc<P>) -> &Rc<P> {
        self.payload.insert(payload)
    }

    pub fn take_payload(&mut self) -> Option<Rc<P>> {
        self.payload.take()
    }

    /// Handle of the first node holding exactly this `Rc`.
    fn position(&self, value: &Rc<T>) -> Option<NodeHandle> {
        let mut cur = self.next_of(self.head);
        while cur != self.tail {
            let node = self.slot(cur);
            if node.value().is_some_and(|v| Rc::ptr_eq(v, value)) {
                return Some(cur);
            }
            cur = self.next_of(cur);
        }
        None
    }

    /// Append `value` before the tail sentinel. Rejects a reference that is
    /// already present, leaving the chain untouched.
    pub fn append(&mut self, value: Rc<T>) -> Result<NodeHandle> {
        if self.position(&value).is_some() {
            trace!("bucket {}: duplicate value rejected", self.index);
            return Err(Error::DuplicateValue { bucket: self.index });
        }
        let tail = self.tail;
        let last = self.prev_of(tail);

        let mut node = Node::with_value(value);
        node.prev = Some(last);
        node.next = Some(tail);
        let h = NodeHandle::new(self.id, self.nodes.insert(node));
        self.slot_mut(last).next = Some(h);
        self.slot_mut(tail).prev = Some(h);
        self.len += 1;

        debug_assert_eq!(self.nodes.len(), self.len + 2);
        trace!("bucket {}: appended value, len {}", self.index, self.len);
        Ok(h)
    }

    pub fn first(&self) -> Option<&Rc<T>> {
        self.slot(self.next_of(self.head)).value()
    }

    pub fn last(&self) -> Option<&Rc<T>> {
        self.slot(self.prev_of(self.tail)).value()
    }

    pub fn contains(&self, value: &Rc<T>) -> bool {
        self.position(value).is_some()
    }

    /// Borrow a node by handle; `None` once the node has been removed or
    /// when the handle was issued by another chain.
    pub fn node(&self, h: NodeHandle) -> Option<&Node<T>> {
        if !self.owns(h) {
            return None;
        }
        self.nodes.get(h.raw_handle())
    }

    /// Unlink and release a data node. A handle issued by another chain is
    /// rejected with [`Error::WrongChain`]; sentinel and stale handles with
    /// [`Error::StaleNode`].
    pub fn remove_node(&mut self, h: NodeHandle) -> Result<Rc<T>> {
        if !self.owns(h) {
            return Err(Error::WrongChain);
        }
        if !self.is_data_node(h) {
            return Err(Error::StaleNode);
        }
        let prev = self.prev_of(h);
        let next = self.next_of(h);
        self.slot_mut(prev).next = Some(next);
        self.slot_mut(next).prev = Some(prev);

        let mut node = self
            .nodes
            .remove(h.raw_handle())
            .expect("data node checked live above");
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len + 2);
        Ok(node
            .take_value()
            .expect("data nodes always carry a value"))
    }

    /// Remove the first node holding exactly this `Rc` and return it.
    pub fn remove(&mut self, value: &Rc<T>) -> Result<Rc<T>> {
        let h = self
            .position(value)
            .ok_or(Error::ValueNotFound { bucket: self.index })?;
        let removed = self.remove_node(h)?;
        trace!("bucket {}: removed value, len {}", self.index, self.len);
        Ok(removed)
    }

    pub fn remove_first(&mut self) -> Option<Rc<T>> {
        let h = self.next_of(self.head);
        self.remove_node(h).ok()
    }

    pub fn remove_last(&mut self) -> Option<Rc<T>> {
        let h = self.prev_of(self.tail);
        self.remove_node(h).ok()
    }

    /// Release every data node, walking head to tail and relinking the head
    /// sentinel past each one. The payload is kept.
    pub fn clear(&mut self) {
        let head = self.head;
        let mut cur = self.next_of(head);
        while cur != self.tail {
            let next = self.next_of(cur);
            self.slot_mut(head).next = Some(next);
            self.slot_mut(next).prev = Some(head);
            self.nodes.remove(cur.raw_handle());
            cur = next;
        }
        self.len = 0;
        debug_assert_eq!(self.nodes.len(), 2);
    }

    /// Values in insertion order; `.rev()` walks the `prev` links.
    pub fn iter(&self) -> Iter<'_, T, P> {
        Iter {
            chain: self,
            front: self.next_of(self.head),
            back: self.prev_of(self.tail),
            remaining: self.len,
        }
    }
}

impl<'a, T, P> IntoIterator for &'a Chain<T, P> {
    type Item = &'a Rc<T>;
    type IntoIter = Iter<'a, T, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`Chain`].
pub struct Iter<'a, T, P> {
    chain: &'a Chain<T, P>,
    front: NodeHandle,
    back: NodeHandle,
    remaining: usize,
}

impl<'a, T, P> Iterator for Iter<'a, T, P> {
    type Item = &'a Rc<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        let h = self.front;
        self.front = chain.next_of(h);
        self.remaining -= 1;
        chain.slot(h).value()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, P> DoubleEndedIterator for Iter<'a, T, P> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let chain = self.chain;
        let h = self.back;
        self.back = chain.prev_of(h);
        self.remaining -= 1;
        chain.slot(h).value()
    }
}

impl<'a, T, P> ExactSizeIterator for Iter<'a, T, P> {}
