use std::fmt;

use super::children::{ChildIter, Children};
use super::node_arena::NodeArena;
use super::symbol::Symbol;

/// Stable handle of a node inside its automaton.
///
/// Handles are plain indices: children and failure links both store them, but
/// only the arena owns nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node, present in every automaton.
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Position of this node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single trie state.
#[derive(Clone, Debug)]
pub(crate) struct Node<S: Symbol, P> {
    children: Children<S>,
    failure: Option<NodeId>,
    payload: Option<P>,
    depth: usize,
}

impl<S: Symbol, P> Node<S, P> {
    pub fn new(depth: usize) -> Self {
        Node {
            children: Children::None,
            failure: None,
            payload: None,
            depth,
        }
    }

    #[inline]
    pub fn child(&self, symbol: &S) -> Option<NodeId> {
        self.children.find(symbol)
    }

    /// The goto function: the child for `symbol`, with the root answering
    /// itself for every symbol it has no edge for.
    #[inline]
    pub fn next_or_root(&self, symbol: &S) -> Option<NodeId> {
        match self.child(symbol) {
            None if self.is_root() => Some(NodeId::ROOT),
            next => next,
        }
    }

    /// Stores `value`. Returns false if an equal payload was already present.
    pub fn set_payload(&mut self, value: P) -> bool
    where
        P: PartialEq,
    {
        if self.payload.as_ref() == Some(&value) {
            return false;
        }
        self.payload = Some(value);
        true
    }

    pub fn clear_payload(&mut self) -> Option<P> {
        self.payload.take()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.depth == 0
    }

    #[inline]
    pub fn children(&self) -> &Children<S> {
        &self.children
    }

    pub(crate) fn add_child(&mut self, symbol: S, child: NodeId) {
        self.children.insert(symbol, child);
    }

    #[inline]
    pub fn failure(&self) -> Option<NodeId> {
        self.failure
    }

    pub(crate) fn set_failure(&mut self, failure: Option<NodeId>) {
        self.failure = failure;
    }

    #[inline]
    pub fn payload(&self) -> Option<&P> {
        self.payload.as_ref()
    }

    #[inline]
    pub fn payload_mut(&mut self) -> Option<&mut P> {
        self.payload.as_mut()
    }

    /// Returns the payload slot, filling it with `P::default()` if empty.
    /// The flag is true when the slot was filled by this call.
    pub fn payload_or_default(&mut self) -> (&mut P, bool)
    where
        P: Default,
    {
        let created = self.payload.is_none();
        (self.payload.get_or_insert_with(P::default), created)
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Read-only view of a node, borrowed from its automaton.
///
/// Failure links reflect the last build; see
/// [`Automaton::ensure_failure_links_built`](super::trie::Automaton::ensure_failure_links_built).
pub struct NodeRef<'a, S: Symbol, P> {
    arena: &'a NodeArena<S, P>,
    id: NodeId,
}

impl<S: Symbol, P> Clone for NodeRef<'_, S, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Symbol, P> Copy for NodeRef<'_, S, P> {}

impl<'a, S: Symbol, P> NodeRef<'a, S, P> {
    pub(crate) fn new(arena: &'a NodeArena<S, P>, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    #[inline]
    fn node(&self) -> &'a Node<S, P> {
        &self.arena[self.id]
    }

    /// The handle of this node.
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Length of the symbol path from the root to this node.
    #[inline]
    pub fn depth(&self) -> usize {
        self.node().depth()
    }

    /// True for the root node.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.node().is_root()
    }

    /// The payload of the pattern ending exactly here, if any.
    #[inline]
    pub fn payload(&self) -> Option<&'a P> {
        self.node().payload()
    }

    /// Returns the node that `symbol`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn get(&self, symbol: &S) -> Option<NodeRef<'a, S, P>> {
        self.node()
            .child(symbol)
            .map(|id| NodeRef::new(self.arena, id))
    }

    /// Like [`get`](NodeRef::get), but the root answers itself for unknown symbols.
    #[inline]
    pub fn next_or_root(&self, symbol: &S) -> Option<NodeRef<'a, S, P>> {
        self.node()
            .next_or_root(symbol)
            .map(|id| NodeRef::new(self.arena, id))
    }

    /// The failure link: the node spelling the longest proper suffix of this
    /// node's path that is also a trie path. `None` for the root.
    #[inline]
    pub fn failure(&self) -> Option<NodeRef<'a, S, P>> {
        self.node()
            .failure()
            .map(|id| NodeRef::new(self.arena, id))
    }

    /// Returns an iterator over all children of this node, in symbol order.
    #[inline]
    pub fn children(&self) -> NodeChildren<'a, S, P> {
        NodeChildren {
            inner: self.node().children().iter(),
            arena: self.arena,
        }
    }

    /// Returns the number of children.
    #[inline]
    pub fn child_count(&self) -> usize {
        self.node().children().len()
    }

    /// Calls `f(payload, begin, end)` for this node and every node on its
    /// failure chain that carries a payload, treating `end` as the half-open
    /// end offset of the path. Stops and returns false as soon as `f` does.
    pub fn visit_suffix_matches<F>(&self, end: usize, mut f: F) -> bool
    where
        F: FnMut(&'a P, usize, usize) -> bool,
    {
        self.arena.visit_suffix_matches(self.id, end, &mut f)
    }
}

/// An iterator over the children of a [`NodeRef`].
pub struct NodeChildren<'a, S: Symbol, P> {
    inner: ChildIter<'a, S>,
    arena: &'a NodeArena<S, P>,
}

impl<'a, S: Symbol, P> Iterator for NodeChildren<'a, S, P> {
    type Item = (&'a S, NodeRef<'a, S, P>);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(s, id)| (s, NodeRef::new(self.arena, id)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<S: Symbol, P> ExactSizeIterator for NodeChildren<'_, S, P> {}

impl<S: Symbol, P> fmt::Debug for NodeRef<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("depth", &self.depth())
            .field("children", &self.child_count())
            .field("failure", &self.node().failure())
            .field("has_payload", &self.payload().is_some())
            .finish()
    }
}
