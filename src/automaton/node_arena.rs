//! Index-addressed storage for automaton nodes.
//!
//! Every node lives in one `Vec` and is referred to by its [`NodeId`]. Trie
//! edges and failure links are both plain ids, so the failure graph can point
//! anywhere in the tree without any ownership of its own.

use std::ops::{Index, IndexMut};

use super::node::{Node, NodeId};
use super::symbol::Symbol;

/// Owner of all nodes of one automaton. Slot 0 is always the root.
#[derive(Clone, Debug)]
pub(crate) struct NodeArena<S: Symbol, P> {
    nodes: Vec<Node<S, P>>,
}

impl<S: Symbol, P> NodeArena<S, P> {
    /// Creates an arena holding only the root.
    pub fn new() -> Self {
        Self::with_capacity(1)
    }

    /// Creates an arena holding only the root, with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new(0));
        NodeArena { nodes }
    }

    /// Allocates a node and returns its id.
    pub fn alloc(&mut self, node: Node<S, P>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Returns the number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over every node id in allocation order.
    #[cfg(test)]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId::new)
    }

    /// Returns the child of `parent` for `symbol`, creating it one level deeper
    /// if it doesn't exist. The flag is true when a node was created.
    pub fn child_or_create(&mut self, parent: NodeId, symbol: S) -> (NodeId, bool) {
        if let Some(child) = self[parent].child(&symbol) {
            return (child, false);
        }
        let depth = self[parent].depth() + 1;
        let child = self.alloc(Node::new(depth));
        self[parent].add_child(symbol, child);
        (child, true)
    }

    /// Follows existing edges only. `None` as soon as a symbol has no edge.
    pub fn walk<'s, I>(&self, symbols: I) -> Option<NodeId>
    where
        S: 's,
        I: IntoIterator<Item = &'s S>,
    {
        symbols
            .into_iter()
            .try_fold(NodeId::ROOT, |id, symbol| self[id].child(symbol))
    }

    /// Goto-with-fallback: the state reached from `state` on `symbol`,
    /// following failure links until some node has a transition. The root
    /// answers every symbol, so this always terminates.
    #[inline]
    pub fn goto(&self, mut state: NodeId, symbol: &S) -> NodeId {
        loop {
            let node = &self[state];
            if let Some(next) = node.next_or_root(symbol) {
                return next;
            }
            state = node.failure().unwrap_or(NodeId::ROOT);
        }
    }

    /// Calls `f(payload, begin, end)` for `state` and every node on its failure
    /// chain that carries a payload. Returns false if `f` asked to stop.
    pub fn visit_suffix_matches<'a, F>(&'a self, state: NodeId, end: usize, f: &mut F) -> bool
    where
        F: FnMut(&'a P, usize, usize) -> bool,
    {
        let mut current = Some(state);
        while let Some(id) = current {
            let node = &self[id];
            if node.is_root() {
                break;
            }
            if let Some(payload) = node.payload() {
                if !f(payload, end - node.depth(), end) {
                    return false;
                }
            }
            current = node.failure();
        }
        true
    }
}

impl<S: Symbol, P> Index<NodeId> for NodeArena<S, P> {
    type Output = Node<S, P>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<S, P> {
        &self.nodes[id.index()]
    }
}

impl<S: Symbol, P> IndexMut<NodeId> for NodeArena<S, P> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<S, P> {
        &mut self.nodes[id.index()]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_arena_has_root() {
        let arena = NodeArena::<char, u32>::new();
        assert_eq!(arena.len(), 1);
        assert!(arena[NodeId::ROOT].is_root());
        assert_eq!(arena[NodeId::ROOT].failure(), None);
    }

    #[test]
    fn child_or_create_reuses_existing() {
        let mut arena = NodeArena::<char, u32>::new();
        let (a, created) = arena.child_or_create(NodeId::ROOT, 'a');
        assert!(created);
        assert_eq!(arena[a].depth(), 1);
        let (b, created) = arena.child_or_create(a, 'b');
        assert!(created);
        assert_eq!(arena[b].depth(), 2);
        let (again, created) = arena.child_or_create(NodeId::ROOT, 'a');
        assert!(!created);
        assert_eq!(again, a);
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn walk_follows_existing_edges() {
        let mut arena = NodeArena::<char, u32>::new();
        let (a, _) = arena.child_or_create(NodeId::ROOT, 'a');
        let (b, _) = arena.child_or_create(a, 'b');
        assert_eq!(arena.walk(&['a', 'b']), Some(b));
        assert_eq!(arena.walk(&['a', 'c']), None);
        assert_eq!(arena.walk(&[] as &[char]), Some(NodeId::ROOT));
    }

    #[test]
    fn goto_falls_back_to_root() {
        let mut arena = NodeArena::<char, u32>::new();
        let (a, _) = arena.child_or_create(NodeId::ROOT, 'a');
        arena[a].set_failure(Some(NodeId::ROOT));
        assert_eq!(arena.goto(NodeId::ROOT, &'a'), a);
        assert_eq!(arena.goto(NodeId::ROOT, &'z'), NodeId::ROOT);
        // 'a' has no 'a' edge, so it falls back to the root, which has one.
        assert_eq!(arena.goto(a, &'a'), a);
        assert_eq!(arena.goto(a, &'z'), NodeId::ROOT);
    }

    #[test]
    fn visit_suffix_matches_walks_failure_chain() {
        let mut arena = NodeArena::<char, &str>::new();
        let (a, _) = arena.child_or_create(NodeId::ROOT, 'a');
        let (b, _) = arena.child_or_create(NodeId::ROOT, 'b');
        let (ab, _) = arena.child_or_create(a, 'b');
        arena[a].set_failure(Some(NodeId::ROOT));
        arena[b].set_failure(Some(NodeId::ROOT));
        arena[ab].set_failure(Some(b));
        arena[ab].set_payload("ab");
        arena[b].set_payload("b");

        let mut seen = Vec::new();
        assert!(arena.visit_suffix_matches(ab, 5, &mut |p, begin, end| {
            seen.push((*p, begin, end));
            true
        }));
        assert_eq!(seen, vec![("ab", 3, 5), ("b", 4, 5)]);

        let mut seen = Vec::new();
        assert!(!arena.visit_suffix_matches(ab, 5, &mut |p, begin, end| {
            seen.push((*p, begin, end));
            false
        }));
        assert_eq!(seen, vec![("ab", 3, 5)]);
    }
}
