use std::mem;

use super::node::NodeId;
use super::symbol::Symbol;

/// A compact, sorted representation of the outgoing transitions of a node that
/// doesn't allocate until there are at least three children.
///
/// Entries are unique by symbol and always kept in ascending symbol order, so
/// iteration is deterministic and lookups in the `Many` case are a binary search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Children<S: Symbol> {
    /// No children.
    None,
    /// Exactly one child (symbol, node).
    One((S, NodeId)),
    /// Exactly two children (symbol1, node1, symbol2, node2), with symbol1 < symbol2.
    Two((S, NodeId, S, NodeId)),
    /// Three or more children stored in a vector sorted by symbol.
    Many(Vec<(S, NodeId)>),
}

impl<S: Symbol> Default for Children<S> {
    fn default() -> Self {
        Children::None
    }
}

impl<S: Symbol> Children<S> {
    /// Gets the child at the specified index, in symbol order.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get(&self, index: usize) -> Option<(&S, NodeId)> {
        match self {
            Children::None => None,
            Children::One((s, n)) => match index {
                0 => Some((s, *n)),
                _ => None,
            },
            Children::Two((s1, n1, s2, n2)) => match index {
                0 => Some((s1, *n1)),
                1 => Some((s2, *n2)),
                _ => None,
            },
            Children::Many(children) => children.get(index).map(|(s, n)| (s, *n)),
        }
    }

    /// Returns the node that `symbol`'s edge leads to, or `None` if no such edge exists.
    #[inline]
    pub fn find(&self, symbol: &S) -> Option<NodeId> {
        match self {
            Children::None => None,
            Children::One((s, n)) => (s == symbol).then_some(*n),
            Children::Two((s1, n1, s2, n2)) => {
                if symbol == s1 {
                    Some(*n1)
                } else if symbol == s2 {
                    Some(*n2)
                } else {
                    None
                }
            }
            Children::Many(children) => children
                .binary_search_by(|(s, _)| s.cmp(symbol))
                .ok()
                .map(|i| children[i].1),
        }
    }

    /// Inserts an edge in sorted position.
    ///
    /// The symbol must not already be present.
    pub(crate) fn insert(&mut self, symbol: S, child: NodeId) {
        debug_assert!(self.find(&symbol).is_none(), "insert: symbol already exists");
        *self = match mem::take(self) {
            Children::None => Children::One((symbol, child)),
            Children::One((s1, n1)) => {
                if symbol < s1 {
                    Children::Two((symbol, child, s1, n1))
                } else {
                    Children::Two((s1, n1, symbol, child))
                }
            }
            Children::Two((s1, n1, s2, n2)) => {
                let mut v = vec![(s1, n1), (s2, n2), (symbol, child)];
                v.sort_by(|a, b| a.0.cmp(&b.0));
                Children::Many(v)
            }
            Children::Many(mut children) => {
                let pos = children.partition_point(|(s, _)| *s < symbol);
                children.insert(pos, (symbol, child));
                Children::Many(children)
            }
        };
    }

    /// Returns the number of children.
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Children::None => 0,
            Children::One(_) => 1,
            Children::Two(_) => 2,
            Children::Many(children) => children.len(),
        }
    }

    /// True if there are no outgoing edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Children::None)
    }

    /// Returns an iterator over all edges in symbol order.
    #[inline]
    pub fn iter(&self) -> ChildIter<'_, S> {
        ChildIter {
            children: self,
            index: Some(0),
        }
    }
}

/// An iterator over the edges of a [`Children`] set.
#[derive(Clone)]
pub struct ChildIter<'a, S: Symbol> {
    children: &'a Children<S>,
    index: Option<usize>,
}

impl<'a, S: Symbol> Iterator for ChildIter<'a, S> {
    type Item = (&'a S, NodeId);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let index = self.index?;
        let next_child = self.children.get(index);
        self.index = if next_child.is_some() {
            index.checked_add(1)
        } else {
            None
        };
        next_child
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = match self.index {
            Some(i) => self.children.len().saturating_sub(i),
            None => 0,
        };
        (remaining, Some(remaining))
    }
}

impl<S: Symbol> ExactSizeIterator for ChildIter<'_, S> {}
