use std::borrow::Borrow;
use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use log::{debug, trace};

use super::builder::IntoPattern;
use super::matches::Match;
use super::node::{NodeId, NodeRef};
use super::node_arena::NodeArena;
use super::search::Searcher;
use super::symbol::Symbol;

/// An Aho-Corasick automaton mapping symbol sequences to payloads.
///
/// Patterns are added with [`insert`](Automaton::insert) and can be looked up,
/// mutated and erased like the keys of a map. Matching finds every occurrence
/// of every pattern in a single pass over the input, overlapping ones included.
///
/// Failure links are derived from the shape of the trie and rebuilt lazily:
/// creating a node marks them stale, and the next matching call rebuilds them
/// all. Changing or erasing payloads never invalidates them.
///
/// # Examples
///
/// ```
/// use libaho::Automaton;
///
/// let mut ac = Automaton::new();
/// for word in ["he", "she", "hers", "his"] {
///     ac.insert(word, word.to_string());
/// }
///
/// let spans: Vec<_> = ac
///     .find_all_matches("ushers".chars())
///     .into_iter()
///     .map(|m| (m.begin, m.end, m.payload))
///     .collect();
/// assert_eq!(
///     spans,
///     [(1, 4, "she".to_string()), (2, 4, "he".to_string()), (2, 6, "hers".to_string())]
/// );
/// ```
#[derive(Clone)]
pub struct Automaton<S: Symbol, P> {
    arena: NodeArena<S, P>,
    /// Set when a node was created since the last failure-link build.
    dirty: bool,
    pattern_count: usize,
}

impl<S: Symbol, P> Default for Automaton<S, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Symbol, P> Automaton<S, P> {
    /// Creates an empty automaton.
    pub fn new() -> Self {
        Automaton {
            arena: NodeArena::new(),
            dirty: false,
            pattern_count: 0,
        }
    }

    /// Creates an empty automaton with room for `nodes` trie nodes.
    pub fn with_capacity(nodes: usize) -> Self {
        Automaton {
            arena: NodeArena::with_capacity(nodes),
            dirty: false,
            pattern_count: 0,
        }
    }

    /// Returns the number of patterns currently bound to a payload.
    pub fn len(&self) -> usize {
        self.pattern_count
    }

    /// True if no pattern is bound to a payload.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }

    /// Returns the number of trie nodes, root included. Erasing never shrinks it.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Returns a read-only view of the root node.
    pub fn root(&self) -> NodeRef<'_, S, P> {
        NodeRef::new(&self.arena, NodeId::ROOT)
    }

    /// Binds `payload` to `pattern`.
    ///
    /// Returns false if nothing changed: the pattern is empty, or it is already
    /// bound to an equal payload. A differing payload replaces the old one.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::Automaton;
    ///
    /// let mut ac = Automaton::new();
    /// assert!(ac.insert("abc", 1));
    /// assert!(!ac.insert("abc", 1)); // already present
    /// assert!(ac.insert("abc", 2)); // payload replaced
    /// assert!(!ac.insert("", 3)); // empty patterns are ignored
    /// ```
    pub fn insert(&mut self, pattern: impl IntoPattern<S>, payload: P) -> bool
    where
        P: PartialEq,
    {
        let pattern = pattern.collect_pattern();
        if pattern.is_empty() {
            return false;
        }
        let terminal = self.create_path(pattern);
        let node = &mut self.arena[terminal];
        let was_bound = node.payload().is_some();
        let changed = node.set_payload(payload);
        if !was_bound {
            self.pattern_count += 1;
        }
        changed
    }

    /// Returns the payload bound to `pattern`, if any.
    pub fn lookup(&self, pattern: impl IntoPattern<S>) -> Option<&P> {
        let pattern = pattern.collect_pattern();
        let node = self.arena.walk(pattern.iter())?;
        self.arena[node].payload()
    }

    /// Returns a mutable reference to the payload bound to `pattern`, if any.
    pub fn lookup_mut(&mut self, pattern: impl IntoPattern<S>) -> Option<&mut P> {
        let pattern = pattern.collect_pattern();
        let node = self.arena.walk(pattern.iter())?;
        self.arena[node].payload_mut()
    }

    /// True if `pattern` is bound to a payload.
    pub fn contains(&self, pattern: impl IntoPattern<S>) -> bool {
        self.lookup(pattern).is_some()
    }

    /// Returns the payload slot of `pattern`, binding `P::default()` first if
    /// the pattern has no payload yet.
    ///
    /// Returns `None` for the empty pattern, which can never carry a payload.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::Automaton;
    ///
    /// let mut counts: Automaton<char, u32> = Automaton::new();
    /// for word in ["to", "be", "or", "not", "to", "be"] {
    ///     if let Some(count) = counts.get_or_create(word) {
    ///         *count += 1;
    ///     }
    /// }
    /// assert_eq!(counts.lookup("to"), Some(&2));
    /// assert_eq!(counts.lookup("not"), Some(&1));
    /// ```
    pub fn get_or_create(&mut self, pattern: impl IntoPattern<S>) -> Option<&mut P>
    where
        P: Default,
    {
        let pattern = pattern.collect_pattern();
        if pattern.is_empty() {
            return None;
        }
        let terminal = self.create_path(pattern);
        let (payload, created) = self.arena[terminal].payload_or_default();
        if created {
            self.pattern_count += 1;
        }
        Some(payload)
    }

    /// Removes and returns the payload bound to `pattern`.
    ///
    /// Nodes are never removed, since other nodes may use them as failure
    /// targets, so the failure links stay valid.
    pub fn erase(&mut self, pattern: impl IntoPattern<S>) -> Option<P> {
        let pattern = pattern.collect_pattern();
        let node = self.arena.walk(pattern.iter())?;
        let removed = self.arena[node].clear_payload();
        if removed.is_some() {
            self.pattern_count -= 1;
            trace!(
                "erased payload at node {} (depth {})",
                node.index(),
                pattern.len()
            );
        }
        removed
    }

    /// True unless a node was created since failure links were last built.
    pub fn failure_links_built(&self) -> bool {
        !self.dirty
    }

    /// Rebuilds every failure link if the trie changed shape since the last
    /// build. Matching calls this automatically; call it explicitly before
    /// sharing the automaton between readers.
    pub fn ensure_failure_links_built(&mut self) {
        if self.dirty {
            self.build_failure_links();
            self.dirty = false;
        }
    }

    /// Returns a read-only matcher, or `None` if failure links are stale.
    ///
    /// # Examples
    ///
    /// ```
    /// use libaho::Automaton;
    ///
    /// let mut ac = Automaton::new();
    /// ac.insert("ab", 'x');
    /// assert!(ac.searcher().is_none());
    ///
    /// ac.ensure_failure_links_built();
    /// let searcher = ac.searcher().unwrap();
    /// assert_eq!(searcher.find_all("abab".chars()).len(), 2);
    /// ```
    pub fn searcher(&self) -> Option<Searcher<'_, S, P>> {
        (!self.dirty).then(|| Searcher::new(&self.arena))
    }

    /// Calls `f(payload, begin, end)` for every occurrence of every pattern in
    /// `input`, building failure links first if needed.
    ///
    /// Returning false from `f` stops the search early; this then returns false.
    pub fn for_each_match<I, F>(&mut self, input: I, f: F) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        F: FnMut(&P, usize, usize) -> bool,
    {
        self.built_searcher().for_each(input, f)
    }

    /// Returns every occurrence of every pattern in `input`, building failure
    /// links first if needed.
    pub fn find_all_matches<I>(&mut self, input: I) -> BTreeSet<Match<P>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        P: Clone + Ord,
    {
        let mut matches = BTreeSet::new();
        self.for_each_match(input, |payload, begin, end| {
            matches.insert(Match::new(begin, end, payload.clone()));
            true
        });
        matches
    }

    /// Returns every bound pattern with its payload, in symbol order.
    pub fn patterns(&self) -> Vec<(Vec<S>, &P)> {
        let mut patterns = Vec::with_capacity(self.pattern_count);
        let mut prefix = Vec::new();
        Self::collect_patterns(self.root(), &mut prefix, &mut patterns);
        patterns
    }

    fn collect_patterns<'a>(
        node: NodeRef<'a, S, P>,
        prefix: &mut Vec<S>,
        patterns: &mut Vec<(Vec<S>, &'a P)>,
    ) {
        if let Some(payload) = node.payload() {
            patterns.push((prefix.clone(), payload));
        }
        for (symbol, child) in node.children() {
            prefix.push(symbol.clone());
            Self::collect_patterns(child, prefix, patterns);
            prefix.pop();
        }
    }

    fn built_searcher(&mut self) -> Searcher<'_, S, P> {
        self.ensure_failure_links_built();
        Searcher::new(&self.arena)
    }

    /// Walks `pattern` from the root, creating missing nodes, and returns the
    /// terminal node.
    fn create_path(&mut self, pattern: impl IntoIterator<Item = S>) -> NodeId {
        let mut current = NodeId::ROOT;
        for symbol in pattern {
            let (next, created) = self.arena.child_or_create(current, symbol);
            self.dirty |= created;
            current = next;
        }
        current
    }

    /// Breadth-first failure-link construction. Every node is reached only
    /// after all shallower nodes have their final links.
    fn build_failure_links(&mut self) {
        debug!(
            "building failure links for {} nodes, {} patterns",
            self.arena.len(),
            self.pattern_count
        );
        self.arena[NodeId::ROOT].set_failure(None);
        let mut queue = VecDeque::from([NodeId::ROOT]);
        while let Some(current) = queue.pop_front() {
            for index in 0..self.arena[current].children().len() {
                let (child, failure) = {
                    let node = &self.arena[current];
                    let Some((symbol, child)) = node.children().get(index) else {
                        break;
                    };
                    let failure = match node.failure() {
                        None => NodeId::ROOT,
                        Some(trace) => self.arena.goto(trace, symbol),
                    };
                    (child, failure)
                };
                self.arena[child].set_failure(Some(failure));
                queue.push_back(child);
            }
        }
    }
}

impl<S: Symbol, P: PartialEq, W: IntoPattern<S>> Extend<(W, P)> for Automaton<S, P> {
    fn extend<T: IntoIterator<Item = (W, P)>>(&mut self, iter: T) {
        for (pattern, payload) in iter {
            self.insert(pattern, payload);
        }
    }
}

impl<S: Symbol, P: PartialEq, W: IntoPattern<S>> FromIterator<(W, P)> for Automaton<S, P> {
    fn from_iter<T: IntoIterator<Item = (W, P)>>(iter: T) -> Self {
        let mut automaton = Automaton::new();
        automaton.extend(iter);
        automaton
    }
}

impl<S: Symbol, P> fmt::Debug for Automaton<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("patterns", &self.pattern_count)
            .field("node_count", &self.node_count())
            .field("failure_links_built", &self.failure_links_built())
            .finish()
    }
}
