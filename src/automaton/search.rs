use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use super::matches::Match;
use super::node::{NodeId, NodeRef};
use super::node_arena::NodeArena;
use super::symbol::Symbol;

/// Read-only matcher over an automaton whose failure links are built.
///
/// Obtained from [`Automaton::searcher`](super::trie::Automaton::searcher). A
/// `Searcher` only borrows the automaton immutably, so it can be copied and
/// shared between threads while no insertion is possible.
pub struct Searcher<'a, S: Symbol, P> {
    arena: &'a NodeArena<S, P>,
}

impl<S: Symbol, P> Clone for Searcher<'_, S, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Symbol, P> Copy for Searcher<'_, S, P> {}

impl<'a, S: Symbol, P> Searcher<'a, S, P> {
    pub(crate) fn new(arena: &'a NodeArena<S, P>) -> Self {
        Searcher { arena }
    }

    /// Streams `input` through the automaton, calling `f(payload, begin, end)`
    /// for every occurrence of every pattern, overlapping ones included.
    ///
    /// Occurrences are reported in order of `end`; at the same `end`, longer
    /// patterns come first. Returning false from `f` stops the search, in which
    /// case this returns false.
    pub fn for_each<I, F>(&self, input: I, mut f: F) -> bool
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        F: FnMut(&'a P, usize, usize) -> bool,
    {
        let mut stream = self.stream();
        input
            .into_iter()
            .all(|symbol| stream.feed(symbol.borrow(), &mut f))
    }

    /// Returns every occurrence of every pattern in `input`.
    pub fn find_all<I>(&self, input: I) -> BTreeSet<Match<&'a P>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
        P: Ord,
    {
        let mut matches = BTreeSet::new();
        self.for_each(input, |payload, begin, end| {
            matches.insert(Match::new(begin, end, payload));
            true
        });
        matches
    }

    /// Returns the occurrence that ends first, preferring the longest pattern
    /// among those ending at the same offset. Stops reading `input` there.
    pub fn find_first<I>(&self, input: I) -> Option<Match<&'a P>>
    where
        I: IntoIterator,
        I::Item: Borrow<S>,
    {
        let mut first = None;
        self.for_each(input, |payload, begin, end| {
            first = Some(Match::new(begin, end, payload));
            false
        });
        first
    }

    /// Starts a cursor that is fed one symbol at a time.
    pub fn stream(&self) -> MatchStream<'a, S, P> {
        MatchStream {
            arena: self.arena,
            state: NodeId::ROOT,
            position: 0,
        }
    }
}

impl<S: Symbol, P> fmt::Debug for Searcher<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("node_count", &self.arena.len())
            .finish()
    }
}

/// Incremental matcher that keeps its automaton state between calls, for
/// input that arrives in pieces.
///
/// Offsets passed to callbacks are absolute: they count every symbol fed since
/// the stream was created or last [`reset`](MatchStream::reset).
pub struct MatchStream<'a, S: Symbol, P> {
    arena: &'a NodeArena<S, P>,
    state: NodeId,
    position: usize,
}

impl<'a, S: Symbol, P> MatchStream<'a, S, P> {
    /// Advances over one symbol and reports every pattern ending at it.
    ///
    /// Returns false if `f` asked to stop. The symbol is consumed either way.
    pub fn feed<F>(&mut self, symbol: &S, mut f: F) -> bool
    where
        F: FnMut(&'a P, usize, usize) -> bool,
    {
        self.state = self.arena.goto(self.state, symbol);
        self.position += 1;
        self.arena
            .visit_suffix_matches(self.state, self.position, &mut f)
    }

    /// Number of symbols fed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The current automaton state.
    pub fn state(&self) -> NodeRef<'a, S, P> {
        NodeRef::new(self.arena, self.state)
    }

    /// Returns to the initial state and offset zero.
    pub fn reset(&mut self) {
        self.state = NodeId::ROOT;
        self.position = 0;
    }
}

impl<S: Symbol, P> fmt::Debug for MatchStream<'_, S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchStream")
            .field("state", &self.state)
            .field("position", &self.position)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::super::trie::Automaton;
    use super::*;

    fn sample() -> Automaton<char, &'static str> {
        let mut ac = Automaton::new();
        for word in ["he", "she", "hers", "his"] {
            ac.insert(word, word);
        }
        ac.ensure_failure_links_built();
        ac
    }

    #[test]
    fn searcher_requires_built_links() {
        let mut ac = Automaton::<char, u8>::new();
        ac.insert("ab", 1);
        assert!(ac.searcher().is_none());
        ac.ensure_failure_links_built();
        assert!(ac.searcher().is_some());
    }

    #[test]
    fn find_all_borrows_payloads() {
        let ac = sample();
        let searcher = ac.searcher().unwrap();
        let found: Vec<_> = searcher
            .find_all("ushers".chars())
            .into_iter()
            .map(|m| (m.begin, m.end, *m.payload))
            .collect();
        assert_eq!(found, vec![(1, 4, "she"), (2, 4, "he"), (2, 6, "hers")]);
    }

    #[test]
    fn find_first_prefers_earliest_end_then_longest() {
        let ac = sample();
        let searcher = ac.searcher().unwrap();
        let first = searcher.find_first("ushers".chars()).unwrap();
        assert_eq!(first, Match::new(1, 4, &"she"));
        assert_eq!(searcher.find_first("xyz".chars()), None);
    }

    #[test]
    fn for_each_reports_in_end_order() {
        let ac = sample();
        let mut seen = Vec::new();
        let finished = ac.searcher().unwrap().for_each("ushers".chars(), |p, b, e| {
            seen.push((*p, b, e));
            true
        });
        assert!(finished);
        assert_eq!(seen, vec![("she", 1, 4), ("he", 2, 4), ("hers", 2, 6)]);
    }

    #[test]
    fn for_each_stops_early() {
        let ac = sample();
        let mut count = 0;
        let finished = ac.searcher().unwrap().for_each("ushers".chars(), |_, _, _| {
            count += 1;
            count < 2
        });
        assert!(!finished);
        assert_eq!(count, 2);
    }

    #[test]
    fn stream_offsets_are_absolute() {
        let ac = sample();
        let searcher = ac.searcher().unwrap();
        let mut stream = searcher.stream();
        let mut seen = Vec::new();
        for chunk in ["us", "h", "ers"] {
            for ch in chunk.chars() {
                stream.feed(&ch, |p, b, e| {
                    seen.push((*p, b, e));
                    true
                });
            }
        }
        assert_eq!(stream.position(), 6);
        assert_eq!(seen, vec![("she", 1, 4), ("he", 2, 4), ("hers", 2, 6)]);
        assert_eq!(stream.state().depth(), 4);

        stream.reset();
        assert_eq!(stream.position(), 0);
        assert!(stream.state().is_root());
    }

    #[test]
    fn searchers_share_across_threads() {
        let ac = sample();
        let searcher = ac.searcher().unwrap();
        let inputs = ["ushers", "his hers", "shehe"];
        let counts: Vec<usize> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|input| scope.spawn(move || searcher.find_all(input.chars()).len()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });
        // "his hers": his, he, hers. "shehe": she, he, he.
        assert_eq!(counts, vec![3, 3, 3]);
    }
}
