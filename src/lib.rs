//! # libaho
//!
//! A generic [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm)
//! automaton for Rust.
//!
//! The automaton stores a set of patterns, each bound to a payload, and finds
//! every occurrence of every pattern in an input sequence in a single pass,
//! overlapping occurrences included. Patterns are sequences of any ordered
//! symbol type, so the same structure works on `char`s, bytes, tokens or
//! user-defined enums, and doubles as a map keyed by sequence.
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, or any type implementing
//!   [`Symbol`](automaton::Symbol) (`Clone + Ord`)
//! - **Payload per pattern**: matches report `(begin, end, payload)` spans
//! - **Map semantics**: [`lookup`](Automaton::lookup), [`get_or_create`](Automaton::get_or_create)
//!   and [`erase`](Automaton::erase) work like a map keyed by pattern
//! - **Lazy failure links**: inserting after matching is allowed; links are rebuilt on the next match
//! - **Streaming**: [`MatchStream`](automaton::MatchStream) accepts input one symbol at a time
//!
//! ## Quick Start
//!
//! ```
//! use libaho::Automaton;
//!
//! let mut ac = Automaton::new();
//! for word in ["he", "she", "hers", "his"] {
//!     ac.insert(word, word);
//! }
//!
//! let found: Vec<_> = ac
//!     .find_all_matches("ushers".chars())
//!     .into_iter()
//!     .map(|m| (m.begin, m.end, m.payload))
//!     .collect();
//! assert_eq!(found, [(1, 4, "she"), (2, 4, "he"), (2, 6, "hers")]);
//! ```
//!
//! ## Generic Usage
//!
//! The automaton is generic over the symbol type:
//!
//! ```
//! use libaho::Automaton;
//!
//! let mut ac: Automaton<u8, &str> = Automaton::new();
//! ac.insert([5, 2, 4], "five-two-four");
//! ac.insert([2], "two");
//!
//! let found: Vec<_> = ac
//!     .find_all_matches([6u8, 5, 2, 4, 5])
//!     .into_iter()
//!     .map(|m| (m.begin, m.end, m.payload))
//!     .collect();
//! assert_eq!(found, [(1, 4, "five-two-four"), (2, 3, "two")]);
//! ```
//!
//! ## Sharing Between Readers
//!
//! Matching through [`Automaton`] takes `&mut self` because it may rebuild
//! failure links. Build them once, then share a [`Searcher`](automaton::Searcher):
//!
//! ```
//! use libaho::Automaton;
//!
//! let mut ac = Automaton::new();
//! ac.insert("needle", 1);
//! ac.ensure_failure_links_built();
//!
//! let searcher = ac.searcher().unwrap();
//! std::thread::scope(|s| {
//!     s.spawn(|| assert_eq!(searcher.find_all("a needle".chars()).len(), 1));
//!     s.spawn(|| assert_eq!(searcher.find_all("haystack".chars()).len(), 0));
//! });
//! ```

#![warn(missing_docs)]

/// Core automaton: nodes, failure links, matching and pattern loading.
pub mod automaton;

pub use automaton::{Automaton, Match};

#[cfg(test)]
mod test {
    use super::automaton::{build_automaton, Automaton};

    fn spans<P: Clone + Ord>(ac: &mut Automaton<char, P>, input: &str) -> Vec<(usize, usize, P)> {
        ac.find_all_matches(input.chars())
            .into_iter()
            .map(|m| (m.begin, m.end, m.payload))
            .collect()
    }

    #[test]
    fn every_suffix_is_reported() {
        let mut ac = build_automaton(["TEST", "EST", "ST", "T"].map(|w| (w, w)));
        assert_eq!(
            spans(&mut ac, "TEST"),
            vec![
                (0, 1, "T"),
                (0, 4, "TEST"),
                (1, 4, "EST"),
                (2, 4, "ST"),
                (3, 4, "T"),
            ]
        );
    }

    #[test]
    fn walk_nodes_by_hand() {
        let mut ac = build_automaton([("TEST", 1), ("TESTER", 2), ("WTEST", 3)]);
        ac.ensure_failure_links_built();
        let root = ac.root();

        let n = root.get(&'T').unwrap();
        assert_eq!(n.payload(), None);
        let n = n.get(&'E').unwrap().get(&'S').unwrap().get(&'T').unwrap();
        assert_eq!(n.payload(), Some(&1));
        assert_eq!(n.depth(), 4);

        let n = n.get(&'E').unwrap().get(&'R').unwrap();
        assert_eq!(n.payload(), Some(&2));
        assert!(n.get(&'T').is_none());

        // "WTEST" falls back to "TEST".
        let wtest = "WTEST".chars().try_fold(root, |n, ch| n.get(&ch)).unwrap();
        assert_eq!(wtest.failure().and_then(|f| f.payload()), Some(&1));
    }

    #[test]
    fn unicode_chars_are_symbols() {
        let mut ac = build_automaton([("授人以渔", 1), ("以渔", 2), ("鱼", 3)]);
        assert_eq!(
            spans(&mut ac, "授人以鱼不如授人以渔"),
            vec![(3, 4, 3), (6, 10, 1), (8, 10, 2)]
        );
    }
}
