/// Pattern conversion, bulk construction and word-list loading.
pub mod builder;
/// Sorted child-transition storage.
pub mod children;
/// Graphviz export of the trie and its failure links.
#[cfg(feature = "dot")]
pub mod dot;
/// Match spans.
pub mod matches;
/// Trie nodes, their handles and read-only views.
pub mod node;
/// Index-addressed node storage.
pub(crate) mod node_arena;
/// Read-only and incremental matching over a built automaton.
pub mod search;
/// Trait for types that can serve as automaton symbols.
pub mod symbol;
/// The automaton itself: insertion, map operations and failure-link building.
pub mod trie;

pub use builder::{build_automaton, build_automaton_from_file, load_patterns, IntoPattern, LoadError};
pub use children::Children;
pub use matches::Match;
pub use node::{NodeId, NodeRef};
pub use search::{MatchStream, Searcher};
pub use symbol::Symbol;
pub use trie::Automaton;
