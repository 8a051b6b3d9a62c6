use smallvec::SmallVec;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use super::symbol::Symbol;
use super::trie::Automaton;

/// Trait for types that can be used as a pattern.
///
/// Implemented for common string and sequence types so that
/// [`Automaton::insert`] and friends accept them directly without manual
/// conversion.
pub trait IntoPattern<S: Symbol> {
    /// Collects this pattern into a symbol buffer.
    fn collect_pattern(self) -> SmallVec<[S; 32]>;
}

// String types → char

impl IntoPattern<char> for &str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &&str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → S

impl<S: Symbol> IntoPattern<S> for &[S] {
    fn collect_pattern(self) -> SmallVec<[S; 32]> {
        self.iter().cloned().collect()
    }
}

impl<S: Symbol> IntoPattern<S> for Vec<S> {
    fn collect_pattern(self) -> SmallVec<[S; 32]> {
        self.into_iter().collect()
    }
}

impl<S: Symbol> IntoPattern<S> for &Vec<S> {
    fn collect_pattern(self) -> SmallVec<[S; 32]> {
        self.iter().cloned().collect()
    }
}

impl<S: Symbol, const N: usize> IntoPattern<S> for [S; N] {
    fn collect_pattern(self) -> SmallVec<[S; 32]> {
        self.into_iter().collect()
    }
}

impl<S: Symbol, const N: usize> IntoPattern<S> for &[S; N] {
    fn collect_pattern(self) -> SmallVec<[S; 32]> {
        self.iter().cloned().collect()
    }
}

/// Errors that can occur when loading a pattern list.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The pattern file could not be opened.
    #[error("cannot open pattern file {}: {source}", .path.display())]
    Open {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// Reading failed partway through, or a line was not valid UTF-8.
    #[error("cannot read pattern on line {line}: {source}")]
    Read {
        /// One-based line number of the failed read.
        line: usize,
        /// The underlying I/O error.
        source: io::Error,
    },
}

/// Builds an automaton from `(pattern, payload)` pairs.
///
/// Pairs may come in any order. When a pattern appears more than once, the
/// last payload wins.
///
/// # Examples
///
/// ```
/// use libaho::automaton::builder::build_automaton;
///
/// let mut ac = build_automaton([(vec![1u8, 2], "one-two"), (vec![2u8], "two")]);
/// let found: Vec<_> = ac
///     .find_all_matches([0u8, 1, 2])
///     .into_iter()
///     .map(|m| (m.begin, m.end, m.payload))
///     .collect();
/// assert_eq!(found, [(1, 3, "one-two"), (2, 3, "two")]);
/// ```
pub fn build_automaton<S, P, W>(patterns: impl IntoIterator<Item = (W, P)>) -> Automaton<S, P>
where
    S: Symbol,
    P: PartialEq,
    W: IntoPattern<S>,
{
    patterns.into_iter().collect()
}

/// Builds an automaton from a word list, one pattern per line.
///
/// Trailing whitespace is trimmed. Empty lines and lines starting with '#' are
/// skipped. Each word is bound to its ordinal among the accepted lines, so the
/// first word maps to 0.
///
/// # Examples
///
/// ```
/// use libaho::automaton::builder::load_patterns;
///
/// let list = "# colours\nred\ngreen\n\nblue\n";
/// let ac = load_patterns(list.as_bytes()).unwrap();
/// assert_eq!(ac.lookup("red"), Some(&0));
/// assert_eq!(ac.lookup("blue"), Some(&2));
/// ```
pub fn load_patterns<R: BufRead>(mut reader: R) -> Result<Automaton<char, usize>, LoadError> {
    let mut automaton = Automaton::new();
    let mut ordinal = 0;
    let mut line = 0;

    // Reuse one buffer for every line instead of allocating per line.
    let mut buf = String::with_capacity(80);
    loop {
        line += 1;
        match reader.read_line(&mut buf) {
            Ok(0) => break,
            Err(source) => return Err(LoadError::Read { line, source }),
            _ => {}
        }
        let word = buf.trim_end();
        if !word.is_empty() && !is_comment(word) {
            automaton.insert(word, ordinal);
            ordinal += 1;
        }
        buf.clear();
    }
    debug!(
        "loaded {} patterns from {} lines ({} trie nodes)",
        ordinal,
        line - 1,
        automaton.node_count()
    );
    Ok(automaton)
}

/// Builds an automaton from a word-list file. See [`load_patterns`].
///
/// # Examples
///
/// ```no_run
/// use libaho::automaton::builder::build_automaton_from_file;
///
/// let ac = build_automaton_from_file("words.txt").unwrap();
/// ```
pub fn build_automaton_from_file(
    path: impl AsRef<Path>,
) -> Result<Automaton<char, usize>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    load_patterns(BufReader::new(file))
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}
