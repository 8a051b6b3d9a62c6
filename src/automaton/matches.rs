use std::ops::Range;

/// One occurrence of a pattern in an input sequence.
///
/// `begin..end` is the half-open span of the occurrence, counted in symbols.
/// Matches order by `begin`, then `end`, then `payload`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match<P> {
    /// Offset of the first symbol of the occurrence.
    pub begin: usize,
    /// Offset one past the last symbol of the occurrence.
    pub end: usize,
    /// Payload bound to the matched pattern.
    pub payload: P,
}

impl<P> Match<P> {
    /// Creates a match over `begin..end`.
    pub fn new(begin: usize, end: usize, payload: P) -> Self {
        Match {
            begin,
            end,
            payload,
        }
    }

    /// The span of the occurrence as a range.
    #[inline]
    pub fn span(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Length of the matched pattern.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Always false for matches produced by an automaton, since empty
    /// patterns are never stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Maps the payload, keeping the span.
    pub fn map<Q>(self, f: impl FnOnce(P) -> Q) -> Match<Q> {
        Match::new(self.begin, self.end, f(self.payload))
    }
}

impl<P: Clone> Match<&P> {
    /// Clones the borrowed payload into an owned match.
    pub fn cloned(self) -> Match<P> {
        self.map(P::clone)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn ordering_is_begin_end_payload() {
        let mut v = vec![
            Match::new(2, 4, "he"),
            Match::new(1, 4, "she"),
            Match::new(2, 6, "hers"),
            Match::new(2, 4, "ha"),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Match::new(1, 4, "she"),
                Match::new(2, 4, "ha"),
                Match::new(2, 4, "he"),
                Match::new(2, 6, "hers"),
            ]
        );
    }

    #[test]
    fn span_and_len() {
        let m = Match::new(3, 7, ());
        assert_eq!(m.span(), 3..7);
        assert_eq!(m.len(), 4);
        assert!(!m.is_empty());
    }

    #[test]
    fn cloned_owns_payload() {
        let s = String::from("abc");
        let m = Match::new(0, 3, &s).cloned();
        assert_eq!(m, Match::new(0, 3, String::from("abc")));
    }
}
