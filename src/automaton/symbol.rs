/// Trait for types that can serve as transition labels in the automaton.
///
/// This trait is automatically implemented for any type satisfying the
/// required bounds (`char`, `u8`, `u32`, user structs and enums deriving `Ord`, etc.).
///
/// - `Clone`: edges store labels by value
/// - `Ord`: children are kept sorted for binary-search lookup
pub trait Symbol: Clone + Ord {}

impl<T: Clone + Ord> Symbol for T {}
