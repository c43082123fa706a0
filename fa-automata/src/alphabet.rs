use indexmap::IndexSet;

use crate::{Error, Result};

/// An index into an [`Alphabet`].
pub type SymbolId = usize;

/// An ordered set of input symbols.
///
/// Symbols are opaque tokens. The order is the order in which symbols were
/// first seen and is the column order of transition tables. The epsilon
/// marker is never part of an alphabet: epsilon moves are stored separately
/// by [`Nfa`](crate::Nfa).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Alphabet {
    symbols: IndexSet<String>,
}

impl Alphabet {
    /// Build an alphabet, rejecting duplicated symbols.
    pub fn new<I, S>(symbols: I) -> Result<Alphabet>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = IndexSet::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            if !set.insert(symbol.to_string()) {
                return Err(Error::DuplicateSymbol(symbol.to_string()));
            }
        }
        Ok(Alphabet { symbols: set })
    }

    /// An alphabet with no symbols.
    pub fn empty() -> Alphabet {
        Alphabet::default()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn index_of(&self, symbol: &str) -> Option<SymbolId> {
        self.symbols.get_index_of(symbol)
    }

    /// Panics if `id` is out of range.
    pub fn symbol(&self, id: SymbolId) -> &str {
        &self.symbols[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().map(String::as_str)
    }

    /// `self`'s symbols in order, followed by the symbols only `other` has.
    pub fn union(&self, other: &Alphabet) -> Alphabet {
        let mut symbols = self.symbols.clone();
        symbols.extend(other.symbols.iter().cloned());
        Alphabet { symbols }
    }

    pub fn is_superset(&self, other: &Alphabet) -> bool {
        other.symbols.iter().all(|symbol| self.symbols.contains(symbol))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_symbol_is_rejected() {
        let err = Alphabet::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, Error::DuplicateSymbol("a".to_string()));
    }

    #[test]
    fn union_keeps_left_order() {
        let left = Alphabet::new(["b", "a"]).unwrap();
        let right = Alphabet::new(["c", "a"]).unwrap();
        let union = left.union(&right);
        assert_eq!(union.iter().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert!(union.is_superset(&left));
        assert!(union.is_superset(&right));
        assert!(!left.is_superset(&union));
    }
}
