use std::borrow::Cow;

use crate::alphabet::Alphabet;
use crate::config::Config;
use crate::determinize::determinize;
use crate::dfa::Dfa;
use crate::matcher::Matcher;
use crate::nfa::Nfa;
use crate::state::StateId;

/// The read-only contract shared by [`Nfa`] and [`Dfa`].
///
/// Every transformation in this crate is generic over this trait, borrows
/// its inputs and returns a freshly built automaton.
pub trait FiniteAutomaton {
    fn alphabet(&self) -> &Alphabet;

    fn state_count(&self) -> usize;

    fn start(&self) -> StateId;

    fn is_accepting(&self, state: StateId) -> bool;

    fn is_start(&self, state: StateId) -> bool {
        self.start() == state
    }

    fn state_name(&self, state: StateId) -> &str;

    /// Run the automaton on a sequence of symbols. A symbol outside the
    /// alphabet rejects the word.
    fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>;

    /// Run the automaton on `input`, reading each `char` as one symbol.
    fn is_match(&self, input: &str) -> bool {
        self.accepts(input.chars().map(String::from))
    }

    /// This automaton as an NFA, borrowed when it already is one.
    fn to_nfa(&self) -> Cow<'_, Nfa>;

    /// This automaton as a DFA, borrowed when it already is one. An NFA that
    /// is not deterministic goes through epsilon elimination and subset
    /// construction.
    fn to_dfa(&self, config: &Config) -> Cow<'_, Dfa>;
}

impl FiniteAutomaton for Nfa {
    fn alphabet(&self) -> &Alphabet {
        Nfa::alphabet(self)
    }

    fn state_count(&self) -> usize {
        self.len()
    }

    fn start(&self) -> StateId {
        Nfa::start(self)
    }

    fn is_accepting(&self, state: StateId) -> bool {
        Nfa::is_accepting(self, state)
    }

    fn state_name(&self, state: StateId) -> &str {
        self.name(state)
    }

    fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Matcher::new(self).accepts(word)
    }

    fn to_nfa(&self) -> Cow<'_, Nfa> {
        Cow::Borrowed(self)
    }

    fn to_dfa(&self, config: &Config) -> Cow<'_, Dfa> {
        match Dfa::try_from(self) {
            Ok(dfa) => Cow::Owned(dfa),
            Err(_) => Cow::Owned(determinize(self, config)),
        }
    }
}

impl FiniteAutomaton for Dfa {
    fn alphabet(&self) -> &Alphabet {
        Dfa::alphabet(self)
    }

    fn state_count(&self) -> usize {
        self.len()
    }

    fn start(&self) -> StateId {
        Dfa::start(self)
    }

    fn is_accepting(&self, state: StateId) -> bool {
        Dfa::is_accepting(self, state)
    }

    fn state_name(&self, state: StateId) -> &str {
        self.name(state)
    }

    fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = Dfa::start(self);
        for symbol in word {
            let next = Dfa::alphabet(self)
                .index_of(symbol.as_ref())
                .and_then(|symbol| self.transition(state, symbol));
            match next {
                Some(next) => state = next,
                None => return false,
            }
        }
        Dfa::is_accepting(self, state)
    }

    fn to_nfa(&self) -> Cow<'_, Nfa> {
        Cow::Owned(Nfa::from(self))
    }

    fn to_dfa(&self, _config: &Config) -> Cow<'_, Dfa> {
        Cow::Borrowed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dfa_rejects_unknown_symbols_and_undefined_moves() {
        let mut dfa = Dfa::new(Alphabet::new(["a"]).unwrap(), "q0");
        let q1 = dfa.add_state("q1");
        dfa.set_transition(0, 0, Some(q1));
        dfa.set_accepting(q1, true);

        assert!(dfa.is_match("a"));
        assert!(!dfa.is_match(""));
        assert!(!dfa.is_match("aa"));
        assert!(!dfa.is_match("b"));
        assert!(dfa.accepts(["a"]));
    }

    #[test]
    fn deterministic_nfa_converts_without_subset_construction() {
        let mut nfa = Nfa::new(Alphabet::new(["a"]).unwrap(), "p");
        nfa.add_transition(0, 0, 0);
        nfa.set_accepting(0, true);

        let dfa = nfa.to_dfa(&Config::default());
        assert_eq!(dfa.len(), 1);
        assert_eq!(dfa.name(0), "p");
    }
}
