use crate::nfa::Nfa;
use crate::state::StateId;
use std::collections::BTreeSet;

/// A matcher that simulates an NFA on a word, tracking every state the
/// automaton could be in.
#[derive(Clone, Debug)]
pub struct Matcher<'a> {
    nfa: &'a Nfa,
}

impl<'a> Matcher<'a> {
    /// Create a new matcher for the given NFA
    pub fn new(nfa: &'a Nfa) -> Self {
        Self { nfa }
    }

    /// Check if the whole word is accepted. A symbol outside the alphabet
    /// rejects immediately.
    pub fn accepts<I, S>(&self, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut current = self.nfa.epsilon_closure(&BTreeSet::from([self.nfa.start()]));

        for symbol in word {
            let Some(symbol) = self.nfa.alphabet().index_of(symbol.as_ref()) else {
                return false;
            };
            let next = self.step_states(&current, symbol);
            if next.is_empty() {
                return false;
            }
            current = self.nfa.epsilon_closure(&next);
        }

        self.nfa.any_accepting(&current)
    }

    /// Check if the entire input matches, one symbol per `char`
    pub fn is_match(&self, input: &str) -> bool {
        let mut buf = [0; 4];
        self.accepts(input.chars().map(|ch| ch.encode_utf8(&mut buf).to_string()))
    }

    /// Step from current states on a symbol, without taking epsilon moves
    fn step_states(&self, current: &BTreeSet<StateId>, symbol: usize) -> BTreeSet<StateId> {
        let mut next = BTreeSet::new();
        for &state in current {
            next.extend(self.nfa.targets(state, symbol).iter().copied());
        }
        next
    }
}
