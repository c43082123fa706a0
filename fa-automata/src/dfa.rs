use std::collections::BTreeSet;

use crate::alphabet::{Alphabet, SymbolId};
use crate::nfa::Nfa;
use crate::state::{StateId, StateNames};
use crate::Error;

/// A deterministic finite automaton whose transition function may be
/// partial.
///
/// `None` marks an undefined move. Transformations that need a total
/// function (complement, minimization) first call [`Dfa::complete`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dfa {
    alphabet: Alphabet,
    names: StateNames,
    /// `transitions[state][symbol]`
    transitions: Vec<Vec<Option<StateId>>>,
    start: StateId,
    accepting: BTreeSet<StateId>,
}

impl Dfa {
    /// Create a new DFA with a single, non-accepting start state
    pub fn new(alphabet: Alphabet, start_name: &str) -> Self {
        let mut dfa = Self {
            alphabet,
            names: StateNames::default(),
            transitions: Vec::new(),
            start: 0,
            accepting: BTreeSet::new(),
        };
        dfa.start = dfa.add_state(start_name);
        dfa
    }

    /// Add a new state and return its ID. The name is suffixed if taken.
    pub fn add_state(&mut self, name: &str) -> StateId {
        let id = self.names.insert(name);
        self.transitions.push(vec![None; self.alphabet.len()]);
        id
    }

    /// Define (or clear, with `None`) the move of `from` on `symbol`.
    pub fn set_transition(&mut self, from: StateId, symbol: SymbolId, to: Option<StateId>) {
        self.transitions[from][symbol] = to;
    }

    pub fn set_start(&mut self, state: StateId) {
        self.start = state;
    }

    pub fn set_accepting(&mut self, state: StateId, accepting: bool) {
        if accepting {
            self.accepting.insert(state);
        } else {
            self.accepting.remove(&state);
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false: an automaton has at least its start state.
    pub fn is_empty(&self) -> bool {
        self.names.len() == 0
    }

    pub fn states(&self) -> std::ops::Range<StateId> {
        0..self.len()
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn is_start(&self, state: StateId) -> bool {
        self.start == state
    }

    pub fn name(&self, state: StateId) -> &str {
        self.names.name(state)
    }

    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.names.id(name)
    }

    pub fn transition(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions[state][symbol]
    }

    /// True when every state has a move on every symbol.
    pub fn is_complete(&self) -> bool {
        self.transitions.iter().all(|row| row.iter().all(Option::is_some))
    }

    /// Redirect every undefined move to a new sink state that loops to
    /// itself on every symbol.
    ///
    /// If nothing was undefined no sink is added and the result is a plain
    /// copy.
    pub fn complete(&self, sink_name: &str) -> Dfa {
        let mut complete = self.clone();
        if self.is_complete() {
            return complete;
        }

        let sink = complete.add_state(sink_name);
        for row in complete.transitions.iter_mut() {
            for target in row.iter_mut() {
                if target.is_none() {
                    *target = Some(sink);
                }
            }
        }
        debug!("completed DFA with sink state {:?}", complete.name(sink));
        complete
    }

    /// States reachable from the start state over any symbol.
    pub fn reachable(&self) -> BTreeSet<StateId> {
        let mut visited = BTreeSet::from([self.start]);
        let mut stack = vec![self.start];

        while let Some(state) = stack.pop() {
            for &target in self.transitions[state].iter().flatten() {
                if visited.insert(target) {
                    stack.push(target);
                }
            }
        }
        visited
    }

    /// States from which some accepting state can be reached, including the
    /// accepting states themselves.
    pub fn productive(&self) -> BTreeSet<StateId> {
        let mut reverse: Vec<Vec<StateId>> = vec![Vec::new(); self.len()];
        for state in self.states() {
            for &target in self.transitions[state].iter().flatten() {
                reverse[target].push(state);
            }
        }

        let mut visited = self.accepting.clone();
        let mut stack: Vec<StateId> = self.accepting.iter().copied().collect();
        while let Some(state) = stack.pop() {
            for &source in &reverse[state] {
                if visited.insert(source) {
                    stack.push(source);
                }
            }
        }
        visited
    }

    /// A copy holding only the states in `keep`, renumbered in arena order.
    /// Moves into a dropped state become undefined.
    ///
    /// `keep` must contain the start state.
    pub fn retain(&self, keep: &BTreeSet<StateId>) -> Dfa {
        debug_assert!(keep.contains(&self.start));
        let mut remap: Vec<Option<StateId>> = vec![None; self.len()];
        let mut kept = Dfa {
            alphabet: self.alphabet.clone(),
            names: StateNames::default(),
            transitions: Vec::new(),
            start: 0,
            accepting: BTreeSet::new(),
        };
        for &state in keep {
            remap[state] = Some(kept.add_state(self.name(state)));
        }
        for &state in keep {
            let Some(new) = remap[state] else { continue };
            for (symbol, target) in self.transitions[state].iter().enumerate() {
                kept.transitions[new][symbol] = target.and_then(|target| remap[target]);
            }
            if self.is_accepting(state) {
                kept.accepting.insert(new);
            }
        }
        kept.start = remap[self.start].unwrap_or(0);
        kept
    }

    /// A copy of this automaton over a larger alphabet. Symbols this
    /// automaton does not know get undefined moves everywhere.
    ///
    /// `alphabet` must contain every symbol of `self.alphabet()`.
    pub(crate) fn with_alphabet(&self, alphabet: &Alphabet) -> Dfa {
        debug_assert!(alphabet.is_superset(&self.alphabet));
        let mut widened = Dfa {
            alphabet: alphabet.clone(),
            names: self.names.clone(),
            transitions: vec![vec![None; alphabet.len()]; self.len()],
            start: self.start,
            accepting: self.accepting.clone(),
        };
        for (symbol, name) in self.alphabet.iter().enumerate() {
            let Some(column) = alphabet.index_of(name) else { continue };
            for state in self.states() {
                widened.transitions[state][column] = self.transitions[state][symbol];
            }
        }
        widened
    }
}

impl From<&Dfa> for Nfa {
    fn from(dfa: &Dfa) -> Nfa {
        let mut nfa = Nfa::new(dfa.alphabet.clone(), dfa.name(0));
        for state in dfa.states().skip(1) {
            nfa.add_state(dfa.name(state));
        }
        for state in dfa.states() {
            for (symbol, target) in dfa.transitions[state].iter().enumerate() {
                if let Some(target) = *target {
                    nfa.add_transition(state, symbol, target);
                }
            }
            nfa.set_accepting(state, dfa.is_accepting(state));
        }
        nfa.set_start(dfa.start);
        nfa
    }
}

/// Reinterprets an NFA that is already deterministic. This never runs subset
/// construction; use [`determinize`](crate::determinize()) for that.
impl TryFrom<&Nfa> for Dfa {
    type Error = Error;

    fn try_from(nfa: &Nfa) -> Result<Dfa, Error> {
        if let Some(state) = nfa.states().find(|&state| !nfa.epsilon_targets(state).is_empty()) {
            return Err(Error::NotDeterministic { state: nfa.name(state).to_string() });
        }

        let mut dfa = Dfa::new(nfa.alphabet().clone(), nfa.name(0));
        for state in nfa.states().skip(1) {
            dfa.add_state(nfa.name(state));
        }
        for state in nfa.states() {
            for symbol in 0..nfa.alphabet().len() {
                let targets = nfa.targets(state, symbol);
                if targets.len() > 1 {
                    return Err(Error::NotDeterministic { state: nfa.name(state).to_string() });
                }
                dfa.transitions[state][symbol] = targets.iter().next().copied();
            }
            dfa.set_accepting(state, nfa.is_accepting(state));
        }
        dfa.set_start(nfa.start());
        Ok(dfa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // q0 -a-> q1, q1 -b-> q0, q1 -a-> q1, q1 final, q2 unreachable
    fn sample() -> Dfa {
        let mut dfa = Dfa::new(Alphabet::new(["a", "b"]).unwrap(), "q0");
        let q1 = dfa.add_state("q1");
        let q2 = dfa.add_state("q2");
        dfa.set_transition(0, 0, Some(q1));
        dfa.set_transition(q1, 1, Some(0));
        dfa.set_transition(q1, 0, Some(q1));
        dfa.set_transition(q2, 0, Some(q2));
        dfa.set_accepting(q1, true);
        dfa
    }

    #[test]
    fn completion_adds_a_single_sink() {
        let dfa = sample();
        assert!(!dfa.is_complete());

        let complete = dfa.complete("SINK");
        assert!(complete.is_complete());
        assert_eq!(complete.len(), 4);
        let sink = complete.state_id("SINK").unwrap();
        assert_eq!(complete.transition(0, 1), Some(sink));
        assert_eq!(complete.transition(sink, 0), Some(sink));

        // already complete: no new state
        assert_eq!(complete.complete("SINK").len(), 4);
    }

    #[test]
    fn sink_name_does_not_collide() {
        let mut dfa = Dfa::new(Alphabet::new(["a"]).unwrap(), "SINK");
        dfa.set_accepting(0, true);
        let complete = dfa.complete("SINK");
        assert_eq!(complete.name(1), "SINK'");
    }

    #[test]
    fn reachable_and_productive() {
        let dfa = sample();
        assert_eq!(dfa.reachable(), BTreeSet::from([0, 1]));
        assert_eq!(dfa.productive(), BTreeSet::from([0, 1]));

        let kept = dfa.retain(&BTreeSet::from([0, 1]));
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.state_id("q2"), None);
        assert!(kept.is_accepting(1));
    }

    #[test]
    fn nfa_round_trip_when_deterministic() {
        let dfa = sample();
        let nfa = Nfa::from(&dfa);
        assert!(nfa.is_deterministic());
        assert_eq!(Dfa::try_from(&nfa).unwrap(), dfa);
    }

    #[test]
    fn nondeterministic_nfa_is_refused() {
        let mut nfa = Nfa::new(Alphabet::new(["a"]).unwrap(), "p");
        let q = nfa.add_state("q");
        nfa.add_transition(0, 0, 0);
        nfa.add_transition(0, 0, q);
        let err = Dfa::try_from(&nfa).unwrap_err();
        assert_eq!(err, Error::NotDeterministic { state: "p".to_string() });
    }
}
