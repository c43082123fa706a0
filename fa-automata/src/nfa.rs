use std::collections::BTreeSet;

use crate::alphabet::{Alphabet, SymbolId};
use crate::state::{StateId, StateNames};

/// A nondeterministic finite automaton with optional epsilon moves.
///
/// States live in an arena and are addressed by [`StateId`]. For every state
/// and every alphabet symbol the automaton stores a (possibly empty) set of
/// destinations. An empty set means the move is undefined, which is distinct
/// from a self-loop. Epsilon moves are kept in their own relation, so an
/// automaton is epsilon-free exactly when every epsilon set is empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nfa {
    alphabet: Alphabet,
    names: StateNames,
    /// `transitions[state][symbol]`
    transitions: Vec<Vec<BTreeSet<StateId>>>,
    /// `epsilon[state]`
    epsilon: Vec<BTreeSet<StateId>>,
    start: StateId,
    accepting: BTreeSet<StateId>,
}

impl Nfa {
    /// Create a new NFA with a single, non-accepting start state
    pub fn new(alphabet: Alphabet, start_name: &str) -> Self {
        let mut nfa = Self {
            alphabet,
            names: StateNames::default(),
            transitions: Vec::new(),
            epsilon: Vec::new(),
            start: 0,
            accepting: BTreeSet::new(),
        };
        nfa.start = nfa.add_state(start_name);
        nfa
    }

    /// Add a new state and return its ID. The name is suffixed if taken.
    pub fn add_state(&mut self, name: &str) -> StateId {
        let id = self.names.insert(name);
        self.transitions.push(vec![BTreeSet::new(); self.alphabet.len()]);
        self.epsilon.push(BTreeSet::new());
        id
    }

    /// Add a move from `from` to `to` on `symbol`
    pub fn add_transition(&mut self, from: StateId, symbol: SymbolId, to: StateId) {
        self.transitions[from][symbol].insert(to);
    }

    /// Add an epsilon move from `from` to `to`
    pub fn add_epsilon(&mut self, from: StateId, to: StateId) {
        self.epsilon[from].insert(to);
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

    /// Destinations of `state` on `symbol`. Empty when undefined.
    pub fn targets(&self, state: StateId, symbol: SymbolId) -> &BTreeSet<StateId> {
        &self.transitions[state][symbol]
    }

    /// Destinations of the epsilon moves leaving `state`.
    pub fn epsilon_targets(&self, state: StateId) -> &BTreeSet<StateId> {
        &self.epsilon[state]
    }

    pub fn has_epsilon_moves(&self) -> bool {
        self.epsilon.iter().any(|targets| !targets.is_empty())
    }

    /// True when no state has an epsilon move or more than one destination
    /// for a symbol.
    pub fn is_deterministic(&self) -> bool {
        !self.has_epsilon_moves()
            && self
                .transitions
                .iter()
                .all(|row| row.iter().all(|targets| targets.len() <= 1))
    }

    /// Get epsilon closure of a set of states
    pub fn epsilon_closure(&self, states: &BTreeSet<StateId>) -> BTreeSet<StateId> {
        let mut closure = states.clone();
        let mut stack: Vec<StateId> = states.iter().copied().collect();

        while let Some(state) = stack.pop() {
            for &next in &self.epsilon[state] {
                if closure.insert(next) {
                    stack.push(next);
                }
            }
        }

        closure
    }

    /// Check if any state in the set is accepting
    pub fn any_accepting(&self, states: &BTreeSet<StateId>) -> bool {
        states.iter().any(|state| self.accepting.contains(state))
    }

    /// A copy of this automaton over a larger alphabet. Symbols this
    /// automaton does not know get undefined moves everywhere.
    ///
    /// `alphabet` must contain every symbol of `self.alphabet()`.
    pub(crate) fn with_alphabet(&self, alphabet: &Alphabet) -> Nfa {
        debug_assert!(alphabet.is_superset(&self.alphabet));
        let mut widened = Nfa {
            alphabet: alphabet.clone(),
            names: self.names.clone(),
            transitions: vec![vec![BTreeSet::new(); alphabet.len()]; self.len()],
            epsilon: self.epsilon.clone(),
            start: self.start,
            accepting: self.accepting.clone(),
        };
        for (symbol, name) in self.alphabet.iter().enumerate() {
            let Some(column) = alphabet.index_of(name) else { continue };
            for state in self.states() {
                widened.transitions[state][column] = self.transitions[state][symbol].clone();
            }
        }
        widened
    }

    /// Copy every state of `other` into this automaton and return the new ID
    /// of each of `other`'s states. Colliding names are suffixed.
    ///
    /// The alphabet of `self` must contain every symbol of `other`. Start
    /// and accepting states of `other` are not carried over.
    pub(crate) fn embed(&mut self, other: &Nfa) -> Vec<StateId> {
        debug_assert!(self.alphabet.is_superset(&other.alphabet));
        let ids: Vec<StateId> = other.states().map(|state| self.add_state(other.name(state))).collect();
        let columns: Vec<Option<SymbolId>> =
            other.alphabet.iter().map(|symbol| self.alphabet.index_of(symbol)).collect();

        for state in other.states() {
            for (symbol, column) in columns.iter().enumerate() {
                let Some(column) = *column else { continue };
                for &target in other.targets(state, symbol) {
                    self.add_transition(ids[state], column, ids[target]);
                }
            }
            for &target in other.epsilon_targets(state) {
                self.add_epsilon(ids[state], ids[target]);
            }
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ab() -> Alphabet {
        Alphabet::new(["a", "b"]).unwrap()
    }

    #[test]
    fn epsilon_closure_follows_chains() {
        // q0 -e-> q1 -e-> q2, q3 unrelated
        let mut nfa = Nfa::new(ab(), "q0");
        let q1 = nfa.add_state("q1");
        let q2 = nfa.add_state("q2");
        let q3 = nfa.add_state("q3");
        nfa.add_epsilon(0, q1);
        nfa.add_epsilon(q1, q2);
        nfa.add_transition(q2, 0, q3);

        let closure = nfa.epsilon_closure(&BTreeSet::from([0]));
        assert_eq!(closure, BTreeSet::from([0, q1, q2]));
        assert!(nfa.has_epsilon_moves());
        assert!(!nfa.is_deterministic());
    }

    #[test]
    fn widening_keeps_existing_moves() {
        let mut nfa = Nfa::new(Alphabet::new(["b"]).unwrap(), "q0");
        let q1 = nfa.add_state("q1");
        nfa.add_transition(0, 0, q1);

        let widened = nfa.with_alphabet(&ab());
        let b = widened.alphabet().index_of("b").unwrap();
        let a = widened.alphabet().index_of("a").unwrap();
        assert_eq!(widened.targets(0, b), &BTreeSet::from([q1]));
        assert!(widened.targets(0, a).is_empty());
        assert!(widened.is_deterministic());
    }

    #[test]
    fn embed_renames_collisions() {
        let mut left = Nfa::new(ab(), "q0");
        left.add_state("q1");
        let mut right = Nfa::new(ab(), "q0");
        let r1 = right.add_state("r1");
        right.add_transition(0, 1, r1);

        let ids = left.embed(&right);
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(left.name(2), "q0'");
        assert_eq!(left.name(3), "r1");
        assert_eq!(left.targets(2, 1), &BTreeSet::from([3]));
    }
}
