//! Epsilon elimination (NFAe to NFA).

use std::collections::BTreeSet;

use crate::nfa::Nfa;
use crate::state::StateId;

/// Compute the epsilon closure of every state: the states reachable through
/// zero or more epsilon moves. A state without epsilon moves closes to
/// itself.
pub fn epsilon_closures(nfa: &Nfa) -> Vec<BTreeSet<StateId>> {
    nfa.states().map(|state| nfa.epsilon_closure(&BTreeSet::from([state]))).collect()
}

/// Build an equivalent NFA without epsilon moves.
///
/// State names, the start state and the alphabet are kept. A move on `c`
/// from `p` leads to every state in the closure of some `c`-successor of some
/// state in the closure of `p`. A state accepts when its closure contains an
/// accepting state.
pub fn eliminate_epsilon(nfa: &Nfa) -> Nfa {
    let closures = epsilon_closures(nfa);

    let mut result = Nfa::new(nfa.alphabet().clone(), nfa.name(0));
    for state in nfa.states().skip(1) {
        result.add_state(nfa.name(state));
    }
    result.set_start(nfa.start());

    for state in nfa.states() {
        let closure = &closures[state];
        for symbol in 0..nfa.alphabet().len() {
            for &member in closure {
                for &target in nfa.targets(member, symbol) {
                    for &reached in &closures[target] {
                        result.add_transition(state, symbol, reached);
                    }
                }
            }
        }
        if nfa.any_accepting(closure) {
            result.set_accepting(state, true);
        }
    }

    debug!("eliminated epsilon moves from NFA with {} states", nfa.len());
    result
}
