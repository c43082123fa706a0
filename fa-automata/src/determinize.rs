//! Subset construction (NFA to DFA).

use std::borrow::Cow;
use std::collections::{BTreeSet, VecDeque};

use indexmap::IndexMap;

use crate::config::Config;
use crate::dfa::Dfa;
use crate::epsilon::eliminate_epsilon;
use crate::nfa::Nfa;
use crate::state::StateId;

/// Convert an NFA to a DFA using the powerset construction.
///
/// Epsilon moves, if any, are eliminated first. Each DFA state stands for a
/// set of NFA states and is named `dfa_prefix + n` in discovery order; the
/// start state is `{start}`. Sets are compared by value, so a subset reached
/// along two different paths maps to one DFA state. An empty successor set
/// leaves the move undefined: the result is generally not complete.
pub fn determinize(nfa: &Nfa, config: &Config) -> Dfa {
    let nfa: Cow<'_, Nfa> =
        if nfa.has_epsilon_moves() { Cow::Owned(eliminate_epsilon(nfa)) } else { Cow::Borrowed(nfa) };
    let prefix = config.get_dfa_prefix();

    let initial = BTreeSet::from([nfa.start()]);
    let mut dfa = Dfa::new(nfa.alphabet().clone(), &format!("{}0", prefix));
    if nfa.any_accepting(&initial) {
        dfa.set_accepting(dfa.start(), true);
    }

    let mut mapping: IndexMap<BTreeSet<StateId>, StateId> = IndexMap::new();
    mapping.insert(initial.clone(), dfa.start());
    let mut worklist = VecDeque::from([initial]);

    while let Some(current) = worklist.pop_front() {
        let source = mapping[&current];
        trace!("expanding {}{} = {:?}", prefix, source, current);

        for symbol in 0..nfa.alphabet().len() {
            let mut reached = BTreeSet::new();
            for &state in &current {
                reached.extend(nfa.targets(state, symbol).iter().copied());
            }
            if reached.is_empty() {
                continue;
            }

            let target = match mapping.get(&reached) {
                Some(&existing) => existing,
                None => {
                    let id = dfa.add_state(&format!("{}{}", prefix, mapping.len()));
                    if nfa.any_accepting(&reached) {
                        dfa.set_accepting(id, true);
                    }
                    mapping.insert(reached.clone(), id);
                    worklist.push_back(reached);
                    id
                }
            };
            dfa.set_transition(source, symbol, Some(target));
        }
    }

    debug!("subset construction: {} NFA states -> {} DFA states", nfa.len(), dfa.len());
    dfa
}
