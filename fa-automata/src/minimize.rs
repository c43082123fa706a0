//! DFA minimization by table filling.
//!
//! The pipeline is: complete with a sink, drop unreachable states, mark
//! distinguishable pairs, merge the remaining (equivalent) pairs, then drop
//! states that cannot reach an accepting state.

use crate::automaton::FiniteAutomaton;
use crate::config::Config;
use crate::dfa::Dfa;
use crate::state::StateId;

/// Return a minimal DFA accepting the same language as `automaton`.
///
/// The result has no unreachable states, no dead states and no pair of
/// equivalent states, so its transition function is partial wherever the
/// only continuation was dead. An automaton accepting nothing minimizes to
/// its start state alone, non-accepting and without moves. States merged
/// into one are named by concatenating the original names in arena order.
pub fn minimize<A: FiniteAutomaton>(automaton: &A, config: &Config) -> Dfa {
    let dfa = automaton.to_dfa(config);

    let complete = dfa.complete(config.get_sink_name());
    let trimmed = complete.retain(&complete.reachable());
    let table = PairTable::fill(&trimmed);
    let merged = merge_equivalent(&trimmed, &table);
    let minimal = prune_dead(&merged);

    debug!(
        "minimized DFA: {} states -> {} reachable -> {} merged -> {} live",
        dfa.len(),
        trimmed.len(),
        merged.len(),
        minimal.len(),
    );
    minimal
}

/// Distinguishability of every unordered pair of states.
///
/// A pair is distinguishable when exactly one side accepts, or when some
/// symbol leads it to a distinguishable pair. Each unmarked pair records
/// itself as a dependent of its successor pairs, and marking a pair marks
/// its dependents transitively.
struct PairTable {
    len: usize,
    marked: Vec<bool>,
}

impl PairTable {
    fn fill(dfa: &Dfa) -> PairTable {
        let len = dfa.len();
        let mut table = PairTable { len, marked: vec![false; len * len] };
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); len * len];

        for a in dfa.states() {
            for b in (a + 1)..len {
                if dfa.is_accepting(a) != dfa.is_accepting(b) {
                    let pair = table.index(a, b);
                    table.marked[pair] = true;
                }
            }
        }

        for a in dfa.states() {
            for b in (a + 1)..len {
                let pair = table.index(a, b);
                if table.marked[pair] {
                    continue;
                }

                let successors: Vec<usize> = (0..dfa.alphabet().len())
                    .filter_map(|symbol| match (dfa.transition(a, symbol), dfa.transition(b, symbol)) {
                        (Some(p), Some(q)) if p != q => Some(table.index(p, q)),
                        _ => None,
                    })
                    .collect();

                if successors.iter().any(|&next| table.marked[next]) {
                    table.mark(pair, &dependents);
                } else {
                    for next in successors {
                        dependents[next].push(pair);
                    }
                }
            }
        }
        table
    }

    fn index(&self, a: StateId, b: StateId) -> usize {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        low * self.len + high
    }

    fn mark(&mut self, pair: usize, dependents: &[Vec<usize>]) {
        let mut stack = vec![pair];
        while let Some(pair) = stack.pop() {
            if self.marked[pair] {
                continue;
            }
            self.marked[pair] = true;
            stack.extend(dependents[pair].iter().copied());
        }
    }

    fn equivalent(&self, a: StateId, b: StateId) -> bool {
        a == b || !self.marked[self.index(a, b)]
    }
}

/// Union-find over states. The representative of a class is its smallest
/// member.
struct DisjointSets {
    parent: Vec<StateId>,
}

impl DisjointSets {
    fn new(len: usize) -> DisjointSets {
        DisjointSets { parent: (0..len).collect() }
    }

    fn find(&mut self, mut state: StateId) -> StateId {
        while self.parent[state] != state {
            self.parent[state] = self.parent[self.parent[state]];
            state = self.parent[state];
        }
        state
    }

    fn union(&mut self, a: StateId, b: StateId) {
        let (a, b) = (self.find(a), self.find(b));
        if a < b {
            self.parent[b] = a;
        } else if b < a {
            self.parent[a] = b;
        }
    }
}

fn merge_equivalent(dfa: &Dfa, table: &PairTable) -> Dfa {
    let mut sets = DisjointSets::new(dfa.len());
    for a in dfa.states() {
        for b in (a + 1)..dfa.len() {
            if table.equivalent(a, b) {
                sets.union(a, b);
            }
        }
    }

    // Classes in order of their smallest member.
    let mut class_of: Vec<usize> = vec![0; dfa.len()];
    let mut members: Vec<Vec<StateId>> = Vec::new();
    let mut class_of_root: Vec<Option<usize>> = vec![None; dfa.len()];
    for state in dfa.states() {
        let root = sets.find(state);
        let class = *class_of_root[root].get_or_insert_with(|| {
            members.push(Vec::new());
            members.len() - 1
        });
        members[class].push(state);
        class_of[state] = class;
    }

    let names: Vec<String> = members
        .iter()
        .map(|class| class.iter().map(|&state| dfa.name(state)).collect::<String>())
        .collect();

    let mut merged = Dfa::new(dfa.alphabet().clone(), &names[0]);
    for name in &names[1..] {
        merged.add_state(name);
    }
    for (class, states) in members.iter().enumerate() {
        let representative = states[0];
        for symbol in 0..dfa.alphabet().len() {
            let target = dfa.transition(representative, symbol).map(|target| class_of[target]);
            merged.set_transition(class, symbol, target);
        }
        merged.set_accepting(class, dfa.is_accepting(representative));
    }
    merged.set_start(class_of[dfa.start()]);
    merged
}

fn prune_dead(dfa: &Dfa) -> Dfa {
    let live = dfa.productive();
    if live.contains(&dfa.start()) {
        return dfa.retain(&live);
    }
    // The language is empty: keep the start state alone.
    Dfa::new(dfa.alphabet().clone(), dfa.name(dfa.start()))
}
