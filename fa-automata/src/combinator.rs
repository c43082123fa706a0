//! Closure operations: complement, union, concatenation and Kleene star.
//!
//! None of these mutate their operands. Binary operations first lift both
//! operands to the union of their alphabets, then copy the right operand's
//! states into a copy of the left one, suffixing any name the left operand
//! already uses.

use crate::automaton::FiniteAutomaton;
use crate::config::Config;
use crate::dfa::Dfa;
use crate::nfa::Nfa;

/// The complement of `automaton` relative to its own alphabet.
///
/// The operand is determinized if needed and completed with a sink state,
/// then accepting and non-accepting states swap roles.
pub fn complement<A: FiniteAutomaton>(automaton: &A, config: &Config) -> Dfa {
    let mut complement = automaton.to_dfa(config).complete(config.get_sink_name());
    for state in complement.states() {
        let accepting = complement.is_accepting(state);
        complement.set_accepting(state, !accepting);
    }
    debug!("complemented DFA with {} states", complement.len());
    complement
}

/// An NFA accepting the words of `left` or `right`.
///
/// A fresh start state has epsilon moves to both original start states, and
/// every original accepting state has an epsilon move to a fresh accepting
/// state, which is the only accepting state of the result.
pub fn union<A, B>(left: &A, right: &B, config: &Config) -> Nfa
where
    A: FiniteAutomaton,
    B: FiniteAutomaton,
{
    let (left, right) = (left.to_nfa(), right.to_nfa());
    let (mut result, ids) = join(&left, &right);

    let start = result.add_state(config.get_start_name());
    let accept = result.add_state(config.get_final_name());
    result.add_epsilon(start, left.start());
    result.add_epsilon(start, ids[right.start()]);
    for &state in left.accepting() {
        result.add_epsilon(state, accept);
        result.set_accepting(state, false);
    }
    for &state in right.accepting() {
        result.add_epsilon(ids[state], accept);
    }
    result.set_accepting(accept, true);
    result.set_start(start);
    result
}

/// An NFA accepting every word of `left` followed by a word of `right`.
///
/// Each accepting state of `left` gets an epsilon move to the start state
/// of `right`. The start state is `left`'s, the accepting states are
/// `right`'s.
pub fn concatenate<A, B>(left: &A, right: &B) -> Nfa
where
    A: FiniteAutomaton,
    B: FiniteAutomaton,
{
    let (left, right) = (left.to_nfa(), right.to_nfa());
    let (mut result, ids) = join(&left, &right);

    for &state in left.accepting() {
        result.add_epsilon(state, ids[right.start()]);
        result.set_accepting(state, false);
    }
    for &state in right.accepting() {
        result.set_accepting(ids[state], true);
    }
    result
}

/// The Kleene star of `automaton`: zero or more repetitions.
///
/// A fresh start state moves by epsilon to the old start and to a fresh
/// accepting state. Every old accepting state moves by epsilon to the fresh
/// accepting state and back to the old start.
pub fn star<A: FiniteAutomaton>(automaton: &A, config: &Config) -> Nfa {
    let mut result = automaton.to_nfa().into_owned();
    let inner_start = result.start();
    let inner_accepting = result.accepting().clone();

    let start = result.add_state(config.get_start_name());
    let accept = result.add_state(config.get_final_name());
    result.add_epsilon(start, inner_start);
    result.add_epsilon(start, accept);
    for state in inner_accepting {
        result.add_epsilon(state, accept);
        result.add_epsilon(state, inner_start);
        result.set_accepting(state, false);
    }
    result.set_accepting(accept, true);
    result.set_start(start);
    result
}

/// A copy of `left` over the joint alphabet with `right`'s states appended.
/// Returns the new ID of every state of `right`.
fn join(left: &Nfa, right: &Nfa) -> (Nfa, Vec<usize>) {
    let alphabet = left.alphabet().union(right.alphabet());
    let mut result = left.with_alphabet(&alphabet);
    let ids = result.embed(right);
    trace!("joined automata of {} and {} states", left.len(), right.len());
    (result, ids)
}
