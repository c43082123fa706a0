use crate::automaton::FiniteAutomaton;
use crate::combinator::{complement, union};
use crate::config::Config;
use crate::dfa::Dfa;

/// A DFA accepting the words accepted by both `left` and `right`, built as
/// `complement(union(complement(left), complement(right)))`.
///
/// Complements are taken relative to the joint alphabet of both operands,
/// so a word using a symbol only one operand knows is correctly rejected.
/// Both inner complements use the configured sink name; the union suffixes
/// the right one's sink if the names meet.
pub fn intersection<A, B>(left: &A, right: &B, config: &Config) -> Dfa
where
    A: FiniteAutomaton,
    B: FiniteAutomaton,
{
    let alphabet = left.alphabet().union(right.alphabet());
    let left = left.to_dfa(config).with_alphabet(&alphabet);
    let right = right.to_dfa(config).with_alphabet(&alphabet);

    let either_rejects = union(&complement(&left, config), &complement(&right, config), config);
    complement(&either_rejects, config)
}
