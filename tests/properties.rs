use fa_algebra::{
    complement, concatenate, determinize, eliminate_epsilon, intersection, minimize, text, union,
    Alphabet, Config, FiniteAutomaton, Grammar, Nfa,
};
use quickcheck::{quickcheck, Arbitrary, Gen};

use crate::{init, same_language, words};

const SYMBOLS: [char; 2] = ['a', 'b'];

/// An NFA with epsilon moves over `{a, b}` with one to four states.
#[derive(Clone, Debug)]
struct SmallNfa(Nfa);

impl Arbitrary for SmallNfa {
    fn arbitrary(g: &mut Gen) -> SmallNfa {
        let states = usize::from(u8::arbitrary(g) % 4) + 1;
        let alphabet = Alphabet::new(["a", "b"]).unwrap_or_default();
        let mut nfa = Nfa::new(alphabet, "q0");
        for state in 1..states {
            nfa.add_state(&format!("q{}", state));
        }
        for from in 0..states {
            for to in 0..states {
                for symbol in 0..2 {
                    if u8::arbitrary(g) % 3 == 0 {
                        nfa.add_transition(from, symbol, to);
                    }
                }
                if from != to && u8::arbitrary(g) % 5 == 0 {
                    nfa.add_epsilon(from, to);
                }
            }
            nfa.set_accepting(from, u8::arbitrary(g) % 3 == 0);
        }
        SmallNfa(nfa)
    }
}

quickcheck! {
    fn epsilon_elimination_preserves_language(a: SmallNfa) -> bool {
        init();
        let eliminated = eliminate_epsilon(&a.0);
        !eliminated.has_epsilon_moves() && same_language(&a.0, &eliminated, &SYMBOLS, 5)
    }

    fn determinization_preserves_language(a: SmallNfa) -> bool {
        let dfa = determinize(&a.0, &Config::default());
        same_language(&a.0, &dfa, &SYMBOLS, 5)
    }

    fn complement_flips_every_word(a: SmallNfa) -> bool {
        let complemented = complement(&a.0, &Config::default());
        complemented.is_complete()
            && words(&SYMBOLS, 6).iter().all(|w| complemented.is_match(w) != a.0.is_match(w))
    }

    fn intersection_is_conjunction(a: SmallNfa, b: SmallNfa) -> bool {
        let both = intersection(&a.0, &b.0, &Config::default());
        words(&SYMBOLS, 5).iter().all(|w| both.is_match(w) == (a.0.is_match(w) && b.0.is_match(w)))
    }

    fn union_is_disjunction(a: SmallNfa, b: SmallNfa) -> bool {
        let either = union(&a.0, &b.0, &Config::default());
        words(&SYMBOLS, 5).iter().all(|w| either.is_match(w) == (a.0.is_match(w) || b.0.is_match(w)))
    }

    fn concatenation_splits_words(a: SmallNfa, b: SmallNfa) -> bool {
        let joined = concatenate(&a.0, &b.0);
        words(&SYMBOLS, 4).iter().all(|w| {
            let split = (0..=w.len()).any(|i| a.0.is_match(&w[..i]) && b.0.is_match(&w[i..]));
            joined.is_match(w) == split
        })
    }

    fn minimization_is_idempotent(a: SmallNfa) -> bool {
        let config = Config::default();
        let once = minimize(&a.0, &config);
        let twice = minimize(&once, &config);
        once.len() == twice.len()
            && same_language(&a.0, &once, &SYMBOLS, 5)
            && same_language(&once, &twice, &SYMBOLS, 5)
    }

    fn minimization_never_grows(a: SmallNfa) -> bool {
        let config = Config::default();
        let dfa = determinize(&a.0, &config);
        minimize(&dfa, &config).len() <= dfa.len()
    }

    fn text_round_trip(a: SmallNfa) -> bool {
        let config = Config::default();
        let rendered = match text::render(&a.0, &config) {
            Ok(rendered) => rendered,
            Err(_) => return false,
        };
        match text::parse(&rendered, &config) {
            Ok(parsed) => parsed.len() == a.0.len() && same_language(&a.0, &parsed, &SYMBOLS, 5),
            Err(_) => false,
        }
    }

    fn grammar_round_trip(a: SmallNfa) -> bool {
        let config = Config::default();
        let reloaded = Grammar::from_automaton(&a.0, &config)
            .map(|grammar| grammar.to_string())
            .and_then(|rendered| Grammar::parse(&rendered, &config))
            .and_then(|grammar| grammar.to_nfa(&config));
        match reloaded {
            Ok(nfa) => same_language(&a.0, &nfa, &SYMBOLS, 5),
            Err(_) => false,
        }
    }
}
