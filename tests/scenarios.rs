use fa_algebra::{
    complement, intersection, minimize, star, text, Alphabet, Builder, Config, Definition, Dfa,
    FiniteAutomaton, Grammar,
};

use crate::{init, same_language};

const ENDS_IN_A: &str = "\
a,b
q0
q0,{q1},{}
[q1],{q1},{q0}
";

fn check(automaton: &impl FiniteAutomaton, accepted: &[&str], rejected: &[&str]) {
    for word in accepted {
        assert!(automaton.is_match(word), "should accept {:?}", word);
    }
    for word in rejected {
        assert!(!automaton.is_match(word), "should reject {:?}", word);
    }
}

#[test]
fn minimize_two_state_automaton() -> anyhow::Result<()> {
    init();
    let config = Config::default();
    let nfa = Builder::new().automaton_text(ENDS_IN_A).build()?;
    let dfa = minimize(&nfa, &config);

    assert_eq!(dfa.len(), 2);
    assert!(dfa.is_accepting(dfa.state_id("q1").ok_or_else(|| anyhow::anyhow!("q1 was renamed"))?));
    check(
        &dfa,
        &["a", "aa", "aba", "abaa", "aaba"],
        &["", "ab", "aab", "b", "abba"],
    );
    Ok(())
}

#[test]
fn compile_and_minimize_regex() -> anyhow::Result<()> {
    init();
    let config = Config::default();
    let nfa = Builder::new().regex("ab*|c").build()?;
    let dfa = minimize(&nfa, &config);

    check(&dfa, &["a", "ab", "abbb", "c"], &["", "b", "ac", "abc"]);
    // start, after "a", after "c"; the dead state is pruned
    assert_eq!(dfa.len(), 3);
    Ok(())
}

#[test]
fn star_of_single_symbol() -> anyhow::Result<()> {
    init();
    let x = Builder::new()
        .definition(Definition {
            alphabet: vec!["x".to_string()],
            initial: "p".to_string(),
            finals: vec!["q".to_string()],
            transitions: vec![("p".to_string(), "x".to_string(), "q".to_string())],
        })
        .build()?;
    let starred = star(&x, &Config::default());

    check(&starred, &["", "x", "xx", "xxx"], &["xy", "y"]);
    Ok(())
}

#[test]
fn complement_of_empty_word() {
    init();
    let mut dfa = Dfa::new(Alphabet::new(["a", "b"]).unwrap(), "only");
    dfa.set_accepting(dfa.start(), true);
    let complemented = complement(&dfa, &Config::default());

    assert!(complemented.is_complete());
    check(&complemented, &["a", "b", "ab", "bba", "aaaa"], &[""]);
}

#[test]
fn intersection_of_regexes() -> anyhow::Result<()> {
    init();
    let config = Config::default();
    let even_length = Builder::new().regex("((a|b)(a|b))*").build()?;
    let has_bb = Builder::new().regex("(a|b)*bb(a|b)*").build()?;
    let both = intersection(&even_length, &has_bb, &config);

    check(&both, &["bb", "abba", "bbab"], &["", "b", "abb", "abab"]);
    assert!(same_language(&both, &minimize(&both, &config), &['a', 'b'], 6));
    Ok(())
}

#[test]
fn regex_to_grammar() -> anyhow::Result<()> {
    init();
    let config = Config::default();
    let dfa = minimize(&Builder::new().regex("(a|b)*abb").build()?, &config);
    let grammar = Grammar::from_automaton(&dfa, &config)?;
    assert_eq!(grammar.variables().len(), 4);

    let reloaded = Builder::new().grammar_text(&grammar.to_string()).build()?;
    assert!(same_language(&dfa, &reloaded, &['a', 'b'], 6));
    Ok(())
}

#[test]
fn divisibility_survives_the_table_format() -> anyhow::Result<()> {
    init();
    let config = Config::default();
    let three = fa_algebra::multiples_of(3, 2)?;
    let reloaded = text::parse(&text::render(&three, &config)?, &config)?;

    for value in 0u32..64 {
        let numeral = format!("{:b}", value);
        assert_eq!(reloaded.is_match(&numeral), value % 3 == 0, "{}", numeral);
    }
    Ok(())
}
