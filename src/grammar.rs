/*!
Unitary right-linear grammars.

```text
a,b
S,A
S
S -> a(A)
S -> b
A -> b(S)
A -> e
```

Line 1 lists the terminals, line 2 the variables and line 3 the start
variable. Every following line is one production:

* `A -> a(B)` reads `a` and continues in `B`,
* `A -> a` reads `a` and stops,
* `A -> e` (the configured epsilon marker) lets `A` derive the empty word,
* `A -> (B)` continues in `B` without reading anything.

A grammar of this shape is a finite automaton written differently: variables
are states and every production is a transition.
*/

use std::fmt;

use fa_automata::{eliminate_epsilon, Alphabet, Config, FiniteAutomaton, Nfa};

use crate::error::Error;
use crate::text::is_valid_name;

/// The right-hand side of a grammar rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Production {
    /// `A -> a(B)`
    Step { terminal: String, next: String },
    /// `A -> a`
    Terminal(String),
    /// `A -> e`
    Empty,
    /// `A -> (B)`
    Unit(String),
}

/// One production of a variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub variable: String,
    pub production: Production,
}

/// A unitary right-linear grammar.
#[derive(Clone, Debug)]
pub struct Grammar {
    terminals: Vec<String>,
    variables: Vec<String>,
    start: String,
    rules: Vec<Rule>,
    epsilon: String,
}

impl Grammar {
    /// Read the productions off an automaton.
    ///
    /// Epsilon moves are eliminated first, so the result only has `Step` and
    /// `Empty` productions. Variables are the state names in arena order and
    /// the start variable is the start state.
    pub fn from_automaton<A: FiniteAutomaton>(automaton: &A, config: &Config) -> Result<Grammar, Error> {
        let nfa = automaton.to_nfa();
        let nfa = if nfa.has_epsilon_moves() { eliminate_epsilon(&nfa) } else { nfa.into_owned() };

        let mut terminals = Vec::with_capacity(nfa.alphabet().len());
        for symbol in nfa.alphabet().iter() {
            if symbol == config.get_epsilon() {
                return Err(Error::ReservedSymbol(symbol.to_string()));
            }
            if !is_grammar_name(symbol) {
                return Err(Error::InvalidSymbol(symbol.to_string()));
            }
            terminals.push(symbol.to_string());
        }

        let mut variables = Vec::with_capacity(nfa.len());
        for state in nfa.states() {
            if !is_grammar_name(nfa.name(state)) {
                return Err(Error::InvalidStateName(nfa.name(state).to_string()));
            }
            variables.push(nfa.name(state).to_string());
        }

        let mut rules = Vec::new();
        for state in nfa.states() {
            let variable = nfa.name(state);
            for (symbol, terminal) in terminals.iter().enumerate() {
                for &next in nfa.targets(state, symbol) {
                    rules.push(Rule {
                        variable: variable.to_string(),
                        production: Production::Step {
                            terminal: terminal.clone(),
                            next: nfa.name(next).to_string(),
                        },
                    });
                }
            }
            if nfa.is_accepting(state) {
                rules.push(Rule { variable: variable.to_string(), production: Production::Empty });
            }
        }

        Ok(Grammar {
            terminals,
            variables,
            start: nfa.name(nfa.start()).to_string(),
            rules,
            epsilon: config.get_epsilon().to_string(),
        })
    }

    /// Parse the grammar text format.
    pub fn parse(text: &str, config: &Config) -> Result<Grammar, Error> {
        let epsilon = config.get_epsilon();
        let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line.trim()));

        let (_, header) = lines.next().ok_or_else(|| Error::syntax(1, "missing terminals line"))?;
        let terminals = parse_names(header, 1, "terminal")?;
        if terminals.iter().any(|terminal| terminal == epsilon) {
            return Err(Error::syntax(1, format!("terminal {:?} is the epsilon marker", epsilon)));
        }

        let (_, header) = lines.next().ok_or_else(|| Error::syntax(2, "missing variables line"))?;
        let variables = parse_names(header, 2, "variable")?;

        let (_, start) = lines.next().ok_or_else(|| Error::syntax(3, "missing start variable line"))?;
        if !variables.iter().any(|variable| variable == start) {
            return Err(Error::syntax(3, format!("start variable {:?} is not declared", start)));
        }

        let mut rules = Vec::new();
        for (number, line) in lines.filter(|(_, line)| !line.is_empty()) {
            let rule = parse_rule(line, epsilon).map_err(|message| Error::syntax(number, message))?;
            if !variables.contains(&rule.variable) {
                return Err(Error::syntax(number, format!("unknown variable {:?}", rule.variable)));
            }
            match &rule.production {
                Production::Step { terminal, next } => {
                    check_terminal(&terminals, terminal, number)?;
                    check_variable(&variables, next, number)?;
                }
                Production::Terminal(terminal) => check_terminal(&terminals, terminal, number)?,
                Production::Unit(next) => check_variable(&variables, next, number)?,
                Production::Empty => {}
            }
            rules.push(rule);
        }

        Ok(Grammar { terminals, variables, start: start.to_string(), rules, epsilon: epsilon.to_string() })
    }

    /// Build the automaton that accepts the language of this grammar.
    ///
    /// Each variable becomes a state of the same name. `A -> a` productions
    /// share one fresh accepting state named after `Config::final_name`.
    pub fn to_nfa(&self, config: &Config) -> Result<Nfa, Error> {
        let alphabet = Alphabet::new(&self.terminals)?;
        let mut nfa = Nfa::new(alphabet, &self.start);
        for variable in &self.variables {
            if nfa.state_id(variable).is_none() {
                nfa.add_state(variable);
            }
        }

        let mut stop = None;
        for rule in &self.rules {
            let from = self.state(&nfa, &rule.variable)?;
            match &rule.production {
                Production::Step { terminal, next } => {
                    let symbol = self.symbol(&nfa, terminal)?;
                    let to = self.state(&nfa, next)?;
                    nfa.add_transition(from, symbol, to);
                }
                Production::Terminal(terminal) => {
                    let symbol = self.symbol(&nfa, terminal)?;
                    let to = match stop {
                        Some(to) => to,
                        None => {
                            let to = nfa.add_state(config.get_final_name());
                            nfa.set_accepting(to, true);
                            stop = Some(to);
                            to
                        }
                    };
                    nfa.add_transition(from, symbol, to);
                }
                Production::Empty => nfa.set_accepting(from, true),
                Production::Unit(next) => {
                    let to = self.state(&nfa, next)?;
                    nfa.add_epsilon(from, to);
                }
            }
        }
        Ok(nfa)
    }

    pub fn terminals(&self) -> &[String] {
        &self.terminals
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn state(&self, nfa: &Nfa, variable: &str) -> Result<usize, Error> {
        nfa.state_id(variable).ok_or_else(|| Error::InvalidStateName(variable.to_string()))
    }

    fn symbol(&self, nfa: &Nfa, terminal: &str) -> Result<usize, Error> {
        nfa.alphabet()
            .index_of(terminal)
            .ok_or_else(|| Error::Automaton(fa_automata::Error::UnknownSymbol(terminal.to_string())))
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.terminals.join(","))?;
        writeln!(f, "{}", self.variables.join(","))?;
        writeln!(f, "{}", self.start)?;
        for rule in &self.rules {
            write!(f, "{} -> ", rule.variable)?;
            match &rule.production {
                Production::Step { terminal, next } => writeln!(f, "{}({})", terminal, next)?,
                Production::Terminal(terminal) => writeln!(f, "{}", terminal)?,
                Production::Empty => writeln!(f, "{}", self.epsilon)?,
                Production::Unit(next) => writeln!(f, "({})", next)?,
            }
        }
        Ok(())
    }
}

fn parse_names(line: &str, number: usize, what: &str) -> Result<Vec<String>, Error> {
    let mut names: Vec<String> = Vec::new();
    for name in line.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        if !is_grammar_name(name) {
            return Err(Error::syntax(number, format!("invalid {} {:?}", what, name)));
        }
        if names.iter().any(|seen| seen == name) {
            return Err(Error::syntax(number, format!("{} {:?} is declared twice", what, name)));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

fn parse_rule(line: &str, epsilon: &str) -> Result<Rule, String> {
    let (variable, body) = line.split_once("->").ok_or_else(|| "expected '->'".to_string())?;
    let (variable, body) = (variable.trim(), body.trim());
    if variable.is_empty() {
        return Err("rule has no variable".to_string());
    }
    if body.is_empty() {
        return Err("rule has no production".to_string());
    }

    let production = if body == epsilon {
        Production::Empty
    } else if let Some(open) = body.find('(') {
        let Some(inner) = body[open + 1..].strip_suffix(')') else {
            return Err(format!("malformed production {:?}", body));
        };
        let (terminal, next) = (body[..open].trim(), inner.trim());
        if next.is_empty() || next.contains(|ch: char| ch == '(' || ch == ')') {
            return Err(format!("malformed production {:?}", body));
        }
        if terminal.is_empty() {
            Production::Unit(next.to_string())
        } else {
            Production::Step { terminal: terminal.to_string(), next: next.to_string() }
        }
    } else if body.contains(')') {
        return Err(format!("malformed production {:?}", body));
    } else {
        Production::Terminal(body.to_string())
    };
    Ok(Rule { variable: variable.to_string(), production })
}

fn check_terminal(terminals: &[String], terminal: &str, number: usize) -> Result<(), Error> {
    if terminals.iter().any(|known| known == terminal) {
        Ok(())
    } else {
        Err(Error::syntax(number, format!("unknown terminal {:?}", terminal)))
    }
}

fn check_variable(variables: &[String], variable: &str, number: usize) -> Result<(), Error> {
    if variables.iter().any(|known| known == variable) {
        Ok(())
    } else {
        Err(Error::syntax(number, format!("unknown variable {:?}", variable)))
    }
}

fn is_grammar_name(name: &str) -> bool {
    is_valid_name(name) && !name.contains("->")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "a,b\nS,A\nS\nS -> a(A)\nS -> b\nA -> b(S)\nA -> e\n";

    #[test]
    fn parses_every_production_kind() {
        let grammar = Grammar::parse("a\nS,T\nS\nS -> a(T)\nS -> a\nS -> (T)\nT -> e\n", &Config::default()).unwrap();
        let productions: Vec<&Production> = grammar.rules().iter().map(|rule| &rule.production).collect();
        assert_eq!(
            productions,
            vec![
                &Production::Step { terminal: "a".to_string(), next: "T".to_string() },
                &Production::Terminal("a".to_string()),
                &Production::Unit("T".to_string()),
                &Production::Empty,
            ]
        );
    }

    #[test]
    fn to_nfa_shares_one_final_state() {
        let grammar = Grammar::parse(SAMPLE, &Config::default()).unwrap();
        let nfa = grammar.to_nfa(&Config::default()).unwrap();
        assert_eq!(nfa.len(), 3);
        assert_eq!(nfa.name(2), "F");
        assert!(nfa.is_match("b"));
        assert!(nfa.is_match("a"));
        assert!(nfa.is_match("aba"));
        assert!(nfa.is_match("abb"));
        assert!(!nfa.is_match(""));
        assert!(!nfa.is_match("ab"));
    }

    #[test]
    fn final_state_avoids_variable_names() {
        let grammar = Grammar::parse("a\nF\nF\nF -> a\n", &Config::default()).unwrap();
        let nfa = grammar.to_nfa(&Config::default()).unwrap();
        assert_eq!(nfa.name(1), "F'");
        assert!(nfa.is_match("a"));
    }

    #[test]
    fn unit_production_is_an_epsilon_move() {
        let grammar = Grammar::parse("a\nS,T\nS\nS -> (T)\nT -> a\n", &Config::default()).unwrap();
        let nfa = grammar.to_nfa(&Config::default()).unwrap();
        assert!(nfa.has_epsilon_moves());
        assert!(nfa.is_match("a"));
    }

    #[test]
    fn display_round_trips() {
        let grammar = Grammar::parse(SAMPLE, &Config::default()).unwrap();
        assert_eq!(grammar.to_string(), SAMPLE);
    }

    #[test]
    fn from_automaton() {
        let nfa = Grammar::parse(SAMPLE, &Config::default()).unwrap().to_nfa(&Config::default()).unwrap();
        let grammar = Grammar::from_automaton(&nfa, &Config::default()).unwrap();
        assert_eq!(grammar.start(), "S");
        assert_eq!(grammar.variables(), ["S", "A", "F"]);
        assert!(grammar.rules().iter().all(|rule| !matches!(rule.production, Production::Terminal(_))));
        let again = grammar.to_nfa(&Config::default()).unwrap();
        for word in ["", "a", "b", "ab", "aba", "abb", "abab"] {
            assert_eq!(again.is_match(word), nfa.is_match(word), "{:?}", word);
        }
    }

    #[test]
    fn from_automaton_refuses_reserved_terminal() {
        let nfa = Nfa::new(Alphabet::new(["e"]).unwrap(), "S");
        assert!(matches!(Grammar::from_automaton(&nfa, &Config::default()), Err(Error::ReservedSymbol(_))));
    }

    #[test]
    fn malformed_grammars_report_their_line() {
        let cases = [
            ("a,e\nS\nS\n", 1),
            ("a\nS,S\nS\n", 2),
            ("a\nS\nT\n", 3),
            ("a\nS\nS\nS a(S)\n", 4),
            ("a\nS\nS\nS -> b(S)\n", 4),
            ("a\nS\nS\nS -> a(T)\n", 4),
            ("a\nS\nS\nT -> a\n", 4),
            ("a\nS\nS\n\nS -> a(S\n", 5),
            ("a\nS\nS\nS -> \n", 4),
        ];
        for (text, expected) in cases {
            match Grammar::parse(text, &Config::default()) {
                Err(Error::Syntax { line, .. }) => assert_eq!(line, expected, "{:?}", text),
                other => panic!("expected syntax error for {:?}, got {:?}", text, other),
            }
        }
    }
}
