use std::path::{Path, PathBuf};

use fa_automata::{Alphabet, Compiler, Config, Nfa, StateId};

use crate::error::Error;
use crate::grammar::Grammar;
use crate::text;

/// An automaton spelled out state by state.
///
/// A transition whose symbol is the configured epsilon marker is an epsilon
/// move. States are created in the order they are first mentioned, starting
/// with `initial`.
#[derive(Clone, Debug, Default)]
pub struct Definition {
    pub alphabet: Vec<String>,
    pub initial: String,
    pub finals: Vec<String>,
    pub transitions: Vec<(String, String, String)>,
}

impl Definition {
    fn into_nfa(self, config: &Config) -> Result<Nfa, Error> {
        let alphabet = Alphabet::new(self.alphabet.iter().filter(|symbol| *symbol != config.get_epsilon()))?;
        let mut nfa = Nfa::new(alphabet, &self.initial);
        for (from, symbol, to) in &self.transitions {
            let from = state_named(&mut nfa, from);
            let to = state_named(&mut nfa, to);
            if symbol == config.get_epsilon() {
                nfa.add_epsilon(from, to);
            } else {
                let symbol = nfa
                    .alphabet()
                    .index_of(symbol)
                    .ok_or_else(|| fa_automata::Error::UnknownSymbol(symbol.clone()))?;
                nfa.add_transition(from, symbol, to);
            }
        }
        for name in &self.finals {
            let state = state_named(&mut nfa, name);
            nfa.set_accepting(state, true);
        }
        Ok(nfa)
    }
}

#[derive(Clone, Debug)]
enum Source {
    Definition(Definition),
    AutomatonText(String),
    GrammarText(String),
    AutomatonFile(PathBuf),
    GrammarFile(PathBuf),
    Regex(String),
}

/// Builds an automaton from exactly one source.
///
/// ```
/// use fa_algebra::{Builder, FiniteAutomaton};
///
/// let nfa = Builder::new().regex("ab*").build().unwrap();
/// assert!(nfa.is_match("abbb"));
///
/// let err = Builder::new().regex("a").automaton_text("a\nq\n").build();
/// assert!(err.is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Builder {
    config: Config,
    source: Option<Source>,
    conflict: bool,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Set the naming and epsilon configuration used while building.
    pub fn config(mut self, config: Config) -> Builder {
        self.config = config;
        self
    }

    pub fn definition(self, definition: Definition) -> Builder {
        self.source(Source::Definition(definition))
    }

    /// An automaton in the table format of [`text`](crate::text).
    pub fn automaton_text(self, text: &str) -> Builder {
        self.source(Source::AutomatonText(text.to_string()))
    }

    /// A grammar in the format of [`grammar`](crate::grammar).
    pub fn grammar_text(self, text: &str) -> Builder {
        self.source(Source::GrammarText(text.to_string()))
    }

    pub fn automaton_file<P: AsRef<Path>>(self, path: P) -> Builder {
        self.source(Source::AutomatonFile(path.as_ref().to_path_buf()))
    }

    pub fn grammar_file<P: AsRef<Path>>(self, path: P) -> Builder {
        self.source(Source::GrammarFile(path.as_ref().to_path_buf()))
    }

    /// A regular expression over single-character symbols.
    pub fn regex(self, pattern: &str) -> Builder {
        self.source(Source::Regex(pattern.to_string()))
    }

    /// Build the automaton.
    ///
    /// Fails with [`Error::MissingSource`] when no source was set and with
    /// [`Error::ConflictingSources`] when more than one was.
    pub fn build(self) -> Result<Nfa, Error> {
        if self.conflict {
            return Err(Error::ConflictingSources);
        }
        let config = self.config;
        match self.source.ok_or(Error::MissingSource)? {
            Source::Definition(definition) => definition.into_nfa(&config),
            Source::AutomatonText(input) => text::parse(&input, &config),
            Source::GrammarText(input) => Grammar::parse(&input, &config)?.to_nfa(&config),
            Source::AutomatonFile(path) => {
                let input = std::fs::read_to_string(path)?;
                text::parse(&input, &config)
            }
            Source::GrammarFile(path) => {
                let input = std::fs::read_to_string(path)?;
                Grammar::parse(&input, &config)?.to_nfa(&config)
            }
            Source::Regex(pattern) => Ok(Compiler::new().configure(config).compile(&pattern)?),
        }
    }

    fn source(mut self, source: Source) -> Builder {
        if self.source.is_some() {
            self.conflict = true;
        } else {
            self.source = Some(source);
        }
        self
    }
}

fn state_named(nfa: &mut Nfa, name: &str) -> StateId {
    match nfa.state_id(name) {
        Some(state) => state,
        None => nfa.add_state(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fa_automata::FiniteAutomaton;

    fn definition() -> Definition {
        Definition {
            alphabet: vec!["0".to_string(), "1".to_string(), "e".to_string()],
            initial: "p".to_string(),
            finals: vec!["r".to_string()],
            transitions: vec![
                ("p".to_string(), "0".to_string(), "q".to_string()),
                ("q".to_string(), "1".to_string(), "r".to_string()),
                ("r".to_string(), "e".to_string(), "p".to_string()),
            ],
        }
    }

    #[test]
    fn builds_from_definition() {
        let nfa = Builder::new().definition(definition()).build().unwrap();
        assert_eq!(nfa.alphabet().len(), 2);
        assert_eq!(nfa.len(), 3);
        assert!(nfa.has_epsilon_moves());
        assert!(nfa.is_match("01"));
        assert!(nfa.is_match("0101"));
        assert!(!nfa.is_match("010"));
    }

    #[test]
    fn unknown_symbol_in_definition() {
        let mut definition = definition();
        definition.transitions.push(("p".to_string(), "2".to_string(), "p".to_string()));
        match Builder::new().definition(definition).build() {
            Err(Error::Automaton(fa_automata::Error::UnknownSymbol(symbol))) => assert_eq!(symbol, "2"),
            other => panic!("expected unknown symbol, got {:?}", other),
        }
    }

    #[test]
    fn exactly_one_source() {
        assert!(matches!(Builder::new().build(), Err(Error::MissingSource)));
        let builder = Builder::new().regex("a").grammar_text("a\nS\nS\n");
        assert!(matches!(builder.build(), Err(Error::ConflictingSources)));
    }

    #[test]
    fn missing_file() {
        let err = Builder::new().automaton_file("/nonexistent/automaton.txt").build();
        assert!(matches!(err, Err(Error::Io(_))));
    }

    #[test]
    fn regex_uses_configured_prefix() {
        let nfa = Builder::new().config(Config::new().state_prefix("r")).regex("a").build().unwrap();
        assert!(nfa.states().all(|state| !nfa.name(state).starts_with('q')));
    }
}
