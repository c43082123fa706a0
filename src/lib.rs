/*!
This crate builds finite automata and transforms them with a small algebra:
epsilon elimination, subset construction, minimization, complement, union,
concatenation, Kleene star and intersection.

The automaton engine itself lives in the `fa-automata` crate and is re-exported
here. This crate adds the ways of getting an automaton in and out:

* [`text`]: the table format, one row per state,
* [`grammar`]: unitary right-linear grammars,
* [`Builder`]: exactly one of a [`Definition`], a table, a grammar, a file
  holding either, or a regular expression.

# Example

```
use fa_algebra::{minimize, Builder, Config, FiniteAutomaton};

let config = Config::default();
let nfa = Builder::new().regex("(a|b)*abb").build()?;
let dfa = minimize(&nfa, &config);

assert_eq!(dfa.len(), 4);
assert!(dfa.is_match("babb"));
assert!(!dfa.is_match("abba"));
# Ok::<(), fa_algebra::Error>(())
```

# Crate features

* **logging** - Enables the `log` crate in the engine. Operations report state
  counts at the `debug` level and worklist steps at the `trace` level.
*/

#![deny(missing_debug_implementations)]

pub use fa_automata::{
    complement, concatenate, determinize, eliminate_epsilon, epsilon_closures,
    intersection, minimize, multiples_of, star, union, Alphabet, Compiler,
    Config, Dfa, FiniteAutomaton, Matcher, Nfa, StateId, SymbolId,
    RENAME_SUFFIX,
};

pub use crate::builder::{Builder, Definition};
pub use crate::error::Error;
pub use crate::grammar::{Grammar, Production, Rule};

mod builder;
mod error;
pub mod grammar;
pub mod text;

/// The result of loading or writing out an automaton
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
