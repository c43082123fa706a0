//! Finite Automaton Algebra
//!
//! This library represents finite automata over an alphabet of opaque symbols
//! and implements a closed set of transformations on them:
//! - Epsilon elimination (NFAe to NFA)
//! - Subset construction (NFA to DFA)
//! - Minimization by table filling
//! - Complement, union, concatenation, Kleene star and intersection
//! - Compilation of regular expressions with `|`, `*`, `+` and parentheses
//!
//! Every transformation borrows its operands and returns a new automaton.
//! States are indices into a per-automaton arena; names are kept only for
//! display and are made unique by appending `'` when automata are combined.

#[macro_use]
mod macros;

mod alphabet;
mod automaton;
mod combinator;
pub mod compiler;
mod config;
mod determinize;
mod dfa;
mod divisibility;
mod epsilon;
mod intersection;
pub mod matcher;
mod minimize;
mod nfa;
mod state;

pub use alphabet::{Alphabet, SymbolId};
pub use automaton::FiniteAutomaton;
pub use combinator::{complement, concatenate, star, union};
pub use compiler::Compiler;
pub use config::Config;
pub use determinize::determinize;
pub use dfa::Dfa;
pub use divisibility::multiples_of;
pub use epsilon::{eliminate_epsilon, epsilon_closures};
pub use intersection::intersection;
pub use matcher::Matcher;
pub use minimize::minimize;
pub use nfa::Nfa;
pub use state::{StateId, RENAME_SUFFIX};

/// The result of an automaton operation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or converting automata
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A parenthesis without its partner, at this char offset of the pattern
    UnbalancedParenthesis { position: usize },
    /// An operator at this char offset has too few operands
    MissingOperand { position: usize },
    /// A backslash at the very end of the pattern
    DanglingEscape { position: usize },
    /// The pattern describes no automaton at all
    EmptyPattern,
    /// A symbol appears twice in one alphabet
    DuplicateSymbol(String),
    /// A symbol outside the alphabet
    UnknownSymbol(String),
    /// The named state has an epsilon move or several targets for a symbol
    NotDeterministic { state: String },
    /// An argument outside its documented range
    InvalidParameter(String),
    /// Internal invariant violation
    Internal(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnbalancedParenthesis { position } => {
                write!(f, "unbalanced parenthesis at offset {}", position)
            }
            Error::MissingOperand { position } => {
                write!(f, "operator at offset {} is missing an operand", position)
            }
            Error::DanglingEscape { position } => {
                write!(f, "escape at offset {} has nothing to escape", position)
            }
            Error::EmptyPattern => write!(f, "pattern is empty"),
            Error::DuplicateSymbol(symbol) => write!(f, "duplicate symbol: {}", symbol),
            Error::UnknownSymbol(symbol) => write!(f, "symbol not in alphabet: {}", symbol),
            Error::NotDeterministic { state } => write!(f, "state {} is not deterministic", state),
            Error::InvalidParameter(msg) => write!(f, "invalid parameter: {}", msg),
            Error::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
