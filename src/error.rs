use std::fmt;

/// An error that occurred while loading or writing out an automaton.
#[derive(Debug)]
pub enum Error {
    /// Malformed automaton or grammar text. `line` is 1-based.
    Syntax { line: usize, message: String },
    /// Reading a source file failed.
    Io(std::io::Error),
    /// The engine rejected the input (regex syntax, duplicate symbols, ...).
    Automaton(fa_automata::Error),
    /// A symbol collides with the configured epsilon marker.
    ReservedSymbol(String),
    /// A symbol that the text formats cannot represent.
    InvalidSymbol(String),
    /// A state name that the text formats cannot represent.
    InvalidStateName(String),
    /// More than one construction source was given to a builder.
    ConflictingSources,
    /// No construction source was given to a builder.
    MissingSource,
}

impl Error {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Error {
        Error::Syntax { line, message: message.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Syntax { line, message } => write!(f, "line {}: {}", line, message),
            Error::Io(err) => write!(f, "failed to read automaton source: {}", err),
            Error::Automaton(err) => write!(f, "{}", err),
            Error::ReservedSymbol(symbol) => {
                write!(f, "symbol {:?} is reserved for epsilon moves", symbol)
            }
            Error::InvalidSymbol(symbol) => write!(f, "symbol {:?} cannot be written out", symbol),
            Error::InvalidStateName(name) => write!(f, "state name {:?} cannot be written out", name),
            Error::ConflictingSources => write!(f, "more than one automaton source was given"),
            Error::MissingSource => write!(f, "no automaton source was given"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Automaton(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<fa_automata::Error> for Error {
    fn from(err: fa_automata::Error) -> Error {
        Error::Automaton(err)
    }
}
