use crate::{
    combinator::{concatenate, star, union},
    Alphabet, Config, Error, Nfa, Result,
};

/// A lexical element of a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Symbol(char),
    Union,
    Star,
    Plus,
    /// Implicit concatenation, made explicit before conversion to postfix
    Concat,
    Open,
    Close,
}

impl Token {
    /// Binding strength of a binary operator
    fn precedence(self) -> u8 {
        match self {
            Token::Union => 2,
            Token::Concat => 3,
            Token::Star | Token::Plus => 4,
            Token::Symbol(_) | Token::Open | Token::Close => 0,
        }
    }
}

/// A token and the (char) offset in the pattern where it came from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Spanned {
    token: Token,
    position: usize,
}

/// Compiler that converts an infix regular expression to an NFA
///
/// Supported syntax: single-character symbols, union `|`, Kleene star `*`,
/// Kleene plus `+` and parentheses. A backslash makes the next character a
/// plain symbol, so `\*` matches a literal star.
///
/// The pattern goes through four passes: `r+` is rewritten to `rr*`,
/// concatenation is made explicit, the infix token stream is reordered to
/// postfix with the shunting-yard algorithm, and the postfix stream is
/// evaluated on a stack of automata using the closure operations.
///
/// ```
/// use fa_automata::{Compiler, FiniteAutomaton};
///
/// let nfa = Compiler::new().compile("ab*|c").unwrap();
/// assert!(nfa.is_match("abbb"));
/// assert!(nfa.is_match("c"));
/// assert!(!nfa.is_match("ac"));
/// ```
#[derive(Clone, Debug)]
pub struct Compiler {
    config: Config,
    next_state: usize,
}

impl Compiler {
    /// Create a new compiler
    pub fn new() -> Self {
        Self { config: Config::default(), next_state: 0 }
    }

    /// Use `config` to name the states of compiled automata
    pub fn configure(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Compile `pattern` into an NFA with epsilon moves
    pub fn compile(&mut self, pattern: &str) -> Result<Nfa> {
        let tokens = tokenize(pattern)?;
        if tokens.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let tokens = insert_concatenation(&expand_plus(&tokens)?);
        let postfix = to_postfix(&tokens)?;
        debug!("postfix form of {:?}: {:?}", pattern, postfix);
        self.evaluate(&postfix)
    }

    /// Build the automaton bottom-up from a postfix token stream
    fn evaluate(&mut self, postfix: &[Spanned]) -> Result<Nfa> {
        let mut stack: Vec<Nfa> = Vec::new();

        for &Spanned { token, position } in postfix {
            let missing = || Error::MissingOperand { position };
            match token {
                Token::Symbol(symbol) => {
                    let atom = self.compile_symbol(symbol);
                    stack.push(atom);
                }
                Token::Star => {
                    let operand = stack.pop().ok_or_else(missing)?;
                    stack.push(star(&operand, &self.config));
                }
                Token::Union | Token::Concat => {
                    let right = stack.pop().ok_or_else(missing)?;
                    let left = stack.pop().ok_or_else(missing)?;
                    let combined = if token == Token::Union {
                        union(&left, &right, &self.config)
                    } else {
                        concatenate(&left, &right)
                    };
                    stack.push(combined);
                }
                Token::Plus | Token::Open | Token::Close => {
                    return Err(Error::Internal(format!("unexpected {:?} in postfix form", token)));
                }
            }
        }

        let nfa = stack.pop().ok_or(Error::EmptyPattern)?;
        if !stack.is_empty() {
            return Err(Error::Internal(format!("{} automata left after evaluation", stack.len() + 1)));
        }
        Ok(nfa)
    }

    /// Compile a single symbol: `start --symbol--> end`
    fn compile_symbol(&mut self, symbol: char) -> Nfa {
        let prefix = self.config.get_state_prefix();
        let start = format!("{}{}", prefix, self.next_state);
        let end = format!("{}{}", prefix, self.next_state + 1);
        self.next_state += 2;

        let alphabet = Alphabet::new([symbol.to_string()]).unwrap_or_default();
        let mut nfa = Nfa::new(alphabet, &start);
        let end = nfa.add_state(&end);
        nfa.add_transition(nfa.start(), 0, end);
        nfa.set_accepting(end, true);
        nfa
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Spanned>> {
    let mut tokens = Vec::new();
    let mut chars = pattern.chars().enumerate();

    while let Some((position, ch)) = chars.next() {
        let token = match ch {
            '|' => Token::Union,
            '*' => Token::Star,
            '+' => Token::Plus,
            '(' => Token::Open,
            ')' => Token::Close,
            '\\' => match chars.next() {
                Some((_, escaped)) => Token::Symbol(escaped),
                None => return Err(Error::DanglingEscape { position }),
            },
            _ => Token::Symbol(ch),
        };
        tokens.push(Spanned { token, position });
    }
    Ok(tokens)
}

/// Rewrite every `r+` as `rr*`, where `r` is the symbol or parenthesized
/// group (with any stars applied to it) right before the `+`.
fn expand_plus(tokens: &[Spanned]) -> Result<Vec<Spanned>> {
    let mut out: Vec<Spanned> = Vec::with_capacity(tokens.len());

    for &spanned in tokens {
        if spanned.token != Token::Plus {
            out.push(spanned);
            continue;
        }
        let start = operand_start(&out, spanned.position)?;
        let operand = out[start..].to_vec();
        out.extend(operand);
        out.push(Spanned { token: Token::Star, position: spanned.position });
    }
    Ok(out)
}

/// Index in `tokens` where the operand ending at the last token begins.
fn operand_start(tokens: &[Spanned], position: usize) -> Result<usize> {
    let mut end = tokens.len();
    while end > 0 && tokens[end - 1].token == Token::Star {
        end -= 1;
    }
    let Some(last) = end.checked_sub(1) else {
        return Err(Error::MissingOperand { position });
    };

    match tokens[last].token {
        Token::Symbol(_) => Ok(last),
        Token::Close => {
            let mut depth = 0usize;
            for index in (0..end).rev() {
                match tokens[index].token {
                    Token::Close => depth += 1,
                    Token::Open => {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(index);
                        }
                    }
                    _ => {}
                }
            }
            Err(Error::UnbalancedParenthesis { position: tokens[last].position })
        }
        _ => Err(Error::MissingOperand { position }),
    }
}

/// Insert `Concat` between two tokens that are implicitly concatenated:
/// anything that ends an operand followed by anything that starts one.
fn insert_concatenation(tokens: &[Spanned]) -> Vec<Spanned> {
    let mut out: Vec<Spanned> = Vec::with_capacity(tokens.len() * 2);

    for &spanned in tokens {
        if let Some(previous) = out.last() {
            let ends_operand = matches!(previous.token, Token::Symbol(_) | Token::Close | Token::Star);
            let starts_operand = matches!(spanned.token, Token::Symbol(_) | Token::Open);
            if ends_operand && starts_operand {
                out.push(Spanned { token: Token::Concat, position: spanned.position });
            }
        }
        out.push(spanned);
    }
    out
}

/// Shunting-yard conversion of the infix token stream to postfix.
fn to_postfix(tokens: &[Spanned]) -> Result<Vec<Spanned>> {
    let mut output: Vec<Spanned> = Vec::with_capacity(tokens.len());
    let mut operators: Vec<Spanned> = Vec::new();

    for &spanned in tokens {
        match spanned.token {
            Token::Symbol(_) => output.push(spanned),
            // postfix and binds tightest: emit right away
            Token::Star | Token::Plus => output.push(spanned),
            Token::Union | Token::Concat => {
                while let Some(&top) = operators.last() {
                    if top.token == Token::Open || top.token.precedence() < spanned.token.precedence() {
                        break;
                    }
                    output.push(top);
                    operators.pop();
                }
                operators.push(spanned);
            }
            Token::Open => operators.push(spanned),
            Token::Close => loop {
                match operators.pop() {
                    Some(Spanned { token: Token::Open, .. }) => break,
                    Some(operator) => output.push(operator),
                    None => return Err(Error::UnbalancedParenthesis { position: spanned.position }),
                }
            },
        }
    }

    while let Some(operator) = operators.pop() {
        if operator.token == Token::Open {
            return Err(Error::UnbalancedParenthesis { position: operator.position });
        }
        output.push(operator);
    }
    Ok(output)
}
