/*!
The automaton table format.

```text
a,b,e
q0
q0,{q1},{},{q2}
[q1],{q1},{q0},{}
q2,{},{q2},{}
```

Line 1 is the comma-separated alphabet, line 2 the initial state. Every
following line is one state: its name (in square brackets when accepting),
then one `{...}` set of destinations per alphabet column. `{}` is an
undefined move. If the alphabet line contains the configured epsilon marker,
that column holds epsilon moves. Blank lines after the header are ignored.

States that only appear as destinations, or only as the initial state, are
states without moves.
*/

use std::collections::HashSet;

use fa_automata::{Alphabet, Config, FiniteAutomaton, Nfa, StateId};

use crate::error::Error;

/// Parse an automaton table.
pub fn parse(text: &str, config: &Config) -> Result<Nfa, Error> {
    let mut lines = text.lines().enumerate().map(|(index, line)| (index + 1, line.trim()));

    let (_, header) = lines.next().ok_or_else(|| Error::syntax(1, "missing alphabet line"))?;
    let mut epsilon_column = None;
    let mut symbols = Vec::new();
    for (column, symbol) in split_list(header).into_iter().enumerate() {
        if symbol == config.get_epsilon() {
            if epsilon_column.is_some() {
                return Err(Error::syntax(1, "epsilon marker listed twice"));
            }
            epsilon_column = Some(column);
        } else {
            symbols.push(symbol);
        }
    }
    let columns = symbols.len() + usize::from(epsilon_column.is_some());
    let alphabet = Alphabet::new(&symbols).map_err(|err| Error::syntax(1, err.to_string()))?;

    let (_, initial) = lines.next().ok_or_else(|| Error::syntax(2, "missing initial state line"))?;
    if !is_valid_name(initial) {
        return Err(Error::syntax(2, format!("invalid initial state {:?}", initial)));
    }

    let mut nfa = Nfa::new(alphabet, initial);
    let mut seen_rows = HashSet::new();
    for (number, line) in lines.filter(|(_, line)| !line.is_empty()) {
        let row = parse_row(line).map_err(|message| Error::syntax(number, message))?;
        if row.sets.len() != columns {
            return Err(Error::syntax(
                number,
                format!("expected {} transition sets, found {}", columns, row.sets.len()),
            ));
        }
        if !seen_rows.insert(row.name) {
            return Err(Error::syntax(number, format!("state {:?} is defined twice", row.name)));
        }

        let state = state_named(&mut nfa, row.name);
        nfa.set_accepting(state, row.accepting);
        let mut symbol = 0;
        for (column, set) in row.sets.iter().enumerate() {
            for &target in set {
                if !is_valid_name(target) {
                    return Err(Error::syntax(number, format!("invalid state name {:?}", target)));
                }
                let target = state_named(&mut nfa, target);
                if Some(column) == epsilon_column {
                    nfa.add_epsilon(state, target);
                } else {
                    nfa.add_transition(state, symbol, target);
                }
            }
            if Some(column) != epsilon_column {
                symbol += 1;
            }
        }
    }
    Ok(nfa)
}

/// Render any automaton as a table that [`parse`] reads back.
///
/// The epsilon column is only written when the automaton has epsilon moves.
/// Fails when a symbol equals the epsilon marker or when a symbol or state
/// name contains characters the format uses as delimiters.
pub fn render<A: FiniteAutomaton>(automaton: &A, config: &Config) -> Result<String, Error> {
    let nfa = automaton.to_nfa();
    let epsilon = nfa.has_epsilon_moves();

    let mut header: Vec<&str> = Vec::with_capacity(nfa.alphabet().len() + 1);
    for symbol in nfa.alphabet().iter() {
        if symbol == config.get_epsilon() {
            return Err(Error::ReservedSymbol(symbol.to_string()));
        }
        if !is_valid_name(symbol) {
            return Err(Error::InvalidSymbol(symbol.to_string()));
        }
        header.push(symbol);
    }
    if epsilon {
        header.push(config.get_epsilon());
    }

    for state in nfa.states() {
        if !is_valid_name(nfa.name(state)) {
            return Err(Error::InvalidStateName(nfa.name(state).to_string()));
        }
    }

    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    out.push_str(nfa.name(nfa.start()));
    out.push('\n');

    for state in nfa.states() {
        if nfa.is_accepting(state) {
            out.push_str(&format!("[{}]", nfa.name(state)));
        } else {
            out.push_str(nfa.name(state));
        }
        for symbol in 0..nfa.alphabet().len() {
            push_set(&mut out, &nfa, nfa.targets(state, symbol).iter().copied());
        }
        if epsilon {
            push_set(&mut out, &nfa, nfa.epsilon_targets(state).iter().copied());
        }
        out.push('\n');
    }
    Ok(out)
}

struct Row<'a> {
    name: &'a str,
    accepting: bool,
    sets: Vec<Vec<&'a str>>,
}

fn parse_row(line: &str) -> Result<Row<'_>, String> {
    let (head, mut rest) = match line.find(',') {
        Some(index) => (line[..index].trim(), &line[index + 1..]),
        None => (line, ""),
    };

    let (name, accepting) = match head.strip_prefix('[') {
        Some(inner) => match inner.strip_suffix(']') {
            Some(name) => (name.trim(), true),
            None => return Err(format!("unterminated accepting marker in {:?}", head)),
        },
        None => (head, false),
    };
    if !is_valid_name(name) {
        return Err(format!("invalid state name {:?}", name));
    }

    let mut sets = Vec::new();
    loop {
        rest = rest.trim_start_matches(|ch: char| ch == ',' || ch.is_whitespace());
        if rest.is_empty() {
            break;
        }
        let Some(body) = rest.strip_prefix('{') else {
            return Err(format!("expected '{{' at {:?}", rest));
        };
        let Some(end) = body.find('}') else {
            return Err("unterminated '{'".to_string());
        };
        sets.push(split_list(&body[..end]));
        rest = &body[end + 1..];
    }
    Ok(Row { name, accepting, sets })
}

fn split_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).filter(|item| !item.is_empty()).collect()
}

fn state_named(nfa: &mut Nfa, name: &str) -> StateId {
    match nfa.state_id(name) {
        Some(state) => state,
        None => nfa.add_state(name),
    }
}

fn push_set(out: &mut String, nfa: &Nfa, targets: impl Iterator<Item = StateId>) {
    let names: Vec<&str> = targets.map(|target| nfa.name(target)).collect();
    out.push_str(",{");
    out.push_str(&names.join(","));
    out.push('}');
}

/// Names and symbols must survive the round trip through the table syntax.
pub(crate) fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|ch| ch.is_whitespace() || matches!(ch, ',' | '{' | '}' | '[' | ']' | '(' | ')'))
}
