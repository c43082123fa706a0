use crate::{Alphabet, Dfa, Error, Result};

const DIGITS: [&str; 16] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "A", "B", "C", "D", "E", "F"];

/// A DFA over the digits of `base` accepting the numerals, most significant
/// digit first, whose value is a multiple of `number`.
///
/// State `Si` means "the digits read so far are `i` modulo `number`".
/// Reading digit `d` moves to `S((i * base + d) mod number)`. `S0` is both
/// the start state and the only accepting state, so the empty numeral (zero)
/// is accepted. Digits above 9 are the upper-case letters `A` to `F`.
///
/// ```
/// use fa_automata::{multiples_of, FiniteAutomaton};
///
/// let five = multiples_of(5, 2).unwrap();
/// assert!(five.is_match("1010"));
/// assert!(!five.is_match("111"));
/// ```
pub fn multiples_of(number: u32, base: u32) -> Result<Dfa> {
    if number == 0 {
        return Err(Error::InvalidParameter("number must be positive".to_string()));
    }
    if !(2..=16).contains(&base) {
        return Err(Error::InvalidParameter(format!("base {} is outside 2..=16", base)));
    }

    let alphabet = Alphabet::new(&DIGITS[..base as usize])?;
    let mut dfa = Dfa::new(alphabet, "S0");
    for remainder in 1..number {
        dfa.add_state(&format!("S{}", remainder));
    }
    for remainder in 0..number {
        for digit in 0..base {
            let next = (u64::from(remainder) * u64::from(base) + u64::from(digit)) % u64::from(number);
            dfa.set_transition(remainder as usize, digit as usize, Some(next as usize));
        }
    }
    dfa.set_accepting(0, true);
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{minimize, Config, FiniteAutomaton};
    use quickcheck::quickcheck;

    fn numeral(mut value: u32, base: u32) -> String {
        if value == 0 {
            return "0".to_string();
        }
        let mut digits = Vec::new();
        while value > 0 {
            digits.push(DIGITS[(value % base) as usize]);
            value /= base;
        }
        digits.reverse();
        digits.concat()
    }

    #[test]
    fn invalid_parameters() {
        assert!(matches!(multiples_of(0, 2), Err(Error::InvalidParameter(_))));
        assert!(matches!(multiples_of(3, 1), Err(Error::InvalidParameter(_))));
        assert!(matches!(multiples_of(3, 17), Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn thirteen_in_hexadecimal() {
        let dfa = multiples_of(13, 16).unwrap();
        assert_eq!(dfa.len(), 13);
        assert!(dfa.is_complete());
        assert!(dfa.is_match(""));
        assert!(dfa.is_match("D"));
        assert!(dfa.is_match("1A"));
        assert!(!dfa.is_match("1B"));
    }

    #[test]
    fn coprime_base_is_already_minimal() {
        // 10 is invertible modulo 7, so no two remainders are equivalent
        let dfa = multiples_of(7, 10).unwrap();
        assert_eq!(minimize(&dfa, &Config::default()).len(), 7);
    }

    quickcheck! {
        fn agrees_with_arithmetic(value: u32, number: u8, base: u8) -> bool {
            let number = u32::from(number % 20) + 1;
            let base = u32::from(base % 15) + 2;
            let dfa = multiples_of(number, base).unwrap();
            dfa.is_match(&numeral(value, base)) == (value % number == 0)
        }
    }
}
