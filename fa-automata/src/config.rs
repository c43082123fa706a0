/// Naming and notation knobs shared by every transformation.
///
/// None of these settings change the language an operation produces. They
/// only decide how synthesized states are named and which token stands for
/// an epsilon move when an automaton is written out as text.
///
/// ```
/// use fa_automata::Config;
///
/// let config = Config::new().sink_name("DEAD").dfa_prefix("D");
/// assert_eq!(config.get_sink_name(), "DEAD");
/// assert_eq!(config.get_epsilon(), "e");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    epsilon: String,
    sink_name: String,
    dfa_prefix: String,
    state_prefix: String,
    start_name: String,
    final_name: String,
}

impl Config {
    /// Return a new default configuration.
    pub fn new() -> Config {
        Config::default()
    }

    /// The token used for epsilon (null) moves in textual formats.
    pub fn epsilon(mut self, token: &str) -> Config {
        self.epsilon = token.to_string();
        self
    }

    /// The name given to the sink state inserted when completing a DFA.
    pub fn sink_name(mut self, name: &str) -> Config {
        self.sink_name = name.to_string();
        self
    }

    /// The prefix of states minted by subset construction. The n-th
    /// discovered subset is named `prefix + n`.
    pub fn dfa_prefix(mut self, prefix: &str) -> Config {
        self.dfa_prefix = prefix.to_string();
        self
    }

    /// The prefix of states created for regex atoms.
    pub fn state_prefix(mut self, prefix: &str) -> Config {
        self.state_prefix = prefix.to_string();
        self
    }

    /// The name of the fresh initial state added by union and Kleene star.
    pub fn start_name(mut self, name: &str) -> Config {
        self.start_name = name.to_string();
        self
    }

    /// The name of the fresh accepting state added by union, Kleene star and
    /// grammar loading.
    pub fn final_name(mut self, name: &str) -> Config {
        self.final_name = name.to_string();
        self
    }

    pub fn get_epsilon(&self) -> &str {
        &self.epsilon
    }

    pub fn get_sink_name(&self) -> &str {
        &self.sink_name
    }

    pub fn get_dfa_prefix(&self) -> &str {
        &self.dfa_prefix
    }

    pub fn get_state_prefix(&self) -> &str {
        &self.state_prefix
    }

    pub fn get_start_name(&self) -> &str {
        &self.start_name
    }

    pub fn get_final_name(&self) -> &str {
        &self.final_name
    }
}

impl Default for Config {
    fn default() -> Config {
        Config {
            epsilon: "e".to_string(),
            sink_name: "SINK".to_string(),
            dfa_prefix: "DFA".to_string(),
            state_prefix: "q".to_string(),
            start_name: "S".to_string(),
            final_name: "F".to_string(),
        }
    }
}
