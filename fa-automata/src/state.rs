use indexmap::IndexSet;

/// A state ID: an index into the state arena of one automaton.
pub type StateId = usize;

/// Appended to a state name until it no longer collides.
pub const RENAME_SUFFIX: char = '\'';

/// The display-name table of a state arena.
///
/// State identity is the arena index. Names only exist for rendering, but
/// they are kept unique within one automaton so that a rendering can be read
/// back. A colliding name gets [`RENAME_SUFFIX`] appended until it is free.
/// States are always inserted in arena order, so renaming is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct StateNames {
    names: IndexSet<String>,
}

impl StateNames {
    pub(crate) fn insert(&mut self, name: &str) -> StateId {
        let mut candidate = name.to_string();
        while self.names.contains(&candidate) {
            candidate.push(RENAME_SUFFIX);
        }
        self.names.insert_full(candidate).0
    }

    pub(crate) fn name(&self, id: StateId) -> &str {
        &self.names[id]
    }

    pub(crate) fn id(&self, name: &str) -> Option<StateId> {
        self.names.get_index_of(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.names.len()
    }
}
