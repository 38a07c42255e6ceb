impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

use crate::runtime::{built_ins::Body, data_structures::value::Cell};
use std::collections::HashMap;

/// The dictionary of user definitions known to the interpreter.
///
/// User words are stored as bodies, ordered lists of raw tokens and pre-parsed nodes that are
/// re-interpreted on every invocation.  Named constants live here as well.  All names are case
/// folded before they are stored or looked up.
pub struct Dictionary {
    /// User word bodies by folded name.
    words: HashMap<String, Body>,

    /// Named constants by folded name.
    constants: HashMap<String, Cell>,
}

impl Dictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Dictionary {
        Dictionary {
            words: HashMap::new(),
            constants: HashMap::new(),
        }
    }

    /// Look up a user word's body by name.
    pub fn word(&self, name: &str) -> Option<&Body> {
        self.words.get(&name.to_ascii_lowercase())
    }

    /// Bind a user word to its body.  Rebinding an existing user word simply replaces the old
    /// body, the collision rules against built-ins, variables, and constants are enforced by
    /// the definition word itself.
    pub fn bind_word(&mut self, name: &str, body: Body) {
        let _ = self.words.insert(name.to_ascii_lowercase(), body);
    }

    /// Look up a constant's value by name.
    pub fn constant(&self, name: &str) -> Option<Cell> {
        self.constants.get(&name.to_ascii_lowercase()).copied()
    }

    /// Is the given name bound as a constant?
    pub fn is_constant(&self, name: &str) -> bool {
        self.constants.contains_key(&name.to_ascii_lowercase())
    }

    /// Bind a constant to its value.
    pub fn bind_constant(&mut self, name: &str, value: Cell) {
        let _ = self.constants.insert(name.to_ascii_lowercase(), value);
    }
}
