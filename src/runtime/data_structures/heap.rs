impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

use crate::runtime::{
    data_structures::value::Cell,
    error::{self, ForthError},
};
use std::collections::HashMap;

/// The first valid heap address.  User programs compute with raw addresses, so this base is a
/// stable part of the external contract.
pub const HEAP_BASE: Cell = 1000;

/// A linear, cell-addressable store with a name to address map for variables.
///
/// Cells are allocated one at a time by `create` or in bulk by `allot`.  The frontier is the
/// first unallocated address; anything below the base or at or beyond the frontier is invalid.
/// Allocated cells start out unwritten, and reads report them as `None` so the caller can
/// decide what an uninitialized fetch means.
pub struct Heap {
    /// The allocated cells, in address order starting at the base.
    cells: Vec<Option<Cell>>,

    /// Variable names (case folded) bound to their addresses.
    names: HashMap<String, Cell>,
}

impl Heap {
    /// Create a new heap with no allocated cells.
    pub fn new() -> Heap {
        Heap {
            cells: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// The first unallocated address.
    pub fn frontier(&self) -> Cell {
        HEAP_BASE + self.cells.len() as Cell
    }

    /// Allocate one cell and bind the given name to its address.  The new address is returned.
    ///
    /// Collision checks are the caller's job, a name that is already bound stays bound to its
    /// original address.
    pub fn create(&mut self, name: &str) -> Cell {
        let address = self.frontier();

        self.cells.push(None);
        self.names.entry(name.to_ascii_lowercase()).or_insert(address);

        address
    }

    /// Advance the frontier by the given number of cells without binding a name.
    pub fn allot(&mut self, count: usize) {
        self.cells.resize(self.cells.len() + count, None);
    }

    /// Look up the address a variable name is bound to.
    pub fn address_of(&self, name: &str) -> Option<Cell> {
        self.names.get(&name.to_ascii_lowercase()).copied()
    }

    /// Is the given name bound to a heap address?
    pub fn is_defined(&self, name: &str) -> bool {
        self.names.contains_key(&name.to_ascii_lowercase())
    }

    /// Read the cell at the given address.  Unwritten cells read as `None`.
    pub fn fetch(&self, address: Cell) -> error::Result<Option<Cell>> {
        let index = self.index_of(address)?;
        Ok(self.cells[index])
    }

    /// Write a value into the cell at the given address.
    pub fn store(&mut self, address: Cell, value: Cell) -> error::Result<()> {
        let index = self.index_of(address)?;
        self.cells[index] = Some(value);

        Ok(())
    }

    /// Translate an address into an index into the cell list, rejecting anything outside the
    /// allocated range.
    fn index_of(&self, address: Cell) -> error::Result<usize> {
        if address < HEAP_BASE || address >= self.frontier() {
            return Err(ForthError::BadAddress(address));
        }

        Ok((address - HEAP_BASE) as usize)
    }
}
