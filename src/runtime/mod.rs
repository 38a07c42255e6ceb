/// Every word the interpreter knows natively, plus the resolver that maps written words onto
/// them.
pub mod built_ins;

/// The output side: pending-newline bookkeeping, value printing, and diagnostics.
pub mod console;

/// The data stack cell, the heap, and the dictionary.
pub mod data_structures;

/// The diagnostic type and result alias used throughout the runtime.
pub mod error;

/// The interpreter itself.
pub mod interpreter;
