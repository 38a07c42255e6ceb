/// Module for input sources and the parse cursors fed by them.
pub mod lang;

/// Module for the runtime: the words, the data structures they act on, and the interpreter
/// that drives them.
pub mod runtime;
