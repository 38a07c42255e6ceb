impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

use crate::runtime::{data_structures::value::Cell, error::ForthError};
use std::io::{stderr, stdout, Write};

/// ANSI escape for the red diagnostic tags.
const RED: &str = "\x1b[31m";

/// ANSI escape to restore the default color.
const RESET: &str = "\x1b[0m";

/// The output side of the interpreter.
///
/// Words that print values suppress their trailing newline so consecutive prints share a line,
/// which means somebody has to remember whether the cursor is sitting at the end of unfinished
/// output.  That somebody is this struct: every print site goes through here so the two pending
/// flags stay consistent, and diagnostics never run on the same line as ordinary output.
///
/// The streams are boxed writers so tests can capture everything through shared buffers.
pub struct Console {
    out: Box<dyn Write>,
    err: Box<dyn Write>,

    /// Set when output was printed without a trailing newline.
    pending_newline: bool,

    /// Set when the next printed value should be separated from the previous one by a space.
    pending_space: bool,
}

impl Console {
    /// Create a console over the process's standard output and error streams.
    pub fn new() -> Console {
        Console::with_streams(Box::new(stdout()), Box::new(stderr()))
    }

    /// Create a console over arbitrary writers.  Used by the tests to capture output.
    pub fn with_streams(out: Box<dyn Write>, err: Box<dyn Write>) -> Console {
        Console {
            out,
            err,
            pending_newline: false,
            pending_space: false,
        }
    }

    /// Print a cell value with no trailing newline, space separated from a preceding value.
    pub fn print_value(&mut self, value: Cell) {
        if self.pending_space {
            let _ = write!(self.out, " ");
        }

        let _ = write!(self.out, "{}", value);
        let _ = self.out.flush();

        self.pending_space = true;
        self.pending_newline = true;
    }

    /// Print a string literal exactly as written, with no trailing newline.
    pub fn print_text(&mut self, text: &str) {
        let _ = write!(self.out, "{}", text);
        let _ = self.out.flush();

        self.pending_newline = true;
        self.pending_space = false;
    }

    /// Print a newline and forget any pending output state.
    pub fn newline(&mut self) {
        let _ = writeln!(self.out);
        let _ = self.out.flush();

        self.pending_newline = false;
        self.pending_space = false;
    }

    /// Print the whole data stack, bottom to top, on a line of its own.
    pub fn print_stack(&mut self, values: &[Cell]) {
        if self.pending_newline {
            let _ = writeln!(self.out);
        }

        let rendered = values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<String>>()
            .join(", ");

        let _ = writeln!(self.out, "[{}]", rendered);
        let _ = self.out.flush();

        self.pending_newline = false;
        self.pending_space = false;
    }

    /// Finish the current input line: if a print left the cursor mid-line, complete the line.
    pub fn finish_line(&mut self) {
        if self.pending_newline {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
        }

        self.pending_newline = false;
        self.pending_space = false;
    }

    /// Report a diagnostic on the error channel with its tag in red.  If ordinary output is
    /// still mid-line the message is pushed onto a line of its own first.
    pub fn diagnostic(&mut self, error: &ForthError) {
        if self.pending_newline {
            let _ = writeln!(self.err);
            self.pending_newline = false;
        }

        let _ = writeln!(self.err, "{}{}{} {}", RED, error.tag(), RESET, error.message());
        let _ = self.err.flush();
    }
}
