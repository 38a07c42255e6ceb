impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

use crate::{
    lang::{
        cursor::{BodyCursor, LineCursor, TokenStream},
        source::Source,
    },
    runtime::{
        built_ins::{self, BodyElement, ForthWord},
        console::Console,
        data_structures::{dictionary::Dictionary, heap::Heap, value::Cell},
        error::{self, ForthError},
    },
};

/// The interpreter: the data stack, the heap, the dictionary, and the output state, plus the
/// loop that feeds tokens through all of them.
///
/// Input is not owned here.  The run loop borrows whatever source it is currently reading,
/// which is how load can push a file session in the middle of a terminal session and give the
/// terminal back afterwards.
pub struct Interpreter {
    stack: Vec<Cell>,
    heap: Heap,
    dictionary: Dictionary,
    console: Console,

    /// Set once quit or exit is read; every run loop on the way out checks it.
    exited: bool,
}

impl Interpreter {
    /// Create an interpreter writing to the process's standard streams.
    pub fn new() -> Interpreter {
        Interpreter::with_console(Console::new())
    }

    /// Create an interpreter writing to the given console.  Used by the tests to capture
    /// everything the interpreter prints.
    pub fn with_console(console: Console) -> Interpreter {
        Interpreter {
            stack: Vec::new(),
            heap: Heap::new(),
            dictionary: Dictionary::new(),
            console,
            exited: false,
        }
    }

    /// The data stack, bottom to top.
    pub fn stack(&self) -> &[Cell] {
        &self.stack
    }

    /// Push a value onto the data stack.
    pub fn push(&mut self, value: Cell) {
        self.stack.push(value);
    }

    /// Pop the top of the data stack.  Callers check arity with `require` first, so a failed
    /// pop here means an operation miscounted its own inputs.
    pub fn pop(&mut self) -> error::Result<Cell> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => Err(ForthError::StackUnderflow {
                word: "pop".to_string(),
                needed: 1,
                available: 0,
            }),
        }
    }

    /// Pop the top two values as (second, top), the order binary operations apply them in.
    pub fn pop_pair(&mut self) -> error::Result<(Cell, Cell)> {
        let rhs = self.pop()?;
        let lhs = self.pop()?;

        Ok((lhs, rhs))
    }

    /// Verify the stack holds at least `needed` values before anything is popped, so an
    /// operation that cannot run leaves the stack exactly as it was.
    pub fn require(&self, word: &str, needed: usize) -> error::Result<()> {
        if self.stack.len() < needed {
            return Err(ForthError::StackUnderflow {
                word: word.to_string(),
                needed,
                available: self.stack.len(),
            });
        }

        Ok(())
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    pub fn heap_mut(&mut self) -> &mut Heap {
        &mut self.heap
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn console(&mut self) -> &mut Console {
        &mut self.console
    }

    /// Print the data stack on its own line.
    pub fn dump_stack(&mut self) {
        self.console.print_stack(&self.stack);
    }

    /// Has quit or exit been read?
    pub fn exited(&self) -> bool {
        self.exited
    }

    /// The main loop: read lines from the source and interpret them until the source runs
    /// out or the user quits.  Each finished line gets its closing newline if printed output
    /// is still pending.
    pub fn run(&mut self, source: &mut Source) {
        while !self.exited {
            let line = match source.read_line(true) {
                Some(line) => line,
                None => break,
            };

            if is_exit_request(&line) {
                self.exited = true;
                break;
            }

            let mut cursor = LineCursor::new(line, source);
            let _ = self.interpret(&mut cursor);

            self.console.finish_line();
        }
    }

    /// Interpret every token the cursor yields.  Returns false if an unknown word halted the
    /// line; all other diagnostics are reported and skipped over.
    pub fn interpret(&mut self, cursor: &mut dyn TokenStream) -> bool {
        while let Some(element) = cursor.next_token() {
            let result = match element {
                BodyElement::Parsed(node) => node.eval(self),
                BodyElement::Raw(word) => self.interpret_word(&word, cursor),
            };

            if let Err(error) = result {
                if !error.is_silent() {
                    self.console.diagnostic(&error);
                }

                if error.halts() {
                    return false;
                }
            }

            if self.exited {
                break;
            }
        }

        true
    }

    /// Dispatch one written word.
    ///
    /// Built-ins win, then user words, then the value interpretations: a number pushes
    /// itself, a variable pushes its address, a constant pushes its value.  A terminator with
    /// no opener gets a syntax diagnostic; anything left is unknown and halts the line.
    fn interpret_word(&mut self, word: &str, cursor: &mut dyn TokenStream) -> error::Result<()> {
        if let Some(kind) = built_ins::resolve(word) {
            let node = ForthWord::parse(kind, cursor);
            return node.eval(self);
        }

        if let Some(body) = self.dictionary.word(word).cloned() {
            if !self.interpret(&mut BodyCursor::new(&body)) {
                return Err(ForthError::Halted);
            }

            return Ok(());
        }

        if let Some(value) = built_ins::parse_literal(word) {
            self.push(value);
            return Ok(());
        }

        if let Some(address) = self.heap.address_of(word) {
            self.push(address);
            return Ok(());
        }

        if let Some(value) = self.dictionary.constant(word) {
            self.push(value);
            return Ok(());
        }

        if let Some(opener) = built_ins::unmatched_opener(word) {
            return Err(ForthError::Syntax(format!(
                "'{}' with no opening '{}'",
                word, opener
            )));
        }

        Err(ForthError::BadWord(word.to_string()))
    }

    /// Interpret a whole file in place.  The current source is untouched; the file gets its
    /// own run loop and is closed again when that loop finishes, diagnostics or not.
    pub fn load(&mut self, path: &str) -> error::Result<()> {
        let mut source = match Source::from_file(path) {
            Ok(source) => source,
            Err(_) => return Err(ForthError::BadLoad(path.to_string())),
        };

        self.run(&mut source);
        Ok(())
    }
}

/// Does this line ask the session to end?  Only a line holding nothing else counts.
fn is_exit_request(line: &str) -> bool {
    let trimmed = line.trim();

    trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit")
}
