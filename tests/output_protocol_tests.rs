// Tests for the text protocol: what lands on stdout, what lands on stderr, and how the
// pending-newline bookkeeping interleaves the two.

use rforth::lang::source::Source;
use rforth::runtime::console::Console;
use rforth::runtime::data_structures::value::Cell;
use rforth::runtime::interpreter::Interpreter;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use test_case::test_case;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).to_string()
    }
}

fn eval(program: &str) -> (Vec<Cell>, String, String) {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let console = Console::with_streams(Box::new(out.clone()), Box::new(err.clone()));

    let mut interpreter = Interpreter::with_console(console);
    let mut source = Source::from_script(program);

    interpreter.run(&mut source);
    (interpreter.stack().to_vec(), out.text(), err.text())
}

// Printed values share a line, separated by spaces; the line is finished for them.
#[test_case("1 .", "1\n"; "single value")]
#[test_case("1 . 2 . 3 .", "1 2 3\n"; "values share a line")]
#[test_case("1 . 2 . cr 3 .", "1 2\n3\n"; "cr breaks the line")]
#[test_case("1 .\n2 .", "1\n2\n"; "each input line is finished")]
#[test_case("65 emit", "54\n"; "emit prints the first digit's codepoint")]
#[test_case("1 . 65 emit", "1 54\n"; "emit spaces like dot")]
// The stack dump gets a line of its own.
#[test_case("dump", "[]\n"; "dump empty stack")]
#[test_case("1 2 3 dump", "[1, 2, 3]\n"; "dump bottom to top")]
#[test_case("4 5 6 . . DUMP .", "6 5\n[4]\n4\n"; "dump flushes pending output")]
// String literals print verbatim and reset the value spacing.
#[test_case(".\" Hello, world! \"", "Hello, world! \n"; "string literal")]
#[test_case(".\" x\" 5 .", "x5\n"; "no space after a string")]
#[test_case("3 0 DO .\" hi \" LOOP", "hi hi hi \n"; "string in a loop")]
#[test_case(".\" a ( b \" 1 .", "a ( b 1\n"; "comment-looking text stays literal")]
#[test_case("( ignore all of this ) 5 .", "5\n"; "comments print nothing")]
#[test_case(".\" one\ntwo\" cr", "one\ntwo\n"; "string spans lines verbatim")]
fn program_prints(program: &str, expected: &str) {
    let (_, out, _) = eval(program);
    assert_eq!(out, expected);
}

#[test]
fn quiet_programs_print_nothing() {
    let (stack, out, err) = eval("1 2 + 4 - 3 * -1 /");

    assert_eq!(stack, &[3]);
    assert_eq!(out, "");
    assert_eq!(err, "");
}

#[test]
fn unknown_word_is_reported_verbatim() {
    let (stack, out, err) = eval("NOTAWORD");

    assert_eq!(stack, &[]);
    assert_eq!(out, "");
    assert!(err.contains("[BAD WORD]"));
    assert!(err.contains("Unknown word 'NOTAWORD'"));
}

#[test]
fn underflow_reports_counts() {
    let (stack, _, err) = eval("1 +");

    assert_eq!(stack, &[1]);
    assert!(err.contains("[STACK UNDERFLOW]"));
    assert!(err.contains("'+' requires 2 value(s), but the stack only has 1"));
}

#[test]
fn diagnostic_after_pending_output_starts_a_fresh_line() {
    let (_, out, err) = eval("5 . bogus");

    // The value was printed without its newline, so the diagnostic supplies one on the error
    // channel before the tag.
    assert_eq!(out, "5");
    assert!(err.starts_with('\n'));
    assert!(err.contains("[BAD WORD]"));
}

#[test]
fn unterminated_string_is_a_syntax_error() {
    let (stack, out, err) = eval(".\" never closed");

    assert_eq!(stack, &[]);
    assert_eq!(out, "");
    assert!(err.contains("[SYNTAX]"));
    assert!(err.contains("No closing '\"' found"));
}

#[test]
fn unterminated_definition_is_a_syntax_error() {
    let (_, _, err) = eval(": broken 1 2 +");

    assert!(err.contains("[SYNTAX]"));
    assert!(err.contains("No closing ';' found"));
}

#[test]
fn stray_terminator_names_its_opener() {
    let (_, _, err) = eval("loop");
    assert!(err.contains("[SYNTAX]"));
    assert!(err.contains("'loop' with no opening 'do'"));

    let (_, _, err) = eval(";");
    assert!(err.contains("';' with no opening ':'"));
}

#[test]
fn bad_loop_bounds_are_reported() {
    let (stack, _, err) = eval("1 5 do i loop");

    assert_eq!(stack, &[]);
    assert!(err.contains("[BAD LOOP]"));
}

#[test]
fn redefining_a_variable_is_a_bad_def() {
    let (_, _, err) = eval("variable x variable x");

    assert!(err.contains("[BAD DEF]"));
    assert!(err.contains("'x' is already defined"));
}

#[test]
fn numeric_names_are_a_bad_def() {
    let (_, _, err) = eval(": 5 1 ;");
    assert!(err.contains("[BAD DEF]"));

    let (_, _, err) = eval("variable 12");
    assert!(err.contains("[BAD DEF]"));
}

#[test]
fn builtin_names_cannot_be_redefined() {
    let (_, _, err) = eval(": dup 1 ;");

    assert!(err.contains("[BAD DEF]"));
    assert!(err.contains("'dup' is already defined"));
}

#[test]
fn alphabetic_spellings_of_symbols_do_not_resolve() {
    // Only '+' is the word; its internal name is not.
    let (stack, _, err) = eval("1 2 add");

    assert_eq!(stack, &[1, 2]);
    assert!(err.contains("Unknown word 'add'"));
}

#[test]
fn bad_address_reports_the_address() {
    let (_, _, err) = eval("999 @");

    assert!(err.contains("[BAD ADDRESS]"));
    assert!(err.contains("999"));
}

#[test]
fn session_continues_after_diagnostics() {
    let (stack, out, err) = eval("bogus\n1 2 + .");

    assert!(err.contains("[BAD WORD]"));
    assert_eq!(out, "3\n");
    assert_eq!(stack, &[]);
}
