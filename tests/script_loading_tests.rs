// Tests for loading script files, both through the :: word and through the library call the
// command line uses.

use rforth::lang::source::Source;
use rforth::runtime::console::Console;
use rforth::runtime::data_structures::value::Cell;
use rforth::runtime::interpreter::Interpreter;
use std::cell::RefCell;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;

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

fn capturing_interpreter() -> (Interpreter, SharedBuffer, SharedBuffer) {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let console = Console::with_streams(Box::new(out.clone()), Box::new(err.clone()));

    (Interpreter::with_console(console), out, err)
}

fn write_script(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("rforth_{}_{}.fs", std::process::id(), name));
    fs::write(&path, contents).unwrap();

    path
}

fn run_program(interpreter: &mut Interpreter, program: &str) -> Vec<Cell> {
    let mut source = Source::from_script(program);
    interpreter.run(&mut source);

    interpreter.stack().to_vec()
}

#[test]
fn load_word_interprets_a_file_in_place() {
    let path = write_script("load_in_place", "3 4 +\n");
    let (mut interpreter, _, err) = capturing_interpreter();

    let stack = run_program(&mut interpreter, &format!("1 :: {} 2", path.display()));

    assert_eq!(err.text(), "");
    assert_eq!(stack, &[1, 7, 2]);

    let _ = fs::remove_file(path);
}

#[test]
fn loaded_definitions_persist_after_the_load() {
    let path = write_script("load_defs", ": triple dup dup + + ;\nvariable base 7 base !\n");
    let (mut interpreter, _, err) = capturing_interpreter();

    let stack = run_program(&mut interpreter, &format!(":: {}\nbase @ triple", path.display()));

    assert_eq!(err.text(), "");
    assert_eq!(stack, &[21]);

    let _ = fs::remove_file(path);
}

#[test]
fn load_method_matches_the_load_word() {
    let path = write_script("load_method", "10 20 +\n");
    let (mut interpreter, _, _) = capturing_interpreter();

    interpreter.load(path.to_str().unwrap()).unwrap();

    assert_eq!(interpreter.stack(), &[30]);

    let _ = fs::remove_file(path);
}

#[test]
fn missing_file_is_a_bad_load() {
    let (mut interpreter, _, err) = capturing_interpreter();

    let stack = run_program(&mut interpreter, ":: /no/such/file.fs");

    assert_eq!(stack, &[]);
    assert!(err.text().contains("[BAD LOAD]"));
    assert!(err.text().contains("File '/no/such/file.fs' not found"));
}

#[test]
fn quit_inside_a_loaded_file_ends_the_session() {
    let path = write_script("load_quit", "1 2\nquit\n3\n");
    let (mut interpreter, _, _) = capturing_interpreter();

    let stack = run_program(&mut interpreter, &format!(":: {}\n4", path.display()));

    // The file stops at quit and so does the session that loaded it.
    assert_eq!(stack, &[1, 2]);
    assert!(interpreter.exited());

    let _ = fs::remove_file(path);
}

#[test]
fn diagnostics_inside_a_load_do_not_end_the_load() {
    let path = write_script("load_diag", "bogus\n5\n");
    let (mut interpreter, _, err) = capturing_interpreter();

    let stack = run_program(&mut interpreter, &format!(":: {}", path.display()));

    assert!(err.text().contains("Unknown word 'bogus'"));
    assert_eq!(stack, &[5]);

    let _ = fs::remove_file(path);
}
