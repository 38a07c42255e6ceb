// Parameterized program -> stack tests.  Each case runs a fresh interpreter over an
// in-memory script and compares the final data stack, bottom to top.

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

fn eval(program: &str) -> Vec<Cell> {
    let out = SharedBuffer::default();
    let err = SharedBuffer::default();
    let console = Console::with_streams(Box::new(out.clone()), Box::new(err.clone()));

    let mut interpreter = Interpreter::with_console(console);
    let mut source = Source::from_script(program);

    interpreter.run(&mut source);
    interpreter.stack().to_vec()
}

// Literals and arithmetic.
#[test_case("42", &[42]; "number")]
#[test_case("-17", &[-17]; "negative number")]
#[test_case("1 2 +", &[3]; "simple add")]
#[test_case("5 2 -", &[3]; "simple sub")]
#[test_case("3 4 *", &[12]; "simple mul")]
#[test_case("12 3 /", &[4]; "simple div")]
#[test_case("1 2 + 4 - 3 * -1 /", &[3]; "arithmetic chain")]
#[test_case("7 2 /", &[3]; "truncated quotient")]
#[test_case("-7 2 /", &[-4]; "floored quotient")]
#[test_case("5 0 /", &[0]; "division by zero yields zero")]
#[test_case("13 5 mod", &[3]; "simple mod")]
#[test_case("-13 5 mod", &[2]; "floored mod")]
#[test_case("5 0 mod", &[0]; "mod by zero yields zero")]
// Comparisons and bit operations.
#[test_case("1 2 < 1 2 > 1 2 = 1 1 =", &[-1, 0, 0, -1]; "comparison chain")]
#[test_case("2 2 =", &[-1]; "equal")]
#[test_case("6 3 and", &[2]; "bitwise and")]
#[test_case("6 3 or", &[7]; "bitwise or")]
#[test_case("6 3 xor", &[5]; "bitwise xor")]
#[test_case("0 invert", &[-1]; "invert false")]
#[test_case("-1 invert", &[0]; "invert true")]
#[test_case("1 invert", &[-2]; "invert number")]
// Stack manipulation.
#[test_case("42 dup", &[42, 42]; "dup")]
#[test_case("1 2 drop", &[1]; "drop")]
#[test_case("1 2 swap", &[2, 1]; "swap")]
#[test_case("1 2 over", &[1, 2, 1]; "over")]
#[test_case("1 2 3 rot", &[2, 3, 1]; "rot")]
// Underflowing operations leave the stack exactly as it was.
#[test_case("1 +", &[1]; "underflow leaves one operand")]
#[test_case("+", &[]; "underflow on empty stack")]
#[test_case("9 swap", &[9]; "swap underflow")]
#[test_case("1 2 rot", &[1, 2]; "rot underflow")]
#[test_case("dup", &[]; "dup underflow")]
#[test_case("5 !", &[5]; "store underflow")]
// Conditionals.
#[test_case("1 if 42 then", &[42]; "if taken")]
#[test_case("0 if 42 then", &[]; "if not taken")]
#[test_case("0 if 1 else 2 then", &[2]; "else taken")]
#[test_case("-1 if 1 else 2 then", &[1]; "else not taken")]
#[test_case("1 if 0 if 1 else 2 then else 3 then", &[2]; "nested if")]
// Counted loops.
#[test_case("3 0 do i loop", &[0, 1, 2]; "do loop pushes indices")]
#[test_case("0 5 0 do i + loop", &[10]; "do loop accumulates")]
#[test_case("0 3 0 do 2 0 do 1 + loop loop", &[6]; "nested do loops")]
#[test_case("2 2 do i loop", &[]; "empty do range")]
#[test_case("1 5 do i loop", &[]; "start beyond limit is rejected")]
#[test_case("0 -1 do i loop", &[]; "negative start is rejected")]
// Begin / until loops.
#[test_case("0 begin 1 + dup 5 = until", &[5]; "begin until counts up")]
#[test_case("begin 1 until", &[]; "begin until runs once")]
// Definitions.
#[test_case(": five 5 ; five", &[5]; "trivial definition")]
#[test_case(": double dup + ; 21 double", &[42]; "definition with body")]
#[test_case(": fac DUP 1 > IF DUP 1 - fac * ELSE DROP 1 THEN ; 5 fac", &[120]; "recursive factorial")]
#[test_case(": f 1 ; : f 2 ; f", &[2]; "redefinition wins")]
#[test_case(": SHOUT 3 ; shout", &[3]; "definitions fold case")]
#[test_case(": five\n5 ;\nfive", &[5]; "definition spans lines")]
// Variables, constants, and the heap.
#[test_case("VARIABLE X 100 X ! X @", &[100]; "variable round trip")]
#[test_case("variable x x", &[1000]; "first variable address")]
#[test_case("variable x variable y y", &[1001]; "addresses are sequential")]
#[test_case("variable x x @", &[0]; "unwritten cell reads zero")]
#[test_case("42 constant answer answer answer +", &[84]; "constant pushes value")]
#[test_case("variable arr 3 cells allot 99 arr 3 + ! arr 3 + @", &[99]; "allot extends the heap")]
#[test_case("variable x 5 1234 !", &[]; "store to bad address consumes its operands")]
// Unknown words halt the rest of the line.
#[test_case("1 2 bogus 3", &[1, 2]; "unknown word halts line")]
#[test_case("begin bogus until", &[]; "unknown word stops begin loop")]
#[test_case("3 0 do bogus loop 7", &[]; "unknown word stops do loop and line")]
// Stray terminators are reported but do not halt.
#[test_case("then 5", &[5]; "stray then")]
#[test_case("loop 5", &[5]; "stray loop")]
// Session control.
#[test_case("1 2\nquit\n3", &[1, 2]; "quit ends the session")]
#[test_case("4\nEXIT\n5", &[4]; "exit folds case")]
fn program_leaves_stack(program: &str, expected: &[Cell]) {
    assert_eq!(eval(program), expected);
}

#[test]
fn deep_recursion_computes() {
    let stack = eval(": sumto dup 1 > if dup 1 - sumto + then ; 100 sumto");
    assert_eq!(stack, &[5050]);
}

#[test]
fn body_sees_words_defined_later() {
    let stack = eval(": outer inner inner ; : inner 7 ; outer");
    assert_eq!(stack, &[7, 7]);
}
