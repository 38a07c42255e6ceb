use crate::runtime::{error, interpreter::Interpreter};

/// Pop the top value and print it, with no trailing newline.
///
/// Signature: `value -- `
pub fn word_dot(interpreter: &mut Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.console().print_value(value);
    Ok(())
}

/// Pop the top value and print the codepoint of the first character of its decimal form.
///
/// So `65 emit` prints 54, the codepoint of '6'.  Nonstandard, but it is the behavior user
/// programs of this interpreter already depend on.
///
/// Signature: `value -- `
pub fn word_emit(interpreter: &mut Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    let rendered = value.to_string();
    let codepoint = match rendered.chars().next() {
        Some(first) => first as u32 as i64,
        None => 0,
    };

    interpreter.console().print_value(codepoint);
    Ok(())
}

/// Print a newline.
///
/// Signature: ` -- `
pub fn word_cr(interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.console().newline();
    Ok(())
}

/// Print the entire data stack, bottom to top, without disturbing it.
///
/// Signature: ` -- `
pub fn word_dump(interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.dump_stack();
    Ok(())
}
