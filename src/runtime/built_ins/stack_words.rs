use crate::runtime::{error, interpreter::Interpreter};

/// Duplicate the top value on the data stack.
///
/// Signature: `value -- value value`
pub fn word_dup(interpreter: &mut Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(value);
    interpreter.push(value);

    Ok(())
}

/// Discard the top value on the data stack.
///
/// Signature: `value -- `
pub fn word_drop(interpreter: &mut Interpreter) -> error::Result<()> {
    let _ = interpreter.pop()?;

    Ok(())
}

/// Swap the top 2 values on the data stack.
///
/// Signature: `a b -- b a`
pub fn word_swap(interpreter: &mut Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Copy the second value over the top of the stack.
///
/// Signature: `a b -- a b a`
pub fn word_over(interpreter: &mut Interpreter) -> error::Result<()> {
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(a);
    interpreter.push(b);
    interpreter.push(a);

    Ok(())
}

/// Rotate the third value to the top of the stack.
///
/// Signature: `a b c -- b c a`
pub fn word_rot(interpreter: &mut Interpreter) -> error::Result<()> {
    let c = interpreter.pop()?;
    let b = interpreter.pop()?;
    let a = interpreter.pop()?;

    interpreter.push(b);
    interpreter.push(c);
    interpreter.push(a);

    Ok(())
}

/// Bitwise complement of the top value.
///
/// Signature: `value -- ~value`
pub fn word_invert(interpreter: &mut Interpreter) -> error::Result<()> {
    let value = interpreter.pop()?;

    interpreter.push(!value);
    Ok(())
}
