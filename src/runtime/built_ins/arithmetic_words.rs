use crate::runtime::{
    data_structures::value::{truth, Cell},
    error,
    interpreter::Interpreter,
};

/// Floored integer division.  The quotient rounds toward negative infinity, and dividing by
/// zero quietly yields zero instead of aborting the program.
fn floored_div(lhs: Cell, rhs: Cell) -> Cell {
    if rhs == 0 {
        return 0;
    }

    let quotient = lhs.wrapping_div(rhs);

    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        quotient - 1
    } else {
        quotient
    }
}

/// Floored remainder: takes the sign of the divisor.  Zero divisor yields zero.
fn floored_mod(lhs: Cell, rhs: Cell) -> Cell {
    if rhs == 0 {
        return 0;
    }

    let remainder = lhs.wrapping_rem(rhs);

    if remainder != 0 && (remainder < 0) != (rhs < 0) {
        remainder + rhs
    } else {
        remainder
    }
}

/// Add the top two values.
///
/// Signature: `a b -- a+b`
pub fn word_add(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs.wrapping_add(rhs));
    Ok(())
}

/// Subtract the top value from the one beneath it.
///
/// Signature: `a b -- a-b`
pub fn word_sub(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs.wrapping_sub(rhs));
    Ok(())
}

/// Multiply the top two values.
///
/// Signature: `a b -- a*b`
pub fn word_mul(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs.wrapping_mul(rhs));
    Ok(())
}

/// Divide the second value by the top value.
///
/// Signature: `a b -- a/b`
pub fn word_div(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(floored_div(lhs, rhs));
    Ok(())
}

/// Remainder of dividing the second value by the top value.
///
/// Signature: `a b -- a%b`
pub fn word_mod(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(floored_mod(lhs, rhs));
    Ok(())
}

/// Bitwise and of the top two values.
///
/// Signature: `a b -- a&b`
pub fn word_and(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs & rhs);
    Ok(())
}

/// Bitwise or of the top two values.
///
/// Signature: `a b -- a|b`
pub fn word_or(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs | rhs);
    Ok(())
}

/// Bitwise exclusive or of the top two values.
///
/// Signature: `a b -- a^b`
pub fn word_xor(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(lhs ^ rhs);
    Ok(())
}

/// Compare the top two values for equality.
///
/// Signature: `a b -- flag`
pub fn word_equal(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(truth(lhs == rhs));
    Ok(())
}

/// Is the second value less than the top value?
///
/// Signature: `a b -- flag`
pub fn word_lesser(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(truth(lhs < rhs));
    Ok(())
}

/// Is the second value greater than the top value?
///
/// Signature: `a b -- flag`
pub fn word_greater(interpreter: &mut Interpreter) -> error::Result<()> {
    let (lhs, rhs) = interpreter.pop_pair()?;

    interpreter.push(truth(lhs > rhs));
    Ok(())
}
