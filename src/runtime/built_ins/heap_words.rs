use crate::{
    lang::cursor::TokenStream,
    runtime::{
        built_ins::{parse_literal, parse_name, resolve},
        data_structures::value::FALSE,
        error::{self, ForthError},
        interpreter::Interpreter,
    },
};

/// A VARIABLE or CONSTANT declaration, parsed from the name that follows the keyword.
///
/// The name is captured at parse time but validated at evaluation time, so a declaration
/// inside a definition body is checked each time the definition runs.
#[derive(Clone)]
pub struct DefineNode {
    name: Option<String>,
}

impl DefineNode {
    /// Capture the name following the keyword on the current line.
    pub fn parse(cursor: &mut dyn TokenStream) -> DefineNode {
        DefineNode {
            name: parse_name(cursor),
        }
    }

    /// Declare a variable: allocate one heap cell and bind the name to its address.
    pub fn eval_variable(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        let name = self.checked_name(interpreter, "variable")?;

        interpreter.heap_mut().create(&name);
        Ok(())
    }

    /// Declare a constant: pop the value beneath the declaration and bind the name to it.
    pub fn eval_constant(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        let name = self.checked_name(interpreter, "constant")?;

        interpreter.require("constant", 1)?;
        let value = interpreter.pop()?;

        interpreter.dictionary_mut().bind_constant(&name, value);
        Ok(())
    }

    /// Validate the captured name: it must exist, must not be a number, and must not already
    /// mean something else.
    fn checked_name(&self, interpreter: &Interpreter, what: &str) -> error::Result<String> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => return Err(ForthError::BadDef(format!("Missing name for {}", what))),
        };

        if parse_literal(&name).is_some() {
            return Err(ForthError::BadDef(format!(
                "Cannot name a {} '{}'",
                what, name
            )));
        }

        let taken = resolve(&name).is_some()
            || interpreter.heap().is_defined(&name)
            || interpreter.dictionary().is_constant(&name)
            || interpreter.dictionary().word(&name).is_some();

        if taken {
            return Err(ForthError::BadDef(format!("'{}' is already defined", name)));
        }

        Ok(name)
    }
}

/// Pop a cell count and advance the heap frontier by that many cells.
///
/// Signature: `n -- `
pub fn word_allot(interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.require("allot", 1)?;
    let count = interpreter.pop()?;

    if count > 0 {
        interpreter.heap_mut().allot(count as usize);
    }

    Ok(())
}

/// Scale a cell count to address units.  Addresses here count whole cells, so the count on
/// the stack is already right and the word does nothing.
///
/// Signature: `n -- n`
pub fn word_cells(_interpreter: &mut Interpreter) -> error::Result<()> {
    Ok(())
}

/// Pop an address and push the cell stored there.  An unwritten cell reads as 0.
///
/// Signature: `addr -- value`
pub fn word_fetch(interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.require("@", 1)?;
    let address = interpreter.pop()?;

    let value = interpreter.heap().fetch(address)?;
    interpreter.push(value.unwrap_or(FALSE));

    Ok(())
}

/// Pop an address, then a value, and store the value at the address.
///
/// Signature: `value addr -- `
pub fn word_store(interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.require("!", 2)?;
    let address = interpreter.pop()?;
    let value = interpreter.pop()?;

    interpreter.heap_mut().store(address, value)
}
