use crate::{
    lang::cursor::TokenStream,
    runtime::{
        built_ins::{parse_body, parse_literal, parse_name, resolve, Body},
        error::{self, ForthError},
        interpreter::Interpreter,
    },
};

/// A `:` definition: a name followed by a body, closed by `;`.
///
/// The body keeps plain words as raw lowercase strings resolved at call time, which is what
/// lets a definition refer to words that do not exist yet, itself included.  Structured
/// constructs inside the body are parsed into nodes up front so their terminators nest
/// properly against the closing `;`.
#[derive(Clone)]
pub struct WordDefNode {
    name: Option<String>,
    body: Body,
    good: bool,
}

impl WordDefNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> WordDefNode {
        let name = parse_name(cursor);

        match parse_body(cursor, &[";"]) {
            Some((body, _)) => WordDefNode {
                name,
                body,
                good: true,
            },

            None => WordDefNode {
                name,
                body: Body::new(),
                good: false,
            },
        }
    }

    /// Bind the body under the name.  The name is validated here rather than at parse time:
    /// it must exist, must not be a number, and must not shadow a built-in, variable, or
    /// constant.  Redefining an existing user word is allowed and replaces it.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing ';' found".to_string()));
        }

        let name = match &self.name {
            Some(name) => name,
            None => {
                return Err(ForthError::BadDef(
                    "Missing name for word definition".to_string(),
                ))
            }
        };

        if parse_literal(name).is_some() {
            return Err(ForthError::BadDef(format!("Cannot name a word '{}'", name)));
        }

        let taken = resolve(name).is_some()
            || interpreter.heap().is_defined(name)
            || interpreter.dictionary().is_constant(name);

        if taken {
            return Err(ForthError::BadDef(format!("'{}' is already defined", name)));
        }

        interpreter.dictionary_mut().bind_word(name, self.body.clone());
        Ok(())
    }
}
