use crate::{
    lang::cursor::TokenStream,
    runtime::{
        built_ins::BodyElement,
        error::{self, ForthError},
        interpreter::Interpreter,
    },
};

/// A `::` load: interpret another file in place.
///
/// The path is the next token, taken verbatim since file names are case sensitive.
#[derive(Clone)]
pub struct LoadNode {
    path: Option<String>,
}

impl LoadNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> LoadNode {
        let path = match cursor.next_token() {
            Some(BodyElement::Raw(word)) => Some(word),
            _ => None,
        };

        LoadNode { path }
    }

    /// Run the named file through the interpreter, then resume where we left off.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        match &self.path {
            Some(path) => interpreter.load(path),
            None => Err(ForthError::BadLoad("".to_string())),
        }
    }
}
