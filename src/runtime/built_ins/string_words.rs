use crate::{
    lang::cursor::{Scan, TokenStream},
    runtime::{
        error::{self, ForthError},
        interpreter::Interpreter,
    },
};

/// Accumulate raw text up to the given delimiter, pulling continuation lines as needed.
///
/// Lines are joined with a newline so the accumulated text reads exactly as it was written.
/// Returns the text and whether the delimiter was actually found before the input ran out.
fn read_delimited(cursor: &mut dyn TokenStream, delimiter: char) -> (String, bool) {
    let mut text = String::new();

    loop {
        match cursor.scan_through(delimiter) {
            Scan::Found(rest) => {
                text.push_str(&rest);
                cursor.trim_remainder();

                return (text, true);
            }

            Scan::Exhausted(rest) => {
                text.push_str(&rest);

                if !cursor.refill() {
                    return (text, false);
                }

                text.push('\n');
            }
        }
    }
}

/// A `."` string literal.
///
/// The text is read literally, newlines included, up to the first closing quote.  One leading
/// space is stripped: the space after `."` belongs to the keyword, not the string.
#[derive(Clone)]
pub struct FStringNode {
    text: String,
    good: bool,
}

impl FStringNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> FStringNode {
        let (text, good) = read_delimited(cursor, '"');

        let text = match text.strip_prefix(' ') {
            Some(stripped) => stripped.to_string(),
            None => text,
        };

        FStringNode { text, good }
    }

    /// Print the text exactly as written, leaving the cursor mid-line.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing '\"' found".to_string()));
        }

        interpreter.console().print_text(&self.text);
        Ok(())
    }
}

/// A `(` comment.  Parses just like a string, evaluates to nothing.
#[derive(Clone)]
pub struct CommentNode {
    good: bool,
}

impl CommentNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> CommentNode {
        let (_, good) = read_delimited(cursor, ')');

        CommentNode { good }
    }

    pub fn eval(&self) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing ')' found".to_string()));
        }

        Ok(())
    }
}
