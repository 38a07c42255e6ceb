use crate::{
    lang::cursor::{BodyCursor, TokenStream},
    runtime::{
        built_ins::{parse_body, Body, BodyElement, ForthWord},
        data_structures::value::FALSE,
        error::{self, ForthError},
        interpreter::Interpreter,
    },
};

/// An IF / ELSE / THEN conditional.
///
/// Both branches are parsed up front, with nested structured words built recursively so an
/// inner THEN can never close this IF.
#[derive(Clone)]
pub struct IfNode {
    true_body: Body,
    false_body: Option<Body>,
    good: bool,
}

impl IfNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> IfNode {
        match parse_body(cursor, &["then", "else"]) {
            Some((true_body, "else")) => match parse_body(cursor, &["then"]) {
                Some((false_body, _)) => IfNode {
                    true_body,
                    false_body: Some(false_body),
                    good: true,
                },

                None => IfNode {
                    true_body,
                    false_body: None,
                    good: false,
                },
            },

            Some((true_body, _)) => IfNode {
                true_body,
                false_body: None,
                good: true,
            },

            None => IfNode {
                true_body: Body::new(),
                false_body: None,
                good: false,
            },
        }
    }

    /// Pop the flag and interpret the matching branch.  Zero takes the ELSE branch, or
    /// nothing at all when there is none.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing 'then' found".to_string()));
        }

        interpreter.require("if", 1)?;
        let flag = interpreter.pop()?;

        let branch: &[BodyElement] = if flag == FALSE {
            self.false_body.as_deref().unwrap_or(&[])
        } else {
            &self.true_body
        };

        if !interpreter.interpret(&mut BodyCursor::new(branch)) {
            return Err(ForthError::Halted);
        }

        Ok(())
    }
}

/// A DO / LOOP counted loop.
#[derive(Clone)]
pub struct DoNode {
    body: Body,
    good: bool,
}

impl DoNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> DoNode {
        match parse_body(cursor, &["loop"]) {
            Some((body, _)) => DoNode { body, good: true },
            None => DoNode {
                body: Body::new(),
                good: false,
            },
        }
    }

    /// Pop the start, then the limit, and interpret the body once per index in
    /// `[start, limit)`.
    ///
    /// Each iteration runs a copy of the body with the top-level `i` tokens replaced by the
    /// current index; an `i` nested inside an inner loop's body belongs to that loop.  An
    /// unknown word inside an iteration ends the whole loop.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing 'loop' found".to_string()));
        }

        interpreter.require("do", 2)?;
        let start = interpreter.pop()?;
        let limit = interpreter.pop()?;

        if start < 0 || limit < 0 || start > limit {
            return Err(ForthError::BadLoop { limit, start });
        }

        for index in start..limit {
            let body: Body = self
                .body
                .iter()
                .map(|element| match element {
                    BodyElement::Raw(word) if word == "i" => {
                        BodyElement::Parsed(ForthWord::Literal(index))
                    }

                    other => other.clone(),
                })
                .collect();

            if !interpreter.interpret(&mut BodyCursor::new(&body)) {
                return Err(ForthError::Halted);
            }
        }

        Ok(())
    }
}

/// A BEGIN / UNTIL loop.
#[derive(Clone)]
pub struct BeginNode {
    body: Body,
    good: bool,
}

impl BeginNode {
    pub fn parse(cursor: &mut dyn TokenStream) -> BeginNode {
        match parse_body(cursor, &["until"]) {
            Some((body, _)) => BeginNode { body, good: true },
            None => BeginNode {
                body: Body::new(),
                good: false,
            },
        }
    }

    /// Interpret the body, then pop a flag at the UNTIL: zero goes around again, anything
    /// else falls through.  Reaching the UNTIL with an empty stack aborts the loop.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        if !self.good {
            return Err(ForthError::Syntax("No closing 'until' found".to_string()));
        }

        loop {
            if !interpreter.interpret(&mut BodyCursor::new(&self.body)) {
                return Err(ForthError::Halted);
            }

            interpreter.require("until", 1)?;

            if interpreter.pop()? != FALSE {
                return Ok(());
            }
        }
    }
}
