/// Arithmetic, bitwise, and comparison words.
pub mod arithmetic_words;

/// Words that branch and loop: IF, DO, and BEGIN.
pub mod control_words;

/// Variables, constants, and the raw heap access words.
pub mod heap_words;

/// File loading.
pub mod io_words;

/// Words that print: value output, CR, and the stack dump.
pub mod output_words;

/// Words that rearrange the data stack.
pub mod stack_words;

/// String literals and comments.
pub mod string_words;

/// The colon definition word.
pub mod word_creation_words;

use crate::{
    lang::cursor::TokenStream,
    runtime::{
        built_ins::{
            control_words::{BeginNode, DoNode, IfNode},
            heap_words::DefineNode,
            io_words::LoadNode,
            string_words::{CommentNode, FStringNode},
            word_creation_words::WordDefNode,
        },
        data_structures::value::Cell,
        error,
        interpreter::Interpreter,
    },
};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// The simple built-in operations: everything that pops and pushes without consuming any
/// further tokens from the input.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OpKind {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
    Xor,
    Equal,
    Lesser,
    Greater,
    Dup,
    Drop,
    Swap,
    Over,
    Rot,
    Invert,
    Dot,
    Emit,
    Cr,
    Dump,
}

impl OpKind {
    /// The word as it is written in source, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            OpKind::Add => "+",
            OpKind::Sub => "-",
            OpKind::Mul => "*",
            OpKind::Div => "/",
            OpKind::Mod => "mod",
            OpKind::And => "and",
            OpKind::Or => "or",
            OpKind::Xor => "xor",
            OpKind::Equal => "=",
            OpKind::Lesser => "<",
            OpKind::Greater => ">",
            OpKind::Dup => "dup",
            OpKind::Drop => "drop",
            OpKind::Swap => "swap",
            OpKind::Over => "over",
            OpKind::Rot => "rot",
            OpKind::Invert => "invert",
            OpKind::Dot => ".",
            OpKind::Emit => "emit",
            OpKind::Cr => "cr",
            OpKind::Dump => "dump",
        }
    }

    /// How many stack values the operation consumes.  Checked up front so a failing
    /// operation leaves the stack untouched.
    pub fn arity(self) -> usize {
        match self {
            OpKind::Add
            | OpKind::Sub
            | OpKind::Mul
            | OpKind::Div
            | OpKind::Mod
            | OpKind::And
            | OpKind::Or
            | OpKind::Xor
            | OpKind::Equal
            | OpKind::Lesser
            | OpKind::Greater
            | OpKind::Swap
            | OpKind::Over => 2,

            OpKind::Rot => 3,

            OpKind::Dup | OpKind::Drop | OpKind::Invert | OpKind::Dot | OpKind::Emit => 1,

            OpKind::Cr | OpKind::Dump => 0,
        }
    }
}

/// Everything a written word can resolve to.  The resolver maps source spellings onto these,
/// and each kind knows how to finish parsing itself from the cursor.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum WordKind {
    Op(OpKind),
    FString,
    Comment,
    If,
    Do,
    Begin,
    WordDef,
    VariableDef,
    ConstantDef,
    Allot,
    Cells,
    GetVar,
    SetVar,
    Load,
}

impl WordKind {
    /// Structured kinds consume tokens past the word itself, all the way to a terminator.
    /// They are pre-parsed into nodes when they appear inside a stored body, so terminator
    /// matching respects nesting.
    fn is_structured(self) -> bool {
        matches!(
            self,
            WordKind::FString
                | WordKind::Comment
                | WordKind::If
                | WordKind::Do
                | WordKind::Begin
                | WordKind::WordDef
        )
    }
}

lazy_static! {
    /// The symbolic spellings.  These are matched exactly, and only the symbol dispatches:
    /// the names of the kinds themselves ("add", "dot", and friends) stay unresolvable.
    static ref SYMBOL_WORDS: HashMap<&'static str, WordKind> = {
        let mut words = HashMap::new();

        words.insert("+", WordKind::Op(OpKind::Add));
        words.insert("-", WordKind::Op(OpKind::Sub));
        words.insert("*", WordKind::Op(OpKind::Mul));
        words.insert("/", WordKind::Op(OpKind::Div));
        words.insert(".", WordKind::Op(OpKind::Dot));
        words.insert("=", WordKind::Op(OpKind::Equal));
        words.insert("<", WordKind::Op(OpKind::Lesser));
        words.insert(">", WordKind::Op(OpKind::Greater));
        words.insert(".\"", WordKind::FString);
        words.insert("(", WordKind::Comment);
        words.insert("!", WordKind::SetVar);
        words.insert("@", WordKind::GetVar);
        words.insert(":", WordKind::WordDef);
        words.insert("::", WordKind::Load);

        words
    };

    /// The alphabetic spellings, matched case insensitively.
    static ref NAMED_WORDS: HashMap<&'static str, WordKind> = {
        let mut words = HashMap::new();

        words.insert("cr", WordKind::Op(OpKind::Cr));
        words.insert("drop", WordKind::Op(OpKind::Drop));
        words.insert("dump", WordKind::Op(OpKind::Dump));
        words.insert("dup", WordKind::Op(OpKind::Dup));
        words.insert("emit", WordKind::Op(OpKind::Emit));
        words.insert("invert", WordKind::Op(OpKind::Invert));
        words.insert("mod", WordKind::Op(OpKind::Mod));
        words.insert("over", WordKind::Op(OpKind::Over));
        words.insert("rot", WordKind::Op(OpKind::Rot));
        words.insert("swap", WordKind::Op(OpKind::Swap));
        words.insert("and", WordKind::Op(OpKind::And));
        words.insert("or", WordKind::Op(OpKind::Or));
        words.insert("xor", WordKind::Op(OpKind::Xor));
        words.insert("variable", WordKind::VariableDef);
        words.insert("constant", WordKind::ConstantDef);
        words.insert("allot", WordKind::Allot);
        words.insert("cells", WordKind::Cells);
        words.insert("if", WordKind::If);
        words.insert("do", WordKind::Do);
        words.insert("begin", WordKind::Begin);

        words
    };

    /// Terminators are not words in their own right.  Each maps to the opener it belongs to,
    /// for the diagnostic raised when one shows up with no opener in sight.
    static ref TERMINATORS: HashMap<&'static str, &'static str> = {
        let mut closers = HashMap::new();

        closers.insert(";", ":");
        closers.insert("then", "if");
        closers.insert("else", "if");
        closers.insert("loop", "do");
        closers.insert("until", "begin");
        closers.insert("\"", ".\"");
        closers.insert(")", "(");

        closers
    };
}

/// Resolve a written word to a built-in kind.  Symbols match exactly, names fold case.
pub fn resolve(word: &str) -> Option<WordKind> {
    if let Some(kind) = SYMBOL_WORDS.get(word) {
        return Some(*kind);
    }

    NAMED_WORDS.get(word.to_ascii_lowercase().as_str()).copied()
}

/// If the word is a stray terminator, the opener it was missing.
pub fn unmatched_opener(word: &str) -> Option<&'static str> {
    TERMINATORS
        .get(word.to_ascii_lowercase().as_str())
        .copied()
}

/// One element of a stored word body.
///
/// Structured constructs are parsed into nodes when the body is built, everything else stays
/// a raw lowercase string that is re-resolved on every invocation.  That late binding is what
/// lets a definition call words defined after it, itself included.
#[derive(Clone)]
pub enum BodyElement {
    Raw(String),
    Parsed(ForthWord),
}

/// A stored word body, interpreted front to back each time the word runs.
pub type Body = Vec<BodyElement>;

/// A fully parsed word, ready to evaluate.
///
/// Every variant owns whatever extra structure its parse consumed, so evaluation never looks
/// back at the source text.
#[derive(Clone)]
pub enum ForthWord {
    /// A simple operation on the stack and console.
    Op(OpKind),

    /// A number pushed as-is.  Produced by the DO loop's index substitution; numbers written
    /// in source are recognized at value position instead.
    Literal(Cell),

    /// A `."` string literal.
    FString(FStringNode),

    /// A `(` comment.
    Comment(CommentNode),

    /// An IF / ELSE / THEN conditional.
    If(IfNode),

    /// A DO / LOOP counted loop.
    Do(DoNode),

    /// A BEGIN / UNTIL loop.
    Begin(BeginNode),

    /// A `:` definition.
    WordDef(WordDefNode),

    /// A VARIABLE declaration.
    VariableDef(DefineNode),

    /// A CONSTANT declaration.
    ConstantDef(DefineNode),

    /// Advance the heap frontier.
    Allot,

    /// Scale a cell count to address units.  The cell size is 1, so this does nothing.
    Cells,

    /// Fetch a heap cell: `@`.
    GetVar,

    /// Store a heap cell: `!`.
    SetVar,

    /// Interpret another file in place: `::`.
    Load(LoadNode),
}

impl ForthWord {
    /// Finish parsing a resolved word.  Structured kinds consume from the cursor, pulling
    /// continuation lines from the backing source as needed; the rest parse trivially.
    pub fn parse(kind: WordKind, cursor: &mut dyn TokenStream) -> ForthWord {
        match kind {
            WordKind::Op(op) => ForthWord::Op(op),
            WordKind::FString => ForthWord::FString(FStringNode::parse(cursor)),
            WordKind::Comment => ForthWord::Comment(CommentNode::parse(cursor)),
            WordKind::If => ForthWord::If(IfNode::parse(cursor)),
            WordKind::Do => ForthWord::Do(DoNode::parse(cursor)),
            WordKind::Begin => ForthWord::Begin(BeginNode::parse(cursor)),
            WordKind::WordDef => ForthWord::WordDef(WordDefNode::parse(cursor)),
            WordKind::VariableDef => ForthWord::VariableDef(DefineNode::parse(cursor)),
            WordKind::ConstantDef => ForthWord::ConstantDef(DefineNode::parse(cursor)),
            WordKind::Allot => ForthWord::Allot,
            WordKind::Cells => ForthWord::Cells,
            WordKind::GetVar => ForthWord::GetVar,
            WordKind::SetVar => ForthWord::SetVar,
            WordKind::Load => ForthWord::Load(LoadNode::parse(cursor)),
        }
    }

    /// Execute the word against the interpreter.
    pub fn eval(&self, interpreter: &mut Interpreter) -> error::Result<()> {
        match self {
            ForthWord::Op(kind) => eval_op(*kind, interpreter),

            ForthWord::Literal(value) => {
                interpreter.push(*value);
                Ok(())
            }

            ForthWord::FString(node) => node.eval(interpreter),
            ForthWord::Comment(node) => node.eval(),
            ForthWord::If(node) => node.eval(interpreter),
            ForthWord::Do(node) => node.eval(interpreter),
            ForthWord::Begin(node) => node.eval(interpreter),
            ForthWord::WordDef(node) => node.eval(interpreter),
            ForthWord::VariableDef(node) => node.eval_variable(interpreter),
            ForthWord::ConstantDef(node) => node.eval_constant(interpreter),
            ForthWord::Allot => heap_words::word_allot(interpreter),
            ForthWord::Cells => heap_words::word_cells(interpreter),
            ForthWord::GetVar => heap_words::word_fetch(interpreter),
            ForthWord::SetVar => heap_words::word_store(interpreter),
            ForthWord::Load(node) => node.eval(interpreter),
        }
    }
}

/// Dispatch a simple operation, verifying its stack arity first so a failed operation leaves
/// the stack exactly as it found it.
fn eval_op(kind: OpKind, interpreter: &mut Interpreter) -> error::Result<()> {
    interpreter.require(kind.name(), kind.arity())?;

    match kind {
        OpKind::Add => arithmetic_words::word_add(interpreter),
        OpKind::Sub => arithmetic_words::word_sub(interpreter),
        OpKind::Mul => arithmetic_words::word_mul(interpreter),
        OpKind::Div => arithmetic_words::word_div(interpreter),
        OpKind::Mod => arithmetic_words::word_mod(interpreter),
        OpKind::And => arithmetic_words::word_and(interpreter),
        OpKind::Or => arithmetic_words::word_or(interpreter),
        OpKind::Xor => arithmetic_words::word_xor(interpreter),
        OpKind::Equal => arithmetic_words::word_equal(interpreter),
        OpKind::Lesser => arithmetic_words::word_lesser(interpreter),
        OpKind::Greater => arithmetic_words::word_greater(interpreter),
        OpKind::Dup => stack_words::word_dup(interpreter),
        OpKind::Drop => stack_words::word_drop(interpreter),
        OpKind::Swap => stack_words::word_swap(interpreter),
        OpKind::Over => stack_words::word_over(interpreter),
        OpKind::Rot => stack_words::word_rot(interpreter),
        OpKind::Invert => stack_words::word_invert(interpreter),
        OpKind::Dot => output_words::word_dot(interpreter),
        OpKind::Emit => output_words::word_emit(interpreter),
        OpKind::Cr => output_words::word_cr(interpreter),
        OpKind::Dump => output_words::word_dump(interpreter),
    }
}

/// Read a body up to one of the given terminators, pre-parsing any nested structured words so
/// an inner construct's terminator can never close an outer one.
///
/// Raw tokens are stored case folded.  When the cursor empties the next line is pulled from
/// the source; if the source empties too the parse has failed and `None` is returned, leaving
/// the caller to mark itself bad.
pub(crate) fn parse_body(
    cursor: &mut dyn TokenStream,
    terminators: &[&'static str],
) -> Option<(Body, &'static str)> {
    let mut body = Body::new();

    loop {
        match cursor.next_token() {
            Some(BodyElement::Raw(word)) => {
                let folded = word.to_ascii_lowercase();

                if let Some(&found) = terminators.iter().find(|&&terminator| terminator == folded) {
                    return Some((body, found));
                }

                match resolve(&word) {
                    Some(kind) if kind.is_structured() => {
                        body.push(BodyElement::Parsed(ForthWord::parse(kind, cursor)));
                    }

                    _ => body.push(BodyElement::Raw(folded)),
                }
            }

            Some(element) => body.push(element),

            None => {
                if !cursor.refill() {
                    return None;
                }
            }
        }
    }
}

/// Parse a word as an integer literal: decimal digits with an optional leading minus.
/// Anything else, hex and friends included, is left to be a word.
pub fn parse_literal(word: &str) -> Option<Cell> {
    let digits = word.strip_prefix('-').unwrap_or(word);

    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    word.parse::<Cell>().ok()
}

/// Read a definition's name from the cursor: the next raw token on the current line, case
/// folded.  `None` when the line ends first; the definition word reports that at eval time.
pub(crate) fn parse_name(cursor: &mut dyn TokenStream) -> Option<String> {
    match cursor.next_token() {
        Some(BodyElement::Raw(word)) => Some(word.to_ascii_lowercase()),
        _ => None,
    }
}
