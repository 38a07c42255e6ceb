use crate::{lang::source::Source, runtime::built_ins::BodyElement};

/// The result of scanning a cursor for a closing delimiter.
pub enum Scan {
    /// The delimiter was found.  Holds the text before it; the delimiter itself is consumed.
    Found(String),

    /// The cursor ran out first.  Holds whatever text was left.
    Exhausted(String),
}

/// A mutable cursor over the unread remainder of the current input.
///
/// The interpreter threads one of these through everything it executes.  Two shapes of input
/// hide behind the trait: a line of text still being tokenized, and a stored body whose
/// elements were split (and partly pre-parsed) when the body was defined.  Word factories
/// consume their extra tokens from the cursor, so whatever is left when a factory returns is
/// exactly where interpretation picks back up.
pub trait TokenStream {
    /// Extract the next element: the next whitespace-delimited token of a text line, or the
    /// next stored element of a body.  `None` when the cursor is empty.
    ///
    /// For text this never consumes the whitespace after the returned token, which is how the
    /// string word gets to treat the space after its opening delimiter as part of the keyword.
    fn next_token(&mut self) -> Option<BodyElement>;

    /// Consume raw text through the given delimiter character.  Only text cursors can do
    /// this; a body cursor always reports itself exhausted, since any delimited construct in
    /// a body was already parsed when the body was built.
    fn scan_through(&mut self, delimiter: char) -> Scan;

    /// Pull the next continuation line from the backing source, replacing the cursor's
    /// contents.  False when there is no more input to pull.
    fn refill(&mut self) -> bool;

    /// Drop leading and trailing whitespace from the remainder.
    fn trim_remainder(&mut self);
}

/// A cursor over one line of source text, with the source at hand for the continuation lines
/// that structured words pull when their terminator is further down the input.
pub struct LineCursor<'a> {
    text: String,
    source: &'a mut Source,
}

impl<'a> LineCursor<'a> {
    pub fn new(text: String, source: &'a mut Source) -> LineCursor<'a> {
        LineCursor { text, source }
    }
}

impl TokenStream for LineCursor<'_> {
    fn next_token(&mut self) -> Option<BodyElement> {
        let start = match self.text.find(|next: char| !next.is_whitespace()) {
            Some(index) => index,
            None => {
                self.text.clear();
                return None;
            }
        };

        let end = self.text[start..]
            .find(char::is_whitespace)
            .map(|index| start + index)
            .unwrap_or(self.text.len());

        let word = self.text[start..end].to_string();
        self.text.replace_range(..end, "");

        Some(BodyElement::Raw(word))
    }

    fn scan_through(&mut self, delimiter: char) -> Scan {
        match self.text.find(delimiter) {
            Some(index) => {
                let text = self.text[..index].to_string();
                self.text.replace_range(..=index, "");

                Scan::Found(text)
            }

            None => Scan::Exhausted(std::mem::take(&mut self.text)),
        }
    }

    fn refill(&mut self) -> bool {
        match self.source.read_line(false) {
            Some(line) => {
                self.text = line;
                true
            }

            None => false,
        }
    }

    fn trim_remainder(&mut self) {
        self.text = self.text.trim().to_string();
    }
}

/// A cursor over a stored body.  Bodies never grow more input, so refilling always fails and
/// raw-text scans report exhaustion.
pub struct BodyCursor<'a> {
    elements: &'a [BodyElement],
    index: usize,
}

impl<'a> BodyCursor<'a> {
    pub fn new(elements: &'a [BodyElement]) -> BodyCursor<'a> {
        BodyCursor { elements, index: 0 }
    }
}

impl TokenStream for BodyCursor<'_> {
    fn next_token(&mut self) -> Option<BodyElement> {
        let element = self.elements.get(self.index).cloned();
        self.index += 1;

        element
    }

    fn scan_through(&mut self, _delimiter: char) -> Scan {
        Scan::Exhausted(String::new())
    }

    fn refill(&mut self) -> bool {
        false
    }

    fn trim_remainder(&mut self) {}
}
