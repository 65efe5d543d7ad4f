use tracing::trace;

use crate::decode::cursor::Cursor;
use crate::decode::node::{ArrayReader, Node, ObjectReader};
use crate::error::ParseError;
use crate::number::is_numeric;

/// Recursive-descent parser over a token stream.
///
/// [`Parser::value`] returns a [`Node`]; arrays and objects come back as
/// readers that keep borrowing the parser and pull their items from the same
/// cursor on demand. Nothing past the current item is ever parsed ahead.
#[derive(Debug)]
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(args: &'a [&'a str]) -> Self {
        Self {
            cursor: Cursor::new(args),
        }
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub fn remaining(&self) -> &'a [&'a str] {
        self.cursor.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        !self.cursor.more()
    }

    /// Parses the value starting at the next token.
    pub fn value(&mut self) -> Result<Node<'_, 'a>, ParseError> {
        let arg = self.cursor.next().ok_or(ParseError::ExpectedValue)?;
        self.value_from(arg)
    }

    /// Treats the rest of the stream as the entries of one object that is
    /// closed by the end of input rather than by `]`.
    pub fn implicit_object(&mut self) -> Node<'_, 'a> {
        Node::Object(ObjectReader::unbracketed(self))
    }

    pub(crate) fn next_token(&mut self) -> Option<&'a str> {
        self.cursor.next()
    }

    /// Parses a value whose first token was already taken off the cursor.
    pub(crate) fn value_from(&mut self, arg: &'a str) -> Result<Node<'_, 'a>, ParseError> {
        let node = match arg {
            "-n" | "-u" => Node::Null,
            "-t" => Node::Bool(true),
            "-f" => Node::Bool(false),
            "" => Node::String(""),
            "--" => Node::String(self.cursor.next().ok_or(ParseError::ExpectedString)?),
            "[]" => Node::Array(ArrayReader::empty()),
            "[--]" => Node::Object(ObjectReader::empty()),
            "[" => return self.array_or_object(),
            "]" => return Err(ParseError::UnexpectedClose),
            _ => {
                let numeric = is_numeric(arg);
                if arg.starts_with('-') && !numeric {
                    return Err(ParseError::UnknownFlag(arg.to_string()));
                }
                Node::Scalar { text: arg, numeric }
            }
        };
        Ok(node)
    }

    /// Decides between array and object after a lone `[` by looking at the
    /// next token without consuming it.
    fn array_or_object(&mut self) -> Result<Node<'_, 'a>, ParseError> {
        let next = self.cursor.peek().ok_or(ParseError::UnterminatedArray)?;
        if next != "--" && next.starts_with("--") {
            trace!(pos = self.cursor.position(), "open object");
            Ok(Node::Object(ObjectReader::new(self)))
        } else {
            trace!(pos = self.cursor.position(), "open array");
            Ok(Node::Array(ArrayReader::new(self)))
        }
    }
}
