use crate::decode::parser::Parser;
use crate::error::ParseError;

/// The kind of a parsed [`Node`], as reported in decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    String,
    Scalar,
    Array,
    Object,
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::String => "string",
            Kind::Scalar => "scalar",
            Kind::Array => "array",
            Kind::Object => "object",
        })
    }
}

/// One parsed value.
///
/// `'a` is the lifetime of the tokens, `'p` the borrow of the parser held by
/// array and object readers. A reader must be drained, in order, before the
/// parser can produce anything else.
#[derive(Debug)]
pub enum Node<'p, 'a> {
    Null,
    Bool(bool),
    /// Forced string: `--` escape or the empty token.
    String(&'a str),
    /// Bare token; what it means depends on the destination.
    Scalar { text: &'a str, numeric: bool },
    Array(ArrayReader<'p, 'a>),
    Object(ObjectReader<'p, 'a>),
}

impl Node<'_, '_> {
    pub fn kind(&self) -> Kind {
        match self {
            Node::Null => Kind::Null,
            Node::Bool(_) => Kind::Bool,
            Node::String(_) => Kind::String,
            Node::Scalar { .. } => Kind::Scalar,
            Node::Array(_) => Kind::Array,
            Node::Object(_) => Kind::Object,
        }
    }
}

/// Lazy array items.
///
/// `more` consumes one token to decide: a `]` ends the array, anything else
/// is kept for the following `next`. Call `next` only right after `more`
/// returned `true`.
#[derive(Debug)]
pub struct ArrayReader<'p, 'a> {
    parser: Option<&'p mut Parser<'a>>,
    pending: Option<&'a str>,
    done: bool,
}

impl<'p, 'a> ArrayReader<'p, 'a> {
    pub(crate) fn new(parser: &'p mut Parser<'a>) -> Self {
        Self {
            parser: Some(parser),
            pending: None,
            done: false,
        }
    }

    /// Reader for `[]`: never touches the cursor.
    pub(crate) fn empty() -> Self {
        Self {
            parser: None,
            pending: None,
            done: true,
        }
    }

    pub fn more(&mut self) -> Result<bool, ParseError> {
        if self.done {
            return Ok(false);
        }
        if self.pending.is_some() {
            return Ok(true);
        }
        let Some(parser) = self.parser.as_deref_mut() else {
            self.done = true;
            return Ok(false);
        };
        match parser.next_token() {
            None => Err(ParseError::UnterminatedArray),
            Some("]") => {
                self.done = true;
                Ok(false)
            }
            Some(tok) => {
                self.pending = Some(tok);
                Ok(true)
            }
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<Node<'_, 'a>, ParseError> {
        if self.done {
            return Err(ParseError::ExpectedValue);
        }
        let parser = self
            .parser
            .as_deref_mut()
            .ok_or(ParseError::ExpectedValue)?;
        match self.pending.take() {
            Some(tok) => parser.value_from(tok),
            None => parser.value(),
        }
    }
}

/// Lazy object entries, `--key value` or `--key=value`.
///
/// Same protocol as [`ArrayReader`]. The key and the value are separate
/// steps so a decoder can resolve the key before the value is parsed.
#[derive(Debug)]
pub struct ObjectReader<'p, 'a> {
    parser: Option<&'p mut Parser<'a>>,
    pending: Option<&'a str>,
    inline: Option<&'a str>,
    bracketed: bool,
    done: bool,
}

impl<'p, 'a> ObjectReader<'p, 'a> {
    pub(crate) fn new(parser: &'p mut Parser<'a>) -> Self {
        Self {
            parser: Some(parser),
            pending: None,
            inline: None,
            bracketed: true,
            done: false,
        }
    }

    /// Entries run until the end of input instead of a closing `]`.
    pub(crate) fn unbracketed(parser: &'p mut Parser<'a>) -> Self {
        Self {
            bracketed: false,
            ..Self::new(parser)
        }
    }

    /// Reader for `[--]`: never touches the cursor.
    pub(crate) fn empty() -> Self {
        Self {
            parser: None,
            pending: None,
            inline: None,
            bracketed: true,
            done: true,
        }
    }

    pub fn more(&mut self) -> Result<bool, ParseError> {
        if self.done {
            return Ok(false);
        }
        if self.pending.is_some() {
            return Ok(true);
        }
        let Some(parser) = self.parser.as_deref_mut() else {
            self.done = true;
            return Ok(false);
        };
        match parser.next_token() {
            None if self.bracketed => Err(ParseError::UnterminatedObject),
            None => {
                self.done = true;
                Ok(false)
            }
            Some("]") if self.bracketed => {
                self.done = true;
                Ok(false)
            }
            Some(tok) => {
                self.pending = Some(tok);
                Ok(true)
            }
        }
    }

    /// Consumes the next `--key` or `--key=value` token and returns the key.
    pub fn next_key(&mut self) -> Result<&'a str, ParseError> {
        if self.done {
            return Err(ParseError::UnterminatedObject);
        }
        let tok = match self.pending.take() {
            Some(tok) => tok,
            None => self
                .parser
                .as_deref_mut()
                .and_then(Parser::next_token)
                .ok_or(ParseError::UnterminatedObject)?,
        };
        let key = match tok.strip_prefix("--") {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ParseError::ExpectedKey(tok.to_string())),
        };
        Ok(match key.split_once('=') {
            Some((key, value)) => {
                self.inline = Some(value);
                key
            }
            None => {
                self.inline = None;
                key
            }
        })
    }

    /// Parses the value of the key returned by the last `next_key`.
    pub fn next_value(&mut self) -> Result<Node<'_, 'a>, ParseError> {
        let parser = self
            .parser
            .as_deref_mut()
            .ok_or(ParseError::ExpectedValue)?;
        match self.inline.take() {
            Some(value) => parser.value_from(value),
            None => parser.value(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<(&'a str, Node<'_, 'a>), ParseError> {
        let key = self.next_key()?;
        let value = self.next_value()?;
        Ok((key, value))
    }
}
