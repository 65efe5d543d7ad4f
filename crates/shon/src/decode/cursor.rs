/// Forward-only position in a token sequence.
///
/// `peek` never moves the cursor; `next` returns the same token `peek` would
/// have and then advances. There is no way back.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    args: &'a [&'a str],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(args: &'a [&'a str]) -> Self {
        Self { args, pos: 0 }
    }

    pub fn more(&self) -> bool {
        self.pos < self.args.len()
    }

    pub fn peek(&self) -> Option<&'a str> {
        self.args.get(self.pos).copied()
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a str> {
        let arg = self.peek()?;
        self.pos += 1;
        Some(arg)
    }

    /// Number of tokens consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Tokens not consumed yet.
    pub fn remaining(&self) -> &'a [&'a str] {
        &self.args[self.pos..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_agrees_with_next() {
        let args = ["foo", "bar"];
        let mut c = Cursor::new(&args);

        assert!(c.more());
        assert_eq!(c.peek(), Some("foo"));
        assert_eq!(c.next(), Some("foo"));

        assert!(c.more());
        assert_eq!(c.peek(), Some("bar"));
        assert_eq!(c.remaining(), &["bar"]);
        assert_eq!(c.next(), Some("bar"));

        assert!(!c.more());
        assert_eq!(c.peek(), None);
        assert_eq!(c.next(), None);
        assert_eq!(c.position(), 2);
    }

    #[test]
    fn empty() {
        let mut c = Cursor::new(&[]);
        assert!(!c.more());
        assert_eq!(c.peek(), None);
        assert_eq!(c.next(), None);
        assert_eq!(c.position(), 0);
        assert!(c.remaining().is_empty());
    }
}
