use crate::util::is_whitespace;

/// Read position into a formula.
///
/// The position is a byte offset that only ever moves forward and never
/// goes past the end of the input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Cursor<'a> {
        Cursor { input, position: 0 }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// The text consumed since `start`
    pub fn since(&self, start: usize) -> &'a str {
        &self.input[start..self.position]
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start_matches(is_whitespace).len();
        self.position += skipped;
    }

    /// Skip whitespace, then look at the next character without consuming it
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.peek_raw()
    }

    /// Look at the next character, whitespace included
    pub fn peek_raw(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Look at the character after the next one, whitespace included
    pub fn peek_second_raw(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    /// Consume the next character, whitespace included
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek_raw()?;
        self.position += c.len_utf8();
        Some(c)
    }

    /// Skip whitespace, then consume `expected` if it is the next character
    pub fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume the longest run of characters matching `predicate`, starting
    /// right at the current position.
    pub fn take_while<P>(&mut self, predicate: P) -> &'a str
    where
        P: Fn(char) -> bool,
    {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .find(|&(_, c)| !predicate(c))
            .map_or(rest.len(), |(i, _)| i);
        self.position += end;
        &rest[..end]
    }

    /// Skip whitespace, then check if the whole input was consumed
    pub fn is_at_end(&mut self) -> bool {
        self.peek().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn skips_whitespace_between_tokens() {
        let mut cursor = Cursor::new(" \t 12 \n+x");
        assert_eq!(cursor.peek(), Some('1'));
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.take_while(|c| c.is_ascii_digit()), "12");
        assert!(cursor.eat('+'));
        assert!(!cursor.eat('+'));
        assert_eq!(cursor.bump(), Some('x'));
        assert!(cursor.is_at_end());
        assert_eq!(cursor.position(), 9);
    }

    #[test]
    fn never_reads_past_the_end() {
        let mut cursor = Cursor::new("");
        assert_eq!(cursor.peek(), None);
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.take_while(|_| true), "");
        assert_eq!(cursor.position(), 0);

        let mut cursor = Cursor::new("é");
        assert_eq!(cursor.bump(), Some('é'));
        assert_eq!(cursor.position(), 2);
        assert_eq!(cursor.bump(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn raw_peeks_do_not_skip() {
        let mut cursor = Cursor::new("- 3");
        assert_eq!(cursor.peek_raw(), Some('-'));
        assert_eq!(cursor.peek_second_raw(), Some(' '));
        cursor.bump();
        assert_eq!(cursor.peek_raw(), Some(' '));
        assert_eq!(cursor.position(), 1);
    }
}
