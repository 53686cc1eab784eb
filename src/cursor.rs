use std::str::Chars;

use tracing::trace;

use crate::lexer::{Lexer, Token};

/// single token of lookahead between the lexer and the parser
#[derive(Debug)]
pub struct Cursor<I: Iterator<Item = char>> {
    lexer: Lexer<I>,
    current: Token,
}

impl<I: Iterator<Item = char>> Cursor<I> {
    /// wraps the lexer and primes the first token
    pub fn new(mut lexer: Lexer<I>) -> Self {
        let current = lexer.next_token();
        trace!(token = %current, "primed cursor");
        Self { lexer, current }
    }

    pub fn current(&self) -> &Token {
        &self.current
    }

    /// replace the current token with the next one from the lexer, handing
    /// back the one that was consumed
    pub fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        trace!(token = %next, "pulled token");
        std::mem::replace(&mut self.current, next)
    }
}

impl<'a> Cursor<Chars<'a>> {
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source.chars()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn advance_returns_consumed_token() {
        let mut cursor = Cursor::from_source("a +");
        assert_eq!(cursor.current(), &Token::Ident("a".to_string()));
        assert_eq!(cursor.advance(), Token::Ident("a".to_string()));
        assert_eq!(cursor.current(), &Token::Symbol('+'));
        assert_eq!(cursor.advance(), Token::Symbol('+'));
        assert_eq!(cursor.current(), &Token::EndOfInput);
        assert_eq!(cursor.advance(), Token::EndOfInput);
        assert_eq!(cursor.current(), &Token::EndOfInput);
    }
}
