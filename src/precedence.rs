use std::collections::HashMap;

use crate::lexer::Token;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum PrecedenceError {
    #[error("invalid operator spec {0:?}, expected SYM=PREC")]
    InvalidSpec(String),
    #[error("precedence of '{0}' must be positive, found {1}")]
    NonPositive(char, i32),
    #[error("'{0}' can never be lexed as an operator")]
    ReservedSymbol(char),
}

/// binary operator precedences, higher binds tighter
#[derive(Debug, PartialEq, Clone)]
pub struct PrecedenceTable {
    operators: HashMap<char, i32>,
}

impl std::default::Default for PrecedenceTable {
    fn default() -> Self {
        let mut operators = HashMap::new();
        operators.insert('<', 10);
        operators.insert('+', 20);
        operators.insert('-', 20);
        operators.insert('*', 40);
        Self { operators }
    }
}

impl PrecedenceTable {
    #[cfg(test)]
    fn empty() -> Self {
        Self {
            operators: HashMap::new(),
        }
    }

    /// add or override an operator
    pub fn insert(&mut self, symbol: char, precedence: i32) -> Result<(), PrecedenceError> {
        if symbol.is_alphanumeric()
            || symbol.is_whitespace()
            || matches!(symbol, '.' | '#' | '(' | ')' | ',' | ';')
        {
            return Err(PrecedenceError::ReservedSymbol(symbol));
        }
        if precedence <= 0 {
            return Err(PrecedenceError::NonPositive(symbol, precedence));
        }
        self.operators.insert(symbol, precedence);
        Ok(())
    }

    /// apply a `SYM=PREC` override such as `/=40`
    pub fn insert_spec(&mut self, spec: &str) -> Result<(), PrecedenceError> {
        let invalid = || PrecedenceError::InvalidSpec(spec.to_string());

        let (symbol, precedence) = spec
            .rfind('=')
            .map(|at| (&spec[..at], &spec[at + 1..]))
            .ok_or_else(invalid)?;
        let mut chars = symbol.chars();
        let symbol = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid()),
        };
        let precedence = precedence.trim().parse().map_err(|_| invalid())?;

        self.insert(symbol, precedence)
    }

    pub fn get(&self, symbol: char) -> Option<i32> {
        self.operators.get(&symbol).copied()
    }

    /// precedence of a token in operator position, -1 when it is not a known operator
    pub fn token_precedence(&self, token: &Token) -> i32 {
        match token {
            Token::Symbol(c) => self.get(*c).unwrap_or(-1),
            _ => -1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_table() {
        let table = PrecedenceTable::default();
        assert_eq!(table.token_precedence(&Token::Symbol('<')), 10);
        assert_eq!(table.token_precedence(&Token::Symbol('+')), 20);
        assert_eq!(table.token_precedence(&Token::Symbol('-')), 20);
        assert_eq!(table.token_precedence(&Token::Symbol('*')), 40);
        assert_eq!(table.token_precedence(&Token::Symbol('/')), -1);
        assert_eq!(table.token_precedence(&Token::Ident("x".to_string())), -1);
        assert_eq!(table.token_precedence(&Token::Number(1.0)), -1);
    }

    #[test]
    fn specs_add_and_override() {
        let mut table = PrecedenceTable::default();
        table.insert_spec("/=40").unwrap();
        table.insert_spec("+=5").unwrap();
        table.insert_spec("==1").unwrap();
        assert_eq!(table.get('/'), Some(40));
        assert_eq!(table.get('+'), Some(5));
        assert_eq!(table.get('='), Some(1));
    }

    #[test]
    fn bad_specs_are_rejected() {
        let mut table = PrecedenceTable::empty();
        assert_eq!(
            table.insert_spec("/40"),
            Err(PrecedenceError::InvalidSpec("/40".to_string()))
        );
        assert_eq!(
            table.insert_spec("//=4"),
            Err(PrecedenceError::InvalidSpec("//=4".to_string()))
        );
        assert_eq!(
            table.insert_spec("/=x"),
            Err(PrecedenceError::InvalidSpec("/=x".to_string()))
        );
        assert_eq!(table.insert_spec("/=0"), Err(PrecedenceError::NonPositive('/', 0)));
        assert_eq!(table.insert_spec("a=3"), Err(PrecedenceError::ReservedSymbol('a')));
        assert_eq!(table.insert_spec("(=3"), Err(PrecedenceError::ReservedSymbol('(')));
        assert_eq!(table.get('/'), None);
    }
}
