use std::str::Chars;

use crate::ast::{Expression, Function, Prototype};
use crate::cursor::Cursor;
use crate::lexer::Token;
use crate::precedence::PrecedenceTable;

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserError {
    #[error("expected ')'")]
    ExpectedCloseParen,
    #[error("Expected ')' or ',' in argument list")]
    ExpectedArgumentDelimiter,
    #[error("unknown token when expecting an expression")]
    UnknownToken(Token),
    #[error("Expected function name in prototype")]
    ExpectedFunctionName,
    #[error("Expected '(' in prototype")]
    ExpectedPrototypeOpen,
    #[error("Expected ')' in prototype")]
    ExpectedPrototypeClose,
}

pub type PartialParseResult = Result<Expression, ParserError>;

#[derive(Debug)]
pub struct Parser<I: Iterator<Item = char>> {
    cursor: Cursor<I>,
    precedence: PrecedenceTable,
}

impl<'a> Parser<Chars<'a>> {
    /// parser over a string using the default operator table
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Cursor::from_source(source), PrecedenceTable::default())
    }
}

impl<I: Iterator<Item = char>> Parser<I> {
    pub fn new(cursor: Cursor<I>, precedence: PrecedenceTable) -> Self {
        Self { cursor, precedence }
    }

    pub fn current(&self) -> &Token {
        self.cursor.current()
    }

    pub fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    fn current_precedence(&self) -> i32 {
        self.precedence.token_precedence(self.cursor.current())
    }

    /// numberexpr ::= number
    fn parse_number(&mut self, value: f64) -> PartialParseResult {
        self.advance();
        Ok(Expression::Number(value))
    }

    /// identifierexpr ::= identifier | identifier '(' (expression (',' expression)*)? ')'
    fn parse_identifier(&mut self, name: String) -> PartialParseResult {
        self.advance();
        if !self.current().is_symbol('(') {
            return Ok(Expression::Variable(name));
        }
        self.advance();

        let mut args = Vec::new();
        if !self.current().is_symbol(')') {
            loop {
                args.push(self.parse_expr()?);

                if self.current().is_symbol(')') {
                    break;
                }
                if !self.current().is_symbol(',') {
                    return Err(ParserError::ExpectedArgumentDelimiter);
                }
                self.advance();
            }
        }
        self.advance();

        Ok(Expression::Call(name, args))
    }

    /// parenexpr ::= '(' expression ')'
    fn parse_nested(&mut self) -> PartialParseResult {
        self.advance();
        let res = self.parse_expr()?;
        if !self.current().is_symbol(')') {
            return Err(ParserError::ExpectedCloseParen);
        }
        self.advance();
        Ok(res)
    }

    fn parse_primary(&mut self) -> PartialParseResult {
        match self.current() {
            Token::Number(value) => {
                let value = *value;
                self.parse_number(value)
            }
            Token::Ident(name) => {
                let name = name.clone();
                self.parse_identifier(name)
            }
            Token::Symbol('(') => self.parse_nested(),
            other => Err(ParserError::UnknownToken(other.clone())),
        }
    }

    /// binoprhs ::= (binop primary)*, folding every operator that binds at
    /// least as tightly as `expr_precedence` onto `lhs`
    fn parse_rhs(&mut self, expr_precedence: i32, lhs: Expression) -> PartialParseResult {
        let mut result = lhs;

        loop {
            let precedence = self.current_precedence();
            let operator = match self.current() {
                Token::Symbol(op) if precedence >= expr_precedence => *op,
                _ => return Ok(result),
            };
            self.advance();

            let mut rhs = self.parse_primary()?;

            if precedence < self.current_precedence() {
                rhs = self.parse_rhs(precedence + 1, rhs)?;
            }

            result = Expression::binary(operator, result, rhs);
        }
    }

    /// expression ::= primary binoprhs
    ///
    /// Nesting through parentheses and call arguments recurses on the native
    /// stack, so input nested tens of thousands deep can overflow it.
    pub fn parse_expr(&mut self) -> PartialParseResult {
        let lhs = self.parse_primary()?;
        self.parse_rhs(0, lhs)
    }

    /// prototype ::= identifier '(' identifier* ')'
    pub fn parse_prototype(&mut self) -> Result<Prototype, ParserError> {
        let name = match self.current() {
            Token::Ident(name) => name.clone(),
            _ => return Err(ParserError::ExpectedFunctionName),
        };
        self.advance();

        if !self.current().is_symbol('(') {
            return Err(ParserError::ExpectedPrototypeOpen);
        }

        let mut params = Vec::new();
        loop {
            self.advance();
            match self.current() {
                Token::Ident(param) => params.push(param.clone()),
                _ => break,
            }
        }
        if !self.current().is_symbol(')') {
            return Err(ParserError::ExpectedPrototypeClose);
        }
        self.advance();

        Ok(Prototype::new(name, params))
    }

    /// definition ::= 'def' prototype expression
    pub fn parse_definition(&mut self) -> Result<Function, ParserError> {
        self.advance();
        let prototype = self.parse_prototype()?;
        let body = self.parse_expr()?;
        Ok(Function { prototype, body })
    }

    /// external ::= 'extern' prototype
    pub fn parse_extern(&mut self) -> Result<Prototype, ParserError> {
        self.advance();
        self.parse_prototype()
    }

    /// toplevelexpr ::= expression, wrapped in an anonymous function
    pub fn parse_top_level_expr(&mut self) -> Result<Function, ParserError> {
        let body = self.parse_expr()?;
        Ok(Function::anonymous(body))
    }
}
