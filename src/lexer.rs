use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    EndOfInput,
    Def,
    Extern,
    Ident(String),
    Number(f64),
    /// any other single character, operators and punctuation included
    Symbol(char),
}

impl Token {
    pub fn is_symbol(&self, symbol: char) -> bool {
        matches!(self, Token::Symbol(c) if *c == symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::EndOfInput => write!(f, "<eof>"),
            Token::Def => write!(f, "def"),
            Token::Extern => write!(f, "extern"),
            Token::Ident(name) => write!(f, "{}", name),
            Token::Number(value) => write!(f, "{}", value),
            Token::Symbol(c) => write!(f, "{}", c),
        }
    }
}

lazy_static! {
    static ref NUMBER_PREFIX_RE: Regex = Regex::new(r"^(?:\d+\.?\d*|\.\d+)").unwrap();
}

/// convert the raw run of digits and dots, keeping only the longest valid
/// prefix - `1.2.3` is `1.2`, a lone `.` is `0`
fn parse_number(raw: &str) -> f64 {
    NUMBER_PREFIX_RE
        .find(raw)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// pulls characters from `chars` one at a time, holding a single character
/// of lookahead between calls
#[derive(Debug)]
pub struct Lexer<I: Iterator<Item = char>> {
    chars: I,
    last_char: Option<char>,
}

impl<I: Iterator<Item = char>> Lexer<I> {
    pub fn new(chars: I) -> Self {
        Self {
            chars,
            last_char: Some(' '),
        }
    }

    fn bump(&mut self) -> Option<char> {
        self.last_char = self.chars.next();
        self.last_char
    }

    fn lex_word(&mut self, first: char) -> Token {
        let mut word = first.to_string();
        while let Some(c) = self.bump() {
            if !c.is_alphanumeric() {
                break;
            }
            word.push(c);
        }

        match word.as_str() {
            "def" => Token::Def,
            "extern" => Token::Extern,
            _ => Token::Ident(word),
        }
    }

    fn lex_number(&mut self, first: char) -> Token {
        let mut raw = first.to_string();
        while let Some(c) = self.bump() {
            if !(c.is_ascii_digit() || c == '.') {
                break;
            }
            raw.push(c);
        }
        Token::Number(parse_number(&raw))
    }

    pub fn next_token(&mut self) -> Token {
        loop {
            while matches!(self.last_char, Some(c) if c.is_whitespace()) {
                self.bump();
            }

            let c = match self.last_char {
                Some(c) => c,
                None => return Token::EndOfInput,
            };

            if c.is_alphabetic() {
                return self.lex_word(c);
            }
            if c.is_ascii_digit() || c == '.' {
                return self.lex_number(c);
            }
            if c == '#' {
                while let Some(c) = self.bump() {
                    if c == '\n' || c == '\r' {
                        break;
                    }
                }
                continue;
            }

            self.bump();
            return Token::Symbol(c);
        }
    }
}

impl<I: Iterator<Item = char>> Iterator for Lexer<I> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token::EndOfInput => None,
            tok => Some(tok),
        }
    }
}

/// lex the whole input string, in source order and without the final `EndOfInput`
pub fn lex(input: &str) -> Vec<Token> {
    Lexer::new(input.chars()).collect()
}
