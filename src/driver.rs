use std::io::{self, Write};

use tracing::debug;

use crate::ast::TopLevel;
use crate::lexer::Token;
use crate::parser::{Parser, ParserError};

pub const DEFAULT_PROMPT: &str = "ready> ";

/// outcome of one pass through the top-level loop
#[derive(Debug, PartialEq, Clone)]
pub enum Step {
    Done,
    Separator,
    Parsed(TopLevel),
    /// the unit failed and one token has already been skipped
    Failed(ParserError),
}

#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct Summary {
    pub parsed: usize,
    pub failed: usize,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub prompt: String,
    pub dump_ast: bool,
}

impl std::default::Default for Options {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            dump_ast: false,
        }
    }
}

/// top ::= definition | external | expression | ';'
pub struct Driver<I: Iterator<Item = char>, W: Write> {
    parser: Parser<I>,
    diagnostics: W,
    options: Options,
}

impl<I: Iterator<Item = char>, W: Write> Driver<I, W> {
    pub fn new(parser: Parser<I>, diagnostics: W, options: Options) -> Self {
        Self {
            parser,
            diagnostics,
            options,
        }
    }

    fn recover<T>(&mut self, result: Result<T, ParserError>) -> Result<T, ParserError> {
        result.map_err(|err| {
            let skipped = self.parser.advance();
            debug!(error = %err, skipped = %skipped, "recovered from failed unit");
            err
        })
    }

    /// classify the unit under the cursor and parse it, skipping a single
    /// token if it fails
    pub fn step(&mut self) -> Step {
        let unit = match self.parser.current() {
            Token::EndOfInput => return Step::Done,
            Token::Symbol(';') => {
                self.parser.advance();
                return Step::Separator;
            }
            Token::Def => {
                let res = self.parser.parse_definition();
                self.recover(res).map(TopLevel::Definition)
            }
            Token::Extern => {
                let res = self.parser.parse_extern();
                self.recover(res).map(TopLevel::Extern)
            }
            _ => {
                let res = self.parser.parse_top_level_expr();
                self.recover(res).map(TopLevel::Expression)
            }
        };

        match unit {
            Ok(unit) => {
                debug!(ast = %unit, "parsed unit");
                Step::Parsed(unit)
            }
            Err(err) => Step::Failed(err),
        }
    }

    /// run until end of input, writing a prompt before every step and a
    /// diagnostic line after every unit
    pub fn run(&mut self) -> io::Result<Summary> {
        let mut summary = Summary::default();

        loop {
            write!(self.diagnostics, "{}", self.options.prompt)?;
            self.diagnostics.flush()?;

            match self.step() {
                Step::Done => break,
                Step::Separator => {}
                Step::Parsed(unit) => {
                    summary.parsed += 1;
                    let message = match unit {
                        TopLevel::Definition(_) => "Parsed a function definition.",
                        TopLevel::Extern(_) => "Parsed an extern.",
                        TopLevel::Expression(_) => "Parsed a top-level expr.",
                    };
                    writeln!(self.diagnostics, "{}", message)?;
                    if self.options.dump_ast {
                        writeln!(self.diagnostics, "{}", unit)?;
                    }
                }
                Step::Failed(err) => {
                    summary.failed += 1;
                    writeln!(self.diagnostics, "LogError: {}", err)?;
                }
            }
        }

        debug!(parsed = summary.parsed, failed = summary.failed, "reached end of input");
        Ok(summary)
    }

    pub fn into_diagnostics(self) -> W {
        self.diagnostics
    }
}
