pub mod ast;
pub mod cursor;
pub mod driver;
pub mod input;
pub mod lexer;
pub mod parser;
pub mod precedence;
