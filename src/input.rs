use std::io::BufRead;

use tracing::error;

/// lazily pulls characters out of a reader a line at a time, so an
/// interactive session only blocks when the lexer actually needs more input.
/// Bytes that are not valid UTF-8 come out as U+FFFD.
#[derive(Debug)]
pub struct ReadChars<R> {
    reader: R,
    raw: Vec<u8>,
    line: String,
    pos: usize,
    finished: bool,
}

impl<R: BufRead> ReadChars<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            raw: Vec::new(),
            line: String::new(),
            pos: 0,
            finished: false,
        }
    }
}

impl<R: BufRead> Iterator for ReadChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        loop {
            if let Some(c) = self.line[self.pos..].chars().next() {
                self.pos += c.len_utf8();
                return Some(c);
            }
            if self.finished {
                return None;
            }

            self.raw.clear();
            self.pos = 0;
            match self.reader.read_until(b'\n', &mut self.raw) {
                Ok(0) => {
                    self.line.clear();
                    self.finished = true;
                }
                Ok(_) => self.line = String::from_utf8_lossy(&self.raw).into_owned(),
                Err(e) => {
                    self.line.clear();
                    error!("failed to read input, treating it as ended: {}", e);
                    self.finished = true;
                }
            }
        }
    }
}
