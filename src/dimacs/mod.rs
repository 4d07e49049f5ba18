// Copyright (c) 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Reading files in DIMACS format.

pub mod max;

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::str::{FromStr, SplitWhitespace};

use log::warn;
use thiserror::Error;

/// Error when reading a file in DIMACS format.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("missing problem line")]
    MissingProblemLine,
    #[error("Format error on line {line}: {msg}")]
    Format { line: usize, msg: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// A line based reader skipping empty and comment lines.
pub struct DimacsReader<R: Read> {
    io: BufReader<R>,

    buf: Vec<u8>,
    line: String,
    line_number: usize,
}

impl<R: Read> DimacsReader<R> {
    pub fn new(reader: R) -> Self {
        DimacsReader {
            io: BufReader::new(reader),
            buf: Vec::new(),
            line: String::new(),
            line_number: 0,
        }
    }

    /// Return the tokens of the next non-comment line.
    ///
    /// The first token is the line's descriptor. Returns `None` at the
    /// end of the input. Invalid UTF-8 sequences are replaced by
    /// `U+FFFD`, so they never form a valid token.
    pub fn read_line(&mut self) -> Result<Option<Tokens>> {
        let line = &mut self.line;
        loop {
            self.buf.clear();
            if self.io.read_until(b'\n', &mut self.buf)? == 0 {
                return Ok(None);
            }

            self.line_number += 1;
            line.clear();
            match std::str::from_utf8(&self.buf) {
                Ok(s) => line.push_str(s),
                Err(_) => {
                    warn!("Line {}: invalid UTF-8", self.line_number);
                    line.push_str(&String::from_utf8_lossy(&self.buf));
                }
            }
            let mut it = line.char_indices();
            while let Some((i, c)) = it.next() {
                if char::is_whitespace(c) {
                    continue;
                }
                if c == 'c' {
                    break;
                }
                return Ok(Some(Tokens {
                    it: line[i..].split_whitespace(),
                    line: self.line_number,
                }));
            }
        }
    }
}

/// Iterates over the tokens in a line.
pub struct Tokens<'a> {
    it: SplitWhitespace<'a>,
    pub line: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        self.it.next()
    }
}

impl<'a> Tokens<'a> {
    /// Returns the next token as `&str`.
    pub fn str(&mut self) -> Result<&'a str> {
        self.it.next().ok_or_else(|| Error::Format {
            line: self.line,
            msg: "expected token".to_string(),
        })
    }

    /// Returns the next token converted to a number.
    pub fn number<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let line = self.line;
        self.it
            .next()
            .ok_or_else(|| Error::Format {
                line,
                msg: "expected number".to_string(),
            })?
            .parse()
            .map_err(|e| Error::Format {
                line,
                msg: format!("{}", e),
            })
    }

    /// Returns the next token as a 1-based node id converted to 0-based.
    ///
    /// Fails if the id is not in `1..=n`.
    pub fn node(&mut self, n: usize) -> Result<usize> {
        let u: usize = self.number()?;
        if u < 1 || u > n {
            return Err(Error::Format {
                line: self.line,
                msg: format!("invalid node id {} (must be in 1..{})", u, n),
            });
        }
        Ok(u - 1)
    }
}
