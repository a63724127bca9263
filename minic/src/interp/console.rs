//! Console bridge for the `print` and `read` built-ins

use super::error::{InterpResult, RuntimeError};
use std::collections::VecDeque;
use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

/// Text I/O used by the built-ins
pub trait Console {
    /// Emit one line of output
    fn write_line(&mut self, line: &str) -> InterpResult<()>;

    fn flush(&mut self) -> InterpResult<()>;

    /// Next whitespace-delimited input token
    fn read_token(&mut self) -> InterpResult<String>;
}

/// Console over any buffered reader and writer
#[derive(Debug)]
pub struct StreamConsole<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

/// Console bound to the process's standard streams
pub type StdConsole = StreamConsole<StdinLock<'static>, Stdout>;

impl StdConsole {
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        StreamConsole::new(stdin.lock(), io::stdout())
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::stdio()
    }
}

impl<R: BufRead, W: Write> StreamConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        StreamConsole {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Refill the token queue from the next non-blank line.
    /// Returns false at end of input.
    fn fill(&mut self) -> InterpResult<bool> {
        while self.pending.is_empty() {
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
        Ok(true)
    }
}

impl<R> StreamConsole<R, Vec<u8>> {
    /// Everything written so far, as text
    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.writer).into_owned()
    }
}

impl<R: BufRead, W: Write> Console for StreamConsole<R, W> {
    fn write_line(&mut self, line: &str) -> InterpResult<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }

    fn flush(&mut self) -> InterpResult<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn read_token(&mut self) -> InterpResult<String> {
        if !self.fill()? {
            return Err(RuntimeError::end_of_input());
        }
        self.pending.pop_front().ok_or_else(RuntimeError::end_of_input)
    }
}

/// Parse an integer token
pub fn parse_int(token: &str) -> InterpResult<i64> {
    token
        .parse::<i64>()
        .map_err(|_| RuntimeError::type_error("integer input", token))
}

/// Parse a boolean token: `true`, `false`, or an integer (non-zero is true)
pub fn parse_bool(token: &str) -> InterpResult<bool> {
    match token {
        "true" => Ok(true),
        "false" => Ok(false),
        other => other
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| RuntimeError::type_error("boolean input", other)),
    }
}
