//! Line-oriented console shared by the navigator and the actions it runs.

use log::warn;
use std::io::{self, BufRead, Write};

/// A line-at-a-time terminal.
pub trait Console {
    /// Reads one line without its terminator. `Ok(None)` means end of input.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Writes text without a trailing newline (prompts).
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

/// [`Console`] over any buffered reader and writer.
///
/// `LineConsole::stdio()` is the real terminal; tests build one over a byte
/// slice and a `Vec<u8>` and inspect the output afterwards.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LineConsole<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) {
        // A broken stdout leaves nothing useful to report to; log and carry on.
        if let Err(e) = self.output.write_all(text.as_bytes()).and_then(|_| self.output.flush()) {
            warn!("Console write failed: {}", e);
        }
    }
}

/// Writes `question` and returns the trimmed answer.
///
/// End of input and read errors both yield an empty answer.
pub fn prompt(console: &mut dyn Console, question: &str) -> String {
    console.write(question);
    match console.read_line() {
        Ok(Some(line)) => line.trim().to_string(),
        Ok(None) => String::new(),
        Err(e) => {
            warn!("Failed to read answer to {:?}: {}", question, e);
            String::new()
        }
    }
}
