use std::io::{self, BufRead, Write};

/// Line-oriented prompt over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `label` and read one line without its line ending.
    /// Returns None at end of input.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    pub fn say(&mut self, msg: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.out, "{msg}")
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.out)
    }
}
