use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Asks the user for a folder. `None` means the user cancelled.
pub trait FolderPrompt {
    fn prompt(&mut self) -> Option<PathBuf>;
}

/// Reads one line from a reader; an empty line or EOF cancels.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> FolderPrompt for LinePrompt<R, W> {
    fn prompt(&mut self) -> Option<PathBuf> {
        let _ = write!(self.output, "Select a folder: ");
        let _ = self.output.flush();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim();
                (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
            }
        }
    }
}

/// Yields a fixed answer once.
#[derive(Debug, Clone, Default)]
pub struct FixedPrompt(pub Option<PathBuf>);

impl FolderPrompt for FixedPrompt {
    fn prompt(&mut self) -> Option<PathBuf> {
        self.0.take()
    }
}
