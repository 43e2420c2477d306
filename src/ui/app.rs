//! Line-oriented console for browsing a tree: the terminal stand-in for a
//! window with an "Open Folder" menu, a collapsible tree and two buttons.

use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config::AppConfig;
use crate::pages::tree::view::RowStyle;
use crate::pages::tree::{TreeSession, ViewMode};
use crate::services::clipboard::ClipboardSink;
use crate::services::prompt::LinePrompt;

pub const ABOUT: &str = concat!(
    "FolderMap ",
    env!("CARGO_PKG_VERSION"),
    "\nA tool to visualize folder structures."
);

const HELP: &str = "\
Commands:
  <n>        expand or collapse the folder on row n
  o [PATH]   open a folder (asks for one when PATH is omitted)
  r          rescan the current folder
  t          switch between tree and text view
  c          copy the text tree to the clipboard
  h          show this help
  q          quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Toggle(usize),
    Open(Option<PathBuf>),
    Rebuild,
    ToggleView,
    Copy,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parses one console line. Row numbers are 1-based on screen and
/// 0-based in [`Command::Toggle`].
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Empty;
    }
    if let Ok(n) = line.parse::<usize>() {
        return match n.checked_sub(1) {
            Some(index) => Command::Toggle(index),
            None => Command::Unknown(line.to_string()),
        };
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };
    match head {
        "o" | "open" => Command::Open((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "r" | "rescan" if rest.is_empty() => Command::Rebuild,
        "t" | "text" if rest.is_empty() => Command::ToggleView,
        "c" | "copy" if rest.is_empty() => Command::Copy,
        "h" | "help" | "?" if rest.is_empty() => Command::Help,
        "q" | "quit" | "exit" if rest.is_empty() => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

pub struct FolderMapApp<R, W> {
    session: TreeSession,
    clipboard: Box<dyn ClipboardSink>,
    style: RowStyle,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> FolderMapApp<R, W> {
    pub fn new(config: &AppConfig, clipboard: Box<dyn ClipboardSink>, input: R, output: W) -> Self {
        Self {
            session: TreeSession::new(config.build_options()),
            clipboard,
            style: RowStyle {
                indent_width: config.indent_width,
                icons: config.icons,
            },
            input,
            output,
        }
    }

    pub fn session(&self) -> &TreeSession {
        &self.session
    }

    /// Runs until `q` or end of input. `initial` is opened first when given.
    pub fn run(&mut self, initial: Option<&Path>) -> std::io::Result<()> {
        if let Some(path) = initial {
            self.open(path)?;
        }
        self.draw()?;

        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            let command = parse_command(&line);
            debug!(?command, "console command");
            if self.execute(command)?.is_break() {
                break;
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> std::io::Result<ControlFlow<()>> {
        match command {
            Command::Toggle(index) => {
                if self.session.view_mode() != ViewMode::Tree {
                    writeln!(self.output, "Switch to the tree view first (t).")?;
                    return Ok(ControlFlow::Continue(()));
                }
                if self.session.toggle_row(index).is_none() {
                    writeln!(self.output, "Row {} is not a folder.", index + 1)?;
                    return Ok(ControlFlow::Continue(()));
                }
                self.draw()?;
            }
            Command::Open(Some(path)) => {
                self.open(&path)?;
                self.draw()?;
            }
            Command::Open(None) => {
                let mut prompt = LinePrompt::new(&mut self.input, &mut self.output);
                match self.session.select_folder(&mut prompt) {
                    Ok(true) => self.draw()?,
                    Ok(false) => {}
                    Err(e) => writeln!(self.output, "{e}")?,
                }
            }
            Command::Rebuild => match self.session.rebuild() {
                Ok(_) => self.draw()?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::ToggleView => match self.session.toggle_view() {
                Ok(_) => self.draw()?,
                Err(e) => writeln!(self.output, "{e}")?,
            },
            Command::Copy => {
                if self
                    .session
                    .copy_to_clipboard(self.clipboard.as_mut())
                    .is_ok()
                {
                    writeln!(self.output, "Copied to clipboard")?;
                }
            }
            Command::Help => writeln!(self.output, "{ABOUT}\n\n{HELP}")?,
            Command::Quit => return Ok(ControlFlow::Break(())),
            Command::Empty => self.draw()?,
            Command::Unknown(text) => {
                writeln!(self.output, "Unknown command `{text}`. Type h for help.")?
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    fn open(&mut self, path: &Path) -> std::io::Result<()> {
        if let Err(e) = self.session.open(path) {
            writeln!(self.output, "{e}")?;
        }
        Ok(())
    }

    /// Redraws the whole view from the root.
    fn draw(&mut self) -> std::io::Result<()> {
        if self.session.tree().is_none() {
            return writeln!(self.output, "No folder open. Type `o` to open one.");
        }

        match self.session.view_mode() {
            ViewMode::Tree => {
                for (i, row) in self.session.rows().iter().enumerate() {
                    writeln!(self.output, "{:>4}  {}", i + 1, row.to_line(&self.style))?;
                }
            }
            ViewMode::Text => {
                if let Some(text) = self.session.text() {
                    write!(self.output, "{text}")?;
                }
            }
        }

        let report = self.session.report();
        if !report.is_clean() {
            debug!(?report, "entries left out of the tree");
        }
        writeln!(
            self.output,
            "[{}] [c: Copy to clipboard]",
            self.session.view_mode().switch_label()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands() {
        assert_eq!(parse_command("3\n"), Command::Toggle(2));
        assert_eq!(parse_command("0"), Command::Unknown("0".into()));
        assert_eq!(parse_command("o"), Command::Open(None));
        assert_eq!(
            parse_command("o  /tmp/my dir "),
            Command::Open(Some(PathBuf::from("/tmp/my dir")))
        );
        assert_eq!(parse_command("t"), Command::ToggleView);
        assert_eq!(parse_command("copy"), Command::Copy);
        assert_eq!(parse_command("r"), Command::Rebuild);
        assert_eq!(parse_command("?"), Command::Help);
        assert_eq!(parse_command("q"), Command::Quit);
        assert_eq!(parse_command("   "), Command::Empty);
        assert_eq!(parse_command("q now"), Command::Unknown("q now".into()));
        assert_eq!(parse_command("zap"), Command::Unknown("zap".into()));
    }
}
