use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use foldermap::core::config::{AppConfig, DEFAULT_INDENT_WIDTH, DEFAULT_LOG_DIRECTIVE};
use foldermap::core::telemetry::logging::init_logging;
use foldermap::services::clipboard::default_sink;
use foldermap::services::fs::builder::build_tree_with;
use foldermap::ui::FolderMapApp;
use foldermap::{render_text, TreeSession};

#[derive(Parser)]
#[command(name = "foldermap", version, about = "A tool to visualize folder structures.")]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = DEFAULT_LOG_DIRECTIVE)]
    log: String,

    /// Treat symbolic links as plain entries instead of following them
    #[arg(long, global = true)]
    no_follow: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the whole tree of a folder
    Tree {
        path: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Also copy the text tree to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Browse a folder as a collapsible tree
    Browse {
        path: Option<PathBuf>,
        /// Columns per nesting level
        #[arg(long, default_value_t = DEFAULT_INDENT_WIDTH)]
        indent: usize,
        #[arg(long)]
        no_icons: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig {
        follow_symlinks: !cli.no_follow,
        log_directive: cli.log.clone(),
        ..AppConfig::default()
    };
    init_logging(&config.log_directive);

    match cli.command {
        Command::Tree { path, format, copy } => print_tree(&config, &path, format, copy),
        Command::Browse {
            path,
            indent,
            no_icons,
        } => {
            let config = AppConfig {
                indent_width: indent,
                icons: !no_icons,
                ..config
            };
            let stdin = io::stdin().lock();
            let mut app = FolderMapApp::new(&config, default_sink(), stdin, io::stdout());
            app.run(path.as_deref()).context("console I/O failed")
        }
    }
}

fn print_tree(config: &AppConfig, path: &Path, format: Format, copy: bool) -> Result<()> {
    let built = build_tree_with(path, config.build_options())
        .with_context(|| format!("failed to read {}", path.display()))?;

    let mut stdout = io::stdout().lock();
    match format {
        Format::Text => stdout.write_all(render_text(&built.root).as_bytes())?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut stdout, &built.root.to_dto())?;
            writeln!(stdout)?;
        }
    }

    if copy {
        let mut session = TreeSession::new(config.build_options());
        session.load(built);
        session
            .copy_to_clipboard(default_sink().as_mut())
            .context("failed to copy to clipboard")?;
        eprintln!("Copied to clipboard");
    }
    Ok(())
}
