use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::core::errors::{Error, Result};
use crate::models::Node;
use crate::services::clipboard::ClipboardSink;
use crate::services::fs::builder::{build_tree_with, BuildOptions, BuildReport, BuiltTree};
use crate::services::prompt::FolderPrompt;

pub mod entries;
pub mod types;
pub mod view;

pub use types::{ExpansionSet, ViewMode};
use view::{render_interactive, render_text, TreeRow};

/// State of one browsing session: the current tree, which folders are
/// open, and whether the tree or its text export is shown.
#[derive(Debug, Default)]
pub struct TreeSession {
    tree: Option<Node>,
    report: BuildReport,
    expansion: ExpansionSet,
    view_mode: ViewMode,
    options: BuildOptions,
}

impl TreeSession {
    pub fn new(options: BuildOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn tree(&self) -> Option<&Node> {
        self.tree.as_ref()
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    pub fn expansion(&self) -> &ExpansionSet {
        &self.expansion
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Builds `path` and makes it the current tree. On error the previous
    /// tree stays in place.
    pub fn open(&mut self, path: &Path) -> Result<&Node> {
        let built = build_tree_with(path, self.options)?;
        Ok(self.load(built))
    }

    /// Replaces the tree wholesale and collapses everything but the root.
    pub fn load(&mut self, built: BuiltTree) -> &Node {
        self.expansion.reset_to(built.root.path());
        self.report = built.report;
        info!(root = %built.root.path().display(), "folder opened");
        self.tree.insert(built.root)
    }

    /// Asks `prompt` for a folder and opens it. `Ok(false)` when the user
    /// cancelled.
    pub fn select_folder(&mut self, prompt: &mut dyn FolderPrompt) -> Result<bool> {
        match prompt.prompt() {
            Some(path) => self.open(&path).map(|_| true),
            None => Ok(false),
        }
    }

    /// Walks the current root again.
    pub fn rebuild(&mut self) -> Result<&Node> {
        let root = self.root_path().ok_or(Error::NoTree)?;
        self.open(&root)
    }

    fn root_path(&self) -> Option<PathBuf> {
        self.tree.as_ref().map(|t| t.path().to_path_buf())
    }

    /// Flips a folder open or closed; returns the new state.
    pub fn toggle(&mut self, path: &Path) -> bool {
        self.expansion.toggle(path)
    }

    /// Toggles the folder shown at `index` in [`rows`](Self::rows).
    /// `None` when the row does not exist or is a file.
    pub fn toggle_row(&mut self, index: usize) -> Option<bool> {
        let path = self
            .rows()
            .get(index)
            .filter(|row| row.is_toggleable())
            .map(|row| row.path().to_path_buf())?;
        Some(self.toggle(&path))
    }

    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        self.tree
            .as_ref()
            .map(|t| render_interactive(t, &self.expansion))
            .unwrap_or_default()
    }

    /// The exportable text diagram of the current tree.
    pub fn text(&self) -> Option<String> {
        self.tree.as_ref().map(render_text)
    }

    pub fn toggle_view(&mut self) -> Result<ViewMode> {
        if self.tree.is_none() {
            return Err(Error::NoTree);
        }
        self.view_mode = self.view_mode.toggled();
        Ok(self.view_mode)
    }

    /// Sends the text diagram to `sink`. Nothing in the session changes,
    /// whatever the outcome.
    pub fn copy_to_clipboard(&self, sink: &mut dyn ClipboardSink) -> Result<()> {
        let text = self.text().ok_or(Error::NoTree)?;
        sink.write_text(&text).inspect_err(|e| {
            warn!("copy to clipboard failed: {}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::clipboard::MemoryClipboard;
    use crate::services::prompt::FixedPrompt;
    use std::fs;

    struct FailingClipboard;

    impl ClipboardSink for FailingClipboard {
        fn write_text(&mut self, _text: &str) -> Result<()> {
            Err(Error::Clipboard("no display".into()))
        }
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.txt"), b"deep").unwrap();
        fs::write(dir.path().join("top.txt"), vec![0u8; 1536]).unwrap();
        dir
    }

    #[test]
    fn open_resets_expansion_to_root() {
        let first = project();
        let second = project();
        let mut session = TreeSession::default();

        session.open(first.path()).unwrap();
        session.toggle(&first.path().join("a"));
        assert_eq!(session.expansion().len(), 2);

        session.open(second.path()).unwrap();
        assert_eq!(session.expansion().len(), 1);
        assert!(session.expansion().is_expanded(second.path()));
    }

    #[test]
    fn failed_open_keeps_previous_tree() {
        let dir = project();
        let mut session = TreeSession::default();
        session.open(dir.path()).unwrap();
        session.toggle(&dir.path().join("a"));
        let before = session.expansion().clone();

        let err = session.open(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, Error::RootUnreachable { .. }));
        assert_eq!(session.tree().unwrap().path(), dir.path());
        assert_eq!(session.expansion(), &before);
    }

    #[test]
    fn cancelled_prompt_changes_nothing() {
        let mut session = TreeSession::default();
        assert!(!session.select_folder(&mut FixedPrompt(None)).unwrap());
        assert!(session.tree().is_none());

        let dir = project();
        assert!(session
            .select_folder(&mut FixedPrompt(Some(dir.path().to_path_buf())))
            .unwrap());
        assert!(session.tree().is_some());
    }

    #[test]
    fn toggle_row_only_affects_folders() {
        let dir = project();
        let mut session = TreeSession::default();
        session.open(dir.path()).unwrap();

        // rows: root, a, top.txt
        assert_eq!(session.rows().len(), 3);
        assert_eq!(session.toggle_row(2), None);
        assert_eq!(session.toggle_row(9), None);
        assert_eq!(session.toggle_row(1), Some(true));
        assert_eq!(session.rows().len(), 4);
        assert_eq!(session.toggle_row(1), Some(false));
        assert_eq!(session.rows().len(), 3);
    }

    #[test]
    fn copy_writes_text_artifact() {
        let dir = project();
        let mut session = TreeSession::default();
        session.open(dir.path()).unwrap();

        let mut clipboard = MemoryClipboard::new();
        session.copy_to_clipboard(&mut clipboard).unwrap();
        let text = clipboard.contents().unwrap();
        assert_eq!(text, session.text().unwrap());
        assert!(text.ends_with("└── top.txt (1.5 KB)\n"));
    }

    #[test]
    fn failed_copy_leaves_state_alone() {
        let dir = project();
        let mut session = TreeSession::default();
        session.open(dir.path()).unwrap();
        let expansion = session.expansion().clone();

        assert!(session.copy_to_clipboard(&mut FailingClipboard).is_err());
        assert_eq!(session.expansion(), &expansion);
        assert_eq!(session.view_mode(), ViewMode::Tree);
    }

    #[test]
    fn view_toggle_needs_a_tree() {
        let mut session = TreeSession::default();
        assert!(matches!(session.toggle_view(), Err(Error::NoTree)));
        assert!(matches!(
            session.copy_to_clipboard(&mut MemoryClipboard::new()),
            Err(Error::NoTree)
        ));

        let dir = project();
        session.open(dir.path()).unwrap();
        assert_eq!(session.toggle_view().unwrap(), ViewMode::Text);
        assert_eq!(session.toggle_view().unwrap(), ViewMode::Tree);
    }

    #[test]
    fn rebuild_picks_up_new_entries() {
        let dir = project();
        let mut session = TreeSession::default();
        session.open(dir.path()).unwrap();
        fs::write(dir.path().join("new.txt"), b"x").unwrap();

        let root = session.rebuild().unwrap();
        assert!(root.child("new.txt").is_some());
    }
}
