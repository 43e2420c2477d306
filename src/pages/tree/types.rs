use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Folder paths currently shown open in the interactive view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionSet {
    open: HashSet<PathBuf>,
}

impl ExpansionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collapses everything except `root`.
    pub fn reset_to(&mut self, root: &Path) {
        self.open.clear();
        self.open.insert(root.to_path_buf());
    }

    /// Flips `path` and returns whether it is now expanded.
    pub fn toggle(&mut self, path: &Path) -> bool {
        if self.open.remove(path) {
            false
        } else {
            self.open.insert(path.to_path_buf());
            true
        }
    }

    pub fn is_expanded(&self, path: &Path) -> bool {
        self.open.contains(path)
    }

    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Tree,
    Text,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Tree => ViewMode::Text,
            ViewMode::Text => ViewMode::Tree,
        }
    }

    /// Label of the switch that leaves this mode.
    pub fn switch_label(&self) -> &'static str {
        match self {
            ViewMode::Tree => "Show as text",
            ViewMode::Text => "Show tree",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_membership() {
        let mut set = ExpansionSet::new();
        set.reset_to(Path::new("/r"));
        let before = set.clone();

        assert!(set.toggle(Path::new("/r/a")));
        assert!(set.is_expanded(Path::new("/r/a")));
        assert!(!set.toggle(Path::new("/r/a")));
        assert_eq!(set, before);

        assert!(!set.toggle(Path::new("/r")));
        assert!(set.toggle(Path::new("/r")));
        assert_eq!(set, before);
    }

    #[test]
    fn reset_keeps_only_root() {
        let mut set = ExpansionSet::new();
        set.toggle(Path::new("/old/a"));
        set.toggle(Path::new("/old/b"));
        set.reset_to(Path::new("/new"));
        assert_eq!(set.len(), 1);
        assert!(set.is_expanded(Path::new("/new")));
        assert!(!set.is_expanded(Path::new("/old/a")));
    }

    #[test]
    fn view_mode_flips() {
        assert_eq!(ViewMode::default(), ViewMode::Tree);
        assert_eq!(ViewMode::Tree.toggled(), ViewMode::Text);
        assert_eq!(ViewMode::Text.toggled().switch_label(), "Show as text");
    }
}
