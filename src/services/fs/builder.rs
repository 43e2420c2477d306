use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use super::inspect::{FsInspector, Inspected, Inspector};
use crate::core::errors::{Error, Result};
use crate::models::{last_segment, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Inspect through symbolic links instead of treating them as leaves.
    pub follow_symlinks: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
        }
    }
}

/// Counts of what the builder silently left out of a tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Entries that failed inspection and were omitted.
    pub skipped_entries: usize,
    /// Directories whose listing failed; they appear with no children.
    pub unreadable_dirs: usize,
    /// Directories omitted because they resolve to one of their ancestors.
    pub cycles: usize,
}

impl BuildReport {
    pub fn is_clean(&self) -> bool {
        *self == BuildReport::default()
    }
}

#[derive(Debug)]
pub struct BuiltTree {
    pub root: Node,
    pub report: BuildReport,
}

/// Builds the tree for `root` from the local filesystem.
pub fn build_tree(root: impl AsRef<Path>) -> Result<Node> {
    Ok(build_tree_with(root, BuildOptions::default())?.root)
}

pub fn build_tree_with(root: impl AsRef<Path>, options: BuildOptions) -> Result<BuiltTree> {
    TreeBuilder::new(FsInspector::new(options.follow_symlinks)).build(root.as_ref())
}

pub struct TreeBuilder<I> {
    inspector: I,
}

struct Pending {
    name: String,
    path: PathBuf,
    parent: Option<usize>,
    real: Option<PathBuf>,
    kind: PendingKind,
}

enum PendingKind {
    File(u64),
    Folder(Vec<usize>),
}

impl<I: Inspector> TreeBuilder<I> {
    pub fn new(inspector: I) -> Self {
        Self { inspector }
    }

    /// Walks `root` with an explicit work-list. Only a failure to inspect
    /// `root` itself is an error; everything below degrades silently and
    /// is tallied in the returned report.
    pub fn build(&self, root: &Path) -> Result<BuiltTree> {
        let start = Instant::now();
        let root_kind = self
            .inspector
            .inspect(root)
            .map_err(|source| Error::RootUnreachable {
                path: root.to_path_buf(),
                source,
            })?;

        let mut report = BuildReport::default();
        let mut arena = Vec::new();
        let mut work = Vec::new();

        match root_kind {
            Inspected::File { size } => arena.push(Pending {
                name: last_segment(root),
                path: root.to_path_buf(),
                parent: None,
                real: None,
                kind: PendingKind::File(size),
            }),
            Inspected::Directory => {
                arena.push(Pending {
                    name: last_segment(root),
                    path: root.to_path_buf(),
                    parent: None,
                    real: self.inspector.real_path(root).ok(),
                    kind: PendingKind::Folder(Vec::new()),
                });
                work.push(0);
            }
        }

        while let Some(idx) = work.pop() {
            let dir = arena[idx].path.clone();
            let names = match self.inspector.list(&dir) {
                Ok(names) => names,
                Err(e) => {
                    debug!(path = %dir.display(), error = %e, "unreadable directory");
                    report.unreadable_dirs += 1;
                    continue;
                }
            };

            for raw in names {
                let path = dir.join(&raw);
                let (kind, real) = match self.inspector.inspect(&path) {
                    Ok(Inspected::File { size }) => (PendingKind::File(size), None),
                    Ok(Inspected::Directory) => match self.inspector.real_path(&path) {
                        Ok(real) if is_cycle(&arena, idx, &real) => {
                            debug!(path = %path.display(), "skipping directory cycle");
                            report.cycles += 1;
                            continue;
                        }
                        Ok(real) => (PendingKind::Folder(Vec::new()), Some(real)),
                        Err(e) => {
                            debug!(path = %path.display(), error = %e, "cannot resolve directory");
                            report.skipped_entries += 1;
                            continue;
                        }
                    },
                    Err(e) => {
                        debug!(path = %path.display(), error = %e, "skipping entry");
                        report.skipped_entries += 1;
                        continue;
                    }
                };

                let child = arena.len();
                if matches!(kind, PendingKind::Folder(_)) {
                    work.push(child);
                }
                arena.push(Pending {
                    name: raw.to_string_lossy().into_owned(),
                    path,
                    parent: Some(idx),
                    real,
                    kind,
                });
                if let PendingKind::Folder(children) = &mut arena[idx].kind {
                    children.push(child);
                }
            }
        }

        let total = arena.len();
        let root = assemble(arena);
        info!(
            root = %root.path().display(),
            nodes = total,
            skipped = report.skipped_entries,
            unreadable = report.unreadable_dirs,
            cycles = report.cycles,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "tree built"
        );
        Ok(BuiltTree { root, report })
    }
}

fn is_cycle(arena: &[Pending], parent: usize, real: &Path) -> bool {
    let mut cursor = Some(parent);
    while let Some(idx) = cursor {
        if arena[idx].real.as_deref() == Some(real) {
            return true;
        }
        cursor = arena[idx].parent;
    }
    false
}

/// Children always sit after their parent in the arena, so a reverse
/// sweep finishes every child before the folder that owns it.
fn assemble(arena: Vec<Pending>) -> Node {
    let mut done: Vec<Option<Node>> = Vec::with_capacity(arena.len());
    done.resize_with(arena.len(), || None);

    for (idx, pending) in arena.into_iter().enumerate().rev() {
        let node = match pending.kind {
            PendingKind::File(size) => Node::file(pending.name, pending.path, size),
            PendingKind::Folder(child_ids) => {
                let children: Vec<Node> =
                    child_ids.into_iter().filter_map(|c| done[c].take()).collect();
                Node::folder(pending.name, pending.path, children)
            }
        };
        done[idx] = Some(node);
    }

    done.swap_remove(0)
        .unwrap_or_else(|| unreachable!("arena always holds the root"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::ffi::OsString;
    use std::io;

    enum Fake {
        Dir(Vec<&'static str>),
        File(u64),
        Unlistable,
    }

    struct FakeInspector {
        entries: HashMap<PathBuf, Fake>,
    }

    impl FakeInspector {
        fn new(entries: Vec<(&'static str, Fake)>) -> Self {
            Self {
                entries: entries
                    .into_iter()
                    .map(|(p, e)| (PathBuf::from(p), e))
                    .collect(),
            }
        }
    }

    impl Inspector for FakeInspector {
        fn inspect(&self, path: &Path) -> io::Result<Inspected> {
            match self.entries.get(path) {
                Some(Fake::File(size)) => Ok(Inspected::File { size: *size }),
                Some(_) => Ok(Inspected::Directory),
                None => Err(io::Error::new(io::ErrorKind::NotFound, "missing")),
            }
        }

        fn list(&self, path: &Path) -> io::Result<Vec<OsString>> {
            match self.entries.get(path) {
                Some(Fake::Dir(names)) => Ok(names.iter().map(OsString::from).collect()),
                _ => Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            }
        }
    }

    #[test]
    fn unreadable_subdirectory_becomes_empty_folder() {
        let inspector = FakeInspector::new(vec![
            ("/r", Fake::Dir(vec!["locked", "a.txt"])),
            ("/r/locked", Fake::Unlistable),
            ("/r/a.txt", Fake::File(4)),
        ]);
        let built = TreeBuilder::new(inspector).build(Path::new("/r")).unwrap();

        let locked = built.root.child("locked").unwrap();
        assert!(locked.is_folder());
        assert!(locked.children().unwrap().is_empty());
        assert_eq!(built.report.unreadable_dirs, 1);
        assert_eq!(built.report.skipped_entries, 0);
    }

    #[test]
    fn uninspectable_entries_are_omitted() {
        let inspector = FakeInspector::new(vec![
            ("/r", Fake::Dir(vec!["broken-link", "ok.txt"])),
            ("/r/ok.txt", Fake::File(1)),
        ]);
        let built = TreeBuilder::new(inspector).build(Path::new("/r")).unwrap();

        let children = built.root.children().unwrap();
        assert_eq!(children.len(), 1);
        assert!(built.root.child("ok.txt").is_some());
        assert_eq!(built.report.skipped_entries, 1);
    }

    #[test]
    fn unreachable_root_is_an_error() {
        let inspector = FakeInspector::new(vec![]);
        let err = TreeBuilder::new(inspector)
            .build(Path::new("/missing"))
            .unwrap_err();
        assert!(matches!(err, Error::RootUnreachable { .. }));
    }

    #[test]
    fn unlistable_root_is_an_empty_folder() {
        let inspector = FakeInspector::new(vec![("/r", Fake::Unlistable)]);
        let built = TreeBuilder::new(inspector).build(Path::new("/r")).unwrap();
        assert!(built.root.is_folder());
        assert!(!built.root.has_children());
    }

    #[test]
    fn file_root_is_a_leaf() {
        let inspector = FakeInspector::new(vec![("/notes.md", Fake::File(12))]);
        let built = TreeBuilder::new(inspector)
            .build(Path::new("/notes.md"))
            .unwrap();
        assert_eq!(built.root.name(), "notes.md");
        assert_eq!(built.root.size(), Some(12));
        assert!(built.report.is_clean());
    }

    #[test]
    fn child_paths_join_parent_and_name() {
        let inspector = FakeInspector::new(vec![
            ("/r", Fake::Dir(vec!["d"])),
            ("/r/d", Fake::Dir(vec!["e"])),
            ("/r/d/e", Fake::Dir(vec!["f.bin"])),
            ("/r/d/e/f.bin", Fake::File(0)),
        ]);
        let root = TreeBuilder::new(inspector)
            .build(Path::new("/r"))
            .unwrap()
            .root;

        let d = root.child("d").unwrap();
        let e = d.child("e").unwrap();
        let f = e.child("f.bin").unwrap();
        assert_eq!(d.path(), Path::new("/r/d"));
        assert_eq!(e.path(), Path::new("/r/d/e"));
        assert_eq!(f.path(), Path::new("/r/d/e/f.bin"));
        assert_eq!(root.count(), 4);
    }

    #[test]
    fn deep_nesting_builds_iteratively() {
        let depth = 1_000;
        let mut entries = HashMap::new();
        let mut path = PathBuf::from("/deep");
        for _ in 0..depth {
            entries.insert(path.clone(), Fake::Dir(vec!["n"]));
            path = path.join("n");
        }
        entries.insert(path, Fake::File(1));

        let inspector = FakeInspector { entries };
        let built = TreeBuilder::new(inspector)
            .build(Path::new("/deep"))
            .unwrap();
        assert_eq!(built.root.count(), depth + 1);
    }
}
