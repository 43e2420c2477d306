pub mod core;
pub mod models;
pub mod pages;
pub mod services;
pub mod ui;

pub use crate::core::errors::{Error, Result};
pub use models::Node;
pub use pages::tree::entries::{compare_names, compare_nodes, sorted_children};
pub use pages::tree::view::{render_interactive, render_text};
pub use pages::tree::{ExpansionSet, TreeSession, ViewMode};
pub use services::fs::builder::{build_tree, build_tree_with, BuildOptions, BuildReport};
pub use ui::format::format_size;
