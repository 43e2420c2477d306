use std::path::Path;

use crate::models::Node;
use crate::pages::tree::entries::sorted_children;
use crate::pages::tree::types::ExpansionSet;
use crate::ui::format::format_size;
use crate::ui::theme::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Expanded,
    Collapsed,
    /// Folder without children: blank space of chevron width.
    Placeholder,
    Leaf,
}

/// One visible line of the collapsible tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeRow<'a> {
    pub level: usize,
    pub node: &'a Node,
    pub affordance: Affordance,
}

impl<'a> TreeRow<'a> {
    pub fn path(&self) -> &'a Path {
        self.node.path()
    }

    pub fn name(&self) -> &'a str {
        self.node.name()
    }

    /// `None` for folders and zero-byte files.
    pub fn size_label(&self) -> Option<String> {
        self.node
            .size()
            .map(format_size)
            .filter(|label| !label.is_empty())
    }

    /// Folders react to clicks, even empty ones.
    pub fn is_toggleable(&self) -> bool {
        self.node.is_folder()
    }

    pub fn to_line(&self, style: &RowStyle) -> String {
        let mut line = " ".repeat(self.level * style.indent_width);
        line.push_str(match self.affordance {
            Affordance::Expanded => theme::CHEVRON_EXPANDED,
            Affordance::Collapsed => theme::CHEVRON_COLLAPSED,
            Affordance::Placeholder | Affordance::Leaf => theme::CHEVRON_PLACEHOLDER,
        });
        if style.icons {
            line.push_str(if self.node.is_folder() {
                theme::FOLDER_ICON
            } else {
                theme::FILE_ICON
            });
        }
        line.push_str(self.name());
        if let Some(size) = self.size_label() {
            line.push(' ');
            line.push_str(&size);
        }
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowStyle {
    pub indent_width: usize,
    pub icons: bool,
}

impl Default for RowStyle {
    fn default() -> Self {
        Self {
            indent_width: crate::core::config::DEFAULT_INDENT_WIDTH,
            icons: true,
        }
    }
}

/// Visible rows from the root down. Folders recurse only when their path
/// is in `expansion`; the whole list is rebuilt on every call.
pub fn render_interactive<'a>(root: &'a Node, expansion: &ExpansionSet) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    let mut stack = vec![(root, 0usize)];

    while let Some((node, level)) = stack.pop() {
        let affordance = if !node.is_folder() {
            Affordance::Leaf
        } else if !node.has_children() {
            Affordance::Placeholder
        } else if expansion.is_expanded(node.path()) {
            Affordance::Expanded
        } else {
            Affordance::Collapsed
        };

        rows.push(TreeRow {
            level,
            node,
            affordance,
        });

        if affordance == Affordance::Expanded {
            for child in sorted_children(node).into_iter().rev() {
                stack.push((child, level + 1));
            }
        }
    }

    rows
}
