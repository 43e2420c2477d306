use crate::models::Node;
use crate::pages::tree::entries::sorted_children;
use crate::ui::format::format_size;
use crate::ui::theme::theme;

/// Full plain-text diagram of `root`: the root name, then one line per
/// node in pre-order with connector glyphs. Expansion state is ignored.
///
/// Zero-byte files carry no size suffix and no trailing space.
pub fn render_text(root: &Node) -> String {
    let mut out = String::new();
    out.push_str(root.name());
    out.push('\n');

    let mut stack = Vec::new();
    push_children(&mut stack, root, "");

    while let Some((node, prefix, is_last)) = stack.pop() {
        out.push_str(&prefix);
        out.push_str(if is_last {
            theme::LAST_BRANCH
        } else {
            theme::BRANCH
        });
        out.push_str(node.name());
        if let Some(size) = node.size() {
            let label = format_size(size);
            if !label.is_empty() {
                out.push(' ');
                out.push_str(&label);
            }
        }
        out.push('\n');

        if node.is_folder() {
            let extension = if is_last { theme::BLANK } else { theme::PIPE };
            push_children(&mut stack, node, &format!("{prefix}{extension}"));
        }
    }

    out
}

fn push_children<'a>(stack: &mut Vec<(&'a Node, String, bool)>, node: &'a Node, prefix: &str) {
    let children = sorted_children(node);
    let last = children.len().saturating_sub(1);
    // reversed so the first child pops first
    for (i, child) in children.into_iter().enumerate().rev() {
        stack.push((child, prefix.to_string(), i == last));
    }
}
