use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::models::Node;

thread_local! {
    static COLLATOR: Option<Collator> =
        Collator::try_new(&Default::default(), CollatorOptions::new()).ok();
}

/// Sibling order for every rendering: folders first, then by name, then
/// by path so siblings with the same display name keep a fixed order.
pub fn compare_nodes(a: &Node, b: &Node) -> Ordering {
    match b.is_folder().cmp(&a.is_folder()) {
        Ordering::Equal => {
            compare_names(a.name(), b.name()).then_with(|| a.path().cmp(b.path()))
        }
        kind_order => kind_order,
    }
}

/// Root-locale collation with raw code points as the last tie-break.
/// Only identical names compare equal.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    COLLATOR
        .with(|collator| match collator {
            Some(collator) => collator.compare(a, b),
            None => fallback_order(a, b),
        })
        .then_with(|| a.cmp(b))
}

fn fallback_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| {
        a.chars()
            .map(char::is_uppercase)
            .cmp(b.chars().map(char::is_uppercase))
    })
}

/// Children of `node` in render order; empty for files.
pub fn sorted_children(node: &Node) -> Vec<&Node> {
    let mut children: Vec<&Node> = node
        .children()
        .map(|c| c.values().collect())
        .unwrap_or_default();
    children.sort_by(|a, b| compare_nodes(a, b));
    children
}
