pub mod node;

pub use node::{last_segment, Node, NodeDto, NodeKind};
