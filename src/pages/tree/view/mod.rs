pub mod interactive;
pub mod text;

pub use interactive::{render_interactive, Affordance, RowStyle, TreeRow};
pub use text::render_text;
