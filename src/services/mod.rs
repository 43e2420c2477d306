pub mod clipboard;
pub mod fs;
pub mod prompt;
