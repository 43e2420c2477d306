use crate::services::fs::builder::BuildOptions;

pub const DEFAULT_INDENT_WIDTH: usize = 2;
pub const DEFAULT_LOG_DIRECTIVE: &str = "warn";

/// Runtime settings shared by the binary and the console app.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Columns per nesting level in the interactive view.
    pub indent_width: usize,
    pub icons: bool,
    pub follow_symlinks: bool,
    pub log_directive: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
            icons: true,
            follow_symlinks: true,
            log_directive: DEFAULT_LOG_DIRECTIVE.to_string(),
        }
    }
}

impl AppConfig {
    pub fn build_options(&self) -> BuildOptions {
        BuildOptions {
            follow_symlinks: self.follow_symlinks,
        }
    }
}
