/// Glyphs shared by the interactive rows and the text export.
pub mod theme {
    // Text export connectors
    pub const BRANCH: &str = "├── ";
    pub const LAST_BRANCH: &str = "└── ";
    pub const PIPE: &str = "│   ";
    pub const BLANK: &str = "    ";

    // Interactive rows
    pub const CHEVRON_EXPANDED: &str = "▼ ";
    pub const CHEVRON_COLLAPSED: &str = "▶ ";
    pub const CHEVRON_PLACEHOLDER: &str = "  ";
    pub const FOLDER_ICON: &str = "📁 ";
    pub const FILE_ICON: &str = "📄 ";
}
