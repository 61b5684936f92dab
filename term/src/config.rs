//! Configuration for a [`VTerm`](crate::vterm::VTerm) instance.

/// Tunables a host sets once at construction time. There is no file-format
/// parsing here — loading a config file is a launcher concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VTermConfig {
    /// Maximum number of scrolled-off lines retained for the main screen.
    pub scrollback_capacity: usize,
    /// Cursor visibility (DECCM) at construction time.
    pub default_cursor_visible: bool,
    /// Spacing of default tab stops before any HTS/TBC customization.
    pub tab_width: usize,
}

impl Default for VTermConfig {
    fn default() -> Self {
        Self {
            scrollback_capacity: 10_000,
            default_cursor_visible: true,
            tab_width: 8,
        }
    }
}
