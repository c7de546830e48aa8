//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - colored headings and summaries (default)
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Whether progress bars and colored narration belong on the terminal
    pub fn is_interactive(self) -> bool {
        !matches!(self, OutputFormat::Json)
    }
}
