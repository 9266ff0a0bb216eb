use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,

    /// The root directory of the workspace
    #[clap(long, short, default_value = ".")]
    pub root: PathBuf,

    /// Render every directory expanded
    #[clap(long)]
    pub flat: bool,

    /// Skip restoring the previous session's panel state
    #[clap(long)]
    pub no_restore: bool,

    /// Apply the scripted demo edits before rendering
    #[clap(long)]
    pub demo: bool,
}
