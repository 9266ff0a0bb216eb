use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub root: PathBuf,
    pub flat: bool,
    pub restore: bool,
    pub demo: bool,
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            root: cli.root,
            flat: cli.flat,
            restore: !cli.no_restore,
            demo: cli.demo,
        }
    }
}
