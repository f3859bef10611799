use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    pub coverprofile: Option<PathBuf>,
    pub verbose: bool,
    pub ci: bool,
    pub only_failures: bool,
    /// False when `--no-progress` was given or the config disables it.
    pub progress: bool,
}
