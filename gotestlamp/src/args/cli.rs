use clap::Parser;

#[derive(Debug, Clone, Parser, Default)]
#[command(
    name = "gotestlamp",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub(super) struct GotestlampCli {
    #[arg(short = 'c', long = "coverprofile")]
    pub(super) coverprofile: Option<String>,

    #[arg(
        long = "verbose",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub(super) verbose: bool,

    #[arg(
        long = "ci",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub(super) ci: bool,

    #[arg(
        long = "onlyFailures",
        visible_alias = "only-failures",
        default_value_t = false,
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::value_parser!(bool)
    )]
    pub(super) only_failures: bool,

    #[arg(long = "no-progress", default_value_t = false)]
    pub(super) no_progress: bool,
}
