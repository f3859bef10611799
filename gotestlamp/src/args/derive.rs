use std::path::PathBuf;

use clap::Parser;

use super::cli::GotestlampCli;
use super::tokens::normalize_go_style_flags;
use super::types::ParsedArgs;

fn combined_tokens(cfg_tokens: &[String], argv: &[String]) -> Vec<String> {
    cfg_tokens
        .iter()
        .cloned()
        .chain(normalize_go_style_flags(argv))
        .collect::<Vec<_>>()
}

/// Parses config tokens followed by argv; later tokens win.
pub fn derive_args(cfg_tokens: &[String], argv: &[String]) -> Result<ParsedArgs, clap::Error> {
    let mut clap_argv = vec!["gotestlamp".to_string()];
    clap_argv.extend(combined_tokens(cfg_tokens, argv));

    let parsed_cli = GotestlampCli::try_parse_from(&clap_argv)?;
    Ok(ParsedArgs {
        coverprofile: parsed_cli
            .coverprofile
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from),
        verbose: parsed_cli.verbose,
        ci: parsed_cli.ci,
        only_failures: parsed_cli.only_failures,
        progress: !parsed_cli.no_progress,
    })
}
