use crate::config::GotestlampConfig;

/// Long flags that `go test` users habitually spell with a single dash.
const LONG_FLAGS: [&str; 8] = [
    "coverprofile",
    "verbose",
    "ci",
    "onlyFailures",
    "only-failures",
    "no-progress",
    "help",
    "version",
];

fn base_flag(token: &str) -> &str {
    token.split_once('=').map(|(k, _)| k).unwrap_or(token)
}

/// Rewrites `-coverprofile=x` style tokens to `--coverprofile=x`.
///
/// Short flags (`-c`) and unknown tokens pass through untouched.
pub fn normalize_go_style_flags(argv: &[String]) -> Vec<String> {
    argv.iter()
        .map(|token| {
            let single_dash_long = token
                .strip_prefix('-')
                .filter(|rest| !rest.starts_with('-'))
                .is_some_and(|rest| LONG_FLAGS.contains(&base_flag(rest)));
            if single_dash_long {
                format!("-{token}")
            } else {
                token.clone()
            }
        })
        .collect()
}

fn push_bool_flag(tokens: &mut Vec<String>, enabled: bool, flag: &str) {
    if enabled {
        tokens.push(flag.to_string());
    }
}

/// Config values rendered as CLI tokens; they are placed before argv so the
/// command line overrides them.
pub fn config_tokens(cfg: &GotestlampConfig) -> Vec<String> {
    let mut tokens: Vec<String> = vec![];
    cfg.coverprofile
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .into_iter()
        .for_each(|path| tokens.push(format!("--coverprofile={path}")));
    push_bool_flag(&mut tokens, cfg.verbose == Some(true), "--verbose");
    push_bool_flag(&mut tokens, cfg.ci == Some(true), "--ci");
    push_bool_flag(
        &mut tokens,
        cfg.only_failures == Some(true),
        "--onlyFailures",
    );
    push_bool_flag(&mut tokens, cfg.progress == Some(false), "--no-progress");
    tokens
}
