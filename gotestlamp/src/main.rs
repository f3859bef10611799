use std::io::IsTerminal;

fn should_print_terminal_debug() -> bool {
    std::env::var("GOTESTLAMP_DEBUG_TERMINAL")
        .ok()
        .is_some_and(|value| !value.trim().is_empty() && value.trim() != "0")
}

fn print_terminal_debug() {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let stdin_is_tty = std::io::stdin().is_terminal();
    let detected_size = gotestlamp::format::terminal::detect_terminal_size_cols_rows();

    eprintln!(
        "GOTESTLAMP_DEBUG_TERMINAL: stdout_tty={stdout_is_tty} stdin_tty={stdin_is_tty} color={} term={:?} no_color={:?} force_color={:?} clicolor={:?} columns={:?} ci={:?} detected_size={:?}",
        gotestlamp::format::colors::use_color(),
        std::env::var("TERM").ok(),
        std::env::var("NO_COLOR").ok(),
        std::env::var("FORCE_COLOR").ok(),
        std::env::var("CLICOLOR").ok(),
        std::env::var("COLUMNS").ok(),
        std::env::var("CI").ok(),
        detected_size,
    );
}

fn is_help_token(token: &str) -> bool {
    matches!(token, "--help" | "-h" | "-help")
}

fn is_version_token(token: &str) -> bool {
    matches!(token, "--version" | "-V" | "-version")
}

fn main() {
    if should_print_terminal_debug() {
        print_terminal_debug();
    }
    let argv = std::env::args().skip(1).collect::<Vec<_>>();
    if argv.iter().any(|t| is_help_token(t)) {
        print_help();
        return;
    }
    if argv.iter().any(|t| is_version_token(t)) {
        println!("gotestlamp {}", gotestlamp::core_version());
        return;
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("."));
    let repo_root = gotestlamp::config::find_repo_root(&cwd);
    let cfg = match gotestlamp::config::load_gotestlamp_config(&repo_root) {
        Ok(cfg) => cfg,
        Err(err) => exit_with(&gotestlamp::run::RunError::Config(err)),
    };
    let cfg_tokens = gotestlamp::args::config_tokens(&cfg);
    let parsed = match gotestlamp::args::derive_args(&cfg_tokens, &argv) {
        Ok(parsed) => parsed,
        Err(err) => {
            let _ = err.print();
            std::process::exit(2);
        }
    };

    gotestlamp::logging::init_logging(parsed.verbose);
    tracing::debug!(
        repo_root = %repo_root.display(),
        ci = parsed.ci,
        only_failures = parsed.only_failures,
        coverprofile = ?parsed.coverprofile,
        "starting run"
    );

    match gotestlamp::run::run_from_stdin(&repo_root, &parsed) {
        Ok(_) => std::process::exit(0),
        Err(err) => exit_with(&err),
    }
}

fn exit_with(err: &gotestlamp::run::RunError) -> ! {
    eprintln!("Error: {err}");
    std::process::exit(err.exit_code());
}

fn print_help() {
    let msg = r#"gotestlamp

Reads `go test -json` output on stdin and prints a grouped test report.

Usage:
  go test -json ./... | gotestlamp [--coverprofile=<file>] [flags]

Flags:
  -c, --coverprofile <file>      Print a coverage tree table from a Go coverprofile
  --verbose                      Debug diagnostics on stderr
  --ci                           CI mode (plain progress lines, no redraw)
  --onlyFailures                 List only failing packages, tests and subtests
  --no-progress                  Disable the progress indicator
  -h, --help                     Print this help
  -V, --version                  Print the version

Notes:
  Go-style single-dash long flags (-coverprofile=cover.out) are accepted.
  Config is read from gotestlamp.toml, gotestlamp.config.{json,json5,jsonc,yaml,yml}
  or .gotestlamprc{,.json,.json5,.yaml,.yml} at the repository root.
"#;
    println!("{msg}");
}
