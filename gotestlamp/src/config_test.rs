use crate::config::{
    GotestlampConfig, discover_config_path, find_repo_root, load_gotestlamp_config,
};
use crate::error::GotestlampError;

fn write(dir: &std::path::Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

#[test]
fn missing_config_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    assert!(discover_config_path(dir.path()).is_none());
    assert_eq!(
        load_gotestlamp_config(dir.path()).unwrap(),
        GotestlampConfig::default()
    );
}

#[test]
fn toml_snake_case_keys_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "gotestlamp.toml",
        "coverprofile = \"cover.out\"\nonly_failures = true\nprogress = false\n",
    );
    let cfg = load_gotestlamp_config(dir.path()).unwrap();
    assert_eq!(cfg.coverprofile.as_deref(), Some("cover.out"));
    assert_eq!(cfg.only_failures, Some(true));
    assert_eq!(cfg.progress, Some(false));
    assert_eq!(cfg.ci, None);
}

#[test]
fn json5_rc_file_allows_comments_and_trailing_commas() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        ".gotestlamprc",
        "{\n  // local runs\n  onlyFailures: true,\n  verbose: true,\n}\n",
    );
    let cfg = load_gotestlamp_config(dir.path()).unwrap();
    assert_eq!(cfg.only_failures, Some(true));
    assert_eq!(cfg.verbose, Some(true));
}

#[test]
fn yaml_config_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "gotestlamp.config.yml",
        "ci: true\ncoverprofile: build/cover.out\n",
    );
    let cfg = load_gotestlamp_config(dir.path()).unwrap();
    assert_eq!(cfg.ci, Some(true));
    assert_eq!(cfg.coverprofile.as_deref(), Some("build/cover.out"));
}

#[test]
fn toml_wins_over_later_candidates() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "gotestlamp.toml", "ci = true\n");
    write(dir.path(), ".gotestlamprc.json", "{\"ci\": false}");
    let found = discover_config_path(dir.path()).unwrap();
    assert!(found.ends_with("gotestlamp.toml"));
}

#[test]
fn invalid_config_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "gotestlamp.config.json", "{\"ci\": \"sometimes\"}");
    let err = load_gotestlamp_config(dir.path()).unwrap_err();
    assert!(matches!(err, GotestlampError::ConfigParse { .. }), "{err}");
}

#[test]
fn find_repo_root_walks_up_to_git_work_tree() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("pkg");
    std::fs::create_dir_all(&nested).unwrap();
    git2::Repository::init(dir.path()).unwrap();
    let root = find_repo_root(&nested);
    assert_eq!(
        root.canonicalize().unwrap(),
        dir.path().canonicalize().unwrap()
    );
}
