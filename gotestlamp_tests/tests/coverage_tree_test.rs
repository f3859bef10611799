use gotestlamp::coverage::go_profile::parse_go_profile_text;
use gotestlamp::coverage::tree::{TreeNode, build_aggregated_tree, flatten_rows};
use gotestlamp_tests::go_profile_text;

fn assert_sums_hold(node: &TreeNode) {
    if !node.is_dir {
        return;
    }
    let covered = node.children.values().map(|c| c.covered).sum::<u32>();
    let total = node.children.values().map(|c| c.total).sum::<u32>();
    assert_eq!((node.covered, node.total), (covered, total), "{}", node.name);
    node.children.values().for_each(assert_sums_hold);
}

#[test]
fn coverage_tree_aggregates_module_layout() {
    let text = go_profile_text(&[
        ("example.com/m/cmd/main.go", 5, 0),
        ("example.com/m/cmd/main.go", 6, 0),
        ("example.com/m/internal/store/db.go", 10, 1),
        ("example.com/m/internal/store/db.go", 11, 1),
        ("example.com/m/internal/store/db.go", 12, 0),
        ("example.com/m/internal/store/cache.go", 1, 3),
        ("example.com/m/version.go", 1, 1),
    ]);
    let root = build_aggregated_tree(&parse_go_profile_text(&text));

    assert_eq!((root.covered, root.total), (4, 7));
    assert_sums_hold(&root);

    let store = root.find("example.com/m/internal/store").expect("store dir");
    assert!(store.is_dir);
    assert_eq!((store.covered, store.total), (3, 4));
    assert_eq!(store.coverage, 75.0);

    let main = root.find("example.com/m/cmd/main.go").expect("main.go");
    assert_eq!(main.coverage, 0.0);
    assert_eq!(main.uncovered, vec![5, 6]);

    let rows = flatten_rows(&root)
        .into_iter()
        .map(|row| (row.depth, row.node.name.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        rows,
        vec![
            (1, "example.com"),
            (2, "m"),
            (3, "cmd"),
            (4, "main.go"),
            (3, "internal"),
            (4, "store"),
            (5, "cache.go"),
            (5, "db.go"),
            (3, "version.go"),
        ]
    );
}

#[test]
fn coverage_tree_serializes_for_renderers() {
    let text = go_profile_text(&[("a/b.go", 1, 1)]);
    let root = build_aggregated_tree(&parse_go_profile_text(&text));
    let value = serde_json::to_value(&root).expect("serialize");
    assert_eq!(value["name"], ".");
    assert_eq!(value["isDir"], true);
    assert_eq!(value["children"]["a"]["children"]["b.go"]["coverage"], 100.0);
}
