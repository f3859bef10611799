use indexmap::IndexMap;
use serde::Serialize;

use crate::coverage::go_profile::ProfileCoverage;
use crate::coverage::model::coverage_pct;

pub const ROOT_NAME: &str = ".";

/// Directory or file node of the coverage tree.
///
/// Children keep insertion order; renderers sort them by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub is_dir: bool,
    pub children: IndexMap<String, TreeNode>,
    pub covered: u32,
    pub total: u32,
    pub uncovered: Vec<u32>,
    pub coverage: f64,
    /// Lines of a profile file whose path is also a directory prefix of
    /// another file; counted on top of the children.
    #[serde(skip)]
    own: Option<(u32, u32)>,
}

impl TreeNode {
    pub fn dir(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    fn new(name: impl Into<String>, is_dir: bool) -> Self {
        Self {
            name: name.into(),
            is_dir,
            children: IndexMap::new(),
            covered: 0,
            total: 0,
            uncovered: Vec::new(),
            coverage: 0.0,
            own: None,
        }
    }

    /// Looks up a node by `/`-separated path relative to this node.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        path_segments(path).try_fold(self, |node, segment| node.children.get(segment))
    }

    pub fn sorted_children(&self) -> Vec<&TreeNode> {
        let mut children = self.children.values().collect::<Vec<_>>();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    fn refresh_coverage(&mut self) {
        self.coverage = coverage_pct(self.covered, self.total);
    }
}

/// Empty segments are kept so `a//b.go` and `a/b.go` stay distinct files.
fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/')
}

fn descend<'a>(node: &'a mut TreeNode, name: &str) -> &'a mut TreeNode {
    let child = node
        .children
        .entry(name.to_string())
        .or_insert_with(|| TreeNode::dir(name));
    if !child.is_dir {
        child.own = Some((child.covered, child.total));
        child.is_dir = true;
    }
    child
}

pub fn build_tree(file_data: &ProfileCoverage) -> TreeNode {
    let mut root = TreeNode::dir(ROOT_NAME);
    for (file_path, file) in file_data {
        let segments = path_segments(file_path).collect::<Vec<_>>();
        let Some((leaf_name, dir_names)) = segments.split_last() else {
            continue;
        };
        let parent = dir_names
            .iter()
            .fold(&mut root, |node, name| descend(node, name));
        let leaf = parent
            .children
            .entry((*leaf_name).to_string())
            .or_insert_with(|| TreeNode::file(*leaf_name));
        if leaf.is_dir {
            leaf.own = Some((file.lines_covered(), file.lines_total()));
        } else {
            leaf.covered = file.lines_covered();
            leaf.total = file.lines_total();
            leaf.refresh_coverage();
        }
        leaf.uncovered = file.uncovered_lines();
    }
    root
}

/// Rolls child totals up into every directory node, post-order.
pub fn aggregate(node: &mut TreeNode) {
    if !node.is_dir {
        return;
    }
    let (covered, total) = node
        .children
        .values_mut()
        .fold(node.own.unwrap_or((0, 0)), |(covered, total), child| {
            aggregate(child);
            (
                covered.saturating_add(child.covered),
                total.saturating_add(child.total),
            )
        });
    node.covered = covered;
    node.total = total;
    node.refresh_coverage();
}

pub fn build_aggregated_tree(file_data: &ProfileCoverage) -> TreeNode {
    let mut root = build_tree(file_data);
    aggregate(&mut root);
    root
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeRow<'a> {
    pub node: &'a TreeNode,
    pub depth: usize,
}

/// Depth-first rows below `root` (root excluded), children sorted by name.
pub fn flatten_rows(root: &TreeNode) -> Vec<TreeRow<'_>> {
    fn walk<'a>(node: &'a TreeNode, depth: usize, out: &mut Vec<TreeRow<'a>>) {
        node.sorted_children().into_iter().for_each(|child| {
            out.push(TreeRow {
                node: child,
                depth: depth + 1,
            });
            walk(child, depth + 1, out);
        });
    }
    let mut out = Vec::new();
    walk(root, 0, &mut out);
    out
}
