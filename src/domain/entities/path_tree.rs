use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// One node of a [`PathTree`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTreeNode {
    name: String,
    path: String,
    selectable: bool,
    children: HashMap<String, PathTreeNode>,
}

impl PathTreeNode {
    fn new(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            selectable: false,
            children: HashMap::new(),
        }
    }

    /// Final path segment
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full slash-joined path from the root
    pub fn path(&self) -> &str {
        &self.path
    }

    /// True when the full path was present in the source list
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn children(&self) -> &HashMap<String, PathTreeNode> {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&PathTreeNode> {
        self.children.get(name)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in presentation order: case-insensitive name, then bytewise
    pub fn sorted_children(&self) -> Vec<&PathTreeNode> {
        let mut children: Vec<&PathTreeNode> = self.children.values().collect();
        children.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        children
    }

    /// Number of nodes below this one
    pub fn descendant_count(&self) -> usize {
        self.children
            .values()
            .map(|child| 1 + child.descendant_count())
            .sum()
    }
}

/// A node visited by [`PathTree::walk_sorted`]
#[derive(Debug, Clone, Copy)]
pub struct TreeRow<'a> {
    /// 0 for children of the root
    pub depth: usize,
    pub node: &'a PathTreeNode,
}

/// Nested view over a flat list of slash-delimited paths.
///
/// Every prefix of every path becomes a node; only prefixes that appear
/// verbatim in the input are selectable. The tree is rebuilt from scratch
/// whenever the list changes and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTree {
    root: PathTreeNode,
}

impl PathTree {
    pub fn build<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths: Vec<S> = paths.into_iter().collect();
        let known: HashSet<&str> = paths
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| !p.is_empty())
            .collect();

        let mut root = PathTreeNode::new("", "");

        for path in &known {
            let mut cursor = &mut root;
            let mut prefix = String::with_capacity(path.len());

            for (index, segment) in path.split('/').enumerate() {
                if index > 0 {
                    prefix.push('/');
                }
                prefix.push_str(segment);

                let node = cursor
                    .children
                    .entry(segment.to_string())
                    .or_insert_with(|| PathTreeNode::new(segment, &prefix));
                if known.contains(prefix.as_str()) {
                    node.selectable = true;
                }
                cursor = node;
            }
        }

        Self { root }
    }

    pub fn root(&self) -> &PathTreeNode {
        &self.root
    }

    /// Number of nodes, root excluded
    pub fn len(&self) -> usize {
        self.root.descendant_count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }

    /// Look a node up by its full path
    pub fn find(&self, path: &str) -> Option<&PathTreeNode> {
        if path.is_empty() {
            return None;
        }
        path.split('/')
            .try_fold(&self.root, |node, segment| node.child(segment))
    }

    /// Depth-first pre-order walk with children in presentation order
    pub fn walk_sorted(&self) -> Vec<TreeRow<'_>> {
        let mut rows = Vec::with_capacity(self.len());
        let mut stack: Vec<TreeRow<'_>> = self
            .root
            .sorted_children()
            .into_iter()
            .rev()
            .map(|node| TreeRow { depth: 0, node })
            .collect();

        while let Some(row) = stack.pop() {
            stack.extend(
                row.node
                    .sorted_children()
                    .into_iter()
                    .rev()
                    .map(|node| TreeRow {
                        depth: row.depth + 1,
                        node,
                    }),
            );
            rows.push(row);
        }

        rows
    }

    /// Full paths of all selectable nodes, in presentation order
    pub fn selectable_paths(&self) -> Vec<&str> {
        self.walk_sorted()
            .into_iter()
            .filter(|row| row.node.is_selectable())
            .map(|row| row.node.path())
            .collect()
    }
}

impl Default for PathTree {
    fn default() -> Self {
        Self::build(std::iter::empty::<&str>())
    }
}
