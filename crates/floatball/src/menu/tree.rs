use derive_more::{AsRef, Deref, Display, From, Into};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct Label(String);

impl Label {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuNode {
    pub label: Label,
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    pub fn new(label: Label, children: Vec<MenuNode>) -> Self {
        Self { label, children }
    }
}

/// Static label hierarchy: depth `d` of the tree feeds ring `d`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuTree {
    roots: Vec<MenuNode>,
}

impl MenuTree {
    pub fn new(roots: Vec<MenuNode>) -> Self {
        Self { roots }
    }

    /// Generates a tree with `branching[d]` children at every node of depth `d`.
    pub fn build(branching: &[usize]) -> Self {
        Self::new(Self::generate(branching, 0, ""))
    }

    fn generate(branching: &[usize], depth: usize, prefix: &str) -> Vec<MenuNode> {
        let Some(&count) = branching.get(depth) else {
            return Vec::new();
        };
        let is_leaf = depth + 1 == branching.len();

        (0..count)
            .map(|i| {
                let label = if prefix.is_empty() {
                    letter(i, b'A')
                } else if is_leaf || !prefix.ends_with(|c: char| c.is_ascii_digit()) {
                    format!("{prefix}{}", i + 1)
                } else {
                    format!("{prefix}{}", letter(i, b'a'))
                };
                let children = Self::generate(branching, depth + 1, &label);
                MenuNode::new(Label::new(label), children)
            })
            .collect()
    }

    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Longest root-to-leaf path length.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[MenuNode]) -> usize {
            nodes
                .iter()
                .map(|n| 1 + walk(&n.children))
                .max()
                .unwrap_or(0)
        }
        walk(&self.roots)
    }

    /// Follows `path` (one child index per depth) from the roots.
    pub fn node_at(&self, path: &[usize]) -> Option<&MenuNode> {
        let (&first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.roots.get(first)?, |node, &i| node.children.get(i))
    }

    /// Labels visible on each ring for the given per-ring selections. Stops
    /// at the first missing or out-of-range selection, or at a leaf.
    pub fn project(&self, selections: &[Option<usize>]) -> Vec<Vec<&str>> {
        let mut layers = Vec::new();
        if self.roots.is_empty() {
            return layers;
        }

        let mut level = self.roots.as_slice();
        for depth in 0.. {
            layers.push(level.iter().map(|n| n.label.as_str()).collect());

            let Some(node) = selections
                .get(depth)
                .copied()
                .flatten()
                .and_then(|i| level.get(i))
            else {
                break;
            };
            if node.children.is_empty() {
                break;
            }
            level = &node.children;
        }
        layers
    }
}

fn letter(i: usize, base: u8) -> String {
    let c = char::from(base + (i % 26) as u8);
    match i / 26 {
        0 => c.to_string(),
        round => format!("{c}{round}"),
    }
}
