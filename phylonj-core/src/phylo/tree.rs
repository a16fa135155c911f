/// Support value attached to a node after tree evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct Confidence {
    pub kind: Box<str>,
    pub value: f64,
}

impl Confidence {
    pub fn new(kind: impl Into<Box<str>>, value: f64) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhyloNode {
    pub name: Option<Box<str>>,
    /// Length of the branch to the parent.
    pub branch_length: Option<f64>,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    pub confidence: Option<Confidence>,
}

impl PhyloNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }
}

/// Node arena. Parents own children through index lists; the parent link
/// is a plain index.
#[derive(Debug, Clone, Default)]
pub struct PhyloTree {
    nodes: Vec<PhyloNode>,
    root: Option<usize>,
    rooted: bool,
}

impl PhyloTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(n),
            root: None,
            rooted: false,
        }
    }

    pub fn add_leaf(&mut self, name: impl Into<Box<str>>) -> usize {
        self.nodes.push(PhyloNode {
            name: Some(name.into()),
            ..PhyloNode::default()
        });
        self.nodes.len() - 1
    }

    /// Add an unnamed node adopting `children`.
    pub fn add_internal(&mut self, children: Vec<usize>) -> usize {
        let idx = self.nodes.len();
        for &c in &children {
            self.nodes[c].parent = Some(idx);
        }
        self.nodes.push(PhyloNode {
            children,
            ..PhyloNode::default()
        });
        idx
    }

    pub fn set_branch_length(&mut self, idx: usize, length: f64) {
        self.nodes[idx].branch_length = Some(length);
    }

    pub fn set_confidence(&mut self, idx: usize, confidence: Confidence) {
        self.nodes[idx].confidence = Some(confidence);
    }

    pub fn set_root(&mut self, idx: usize, rooted: bool) {
        self.root = Some(idx);
        self.rooted = rooted;
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    /// Whether the root is a biological statement rather than an artifact
    /// of tree construction.
    pub fn is_rooted(&self) -> bool {
        self.rooted
    }

    pub fn node(&self, idx: usize) -> &PhyloNode {
        &self.nodes[idx]
    }

    pub fn nodes(&self) -> &[PhyloNode] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    pub fn leaves(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn leaf_names(&self) -> Vec<String> {
        self.nodes
            .iter()
            .filter(|n| n.is_leaf())
            .map(|n| n.name_or_empty().to_string())
            .collect()
    }

    pub fn find_leaf(&self, name: &str) -> Option<usize> {
        self.nodes
            .iter()
            .position(|n| n.is_leaf() && n.name_or_empty() == name)
    }

    /// Nodes reachable from the root, parents before children.
    pub fn preorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx].children.iter().rev());
        }
        out
    }

    /// Nodes reachable from the root, children before parents.
    pub fn postorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            out.push(idx);
            stack.extend(self.nodes[idx].children.iter());
        }
        out.reverse();
        out
    }

    /// Internal nodes other than the root; each one sits below an internal edge.
    pub fn internal_non_root(&self) -> Vec<usize> {
        self.preorder()
            .into_iter()
            .filter(|&i| Some(i) != self.root && !self.nodes[i].is_leaf())
            .collect()
    }

    /// Leaf indices in the subtree rooted at `idx`.
    pub fn subtree_leaves(&self, idx: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![idx];
        while let Some(i) = stack.pop() {
            let node = &self.nodes[i];
            if node.is_leaf() {
                out.push(i);
            } else {
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }
}
