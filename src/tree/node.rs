//! Tree node representation.
//!
//! Nodes live in a flat arena ([`Tree`]) and refer to their children by
//! [`NodeId`], so building, traversing and dropping a tree never recurses.

/// Index of a node inside its [`Tree`]. The root is always 0.
pub type NodeId = usize;

/// Leaf node in a decision tree.
///
/// Contains the predicted class label and number of training samples
/// that reached this leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and the ids of the
/// left and right subtrees.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f64,
    /// Left subtree (samples where feature <= threshold)
    pub left: NodeId,
    /// Right subtree (samples where feature > threshold)
    pub right: NodeId,
    /// Number of training samples that reached this node
    pub n_samples: usize,
    /// Gain ratio of the split chosen here
    pub gain_ratio: f64,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Internal(InternalNode),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns true for leaf nodes.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf(_))
    }

    /// The predicted label of a leaf, `None` for internal nodes.
    #[must_use]
    pub fn label(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf(leaf) => Some(leaf.label),
            TreeNode::Internal(_) => None,
        }
    }

    /// The split of an internal node, `None` for leaves.
    #[must_use]
    pub fn as_internal(&self) -> Option<&InternalNode> {
        match self {
            TreeNode::Internal(node) => Some(node),
            TreeNode::Leaf(_) => None,
        }
    }

    /// Number of training samples that reached this node.
    #[must_use]
    pub fn n_samples(&self) -> usize {
        match self {
            TreeNode::Leaf(leaf) => leaf.n_samples,
            TreeNode::Internal(node) => node.n_samples,
        }
    }
}

/// A trained decision tree.
///
/// Immutable once built: the only mutating methods are crate-private and used
/// by the builder while the tree is being grown.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    nodes: Vec<TreeNode>,
}

impl Tree {
    /// Creates a tree holding only a placeholder root.
    pub(crate) fn with_root() -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(64),
        };
        tree.allocate();
        tree
    }

    /// Appends a placeholder leaf and returns its id.
    fn allocate(&mut self) -> NodeId {
        self.nodes.push(TreeNode::Leaf(Leaf {
            label: 0,
            n_samples: 0,
        }));
        self.nodes.len() - 1
    }

    /// Turns `node` into a leaf.
    pub(crate) fn make_leaf(&mut self, node: NodeId, label: usize, n_samples: usize) {
        self.nodes[node] = TreeNode::Leaf(Leaf { label, n_samples });
    }

    /// Turns `node` into an internal node, allocating two child placeholders.
    ///
    /// Returns `(left_id, right_id)`.
    pub(crate) fn apply_split(
        &mut self,
        node: NodeId,
        feature_idx: usize,
        threshold: f64,
        n_samples: usize,
        gain_ratio: f64,
    ) -> (NodeId, NodeId) {
        let left = self.allocate();
        let right = self.allocate();
        self.nodes[node] = TreeNode::Internal(InternalNode {
            feature_idx,
            threshold,
            left,
            right,
            n_samples,
            gain_ratio,
        });
        (left, right)
    }

    /// Id of the root node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        0
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    /// All nodes, indexed by [`NodeId`].
    #[must_use]
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Total number of nodes.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of leaves.
    #[must_use]
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path. A lone leaf has depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(self.root(), 0)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                TreeNode::Leaf(_) => max_depth = max_depth.max(depth),
                TreeNode::Internal(node) => {
                    stack.push((node.left, depth + 1));
                    stack.push((node.right, depth + 1));
                }
            }
        }
        max_depth
    }

    /// Predicted label for a single sample.
    ///
    /// # Panics
    ///
    /// Panics if `sample` is shorter than a feature index used by the tree.
    #[must_use]
    pub fn predict_row(&self, sample: &[f64]) -> usize {
        let mut id = self.root();
        loop {
            match &self.nodes[id] {
                TreeNode::Leaf(leaf) => return leaf.label,
                TreeNode::Internal(node) => {
                    id = if sample[node.feature_idx] <= node.threshold {
                        node.left
                    } else {
                        node.right
                    };
                }
            }
        }
    }
}
