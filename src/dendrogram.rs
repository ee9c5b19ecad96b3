//! Dendrogram: the binary merge tree produced by agglomerative clustering.
//!
//! Each internal node records the linkage distance at which its two
//! children were joined. Leaves wrap item ids at height 0. The left-to-right
//! leaf order is what a UI uses to reorder a similarity heatmap so that
//! merged items sit next to each other; cutting the tree at a distance
//! threshold yields flat clusters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A node of the merge tree.
///
/// The set of leaf ids under a node is implicit — derivable by traversal —
/// and is always the disjoint union of the children's leaf sets.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MergeNode {
    /// A single item, height 0.
    Leaf(String),
    /// Two clusters joined at a linkage distance.
    Internal {
        /// Linkage distance at which the children merged.
        height: f64,
        /// First merged cluster.
        left: Box<MergeNode>,
        /// Second merged cluster.
        right: Box<MergeNode>,
    },
}

impl MergeNode {
    /// Create a leaf for one item.
    pub fn leaf(id: impl Into<String>) -> Self {
        MergeNode::Leaf(id.into())
    }

    /// Join two clusters at a merge height.
    pub fn merge(height: f64, left: MergeNode, right: MergeNode) -> Self {
        MergeNode::Internal {
            height,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True for leaf nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self, MergeNode::Leaf(_))
    }

    /// Merge height of this node (0 for leaves).
    pub fn height(&self) -> f64 {
        match self {
            MergeNode::Leaf(_) => 0.0,
            MergeNode::Internal { height, .. } => *height,
        }
    }

    /// Leaf item ids in left-to-right order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            MergeNode::Leaf(id) => out.push(id.as_str()),
            MergeNode::Internal { left, right, .. } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }

    /// Number of leaves under this node.
    pub fn n_leaves(&self) -> usize {
        match self {
            MergeNode::Leaf(_) => 1,
            MergeNode::Internal { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Number of internal (merge) nodes under and including this node.
    ///
    /// Always `n_leaves() - 1` for a tree built by agglomeration.
    pub fn n_merges(&self) -> usize {
        match self {
            MergeNode::Leaf(_) => 0,
            MergeNode::Internal { left, right, .. } => 1 + left.n_merges() + right.n_merges(),
        }
    }

    /// Merge heights of every internal node, depth-first.
    pub fn heights(&self) -> Vec<f64> {
        let mut out = Vec::new();
        self.collect_heights(&mut out);
        out
    }

    fn collect_heights(&self, out: &mut Vec<f64>) {
        if let MergeNode::Internal {
            height,
            left,
            right,
        } = self
        {
            out.push(*height);
            left.collect_heights(out);
            right.collect_heights(out);
        }
    }

    /// Flat clusters obtained by cutting the tree at a distance threshold.
    ///
    /// A subtree whose merge height is `<= threshold` stays one cluster;
    /// merges above the threshold are severed. `cut_at(0.0)` separates any
    /// items merged at positive distance; a threshold at or above the root
    /// height returns a single cluster.
    pub fn cut_at(&self, threshold: f64) -> Vec<Vec<&str>> {
        let mut out = Vec::new();
        self.cut_into(threshold, &mut out);
        out
    }

    fn cut_into<'a>(&'a self, threshold: f64, out: &mut Vec<Vec<&'a str>>) {
        match self {
            MergeNode::Leaf(_) => out.push(self.leaves()),
            MergeNode::Internal {
                height,
                left,
                right,
            } => {
                if *height <= threshold {
                    out.push(self.leaves());
                } else {
                    left.cut_into(threshold, out);
                    right.cut_into(threshold, out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> MergeNode {
        // ((a, b)@0.2, (c, d)@0.3)@0.8
        MergeNode::merge(
            0.8,
            MergeNode::merge(0.2, MergeNode::leaf("a"), MergeNode::leaf("b")),
            MergeNode::merge(0.3, MergeNode::leaf("c"), MergeNode::leaf("d")),
        )
    }

    #[test]
    fn test_leaf_basics() {
        let leaf = MergeNode::leaf("a");
        assert!(leaf.is_leaf());
        assert_eq!(leaf.height(), 0.0);
        assert_eq!(leaf.leaves(), ["a"]);
        assert_eq!(leaf.n_leaves(), 1);
        assert_eq!(leaf.n_merges(), 0);
    }

    #[test]
    fn test_leaf_order_left_to_right() {
        assert_eq!(sample_tree().leaves(), ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_merge_counts() {
        let tree = sample_tree();
        assert_eq!(tree.n_leaves(), 4);
        assert_eq!(tree.n_merges(), 3);
        assert_eq!(tree.n_merges(), tree.n_leaves() - 1);
    }

    #[test]
    fn test_heights_depth_first() {
        assert_eq!(sample_tree().heights(), [0.8, 0.2, 0.3]);
    }

    #[test]
    fn test_cut_between_levels() {
        let tree = sample_tree();
        let clusters = tree.cut_at(0.5);
        assert_eq!(clusters, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_cut_extremes() {
        let tree = sample_tree();
        assert_eq!(tree.cut_at(0.8).len(), 1, "root height keeps one cluster");
        assert_eq!(tree.cut_at(0.1).len(), 4, "below every merge: singletons");
    }
}
