//! Hierarchical (agglomerative) clustering over a similarity matrix.
//!
//! Bottom-up clustering that builds a dendrogram by iteratively merging the
//! closest clusters. No k to choose in advance — cut the tree at any height.
//!
//! Item distance is `d(i,j) = 1 - S[i][j]`; cluster distance depends on the
//! linkage:
//!
//! | Linkage | Formula | Effect |
//! |---------|---------|--------|
//! | Single | min(d(a,b)) for a∈A, b∈B | Chaining; elongated clusters |
//! | Complete | max(d(a,b)) | Compact clusters |
//! | Average | mean(d(a,b)) | Balanced compromise |
//!
//! # Algorithm
//!
//! Start with one singleton cluster per item. Until one cluster remains:
//! scan all unordered cluster pairs in ascending index order, recompute the
//! inter-cluster distance under the active linkage, and merge the pair with
//! the strictly smallest distance (ties go to the first pair encountered).
//! The freshly merged cluster is appended at the end of the scan list, so
//! the whole procedure is deterministic and reproducible.
//!
//! This is the naive O(n³) pairwise-rescan strategy. Card-sorting studies
//! run on tens to a few hundred items, where it is entirely adequate and
//! the simplicity pays for itself.
//!
//! There are no failure modes beyond an empty input: exactly n−1 merges
//! always terminate the loop.

use crate::dendrogram::MergeNode;
use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Linkage method for hierarchical clustering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linkage {
    /// Single linkage: minimum distance between clusters.
    Single,
    /// Complete linkage: maximum distance between clusters.
    Complete,
    /// Average linkage: mean distance between clusters.
    Average,
}

/// Hierarchical (agglomerative) clusterer.
#[derive(Debug, Clone)]
pub struct HierarchicalClustering {
    /// Linkage method.
    linkage: Linkage,
}

impl Default for HierarchicalClustering {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchicalClustering {
    /// Create a clusterer with average linkage.
    pub fn new() -> Self {
        Self {
            linkage: Linkage::Average,
        }
    }

    /// Set the linkage method.
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Build the full dendrogram over the matrix's items.
    ///
    /// Returns the root [`MergeNode`]; for a single item that is the bare
    /// leaf. An empty matrix is rejected with [`Error::EmptyInput`].
    pub fn fit(&self, matrix: &SimilarityMatrix) -> Result<MergeNode> {
        let n = matrix.n_items();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        // Active clusters: the subtree built so far plus its member item
        // indices (for linkage recomputation).
        let mut clusters: Vec<(MergeNode, Vec<usize>)> = matrix
            .items()
            .iter()
            .enumerate()
            .map(|(i, id)| (MergeNode::leaf(id.clone()), vec![i]))
            .collect();

        while clusters.len() > 1 {
            let mut best = (0usize, 1usize);
            let mut best_dist = f64::INFINITY;

            for a in 0..clusters.len() {
                for b in (a + 1)..clusters.len() {
                    let d = self.cluster_distance(matrix, &clusters[a].1, &clusters[b].1);
                    // Strict comparison: ties keep the first pair in
                    // ascending scan order.
                    if d < best_dist {
                        best_dist = d;
                        best = (a, b);
                    }
                }
            }

            let (a, b) = best;
            // b > a, so remove b first to keep a's index valid.
            let (right, right_members) = clusters.remove(b);
            let (left, mut members) = clusters.remove(a);
            members.extend(right_members);
            clusters.push((MergeNode::merge(best_dist, left, right), members));
        }

        match clusters.pop() {
            Some((root, _)) => Ok(root),
            None => Err(Error::EmptyInput),
        }
    }

    /// Inter-cluster distance under the active linkage.
    fn cluster_distance(&self, matrix: &SimilarityMatrix, a: &[usize], b: &[usize]) -> f64 {
        match self.linkage {
            Linkage::Single => {
                let mut min = f64::INFINITY;
                for &i in a {
                    for &j in b {
                        min = min.min(matrix.dissimilarity(i, j));
                    }
                }
                min
            }
            Linkage::Complete => {
                let mut max = f64::NEG_INFINITY;
                for &i in a {
                    for &j in b {
                        max = max.max(matrix.dissimilarity(i, j));
                    }
                }
                max
            }
            Linkage::Average => {
                let mut sum = 0.0;
                for &i in a {
                    for &j in b {
                        sum += matrix.dissimilarity(i, j);
                    }
                }
                sum / (a.len() * b.len()) as f64
            }
        }
    }
}
