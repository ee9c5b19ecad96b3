//! Co-occurrence similarity from sorting sessions.
//!
//! Turns a pile of independent sorting sessions into a single symmetric
//! matrix answering: *how often did participants who saw both items place
//! them in the same group?*
//!
//! # The Two Counters
//!
//! For a selected, ordered list of n items, two integer matrices are
//! accumulated across sessions:
//!
//! | Matrix | Counts | Incremented |
//! |--------|--------|-------------|
//! | `C` | same-group co-occurrence | once per node where both items are local |
//! | `P` | same-session co-presence | once per session where both items appear anywhere |
//!
//! The similarity is the rate `S[i][j] = C[i][j] / P[i][j]` (0 when the
//! pair never co-appeared). `P` is the denominator — "how often could this
//! pair have shown a similarity judgment" — which makes `S` robust to items
//! being judged in different numbers of sessions.
//!
//! # Nesting Semantics
//!
//! Every node of a session's forest is an independent grouping context:
//! a node's *local* items (placed directly in it) form a co-occurrence
//! cluster when two or more of them are in the selection. A parent does not
//! inherit its children's items for clustering — but any item anywhere in
//! the forest counts toward the session's present set.
//!
//! # Edge Cases
//!
//! - Item ids outside the selection (or outside the catalog entirely) are
//!   silently ignored, never an error.
//! - An item absent from every session has a zero row/column and
//!   `S[i][i] = 0`; present items have `S[i][i] = 1`.
//! - Zero sessions yield the all-zero matrix.
//!
//! Complexity is O(sessions × average cluster size²); human-sorted groups
//! are small, so this is far from the bottleneck.

use std::collections::HashMap;

use ndarray::Array2;

use crate::error::{Error, Result};
use crate::session::Session;

/// Symmetric co-occurrence similarity over a fixed ordered item list.
///
/// Entries are in `[0, 1]`; the diagonal is 1 exactly for items that appear
/// in at least one session. The raw co-occurrence (`C`) and co-presence
/// (`P`) counts remain available for export or inspection.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    /// Selected item ids, in analysis order.
    items: Vec<String>,
    /// Derived similarity rates.
    similarity: Array2<f64>,
    /// Same-group co-occurrence counts per session node.
    cooccurrence: Array2<u32>,
    /// Same-session co-presence counts.
    copresence: Array2<u32>,
}

impl SimilarityMatrix {
    /// Build the similarity matrix for `selected` items from completed
    /// sessions.
    ///
    /// `selected` fixes both the subset of items analyzed and their order
    /// in the matrix; it may be a subset of the study catalog. Returns
    /// [`Error::DuplicateItem`] if the same id is selected twice.
    pub fn from_sessions(sessions: &[Session], selected: &[String]) -> Result<Self> {
        let n = selected.len();
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(n);
        for (i, id) in selected.iter().enumerate() {
            if index.insert(id.as_str(), i).is_some() {
                return Err(Error::DuplicateItem { id: id.clone() });
            }
        }

        let mut cooccurrence = Array2::<u32>::zeros((n, n));
        let mut copresence = Array2::<u32>::zeros((n, n));
        let mut present = vec![false; n];

        for session in sessions {
            // Indices of selected items seen anywhere in this session's
            // forest, deduplicated in first-seen order.
            let mut seen = vec![false; n];
            let mut present_set: Vec<usize> = Vec::new();

            session.walk(&mut |node| {
                let local: Vec<usize> = node
                    .items
                    .iter()
                    .filter_map(|id| index.get(id.as_str()).copied())
                    .collect();

                for &i in &local {
                    if !seen[i] {
                        seen[i] = true;
                        present_set.push(i);
                    }
                }

                // A node is a co-occurrence cluster only with >= 2 selected
                // local items. Self-pairs count the diagonal once.
                if local.len() >= 2 {
                    for (a, &i) in local.iter().enumerate() {
                        for &j in &local[a..] {
                            cooccurrence[[i, j]] += 1;
                            if i != j {
                                cooccurrence[[j, i]] += 1;
                            }
                        }
                    }
                }
            });

            // Co-presence: once per session per unordered pair, no matter
            // how many nodes each item occupies.
            for (a, &i) in present_set.iter().enumerate() {
                for &j in &present_set[a..] {
                    copresence[[i, j]] += 1;
                    if i != j {
                        copresence[[j, i]] += 1;
                    }
                }
            }
            for &i in &present_set {
                present[i] = true;
            }
        }

        let mut similarity = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    similarity[[i, i]] = if present[i] { 1.0 } else { 0.0 };
                } else if copresence[[i, j]] > 0 {
                    similarity[[i, j]] =
                        f64::from(cooccurrence[[i, j]]) / f64::from(copresence[[i, j]]);
                }
            }
        }

        Ok(Self {
            items: selected.to_vec(),
            similarity,
            cooccurrence,
            copresence,
        })
    }

    /// Wrap a precomputed similarity matrix.
    ///
    /// For callers that already hold similarity scores (or want to feed the
    /// clusterer/embedder synthetic input). The co-occurrence and
    /// co-presence counts are zero in the result.
    pub fn from_similarity(items: Vec<String>, similarity: Array2<f64>) -> Result<Self> {
        let n = items.len();
        {
            let mut sorted: Vec<&str> = items.iter().map(String::as_str).collect();
            sorted.sort_unstable();
            if let Some(dup) = sorted.windows(2).find(|w| w[0] == w[1]) {
                return Err(Error::DuplicateItem {
                    id: dup[0].to_string(),
                });
            }
        }
        if similarity.nrows() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: similarity.nrows(),
            });
        }
        if similarity.ncols() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                found: similarity.ncols(),
            });
        }

        Ok(Self {
            items,
            similarity,
            cooccurrence: Array2::zeros((n, n)),
            copresence: Array2::zeros((n, n)),
        })
    }

    /// Number of items the matrix covers.
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// True when the matrix covers no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item ids, in matrix order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Matrix index of an item id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i == id)
    }

    /// Similarity between items `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.similarity[[i, j]]
    }

    /// Dissimilarity `1 - S[i][j]`, the distance the clusterer works on.
    pub fn dissimilarity(&self, i: usize, j: usize) -> f64 {
        1.0 - self.similarity[[i, j]]
    }

    /// The full similarity matrix.
    pub fn similarity(&self) -> &Array2<f64> {
        &self.similarity
    }

    /// Raw same-group co-occurrence counts.
    pub fn cooccurrence(&self) -> &Array2<u32> {
        &self.cooccurrence
    }

    /// Raw same-session co-presence counts.
    pub fn copresence(&self) -> &Array2<u32> {
        &self.copresence
    }
}
