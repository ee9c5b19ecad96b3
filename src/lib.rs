//! # cardsort
//!
//! Analysis core for card-sorting studies: participants group a catalog of
//! labeled items into (possibly nested) groups, and this crate turns those
//! sessions into quantitative relationships between the items.
//!
//! # Pipeline
//!
//! ```text
//! catalog + sessions → SimilarityMatrix → { MergeNode tree, Embedding }
//! ```
//!
//! | Stage | Type | What it answers |
//! |-------|------|-----------------|
//! | [`SimilarityMatrix`] | n×n co-occurrence rates | how often were two items grouped together? |
//! | [`HierarchicalClustering`] | binary merge tree | which items form nested themes? |
//! | [`ClassicalScaling`] | 2-D coordinates | what does the item landscape look like? |
//!
//! The clusterer and embedder are independent consumers of the matrix; data
//! flows strictly one way. Everything is a pure, synchronous function of
//! its inputs — no I/O, no shared state — so results are safe to memoize by
//! (selection, sessions, linkage, seed) and calls may run concurrently.
//!
//! Storage, data entry, and export of the results (CSV matrices, SVG trees,
//! scatter plots) belong to the surrounding study manager; this crate only
//! consumes in-memory [`Session`] records and hands back in-memory results.
//!
//! # Example
//!
//! ```rust
//! use cardsort::{
//!     ClassicalScaling, GroupNode, HierarchicalClustering, Linkage, Session, SimilarityMatrix,
//! };
//!
//! // One participant groups shirts with hoodies, leaving the FAQ apart.
//! let sessions = vec![Session::new(
//!     "p1",
//!     vec![
//!         GroupNode::new("clothes").with_items(["shirts", "hoodies"]),
//!         GroupNode::new("help").with_items(["faq"]),
//!     ],
//! )];
//! let selected: Vec<String> = ["shirts", "hoodies", "faq"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//!
//! let matrix = SimilarityMatrix::from_sessions(&sessions, &selected)?;
//! assert_eq!(matrix.get(0, 1), 1.0);
//!
//! let tree = HierarchicalClustering::new()
//!     .with_linkage(Linkage::Average)
//!     .fit(&matrix)?;
//! assert_eq!(tree.n_leaves(), 3);
//!
//! let map = ClassicalScaling::new(2).with_seed(42).fit(&matrix)?;
//! assert_eq!(map.dims(), 2);
//! # Ok::<(), cardsort::Error>(())
//! ```

pub mod cluster;
pub mod dendrogram;
pub mod embedding;
/// Error types used across `cardsort`.
pub mod error;
pub mod session;
pub mod similarity;

#[cfg(test)]
mod analysis_tests;

pub use cluster::{HierarchicalClustering, Linkage};
pub use dendrogram::MergeNode;
pub use embedding::{ClassicalScaling, Embedding};
pub use error::{Error, Result};
pub use session::{GroupNode, Item, Session};
pub use similarity::SimilarityMatrix;
