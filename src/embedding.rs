//! Low-dimensional item embedding via classical scaling.
//!
//! Projects the similarity matrix into k real coordinates per item (k = 2
//! for scatter plots) so that items sorted together land near each other.
//!
//! # Algorithm
//!
//! ```text
//! 1. Dissimilarity  D[i][j] = max(0, 1 - S[i][j])
//! 2. Double-center  B = -1/2 · J·D·J   with J = I - (1/n)·11ᵀ
//! 3. Top-k eigenpairs of B by deflationary power iteration
//! 4. coord[i][c] = V[i][c] · sqrt(max(0, λ_c))
//! ```
//!
//! Step 2 is computed through row/column/grand means, which is the same
//! triple product written out entrywise.
//!
//! Note the *linear* dissimilarity in step 1: textbook classical MDS
//! double-centers a **squared** Euclidean distance matrix. Using `1 - S`
//! directly is a deliberate simplification and part of this crate's
//! contract — do not "correct" it to a squared distance. One
//! consequence is that B need not be positive semidefinite; negative
//! eigenvalues can surface in the top-k and are clamped to zero
//! displacement on their axis (step 4) instead of producing invalid
//! coordinates.
//!
//! # Eigensolver
//!
//! Deflationary power iteration: for each component, start from a random
//! vector, project out previously extracted eigenvectors (Gram–Schmidt),
//! normalize, then run a fixed budget of multiply / re-project / normalize
//! rounds; the eigenvalue is the Rayleigh quotient of the resulting vector.
//! The default budget is 200 iterations per component.
//!
//! This is an approximate solver. Near-degenerate eigenvalues or deflation
//! drift can swap close components; for card-sorting-scale inputs (tens of
//! items) the fixed budget is empirically ample. With a pinned seed
//! ([`ClassicalScaling::with_seed`]) the output is bit-reproducible;
//! without one, coordinates are stable only up to sign/rotation, and
//! callers should rely on the qualitative geometry alone.
//!
//! # References
//!
//! - Torgerson (1952). "Multidimensional scaling: I. Theory and method"
//! - Borg & Groenen (2005). "Modern Multidimensional Scaling", ch. 12

use ndarray::{Array1, Array2, ArrayView1};
use rand::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::similarity::SimilarityMatrix;

/// Classical-scaling embedder configuration.
#[derive(Debug, Clone)]
pub struct ClassicalScaling {
    /// Target dimensionality k.
    dims: usize,
    /// Power-iteration rounds per component.
    iterations: usize,
    /// Random seed.
    seed: Option<u64>,
}

impl ClassicalScaling {
    /// Create an embedder targeting `dims` coordinates per item.
    pub fn new(dims: usize) -> Self {
        Self {
            dims,
            iterations: 200,
            seed: None,
        }
    }

    /// Set the power-iteration budget per component.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Embed the matrix's items.
    ///
    /// Errors: `dims == 0` is rejected with [`Error::InvalidParameter`],
    /// an empty matrix with [`Error::EmptyInput`]. A single item embeds at
    /// the origin.
    pub fn fit(&self, matrix: &SimilarityMatrix) -> Result<Embedding> {
        if self.dims == 0 {
            return Err(Error::InvalidParameter {
                name: "dims",
                message: "embedding dimensionality must be at least 1",
            });
        }
        let n = matrix.n_items();
        if n == 0 {
            return Err(Error::EmptyInput);
        }

        let b = double_centered(matrix);

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };

        let mut eigenvectors: Vec<Array1<f64>> = Vec::with_capacity(self.dims);
        let mut eigenvalues: Vec<f64> = Vec::with_capacity(self.dims);

        for _ in 0..self.dims {
            let mut v = Array1::from_shape_fn(n, |_| rng.random::<f64>() - 0.5);
            project_out(&mut v, &eigenvectors);

            if normalize(&mut v) {
                for _ in 0..self.iterations {
                    let mut w = b.dot(&v);
                    project_out(&mut w, &eigenvectors);
                    if !normalize(&mut w) {
                        // B annihilated the remaining component; nothing
                        // left to displace on this axis.
                        v.fill(0.0);
                        break;
                    }
                    v = w;
                }
            } else {
                // Deflation exhausted the space (k exceeds the rank).
                v.fill(0.0);
            }

            let lambda = v.dot(&b.dot(&v));
            eigenvalues.push(lambda);
            eigenvectors.push(v);
        }

        let mut coords = Array2::<f64>::zeros((n, self.dims));
        for (c, (v, &lambda)) in eigenvectors.iter().zip(&eigenvalues).enumerate() {
            // Negative eigenvalues contribute zero displacement.
            let scale = lambda.max(0.0).sqrt();
            for i in 0..n {
                coords[[i, c]] = v[i] * scale;
            }
        }

        Ok(Embedding {
            items: matrix.items().to_vec(),
            coords,
            eigenvalues,
        })
    }
}

/// B = -1/2 · J·D·J with D the clamped linear dissimilarity, entrywise.
fn double_centered(matrix: &SimilarityMatrix) -> Array2<f64> {
    let n = matrix.n_items();
    let nf = n as f64;

    let mut d = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            d[[i, j]] = (1.0 - matrix.get(i, j)).max(0.0);
        }
    }

    let row_means: Vec<f64> = (0..n).map(|i| d.row(i).sum() / nf).collect();
    let col_means: Vec<f64> = (0..n).map(|j| d.column(j).sum() / nf).collect();
    let grand_mean = row_means.iter().sum::<f64>() / nf;

    let mut b = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            b[[i, j]] = -0.5 * (d[[i, j]] - row_means[i] - col_means[j] + grand_mean);
        }
    }
    b
}

/// Subtract the components of `v` along each basis vector.
fn project_out(v: &mut Array1<f64>, basis: &[Array1<f64>]) {
    for u in basis {
        let dot = v.dot(u);
        v.scaled_add(-dot, u);
    }
}

/// Scale `v` to unit length; false when the vector is (numerically) zero.
fn normalize(v: &mut Array1<f64>) -> bool {
    let norm = v.dot(v).sqrt();
    if norm <= 1e-12 {
        return false;
    }
    *v /= norm;
    true
}

/// Item coordinates produced by [`ClassicalScaling`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Embedding {
    /// Item ids, in matrix order.
    items: Vec<String>,
    /// n × k coordinates.
    coords: Array2<f64>,
    /// The k eigenvalues used to scale the axes (unclamped).
    eigenvalues: Vec<f64>,
}

impl Embedding {
    /// Number of embedded items.
    pub fn n_items(&self) -> usize {
        self.items.len()
    }

    /// Embedding dimensionality k.
    pub fn dims(&self) -> usize {
        self.coords.ncols()
    }

    /// Item ids, in matrix order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// The n × k coordinate matrix.
    pub fn coords(&self) -> &Array2<f64> {
        &self.coords
    }

    /// Coordinates of the item at matrix index `i`.
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.coords.row(i)
    }

    /// Coordinates of an item by id.
    pub fn position(&self, id: &str) -> Option<ArrayView1<'_, f64>> {
        self.items
            .iter()
            .position(|item| item == id)
            .map(|i| self.coords.row(i))
    }

    /// Eigenvalues backing each axis, as extracted (possibly negative).
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }
}
