//! Isolation forest: an ensemble of random-partitioning trees.
//!
//! Each tree is an arena of nodes indexed by integer offsets; points
//! isolated in fewer splits score as more anomalous. Randomness is
//! seeded once at construction, so scoring is exactly reproducible and
//! per-tree parallel construction cannot affect the output.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Expected path length of an unsuccessful binary search over n points,
/// the standard isolation-forest normalizer c(n).
fn expected_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        n => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        size: usize,
    },
}

/// One isolation tree: an index-addressable node arena, root at 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct IsoTree {
    nodes: Vec<Node>,
}

impl IsoTree {
    fn build(
        rows: &[Vec<f64>],
        indices: Vec<usize>,
        depth_limit: usize,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut nodes = Vec::new();
        build_node(&mut nodes, rows, indices, 0, depth_limit, rng);
        Self { nodes }
    }

    fn path_length(&self, row: &[f64]) -> f64 {
        let mut node = 0;
        let mut depth = 0.0;
        loop {
            match &self.nodes[node] {
                Node::Leaf { size } => return depth + expected_path_length(*size),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] < *threshold { *left } else { *right };
                    depth += 1.0;
                }
            }
        }
    }
}

/// Builds a subtree and returns its arena index.
fn build_node(
    nodes: &mut Vec<Node>,
    rows: &[Vec<f64>],
    indices: Vec<usize>,
    depth: usize,
    depth_limit: usize,
    rng: &mut ChaCha8Rng,
) -> usize {
    let idx = nodes.len();
    nodes.push(Node::Leaf {
        size: indices.len(),
    });
    if depth >= depth_limit || indices.len() <= 1 {
        return idx;
    }

    // Splittable features: those not constant within this node.
    let n_features = rows[indices[0]].len();
    let candidates: Vec<(usize, f64, f64)> = (0..n_features)
        .filter_map(|f| {
            let mut min = f64::INFINITY;
            let mut max = f64::NEG_INFINITY;
            for &i in &indices {
                min = min.min(rows[i][f]);
                max = max.max(rows[i][f]);
            }
            (min < max).then_some((f, min, max))
        })
        .collect();
    if candidates.is_empty() {
        return idx;
    }

    let (feature, min, max) = candidates[rng.gen_range(0..candidates.len())];
    let threshold = rng.gen_range(min..max);

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
        .into_iter()
        .partition(|&i| rows[i][feature] < threshold);

    let left = build_node(nodes, rows, left_idx, depth + 1, depth_limit, rng);
    let right = build_node(nodes, rows, right_idx, depth + 1, depth_limit, rng);
    nodes[idx] = Node::Split {
        feature,
        threshold,
        left,
        right,
    };
    idx
}

/// Fitted random-partitioning ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForest {
    trees: Vec<IsoTree>,
    sample_size: usize,
}

impl IsolationForest {
    /// Build the ensemble over a standardized row-major matrix.
    ///
    /// Each tree draws `ceil(n * max_samples)` rows without replacement
    /// using a per-tree RNG derived from the master seed, so the result
    /// does not depend on tree construction order.
    pub fn fit(rows: &[Vec<f64>], n_trees: usize, max_samples: f64, seed: u64) -> Self {
        let n = rows.len();
        let sample_size = ((n as f64 * max_samples).ceil() as usize).clamp(1, n);
        let depth_limit = (sample_size as f64).log2().ceil().max(0.0) as usize;

        let trees: Vec<IsoTree> = (0..n_trees)
            .into_par_iter()
            .map(|t| {
                let tree_seed = seed ^ (t as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                let mut rng = ChaCha8Rng::seed_from_u64(tree_seed);
                let indices = rand::seq::index::sample(&mut rng, n, sample_size).into_vec();
                IsoTree::build(rows, indices, depth_limit, &mut rng)
            })
            .collect();

        Self { trees, sample_size }
    }

    /// Raw anomaly score of one row: `-2^(-E[h(x)] / c(sample_size))`,
    /// in [-1, 0). More negative is more anomalous.
    pub fn score_sample(&self, row: &[f64]) -> f64 {
        let normalizer = expected_path_length(self.sample_size);
        if normalizer <= 0.0 {
            return -1.0;
        }
        let avg_path: f64 = self
            .trees
            .iter()
            .map(|t| t.path_length(row))
            .sum::<f64>()
            / self.trees.len() as f64;
        -(2.0f64.powf(-avg_path / normalizer))
    }

    pub fn score_samples(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|r| self.score_sample(r)).collect()
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clustered_rows() -> Vec<Vec<f64>> {
        // Tight cluster around (0, 0) with one far outlier.
        let mut rows: Vec<Vec<f64>> = (0..200)
            .map(|i| {
                let jitter = (i % 10) as f64 * 0.01;
                vec![jitter, -jitter]
            })
            .collect();
        rows.push(vec![8.0, 8.0]);
        rows
    }

    #[test]
    fn test_expected_path_length() {
        assert_eq!(expected_path_length(0), 0.0);
        assert_eq!(expected_path_length(1), 0.0);
        assert_eq!(expected_path_length(2), 1.0);
        // c(n) grows with n.
        assert!(expected_path_length(100) > expected_path_length(10));
    }

    #[test]
    fn test_outlier_scores_lower_than_inliers() {
        let rows = clustered_rows();
        let forest = IsolationForest::fit(&rows, 100, 1.0, 42);

        let outlier_score = forest.score_sample(&rows[200]);
        let inlier_score = forest.score_sample(&rows[0]);
        assert!(
            outlier_score < inlier_score,
            "outlier {outlier_score} should score below inlier {inlier_score}"
        );
    }

    #[test]
    fn test_scores_are_bounded() {
        let rows = clustered_rows();
        let forest = IsolationForest::fit(&rows, 50, 0.8, 42);
        for score in forest.score_samples(&rows) {
            assert!((-1.0..=0.0).contains(&score));
        }
    }

    #[test]
    fn test_same_seed_reproduces_scores() {
        let rows = clustered_rows();
        let a = IsolationForest::fit(&rows, 64, 0.8, 7);
        let b = IsolationForest::fit(&rows, 64, 0.8, 7);
        assert_eq!(a.score_samples(&rows), b.score_samples(&rows));
    }

    #[test]
    fn test_different_seeds_differ() {
        let rows = clustered_rows();
        let a = IsolationForest::fit(&rows, 64, 0.8, 1);
        let b = IsolationForest::fit(&rows, 64, 0.8, 2);
        assert_ne!(a.score_samples(&rows), b.score_samples(&rows));
    }

    #[test]
    fn test_sample_size_clamped() {
        let rows = vec![vec![0.0], vec![1.0], vec![2.0]];
        let forest = IsolationForest::fit(&rows, 10, 1.0, 42);
        assert_eq!(forest.sample_size(), 3);
        assert_eq!(forest.n_trees(), 10);
    }

    #[test]
    fn test_constant_matrix_builds_leaves() {
        let rows = vec![vec![1.0, 1.0]; 50];
        let forest = IsolationForest::fit(&rows, 20, 1.0, 42);
        // No splittable feature: every point gets the same score.
        let scores = forest.score_samples(&rows);
        assert!(scores.windows(2).all(|w| w[0] == w[1]));
    }
}
