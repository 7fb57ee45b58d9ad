//! Random-forest regression
//!
//! A bootstrap ensemble of CART regression trees. Splits minimize the summed
//! squared error of the two children; leaves predict the mean of their
//! samples. All randomness comes from the caller-supplied RNG so a fixed
//! seed yields a byte-identical model.

use rand::Rng;

use crate::error::{Error, Result};

const MIN_SAMPLES_SPLIT: usize = 2;

#[derive(Debug, Clone)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

/// A single regression tree, grown to purity
#[derive(Debug, Clone)]
pub struct RegressionTree {
    root: Node,
}

impl RegressionTree {
    /// Fit a tree on the given rows. Rows and targets must be non-empty and
    /// of equal length; the forest wrapper guarantees both.
    fn fit(xs: &[Vec<f64>], ys: &[f64]) -> Self {
        let indices: Vec<usize> = (0..ys.len()).collect();
        Self {
            root: grow(xs, ys, &indices),
        }
    }

    pub fn predict(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { value } => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

fn mean(ys: &[f64], indices: &[usize]) -> f64 {
    indices.iter().map(|&i| ys[i]).sum::<f64>() / indices.len() as f64
}

/// Summed squared error of a group around its own mean, computed from the
/// running sum and sum of squares.
fn sse(sum: f64, sq_sum: f64, n: usize) -> f64 {
    (sq_sum - sum * sum / n as f64).max(0.0)
}

fn grow(xs: &[Vec<f64>], ys: &[f64], indices: &[usize]) -> Node {
    let node_mean = mean(ys, indices);

    if indices.len() < MIN_SAMPLES_SPLIT {
        return Node::Leaf { value: node_mean };
    }

    // A pure node cannot be improved by splitting
    let first = ys[indices[0]];
    if indices.iter().all(|&i| ys[i] == first) {
        return Node::Leaf { value: node_mean };
    }

    match best_split(xs, ys, indices) {
        None => Node::Leaf { value: node_mean },
        Some((feature, threshold)) => {
            let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                .iter()
                .partition(|&&i| xs[i][feature] <= threshold);

            Node::Split {
                feature,
                threshold,
                left: Box::new(grow(xs, ys, &left_idx)),
                right: Box::new(grow(xs, ys, &right_idx)),
            }
        }
    }
}

/// Find the (feature, threshold) pair minimizing the summed squared error of
/// the two children. Candidate thresholds are midpoints between consecutive
/// distinct feature values. Ties keep the first candidate found, so the
/// search order (ascending feature, ascending threshold) fixes the result.
fn best_split(xs: &[Vec<f64>], ys: &[f64], indices: &[usize]) -> Option<(usize, f64)> {
    let n = indices.len();
    let n_features = xs[indices[0]].len();

    let total_sum: f64 = indices.iter().map(|&i| ys[i]).sum();
    let total_sq: f64 = indices.iter().map(|&i| ys[i] * ys[i]).sum();
    let parent_sse = sse(total_sum, total_sq, n);

    let mut best: Option<(usize, f64)> = None;
    let mut best_sse = parent_sse;

    let mut order: Vec<usize> = Vec::with_capacity(n);
    for feature in 0..n_features {
        order.clear();
        order.extend_from_slice(indices);
        order.sort_unstable_by(|&a, &b| xs[a][feature].total_cmp(&xs[b][feature]));

        let mut left_sum = 0.0;
        let mut left_sq = 0.0;

        for (pos, &i) in order[..n - 1].iter().enumerate() {
            left_sum += ys[i];
            left_sq += ys[i] * ys[i];

            let here = xs[i][feature];
            let next = xs[order[pos + 1]][feature];
            if here == next {
                continue;
            }

            let n_left = pos + 1;
            let split_sse = sse(left_sum, left_sq, n_left)
                + sse(total_sum - left_sum, total_sq - left_sq, n - n_left);

            if split_sse < best_sse {
                best_sse = split_sse;
                best = Some((feature, (here + next) / 2.0));
            }
        }
    }

    best
}

/// Bootstrap ensemble of regression trees
#[derive(Debug, Clone)]
pub struct ForestRegressor {
    trees: Vec<RegressionTree>,
}

impl ForestRegressor {
    /// Fit `n_trees` trees, each on a bootstrap resample drawn from `rng`.
    pub fn fit<R: Rng>(
        xs: &[Vec<f64>],
        ys: &[f64],
        n_trees: usize,
        rng: &mut R,
    ) -> Result<Self> {
        if xs.is_empty() || xs.len() != ys.len() {
            return Err(Error::Analysis(format!(
                "cannot fit forest on {} rows with {} targets",
                xs.len(),
                ys.len()
            )));
        }

        let n = ys.len();
        let mut trees = Vec::with_capacity(n_trees);
        let mut sample_x: Vec<Vec<f64>> = Vec::with_capacity(n);
        let mut sample_y: Vec<f64> = Vec::with_capacity(n);

        for _ in 0..n_trees {
            sample_x.clear();
            sample_y.clear();
            for _ in 0..n {
                let i = rng.gen_range(0..n);
                sample_x.push(xs[i].clone());
                sample_y.push(ys[i]);
            }
            trees.push(RegressionTree::fit(&sample_x, &sample_y));
        }

        Ok(Self { trees })
    }

    /// Mean prediction over all trees
    pub fn predict(&self, x: &[f64]) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.predict(x)).sum();
        total / self.trees.len() as f64
    }

    /// R-squared coefficient of determination against a held-out partition.
    /// A zero-variance target makes the baseline undefined; that is a fatal
    /// fitting failure, not a recoverable condition.
    pub fn r_squared(&self, xs: &[Vec<f64>], ys: &[f64]) -> Result<f64> {
        let n = ys.len();
        if n == 0 {
            return Err(Error::Analysis(
                "empty held-out partition for scoring".to_string(),
            ));
        }

        let mean_y = ys.iter().sum::<f64>() / n as f64;
        let ss_tot: f64 = ys.iter().map(|&y| (y - mean_y).powi(2)).sum();
        if ss_tot == 0.0 {
            return Err(Error::Analysis(
                "zero variance in held-out target; cannot score model".to_string(),
            ));
        }

        let ss_res: f64 = xs
            .iter()
            .zip(ys)
            .map(|(x, &y)| (y - self.predict(x)).powi(2))
            .sum();

        Ok(1.0 - ss_res / ss_tot)
    }
}
