//! Decision tree for binary classification

use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Smallest impurity decrease accepted as a split
const MIN_GAIN: f64 = 1e-12;

/// Decision tree configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of tree (None = grow until pure)
    pub max_depth: Option<usize>,
    /// Minimum samples required to split
    pub min_samples_split: usize,
    /// Minimum samples in leaf node
    pub min_samples_leaf: usize,
    /// Features considered per split
    pub max_features: usize,
}

/// Tree node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Leaf {
        /// Share of at-risk samples that reached this leaf
        positive_fraction: f64,
        n_samples: usize,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    fn leaf(positives: usize, n_samples: usize) -> Self {
        let positive_fraction = if n_samples == 0 {
            0.0
        } else {
            positives as f64 / n_samples as f64
        };

        TreeNode::Leaf {
            positive_fraction,
            n_samples,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }

    pub fn n_leaves(&self) -> usize {
        match self {
            TreeNode::Leaf { .. } => 1,
            TreeNode::Split { left, right, .. } => left.n_leaves() + right.n_leaves(),
        }
    }

    /// Largest feature index referenced by any split
    pub fn max_feature(&self) -> Option<usize> {
        match self {
            TreeNode::Leaf { .. } => None,
            TreeNode::Split {
                feature,
                left,
                right,
                ..
            } => [Some(*feature), left.max_feature(), right.max_feature()]
                .into_iter()
                .flatten()
                .max(),
        }
    }
}

/// Candidate split found while growing
struct Split {
    feature: usize,
    threshold: f64,
    gain: f64,
}

/// Fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    root: TreeNode,
    /// Unnormalized impurity decrease per feature
    importances: Vec<f64>,
}

/// Growing state borrowed for one fit
struct Grower<'a, R> {
    samples: &'a [R],
    labels: &'a [bool],
    config: &'a TreeConfig,
    n_features: usize,
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Grow a tree over `indices` (duplicates allowed for bootstrap samples)
    pub fn fit<R: AsRef<[f64]>>(
        samples: &[R],
        labels: &[bool],
        indices: &[usize],
        n_features: usize,
        config: &TreeConfig,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let mut grower = Grower {
            samples,
            labels,
            config,
            n_features,
            importances: vec![0.0; n_features],
        };

        let root = grower.build(indices, 0, rng);

        Self {
            root,
            importances: grower.importances,
        }
    }

    /// Positive-class fraction of the leaf `sample` falls into
    pub fn predict_one(&self, sample: &[f64]) -> f64 {
        let mut node = &self.root;
        loop {
            match node {
                TreeNode::Leaf {
                    positive_fraction, ..
                } => return *positive_fraction,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    let value = sample.get(*feature).copied().unwrap_or(0.0);
                    node = if value <= *threshold { left } else { right };
                }
            }
        }
    }

    pub fn root(&self) -> &TreeNode {
        &self.root
    }

    pub fn importances(&self) -> &[f64] {
        &self.importances
    }
}

impl<'a, R: AsRef<[f64]>> Grower<'a, R> {
    fn value(&self, index: usize, feature: usize) -> f64 {
        self.samples[index].as_ref()[feature]
    }

    fn build(&mut self, indices: &[usize], depth: usize, rng: &mut ChaCha8Rng) -> TreeNode {
        let n = indices.len();
        let positives = indices.iter().filter(|&&i| self.labels[i]).count();

        let depth_reached = self.config.max_depth.is_some_and(|max| depth >= max);
        if positives == 0 || positives == n || n < self.config.min_samples_split || depth_reached {
            return TreeNode::leaf(positives, n);
        }

        let Some(split) = self.best_split(indices, positives, rng) else {
            return TreeNode::leaf(positives, n);
        };

        self.importances[split.feature] += split.gain * n as f64;

        let (left, right): (Vec<usize>, Vec<usize>) = indices
            .iter()
            .partition(|&&i| self.value(i, split.feature) <= split.threshold);

        TreeNode::Split {
            feature: split.feature,
            threshold: split.threshold,
            left: Box::new(self.build(&left, depth + 1, rng)),
            right: Box::new(self.build(&right, depth + 1, rng)),
        }
    }

    /// Best split over a random feature subset. When no sampled feature can
    /// split the node, the remaining features are tried in shuffled order
    /// until one can.
    fn best_split(&self, indices: &[usize], positives: usize, rng: &mut ChaCha8Rng) -> Option<Split> {
        let parent_impurity = gini(positives, indices.len());

        let mut features: Vec<usize> = (0..self.n_features).collect();
        features.shuffle(rng);
        let max_features = self.config.max_features.max(1);

        let mut best: Option<Split> = None;
        for (visited, feature) in features.into_iter().enumerate() {
            if visited >= max_features && best.is_some() {
                break;
            }
            self.scan_feature(indices, feature, positives, parent_impurity, &mut best);
        }

        best
    }

    /// Try every cut between distinct values of `feature`
    fn scan_feature(
        &self,
        indices: &[usize],
        feature: usize,
        positives: usize,
        parent_impurity: f64,
        best: &mut Option<Split>,
    ) {
        let n = indices.len();
        let mut column: Vec<(f64, bool)> = indices
            .iter()
            .map(|&i| (self.value(i, feature), self.labels[i]))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left_positives = 0;
        for (k, pair) in column.windows(2).enumerate() {
            if pair[0].1 {
                left_positives += 1;
            }
            if pair[0].0 == pair[1].0 {
                continue;
            }

            let left_n = k + 1;
            let right_n = n - left_n;
            if left_n < self.config.min_samples_leaf || right_n < self.config.min_samples_leaf {
                continue;
            }

            let weighted = (left_n as f64 * gini(left_positives, left_n)
                + right_n as f64 * gini(positives - left_positives, right_n))
                / n as f64;
            let gain = parent_impurity - weighted;

            if gain > best.as_ref().map_or(MIN_GAIN, |b| b.gain) {
                *best = Some(Split {
                    feature,
                    threshold: (pair[0].0 + pair[1].0) / 2.0,
                    gain,
                });
            }
        }
    }
}

/// Gini impurity of a binary node
fn gini(positives: usize, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    let p = positives as f64 / n as f64;
    2.0 * p * (1.0 - p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn config() -> TreeConfig {
        TreeConfig {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: 1,
        }
    }

    #[test]
    fn test_gini() {
        assert_eq!(gini(0, 10), 0.0);
        assert_eq!(gini(10, 10), 0.0);
        assert!((gini(5, 10) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_separable_data() {
        let samples: Vec<[f64; 1]> = (0..20).map(|i| [i as f64]).collect();
        let labels: Vec<bool> = (0..20).map(|i| i >= 10).collect();
        let indices: Vec<usize> = (0..20).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let tree = DecisionTree::fit(&samples, &labels, &indices, 1, &config(), &mut rng);

        assert_eq!(tree.root().depth(), 2);
        assert_eq!(tree.predict_one(&[3.0]), 0.0);
        assert_eq!(tree.predict_one(&[15.0]), 1.0);
        assert!(tree.importances()[0] > 0.0);

        match tree.root() {
            TreeNode::Split { threshold, .. } => assert_eq!(*threshold, 9.5),
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_pure_node_is_leaf() {
        let samples = vec![[1.0], [2.0], [3.0]];
        let labels = vec![true, true, true];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let tree = DecisionTree::fit(&samples, &labels, &[0, 1, 2], 1, &config(), &mut rng);

        assert_eq!(tree.root().n_leaves(), 1);
        assert_eq!(tree.predict_one(&[100.0]), 1.0);
    }

    #[test]
    fn test_identical_values_cannot_split() {
        let samples = vec![[4.0], [4.0], [4.0], [4.0]];
        let labels = vec![true, false, true, false];
        let mut rng = ChaCha8Rng::seed_from_u64(0);

        let tree = DecisionTree::fit(&samples, &labels, &[0, 1, 2, 3], 1, &config(), &mut rng);

        assert_eq!(tree.predict_one(&[4.0]), 0.5);
    }

    #[test]
    fn test_unsplittable_sample_falls_back_to_other_features() {
        // Feature 0 is constant, only feature 1 separates the classes
        let samples: Vec<[f64; 2]> = (0..10).map(|i| [1.0, i as f64]).collect();
        let labels: Vec<bool> = (0..10).map(|i| i >= 5).collect();
        let indices: Vec<usize> = (0..10).collect();

        for seed in 0..16 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let tree = DecisionTree::fit(&samples, &labels, &indices, 2, &config(), &mut rng);

            assert_eq!(tree.root().max_feature(), Some(1), "seed {seed}");
            assert_eq!(tree.predict_one(&[1.0, 2.0]), 0.0);
            assert_eq!(tree.predict_one(&[1.0, 8.0]), 1.0);
        }
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let samples: Vec<[f64; 1]> = (0..16).map(|i| [i as f64]).collect();
        let labels: Vec<bool> = (0..16).map(|i| i % 2 == 0).collect();
        let indices: Vec<usize> = (0..16).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = TreeConfig {
            max_depth: Some(2),
            ..config()
        };

        let tree = DecisionTree::fit(&samples, &labels, &indices, 1, &config, &mut rng);

        assert!(tree.root().depth() <= 3);
    }

    #[test]
    fn test_missing_feature_reads_as_zero() {
        let samples = vec![[0.0, 0.0], [0.0, 10.0]];
        let labels = vec![false, true];
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = TreeConfig {
            max_features: 2,
            ..config()
        };

        let tree = DecisionTree::fit(&samples, &labels, &[0, 1], 2, &config, &mut rng);

        assert_eq!(tree.root().max_feature(), Some(1));
        assert_eq!(tree.predict_one(&[0.0]), 0.0);
    }
}
