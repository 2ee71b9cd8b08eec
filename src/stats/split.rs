//! Reproducible train/test partitioning.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Row indices of a train/test partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n` with a seeded RNG and hold out `ceil(n * test_fraction)` rows.
///
/// With two or more rows both partitions are non-empty. Each partition is
/// returned in ascending order.
pub fn train_test_split(n: usize, test_fraction: f64, seed: u64) -> Split {
    let mut indices: Vec<usize> = (0..n).collect();
    if n < 2 {
        return Split {
            train: indices,
            test: Vec::new(),
        };
    }

    let n_test = ((n as f64 * test_fraction).ceil() as usize).clamp(1, n - 1);

    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut test = indices[..n_test].to_vec();
    let mut train = indices[n_test..].to_vec();
    test.sort_unstable();
    train.sort_unstable();

    Split { train, test }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_follow_fraction() {
        let split = train_test_split(9, 0.2, 42);
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 7);

        let split = train_test_split(10, 0.2, 42);
        assert_eq!(split.test.len(), 2);

        let split = train_test_split(2, 0.2, 42);
        assert_eq!((split.train.len(), split.test.len()), (1, 1));
    }

    #[test]
    fn partitions_cover_all_rows() {
        let split = train_test_split(25, 0.3, 7);
        let mut all: Vec<usize> = split.train.iter().chain(&split.test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..25).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(train_test_split(30, 0.2, 42), train_test_split(30, 0.2, 42));
    }

    #[test]
    fn tiny_inputs() {
        assert_eq!(
            train_test_split(1, 0.2, 42),
            Split {
                train: vec![0],
                test: vec![]
            }
        );
        assert!(train_test_split(0, 0.2, 42).train.is_empty());
    }
}
