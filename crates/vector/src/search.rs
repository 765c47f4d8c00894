//! Exact nearest-neighbour selection
//!
//! Distances are squared Euclidean. Selection keeps a bounded max-heap of the
//! `k` best candidates seen so far; the worst one sits on top and is evicted
//! when a closer candidate arrives. Candidates order by distance, then by
//! insertion position, so equal distances resolve to the earlier document.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Squared Euclidean distance `Σ (a_j - b_j)^2`
///
/// Callers guarantee equal lengths.
pub fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f32,
    position: usize,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // total_cmp places NaN after every finite distance
        self.distance
            .total_cmp(&other.distance)
            .then_with(|| self.position.cmp(&other.position))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Pick the `k` smallest `(position, distance)` pairs in ascending order
pub fn top_k<I>(distances: I, k: usize) -> Vec<(usize, f32)>
where
    I: IntoIterator<Item = (usize, f32)>,
{
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Candidate> = BinaryHeap::with_capacity(k + 1);
    for (position, distance) in distances {
        let candidate = Candidate { distance, position };
        if heap.len() < k {
            heap.push(candidate);
        } else if let Some(mut worst) = heap.peek_mut() {
            if candidate < *worst {
                *worst = candidate;
            }
        }
    }

    heap.into_sorted_vec()
        .into_iter()
        .map(|c| (c.position, c.distance))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_euclidean() {
        assert_eq!(squared_euclidean(&[0.0, 0.0], &[1.0, 1.0]), 2.0);
        assert_eq!(squared_euclidean(&[3.0, -4.0], &[0.0, 0.0]), 25.0);
        assert_eq!(squared_euclidean(&[], &[]), 0.0);
    }

    #[test]
    fn test_top_k_orders_ascending() {
        let picked = top_k(vec![(0, 5.0), (1, 1.0), (2, 3.0), (3, 0.5)], 3);
        assert_eq!(picked, vec![(3, 0.5), (1, 1.0), (2, 3.0)]);
    }

    #[test]
    fn test_top_k_ties_prefer_earlier_position() {
        let picked = top_k(vec![(0, 2.0), (1, 1.0), (2, 1.0), (3, 1.0)], 2);
        assert_eq!(picked, vec![(1, 1.0), (2, 1.0)]);

        // Same result regardless of the order candidates are seen in
        let picked = top_k(vec![(3, 1.0), (2, 1.0), (0, 2.0), (1, 1.0)], 2);
        assert_eq!(picked, vec![(1, 1.0), (2, 1.0)]);
    }

    #[test]
    fn test_top_k_clamps_and_zero() {
        assert_eq!(top_k(vec![(0, 1.0), (1, 0.0)], 10), vec![(1, 0.0), (0, 1.0)]);
        assert!(top_k(vec![(0, 1.0)], 0).is_empty());
        assert!(top_k(Vec::new(), 4).is_empty());
    }

    #[test]
    fn test_nan_sorts_last() {
        let picked = top_k(vec![(0, f32::NAN), (1, 100.0), (2, 1.0)], 3);
        assert_eq!(picked[0], (2, 1.0));
        assert_eq!(picked[1], (1, 100.0));
        assert_eq!(picked[2].0, 0);
        assert!(picked[2].1.is_nan());
    }

    #[test]
    fn test_matches_full_sort() {
        // Deterministic pseudo-random distances with plenty of ties
        let distances: Vec<(usize, f32)> = (0..200)
            .map(|i| (i, ((i * 7919) % 37) as f32))
            .collect();

        let mut expected = distances.clone();
        expected.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        for k in [1, 5, 37, 199, 200, 500] {
            let picked = top_k(distances.clone(), k);
            assert_eq!(picked, expected[..k.min(expected.len())].to_vec(), "k={}", k);
        }
    }
}
