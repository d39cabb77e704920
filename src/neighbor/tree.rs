//! Transient binary tree that orders candidates by distance to an owner point.

use crate::model::{Instance, Metric, Point};

#[derive(Debug, Clone, Copy)]
struct Node {
    item: usize,
    /// Distance from `item` to the owner point.
    key: f64,
    left: Option<usize>,
    right: Option<usize>,
}

/// Unbalanced binary tree used to pick near candidates for one owner point.
///
/// # Algorithm
///
/// Candidates are inserted in the order given. At a node `N`, a candidate
/// `C` goes left when `d(N, owner) < d(owner, C)` (it is farther than `N`)
/// and right otherwise, so the tree is a binary search tree on distance with
/// the nearest candidates on the right. [`extract`](Self::extract) walks
/// right-to-left in-order and stops after `k` items. The walk has no depth
/// cutoff: it always returns the exact `k` nearest, however unbalanced the
/// tree is. Only ties depend on insertion order: candidates at equal
/// distance come out latest-inserted first.
///
/// The tree is not rebalanced: inserting candidates already sorted by
/// distance degenerates it into a chain, which is why the walk is iterative.
/// Nodes live in a `Vec` owned by the tree and linked by index; the tree is
/// meant to be built and dropped inside a single candidate-list build.
#[derive(Debug, Clone, Default)]
pub struct NeighborTree {
    nodes: Vec<Node>,
}

impl NeighborTree {
    /// Creates an empty tree with room for `capacity` candidates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Number of inserted candidates.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` when nothing was inserted.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts candidate `item` whose distance to the owner is `distance`.
    pub fn insert(&mut self, item: usize, distance: f64) {
        let new = self.nodes.len();
        self.nodes.push(Node {
            item,
            key: distance,
            left: None,
            right: None,
        });
        if new == 0 {
            return;
        }

        let mut at = 0;
        loop {
            let node = self.nodes[at];
            let go_left = node.key < distance;
            let next = if go_left { node.left } else { node.right };
            match next {
                Some(child) => at = child,
                None => {
                    if go_left {
                        self.nodes[at].left = Some(new);
                    } else {
                        self.nodes[at].right = Some(new);
                    }
                    return;
                }
            }
        }
    }

    /// Returns the `min(k, len)` nearest candidates, nearest first.
    pub fn extract(&self, k: usize) -> Vec<usize> {
        let mut out = Vec::with_capacity(k.min(self.nodes.len()));
        if k == 0 || self.nodes.is_empty() {
            return out;
        }

        let mut stack: Vec<usize> = Vec::new();
        let mut cur = Some(0usize);
        loop {
            while let Some(node) = cur {
                stack.push(node);
                cur = self.nodes[node].right;
            }
            let Some(node) = stack.pop() else {
                break;
            };
            out.push(self.nodes[node].item);
            if out.len() == k {
                break;
            }
            cur = self.nodes[node].left;
        }
        out
    }

    /// Candidate indices near `owner`, inserting `candidates` in the order given.
    pub fn nearest<M: Metric>(
        instance: &Instance<M>,
        owner: usize,
        candidates: impl IntoIterator<Item = usize>,
        k: usize,
    ) -> Vec<usize> {
        let candidates = candidates.into_iter();
        let mut tree = Self::with_capacity(candidates.size_hint().0);
        for c in candidates {
            tree.insert(c, instance.distance(owner, c));
        }
        tree.extract(k)
    }

    /// Copies of the points in `candidates` near `owner`.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tsp::model::{Euclidean, Point};
    /// use u_tsp::neighbor::NeighborTree;
    ///
    /// let owner = Point::new(0, 0.0, 0.0);
    /// let candidates = [
    ///     Point::new(1, 5.0, 0.0),
    ///     Point::new(2, 1.0, 0.0),
    ///     Point::new(3, 9.0, 0.0),
    /// ];
    /// let near = NeighborTree::nearest_points(&Euclidean, &owner, &candidates, 2);
    /// assert_eq!(near.len(), 2);
    /// ```
    pub fn nearest_points<M: Metric + ?Sized>(
        metric: &M,
        owner: &Point,
        candidates: &[Point],
        k: usize,
    ) -> Vec<Point> {
        let mut tree = Self::with_capacity(candidates.len());
        for (i, c) in candidates.iter().enumerate() {
            tree.insert(i, metric.distance(owner, c));
        }
        tree.extract(k).into_iter().map(|i| candidates[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Euclidean;
    use crate::random::create_rng;
    use rand::Rng;

    fn line(xs: &[f64]) -> Vec<Point> {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| Point::new(i as u32 + 1, x, 0.0))
            .collect()
    }

    #[test]
    fn test_k2_over_three_candidates() {
        let owner = Point::new(0, 0.0, 0.0);
        let candidates = line(&[3.0, 1.0, 2.0]);
        let near = NeighborTree::nearest_points(&Euclidean, &owner, &candidates, 2);
        assert_eq!(near.len(), 2);
        for p in &near {
            assert!(candidates.contains(p));
        }
        assert_ne!(near[0].id, near[1].id);
    }

    #[test]
    fn test_extracts_nearest_first() {
        let mut tree = NeighborTree::default();
        tree.insert(10, 3.0);
        tree.insert(11, 1.0);
        tree.insert(12, 2.0);
        tree.insert(13, 5.0);
        assert_eq!(tree.extract(2), vec![11, 12]);
        assert_eq!(tree.extract(4), vec![11, 12, 10, 13]);
    }

    #[test]
    fn test_ties_come_out_latest_first() {
        let mut tree = NeighborTree::default();
        tree.insert(0, 2.0);
        tree.insert(1, 2.0);
        tree.insert(2, 2.0);
        assert_eq!(tree.extract(3), vec![2, 1, 0]);
    }

    #[test]
    fn test_chain_shaped_trees() {
        let mut far_to_near = NeighborTree::default();
        let mut near_to_far = NeighborTree::default();
        for i in 0..200 {
            far_to_near.insert(i, (200 - i) as f64);
            near_to_far.insert(i, i as f64);
        }
        // The nearest three sit at depth 197..=199 of the chain.
        assert_eq!(far_to_near.extract(3), vec![199, 198, 197]);
        assert_eq!(near_to_far.extract(3), vec![0, 1, 2]);
        assert_eq!(near_to_far.extract(500).len(), 200);
    }

    #[test]
    fn test_walk_is_exact_at_any_depth() {
        let mut rng = create_rng(Some(17));
        let mut tree = NeighborTree::default();
        let mut keys = Vec::new();
        for i in 0..300 {
            let key = rng.random_range(0.0..1.0e6_f64);
            tree.insert(i, key);
            keys.push(key);
        }
        let mut sorted: Vec<usize> = (0..300).collect();
        sorted.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));

        for k in [1, 5, 40, 300] {
            let got = tree.extract(k);
            let got_keys: Vec<f64> = got.iter().map(|&i| keys[i]).collect();
            let want_keys: Vec<f64> = sorted[..k].iter().map(|&i| keys[i]).collect();
            assert_eq!(got_keys, want_keys);
        }
    }

    #[test]
    fn test_fewer_than_k_returns_all() {
        let owner = Point::new(0, 0.0, 0.0);
        let candidates = line(&[4.0, 2.0]);
        let near = NeighborTree::nearest_points(&Euclidean, &owner, &candidates, 5);
        assert_eq!(near.len(), 2);
    }

    #[test]
    fn test_empty_and_zero_k() {
        let tree = NeighborTree::default();
        assert!(tree.extract(3).is_empty());
        let mut tree = NeighborTree::default();
        tree.insert(0, 1.0);
        assert!(tree.extract(0).is_empty());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_nearest_on_instance() {
        let inst = Instance::new(line(&[0.0, 10.0, 1.0, 30.0, 2.0]));
        let near = NeighborTree::nearest(&inst, 0, 1..5, 2);
        assert_eq!(near.len(), 2);
        assert!(!near.contains(&0));
    }
}
