//! Permutation generation by prefix rotation.

#[derive(Debug, Clone, Copy)]
struct Frame {
    len: usize,
    done: usize,
}

/// Lazy generator of permutations by repeated prefix rotation.
///
/// Produces the same sequence as the recursion
///
/// ```text
/// rec(m) = for _ in 0..m { rotate prefix[0..m] right by one; emit; rec(m - 1) }
/// ```
///
/// but keeps its frames on an explicit stack, so depth is bounded by the
/// heap and not the call stack. Each frame remembers its prefix length and
/// how many rotations it has done.
///
/// Permutations of the prefix repeat (every permutation of `m` elements is
/// emitted at least once), which is harmless for a minimum search. After
/// the last emission the working permutation is back in its initial order
/// and the enumerator stays exhausted.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use u_tsp::exact::RotationEnumerator;
///
/// let mut e = RotationEnumerator::new(vec![0, 1, 2]);
/// let mut seen = HashSet::new();
/// while let Some(p) = e.next_permutation() {
///     seen.insert(p.to_vec());
/// }
/// assert_eq!(seen.len(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct RotationEnumerator {
    perm: Vec<usize>,
    stack: Vec<Frame>,
    emitted: u64,
}

impl RotationEnumerator {
    /// Enumerates permutations of the whole sequence.
    pub fn new(perm: Vec<usize>) -> Self {
        let m = perm.len();
        Self::with_prefix(perm, m)
    }

    /// Enumerates permutations of all but the last element, which stays in
    /// place. For a closed tour this still reaches every distinct cycle.
    pub fn with_fixed_last(perm: Vec<usize>) -> Self {
        let m = perm.len().saturating_sub(1);
        Self::with_prefix(perm, m)
    }

    fn with_prefix(perm: Vec<usize>, m: usize) -> Self {
        let stack = if m > 0 {
            vec![Frame { len: m, done: 0 }]
        } else {
            Vec::new()
        };
        Self {
            perm,
            stack,
            emitted: 0,
        }
    }

    /// Advances to the next permutation, or `None` when exhausted.
    pub fn next_permutation(&mut self) -> Option<&[usize]> {
        loop {
            let frame = self.stack.last_mut()?;
            if frame.done == frame.len {
                self.stack.pop();
                continue;
            }
            frame.done += 1;
            let len = frame.len;
            self.perm[..len].rotate_right(1);
            if len > 1 {
                self.stack.push(Frame {
                    len: len - 1,
                    done: 0,
                });
            }
            self.emitted += 1;
            return Some(&self.perm);
        }
    }

    /// The working permutation.
    pub fn current(&self) -> &[usize] {
        &self.perm
    }

    /// Number of permutations emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Returns `true` once the sequence is exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.stack.is_empty()
    }
}
