//! Permutation-preserving genetic operators.
//!
//! These operate on `&[usize]` permutations of `0..n` and always return
//! valid permutations when given valid permutations.
//!
//! # Crossover
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985). Swaps a segment
//!   between the parents and repairs the rest through explicit value
//!   mappings ([`PmxMapping`]).
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct random positions, O(1)
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Value mapping induced by a PMX segment swap.
///
/// Each entry maps a value that entered a child's segment to the value it
/// displaced there. Repair follows the mapping from a parent's value until
/// it reaches a value outside the mapping's domain, i.e. one not already
/// present in the child's segment.
#[derive(Debug, Clone)]
pub struct PmxMapping {
    image: Vec<Option<usize>>,
    pairs: usize,
}

impl PmxMapping {
    /// Builds the mapping `incoming[k] -> displaced[k]` for a segment.
    ///
    /// Identity pairs are skipped since they displace nothing.
    pub fn new(incoming: &[usize], displaced: &[usize], n: usize) -> Self {
        let mut image = vec![None; n];
        let mut pairs = 0;
        for (&from, &to) in incoming.iter().zip(displaced) {
            if from != to {
                image[from] = Some(to);
                pairs += 1;
            }
        }
        Self { image, pairs }
    }

    /// Follows the mapping from `value` until it leaves the domain.
    ///
    /// The chain is cut after as many hops as there are pairs, which only
    /// happens for parents that are not permutations.
    pub fn resolve(&self, value: usize) -> usize {
        let mut current = value;
        for _ in 0..=self.pairs {
            match self.image[current] {
                Some(next) => current = next,
                None => return current,
            }
        }
        current
    }
}

/// Partially Mapped Crossover (PMX) with random cut points.
///
/// Draws two cut points uniformly, orders them, and delegates to
/// [`pmx_crossover_at`].
///
/// # Panics
/// Panics if parents have different lengths or are empty.
pub fn pmx_crossover<R: Rng + ?Sized>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert!(n > 0, "parents must not be empty");
    let (start, end) = random_segment(n, rng);
    pmx_crossover_at(parent1, parent2, start, end)
}

/// Partially Mapped Crossover (PMX) on the segment `[start, end]`.
///
/// # Algorithm
///
/// 1. child1 takes parent2's segment, child2 takes parent1's
/// 2. Build the mappings child1: `parent2[k] -> parent1[k]` and
///    child2: `parent1[k] -> parent2[k]` over the segment
/// 3. Every position outside the segment takes the parent's own value,
///    resolved through the child's mapping
///
/// # Complexity
/// O(n) time, O(n) space
///
/// # Panics
/// Panics if parents have different lengths, are empty, or if
/// `start > end` or `end >= n`.
pub fn pmx_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    start: usize,
    end: usize,
) -> (Vec<usize>, Vec<usize>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(n > 0, "parents must not be empty");
    assert!(start <= end && end < n, "invalid segment [{start}, {end}] for length {n}");

    let segment = start..=end;
    let to_parent1 = PmxMapping::new(&parent2[segment.clone()], &parent1[segment.clone()], n);
    let to_parent2 = PmxMapping::new(&parent1[segment.clone()], &parent2[segment.clone()], n);

    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    for i in 0..n {
        if segment.contains(&i) {
            child1.push(parent2[i]);
            child2.push(parent1[i]);
        } else {
            child1.push(to_parent1.resolve(parent1[i]));
            child2.push(to_parent2.resolve(parent2[i]));
        }
    }

    (child1, child2)
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Swap mutation: exchange two distinct random positions.
///
/// No-op for permutations shorter than two.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng + ?Sized>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    perm.swap(i, j);
}

// ============================================================================
// Helpers
// ============================================================================

/// Pick a random segment `[start, end]` within `0..n` where `start <= end`.
fn random_segment<R: Rng + ?Sized>(n: usize, rng: &mut R) -> (usize, usize) {
    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tour::is_permutation;
    use proptest::prelude::*;

    // ---- PMX Crossover ----

    #[test]
    fn test_pmx_known_offspring() {
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7, 8];
        let p2 = vec![8, 2, 6, 7, 1, 5, 4, 0, 3];
        let (c1, c2) = pmx_crossover_at(&p1, &p2, 3, 6);
        assert_eq!(c1, vec![0, 6, 2, 7, 1, 5, 4, 3, 8]);
        assert_eq!(c2, vec![8, 2, 1, 3, 4, 5, 6, 0, 7]);
    }

    #[test]
    fn test_pmx_produces_valid_permutations() {
        let mut rng = create_rng(42);
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];

        for _ in 0..100 {
            let (c1, c2) = pmx_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&c1, 8), "PMX child1 not valid: {c1:?}");
            assert!(is_permutation(&c2, 8), "PMX child2 not valid: {c2:?}");
        }
    }

    #[test]
    fn test_pmx_full_segment_swaps_parents() {
        let p1 = vec![0, 1, 2, 3, 4];
        let p2 = vec![4, 3, 2, 1, 0];
        let (c1, c2) = pmx_crossover_at(&p1, &p2, 0, 4);
        assert_eq!(c1, p2);
        assert_eq!(c2, p1);
    }

    #[test]
    fn test_pmx_single_element() {
        let mut rng = create_rng(42);
        let (c1, c2) = pmx_crossover(&[0], &[0], &mut rng);
        assert_eq!(c1, vec![0]);
        assert_eq!(c2, vec![0]);
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = create_rng(42);
        let p = vec![0, 1, 2, 3, 4];
        let (c1, c2) = pmx_crossover(&p, &p, &mut rng);
        assert_eq!(c1, p);
        assert_eq!(c2, p);
    }

    #[test]
    #[should_panic(expected = "parents must have equal length")]
    fn test_pmx_length_mismatch_panics() {
        pmx_crossover_at(&[0, 1, 2], &[0, 1], 0, 1);
    }

    #[test]
    fn test_mapping_chain_is_bounded() {
        // Not a permutation: 0 -> 1 -> 0 forms a cycle
        let mapping = PmxMapping::new(&[0, 1], &[1, 0], 2);
        let resolved = mapping.resolve(0);
        assert!(resolved < 2);
    }

    // ---- Swap Mutation ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = create_rng(42);
        for _ in 0..100 {
            let original: Vec<usize> = (0..10).collect();
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            assert!(is_permutation(&perm, 10));
            let changed = perm.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(changed, 2);
        }
    }

    #[test]
    fn test_swap_two_elements_always_swaps() {
        let mut rng = create_rng(7);
        for _ in 0..20 {
            let mut perm = vec![0, 1];
            swap_mutation(&mut perm, &mut rng);
            assert_eq!(perm, vec![1, 0]);
        }
    }

    #[test]
    fn test_swap_single_element() {
        let mut rng = create_rng(42);
        let mut perm = vec![0];
        swap_mutation(&mut perm, &mut rng);
        assert_eq!(perm, vec![0]);
    }

    // ---- Random segment helper ----

    #[test]
    fn test_random_segment_bounds() {
        let mut rng = create_rng(42);
        for _ in 0..1000 {
            let (start, end) = random_segment(10, &mut rng);
            assert!(start <= end);
            assert!(end < 10);
        }
    }

    // ---- Properties ----

    fn permutation_pair() -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
        (1usize..40).prop_flat_map(|n| {
            let base: Vec<usize> = (0..n).collect();
            (
                Just(base.clone()).prop_shuffle(),
                Just(base).prop_shuffle(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_pmx_offspring_are_permutations(
            (p1, p2) in permutation_pair(),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let n = p1.len();
            let (x, y) = (a.index(n), b.index(n));
            let (start, end) = if x <= y { (x, y) } else { (y, x) };
            let (c1, c2) = pmx_crossover_at(&p1, &p2, start, end);

            prop_assert!(is_permutation(&c1, n));
            prop_assert!(is_permutation(&c2, n));
            prop_assert_eq!(&c1[start..=end], &p2[start..=end]);
            prop_assert_eq!(&c2[start..=end], &p1[start..=end]);
        }

        #[test]
        fn prop_swap_preserves_permutation(
            (perm, _) in permutation_pair().prop_filter("need two cities", |(p, _)| p.len() >= 2),
            seed in any::<u64>(),
        ) {
            let mut rng = create_rng(seed);
            let mut mutated = perm.clone();
            swap_mutation(&mut mutated, &mut rng);
            prop_assert!(is_permutation(&mutated, perm.len()));
        }
    }
}
