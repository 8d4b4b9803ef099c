//! Tour helpers shared by the TSP solvers.
//!
//! Two tour forms appear in this crate:
//!
//! - **closed**: the start city is repeated at the end (`[2, 0, 1, 2]`),
//!   produced by ant construction and reported in results;
//! - **cyclic**: a plain permutation (`[2, 0, 1]`) whose wrap-around edge
//!   is implied, used as the GA encoding.

use rand::Rng;

use crate::problem::Distances;

/// Builds a closed tour greedily from a uniformly random start city.
///
/// See [`nearest_neighbor_from`].
///
/// # Panics
/// Panics if the table has no cities.
pub fn nearest_neighbor<D, R>(distances: &D, rng: &mut R) -> (Vec<usize>, f64)
where
    D: Distances + ?Sized,
    R: Rng + ?Sized,
{
    let start = rng.random_range(0..distances.num_cities());
    nearest_neighbor_from(distances, start)
}

/// Builds a closed tour greedily from `start`.
///
/// At each step the unvisited cities are scanned in ascending index order
/// and the nearest one is appended; on ties the first scanned city wins.
/// Returns the closed tour and its length including the closing edge.
///
/// # Complexity
/// O(n²)
///
/// # Panics
/// Panics if `start` is not a valid city.
pub fn nearest_neighbor_from<D>(distances: &D, start: usize) -> (Vec<usize>, f64)
where
    D: Distances + ?Sized,
{
    let n = distances.num_cities();
    assert!(start < n, "start city {start} out of range for {n} cities");

    let mut unvisited: Vec<usize> = (0..n).filter(|&c| c != start).collect();
    let mut tour = Vec::with_capacity(n + 1);
    tour.push(start);
    let mut length = 0.0;
    let mut current = start;

    while !unvisited.is_empty() {
        let mut pick = 0;
        let mut nearest = distances.distance(current, unvisited[0]);
        for (pos, &city) in unvisited.iter().enumerate().skip(1) {
            let d = distances.distance(current, city);
            if d < nearest {
                pick = pos;
                nearest = d;
            }
        }
        current = unvisited.remove(pick);
        tour.push(current);
        length += nearest;
    }

    length += distances.distance(current, start);
    tour.push(start);
    (tour, length)
}

/// Length of a closed tour (sum of consecutive edges).
pub fn closed_length<D: Distances + ?Sized>(distances: &D, tour: &[usize]) -> f64 {
    tour.windows(2)
        .map(|w| distances.distance(w[0], w[1]))
        .sum()
}

/// Length of a permutation including the wrap-around edge.
pub fn cyclic_length<D: Distances + ?Sized>(distances: &D, perm: &[usize]) -> f64 {
    match (perm.first(), perm.last()) {
        (Some(&first), Some(&last)) => {
            closed_length(distances, perm) + distances.distance(last, first)
        }
        _ => 0.0,
    }
}

/// Closes a permutation by appending its first city.
pub fn close(perm: &[usize]) -> Vec<usize> {
    let mut tour = Vec::with_capacity(perm.len() + 1);
    tour.extend_from_slice(perm);
    if let Some(&first) = perm.first() {
        tour.push(first);
    }
    tour
}

/// Returns `true` if `perm` contains every value of `0..n` exactly once.
pub fn is_permutation(perm: &[usize], n: usize) -> bool {
    if perm.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &v in perm {
        if v >= n || seen[v] {
            return false;
        }
        seen[v] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::DistanceMatrix;
    use crate::random::create_rng;

    fn four_cities() -> DistanceMatrix {
        DistanceMatrix::new(vec![
            vec![0.0, 1.0, 2.0, 3.0],
            vec![1.0, 0.0, 4.0, 5.0],
            vec![2.0, 4.0, 0.0, 6.0],
            vec![3.0, 5.0, 6.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_nearest_neighbor_from_zero() {
        let m = four_cities();
        let (tour, length) = nearest_neighbor_from(&m, 0);
        // 0 -> 1 (1) -> 2 (4) -> 3 (6) -> 0 (3)
        assert_eq!(tour, vec![0, 1, 2, 3, 0]);
        assert!((length - 14.0).abs() < 1e-12);
        assert!((closed_length(&m, &tour) - length).abs() < 1e-12);
    }

    #[test]
    fn test_nearest_neighbor_tie_takes_first_scanned() {
        let m = DistanceMatrix::new(vec![
            vec![0.0, 2.0, 2.0],
            vec![2.0, 0.0, 1.0],
            vec![2.0, 1.0, 0.0],
        ])
        .unwrap();
        let (tour, _) = nearest_neighbor_from(&m, 0);
        assert_eq!(tour, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_nearest_neighbor_random_start_is_valid() {
        let m = four_cities();
        let mut rng = create_rng(42);
        for _ in 0..20 {
            let (tour, length) = nearest_neighbor(&m, &mut rng);
            assert_eq!(tour.len(), 5);
            assert_eq!(tour.first(), tour.last());
            assert!(is_permutation(&tour[..4], 4));
            assert!((closed_length(&m, &tour) - length).abs() < 1e-12);
        }
    }

    #[test]
    fn test_cyclic_length_matches_closed() {
        let m = four_cities();
        let perm = [2, 0, 3, 1];
        assert!((cyclic_length(&m, &perm) - closed_length(&m, &close(&perm))).abs() < 1e-12);
        assert_eq!(cyclic_length(&m, &[]), 0.0);
    }

    #[test]
    fn test_is_permutation() {
        assert!(is_permutation(&[2, 0, 1], 3));
        assert!(!is_permutation(&[0, 0, 1], 3));
        assert!(!is_permutation(&[0, 1, 3], 3));
        assert!(!is_permutation(&[0, 1], 3));
    }
}
