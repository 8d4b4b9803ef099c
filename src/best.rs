//! Global-best tracking.
//!
//! Each runner owns exactly one [`GlobalBest`] and changes it only
//! through [`GlobalBest::replace_if_fitter`], so the reported quality can
//! never regress under the runner's comparator.

/// Best solution observed so far in a run.
///
/// Generic over the encoding: closed tours (`Vec<usize>`) for the TSP
/// solvers, real vectors (`Vec<f64>`) for the continuous ones.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalBest<E> {
    encoding: E,
    quality: f64,
}

impl<E> GlobalBest<E> {
    pub fn new(encoding: E, quality: f64) -> Self {
        Self { encoding, quality }
    }

    pub fn encoding(&self) -> &E {
        &self.encoding
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Replaces the incumbent if `quality` is strictly fitter.
    ///
    /// `is_fitter(a, b)` must return `true` when `a` is strictly better
    /// than `b`. The candidate is only copied on acceptance.
    /// Returns `true` if the incumbent was replaced.
    pub fn replace_if_fitter<C, F>(&mut self, candidate: &C, quality: f64, is_fitter: F) -> bool
    where
        C: ToOwned<Owned = E> + ?Sized,
        F: Fn(f64, f64) -> bool,
    {
        if is_fitter(quality, self.quality) {
            self.encoding = candidate.to_owned();
            self.quality = quality;
            true
        } else {
            false
        }
    }

    pub fn into_parts(self) -> (E, f64) {
        (self.encoding, self.quality)
    }
}
