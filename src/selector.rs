//! Randomized candidate selection
//!
//! Picks one function and one pair of parameter indices whose declared types
//! differ. Every random draw goes through the injected [`Rng`], so tests can
//! seed the search while production runs stay non-deterministic.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::FunctionCandidate;

/// A resolved mutation target
///
/// `function` indexes the candidate list; `first` and `second` index its
/// parameter list, are distinct, and name parameters of differing declared
/// types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidatePair {
    pub function: usize,
    pub first: usize,
    pub second: usize,
}

/// Find one valid swap target, or `None` when the file offers no valid swap
///
/// Candidates are visited in a uniformly random order so repeated runs over
/// many files do not systematically prefer early-declared functions. Within
/// a function the first index is drawn uniformly; the second is drawn
/// uniformly from the indices whose declared type differs from the first.
/// The search stops at the first function that yields a pair.
pub fn select_candidate<R: Rng>(
    candidates: &[FunctionCandidate],
    rng: &mut R,
) -> Option<CandidatePair> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.shuffle(rng);

    for index in order {
        let function = &candidates[index];
        if function.params.len() < 2 {
            continue;
        }

        let first = rng.gen_range(0..function.params.len());
        let options: Vec<usize> = (0..function.params.len())
            .filter(|&j| function.params[j].ty != function.params[first].ty)
            .collect();

        // No type-differing partner: the swap would be a no-op for callers.
        let Some(&second) = options.choose(rng) else {
            continue;
        };

        return Some(CandidatePair {
            function: index,
            first,
            second,
        });
    }

    None
}
