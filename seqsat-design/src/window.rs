//! Window shifting.
//!
//! Derivation combinations are first found as data indices (positions inside
//! one trial). For a multi-trial window, element `i` of a combination is read
//! `i` trials after the window start, so it is moved by `i * trial_size`.
//! Strides do not change the shift; they only restrict where windows start.

use crate::factor::WindowKind;
use smallvec::SmallVec;

/// One data index per argument factor.
pub type Combination = SmallVec<[usize; 4]>;

/// Position each combination across the trials its window spans.
#[must_use]
pub fn shift_window(
    mut combinations: Vec<Combination>,
    window: WindowKind,
    trial_size: usize,
) -> Vec<Combination> {
    if window.width() == 1 {
        return combinations;
    }

    for combination in &mut combinations {
        for (offset, index) in combination.iter_mut().enumerate() {
            *index += offset * trial_size;
        }
    }
    combinations
}

/// Cartesian product in nested-loop order: the first domain varies slowest.
pub(crate) fn cartesian_product(domains: &[Vec<usize>]) -> Vec<Combination> {
    if domains.iter().any(Vec::is_empty) {
        return Vec::new();
    }

    let mut product: Vec<Combination> = Vec::new();
    let mut cursor = vec![0usize; domains.len()];
    loop {
        product.push(
            cursor
                .iter()
                .zip(domains)
                .map(|(&position, domain)| domain[position])
                .collect(),
        );

        // odometer increment, last position fastest
        let mut slot = domains.len();
        loop {
            if slot == 0 {
                return product;
            }
            slot -= 1;
            cursor[slot] += 1;
            if cursor[slot] < domains[slot].len() {
                break;
            }
            cursor[slot] = 0;
        }
    }
}
