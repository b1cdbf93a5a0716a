//! Limb width selection for a batch of range checks.
//!
//! The cost model counts one constraint per table row, one per decomposed
//! limb, one recomposition equality per checked value and a constant
//! overhead. The external prover assumes exactly this selection policy, so the
//! formula must not be refined.

/// Smallest limb width considered.
pub const MIN_LIMB_WIDTH: usize = 2;
/// Largest limb width considered.
pub const MAX_LIMB_WIDTH: usize = 17;

/// Number of `limb_width`-bit limbs needed to hold `bits` bits.
pub fn decomposition_size(bits: usize, limb_width: usize) -> usize {
    (bits + limb_width - 1) / limb_width
}

/// Estimated number of constraints spent on range checking `bit_widths` with
/// limbs of `limb_width` bits.
pub fn constraint_cost(limb_width: usize, bit_widths: &[usize]) -> usize {
    let nb_decomposed: usize = bit_widths
        .iter()
        .map(|bits| decomposition_size(*bits, limb_width))
        .sum();
    let table = 1 << limb_width;
    let equalities = bit_widths.len();

    table + nb_decomposed + equalities + 1
}

/// Returns the limb width in `[MIN_LIMB_WIDTH, MAX_LIMB_WIDTH]` with the lowest
/// [`constraint_cost`]. Ties go to the smaller width.
pub fn optimal_limb_width(bit_widths: &[usize]) -> usize {
    let mut best = MIN_LIMB_WIDTH;
    let mut best_cost = usize::MAX;
    for width in MIN_LIMB_WIDTH..=MAX_LIMB_WIDTH {
        let cost = constraint_cost(width, bit_widths);
        if cost < best_cost {
            best_cost = cost;
            best = width;
        }
    }

    best
}
