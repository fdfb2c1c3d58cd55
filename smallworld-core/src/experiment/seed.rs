//! Per-realization seed derivation.
//!
//! Every realization owns an RNG seeded from the experiment seed, its sweep
//! index and its trial index, so results do not depend on which worker runs
//! it or in what order.

/// SplitMix64 increment (the 64-bit golden ratio).
const SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}

#[inline]
fn mix(base: u64, index: usize) -> u64 {
    splitmix64(base ^ ((index as u64).wrapping_add(1)).wrapping_mul(SEED_SPACING))
}

pub(super) fn realization_seed(base: u64, sweep_index: usize, trial: usize) -> u64 {
    mix(mix(base, sweep_index), trial)
}
