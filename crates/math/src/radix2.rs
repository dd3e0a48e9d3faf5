// Copyright 2024-2025 Irreducible Inc.

//! In-place iterative Cooley-Tukey transforms over power-of-two multiplicative subgroups.

use rayon::prelude::*;
use zkfri_field::Field;

/// Below this length the butterflies of a layer run on the calling thread.
const PAR_THRESHOLD: usize = 1 << 10;

/// Reorders `values` so that the element at index `i` moves to the bit-reversal of `i`.
///
/// ## Preconditions
///
/// * `values.len()` is a power of two
pub fn bit_reverse_permutation<T>(values: &mut [T]) {
	let n = values.len();
	if n <= 2 {
		return;
	}
	debug_assert!(n.is_power_of_two());

	let shift = usize::BITS - n.trailing_zeros();
	for i in 0..n {
		let j = i.reverse_bits() >> shift;
		if i < j {
			values.swap(i, j);
		}
	}
}

/// Replaces the coefficients `a_0, ..., a_{n-1}` with the evaluations
/// `sum_j a_j * root^(j k)` for `k = 0, ..., n-1`.
///
/// ## Preconditions
///
/// * `values.len()` is a power of two
/// * `root` has multiplicative order exactly `values.len()`
pub fn fft_in_place<F: Field>(values: &mut [F], root: F) {
	let n = values.len();
	if n <= 1 {
		return;
	}

	bit_reverse_permutation(values);

	let mut half = 1;
	while half < n {
		let len = half << 1;
		let layer_root = root.pow((n / len) as u64);
		let twiddles = std::iter::successors(Some(F::ONE), |&w| Some(w * layer_root))
			.take(half)
			.collect::<Vec<_>>();

		let butterflies = |chunk: &mut [F]| {
			let (lo, hi) = chunk.split_at_mut(half);
			for ((a, b), &w) in lo.iter_mut().zip(hi.iter_mut()).zip(&twiddles) {
				let t = *b * w;
				*b = *a - t;
				*a += t;
			}
		};

		if n >= PAR_THRESHOLD {
			values.par_chunks_mut(len).for_each(butterflies);
		} else {
			values.chunks_mut(len).for_each(butterflies);
		}

		half = len;
	}
}
