// Copyright 2024 Irreducible Inc.

/// Base-2 logarithm of `val`, or `None` when `val` is not a power of two.
pub const fn checked_log_2(val: usize) -> Option<usize> {
	if val.is_power_of_two() {
		Some(val.trailing_zeros() as usize)
	} else {
		None
	}
}

/// Smallest `k` such that `2^k >= val`. Returns 0 for `val <= 1`.
pub const fn log2_ceil(val: usize) -> usize {
	if val <= 1 {
		0
	} else {
		(usize::BITS - (val - 1).leading_zeros()) as usize
	}
}
