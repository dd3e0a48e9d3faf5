// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	hash::Hash,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::RngCore;
use zkfri_utils::{DeserializeBytes, SerializeBytes};

use crate::Error;

/// This trait is based on `ff::Field` with some unused functionality removed.
pub trait Field:
	Sized
	+ Eq
	+ Copy
	+ Clone
	+ Default
	+ Send
	+ Sync
	+ Debug
	+ Display
	+ Hash
	+ 'static
	+ Neg<Output = Self>
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Sum
	+ Product
	+ for<'a> Sum<&'a Self>
	+ for<'a> Product<&'a Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ SerializeBytes
	+ DeserializeBytes
{
	/// The zero element of the field, the additive identity.
	const ZERO: Self;

	/// The one element of the field, the multiplicative identity.
	const ONE: Self;

	/// Returns an element chosen uniformly at random using a user-provided RNG.
	fn random(rng: impl RngCore) -> Self;

	/// Returns true iff this element is zero.
	fn is_zero(&self) -> bool {
		*self == Self::ZERO
	}

	/// Doubles this element.
	#[must_use]
	fn double(&self) -> Self {
		*self + *self
	}

	/// Squares this element.
	#[must_use]
	fn square(&self) -> Self {
		*self * *self
	}

	/// Computes the multiplicative inverse of this element,
	/// failing if the element is zero.
	fn invert(&self) -> Option<Self>;

	/// Exponentiates `self` by `exp` with square-and-multiply.
	///
	/// This is variable time with respect to the exponent.
	fn pow(&self, exp: u64) -> Self {
		let mut res = Self::ONE;
		for i in (0..u64::BITS - exp.leading_zeros()).rev() {
			res = res.square();
			if (exp >> i) & 1 == 1 {
				res *= *self;
			}
		}
		res
	}
}

/// A prime field whose modulus fits in a `u64`.
pub trait PrimeField: Field + From<u64> {
	/// The field modulus `p`.
	const MODULUS: u64;

	/// Number of bytes in the canonical little-endian encoding of an element.
	const N_BYTES: usize;

	/// Reduces a 128-bit integer modulo `p`.
	fn from_u128(value: u128) -> Self;

	/// Constructs an element from its canonical representative, failing when `value >= p`.
	fn from_canonical_u64(value: u64) -> Result<Self, Error>;

	/// The canonical representative in `0..p`.
	fn as_canonical_u64(&self) -> u64;
}

/// A prime field whose multiplicative group has a large power-of-two subgroup.
pub trait TwoAdicField: PrimeField {
	/// The largest `k` such that `2^k` divides `p - 1`.
	const TWO_ADICITY: usize;

	/// A generator of the full multiplicative group.
	fn multiplicative_generator() -> Self;

	/// A primitive `2^TWO_ADICITY`-th root of unity.
	fn two_adic_generator() -> Self {
		Self::multiplicative_generator().pow((Self::MODULUS - 1) >> Self::TWO_ADICITY)
	}
}
