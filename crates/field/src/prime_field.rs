// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{self, Debug, Display, Formatter},
	hash::{Hash, Hasher},
	iter::{Product, Sum},
	marker::PhantomData,
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use rand::RngCore;
use zkfri_utils::{
	serialization::Error as SerializationError, DeserializeBytes, SerializeBytes,
};

use crate::{Error, Field, PrimeField, TwoAdicField};

/// The constants describing a prime field `GF(p)` with `p < 2^64`.
pub trait FpParams: 'static {
	/// Name used in the `Debug` representation of elements.
	const NAME: &'static str;
	/// The prime modulus.
	const MODULUS: u64;
	/// A generator of the multiplicative group.
	const GENERATOR: u64;
	/// The 2-adic valuation of `MODULUS - 1`.
	const TWO_ADICITY: usize;
}

/// An element of the prime field described by `P`, stored as its canonical representative.
#[repr(transparent)]
pub struct Fp<P: FpParams> {
	value: u64,
	_marker: PhantomData<fn() -> P>,
}

const fn n_bytes(modulus: u64) -> usize {
	((u64::BITS - (modulus - 1).leading_zeros() + 7) / 8) as usize
}

impl<P: FpParams> Fp<P> {
	const fn new_unchecked(value: u64) -> Self {
		Self {
			value,
			_marker: PhantomData,
		}
	}

	/// Constructs an element by reducing `value` modulo `p`.
	pub const fn new(value: u64) -> Self {
		Self::new_unchecked(value % P::MODULUS)
	}
}

impl<P: FpParams> Clone for Fp<P> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<P: FpParams> Copy for Fp<P> {}

impl<P: FpParams> PartialEq for Fp<P> {
	fn eq(&self, other: &Self) -> bool {
		self.value == other.value
	}
}

impl<P: FpParams> Eq for Fp<P> {}

impl<P: FpParams> Hash for Fp<P> {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.value.hash(state)
	}
}

impl<P: FpParams> Default for Fp<P> {
	fn default() -> Self {
		Self::ZERO
	}
}

impl<P: FpParams> Debug for Fp<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}({:#x})", P::NAME, self.value)
	}
}

impl<P: FpParams> Display for Fp<P> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.value)
	}
}

impl<P: FpParams> From<u64> for Fp<P> {
	fn from(value: u64) -> Self {
		Self::new(value)
	}
}

impl<P: FpParams> Add for Fp<P> {
	type Output = Self;

	#[inline]
	fn add(self, rhs: Self) -> Self {
		let (sum, overflow) = self.value.overflowing_add(rhs.value);
		if overflow || sum >= P::MODULUS {
			Self::new_unchecked(sum.wrapping_sub(P::MODULUS))
		} else {
			Self::new_unchecked(sum)
		}
	}
}

impl<P: FpParams> Sub for Fp<P> {
	type Output = Self;

	#[inline]
	fn sub(self, rhs: Self) -> Self {
		if self.value >= rhs.value {
			Self::new_unchecked(self.value - rhs.value)
		} else {
			Self::new_unchecked(
				self.value
					.wrapping_sub(rhs.value)
					.wrapping_add(P::MODULUS),
			)
		}
	}
}

impl<P: FpParams> Mul for Fp<P> {
	type Output = Self;

	#[inline]
	fn mul(self, rhs: Self) -> Self {
		let product = self.value as u128 * rhs.value as u128;
		Self::new_unchecked((product % P::MODULUS as u128) as u64)
	}
}

impl<P: FpParams> Neg for Fp<P> {
	type Output = Self;

	#[inline]
	fn neg(self) -> Self {
		if self.value == 0 {
			self
		} else {
			Self::new_unchecked(P::MODULUS - self.value)
		}
	}
}

impl<P: FpParams> AddAssign for Fp<P> {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl<P: FpParams> SubAssign for Fp<P> {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl<P: FpParams> MulAssign for Fp<P> {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl<P: FpParams> Sum for Fp<P> {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + x)
	}
}

impl<'a, P: FpParams> Sum<&'a Self> for Fp<P> {
	fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, |acc, x| acc + *x)
	}
}

impl<P: FpParams> Product for Fp<P> {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * x)
	}
}

impl<'a, P: FpParams> Product<&'a Self> for Fp<P> {
	fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, |acc, x| acc * *x)
	}
}

impl<P: FpParams> SerializeBytes for Fp<P> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), SerializationError> {
		let n_bytes = <Self as PrimeField>::N_BYTES;
		if write_buf.remaining_mut() < n_bytes {
			return Err(SerializationError::WriteBufferFull);
		}
		write_buf.put_slice(&self.value.to_le_bytes()[..n_bytes]);
		Ok(())
	}
}

impl<P: FpParams> DeserializeBytes for Fp<P> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, SerializationError> {
		let n_bytes = <Self as PrimeField>::N_BYTES;
		if read_buf.remaining() < n_bytes {
			return Err(SerializationError::NotEnoughBytes);
		}
		let mut bytes = [0u8; 8];
		read_buf.copy_to_slice(&mut bytes[..n_bytes]);
		Self::from_canonical_u64(u64::from_le_bytes(bytes))
			.map_err(|_| SerializationError::NonCanonicalEncoding)
	}
}

impl<P: FpParams> Field for Fp<P> {
	const ZERO: Self = Self::new_unchecked(0);
	const ONE: Self = Self::new_unchecked(1);

	fn random(mut rng: impl RngCore) -> Self {
		let hi = rng.next_u64() as u128;
		let lo = rng.next_u64() as u128;
		Self::from_u128((hi << 64) | lo)
	}

	fn invert(&self) -> Option<Self> {
		if self.is_zero() {
			None
		} else {
			// Fermat's little theorem
			Some(self.pow(P::MODULUS - 2))
		}
	}
}

impl<P: FpParams> PrimeField for Fp<P> {
	const MODULUS: u64 = P::MODULUS;
	const N_BYTES: usize = n_bytes(P::MODULUS);

	fn from_u128(value: u128) -> Self {
		Self::new_unchecked((value % P::MODULUS as u128) as u64)
	}

	fn from_canonical_u64(value: u64) -> Result<Self, Error> {
		if value >= P::MODULUS {
			return Err(Error::NotInField { value });
		}
		Ok(Self::new_unchecked(value))
	}

	fn as_canonical_u64(&self) -> u64 {
		self.value
	}
}

impl<P: FpParams> TwoAdicField for Fp<P> {
	const TWO_ADICITY: usize = P::TWO_ADICITY;

	fn multiplicative_generator() -> Self {
		Self::new(P::GENERATOR)
	}
}

/// Parameters of the Goldilocks field, `p = 2^64 - 2^32 + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GoldilocksParams;

impl FpParams for GoldilocksParams {
	const NAME: &'static str = "Goldilocks";
	const MODULUS: u64 = 0xFFFF_FFFF_0000_0001;
	const GENERATOR: u64 = 7;
	const TWO_ADICITY: usize = 32;
}

/// Parameters of the BabyBear field, `p = 15 * 2^27 + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BabyBearParams;

impl FpParams for BabyBearParams {
	const NAME: &'static str = "BabyBear";
	const MODULUS: u64 = 0x7800_0001;
	const GENERATOR: u64 = 31;
	const TWO_ADICITY: usize = 27;
}

/// Parameters of the 97-element field. Small enough to reason about by hand in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Fp97Params;

impl FpParams for Fp97Params {
	const NAME: &'static str = "Fp97";
	const MODULUS: u64 = 97;
	const GENERATOR: u64 = 5;
	const TWO_ADICITY: usize = 5;
}

pub type Goldilocks = Fp<GoldilocksParams>;
pub type BabyBear = Fp<BabyBearParams>;
pub type Fp97 = Fp<Fp97Params>;
