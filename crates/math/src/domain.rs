// Copyright 2024-2025 Irreducible Inc.

use auto_impl::auto_impl;
use zkfri_field::{Field, PrimeField, TwoAdicField};
use zkfri_utils::bail;

use crate::{radix2::fft_in_place, Error};

/// A multiplicative subgroup of size `2^log_size`, generated by a primitive root of unity.
///
/// Elements are indexed by their exponent, so `element(i) = generator^i`. With this ordering
/// `element(i + size/2) = -element(i)`, which is what the FRI fold relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationDomain<F: Field> {
	log_size: usize,
	generator: F,
	generator_inv: F,
	size_inv: F,
}

/// Hands out evaluation domains of a requested size.
#[auto_impl(&)]
pub trait EvaluationDomainFactory<F: Field>: Clone {
	/// Instantiates the subgroup of size `2^log_size`.
	fn create(&self, log_size: usize) -> Result<EvaluationDomain<F>, Error>;
}

/// Produces subgroups of the cyclic group generated by an explicit root of unity.
///
/// The domain of size `2^k` is generated by `root^(2^(log_order - k))`, so the generator of
/// each domain is the square of the generator of the domain twice its size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoAdicDomainFactory<F: Field> {
	root: F,
	log_order: usize,
}

fn has_exact_order<F: Field>(root: F, log_order: usize) -> bool {
	let mut x = root;
	for _ in 0..log_order {
		if x == F::ONE {
			return false;
		}
		x = x.square();
	}
	x == F::ONE
}

impl<F: PrimeField> TwoAdicDomainFactory<F> {
	/// Constructs a factory from a primitive `2^log_order`-th root of unity.
	pub fn new(root: F, log_order: usize) -> Result<Self, Error> {
		if !has_exact_order(root, log_order) {
			bail!(Error::InvalidRootOfUnity { log_order });
		}
		Ok(Self { root, log_order })
	}

	/// Binary logarithm of the largest domain this factory can create.
	pub fn log_order(&self) -> usize {
		self.log_order
	}
}

impl<F: TwoAdicField> Default for TwoAdicDomainFactory<F> {
	fn default() -> Self {
		Self {
			root: F::two_adic_generator(),
			log_order: F::TWO_ADICITY,
		}
	}
}

impl<F: PrimeField> EvaluationDomainFactory<F> for TwoAdicDomainFactory<F> {
	fn create(&self, log_size: usize) -> Result<EvaluationDomain<F>, Error> {
		if log_size > self.log_order {
			bail!(Error::DomainSizeTooLarge);
		}
		let generator = (log_size..self.log_order).fold(self.root, |g, _| g.square());
		EvaluationDomain::new(log_size, generator)
	}
}

impl<F: PrimeField> EvaluationDomain<F> {
	/// Constructs the domain generated by `generator`, which must have order exactly
	/// `2^log_size`.
	pub fn new(log_size: usize, generator: F) -> Result<Self, Error> {
		if log_size >= usize::BITS as usize || !has_exact_order(generator, log_size) {
			bail!(Error::InvalidRootOfUnity {
				log_order: log_size
			});
		}
		let generator_inv = generator
			.invert()
			.ok_or(Error::InvalidRootOfUnity {
				log_order: log_size,
			})?;
		let size_inv = F::from(1u64 << log_size)
			.invert()
			.ok_or(Error::DomainSizeTooLarge)?;
		Ok(Self {
			log_size,
			generator,
			generator_inv,
			size_inv,
		})
	}

	pub fn size(&self) -> usize {
		1 << self.log_size
	}

	pub fn log_size(&self) -> usize {
		self.log_size
	}

	pub fn generator(&self) -> F {
		self.generator
	}

	pub fn generator_inv(&self) -> F {
		self.generator_inv
	}

	/// Returns `generator^index`, with `index` taken modulo the domain size.
	pub fn element(&self, index: usize) -> F {
		self.generator.pow((index % self.size()) as u64)
	}

	/// All domain elements, in index order.
	pub fn elements(&self) -> Vec<F> {
		std::iter::successors(Some(F::ONE), |&x| Some(x * self.generator))
			.take(self.size())
			.collect()
	}

	/// The inverses of all domain elements, in index order.
	pub fn elements_inv(&self) -> Vec<F> {
		std::iter::successors(Some(F::ONE), |&x| Some(x * self.generator_inv))
			.take(self.size())
			.collect()
	}

	/// Transforms coefficients into evaluations over the domain, in place.
	pub fn fft(&self, values: &mut [F]) -> Result<(), Error> {
		self.check_len(values)?;
		fft_in_place(values, self.generator);
		Ok(())
	}

	/// Transforms evaluations over the domain back into coefficients, in place.
	pub fn inverse_fft(&self, values: &mut [F]) -> Result<(), Error> {
		self.check_len(values)?;
		fft_in_place(values, self.generator_inv);
		for value in values.iter_mut() {
			*value *= self.size_inv;
		}
		Ok(())
	}

	/// Evaluates the polynomial with coefficients `coeffs` on every domain element.
	///
	/// `coeffs` may be shorter than the domain, in which case it is zero-padded.
	pub fn evaluate_coefficients(&self, coeffs: &[F]) -> Result<Vec<F>, Error> {
		if coeffs.len() > self.size() {
			bail!(Error::IncorrectArgumentLength {
				arg: "coeffs".to_string(),
				expected: self.size(),
			});
		}
		let mut values = coeffs.to_vec();
		values.resize(self.size(), F::ZERO);
		self.fft(&mut values)?;
		Ok(values)
	}

	fn check_len(&self, values: &[F]) -> Result<(), Error> {
		if values.len() != self.size() {
			bail!(Error::IncorrectArgumentLength {
				arg: "values".to_string(),
				expected: self.size(),
			});
		}
		Ok(())
	}
}
