// Copyright 2024-2025 Irreducible Inc.

use std::ops::{Add, Mul, Neg, Sub};

use itertools::{EitherOrBoth, Itertools};
use zkfri_field::Field;
use zkfri_utils::bail;

use crate::Error;

/// A univariate polynomial in monomial form.
///
/// The coefficient vector is kept trimmed: it never ends in a zero, and the zero polynomial has
/// no coefficients at all.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polynomial<F> {
	coeffs: Vec<F>,
}

impl<F: Field> Polynomial<F> {
	/// Constructs the polynomial `sum_i coeffs[i] * X^i`.
	pub fn new(mut coeffs: Vec<F>) -> Self {
		trim_trailing_zeros(&mut coeffs);
		Self { coeffs }
	}

	pub fn zero() -> Self {
		Self { coeffs: Vec::new() }
	}

	pub fn constant(value: F) -> Self {
		Self::new(vec![value])
	}

	/// The coefficients, lowest degree first.
	pub fn coeffs(&self) -> &[F] {
		&self.coeffs
	}

	pub fn into_coeffs(self) -> Vec<F> {
		self.coeffs
	}

	/// The degree of the polynomial. The zero polynomial is reported as degree 0.
	pub fn degree(&self) -> usize {
		self.coeffs.len().saturating_sub(1)
	}

	pub fn is_zero(&self) -> bool {
		self.coeffs.is_empty()
	}

	/// Evaluates the polynomial at `x` with Horner's method.
	pub fn evaluate(&self, x: F) -> F {
		self.coeffs
			.iter()
			.rev()
			.fold(F::ZERO, |acc, &coeff| acc * x + coeff)
	}

	/// Multiplies every coefficient by `scalar`.
	pub fn scale(&self, scalar: F) -> Self {
		Self::new(self.coeffs.iter().map(|&c| c * scalar).collect())
	}

	/// Euclidean division, returning `(quotient, remainder)` with
	/// `self = quotient * divisor + remainder` and `deg(remainder) < deg(divisor)`.
	pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Error> {
		let Some(&leading) = divisor.coeffs.last() else {
			bail!(Error::DivisionByZero);
		};
		if self.coeffs.len() < divisor.coeffs.len() {
			return Ok((Self::zero(), self.clone()));
		}
		let leading_inv = leading.invert().ok_or(Error::DivisionByZero)?;

		let divisor_degree = divisor.coeffs.len() - 1;
		let mut remainder = self.coeffs.clone();
		let mut quotient = vec![F::ZERO; self.coeffs.len() - divisor_degree];
		for i in (0..quotient.len()).rev() {
			let coeff = remainder[i + divisor_degree] * leading_inv;
			quotient[i] = coeff;
			for (r, &d) in remainder[i..].iter_mut().zip(&divisor.coeffs) {
				*r -= coeff * d;
			}
		}
		remainder.truncate(divisor_degree);

		Ok((Self::new(quotient), Self::new(remainder)))
	}

	/// Lagrange interpolation of the unique polynomial of degree `< points.len()` passing
	/// through every `(x, y)` in `points`.
	pub fn interpolate(points: &[(F, F)]) -> Result<Self, Error> {
		let mut result = vec![F::ZERO; points.len()];
		for (i, &(x_i, y_i)) in points.iter().enumerate() {
			let mut basis = vec![F::ONE];
			let mut denominator = F::ONE;
			for (j, &(x_j, _)) in points.iter().enumerate() {
				if i == j {
					continue;
				}
				// basis *= (X - x_j)
				basis.push(F::ZERO);
				for k in (1..basis.len()).rev() {
					basis[k] = basis[k - 1] - basis[k] * x_j;
				}
				basis[0] = -basis[0] * x_j;
				denominator *= x_i - x_j;
			}

			let scale = y_i * denominator.invert().ok_or(Error::DuplicateDomainPoint)?;
			for (r, &b) in result.iter_mut().zip(&basis) {
				*r += b * scale;
			}
		}
		Ok(Self::new(result))
	}
}

fn trim_trailing_zeros<F: Field>(coeffs: &mut Vec<F>) {
	while coeffs.last().is_some_and(|c| c.is_zero()) {
		coeffs.pop();
	}
}

impl<F: Field> Add for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn add(self, rhs: Self) -> Polynomial<F> {
		let coeffs = self
			.coeffs
			.iter()
			.zip_longest(&rhs.coeffs)
			.map(|pair| match pair {
				EitherOrBoth::Both(&a, &b) => a + b,
				EitherOrBoth::Left(&a) => a,
				EitherOrBoth::Right(&b) => b,
			})
			.collect();
		Polynomial::new(coeffs)
	}
}

impl<F: Field> Sub for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn sub(self, rhs: Self) -> Polynomial<F> {
		let coeffs = self
			.coeffs
			.iter()
			.zip_longest(&rhs.coeffs)
			.map(|pair| match pair {
				EitherOrBoth::Both(&a, &b) => a - b,
				EitherOrBoth::Left(&a) => a,
				EitherOrBoth::Right(&b) => -b,
			})
			.collect();
		Polynomial::new(coeffs)
	}
}

impl<F: Field> Mul for &Polynomial<F> {
	type Output = Polynomial<F>;

	fn mul(self, rhs: Self) -> Polynomial<F> {
		if self.is_zero() || rhs.is_zero() {
			return Polynomial::zero();
		}
		let mut coeffs = vec![F::ZERO; self.coeffs.len() + rhs.coeffs.len() - 1];
		for (i, &a) in self.coeffs.iter().enumerate() {
			for (j, &b) in rhs.coeffs.iter().enumerate() {
				coeffs[i + j] += a * b;
			}
		}
		Polynomial::new(coeffs)
	}
}

impl<F: Field> Neg for Polynomial<F> {
	type Output = Self;

	fn neg(self) -> Self {
		Self::new(self.coeffs.into_iter().map(|c| -c).collect())
	}
}

#[cfg(test)]
mod tests {
	use assert_matches::assert_matches;
	use proptest::prelude::*;
	use rand::{rngs::StdRng, SeedableRng};
	use zkfri_field::{BabyBear, Fp97};

	use super::*;

	fn fp97_poly(coeffs: &[u64]) -> Polynomial<Fp97> {
		Polynomial::new(coeffs.iter().copied().map(Fp97::from).collect())
	}

	fn random_poly(rng: &mut StdRng, len: usize) -> Polynomial<BabyBear> {
		Polynomial::new((0..len).map(|_| BabyBear::random(&mut *rng)).collect())
	}

	#[test]
	fn test_trimming_and_degree() {
		let p = fp97_poly(&[1, 2, 0, 0]);
		assert_eq!(p.coeffs().len(), 2);
		assert_eq!(p.degree(), 1);

		let zero = fp97_poly(&[0, 0]);
		assert!(zero.is_zero());
		assert_eq!(zero, Polynomial::zero());
		assert_eq!(zero.degree(), 0);
		assert_eq!(Polynomial::constant(Fp97::ZERO), Polynomial::zero());
	}

	#[test]
	fn test_evaluate() {
		// 3 + 2x + x^2 at x = 4
		let p = fp97_poly(&[3, 2, 1]);
		assert_eq!(p.evaluate(Fp97::from(4)), Fp97::from(27));
		assert_eq!(Polynomial::<Fp97>::zero().evaluate(Fp97::from(4)), Fp97::ZERO);
	}

	#[test]
	fn test_arithmetic() {
		let p = fp97_poly(&[1, 1]);
		let q = fp97_poly(&[96, 1]);
		// (1 + x)(x - 1) = x^2 - 1
		assert_eq!(&p * &q, fp97_poly(&[96, 0, 1]));
		assert_eq!(&p + &q, fp97_poly(&[0, 2]));
		assert_eq!(&p - &p, Polynomial::zero());
		assert_eq!(-p.clone(), fp97_poly(&[96, 96]));
		assert_eq!(p.scale(Fp97::from(3)), fp97_poly(&[3, 3]));
		assert_eq!(p.scale(Fp97::ZERO), Polynomial::zero());
	}

	#[test]
	fn test_div_rem() {
		let mut rng = StdRng::seed_from_u64(0);
		for (n, d) in [(8, 3), (5, 5), (3, 6), (7, 1)] {
			let dividend = random_poly(&mut rng, n);
			let divisor = random_poly(&mut rng, d);
			let (q, r) = dividend.div_rem(&divisor).unwrap();

			assert_eq!(&(&q * &divisor) + &r, dividend);
			assert!(r.is_zero() || r.coeffs().len() < divisor.coeffs().len());
		}
	}

	#[test]
	fn test_div_rem_exact() {
		// (x^2 - 1) / (x - 1) = x + 1
		let (q, r) = fp97_poly(&[96, 0, 1])
			.div_rem(&fp97_poly(&[96, 1]))
			.unwrap();
		assert_eq!(q, fp97_poly(&[1, 1]));
		assert!(r.is_zero());
	}

	#[test]
	fn test_div_by_zero() {
		assert_matches!(
			fp97_poly(&[1, 2]).div_rem(&Polynomial::zero()),
			Err(Error::DivisionByZero)
		);
	}

	#[test]
	fn test_interpolate_line() {
		let points = [(Fp97::from(2), Fp97::from(7)), (Fp97::from(5), Fp97::from(16))];
		// y = 3x + 1
		assert_eq!(Polynomial::interpolate(&points).unwrap(), fp97_poly(&[1, 3]));
	}

	#[test]
	fn test_interpolate_duplicate_points() {
		let points = [(Fp97::from(2), Fp97::from(7)), (Fp97::from(2), Fp97::from(8))];
		assert_matches!(Polynomial::interpolate(&points), Err(Error::DuplicateDomainPoint));
	}

	proptest! {
		#[test]
		fn test_interpolate_recovers_polynomial(seed in any::<u64>(), len in 1usize..8) {
			let mut rng = StdRng::seed_from_u64(seed);
			let p = random_poly(&mut rng, len);
			let points = (0..len as u64)
				.map(|i| {
					let x = BabyBear::from(i + 1);
					(x, p.evaluate(x))
				})
				.collect::<Vec<_>>();
			prop_assert_eq!(Polynomial::interpolate(&points).unwrap(), p);
		}

		#[test]
		fn test_mul_evaluates_pointwise(seed in any::<u64>(), a in 0usize..10, b in 0usize..10) {
			let mut rng = StdRng::seed_from_u64(seed);
			let p = random_poly(&mut rng, a);
			let q = random_poly(&mut rng, b);
			let x = BabyBear::random(&mut rng);
			prop_assert_eq!((&p * &q).evaluate(x), p.evaluate(x) * q.evaluate(x));
		}
	}
}
