// Copyright 2024-2025 Irreducible Inc.

use std::ops::Index;

use tracing::instrument;
use zkfri_field::PrimeField;
use zkfri_utils::{bail, checked_arithmetics::checked_log_2};

use crate::{EvaluationDomain, EvaluationDomainFactory, Error, Polynomial};

/// A polynomial stored by its values on a power-of-two multiplicative subgroup.
///
/// `values[i]` is the evaluation at `generator^i` of the subgroup of size `values.len()`
/// handed out by the domain factory. `degree` is an upper bound on the true degree and is
/// always less than the domain size, so the coefficients can be recovered with an inverse FFT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyDFS<F> {
	values: Vec<F>,
	degree: usize,
}

fn check_shape(degree: usize, size: usize) -> Result<usize, Error> {
	let log_size = checked_log_2(size).ok_or(Error::NotPowerOfTwo { size })?;
	if degree >= size {
		bail!(Error::DegreeExceedsSize { degree, size });
	}
	Ok(log_size)
}

impl<F: PrimeField> PolyDFS<F> {
	/// The zero polynomial with the given degree bound on a domain of `size` points.
	pub fn new(degree: usize, size: usize) -> Result<Self, Error> {
		check_shape(degree, size)?;
		Ok(Self {
			values: vec![F::ZERO; size],
			degree,
		})
	}

	/// Wraps evaluations that are already known to come from a polynomial of degree at most
	/// `degree`.
	pub fn from_evaluations(degree: usize, values: Vec<F>) -> Result<Self, Error> {
		check_shape(degree, values.len())?;
		Ok(Self { values, degree })
	}

	/// Evaluates the coefficients on the smallest power-of-two domain that holds them.
	pub fn from_coefficients(
		coeffs: &[F],
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		let size = coeffs.len().max(1).next_power_of_two();
		let domain = domain_factory.create(size.trailing_zeros() as usize)?;
		Ok(Self {
			values: domain.evaluate_coefficients(coeffs)?,
			degree: coeffs.len().saturating_sub(1),
		})
	}

	pub fn from_polynomial(
		poly: &Polynomial<F>,
		size: usize,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		let degree = poly.degree();
		let log_size = check_shape(degree, size)?;
		let domain = domain_factory.create(log_size)?;
		Ok(Self {
			values: domain.evaluate_coefficients(poly.coeffs())?,
			degree,
		})
	}

	pub fn size(&self) -> usize {
		self.values.len()
	}

	pub fn log_size(&self) -> usize {
		self.values.len().trailing_zeros() as usize
	}

	pub fn degree(&self) -> usize {
		self.degree
	}

	pub fn values(&self) -> &[F] {
		&self.values
	}

	pub fn into_values(self) -> Vec<F> {
		self.values
	}

	pub fn is_zero(&self) -> bool {
		self.values.iter().all(|v| v.is_zero())
	}

	fn domain(
		&self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<EvaluationDomain<F>, Error> {
		domain_factory.create(self.log_size())
	}

	/// Moves the polynomial onto the domain of `new_size` points.
	///
	/// Shrinking below `degree + 1` points would lose coefficients and is rejected.
	#[instrument(skip_all, level = "trace", fields(from = self.size(), to = new_size))]
	pub fn resize(
		&mut self,
		new_size: usize,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<(), Error> {
		let log_new_size = check_shape(self.degree, new_size)?;
		if new_size == self.size() {
			return Ok(());
		}

		self.domain(&domain_factory)?.inverse_fft(&mut self.values)?;
		self.values.resize(new_size, F::ZERO);
		domain_factory.create(log_new_size)?.fft(&mut self.values)?;
		Ok(())
	}

	fn resized(
		&self,
		new_size: usize,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		let mut result = self.clone();
		result.resize(new_size, domain_factory)?;
		Ok(result)
	}

	/// Recovers the coefficients, lowest degree first, with trailing zeros removed.
	pub fn coefficients(
		&self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Vec<F>, Error> {
		let mut coeffs = self.values.clone();
		self.domain(domain_factory)?.inverse_fft(&mut coeffs)?;
		Ok(Polynomial::new(coeffs).into_coeffs())
	}

	pub fn to_polynomial(
		&self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Polynomial<F>, Error> {
		self.coefficients(domain_factory).map(Polynomial::new)
	}

	/// Evaluates at an arbitrary field element through the coefficient form.
	pub fn evaluate(
		&self,
		point: F,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<F, Error> {
		Ok(self.to_polynomial(domain_factory)?.evaluate(point))
	}

	pub fn add(
		&self,
		other: &Self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		self.zip_with(other, domain_factory, |a, b| a + b)
	}

	pub fn sub(
		&self,
		other: &Self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		self.zip_with(other, domain_factory, |a, b| a - b)
	}

	fn zip_with(
		&self,
		other: &Self,
		domain_factory: impl EvaluationDomainFactory<F>,
		op: impl Fn(F, F) -> F,
	) -> Result<Self, Error> {
		let size = self.size().max(other.size());
		let degree = self.degree.max(other.degree);
		self.pointwise(other, size, degree, domain_factory, op)
	}

	/// Multiplies two polynomials in evaluation form.
	///
	/// Both operands are first moved onto a common domain with at least
	/// `deg(self) + deg(other) + 1` points, otherwise the high-degree terms of the product would
	/// wrap around onto the low-degree ones.
	pub fn mul(
		&self,
		other: &Self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<Self, Error> {
		let degree = self.degree + other.degree;
		let size = self
			.size()
			.max(other.size())
			.max((degree + 1).next_power_of_two());
		self.pointwise(other, size, degree, domain_factory, |a, b| a * b)
	}

	fn pointwise(
		&self,
		other: &Self,
		size: usize,
		degree: usize,
		domain_factory: impl EvaluationDomainFactory<F>,
		op: impl Fn(F, F) -> F,
	) -> Result<Self, Error> {
		let lhs = self.resized(size, &domain_factory)?;
		let rhs = other.resized(size, &domain_factory)?;
		let values = lhs
			.values
			.into_iter()
			.zip(rhs.values)
			.map(|(a, b)| op(a, b))
			.collect();
		Ok(Self { values, degree })
	}

	/// Multiplies every value by `scalar`.
	pub fn scale(&self, scalar: F) -> Self {
		Self {
			values: self.values.iter().map(|&v| v * scalar).collect(),
			degree: self.degree,
		}
	}

	/// Euclidean division in the coefficient domain. Quotient and remainder are returned on
	/// the dividend's domain.
	pub fn div_rem(
		&self,
		divisor: &Self,
		domain_factory: impl EvaluationDomainFactory<F>,
	) -> Result<(Self, Self), Error> {
		let dividend = self.to_polynomial(&domain_factory)?;
		let divisor = divisor.to_polynomial(&domain_factory)?;
		let (quotient, remainder) = dividend.div_rem(&divisor)?;

		let domain = self.domain(&domain_factory)?;
		let into_dfs = |poly: Polynomial<F>| -> Result<Self, Error> {
			Ok(Self {
				values: domain.evaluate_coefficients(poly.coeffs())?,
				degree: poly.degree(),
			})
		};
		Ok((into_dfs(quotient)?, into_dfs(remainder)?))
	}
}

impl<F> Index<usize> for PolyDFS<F> {
	type Output = F;

	fn index(&self, index: usize) -> &F {
		&self.values[index]
	}
}
