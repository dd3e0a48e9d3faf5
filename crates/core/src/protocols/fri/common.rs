// Copyright 2024-2025 Irreducible Inc.

use getset::{CopyGetters, Getters};
use rayon::prelude::*;
use zkfri_field::{Field, PrimeField};
use zkfri_math::{EvaluationDomain, EvaluationDomainFactory, Polynomial, TwoAdicDomainFactory};
use zkfri_utils::{bail, checked_arithmetics::log2_ceil, ensure};

use super::error::Error;
use crate::merkle_tree::{Commitment, MerkleProof};

/// The number of points combined by a single fold: a query point and its negation.
pub const FOLD_ARITY: usize = 2;

/// Parameters for a batched FRI low-degree test.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct FRIParams<F: Field, DF = TwoAdicDomainFactory<F>> {
	/// The factory handing out the subgroups the committed polynomials are evaluated on.
	#[getset(get = "pub")]
	domain_factory: DF,
	/// The descending chain `D[0], ..., D[r-1]`.
	domains: Vec<EvaluationDomain<F>>,
	/// Bound on the degree of the folded polynomials.
	#[getset(get_copy = "pub")]
	max_degree: usize,
}

impl<F, DF> FRIParams<F, DF>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F>,
{
	pub fn new(
		domain_factory: DF,
		domains: Vec<EvaluationDomain<F>>,
		max_degree: usize,
		fold_arity: usize,
	) -> Result<Self, Error> {
		ensure!(fold_arity == FOLD_ARITY, Error::UnsupportedFoldArity { arity: fold_arity });

		let Some(first_domain) = domains.first() else {
			bail!(Error::ParameterError("the domain chain is empty".to_string()));
		};
		ensure!(
			domains.len() >= 2,
			Error::ParameterError(format!(
				"at least two domains are required, got {}",
				domains.len()
			))
		);

		ensure!(
			domains.windows(2).all(|pair| {
				pair[1].log_size() + 1 == pair[0].log_size()
					&& pair[1].generator() == pair[0].generator().square()
			}),
			Error::DomainChainNotDescending
		);

		ensure!(
			max_degree < first_domain.size(),
			Error::ParameterError(format!(
				"max degree {max_degree} does not fit in a domain of size {}",
				first_domain.size()
			))
		);

		// The committed evaluations are produced by the factory, so the chain must start with
		// the factory's own subgroup.
		ensure!(
			domain_factory.create(first_domain.log_size())? == *first_domain,
			Error::ParameterError(
				"the first domain differs from the one produced by the domain factory".to_string()
			)
		);

		Ok(Self {
			domain_factory,
			domains,
			max_degree,
		})
	}

	/// Builds the domain chain for a Reed–Solomon code of rate `2^-log_inv_rate`.
	///
	/// The first domain has `2^(ceil(log2(max_degree + 1)) + log_inv_rate)` points and each of
	/// the following `n_rounds - 1` domains halves it.
	pub fn with_log_inv_rate(
		domain_factory: DF,
		max_degree: usize,
		log_inv_rate: usize,
		n_rounds: usize,
	) -> Result<Self, Error> {
		let log_len = log2_ceil(max_degree.saturating_add(1)) + log_inv_rate;
		ensure!(
			n_rounds <= log_len + 1,
			Error::ParameterError(format!("{n_rounds} rounds do not fit a domain of size 2^{log_len}"))
		);

		let domains = (0..n_rounds)
			.map(|i| domain_factory.create(log_len - i))
			.collect::<Result<Vec<_>, _>>()?;
		Self::new(domain_factory, domains, max_degree, FOLD_ARITY)
	}

	pub fn domains(&self) -> &[EvaluationDomain<F>] {
		&self.domains
	}

	/// The number of domains `r`.
	pub fn n_rounds(&self) -> usize {
		self.domains.len()
	}

	/// The number of folds, `r - 1`.
	pub fn n_fold_rounds(&self) -> usize {
		self.domains.len() - 1
	}

	pub const fn fold_arity(&self) -> usize {
		FOLD_ARITY
	}

	/// Binary logarithm of the size of the first domain, which is also the depth of the initial
	/// Merkle tree.
	pub fn log_len(&self) -> usize {
		self.domains[0].log_size()
	}

	/// Maximum degree of the final polynomials,
	/// `2^(ceil(log2(max_degree + 1)) - (r - 1)) - 1`.
	///
	/// When there are more folds than halvings of the degree the bound is 0.
	pub fn final_degree_bound(&self) -> usize {
		let log_dim = log2_ceil(self.max_degree + 1);
		(1 << log_dim.saturating_sub(self.n_fold_rounds())) - 1
	}
}

/// A committed batch together with the prover-side data needed to open it.
#[derive(Debug, Getters, CopyGetters)]
pub struct Precommitment<D, Committed> {
	#[getset(get = "pub")]
	pub(super) commitment: Commitment<D>,
	#[getset(get = "pub")]
	pub(super) committed: Committed,
	#[getset(get_copy = "pub")]
	pub(super) batch_size: usize,
}

/// The openings of one fold round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundProof<F, D> {
	/// Root of the tree queried in this round.
	pub tree_root: D,
	/// The rows of the queried tree at the query index and at the index of its negation.
	pub sibling_values: [Vec<F>; 2],
	pub sibling_openings: [MerkleProof<D>; 2],
	/// The folded polynomials at the query point of the next domain.
	pub colinear_values: Vec<F>,
	/// Root of the tree committing the folded polynomials.
	pub next_tree_root: D,
	pub colinear_opening: MerkleProof<D>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FRIProof<F, D> {
	pub round_proofs: Vec<RoundProof<F, D>>,
	/// The fully folded batch in coefficient form.
	pub final_polynomials: Vec<Polynomial<F>>,
	/// The commitment to the batch the proof is about.
	pub target_commitment: Commitment<D>,
}

/// Lays out a batch of equal-length evaluation vectors row by row, so that row `i` holds the
/// `i`-th evaluation of every polynomial.
pub(super) fn interleave<F: Field>(batch: &[Vec<F>]) -> Vec<F> {
	let batch_size = batch.len();
	let Some(len) = batch.first().map(Vec::len) else {
		return Vec::new();
	};

	let mut rows = vec![F::ZERO; batch_size * len];
	rows.par_chunks_mut(batch_size)
		.enumerate()
		.for_each(|(i, row)| {
			for (cell, values) in row.iter_mut().zip(batch) {
				*cell = values[i];
			}
		});
	rows
}
