// Copyright 2024-2025 Irreducible Inc.

use rayon::prelude::*;
use tracing::instrument;
use zkfri_field::PrimeField;
use zkfri_math::{EvaluationDomain, EvaluationDomainFactory, PolyDFS, Polynomial};
use zkfri_utils::bail;

use super::{
	common::{interleave, FRIParams, FRIProof, Precommitment, RoundProof},
	error::Error,
};
use crate::{
	merkle_tree::{Commitment, MerkleTreeProver, MerkleTreeScheme},
	transcript::Transcript,
};

type Digest<F, MTProver> =
	<<MTProver as MerkleTreeProver<F>>::Scheme as MerkleTreeScheme<F>>::Digest;

/// Evaluates every polynomial of `batch` over the subgroup of size `2^log_len` and commits to the
/// interleaved evaluations.
#[instrument("fri::precommit", skip_all, level = "debug", fields(batch_size = batch.len(), log_len = log_len))]
#[allow(clippy::type_complexity)]
pub fn precommit<F, DF, MTProver>(
	merkle_prover: &MTProver,
	batch: &[PolyDFS<F>],
	domain_factory: DF,
	log_len: usize,
) -> Result<Precommitment<Digest<F, MTProver>, MTProver::Committed>, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F> + Sync,
	MTProver: MerkleTreeProver<F>,
{
	if batch.is_empty() {
		bail!(Error::InvalidArgs("the batch must contain at least one polynomial".to_string()));
	}

	let size = domain_factory.create(log_len)?.size();
	let evaluations = batch
		.par_iter()
		.map(|poly| into_evaluations(poly.clone(), size, &domain_factory))
		.collect::<Result<Vec<_>, _>>()?;

	let (commitment, committed) = merkle_prover.commit(&interleave(&evaluations), batch.len())?;
	Ok(Precommitment {
		commitment,
		committed,
		batch_size: batch.len(),
	})
}

/// The public commitment of a precommitted batch.
pub fn commit<D: Clone, Committed>(precommitment: &Precommitment<D, Committed>) -> Commitment<D> {
	precommitment.commitment().clone()
}

/// Precommits `batch` and returns only the public commitment.
pub fn commit_batch<F, DF, MTProver>(
	merkle_prover: &MTProver,
	batch: &[PolyDFS<F>],
	domain_factory: DF,
	log_len: usize,
) -> Result<Commitment<Digest<F, MTProver>>, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F> + Sync,
	MTProver: MerkleTreeProver<F>,
{
	Ok(precommit(merkle_prover, batch, domain_factory, log_len)?.commitment)
}

/// Proves that the polynomials `f` have degree at most `params.max_degree()`.
///
/// `g` is the precommitted batch. Its values are what round 0 opens, while `f` is what gets
/// folded; the verifier relates the two with the divisors passed to
/// [`verify_eval`](super::verify_eval). When no such relation is needed, `f` and `g` are the same
/// batch.
#[instrument("fri::proof_eval", skip_all, level = "debug")]
pub fn proof_eval<F, DF, MTProver, T>(
	f: Vec<PolyDFS<F>>,
	g: &[PolyDFS<F>],
	precommitment: &Precommitment<Digest<F, MTProver>, MTProver::Committed>,
	params: &FRIParams<F, DF>,
	merkle_prover: &MTProver,
	transcript: &mut T,
) -> Result<FRIProof<F, Digest<F, MTProver>>, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F> + Sync,
	MTProver: MerkleTreeProver<F>,
	T: Transcript,
{
	let batch_size = g.len();
	if batch_size == 0 {
		bail!(Error::InvalidArgs("the batch must contain at least one polynomial".to_string()));
	}
	if f.len() != batch_size {
		bail!(Error::BatchSizeMismatch {
			expected: batch_size,
			actual: f.len(),
		});
	}
	if precommitment.batch_size != batch_size {
		bail!(Error::BatchSizeMismatch {
			expected: precommitment.batch_size,
			actual: batch_size,
		});
	}

	let domains = params.domains();
	let size = domains[0].size();
	if precommitment.commitment.depth != params.log_len() {
		bail!(Error::InvalidArgs(format!(
			"the precommitment has depth {}, expected {}",
			precommitment.commitment.depth,
			params.log_len()
		)));
	}
	if let Some(poly) = f.iter().find(|poly| poly.degree() > params.max_degree()) {
		bail!(Error::InvalidArgs(format!(
			"polynomial degree {} exceeds the maximum degree {}",
			poly.degree(),
			params.max_degree()
		)));
	}

	let domain_factory = params.domain_factory();
	let g_values = g
		.par_iter()
		.map(|poly| into_evaluations(poly.clone(), size, domain_factory))
		.collect::<Result<Vec<_>, _>>()?;
	let mut f_values = f
		.into_par_iter()
		.map(|poly| into_evaluations(poly, size, domain_factory))
		.collect::<Result<Vec<_>, _>>()?;

	transcript.absorb_serialized(&precommitment.commitment.root)?;
	let mut x_index = transcript.int_challenge() % size;

	let mut round_proofs = Vec::with_capacity(params.n_fold_rounds());
	let mut current_tree: Option<(Commitment<Digest<F, MTProver>>, MTProver::Committed)> = None;
	for (round, pair) in domains.windows(2).enumerate() {
		let (domain, next_domain) = (&pair[0], &pair[1]);
		let alpha = transcript.challenge::<F>();

		x_index %= domain.size();
		let sibling_indices = [x_index, (x_index + domain.size() / 2) % domain.size()];

		let (tree_root, committed) = match &current_tree {
			Some((commitment, committed)) => (commitment.root.clone(), committed),
			None => (precommitment.commitment.root.clone(), &precommitment.committed),
		};

		let queried = if round == 0 { &g_values } else { &f_values };
		let sibling_values =
			sibling_indices.map(|index| queried.iter().map(|values| values[index]).collect());
		let sibling_openings = [
			merkle_prover.prove_opening(committed, sibling_indices[0])?,
			merkle_prover.prove_opening(committed, sibling_indices[1])?,
		];

		f_values = fold_batch(&f_values, domain, alpha);
		x_index %= next_domain.size();

		let (next_commitment, next_committed) =
			merkle_prover.commit(&interleave(&f_values), batch_size)?;
		transcript.absorb_serialized(&next_commitment.root)?;

		let colinear_values = f_values.iter().map(|values| values[x_index]).collect();
		let colinear_opening = merkle_prover.prove_opening(&next_committed, x_index)?;

		round_proofs.push(RoundProof {
			tree_root,
			sibling_values,
			sibling_openings,
			colinear_values,
			next_tree_root: next_commitment.root.clone(),
			colinear_opening,
		});
		current_tree = Some((next_commitment, next_committed));
	}

	let last_domain = &domains[domains.len() - 1];
	let final_polynomials = f_values
		.into_par_iter()
		.map(|mut values| -> Result<_, Error> {
			last_domain.inverse_fft(&mut values)?;
			Ok(Polynomial::new(values))
		})
		.collect::<Result<Vec<_>, _>>()?;

	Ok(FRIProof {
		round_proofs,
		final_polynomials,
		target_commitment: precommitment.commitment.clone(),
	})
}

fn into_evaluations<F: PrimeField>(
	mut poly: PolyDFS<F>,
	size: usize,
	domain_factory: impl EvaluationDomainFactory<F>,
) -> Result<Vec<F>, Error> {
	poly.resize(size, domain_factory)?;
	Ok(poly.into_values())
}

/// Folds every polynomial of the batch from `domain` onto the subgroup of half its size.
///
/// With `x = domain.element(i)` and `-x = domain.element(i + n/2)`, the folded value at `x^2` is
/// `(f(x) + f(-x)) / 2 + α (f(x) - f(-x)) / (2x)`.
#[instrument(skip_all, level = "trace")]
fn fold_batch<F: PrimeField>(batch: &[Vec<F>], domain: &EvaluationDomain<F>, alpha: F) -> Vec<Vec<F>> {
	let half = domain.size() / 2;
	let mut x_inv = domain.elements_inv();
	x_inv.truncate(half);
	// (p + 1) / 2 for odd p
	let two_inv = F::from(F::MODULUS / 2 + 1);

	batch
		.par_iter()
		.map(|values| {
			let (lo, hi) = values.split_at(half);
			lo.iter()
				.zip(hi)
				.zip(&x_inv)
				.map(|((&a, &b), &x_inv)| ((a + b) + alpha * (a - b) * x_inv) * two_inv)
				.collect()
		})
		.collect()
}
