// Copyright 2024-2025 Irreducible Inc.

use tracing::instrument;
use zkfri_field::{Field, PrimeField};
use zkfri_math::{EvaluationDomainFactory, Polynomial};
use zkfri_utils::bail;

use super::{
	common::{interleave, FRIParams, FRIProof},
	error::{Error, VerificationError},
};
use crate::{merkle_tree::MerkleTreeScheme, transcript::Transcript};

/// The divisors mapping round-0 openings onto the folded batch.
#[derive(Debug, Clone, Copy)]
enum Divisors<'a, F> {
	Shared(&'a Polynomial<F>),
	PerPolynomial(&'a [Polynomial<F>]),
}

impl<'a, F> Divisors<'a, F> {
	fn get(&self, index: usize) -> &'a Polynomial<F> {
		match *self {
			Self::Shared(divisor) => divisor,
			Self::PerPolynomial(divisors) => &divisors[index],
		}
	}
}

/// Verifies a batched FRI proof whose round-0 values are divided by a single shared divisor.
///
/// Every value `y` opened in round 0 at point `x` for polynomial `i` is replaced by
/// `(y - u[i](x)) / v(x)` before the colinearity check.
///
/// Returns `Ok(false)` if the proof is rejected and `Err` if the arguments are malformed.
#[instrument("fri::verify_eval", skip_all, level = "debug")]
pub fn verify_eval<F, DF, VCS, T>(
	proof: &FRIProof<F, VCS::Digest>,
	params: &FRIParams<F, DF>,
	vcs: &VCS,
	u: &[Polynomial<F>],
	v: &Polynomial<F>,
	transcript: &mut T,
) -> Result<bool, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F>,
	VCS: MerkleTreeScheme<F>,
	T: Transcript,
{
	verify_with_divisors(proof, params, vcs, u, Divisors::Shared(v), transcript)
}

/// Verifies a batched FRI proof with one divisor per polynomial.
///
/// Same as [`verify_eval`], with polynomial `i` divided by `v[i]`.
#[instrument("fri::verify_eval_with_divisors", skip_all, level = "debug")]
pub fn verify_eval_with_divisors<F, DF, VCS, T>(
	proof: &FRIProof<F, VCS::Digest>,
	params: &FRIParams<F, DF>,
	vcs: &VCS,
	u: &[Polynomial<F>],
	v: &[Polynomial<F>],
	transcript: &mut T,
) -> Result<bool, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F>,
	VCS: MerkleTreeScheme<F>,
	T: Transcript,
{
	if v.len() != u.len() {
		bail!(Error::BatchSizeMismatch {
			expected: u.len(),
			actual: v.len(),
		});
	}
	verify_with_divisors(proof, params, vcs, u, Divisors::PerPolynomial(v), transcript)
}

fn verify_with_divisors<F, DF, VCS, T>(
	proof: &FRIProof<F, VCS::Digest>,
	params: &FRIParams<F, DF>,
	vcs: &VCS,
	u: &[Polynomial<F>],
	divisors: Divisors<'_, F>,
	transcript: &mut T,
) -> Result<bool, Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F>,
	VCS: MerkleTreeScheme<F>,
	T: Transcript,
{
	if u.is_empty() {
		bail!(Error::InvalidArgs("the batch must contain at least one polynomial".to_string()));
	}

	match verify_rounds(proof, params, vcs, u, divisors, transcript) {
		Ok(()) => Ok(true),
		Err(Error::Verification(err)) => {
			tracing::debug!(%err, "FRI proof rejected");
			Ok(false)
		}
		Err(err) => Err(err),
	}
}

fn verify_rounds<F, DF, VCS, T>(
	proof: &FRIProof<F, VCS::Digest>,
	params: &FRIParams<F, DF>,
	vcs: &VCS,
	u: &[Polynomial<F>],
	divisors: Divisors<'_, F>,
	transcript: &mut T,
) -> Result<(), Error>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F>,
	VCS: MerkleTreeScheme<F>,
	T: Transcript,
{
	let batch_size = u.len();
	let domains = params.domains();
	let FRIProof {
		round_proofs,
		final_polynomials,
		target_commitment,
	} = proof;

	if round_proofs.len() != params.n_fold_rounds() {
		bail!(VerificationError::IncorrectRoundCount {
			expected: params.n_fold_rounds(),
			actual: round_proofs.len(),
		});
	}
	if final_polynomials.len() != batch_size {
		bail!(VerificationError::IncorrectBatchLength {
			location: "final polynomials",
			expected: batch_size,
		});
	}
	if target_commitment.depth != params.log_len() {
		bail!(VerificationError::IncorrectCommitmentDepth {
			expected: params.log_len(),
			actual: target_commitment.depth,
		});
	}

	transcript.absorb_serialized(&target_commitment.root)?;
	let mut x_index = transcript.int_challenge() % domains[0].size();

	let mut expected_root = &target_commitment.root;
	let mut prev_colinear_values: Option<&[F]> = None;
	for (round, (round_proof, pair)) in round_proofs.iter().zip(domains.windows(2)).enumerate() {
		let (domain, next_domain) = (&pair[0], &pair[1]);
		let alpha = transcript.challenge::<F>();

		if round_proof.tree_root != *expected_root {
			bail!(VerificationError::RootMismatch { round });
		}

		for (location, values) in [
			("sibling values", &round_proof.sibling_values[0]),
			("sibling values", &round_proof.sibling_values[1]),
			("colinear values", &round_proof.colinear_values),
		] {
			if values.len() != batch_size {
				bail!(VerificationError::IncorrectBatchLength {
					location,
					expected: batch_size,
				});
			}
		}

		x_index %= domain.size();
		let sibling_indices = [x_index, (x_index + domain.size() / 2) % domain.size()];
		for ((&index, values), opening) in sibling_indices
			.iter()
			.zip(&round_proof.sibling_values)
			.zip(&round_proof.sibling_openings)
		{
			if opening.index != index {
				bail!(VerificationError::IncorrectQueryIndex {
					round,
					expected: index,
					actual: opening.index,
				});
			}
			vcs.verify_opening(index, values, domain.log_size(), &round_proof.tree_root, opening)
				.map_err(|source| VerificationError::InvalidOpening { round, source })?;
		}

		if let Some(prev_colinear_values) = prev_colinear_values {
			if prev_colinear_values != round_proof.sibling_values[0].as_slice() {
				bail!(VerificationError::InconsistentQueryValues { round });
			}
		}

		let x = domain.element(x_index);
		for index in 0..batch_size {
			let mut y = [
				round_proof.sibling_values[0][index],
				round_proof.sibling_values[1][index],
			];
			if round == 0 {
				y[0] = quotient_value(y[0], x, &u[index], divisors.get(index), index)?;
				y[1] = quotient_value(y[1], -x, &u[index], divisors.get(index), index)?;
			}

			let line = Polynomial::interpolate(&[(x, y[0]), (-x, y[1])])?;
			if line.evaluate(alpha) != round_proof.colinear_values[index] {
				bail!(VerificationError::IncorrectFold { round, index });
			}
		}

		transcript.absorb_serialized(&round_proof.next_tree_root)?;
		x_index %= next_domain.size();

		if round_proof.colinear_opening.index != x_index {
			bail!(VerificationError::IncorrectQueryIndex {
				round,
				expected: x_index,
				actual: round_proof.colinear_opening.index,
			});
		}
		vcs.verify_opening(
			x_index,
			&round_proof.colinear_values,
			next_domain.log_size(),
			&round_proof.next_tree_root,
			&round_proof.colinear_opening,
		)
		.map_err(|source| VerificationError::InvalidOpening { round, source })?;

		expected_root = &round_proof.next_tree_root;
		prev_colinear_values = Some(round_proof.colinear_values.as_slice());
	}

	let bound = params.final_degree_bound();
	for (index, poly) in final_polynomials.iter().enumerate() {
		if poly.degree() > bound {
			bail!(VerificationError::FinalDegreeExceeded {
				index,
				degree: poly.degree(),
				bound,
			});
		}
	}

	let last_domain = &domains[domains.len() - 1];
	let final_values = final_polynomials
		.iter()
		.map(|poly| last_domain.evaluate_coefficients(poly.coeffs()))
		.collect::<Result<Vec<_>, _>>()?;
	vcs.verify_vector(expected_root, &interleave(&final_values), batch_size)
		.map_err(|_| VerificationError::FinalCommitmentMismatch)?;

	Ok(())
}

/// Maps a round-0 opening `y` at `point` to `(y - numerator(point)) / divisor(point)`.
fn quotient_value<F: Field>(
	y: F,
	point: F,
	numerator: &Polynomial<F>,
	divisor: &Polynomial<F>,
	index: usize,
) -> Result<F, VerificationError> {
	let divisor_inv = divisor
		.evaluate(point)
		.invert()
		.ok_or(VerificationError::VanishingDivisor { index })?;
	Ok((y - numerator.evaluate(point)) * divisor_inv)
}
