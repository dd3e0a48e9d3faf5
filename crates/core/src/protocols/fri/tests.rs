// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use rand::{rngs::StdRng, SeedableRng};
use zkfri_field::{BabyBear, Field, Fp97, PrimeField};
use zkfri_hash::{Groestl256, Groestl256Compression, Output, Sha256, Sha256Compression};
use zkfri_math::{EvaluationDomainFactory, PolyDFS, Polynomial, TwoAdicDomainFactory};

use super::{
	commit, commit_batch, precommit, proof_eval, verify_eval, verify_eval_with_divisors, Error,
	FRIParams, FRIProof, FOLD_ARITY,
};
use crate::{
	merkle_tree::{BinaryMerkleTreeProver, MerkleTreeProver, MerkleTreeScheme},
	transcript::{HasherTranscript, Transcript},
};

type F = BabyBear;
type MerkleProver<F> = BinaryMerkleTreeProver<F, Groestl256, Groestl256Compression>;
type Proof<F> = FRIProof<F, Output<Groestl256>>;

fn transcript() -> HasherTranscript<Groestl256> {
	HasherTranscript::new(b"fri test")
}

fn random_coeffs(rng: &mut StdRng, len: usize) -> Vec<F> {
	(0..len).map(|_| F::random(&mut *rng)).collect()
}

/// A batch together with the divisors relating it to the folded quotients.
struct Instance<F: Field> {
	g: Vec<PolyDFS<F>>,
	f: Vec<PolyDFS<F>>,
	u: Vec<Polynomial<F>>,
	v: Vec<Polynomial<F>>,
}

/// Builds `g` of degree `degree + 1` and the quotients `f = (g - g(z)) / (X - z)`.
///
/// With `shared_point` every polynomial is opened at the same `z`.
fn quotient_instance(
	rng: &mut StdRng,
	factory: &TwoAdicDomainFactory<F>,
	batch_size: usize,
	degree: usize,
	shared_point: bool,
) -> Instance<F> {
	let shared_z = F::random(&mut *rng);
	let mut instance = Instance {
		g: Vec::new(),
		f: Vec::new(),
		u: Vec::new(),
		v: Vec::new(),
	};
	for _ in 0..batch_size {
		let z = if shared_point {
			shared_z
		} else {
			F::random(&mut *rng)
		};
		let g = PolyDFS::from_coefficients(&random_coeffs(rng, degree + 2), factory).unwrap();
		let g_z = g.evaluate(z, factory).unwrap();

		let numerator = g
			.sub(&PolyDFS::from_coefficients(&[g_z], factory).unwrap(), factory)
			.unwrap();
		let divisor = PolyDFS::from_coefficients(&[-z, F::ONE], factory).unwrap();
		let (quotient, remainder) = numerator.div_rem(&divisor, factory).unwrap();
		assert!(remainder.is_zero());

		instance.g.push(g);
		instance.f.push(quotient);
		instance.u.push(Polynomial::constant(g_z));
		instance.v.push(Polynomial::new(vec![-z, F::ONE]));
	}
	instance
}

fn prove<F, DF, MTProver>(
	params: &FRIParams<F, DF>,
	merkle_prover: &MTProver,
	f: Vec<PolyDFS<F>>,
	g: &[PolyDFS<F>],
) -> FRIProof<F, <MTProver::Scheme as MerkleTreeScheme<F>>::Digest>
where
	F: PrimeField,
	DF: EvaluationDomainFactory<F> + Sync,
	MTProver: MerkleTreeProver<F>,
{
	let precommitment =
		precommit(merkle_prover, g, params.domain_factory(), params.log_len()).unwrap();
	proof_eval(f, g, &precommitment, params, merkle_prover, &mut transcript()).unwrap()
}

fn verify_shared(
	params: &FRIParams<F>,
	merkle_prover: &MerkleProver<F>,
	proof: &Proof<F>,
	instance: &Instance<F>,
) -> bool {
	verify_eval(
		proof,
		params,
		merkle_prover.scheme(),
		&instance.u,
		&instance.v[0],
		&mut transcript(),
	)
	.unwrap()
}

struct Fixture {
	params: FRIParams<F>,
	merkle_prover: MerkleProver<F>,
	instance: Instance<F>,
	proof: Proof<F>,
}

fn fixture(seed: u64, batch_size: usize) -> Fixture {
	let mut rng = StdRng::seed_from_u64(seed);
	let factory = TwoAdicDomainFactory::<F>::default();
	let params = FRIParams::with_log_inv_rate(factory.clone(), 31, 2, 4).unwrap();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());
	let instance = quotient_instance(&mut rng, &factory, batch_size, 31, true);
	let proof = prove(&params, &merkle_prover, instance.f.clone(), &instance.g);
	Fixture {
		params,
		merkle_prover,
		instance,
		proof,
	}
}

impl Fixture {
	fn verify(&self, proof: &Proof<F>) -> bool {
		verify_shared(&self.params, &self.merkle_prover, proof, &self.instance)
	}
}

#[test]
fn test_commit_prove_verify_success() {
	for seed in 0..4 {
		for batch_size in [1, 3] {
			let fixture = fixture(seed, batch_size);
			let proof = &fixture.proof;

			assert_eq!(proof.round_proofs.len(), 3);
			assert_eq!(proof.final_polynomials.len(), batch_size);
			for poly in &proof.final_polynomials {
				assert!(poly.degree() <= fixture.params.final_degree_bound());
			}
			assert!(fixture.verify(proof), "seed={seed} batch_size={batch_size}");
		}
	}
}

#[test]
fn test_commit_prove_verify_with_sha256() {
	let mut rng = StdRng::seed_from_u64(12);
	let factory = TwoAdicDomainFactory::<F>::default();
	let params = FRIParams::with_log_inv_rate(factory.clone(), 15, 2, 3).unwrap();
	let merkle_prover =
		BinaryMerkleTreeProver::<F, Sha256, _>::new(Sha256Compression::default());
	let instance = quotient_instance(&mut rng, &factory, 2, 15, true);

	let precommitment =
		precommit(&merkle_prover, &instance.g, &factory, params.log_len()).unwrap();
	let proof = proof_eval(
		instance.f.clone(),
		&instance.g,
		&precommitment,
		&params,
		&merkle_prover,
		&mut HasherTranscript::<Sha256>::new(b"fri test"),
	)
	.unwrap();

	let verify = |proof: &FRIProof<F, Output<Sha256>>| {
		verify_eval(
			proof,
			&params,
			merkle_prover.scheme(),
			&instance.u,
			&instance.v[0],
			&mut HasherTranscript::<Sha256>::new(b"fri test"),
		)
		.unwrap()
	};
	assert!(verify(&proof));

	let mut tampered = proof.clone();
	tampered.round_proofs[1].sibling_values[0][1] += F::ONE;
	assert!(!verify(&tampered));
}

#[test]
fn test_verify_with_per_polynomial_divisors() {
	let mut rng = StdRng::seed_from_u64(10);
	let factory = TwoAdicDomainFactory::<F>::default();
	let params = FRIParams::with_log_inv_rate(factory.clone(), 15, 1, 3).unwrap();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());
	let instance = quotient_instance(&mut rng, &factory, 4, 15, false);

	let proof = prove(&params, &merkle_prover, instance.f.clone(), &instance.g);
	assert!(verify_eval_with_divisors(
		&proof,
		&params,
		merkle_prover.scheme(),
		&instance.u,
		&instance.v,
		&mut transcript(),
	)
	.unwrap());

	// Dividing every polynomial by the first divisor breaks the round-0 relation.
	assert!(!verify_eval(
		&proof,
		&params,
		merkle_prover.scheme(),
		&instance.u,
		&instance.v[0],
		&mut transcript(),
	)
	.unwrap());

	assert_matches!(
		verify_eval_with_divisors(
			&proof,
			&params,
			merkle_prover.scheme(),
			&instance.u,
			&instance.v[..3],
			&mut transcript(),
		),
		Err(Error::BatchSizeMismatch {
			expected: 4,
			actual: 3
		})
	);
}

#[test]
fn test_reject_modified_leaf_data() {
	let fixture = fixture(0, 2);

	for round in [0, 2] {
		let mut proof = fixture.proof.clone();
		proof.round_proofs[round].sibling_values[1][0] += F::ONE;
		assert!(!fixture.verify(&proof), "round={round}");
	}
}

#[test]
fn test_reject_modified_sibling_hash() {
	let fixture = fixture(1, 2);

	let mut proof = fixture.proof.clone();
	proof.round_proofs[0].sibling_openings[0].branch[2][7] ^= 0x01;
	assert!(!fixture.verify(&proof));

	let mut proof = fixture.proof.clone();
	proof.round_proofs[1].colinear_opening.branch[0][0] ^= 0x80;
	assert!(!fixture.verify(&proof));
}

#[test]
fn test_reject_modified_colinear_value() {
	let fixture = fixture(2, 2);

	for round in 0..3 {
		let mut proof = fixture.proof.clone();
		proof.round_proofs[round].colinear_values[1] += F::ONE;
		assert!(!fixture.verify(&proof), "round={round}");
	}
}

#[test]
fn test_reject_modified_final_polynomial() {
	let fixture = fixture(3, 2);

	let mut proof = fixture.proof.clone();
	let mut coeffs = proof.final_polynomials[0].coeffs().to_vec();
	coeffs[0] += F::ONE;
	proof.final_polynomials[0] = Polynomial::new(coeffs);
	assert!(!fixture.verify(&proof));
}

#[test]
fn test_reject_broken_structure() {
	let fixture = fixture(4, 2);

	// a different target commitment
	let mut proof = fixture.proof.clone();
	proof.target_commitment.root[0] ^= 1;
	assert!(!fixture.verify(&proof));

	// missing round
	let mut proof = fixture.proof.clone();
	proof.round_proofs.pop();
	assert!(!fixture.verify(&proof));

	// missing final polynomial
	let mut proof = fixture.proof.clone();
	proof.final_polynomials.pop();
	assert!(!fixture.verify(&proof));

	// truncated batch in a round
	let mut proof = fixture.proof.clone();
	proof.round_proofs[1].colinear_values.pop();
	assert!(!fixture.verify(&proof));

	// opening relabelled to a different leaf
	let mut proof = fixture.proof.clone();
	proof.round_proofs[0].sibling_openings[1].index ^= 1;
	assert!(!fixture.verify(&proof));

	// swapped sibling pair
	let mut proof = fixture.proof.clone();
	proof.round_proofs[1].sibling_values.swap(0, 1);
	proof.round_proofs[1].sibling_openings.swap(0, 1);
	assert!(!fixture.verify(&proof));

	// rounds out of order
	let mut proof = fixture.proof.clone();
	proof.round_proofs.swap(1, 2);
	assert!(!fixture.verify(&proof));
}

#[test]
fn test_reject_degree_above_bound() {
	let mut rng = StdRng::seed_from_u64(5);
	let factory = TwoAdicDomainFactory::<F>::default();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());

	// Both parameter sets share the domain chain and therefore the transcript, and only differ
	// in the degree bound: 7 for the final polynomials of `loose` and 3 for `strict`.
	let loose = FRIParams::with_log_inv_rate(factory.clone(), 31, 1, 3).unwrap();
	let strict =
		FRIParams::new(factory.clone(), loose.domains().to_vec(), 15, FOLD_ARITY).unwrap();
	assert_eq!(loose.final_degree_bound(), 7);
	assert_eq!(strict.final_degree_bound(), 3);

	// Two folds take degree 16 to degree 4, with the leading coefficient preserved.
	let mut coeffs = random_coeffs(&mut rng, 17);
	coeffs[16] = F::ONE;
	let g = vec![PolyDFS::from_coefficients(&coeffs, &factory).unwrap()];
	let instance = Instance {
		f: g.clone(),
		g,
		u: vec![Polynomial::zero()],
		v: vec![Polynomial::constant(F::ONE)],
	};

	let proof = prove(&loose, &merkle_prover, instance.f.clone(), &instance.g);
	assert_eq!(proof.final_polynomials[0].degree(), 4);

	assert!(verify_shared(&loose, &merkle_prover, &proof, &instance));
	assert!(!verify_shared(&strict, &merkle_prover, &proof, &instance));
}

#[test]
fn test_prover_rejects_degree_above_max() {
	let mut rng = StdRng::seed_from_u64(6);
	let factory = TwoAdicDomainFactory::<F>::default();
	let params = FRIParams::with_log_inv_rate(factory.clone(), 15, 1, 3).unwrap();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());

	let g = vec![PolyDFS::from_coefficients(&random_coeffs(&mut rng, 17), &factory).unwrap()];
	let precommitment =
		precommit(&merkle_prover, &g, params.domain_factory(), params.log_len()).unwrap();
	assert_matches!(
		proof_eval(g.clone(), &g, &precommitment, &params, &merkle_prover, &mut transcript()),
		Err(Error::InvalidArgs(_))
	);
}

#[test]
fn test_prover_argument_checks() {
	let mut rng = StdRng::seed_from_u64(7);
	let factory = TwoAdicDomainFactory::<F>::default();
	let params = FRIParams::with_log_inv_rate(factory.clone(), 15, 1, 3).unwrap();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());
	let instance = quotient_instance(&mut rng, &factory, 2, 15, true);

	let precommitment =
		precommit(&merkle_prover, &instance.g, params.domain_factory(), params.log_len()).unwrap();
	assert_matches!(
		proof_eval(
			instance.f[..1].to_vec(),
			&instance.g,
			&precommitment,
			&params,
			&merkle_prover,
			&mut transcript()
		),
		Err(Error::BatchSizeMismatch {
			expected: 2,
			actual: 1
		})
	);

	// committed over a larger domain than the first one of the chain
	let large =
		precommit(&merkle_prover, &instance.g, params.domain_factory(), params.log_len() + 1)
			.unwrap();
	assert_matches!(
		proof_eval(
			instance.f.clone(),
			&instance.g,
			&large,
			&params,
			&merkle_prover,
			&mut transcript()
		),
		Err(Error::InvalidArgs(_))
	);

	assert_matches!(
		precommit(&merkle_prover, &Vec::<PolyDFS<F>>::new(), params.domain_factory(), params.log_len()),
		Err(Error::InvalidArgs(_))
	);
}

#[test]
fn test_commit_matches_precommitment() {
	let mut rng = StdRng::seed_from_u64(8);
	let factory = TwoAdicDomainFactory::<F>::default();
	let merkle_prover = MerkleProver::new(Groestl256Compression::default());
	let instance = quotient_instance(&mut rng, &factory, 3, 15, true);

	let precommitment = precommit(&merkle_prover, &instance.g, &factory, 6).unwrap();
	assert_eq!(precommitment.batch_size(), 3);
	assert_eq!(commit(&precommitment).depth, 6);
	assert_eq!(
		commit_batch(&merkle_prover, &instance.g, &factory, 6).unwrap(),
		commit(&precommitment)
	);
	assert!(merkle_prover
		.scheme()
		.verify_opening(
			0,
			&instance.g.iter().map(|poly| poly[0]).collect::<Vec<_>>(),
			6,
			&commit(&precommitment).root,
			&merkle_prover.prove_opening(precommitment.committed(), 0).unwrap(),
		)
		.is_ok());
}

#[test]
fn test_determinism() {
	let fixture = fixture(9, 2);

	let reproof = prove(
		&fixture.params,
		&fixture.merkle_prover,
		fixture.instance.f.clone(),
		&fixture.instance.g,
	);
	assert_eq!(reproof, fixture.proof);

	let mut first = transcript();
	let mut second = transcript();
	let accept_first = verify_eval(
		&fixture.proof,
		&fixture.params,
		fixture.merkle_prover.scheme(),
		&fixture.instance.u,
		&fixture.instance.v[0],
		&mut first,
	)
	.unwrap();
	let accept_second = verify_eval(
		&fixture.proof,
		&fixture.params,
		fixture.merkle_prover.scheme(),
		&fixture.instance.u,
		&fixture.instance.v[0],
		&mut second,
	)
	.unwrap();
	assert!(accept_first && accept_second);
	assert_eq!(first.challenge::<F>(), second.challenge::<F>());
	assert_eq!(first.int_challenge(), second.int_challenge());

	// A rejected proof is rejected every time.
	let mut proof = fixture.proof.clone();
	proof.round_proofs[0].colinear_values[0] += F::ONE;
	assert!(!fixture.verify(&proof));
	assert!(!fixture.verify(&proof));
}

#[test]
fn test_vanishing_divisor_is_rejected() {
	let fixture = fixture(11, 1);
	let proof = &fixture.proof;

	// A divisor vanishing at the first round-0 query point.
	let x = fixture.params.domains()[0].element(proof.round_proofs[0].sibling_openings[0].index);
	let divisor = Polynomial::new(vec![-x, F::ONE]);
	assert!(!verify_eval(
		proof,
		&fixture.params,
		fixture.merkle_prover.scheme(),
		&fixture.instance.u,
		&divisor,
		&mut transcript(),
	)
	.unwrap());
}

#[test]
fn test_constant_polynomial_over_fp97() {
	// 33 has order 8 modulo 97
	let factory = TwoAdicDomainFactory::new(Fp97::from(33), 3).unwrap();
	let domains = (1..=3)
		.rev()
		.map(|log_size| factory.create(log_size).unwrap())
		.collect::<Vec<_>>();
	let params = FRIParams::new(factory.clone(), domains, 3, FOLD_ARITY).unwrap();
	assert_eq!(params.n_rounds(), 3);

	let merkle_prover = MerkleProver::<Fp97>::new(Groestl256Compression::default());
	let p = PolyDFS::from_coefficients(&[Fp97::from(5)], &factory).unwrap();
	let g = vec![p];

	let proof = prove(&params, &merkle_prover, g.clone(), &g);
	assert_eq!(proof.final_polynomials, vec![Polynomial::constant(Fp97::from(5))]);
	for round_proof in &proof.round_proofs {
		assert_eq!(round_proof.sibling_values, [vec![Fp97::from(5)], vec![Fp97::from(5)]]);
		assert_eq!(round_proof.colinear_values, vec![Fp97::from(5)]);
	}

	assert!(verify_eval(
		&proof,
		&params,
		merkle_prover.scheme(),
		&[Polynomial::zero()],
		&Polynomial::constant(Fp97::ONE),
		&mut transcript(),
	)
	.unwrap());
}
