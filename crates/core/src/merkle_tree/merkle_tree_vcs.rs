// Copyright 2024 Irreducible Inc.

use std::fmt::Debug;

use zkfri_utils::SerializeBytes;

use super::errors::Error;

/// A Merkle tree commitment.
///
/// This struct includes the depth of the tree to guard against attacks that exploit the
/// indistinguishability of leaf digests from inner node digests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commitment<Digest> {
	/// The root digest of the Merkle tree.
	pub root: Digest,
	/// The depth of the Merkle tree.
	pub depth: usize,
}

/// An inclusion proof for a single leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<Digest> {
	/// Index of the opened leaf.
	pub index: usize,
	/// Sibling digests from the leaf layer up to, but excluding, the root.
	pub branch: Vec<Digest>,
}

/// A Merkle tree scheme.
pub trait MerkleTreeScheme<T>: Sync {
	type Digest: Clone + PartialEq + Eq + Debug + Send + Sync + SerializeBytes;

	/// Returns the size in bytes of one opening proof for a tree with `2^log_len` leaves.
	fn proof_size(&self, log_len: usize) -> Result<usize, Error>;

	/// Verify the opening of the full vector.
	fn verify_vector(
		&self,
		root: &Self::Digest,
		data: &[T],
		batch_size: usize,
	) -> Result<(), Error>;

	/// Verify an opening proof for the leaf at `index` holding `values`, against the root of a
	/// tree of depth `tree_depth`.
	fn verify_opening(
		&self,
		index: usize,
		values: &[T],
		tree_depth: usize,
		root: &Self::Digest,
		proof: &MerkleProof<Self::Digest>,
	) -> Result<(), Error>;
}

/// A Merkle tree prover for a particular scheme.
///
/// This is separate from [`MerkleTreeScheme`] so that it may embed private state that is not
/// needed by the verifier.
pub trait MerkleTreeProver<T> {
	type Scheme: MerkleTreeScheme<T>;
	/// Data generated during commitment required to generate opening proofs.
	type Committed;

	/// Returns the Merkle tree scheme used by the prover.
	fn scheme(&self) -> &Self::Scheme;

	/// Commit a vector of values.
	///
	/// `data` is split into consecutive rows of `batch_size` values; every row becomes one leaf.
	#[allow(clippy::type_complexity)]
	fn commit(
		&self,
		data: &[T],
		batch_size: usize,
	) -> Result<(Commitment<<Self::Scheme as MerkleTreeScheme<T>>::Digest>, Self::Committed), Error>;

	/// Generate an opening proof for the leaf at `index`.
	fn prove_opening(
		&self,
		committed: &Self::Committed,
		index: usize,
	) -> Result<MerkleProof<<Self::Scheme as MerkleTreeScheme<T>>::Digest>, Error>;
}
