// Copyright 2024 Irreducible Inc.

use digest::{core_api::BlockSizeUser, Digest, Output};
use getset::Getters;
use tracing::instrument;
use zkfri_hash::PseudoCompressionFunction;
use zkfri_utils::SerializeBytes;

use super::{
	binary_merkle_tree::{self, BinaryMerkleTree},
	errors::Error,
	merkle_tree_vcs::{Commitment, MerkleProof, MerkleTreeProver},
	scheme::BinaryMerkleTreeScheme,
};

#[derive(Debug, Getters)]
pub struct BinaryMerkleTreeProver<T, H, C> {
	#[getset(get = "pub")]
	scheme: BinaryMerkleTreeScheme<T, H, C>,
}

impl<T, H, C> BinaryMerkleTreeProver<T, H, C> {
	pub fn new(compression: C) -> Self {
		Self {
			scheme: BinaryMerkleTreeScheme::new(compression),
		}
	}
}

impl<T, H, C> MerkleTreeProver<T> for BinaryMerkleTreeProver<T, H, C>
where
	T: SerializeBytes + Sync,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	type Scheme = BinaryMerkleTreeScheme<T, H, C>;
	type Committed = BinaryMerkleTree<Output<H>>;

	fn scheme(&self) -> &Self::Scheme {
		&self.scheme
	}

	#[instrument(skip_all, level = "debug", fields(len = data.len(), batch_size = batch_size))]
	fn commit(
		&self,
		data: &[T],
		batch_size: usize,
	) -> Result<(Commitment<Output<H>>, Self::Committed), Error> {
		let tree =
			binary_merkle_tree::build::<_, H, _>(self.scheme.compression(), data, batch_size)?;

		let commitment = Commitment {
			root: tree.root(),
			depth: tree.log_len,
		};

		Ok((commitment, tree))
	}

	fn prove_opening(
		&self,
		committed: &Self::Committed,
		index: usize,
	) -> Result<MerkleProof<Output<H>>, Error> {
		Ok(MerkleProof {
			index,
			branch: committed.branch(index)?,
		})
	}
}
