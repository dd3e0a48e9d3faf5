// Copyright 2024 Irreducible Inc.

use std::{array, fmt::Debug, marker::PhantomData};

use digest::{core_api::BlockSizeUser, Digest, Output};
use getset::Getters;
use zkfri_hash::{hash_serialize, PseudoCompressionFunction};
use zkfri_utils::{bail, SerializeBytes};

use super::{
	errors::{Error, VerificationError},
	merkle_tree_vcs::{MerkleProof, MerkleTreeScheme},
};

#[derive(Debug, Getters)]
pub struct BinaryMerkleTreeScheme<T, H, C> {
	#[getset(get = "pub")]
	compression: C,
	// This makes it so that `BinaryMerkleTreeScheme` remains Send + Sync
	// See https://doc.rust-lang.org/nomicon/phantom-data.html#table-of-phantomdata-patterns
	_phantom: PhantomData<fn() -> (T, H)>,
}

impl<T, H, C> BinaryMerkleTreeScheme<T, H, C> {
	pub fn new(compression: C) -> Self {
		BinaryMerkleTreeScheme {
			compression,
			_phantom: PhantomData,
		}
	}
}

impl<T, H, C> MerkleTreeScheme<T> for BinaryMerkleTreeScheme<T, H, C>
where
	T: SerializeBytes + Sync,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	type Digest = Output<H>;

	fn proof_size(&self, log_len: usize) -> Result<usize, Error> {
		let max = usize::BITS as usize - 1;
		if log_len > max {
			bail!(Error::DepthOutOfRange { log_len, max });
		}
		Ok(log_len * <H as Digest>::output_size())
	}

	fn verify_vector(
		&self,
		root: &Self::Digest,
		data: &[T],
		batch_size: usize,
	) -> Result<(), Error> {
		if batch_size == 0 || data.len() % batch_size != 0 {
			bail!(Error::IncorrectBatchSize);
		}

		let mut digests = data
			.chunks(batch_size)
			.map(|row| hash_serialize::<T, H>(row))
			.collect::<Result<Vec<_>, _>>()?;

		fold_digests_vector_inplace(&self.compression, &mut digests)?;
		if digests[0] != *root {
			bail!(VerificationError::InvalidProof)
		}
		Ok(())
	}

	fn verify_opening(
		&self,
		index: usize,
		values: &[T],
		tree_depth: usize,
		root: &Self::Digest,
		proof: &MerkleProof<Self::Digest>,
	) -> Result<(), Error> {
		if proof.index != index {
			bail!(VerificationError::IncorrectIndex {
				expected: index,
				actual: proof.index,
			});
		}

		if tree_depth >= usize::BITS as usize || tree_depth != proof.branch.len() {
			bail!(VerificationError::IncorrectProofShape)
		}

		if index > (1 << tree_depth) - 1 {
			bail!(Error::IndexOutOfRange {
				max: (1 << tree_depth) - 1,
			});
		}

		let leaf_digest = hash_serialize::<T, H>(values)?;

		let mut index = index;
		let computed_root = proof
			.branch
			.iter()
			.fold(leaf_digest, |node, branch_node| {
				let next_node = if index & 1 == 0 {
					self.compression.compress([node, branch_node.clone()])
				} else {
					self.compression.compress([branch_node.clone(), node])
				};
				index >>= 1;
				next_node
			});

		if computed_root != *root {
			bail!(VerificationError::InvalidProof)
		}
		Ok(())
	}
}

// Merkle-tree-like folding
fn fold_digests_vector_inplace<C, D>(compression: &C, digests: &mut [D]) -> Result<(), Error>
where
	C: PseudoCompressionFunction<D, 2> + Sync,
	D: Clone + Send + Sync + Debug,
{
	if !digests.len().is_power_of_two() {
		bail!(Error::PowerOfTwoLengthRequired);
	}

	let mut len = digests.len() / 2;

	while len != 0 {
		for i in 0..len {
			digests[i] = compression.compress(array::from_fn(|j| digests[2 * i + j].clone()));
		}
		len /= 2;
	}

	Ok(())
}
