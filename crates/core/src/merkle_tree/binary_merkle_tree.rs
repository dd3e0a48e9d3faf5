// Copyright 2024-2025 Irreducible Inc.

use std::{array, mem::MaybeUninit};

use digest::{core_api::BlockSizeUser, Digest, Output};
use p3_util::log2_strict_usize;
use rayon::prelude::*;
use tracing::instrument;
use zkfri_hash::{hash_serialize, PseudoCompressionFunction};
use zkfri_utils::{bail, SerializeBytes};

use super::errors::Error;

/// A binary Merkle tree that commits batches of vectors.
///
/// The input is a row-major matrix with `batch_size` columns. Each row is serialized and hashed
/// into one leaf digest, then a Merkle tree is constructed over the leaf digests. The number of
/// rows must be a power of two.
#[derive(Debug, Clone)]
pub struct BinaryMerkleTree<D> {
	/// Base-2 logarithm of the number of leaves
	pub log_len: usize,
	/// The inner nodes, arranged as a flattened array of layers with the root at the end
	pub inner_nodes: Vec<D>,
}

#[instrument("BinaryMerkleTree::build", skip_all, level = "debug")]
pub fn build<T, H, C>(
	compression: &C,
	elements: &[T],
	batch_size: usize,
) -> Result<BinaryMerkleTree<Output<H>>, Error>
where
	T: SerializeBytes + Sync,
	H: Digest + BlockSizeUser,
	C: PseudoCompressionFunction<Output<H>, 2> + Sync,
{
	if batch_size == 0 || elements.len() % batch_size != 0 {
		bail!(Error::IncorrectBatchSize);
	}

	let len = elements.len() / batch_size;

	if !len.is_power_of_two() {
		bail!(Error::PowerOfTwoLengthRequired);
	}

	let log_len = log2_strict_usize(len);

	internal_build(
		compression,
		|inner_nodes| hash_interleaved::<_, H>(elements, inner_nodes),
		log_len,
	)
}

fn internal_build<Digest, C>(
	compression: &C,
	// Must either successfully initialize the passed in slice or return error
	hash_leaves: impl FnOnce(&mut [MaybeUninit<Digest>]) -> Result<(), Error>,
	log_len: usize,
) -> Result<BinaryMerkleTree<Digest>, Error>
where
	Digest: Clone + Send + Sync,
	C: PseudoCompressionFunction<Digest, 2> + Sync,
{
	let total_length = (1 << (log_len + 1)) - 1;
	let mut inner_nodes = Vec::with_capacity(total_length);

	hash_leaves(&mut inner_nodes.spare_capacity_mut()[..(1 << log_len)])?;

	let (prev_layer, mut remaining) = inner_nodes.spare_capacity_mut().split_at_mut(1 << log_len);

	let mut prev_layer = unsafe {
		// SAFETY: prev-layer was initialized by hash_leaves
		slice_assume_init_mut(prev_layer)
	};
	for i in 1..(log_len + 1) {
		let (next_layer, next_remaining) = remaining.split_at_mut(1 << (log_len - i));
		remaining = next_remaining;

		compress_layer(compression, prev_layer, next_layer);

		prev_layer = unsafe {
			// SAFETY: next_layer was just initialized by compress_layer
			slice_assume_init_mut(next_layer)
		};
	}

	unsafe {
		// SAFETY: inner_nodes should be entirely initialized by now
		// Note that we don't incrementally update inner_nodes.len() since
		// that doesn't play well with using split_at_mut on spare capacity.
		inner_nodes.set_len(total_length);
	}
	Ok(BinaryMerkleTree {
		log_len,
		inner_nodes,
	})
}

impl<D: Clone> BinaryMerkleTree<D> {
	pub fn root(&self) -> D {
		// The root is the single node of the last layer, which always exists.
		self.inner_nodes[self.inner_nodes.len() - 1].clone()
	}

	/// The leaf digests, in index order.
	pub fn leaves(&self) -> &[D] {
		&self.inner_nodes[..1 << self.log_len]
	}

	/// Get a Merkle branch for the given index
	///
	/// Throws if the index is out of range
	pub fn branch(&self, index: usize) -> Result<Vec<D>, Error> {
		if index >= 1 << self.log_len {
			bail!(Error::IndexOutOfRange {
				max: (1 << self.log_len) - 1,
			});
		}

		let branch = (0..self.log_len)
			.map(|j| {
				let node_index = (((1 << j) - 1) << (self.log_len + 1 - j)) | (index >> j) ^ 1;
				self.inner_nodes[node_index].clone()
			})
			.collect();

		Ok(branch)
	}
}

#[tracing::instrument("MerkleTree::compress_layer", skip_all, level = "trace")]
fn compress_layer<D, C>(compression: &C, prev_layer: &[D], next_layer: &mut [MaybeUninit<D>])
where
	D: Clone + Send + Sync,
	C: PseudoCompressionFunction<D, 2> + Sync,
{
	prev_layer
		.par_chunks_exact(2)
		.zip(next_layer.par_iter_mut())
		.for_each(|(prev_pair, next_digest)| {
			next_digest.write(compression.compress(array::from_fn(|i| prev_pair[i].clone())));
		})
}

/// Hashes the elements in chunks of a vector into digests.
///
/// Given a vector of elements and an output buffer of N hash digests, this splits the elements
/// into N equal-sized chunks and hashes each chunk into the corresponding output digest.
#[tracing::instrument("hash_interleaved", skip_all, level = "trace")]
fn hash_interleaved<T, H>(elems: &[T], digests: &mut [MaybeUninit<Output<H>>]) -> Result<(), Error>
where
	T: SerializeBytes + Sync,
	H: Digest + BlockSizeUser,
{
	if digests.is_empty() || elems.len() % digests.len() != 0 {
		bail!(Error::IncorrectVectorLen {
			expected: digests.len(),
		});
	}

	let chunk_size = elems.len() / digests.len();
	if chunk_size == 0 {
		bail!(Error::IncorrectBatchSize);
	}

	digests
		.par_iter_mut()
		.zip(elems.par_chunks(chunk_size))
		.try_for_each(|(out, chunk)| -> Result<(), Error> {
			out.write(hash_serialize::<T, H>(chunk)?);
			Ok(())
		})
}

/// This can be removed when MaybeUninit::slice_assume_init_mut is stabilized
/// <https://github.com/rust-lang/rust/issues/63569>
///
/// # Safety
///
/// It is up to the caller to guarantee that the `MaybeUninit<T>` elements
/// really are in an initialized state.
/// Calling this when the content is not yet fully initialized causes undefined behavior.
unsafe fn slice_assume_init_mut<T>(slice: &mut [MaybeUninit<T>]) -> &mut [T] {
	&mut *(slice as *mut [MaybeUninit<T>] as *mut [T])
}
