// Copyright 2024-2025 Irreducible Inc.

use std::marker::PhantomData;

use digest::{Digest, Output};
use groestl_crypto::Groestl256;
use sha2::Sha256;
use p3_symmetric::{CompressionFunction, PseudoCompressionFunction};

/// Compresses two digests by hashing their concatenation, `H(left || right)`.
#[derive(Debug)]
pub struct DigestCompression<H> {
	_marker: PhantomData<fn() -> H>,
}

impl<H> Default for DigestCompression<H> {
	fn default() -> Self {
		Self {
			_marker: PhantomData,
		}
	}
}

impl<H> Clone for DigestCompression<H> {
	fn clone(&self) -> Self {
		Self::default()
	}
}

impl<H: Digest> PseudoCompressionFunction<Output<H>, 2> for DigestCompression<H> {
	fn compress(&self, input: [Output<H>; 2]) -> Output<H> {
		H::new()
			.chain_update(input[0].as_slice())
			.chain_update(input[1].as_slice())
			.finalize()
	}
}

impl<H: Digest> CompressionFunction<Output<H>, 2> for DigestCompression<H> {}

/// One-way compression function that compresses two 32-byte strings into a single 32-byte string.
pub type Groestl256Compression = DigestCompression<Groestl256>;

pub type Sha256Compression = DigestCompression<Sha256>;
