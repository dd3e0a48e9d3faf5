// Copyright 2024-2025 Irreducible Inc.

//! Fiat-Shamir transcripts.
//!
//! A transcript absorbs every message the prover commits to, in protocol order, and derives the
//! verifier's challenges from everything absorbed so far. Prover and verifier each drive their own
//! transcript; as long as both absorb the same bytes in the same order they derive the same
//! challenges.

mod error;

use std::{mem, slice};

use digest::{Digest, Output};
pub use error::Error;
use p3_challenger::{CanObserve, CanSample, CanSampleBits};
use zkfri_field::PrimeField;
use zkfri_utils::{serialization::serialize_to_vec, SerializeBytes};

/// The challenge interface consumed by the FRI prover and verifier.
#[auto_impl::auto_impl(&mut)]
pub trait Transcript {
	/// Absorbs one message.
	fn absorb(&mut self, data: &[u8]);

	/// Fills `out` with pseudo-random bytes derived from everything absorbed so far.
	fn squeeze(&mut self, out: &mut [u8]);

	/// Absorbs the canonical serialization of `value`.
	fn absorb_serialized(&mut self, value: &impl SerializeBytes) -> Result<(), Error> {
		let bytes = serialize_to_vec(value)?;
		self.absorb(&bytes);
		Ok(())
	}

	/// Derives a field element.
	///
	/// 128 bits are squeezed and reduced modulo `p`, which keeps the bias negligible for moduli
	/// below `2^64`.
	fn challenge<F: PrimeField>(&mut self) -> F {
		let mut bytes = [0u8; 16];
		self.squeeze(&mut bytes);
		F::from_u128(u128::from_le_bytes(bytes))
	}

	/// Derives an unsigned integer, e.g. to pick a query index.
	fn int_challenge(&mut self) -> usize {
		let mut bytes = [0u8; mem::size_of::<usize>()];
		self.squeeze(&mut bytes);
		usize::from_le_bytes(bytes)
	}
}

/// A [`Transcript`] over a hash function.
///
/// Messages are absorbed length-prefixed into a running hash. The first squeeze after an absorb
/// closes the running hash into a seed, and output blocks are `H(seed || counter)`. The next
/// absorb reopens the running hash with the seed and the number of bytes squeezed from it, so
/// every challenge depends on the full history of absorbed messages and squeezed lengths.
#[derive(Debug, Clone)]
pub struct HasherTranscript<H: Digest> {
	hasher: H,
	squeeze_state: Option<SqueezeState<H>>,
}

#[derive(Debug, Clone)]
struct SqueezeState<H: Digest> {
	seed: Output<H>,
	block: Output<H>,
	counter: u64,
	offset: usize,
	squeezed: u64,
}

impl<H: Digest> SqueezeState<H> {
	fn new(seed: Output<H>) -> Self {
		let block = Output::<H>::default();
		Self {
			seed,
			offset: block.len(),
			block,
			counter: 0,
			squeezed: 0,
		}
	}

	fn fill(&mut self, out: &mut [u8]) {
		let mut out = out;
		while !out.is_empty() {
			if self.offset == self.block.len() {
				self.block = H::new()
					.chain_update(&self.seed)
					.chain_update(self.counter.to_le_bytes())
					.finalize();
				self.counter += 1;
				self.offset = 0;
			}

			let n = out.len().min(self.block.len() - self.offset);
			let (head, tail) = mem::take(&mut out).split_at_mut(n);
			head.copy_from_slice(&self.block[self.offset..self.offset + n]);
			self.offset += n;
			self.squeezed += n as u64;
			out = tail;
		}
	}
}

impl<H: Digest> HasherTranscript<H> {
	/// Starts a transcript whose first absorbed message is `domain_separator`.
	///
	/// Distinct protocol instances should use distinct separators so that their challenges are
	/// independent.
	pub fn new(domain_separator: &[u8]) -> Self {
		let mut transcript = Self {
			hasher: H::new(),
			squeeze_state: None,
		};
		transcript.absorb(domain_separator);
		transcript
	}
}

impl<H: Digest> Transcript for HasherTranscript<H> {
	fn absorb(&mut self, data: &[u8]) {
		if let Some(state) = self.squeeze_state.take() {
			Digest::update(&mut self.hasher, &state.seed);
			Digest::update(&mut self.hasher, state.squeezed.to_le_bytes());
		}
		Digest::update(&mut self.hasher, (data.len() as u64).to_le_bytes());
		Digest::update(&mut self.hasher, data);
	}

	fn squeeze(&mut self, out: &mut [u8]) {
		let hasher = &mut self.hasher;
		self.squeeze_state
			.get_or_insert_with(|| SqueezeState::new(mem::replace(hasher, H::new()).finalize()))
			.fill(out);
	}

	fn int_challenge(&mut self) -> usize {
		self.sample_bits(usize::BITS as usize)
	}
}

impl<H: Digest> CanObserve<u8> for HasherTranscript<H> {
	fn observe(&mut self, value: u8) {
		self.absorb(slice::from_ref(&value));
	}

	fn observe_slice(&mut self, values: &[u8]) {
		self.absorb(values);
	}
}

impl<H: Digest> CanSample<u8> for HasherTranscript<H> {
	fn sample(&mut self) -> u8 {
		let mut byte = 0u8;
		self.squeeze(slice::from_mut(&mut byte));
		byte
	}
}

impl<H: Digest> CanSampleBits<usize> for HasherTranscript<H> {
	fn sample_bits(&mut self, bits: usize) -> usize {
		let bits = bits.min(usize::BITS as usize);
		let mut bytes = [0u8; mem::size_of::<usize>()];
		self.squeeze(&mut bytes[..bits.div_ceil(8)]);

		let value = usize::from_le_bytes(bytes);
		match 1usize.checked_shl(bits as u32) {
			Some(bound) => value & (bound - 1),
			None => value,
		}
	}
}
