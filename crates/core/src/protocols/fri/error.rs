// Copyright 2024 Irreducible Inc.

use crate::{merkle_tree, transcript};

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("invalid FRI parameters: {0}")]
	ParameterError(String),
	#[error("conflicting or incorrect argument: {0}")]
	InvalidArgs(String),
	#[error("fold arity {arity} is not supported, only 2 is")]
	UnsupportedFoldArity { arity: usize },
	#[error("batch size mismatch: expected {expected}, got {actual}")]
	BatchSizeMismatch { expected: usize, actual: usize },
	#[error("each domain must have half the size of the previous one and be generated by the square of its generator")]
	DomainChainNotDescending,
	#[error("math error: {0}")]
	Math(#[from] zkfri_math::Error),
	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),
	#[error("transcript error: {0}")]
	Transcript(#[from] transcript::Error),
	#[error("verification error: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the proof has {actual} round proofs, expected {expected}")]
	IncorrectRoundCount { expected: usize, actual: usize },
	#[error("the number of values in {location} is incorrect, expected {expected}")]
	IncorrectBatchLength {
		location: &'static str,
		expected: usize,
	},
	#[error("the target commitment has depth {actual}, expected {expected}")]
	IncorrectCommitmentDepth { expected: usize, actual: usize },
	#[error("the tree root of round {round} does not match the previously committed root")]
	RootMismatch { round: usize },
	#[error("an opening in round {round} is at index {actual}, expected {expected}")]
	IncorrectQueryIndex {
		round: usize,
		expected: usize,
		actual: usize,
	},
	#[error("an opening in round {round} failed Merkle verification: {source}")]
	InvalidOpening {
		round: usize,
		#[source]
		source: merkle_tree::Error,
	},
	#[error("the queried values of round {round} do not match the folded values of the previous round")]
	InconsistentQueryValues { round: usize },
	#[error("the divisor vanishes at the query point of polynomial {index}")]
	VanishingDivisor { index: usize },
	#[error("incorrect folding in round {round} for polynomial {index}")]
	IncorrectFold { round: usize, index: usize },
	#[error("final polynomial {index} has degree {degree}, which exceeds the bound {bound}")]
	FinalDegreeExceeded {
		index: usize,
		degree: usize,
		bound: usize,
	},
	#[error("the final polynomials do not match the last committed tree")]
	FinalCommitmentMismatch,
}
