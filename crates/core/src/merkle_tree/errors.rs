// Copyright 2024 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Length of the input vector is incorrect, expected {expected}")]
	IncorrectVectorLen { expected: usize },
	#[error("Index exceeds Merkle tree base size: {max}")]
	IndexOutOfRange { max: usize },
	#[error("values length must be a non-zero multiple of the batch size")]
	IncorrectBatchSize,
	#[error("The argument length must be a power of two.")]
	PowerOfTwoLengthRequired,
	#[error("tree depth {log_len} exceeds the maximum depth {max}")]
	DepthOutOfRange { log_len: usize, max: usize },
	#[error("serialization error: {0}")]
	Serialization(#[from] zkfri_utils::serialization::Error),
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error)]
pub enum VerificationError {
	#[error("the shape of the proof is incorrect")]
	IncorrectProofShape,
	#[error("the proof opens index {actual}, expected {expected}")]
	IncorrectIndex { expected: usize, actual: usize },
	#[error("the proof is invalid")]
	InvalidProof,
}
