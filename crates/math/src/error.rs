// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("argument {arg} does not have expected length {expected}")]
	IncorrectArgumentLength { arg: String, expected: usize },
	#[error("domain size is larger than the order of the root of unity")]
	DomainSizeTooLarge,
	#[error("the element is not a primitive root of unity of order 2^{log_order}")]
	InvalidRootOfUnity { log_order: usize },
	#[error("duplicate point in domain")]
	DuplicateDomainPoint,
	#[error("size {size} is not a power of two")]
	NotPowerOfTwo { size: usize },
	#[error("degree {degree} cannot be represented on a domain of size {size}")]
	DegreeExceedsSize { degree: usize, size: usize },
	#[error("division by the zero polynomial")]
	DivisionByZero,
}
