// Copyright 2023-2024 Irreducible Inc.

/// Error thrown when a field operation fails.
#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
	/// Thrown when trying to initialize a field element with a value that is not a canonical
	/// representative modulo the field characteristic.
	#[error("value {value} is not in the field")]
	NotInField { value: u64 },
}
