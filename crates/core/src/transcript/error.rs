// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Serialization error: {0}")]
	Serialization(#[from] zkfri_utils::serialization::Error),
}
