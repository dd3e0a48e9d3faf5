// Copyright 2024 Irreducible Inc.

mod binary_merkle_tree;
mod errors;
mod merkle_tree_vcs;
mod prover;
mod scheme;

pub use binary_merkle_tree::BinaryMerkleTree;
pub use errors::{Error, VerificationError};
pub use merkle_tree_vcs::{Commitment, MerkleProof, MerkleTreeProver, MerkleTreeScheme};
pub use prover::BinaryMerkleTreeProver;
pub use scheme::BinaryMerkleTreeScheme;
