// Copyright 2023-2025 Irreducible Inc.

//! Hash functions and two-to-one compression functions used to build Merkle commitments.
//!
//! The crate re-exports [Grøstl-256] from RustCrypto and SHA-256 from `sha2`, and provides
//! digest-sized compression functions for both that implement the Plonky3
//! [`PseudoCompressionFunction`] interface.
//!
//! [Grøstl-256]: <https://www.groestl.info/>

pub mod compression;
pub mod serialization;

pub use compression::*;
pub use digest::{Digest, Output};
pub use groestl_crypto::Groestl256;
pub use p3_symmetric::{CompressionFunction, PseudoCompressionFunction};
pub use serialization::*;
pub use sha2::Sha256;
