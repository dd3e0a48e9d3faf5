// Copyright 2023-2024 Irreducible Inc.

//! Prime field arithmetic for the FRI toolkit.
//!
//! Fields are described by the [`Field`], [`PrimeField`] and [`TwoAdicField`] traits. The
//! generic [`Fp`] type implements all of them for any prime modulus below `2^64`, with the
//! constants supplied through an [`FpParams`] implementation rather than hard-coded tables.

pub mod error;
pub mod field;
pub mod prime_field;

pub use error::*;
pub use field::{Field, PrimeField, TwoAdicField};
pub use prime_field::*;
