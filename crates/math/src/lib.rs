// Copyright 2024-2025 Irreducible Inc.

//! Univariate polynomial arithmetic over two-adic prime fields.
//!
//! The crate offers two representations: [`Polynomial`], a coefficient vector, and
//! [`PolyDFS`], the values of a degree-bounded polynomial over a power-of-two multiplicative
//! subgroup. Conversions between them go through the radix-2 FFT of an [`EvaluationDomain`],
//! which is handed out by an [`EvaluationDomainFactory`].

mod domain;
mod error;
mod poly_dfs;
mod polynomial;
mod radix2;

pub use domain::*;
pub use error::*;
pub use poly_dfs::*;
pub use polynomial::*;
