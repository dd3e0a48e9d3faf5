// Copyright 2024 Irreducible Inc.

//! Batched FRI low-degree test over two-adic prime fields.
//!
//! FRI is an IOP of Proximity for Reed–Solomon codes, introduced in [BBHR17]. The prover holds a
//! batch of polynomials, each stored by its evaluations over a multiplicative subgroup `D[0]`,
//! and commits to the interleaved evaluations with a Merkle tree whose leaves are the rows
//! `(f_0(x), f_1(x), ..., f_{b-1}(x))`.
//!
//! Each fold round takes a challenge `α` and halves the domain,
//!
//! ```text
//! f'(x^2) = (f(x) + f(-x)) / 2 + α (f(x) - f(-x)) / (2x),
//! ```
//!
//! which also halves the degree. The folded batch is committed again, and after `r - 1` rounds
//! the surviving polynomials are sent in the clear in coefficient form.
//!
//! A single query chain is opened: the query index is drawn once, after the initial commitment,
//! and every round opens the query point and its negation in the current tree plus the folded
//! value in the next tree. The verifier checks that each opened pair and the folded value are
//! colinear at `α`.
//!
//! The committed batch `g` does not have to be the batch being folded. The caller supplies
//! polynomials `U` and `V` and the verifier maps every round-0 value through
//! `(y - U(x)) / V(x)`; the prover folds the corresponding quotients `f = (g - U) / V`.
//!
//! [BBHR17]: <https://eccc.weizmann.ac.il/report/2017/134/>

mod common;
mod error;
mod prove;
#[cfg(test)]
mod tests;
mod verify;

pub use common::{FRIParams, FRIProof, Precommitment, RoundProof, FOLD_ARITY};
pub use error::*;
pub use prove::*;
pub use verify::*;
