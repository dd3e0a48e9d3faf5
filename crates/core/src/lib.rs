// Copyright 2023-2025 Irreducible Inc.

//! Batched FRI low-degree testing over two-adic prime fields.
//!
//! The crate is organised bottom-up: a hash-chain Fiat-Shamir [`transcript`], a binary
//! [`merkle_tree`] vector commitment over rows of field elements, and the
//! [`protocols::fri`] prover and verifier built on top of both.

pub mod merkle_tree;
pub mod protocols;
pub mod transcript;
