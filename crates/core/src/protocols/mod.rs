// Copyright 2024 Irreducible Inc.

pub mod fri;
