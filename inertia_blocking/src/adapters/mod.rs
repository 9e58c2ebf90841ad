// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Inertia crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(any(test, feature = "tree_adapter"))]
pub mod tree;
