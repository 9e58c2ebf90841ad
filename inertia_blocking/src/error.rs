// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors returned by [`BlockingElements::push`](crate::stack::BlockingElements::push).

use thiserror::Error;

/// Why a node cannot become the blocking element.
///
/// Redundant operations (pushing the current top, removing an absent node)
/// are not errors; they are silently ignored.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum BlockingError {
    /// The node's ancestor walk ends before reaching the document root.
    #[error("non-connected element cannot be a blocking element")]
    Unattached,
    /// Text nodes and shadow roots cannot block; only elements can.
    #[error("only elements can be blocking elements")]
    NotElement,
    /// The document root has no siblings to inert and cannot block.
    #[error("the document root cannot be a blocking element")]
    DocumentRoot,
}
