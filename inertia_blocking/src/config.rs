// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stack configuration: which elements are never inerted.

use crate::types::DocumentTree;

/// Local names that are never inertable by default.
///
/// Toggling interactivity on these elements is meaningless: they do not render.
pub const DEFAULT_NON_INERTABLE: &[&str] = &["style", "template", "script"];

/// Configuration for [`BlockingElements`](crate::stack::BlockingElements).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockingConfig {
    /// Local names excluded from inerting and restoration bookkeeping.
    /// Compared ASCII case-insensitively.
    pub non_inertable: &'static [&'static str],
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            non_inertable: DEFAULT_NON_INERTABLE,
        }
    }
}

impl BlockingConfig {
    /// Replace the non-inertable name list.
    #[must_use]
    pub fn with_non_inertable(mut self, names: &'static [&'static str]) -> Self {
        self.non_inertable = names;
        self
    }

    /// Whether the stack may set or clear `inert` on `node`.
    ///
    /// Only elements are inertable, and only when their local name is not listed.
    pub fn is_inertable<D: DocumentTree + ?Sized>(&self, doc: &D, node: &D::Node) -> bool {
        if !doc.is_element(node) {
            return false;
        }
        doc.local_name(node).is_none_or(|name| {
            !self
                .non_inertable
                .iter()
                .any(|n| n.eq_ignore_ascii_case(name))
        })
    }
}
