//! Diff engine boundary.
//!
//! The viewer never looks at how a comparison was produced. It receives a
//! `DiffResult` (an ordered list of keep pairs and replacement hunks, lines
//! still carrying their original terminators) and walks it through the
//! push-style `ReplacementHandler` visitor.
//!
//! Group semantics:
//! * `Keep` holds one line from each side. Either side may be absent; the
//!   handler decides what to do with a half-present pair.
//! * `Replacement` holds the two line lists of one hunk. A pure insertion
//!   has an empty `from`, a pure deletion an empty `to`.
//!
//! `engine` computes results with `similar`; `files` applies the
//! file-access policy (unreadable input yields an empty result).

mod engine;
mod error;
mod files;

pub use engine::{DiffAlgorithm, diff_texts};
pub use error::DiffError;
pub use files::{diff_files, open_pair};

/// One group of a line-level diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffGroup {
    Keep {
        original: Option<String>,
        modified: Option<String>,
    },
    Replacement {
        from: Vec<String>,
        to: Vec<String>,
    },
}

impl DiffGroup {
    pub fn keep(original: impl Into<String>, modified: impl Into<String>) -> Self {
        DiffGroup::Keep {
            original: Some(original.into()),
            modified: Some(modified.into()),
        }
    }

    pub fn replacement<F, T>(from: F, to: T) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        DiffGroup::Replacement {
            from: from.into_iter().map(Into::into).collect(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// Visitor over a `DiffResult`, invoked once per group in order.
pub trait ReplacementHandler {
    fn on_replacement(&mut self, from: &[String], to: &[String]);
    fn on_keep(&mut self, original: Option<&str>, modified: Option<&str>);
}

/// Ordered, read-only diff result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    groups: Vec<DiffGroup>,
}

impl DiffResult {
    pub fn new(groups: Vec<DiffGroup>) -> Self {
        Self { groups }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn groups(&self) -> &[DiffGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Walk every group through `handler`, in diff order.
    pub fn accept_replacement_handler<H>(&self, handler: &mut H)
    where
        H: ReplacementHandler + ?Sized,
    {
        for group in &self.groups {
            match group {
                DiffGroup::Keep { original, modified } => {
                    handler.on_keep(original.as_deref(), modified.as_deref())
                }
                DiffGroup::Replacement { from, to } => handler.on_replacement(from, to),
            }
        }
    }

    /// True when no group carries a change.
    pub fn is_identical(&self) -> bool {
        self.groups
            .iter()
            .all(|g| matches!(g, DiffGroup::Keep { .. }))
    }
}
