use std::fmt;
use std::str::FromStr;

use similar::{Algorithm, DiffOp, TextDiff};
use tracing::debug;

use crate::{DiffGroup, DiffResult};

/// Line matching strategy handed to `similar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(value: DiffAlgorithm) -> Self {
        match value {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

impl FromStr for DiffAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "myers" => Ok(DiffAlgorithm::Myers),
            "patience" => Ok(DiffAlgorithm::Patience),
            "lcs" => Ok(DiffAlgorithm::Lcs),
            other => Err(format!("unknown diff algorithm `{other}`")),
        }
    }
}

impl fmt::Display for DiffAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiffAlgorithm::Myers => "myers",
            DiffAlgorithm::Patience => "patience",
            DiffAlgorithm::Lcs => "lcs",
        })
    }
}

/// Accumulates the non-equal ops of one maximal run into a single hunk.
#[derive(Default)]
struct PendingHunk {
    from: Vec<String>,
    to: Vec<String>,
}

impl PendingHunk {
    fn flush_into(&mut self, groups: &mut Vec<DiffGroup>) {
        if self.from.is_empty() && self.to.is_empty() {
            return;
        }
        groups.push(DiffGroup::Replacement {
            from: std::mem::take(&mut self.from),
            to: std::mem::take(&mut self.to),
        });
    }
}

fn owned(lines: &[&str]) -> impl Iterator<Item = String> {
    lines.iter().map(|l| (*l).to_string())
}

/// Line-diff two texts. Lines keep their terminators; every equal line
/// becomes a keep pair and each run of changes becomes one replacement.
pub fn diff_texts(old: &str, new: &str, algorithm: DiffAlgorithm) -> DiffResult {
    let diff = TextDiff::configure()
        .algorithm(algorithm.into())
        .diff_lines(old, new);
    let old_lines = diff.old_slices();
    let new_lines = diff.new_slices();

    let mut groups = Vec::new();
    let mut hunk = PendingHunk::default();
    for op in diff.ops() {
        match *op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => {
                hunk.flush_into(&mut groups);
                for i in 0..len {
                    groups.push(DiffGroup::keep(
                        old_lines[old_index + i],
                        new_lines[new_index + i],
                    ));
                }
            }
            DiffOp::Delete {
                old_index, old_len, ..
            } => hunk
                .from
                .extend(owned(&old_lines[old_index..old_index + old_len])),
            DiffOp::Insert {
                new_index, new_len, ..
            } => hunk
                .to
                .extend(owned(&new_lines[new_index..new_index + new_len])),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                hunk.from
                    .extend(owned(&old_lines[old_index..old_index + old_len]));
                hunk.to
                    .extend(owned(&new_lines[new_index..new_index + new_len]));
            }
        }
    }
    hunk.flush_into(&mut groups);

    debug!(
        target: "diff",
        %algorithm,
        old_lines = old_lines.len(),
        new_lines = new_lines.len(),
        groups = groups.len(),
        "diff_computed"
    );
    DiffResult::new(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn single_line_change_between_keeps() {
        let result = diff_texts("a\nb\nc\n", "a\nx\nc\n", DiffAlgorithm::Myers);
        assert_eq!(
            result.groups(),
            &[
                DiffGroup::keep("a\n", "a\n"),
                DiffGroup::replacement(["b\n"], ["x\n"]),
                DiffGroup::keep("c\n", "c\n"),
            ]
        );
    }

    #[test]
    fn pure_insertion_has_empty_from() {
        let result = diff_texts("a\n", "a\nb\nc\n", DiffAlgorithm::Patience);
        assert_eq!(
            result.groups(),
            &[
                DiffGroup::keep("a\n", "a\n"),
                DiffGroup::replacement(Vec::<String>::new(), ["b\n", "c\n"]),
            ]
        );
    }

    #[test]
    fn pure_deletion_has_empty_to() {
        let result = diff_texts("a\nb\n", "b\n", DiffAlgorithm::Lcs);
        assert_eq!(
            result.groups(),
            &[
                DiffGroup::replacement(["a\n"], Vec::<String>::new()),
                DiffGroup::keep("b\n", "b\n"),
            ]
        );
    }

    #[test]
    fn identical_inputs_only_keep() {
        let result = diff_texts("one\r\ntwo\r\n", "one\r\ntwo\r\n", DiffAlgorithm::Myers);
        assert!(result.is_identical());
        assert_eq!(result.groups().len(), 2);
    }

    #[test]
    fn both_empty_yields_no_groups() {
        assert!(diff_texts("", "", DiffAlgorithm::Myers).is_empty());
    }

    #[test]
    fn algorithm_names_parse() {
        assert_eq!("Patience".parse::<DiffAlgorithm>(), Ok(DiffAlgorithm::Patience));
        assert_eq!(" lcs ".parse::<DiffAlgorithm>(), Ok(DiffAlgorithm::Lcs));
        assert!("histogram".parse::<DiffAlgorithm>().is_err());
        assert_eq!(DiffAlgorithm::default().to_string(), "myers");
    }
}
