/// Display command attached to a side-by-side row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Inserted,
    Deleted,
    Changed,
    Kept,
}

/// One line of side-by-side output.
///
/// Invariants (enforced by the constructors):
/// * `Inserted` rows have an empty `left`.
/// * `Deleted` rows have an empty `right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    command: Command,
    left: String,
    right: String,
}

impl Row {
    pub fn inserted(right: impl Into<String>) -> Self {
        Self {
            command: Command::Inserted,
            left: String::new(),
            right: right.into(),
        }
    }

    pub fn deleted(left: impl Into<String>) -> Self {
        Self {
            command: Command::Deleted,
            left: left.into(),
            right: String::new(),
        }
    }

    pub fn changed(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            command: Command::Changed,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn kept(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            command: Command::Kept,
            left: left.into(),
            right: right.into(),
        }
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn right(&self) -> &str {
        &self.right
    }
}

/// Per-command row totals, shown in the status line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSummary {
    pub inserted: usize,
    pub deleted: usize,
    pub changed: usize,
    pub kept: usize,
}

impl RowSummary {
    pub fn of(rows: &[Row]) -> Self {
        rows.iter().fold(Self::default(), |mut acc, row| {
            match row.command {
                Command::Inserted => acc.inserted += 1,
                Command::Deleted => acc.deleted += 1,
                Command::Changed => acc.changed += 1,
                Command::Kept => acc.kept += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.inserted + self.deleted + self.changed + self.kept
    }
}
