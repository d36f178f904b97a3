//! Baseline vs desired diff display

use attrctl_core::domain::attributes::AttributeSet;
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::fmt;

use crate::loader;

/// Line diff between the stored attributes and the ones about to be applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDiff {
    lines: Vec<(ChangeTag, String)>,
}

impl AttributeDiff {
    /// Diff two attribute sets in attribute file format
    ///
    /// A missing baseline diffs against an empty document.
    pub fn between(
        baseline: Option<&AttributeSet>,
        desired: &AttributeSet,
    ) -> Result<Self, serde_yaml::Error> {
        let old = baseline.map(loader::render).transpose()?.unwrap_or_default();
        let new = loader::render(desired)?;

        let lines = TextDiff::from_lines(&old, &new)
            .iter_all_changes()
            .map(|change| (change.tag(), change.value().trim_end().to_string()))
            .collect();

        Ok(Self { lines })
    }

    pub fn has_changes(&self) -> bool {
        self.lines.iter().any(|(tag, _)| *tag != ChangeTag::Equal)
    }

    /// Print the diff with colors
    pub fn print(&self) {
        if !self.has_changes() {
            println!("    {}", "(no changes)".dimmed());
            return;
        }

        for (tag, line) in &self.lines {
            match tag {
                ChangeTag::Delete => println!("    {}", format!("- {}", line).red()),
                ChangeTag::Insert => println!("    {}", format!("+ {}", line).green()),
                ChangeTag::Equal => println!("    {}", format!("  {}", line).dimmed()),
            }
        }
    }
}

impl fmt::Display for AttributeDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tag, line) in &self.lines {
            let sign = match tag {
                ChangeTag::Delete => '-',
                ChangeTag::Insert => '+',
                ChangeTag::Equal => ' ',
            };
            writeln!(f, "{} {}", sign, line)?;
        }
        Ok(())
    }
}
