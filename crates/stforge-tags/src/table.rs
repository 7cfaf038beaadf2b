//! Two-column tag table.

use std::fmt;

use stforge_core::Tag;

const NAME_HEADER: &str = "Variable";
const TYPE_HEADER: &str = "Data Type";

/// A borrowed tag list rendered as an aligned `Variable | Data Type` table.
pub struct TagTable<'a> {
    tags: &'a [Tag],
}

impl<'a> TagTable<'a> {
    pub fn new(tags: &'a [Tag]) -> Self {
        Self { tags }
    }

    /// Rows as (name, type) pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.tags
            .iter()
            .map(|t| (t.name.as_str(), t.declared_type.as_str()))
    }

    fn widths(&self) -> (usize, usize) {
        self.rows().fold(
            (NAME_HEADER.len(), TYPE_HEADER.len()),
            |(n, t), (name, ty)| (n.max(name.chars().count()), t.max(ty.chars().count())),
        )
    }
}

impl fmt::Display for TagTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (nw, tw) = self.widths();
        writeln!(f, "{NAME_HEADER:<nw$} | {TYPE_HEADER:<tw$}")?;
        write!(f, "{}-+-{}", "-".repeat(nw), "-".repeat(tw))?;
        for (name, ty) in self.rows() {
            write!(f, "\n{name:<nw$} | {ty:<tw$}")?;
        }
        Ok(())
    }
}
