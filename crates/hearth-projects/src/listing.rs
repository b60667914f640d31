//! Sorted views of local and remote project names

use crate::error::{Error, Result};
use std::collections::BTreeSet;

/// Which project sets to display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    #[default]
    Local,
    Remote,
    /// Local section followed by remote section
    All,
}

impl ListMode {
    /// Mode from `--remote` / `--all`; both together is an error
    pub fn from_flags(remote: bool, all: bool) -> Result<Self> {
        match (remote, all) {
            (true, true) => Err(Error::invalid_arguments(
                "--remote and --all are mutually exclusive",
            )),
            (true, false) => Ok(Self::Remote),
            (false, true) => Ok(Self::All),
            (false, false) => Ok(Self::Local),
        }
    }

    /// Whether this mode needs the registry
    pub fn needs_remote(self) -> bool {
        matches!(self, Self::Remote | Self::All)
    }
}

/// One titled block of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub names: Vec<String>,
}

/// Case-insensitive order, ties broken by the raw string
pub fn sort_names<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut sorted: Vec<String> = names.into_iter().cloned().collect();
    sorted.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    sorted
}

/// Build the display sections for `mode`
pub fn render_sections(
    mode: ListMode,
    local: &BTreeSet<String>,
    remote: &BTreeSet<String>,
) -> Vec<Section> {
    let local_section = || Section {
        title: "Local Projects",
        names: sort_names(local),
    };
    let remote_section = || Section {
        title: "Remote Projects",
        names: sort_names(remote),
    };

    match mode {
        ListMode::Local => vec![local_section()],
        ListMode::Remote => vec![remote_section()],
        ListMode::All => vec![local_section(), remote_section()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_is_case_insensitive() {
        let sorted = sort_names(&names(&["Zebra", "apple", "Banana"]));
        assert_eq!(sorted, vec!["apple", "Banana", "Zebra"]);
    }

    #[test]
    fn test_sort_ties_are_deterministic() {
        let sorted = sort_names(&names(&["abc", "ABC", "Abc"]));
        assert_eq!(sorted, vec!["ABC", "Abc", "abc"]);
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(ListMode::from_flags(false, false).unwrap(), ListMode::Local);
        assert_eq!(ListMode::from_flags(true, false).unwrap(), ListMode::Remote);
        assert_eq!(ListMode::from_flags(false, true).unwrap(), ListMode::All);
        assert!(matches!(
            ListMode::from_flags(true, true),
            Err(Error::InvalidArguments { .. })
        ));
    }

    #[test]
    fn test_all_mode_orders_local_first() {
        let sections = render_sections(
            ListMode::All,
            &names(&["b", "A"]),
            &names(&["remote"]),
        );

        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Local Projects");
        assert_eq!(sections[0].names, vec!["A", "b"]);
        assert_eq!(sections[1].title, "Remote Projects");
        assert!(!ListMode::Local.needs_remote());
    }
}
