//! Directory content snapshots.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;

/// Sorted set of the entry names directly inside a directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirListing {
    names: BTreeSet<String>,
}

impl DirListing {
    /// Reads the current entries of `dir`. Names that are not valid UTF-8 are
    /// included lossily.
    pub fn capture(dir: &Path) -> io::Result<Self> {
        let mut names = BTreeSet::new();
        for entry in fs::read_dir(dir)? {
            names.insert(entry?.file_name().to_string_lossy().into_owned());
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn contains_all<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().all(|n| self.contains(n.as_ref()))
    }

    /// Names from `names` that are absent, in the given order.
    pub fn missing<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|n| !self.contains(n))
            .map(str::to_string)
            .collect()
    }

    /// Entries present now but not in `before`.
    pub fn added_since(&self, before: &DirListing) -> Vec<String> {
        self.names.difference(&before.names).cloned().collect()
    }

    /// Entries present in `before` but gone now.
    pub fn removed_since(&self, before: &DirListing) -> Vec<String> {
        before.names.difference(&self.names).cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for DirListing {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_diff() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("adder.vhd"), b"").unwrap();
        let before = DirListing::capture(dir.path()).unwrap();

        fs::write(dir.path().join("adder.o"), b"").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        let after = DirListing::capture(dir.path()).unwrap();

        assert_eq!(before.len(), 1);
        assert_eq!(after.names().collect::<Vec<_>>(), ["adder.o", "adder.vhd", "sub"]);
        assert_eq!(after.added_since(&before), ["adder.o", "sub"]);
        assert!(after.removed_since(&before).is_empty());
        assert_eq!(before.removed_since(&after), ["adder.o", "sub"]);
    }

    #[test]
    fn superset_checks() {
        let listing: DirListing = ["a.o", "a.vhd", "tb"].into_iter().collect();
        assert!(listing.contains_all(&["a.o", "tb"]));
        assert!(!listing.contains_all(&["a.o", "e~tb.o"]));
        assert_eq!(listing.missing(&["e~tb.o", "a.o", "tb.o"]), ["e~tb.o", "tb.o"]);
    }
}
