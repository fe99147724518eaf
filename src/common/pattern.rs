//! Directory-scoped wildcard matching.
//!
//! Supports the shell wildcards `*` (any run of characters) and `?` (one
//! character). As with shell globbing, a leading `.` in a file name is only
//! matched by a literal `.` in the pattern. Matching never descends into
//! subdirectories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A compiled wildcard pattern such as `*.o`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(raw: &str) -> Self {
        Self {
            chars: raw.chars().collect(),
        }
    }

    /// Returns `true` if `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        let name: Vec<char> = name.chars().collect();
        if name.first() == Some(&'.') && self.chars.first() != Some(&'.') {
            return false;
        }

        let (mut p, mut n) = (0, 0);
        // Position of the last `*` and the name index it was tried at.
        let mut star: Option<(usize, usize)> = None;

        while n < name.len() {
            match self.chars.get(p) {
                Some('*') => {
                    star = Some((p, n));
                    p += 1;
                }
                Some('?') => {
                    p += 1;
                    n += 1;
                }
                Some(c) if *c == name[n] => {
                    p += 1;
                    n += 1;
                }
                _ => match star {
                    Some((sp, sn)) => {
                        p = sp + 1;
                        n = sn + 1;
                        star = Some((sp, sn + 1));
                    }
                    None => return false,
                },
            }
        }

        self.chars[p..].iter().all(|c| *c == '*')
    }

    /// Lists the non-directory entries of `dir` whose names match, sorted by name.
    pub fn matching_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut matches = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if self.matches(name) {
                    matches.push(entry.path());
                }
            }
        }
        matches.sort();
        Ok(matches)
    }
}
