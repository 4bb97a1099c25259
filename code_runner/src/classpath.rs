//! Classpath Assembler
//!
//! Turns the classpath fragments a check author writes (directories or jars,
//! usually relative to the problem set's check directory) into the single
//! path-list string the compiler and interpreter expect.
//!
//! Order is preserved and duplicates are kept: the runtime resolves classes in
//! classpath order, so reordering or deduplicating would change behaviour.

use std::fmt;
use std::path::{Path, PathBuf};

/// Separator between classpath entries on this platform.
#[cfg(windows)]
pub const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
pub const PATH_LIST_SEPARATOR: char = ':';

/// Makes `path` absolute by joining it onto `check_dir` when it is relative.
pub fn full_path(path: impl AsRef<Path>, check_dir: &Path) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        check_dir.join(path)
    }
}

/// Expands classpath fragments into absolute paths.
///
/// `None` yields an empty list. Empty fragments are dropped. The current
/// directory is *not* added here; [`Classpath`] does that.
pub fn expand_classpaths<S: AsRef<Path>>(entries: Option<&[S]>, check_dir: &Path) -> Vec<PathBuf> {
    entries
        .unwrap_or_default()
        .iter()
        .map(|p| AsRef::<Path>::as_ref(p))
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| full_path(p, check_dir))
        .collect()
}

/// An assembled classpath: the current directory followed by expanded entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classpath {
    entries: Vec<PathBuf>,
}

impl Classpath {
    pub fn new<S: AsRef<Path>>(entries: &[S], check_dir: &Path) -> Self {
        Self {
            entries: expand_classpaths(Some(entries), check_dir),
        }
    }

    /// Appends an already resolved entry (e.g. the unit-test runner's jar).
    pub fn push(&mut self, entry: impl Into<PathBuf>) {
        let entry = entry.into();
        if !entry.as_os_str().is_empty() {
            self.entries.push(entry);
        }
    }

    /// Entries after the implicit current directory.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }
}

impl fmt::Display for Classpath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".")?;
        for entry in &self.entries {
            write!(f, "{PATH_LIST_SEPARATOR}{}", entry.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_dir() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\psets\hello")
        } else {
            PathBuf::from("/psets/hello")
        }
    }

    #[test]
    fn none_expands_to_nothing() {
        assert!(expand_classpaths::<&str>(None, &check_dir()).is_empty());
    }

    #[test]
    fn relative_entries_are_joined_onto_check_dir() {
        let expanded = expand_classpaths(Some(&["lib/junit.jar", "classes"][..]), &check_dir());
        assert_eq!(
            expanded,
            vec![check_dir().join("lib/junit.jar"), check_dir().join("classes")]
        );
    }

    #[test]
    fn expansion_is_idempotent() {
        let absolute = check_dir().join("abs.jar");
        let absolute = absolute.to_str().unwrap();
        let once = expand_classpaths(Some(&["rel", absolute, "rel"][..]), &check_dir());
        let twice = expand_classpaths(Some(once.as_slice()), &check_dir());
        assert_eq!(once, twice);
    }

    #[test]
    fn order_and_duplicates_are_preserved_and_empties_dropped() {
        let expanded = expand_classpaths(Some(&["b", "", "a", "b"][..]), &check_dir());
        assert_eq!(
            expanded,
            vec![check_dir().join("b"), check_dir().join("a"), check_dir().join("b")]
        );
    }

    #[test]
    fn classpath_always_starts_with_current_directory() {
        assert_eq!(Classpath::new::<&str>(&[], &check_dir()).to_string(), ".");

        let mut cp = Classpath::new(&["lib.jar"], &check_dir());
        cp.push(check_dir().join("runner.jar"));
        let expected = format!(
            ".{sep}{}{sep}{}",
            check_dir().join("lib.jar").display(),
            check_dir().join("runner.jar").display(),
            sep = PATH_LIST_SEPARATOR
        );
        assert_eq!(cp.to_string(), expected);
        assert_eq!(cp.entries().len(), 2);
    }
}
