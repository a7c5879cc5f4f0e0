use std::iter::repeat;
use std::path::{Path, PathBuf};

pub fn find_first_subpath<P: AsRef<Path>, F: Fn(&Path) -> bool>(
    root: impl AsRef<Path>,
    subpaths: &[P],
    search: F,
) -> Option<PathBuf> {
    subpaths
        .iter()
        .zip(repeat(root.as_ref()))
        .map(|(b, a)| a.join(b))
        .find(|it: &PathBuf| search(it))
}

/// Splits a comma separated env value, dropping blank entries.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|it| !it.is_empty())
        .map(String::from)
        .collect()
}

/// Case-insensitive substring match used by every search box. A blank term matches any name,
/// otherwise the term is matched as typed, surrounding spaces included.
pub fn name_matches(name: &str, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    name.to_lowercase().contains(&term.to_lowercase())
}
