use std::path::{Component, Path, PathBuf};

/// Lexically cleans a path the way directory trackers key their entries.
///
/// Collapses repeated separators, drops `.` components and resolves `..` against
/// the preceding component. `..` directly under the root stays at the root. No
/// filesystem access happens here, so symlinks are left untouched.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use zoink::utils::clean_path;
///
/// assert_eq!(clean_path(Path::new("/home//user/./docs/../src")), PathBuf::from("/home/user/src"));
/// ```
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => cleaned.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            Component::Normal(part) => cleaned.push(part),
        }
    }

    if cleaned.as_os_str().is_empty() { PathBuf::from(".") } else { cleaned }
}

/// Makes a path absolute (relative to the current directory) and cleans it.
///
/// Falls back to cleaning the path as given when the current directory cannot
/// be determined, so callers recording visits never fail here.
pub fn normalize_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    clean_path(&absolute)
}

/// Formats a path with ~ substitution for the home directory
///
/// Only whole components are replaced, so `/home/al` is not abbreviated for a
/// home of `/home/alice`.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use zoink::utils::format_path_with_tilde;
///
/// let path = PathBuf::from("/home/alice/projects");
/// // Returns "~/projects" if the home directory is /home/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    format_path_with_tilde_internal(path, dirs::home_dir().as_deref())
}

/// Internal helper for path formatting with explicit home (for testing)
pub(crate) fn format_path_with_tilde_internal(path: &Path, home: Option<&Path>) -> String {
    if let Some(home) = home
        && let Ok(rest) = path.strip_prefix(home)
    {
        if rest.as_os_str().is_empty() {
            return "~".to_string();
        }
        return Path::new("~").join(rest).to_string_lossy().into_owned();
    }

    path.to_string_lossy().into_owned()
}
