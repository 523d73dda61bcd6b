//! Path utilities for delog.
//!
//! This module consolidates all path-related logic for:
//! - Cross-platform path normalization
//! - Output path traversal validation
//! - JavaScript file discovery with gitignore support

use std::path::{Component, Path, PathBuf};

use crate::constants::DEFAULT_EXCLUDE_FOLDERS;

/// Normalizes a path for CLI display.
///
/// - Converts backslashes to forward slashes (for cross-platform consistency)
/// - Strips leading "./" or ".\" prefix (for cleaner output)
///
/// # Examples
/// ```
/// use std::path::Path;
/// use delog::utils::normalize_display_path;
///
/// assert_eq!(normalize_display_path(Path::new(".\\web\\app.js")), "web/app.js");
/// assert_eq!(normalize_display_path(Path::new("./src/main.js")), "src/main.js");
/// ```
#[must_use]
pub fn normalize_display_path(path: &Path) -> String {
    let s = path.to_string_lossy();
    // Strip Windows extended path prefix if present
    let clean = s.trim_start_matches(r"\\?\");
    let normalized = clean.replace('\\', "/");
    normalized
        .strip_prefix("./")
        .unwrap_or(&normalized)
        .to_owned()
}

/// Checks if a name matches any exclusion pattern.
/// Supports exact matching and wildcard patterns starting with `*.`.
#[must_use]
pub fn is_excluded(name: &str, excludes: &[String]) -> bool {
    for exclude in excludes {
        if let Some(suffix) = exclude.strip_prefix('*') {
            if suffix.starts_with('.') && name.ends_with(suffix) {
                return true;
            }
        } else if name == exclude {
            return true;
        }
    }
    false
}

/// Validates that an output path doesn't escape `root` via traversal.
///
/// Relative paths are resolved against `root`. The longest existing ancestor
/// is canonicalized (resolving symlinks) and must lie inside the canonical
/// root; the not-yet-existing remainder must not contain `..`.
///
/// # Errors
///
/// Returns an error if:
/// - The root directory cannot be resolved.
/// - The path traverses outside the allowed root.
/// - The path contains `..` components in the non-existent portion.
pub fn validate_output_path(path: &Path, root: &Path) -> anyhow::Result<PathBuf> {
    let canonical_root = root.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize root directory {}: {}",
            root.display(),
            e
        )
    })?;

    let absolute_path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        canonical_root.join(path)
    };

    let mut ancestor = absolute_path.as_path();
    while !ancestor.exists() {
        match ancestor.parent() {
            Some(p) => ancestor = p,
            None => break,
        }
    }

    let canonical_ancestor = ancestor.canonicalize().map_err(|e| {
        anyhow::anyhow!(
            "Failed to canonicalize ancestor path {}: {}",
            ancestor.display(),
            e
        )
    })?;

    if !canonical_ancestor.starts_with(&canonical_root) {
        anyhow::bail!(
            "Output path '{}' is outside of the output directory '{}'",
            normalize_display_path(&canonical_ancestor),
            normalize_display_path(&canonical_root)
        );
    }

    if let Ok(remainder) = absolute_path.strip_prefix(ancestor) {
        if remainder
            .components()
            .any(|component| matches!(component, Component::ParentDir))
        {
            anyhow::bail!(
                "Security Error: Path contains '..' in non-existent portion: '{}'",
                path.display()
            );
        }
    }

    Ok(absolute_path)
}

/// Path of `file` relative to the input root it was found under.
///
/// A file given directly on the command line maps to its file name.
#[must_use]
pub fn relative_destination(file: &Path, input_root: &Path) -> PathBuf {
    if input_root.is_file() || file == input_root {
        return file
            .file_name()
            .map_or_else(|| file.to_path_buf(), PathBuf::from);
    }
    file.strip_prefix(input_root)
        .map_or_else(|_| file.to_path_buf(), Path::to_path_buf)
}

/// Collects JavaScript files from a directory with gitignore support.
///
/// Uses the `ignore` crate to respect .gitignore, .git/info/exclude, and global gitignore
/// IN ADDITION to the hardcoded default exclusions (`node_modules`, coverage, etc.).
///
/// # Arguments
/// * `root` - Root directory to search
/// * `exclude` - Additional user-specified exclusion patterns
/// * `include` - Folders to force-include (overrides excludes)
/// * `extensions` - File extensions to accept, without the dot
/// * `verbose` - Whether to print walk errors to stderr
///
/// # Returns
/// Sorted paths of every JavaScript file found
#[must_use]
pub fn collect_js_files_gitignore(
    root: &Path,
    exclude: &[String],
    include: &[String],
    extensions: &[String],
    verbose: bool,
) -> Vec<PathBuf> {
    use ignore::WalkBuilder;

    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    // Merge user excludes with default excludes
    let default_excludes: Vec<String> = DEFAULT_EXCLUDE_FOLDERS()
        .iter()
        .map(|&s| s.to_owned())
        .collect();
    let mut all_excludes: Vec<String> = exclude.iter().cloned().chain(default_excludes).collect();

    // Remove force-included folders from exclusion list
    all_excludes.retain(|ex| !include.iter().any(|inc| ex == inc));

    let excludes_for_filter = all_excludes.clone();
    let root_for_filter = root.to_path_buf();

    // Skip excluded directories at traversal time, preventing descent into node_modules etc.
    let walker = WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.path() == root_for_filter {
                return true;
            }
            entry
                .file_name()
                .to_str()
                .is_none_or(|name| !is_excluded(name, &excludes_for_filter))
        })
        .build();

    let mut files = Vec::new();

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();

                if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    continue;
                }

                let is_js = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| extensions.iter().any(|e| e == ext));
                if is_js {
                    files.push(path.to_path_buf());
                }
            }
            Err(e) => {
                if verbose {
                    eprintln!("Walk error: {e}");
                }
            }
        }
    }

    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn js_extensions() -> Vec<String> {
        crate::constants::DEFAULT_EXTENSIONS
            .iter()
            .map(|&s| s.to_owned())
            .collect()
    }

    #[test]
    fn test_is_excluded_patterns() {
        let excludes = vec!["node_modules".to_owned(), "*.min.js".to_owned()];
        assert!(is_excluded("node_modules", &excludes));
        assert!(is_excluded("vendor.min.js", &excludes));
        assert!(!is_excluded("app.js", &excludes));
        assert!(!is_excluded("node_modules_backup", &excludes));
    }

    #[test]
    fn test_validate_output_path_security() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("subdir"))?;

        assert!(validate_output_path(Path::new("./app.js"), root).is_ok());
        assert!(validate_output_path(Path::new("subdir/new/app.js"), root).is_ok());

        assert!(validate_output_path(Path::new("../outside.js"), root).is_err());
        assert!(validate_output_path(Path::new("subdir/../../escape.js"), root).is_err());
        assert!(validate_output_path(Path::new("missing/../../escape.js"), root).is_err());

        Ok(())
    }

    #[test]
    fn test_relative_destination() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("src"))?;
        let file = root.join("src/app.js");
        fs::write(&file, "")?;

        assert_eq!(relative_destination(&file, root), PathBuf::from("src/app.js"));
        assert_eq!(relative_destination(&file, &file), PathBuf::from("app.js"));
        Ok(())
    }

    #[test]
    fn test_collect_js_files_exclusion() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::write(root.join("main.js"), "// main")?;
        fs::write(root.join("worker.mjs"), "// worker")?;
        fs::write(root.join("readme.md"), "# readme")?;
        fs::write(root.join("bundle.min.js"), "// minified")?;

        fs::create_dir_all(root.join("node_modules/pkg"))?;
        fs::write(root.join("node_modules/pkg/index.js"), "// dep")?;

        fs::create_dir_all(root.join("src"))?;
        fs::write(root.join("src/view.jsx"), "// view")?;

        let files = collect_js_files_gitignore(root, &[], &[], &js_extensions(), false);

        let file_names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name())
            .filter_map(|f| f.to_str())
            .collect();

        assert_eq!(file_names.len(), 3);
        assert!(file_names.contains(&"main.js"));
        assert!(file_names.contains(&"worker.mjs"));
        assert!(file_names.contains(&"view.jsx"));
        assert!(!file_names.contains(&"index.js"));
        assert!(!file_names.contains(&"bundle.min.js"));

        Ok(())
    }

    #[test]
    fn test_collect_js_files_force_include() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let root = temp.path();

        fs::create_dir_all(root.join("coverage"))?;
        fs::write(root.join("coverage/report.js"), "// report")?;

        let files = collect_js_files_gitignore(root, &[], &[], &js_extensions(), false);
        assert!(files.is_empty());

        let files = collect_js_files_gitignore(
            root,
            &[],
            &["coverage".to_owned()],
            &js_extensions(),
            false,
        );
        assert_eq!(files.len(), 1);

        Ok(())
    }

    #[test]
    fn test_collect_single_file() -> anyhow::Result<()> {
        let temp = tempdir()?;
        let file = temp.path().join("script.ts");
        fs::write(&file, "console.log(1)")?;

        let files = collect_js_files_gitignore(&file, &[], &[], &js_extensions(), false);
        assert_eq!(files, vec![file]);
        Ok(())
    }
}
