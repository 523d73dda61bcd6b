//! Shared utilities for command implementations.

use std::path::PathBuf;

/// A discovered file together with the input root it was found under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the file
    pub path: PathBuf,
    /// Path given on the command line that led to this file
    pub input_root: PathBuf,
}

/// Resolved file discovery settings.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Folder/file name patterns to skip
    pub exclude: Vec<String>,
    /// Folders to force-include
    pub include: Vec<String>,
    /// Extensions to accept, without the dot
    pub extensions: Vec<String>,
}

/// Finds all JavaScript files under the given roots, excluding specified patterns.
/// Respects .gitignore files in addition to hardcoded defaults.
pub fn find_js_files(roots: &[PathBuf], discovery: &Discovery, verbose: bool) -> Vec<SourceFile> {
    let mut all_files = Vec::new();
    for root in roots {
        let files = crate::utils::collect_js_files_gitignore(
            root,
            &discovery.exclude,
            &discovery.include,
            &discovery.extensions,
            verbose,
        );
        all_files.extend(files.into_iter().map(|path| SourceFile {
            path,
            input_root: root.clone(),
        }));
    }
    all_files
}

/// Merges primary excludes with additional patterns into a single list.
pub fn merge_excludes(primary: Vec<String>, additional: Vec<String>) -> Vec<String> {
    let mut merged = primary;
    merged.extend(additional);
    merged
}
