use regex::Regex;
use rustc_hash::FxHashSet;
use std::sync::OnceLock;

/// Name of the dedicated configuration file.
pub const CONFIG_FILENAME: &str = ".delog.toml";

/// Name of the npm manifest that may carry a `"delog"` section.
pub const PACKAGE_JSON_FILENAME: &str = "package.json";

/// Namespaces matched when none are configured.
pub const DEFAULT_NAMESPACES: &[&str] = &["console", "window.console"];

/// Methods matched when none are configured.
pub const DEFAULT_METHODS: &[&str] = &["log", "info", "assert"];

/// File extensions treated as JavaScript when walking directories.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// Regex for a dotted target such as `console.log` or `window.console.warn`.
///
/// # Panics
///
/// Panics if the regex pattern is invalid.
pub fn get_dotted_target_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)+$")
            .expect("Invalid dotted target regex pattern")
    })
}

/// Set of folders to exclude by default.
pub fn get_default_exclude_folders() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        let mut s = FxHashSet::default();
        s.insert("node_modules");
        s.insert("bower_components");
        s.insert(".git");
        s.insert("coverage");
        s.insert(".next");
        s.insert(".cache");
        s.insert("*.min.js");
        s
    })
}

pub use get_default_exclude_folders as DEFAULT_EXCLUDE_FOLDERS;
pub use get_dotted_target_re as DOTTED_TARGET_RE;
