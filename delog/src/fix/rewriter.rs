//! Byte-range safe code rewriter.
//!
//! Replaces matched call expressions in the original text while every byte
//! outside the replaced ranges is copied through untouched.
//!
//! # Usage
//!
//! ```
//! use delog::cst::Span;
//! use delog::fix::rewrite;
//!
//! let source = "console.log('x');";
//! let out = rewrite(source, &[Span::new(0, 16)], &|s| format!("/* {s} */"), true)
//!     .expect("should apply");
//! assert_eq!(out, "/* console.log('x'); */");
//! ```

use std::fmt;

use crate::cst::Span;

/// A single replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Range being replaced
    pub span: Span,
    /// Replacement content
    pub replacement: String,
}

impl Edit {
    /// Create a new edit
    #[must_use]
    pub fn new(span: Span, replacement: impl Into<String>) -> Self {
        Self {
            span,
            replacement: replacement.into(),
        }
    }

    /// Check if this edit overlaps with another
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.span.overlaps(&other.span)
    }
}

/// Error during rewriting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    /// Two ranges share bytes, or are not in ascending order
    OverlappingEdits {
        /// Earlier range
        first: Span,
        /// Range that starts before `first` ends
        second: Span,
    },
    /// Range extends past the end of the source, or ends before it starts
    OutOfBounds {
        /// The bad range
        span: Span,
        /// Length of the source
        source_len: usize,
    },
    /// Range boundary falls inside a multi-byte character
    NotCharBoundary {
        /// Offending byte offset
        offset: usize,
    },
}

impl fmt::Display for RewriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OverlappingEdits { first, second } => write!(
                f,
                "Overlapping ranges {}..{} and {}..{}",
                first.start, first.end, second.start, second.end
            ),
            Self::OutOfBounds { span, source_len } => write!(
                f,
                "Range {}..{} out of bounds for source length {source_len}",
                span.start, span.end
            ),
            Self::NotCharBoundary { offset } => {
                write!(f, "Offset {offset} is not on a UTF-8 character boundary")
            }
        }
    }
}

impl std::error::Error for RewriteError {}

/// Check that `spans` are valid slices of `source`, ascending and disjoint.
fn validate_spans<'a>(
    source: &str,
    spans: impl IntoIterator<Item = &'a Span>,
) -> Result<(), RewriteError> {
    let mut previous: Option<&Span> = None;
    for span in spans {
        if span.start > span.end || span.end > source.len() {
            return Err(RewriteError::OutOfBounds {
                span: *span,
                source_len: source.len(),
            });
        }
        for offset in [span.start, span.end] {
            if !source.is_char_boundary(offset) {
                return Err(RewriteError::NotCharBoundary { offset });
            }
        }
        if let Some(prev) = previous {
            if span.start < prev.end {
                return Err(RewriteError::OverlappingEdits {
                    first: *prev,
                    second: *span,
                });
            }
        }
        previous = Some(span);
    }
    Ok(())
}

/// Safe code rewriter using byte ranges
///
/// Edits are applied front to back: untouched slices are copied between
/// replacements, so offsets always refer to the original source.
#[derive(Debug, Clone)]
pub struct ByteRangeRewriter<'a> {
    /// Original source code
    source: &'a str,
    /// Pending edits
    edits: Vec<Edit>,
}

impl<'a> ByteRangeRewriter<'a> {
    /// Create a new rewriter for the given source
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    /// Add an edit to the pending list
    pub fn add_edit(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    /// Add multiple edits
    pub fn add_edits(&mut self, edits: impl IntoIterator<Item = Edit>) {
        self.edits.extend(edits);
    }

    /// Get the number of pending edits
    #[must_use]
    pub fn edit_count(&self) -> usize {
        self.edits.len()
    }

    /// Validate edits without applying them
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn validate(&self) -> Result<(), RewriteError> {
        let mut spans: Vec<Span> = self.edits.iter().map(|e| e.span).collect();
        spans.sort_by_key(|s| s.start);
        validate_spans(self.source, &spans)
    }

    /// Apply all edits and return the modified source
    ///
    /// # Errors
    /// Returns error if edits overlap, are out of bounds, or split a character
    pub fn apply(self) -> Result<String, RewriteError> {
        let mut edits = self.edits;
        edits.sort_by_key(|e| e.span.start);
        validate_spans(self.source, edits.iter().map(|e| &e.span))?;

        let mut result = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for edit in &edits {
            result.push_str(&self.source[cursor..edit.span.start]);
            result.push_str(&edit.replacement);
            cursor = edit.span.end;
        }
        result.push_str(&self.source[cursor..]);

        Ok(result)
    }
}

/// Move `end` past `[ \t]*;` if that is what follows it.
///
/// Scanning stops at `limit`; if anything other than a space or tab comes
/// before the semicolon, `end` is returned unchanged.
#[must_use]
pub fn extend_to_semicolon(source: &str, end: usize, limit: usize) -> usize {
    let limit = limit.min(source.len());
    for (offset, byte) in source.as_bytes()[end.min(limit)..limit]
        .iter()
        .enumerate()
    {
        match byte {
            b';' => return end + offset + 1,
            b' ' | b'\t' => {}
            _ => return end,
        }
    }
    end
}

/// Turn ordered, disjoint matches into edits.
///
/// With `extend_semicolon`, each range first grows over a directly trailing
/// semicolon (never past the next match), and the strategy sees the grown text.
///
/// # Errors
/// Returns error if the matches are not valid ordered slices of `source`
pub fn plan_edits(
    source: &str,
    matches: &[Span],
    strategy: &dyn Fn(&str) -> String,
    extend_semicolon: bool,
) -> Result<Vec<Edit>, RewriteError> {
    validate_spans(source, matches)?;

    let edits = matches
        .iter()
        .enumerate()
        .map(|(i, span)| {
            let mut span = *span;
            if extend_semicolon {
                let limit = matches.get(i + 1).map_or(source.len(), |next| next.start);
                span.end = extend_to_semicolon(source, span.end, limit);
            }
            Edit::new(span, strategy(&source[span.start..span.end]))
        })
        .collect();

    Ok(edits)
}

/// Rewrite `source`, replacing each match with `strategy(matched text)`.
///
/// Zero matches returns the source unchanged.
///
/// # Errors
/// Returns error if the matches are not valid ordered slices of `source`
pub fn rewrite(
    source: &str,
    matches: &[Span],
    strategy: &dyn Fn(&str) -> String,
    extend_semicolon: bool,
) -> Result<String, RewriteError> {
    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(plan_edits(source, matches, strategy, extend_semicolon)?);
    rewriter.apply()
}
