//! Owned syntax tree produced from the tree-sitter JavaScript grammar.
//!
//! Only the node kinds the engine inspects get their own variant. Everything
//! else is kept as [`SyntaxNode::Other`] so traversal still reaches every
//! named node in the source.

/// Half-open byte range `[start, end)` into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `other` lies entirely inside this span (bounds inclusive)
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether the two spans share at least one byte
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Slice the source text covered by this span.
    ///
    /// Returns `None` when the span is out of bounds or splits a UTF-8 sequence.
    #[must_use]
    pub fn slice<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// A node of the JavaScript syntax tree.
///
/// Each variant exposes a fixed set of children through [`SyntaxNode::children`],
/// in the same order the grammar declares its fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// `callee(arguments)`, including optional calls `callee?.(arguments)`
    Call {
        /// Span of the whole call, arguments and closing parenthesis included
        span: Span,
        /// Expression being invoked
        callee: Box<SyntaxNode>,
        /// Argument list (or template string for tagged templates)
        arguments: Box<SyntaxNode>,
    },
    /// `object.property` or `object?.property`
    Member {
        /// Span of the whole access expression
        span: Span,
        /// Expression the property is read from
        object: Box<SyntaxNode>,
        /// Accessed property, always an [`SyntaxNode::Identifier`]
        property: Box<SyntaxNode>,
    },
    /// Plain, property or private (`#name`) identifier
    Identifier {
        /// Span of the identifier
        span: Span,
        /// Identifier text as written in the source
        name: String,
    },
    /// Any other named grammar node
    Other {
        /// Grammar kind, e.g. `program` or `expression_statement`
        kind: &'static str,
        /// Span of the node
        span: Span,
        /// Named children in source order
        children: Vec<SyntaxNode>,
    },
}

impl SyntaxNode {
    /// Grammar kind of the node.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Call { .. } => "call_expression",
            Self::Member { .. } => "member_expression",
            Self::Identifier { .. } => "identifier",
            Self::Other { kind, .. } => kind,
        }
    }

    /// Byte range of the node in the original source.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Call { span, .. }
            | Self::Member { span, .. }
            | Self::Identifier { span, .. }
            | Self::Other { span, .. } => *span,
        }
    }

    /// Direct children, in field declaration order.
    #[must_use]
    pub fn children(&self) -> Vec<&SyntaxNode> {
        match self {
            Self::Call {
                callee, arguments, ..
            } => vec![callee.as_ref(), arguments.as_ref()],
            Self::Member {
                object, property, ..
            } => vec![object.as_ref(), property.as_ref()],
            Self::Identifier { .. } => Vec::new(),
            Self::Other { children, .. } => children.iter().collect(),
        }
    }

    /// Identifier text, if this node is an identifier.
    #[must_use]
    pub fn identifier_name(&self) -> Option<&str> {
        match self {
            Self::Identifier { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Childless node left behind when children are moved out during drop.
const HOLLOW: SyntaxNode = SyntaxNode::Other {
    kind: "",
    span: Span::new(0, 0),
    children: Vec::new(),
};

impl SyntaxNode {
    /// Move the children out, leaving childless placeholders.
    fn take_children(&mut self) -> Vec<SyntaxNode> {
        match self {
            Self::Call {
                callee, arguments, ..
            } => vec![
                std::mem::replace(callee.as_mut(), HOLLOW),
                std::mem::replace(arguments.as_mut(), HOLLOW),
            ],
            Self::Member {
                object, property, ..
            } => vec![
                std::mem::replace(object.as_mut(), HOLLOW),
                std::mem::replace(property.as_mut(), HOLLOW),
            ],
            Self::Identifier { .. } => Vec::new(),
            Self::Other { children, .. } => std::mem::take(children),
        }
    }

    fn is_hollow(&self) -> bool {
        match self {
            Self::Call { .. } | Self::Member { .. } => false,
            Self::Identifier { .. } => true,
            Self::Other { children, .. } => children.is_empty(),
        }
    }
}

// Dropping level by level would recurse once per nesting level.
impl Drop for SyntaxNode {
    fn drop(&mut self) {
        if self.is_hollow() {
            return;
        }
        let mut stack = self.take_children();
        while let Some(mut node) = stack.pop() {
            if !node.is_hollow() {
                stack.extend(node.take_children());
            }
        }
    }
}
