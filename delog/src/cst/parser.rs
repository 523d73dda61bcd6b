//! Tree-sitter based parser for JavaScript source code.
//!
//! Converts the tree-sitter CST into an owned [`SyntaxNode`] tree carrying
//! exact byte ranges into the source.

use tree_sitter::{Node, Parser};

use super::node::{Span, SyntaxNode};

/// Error during parsing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Failed to load the JavaScript grammar
    #[error("failed to create JavaScript parser: {0}")]
    Language(String),
    /// The parser gave up without producing a tree
    #[error("parser produced no syntax tree")]
    Aborted,
    /// The source contains a syntax error
    #[error("syntax error at line {line}, column {column}: {detail}")]
    Syntax {
        /// 1-indexed line of the first error
        line: usize,
        /// 1-indexed column (in bytes) of the first error
        column: usize,
        /// What the parser tripped over
        detail: String,
    },
}

/// Tree-sitter based JavaScript parser
pub struct JsParser {
    parser: Parser,
}

impl JsParser {
    /// Create a new parser for JavaScript (JSX included)
    ///
    /// # Errors
    /// Returns error if the grammar cannot be loaded
    pub fn new() -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|e| ParseError::Language(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Parse source code into an owned syntax tree.
    ///
    /// The grammar recovers from errors; any recovery is reported as
    /// [`ParseError::Syntax`] and no tree is returned.
    ///
    /// # Errors
    /// Returns error if the source does not parse cleanly
    pub fn parse(&mut self, source: &str) -> Result<SyntaxNode, ParseError> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::Aborted)?;
        let root = tree.root_node();

        if root.has_error() {
            return Err(syntax_error(root, source));
        }

        convert(root, source).ok_or(ParseError::Aborted)
    }
}

fn is_identifier(kind: &str) -> bool {
    matches!(
        kind,
        "identifier" | "property_identifier" | "private_property_identifier"
    )
}

/// How a node is assembled once its children are built.
enum Shape {
    Identifier,
    Call,
    Member,
    Other,
}

/// A node whose children are still being converted.
struct Frame<'t> {
    node: Node<'t>,
    shape: Shape,
    pending: std::vec::IntoIter<Node<'t>>,
    built: Vec<SyntaxNode>,
}

impl<'t> Frame<'t> {
    fn new(node: Node<'t>) -> Self {
        let (shape, children) = plan(node);
        Self {
            node,
            shape,
            built: Vec::with_capacity(children.len()),
            pending: children.into_iter(),
        }
    }

    fn finish(self, source: &str) -> SyntaxNode {
        let span = Span::from(self.node.byte_range());
        let built = match self.shape {
            Shape::Identifier => {
                return SyntaxNode::Identifier {
                    span,
                    name: source
                        .get(self.node.byte_range())
                        .unwrap_or_default()
                        .to_owned(),
                }
            }
            Shape::Call => match <[SyntaxNode; 2]>::try_from(self.built) {
                Ok([callee, arguments]) => {
                    return SyntaxNode::Call {
                        span,
                        callee: Box::new(callee),
                        arguments: Box::new(arguments),
                    }
                }
                Err(built) => built,
            },
            Shape::Member => match <[SyntaxNode; 2]>::try_from(self.built) {
                Ok([object, property]) => {
                    return SyntaxNode::Member {
                        span,
                        object: Box::new(object),
                        property: Box::new(property),
                    }
                }
                Err(built) => built,
            },
            Shape::Other => self.built,
        };
        SyntaxNode::Other {
            kind: self.node.kind(),
            span,
            children: built,
        }
    }
}

/// Pick the shape of `node` and the children it is built from, in field order.
fn plan(node: Node<'_>) -> (Shape, Vec<Node<'_>>) {
    match node.kind() {
        kind if is_identifier(kind) => return (Shape::Identifier, Vec::new()),
        "call_expression" => {
            if let (Some(callee), Some(arguments)) = (
                node.child_by_field_name("function"),
                node.child_by_field_name("arguments"),
            ) {
                return (Shape::Call, vec![callee, arguments]);
            }
        }
        "member_expression" => {
            if let (Some(object), Some(property)) = (
                node.child_by_field_name("object"),
                node.child_by_field_name("property"),
            ) {
                if is_identifier(property.kind()) {
                    return (Shape::Member, vec![object, property]);
                }
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    let children = node.named_children(&mut cursor).collect();
    (Shape::Other, children)
}

/// Build the owned tree with an explicit stack, so nesting depth is bounded
/// by memory rather than by the thread's stack.
fn convert(root: Node<'_>, source: &str) -> Option<SyntaxNode> {
    let mut stack = vec![Frame::new(root)];
    while let Some(top) = stack.last_mut() {
        if let Some(child) = top.pending.next() {
            stack.push(Frame::new(child));
            continue;
        }
        let node = stack.pop()?.finish(source);
        match stack.last_mut() {
            Some(parent) => parent.built.push(node),
            None => return Some(node),
        }
    }
    None
}

/// Locate the first ERROR or MISSING node in source order and describe it.
fn syntax_error(root: Node<'_>, source: &str) -> ParseError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            return at(node, format!("missing `{}`", node.kind()));
        }
        if node.is_error() {
            let text = source.get(node.byte_range()).unwrap_or_default();
            return at(node, format!("unexpected `{}`", snippet(text)));
        }
        if node.has_error() {
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
    }
    at(root, "unrecognized syntax".to_owned())
}

fn at(node: Node<'_>, detail: String) -> ParseError {
    let point = node.start_position();
    ParseError::Syntax {
        line: point.row + 1,
        column: point.column + 1,
        detail,
    }
}

fn snippet(text: &str) -> String {
    const MAX_CHARS: usize = 24;
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.chars().count() > MAX_CHARS {
        let cut: String = first_line.chars().take(MAX_CHARS).collect();
        format!("{cut}…")
    } else {
        first_line.to_owned()
    }
}
