//! Locate targeted call expressions and resolve overlaps between them.

use crate::cst::{Span, SyntaxNode};

use super::targets::TargetSpec;

/// Structural view of a callee like `window.console.log`.
///
/// Only chains made of plain identifiers resolve. Parentheses around a link
/// (`(console).log`) are transparent; anything else (calls, `this`, computed
/// access, sequence expressions) yields `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberChain<'a> {
    /// Innermost object, e.g. `window`
    Identifier(&'a str),
    /// `base.property`
    Member(Box<MemberChain<'a>>, &'a str),
}

impl<'a> MemberChain<'a> {
    /// Build the chain for `node`, or `None` if it is not a dotted identifier chain.
    #[must_use]
    pub fn from_node(node: &'a SyntaxNode) -> Option<Self> {
        let mut properties = Vec::new();
        let mut current = node;
        let base = loop {
            match current {
                SyntaxNode::Identifier { name, .. } => break name.as_str(),
                SyntaxNode::Member {
                    object, property, ..
                } => {
                    properties.push(property.identifier_name()?);
                    current = &**object;
                }
                SyntaxNode::Other {
                    kind: "parenthesized_expression",
                    children,
                    ..
                } => match children.as_slice() {
                    [inner] => current = inner,
                    _ => return None,
                },
                _ => return None,
            }
        };

        let mut chain = Self::Identifier(base);
        for property in properties.into_iter().rev() {
            chain = Self::Member(Box::new(chain), property);
        }
        Some(chain)
    }

    /// Segments from the innermost object outwards.
    fn segments(&self) -> Vec<&'a str> {
        let mut segments = Vec::new();
        let mut current = self;
        loop {
            match current {
                Self::Identifier(name) => {
                    segments.push(*name);
                    break;
                }
                Self::Member(base, property) => {
                    segments.push(*property);
                    current = &**base;
                }
            }
        }
        segments.reverse();
        segments
    }

    /// Full dotted path, e.g. `window.console.log`.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.segments().join(".")
    }

    /// Split off the last segment: (`window.console`, `log`).
    ///
    /// A lone identifier has no method and returns `None`.
    #[must_use]
    pub fn namespace_and_method(&self) -> Option<(String, &'a str)> {
        match self {
            Self::Identifier(_) => None,
            Self::Member(base, property) => Some((base.dotted(), *property)),
        }
    }
}

impl Drop for MemberChain<'_> {
    fn drop(&mut self) {
        let Self::Member(base, _) = self else {
            return;
        };
        let mut next = std::mem::replace(base.as_mut(), Self::Identifier(""));
        while let Self::Member(base, _) = &mut next {
            let inner = std::mem::replace(base.as_mut(), Self::Identifier(""));
            next = inner;
        }
    }
}

/// Dotted path of a member-access expression, if it is a plain identifier chain.
#[must_use]
pub fn resolve_dotted_path(node: &SyntaxNode) -> Option<String> {
    MemberChain::from_node(node).map(|chain| chain.dotted())
}

/// Span of `node` if it is a call to one of the targets.
fn matched_call(node: &SyntaxNode, targets: &TargetSpec) -> Option<Span> {
    let SyntaxNode::Call { span, callee, .. } = node else {
        return None;
    };
    let (namespace, method) = MemberChain::from_node(callee)?.namespace_and_method()?;
    targets.contains(&namespace, method).then_some(*span)
}

/// Find every targeted call in `nodes`.
///
/// The result is sorted by start offset (stable, so ties keep discovery
/// order) and calls nested inside an earlier kept call are dropped.
#[must_use]
pub fn find_matches(nodes: &[&SyntaxNode], targets: &TargetSpec) -> Vec<Span> {
    let mut found: Vec<Span> = nodes
        .iter()
        .filter_map(|node| matched_call(node, targets))
        .collect();
    found.sort_by_key(|span| span.start);
    collapse_nested(&found)
}

/// Drop spans fully contained in the previously kept span.
///
/// `spans` must be sorted by start offset.
#[must_use]
pub fn collapse_nested(spans: &[Span]) -> Vec<Span> {
    let mut kept: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        if kept.last().is_some_and(|previous| previous.contains(span)) {
            continue;
        }
        kept.push(*span);
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cst::{breadth_first, JsParser};

    fn matches_in(source: &str, targets: &TargetSpec) -> Vec<Span> {
        let root = JsParser::new().unwrap().parse(source).unwrap();
        find_matches(&breadth_first(&root), targets)
    }

    fn texts<'s>(source: &'s str, spans: &[Span]) -> Vec<&'s str> {
        spans.iter().map(|s| s.slice(source).unwrap()).collect()
    }

    #[test]
    fn test_resolve_window_console() {
        let source = "window.console.info(1)";
        let spans = matches_in(source, &TargetSpec::default());
        assert_eq!(texts(source, &spans), vec![source]);
    }

    #[test]
    fn test_nested_call_collapses_into_outer() {
        let source = "console.log(console.log('x'))";
        let spans = matches_in(source, &TargetSpec::parse_list(&["console.log"]).unwrap());
        assert_eq!(spans, vec![Span::new(0, source.len())]);
    }

    #[test]
    fn test_unresolvable_callee_is_skipped() {
        let source = "getConsole().log('a'); this.console.log('b'); console['log']('c');";
        assert!(matches_in(source, &TargetSpec::default()).is_empty());
    }

    #[test]
    fn test_parenthesized_links_are_transparent() {
        let source = "(console).log(1); (window.console).info(2); (console.log)(3); (0, console).log(4);";
        let spans = matches_in(source, &TargetSpec::default());
        assert_eq!(
            texts(source, &spans),
            vec!["(console).log(1)", "(window.console).info(2)", "(console.log)(3)"]
        );
    }

    #[test]
    fn test_long_member_chain_resolves() {
        let links = 3000;
        let source = format!("root{}.log(1)", ".next".repeat(links));
        let root = JsParser::new().unwrap().parse(&source).unwrap();
        let nodes = breadth_first(&root);
        let call = nodes
            .iter()
            .find(|n| n.kind() == "call_expression")
            .unwrap();
        let SyntaxNode::Call { callee, .. } = call else {
            panic!("expected call expression");
        };

        let chain = MemberChain::from_node(callee).unwrap();
        let (namespace, method) = chain.namespace_and_method().unwrap();
        assert_eq!(method, "log");
        assert_eq!(namespace.matches(".next").count(), links);

        let namespace = format!("root{}", ".next".repeat(links));
        let targets: TargetSpec = [crate::matcher::Target::new(namespace, "log")]
            .into_iter()
            .collect();
        assert_eq!(find_matches(&nodes, &targets), vec![Span::new(0, source.len())]);
    }

    #[test]
    fn test_bare_function_call_is_not_a_match() {
        let targets = TargetSpec::parse_list(&["console.log"]).unwrap();
        assert!(matches_in("log('x'); console('y');", &targets).is_empty());
    }

    #[test]
    fn test_matches_sorted_by_start() {
        let source = "if (a) {\n  foo(function () { console.info(2); });\n}\nconsole.log(1);";
        let spans = matches_in(source, &TargetSpec::default());
        assert_eq!(texts(source, &spans), vec!["console.info(2)", "console.log(1)"]);
    }

    #[test]
    fn test_argument_to_other_call_still_matches() {
        let source = "wrap(console.log('x'), 1);";
        let spans = matches_in(source, &TargetSpec::default());
        assert_eq!(texts(source, &spans), vec!["console.log('x')"]);
    }

    #[test]
    fn test_collapse_keeps_disjoint_spans() {
        let spans = [
            Span::new(0, 10),
            Span::new(2, 5),
            Span::new(4, 9),
            Span::new(10, 12),
            Span::new(13, 20),
            Span::new(13, 20),
        ];
        assert_eq!(
            collapse_nested(&spans),
            vec![Span::new(0, 10), Span::new(10, 12), Span::new(13, 20)]
        );
    }

    #[test]
    fn test_member_chain_dotted() {
        let root = JsParser::new().unwrap().parse("a.b.c.d").unwrap();
        let nodes = breadth_first(&root);
        let member = nodes
            .iter()
            .find(|n| n.kind() == "member_expression")
            .unwrap();

        assert_eq!(resolve_dotted_path(member).as_deref(), Some("a.b.c.d"));
        let chain = MemberChain::from_node(member).unwrap();
        assert_eq!(
            chain.namespace_and_method(),
            Some(("a.b.c".to_owned(), "d"))
        );
    }
}
