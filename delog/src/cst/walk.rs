//! Breadth-first traversal of the syntax tree.

use std::collections::VecDeque;

use super::node::SyntaxNode;

/// Collect every node reachable from `root`, breadth first.
///
/// `root` comes first; siblings keep their field declaration order, so nodes
/// at the same depth appear roughly left to right. The tree owns its children
/// through `Box`/`Vec`, so each node is visited exactly once.
#[must_use]
pub fn breadth_first(root: &SyntaxNode) -> Vec<&SyntaxNode> {
    let mut nodes = vec![root];
    let mut queue = VecDeque::from([root]);

    while let Some(current) = queue.pop_front() {
        for child in current.children() {
            queue.push_back(child);
            nodes.push(child);
        }
    }

    nodes
}
