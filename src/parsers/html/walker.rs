//! DOM traversal helpers
//!
//! Every pass that removes things first takes a snapshot of what it wants to
//! touch, then mutates. The helpers below produce those snapshots, in document
//! order, so that no child list is borrowed while it is being changed.

use markup5ever_rcdom::{Handle, NodeData};

use super::dom::get_node_name;

/// Collects `node` and all of its descendants for which `predicate` holds
pub fn collect_nodes<F>(node: &Handle, predicate: F) -> Vec<Handle>
where
    F: Fn(&Handle) -> bool,
{
    let mut found_nodes = Vec::new();
    collect_into(node, &predicate, &mut found_nodes);
    found_nodes
}

fn collect_into<F>(node: &Handle, predicate: &F, found_nodes: &mut Vec<Handle>)
where
    F: Fn(&Handle) -> bool,
{
    if predicate(node) {
        found_nodes.push(node.clone());
    }

    for child_node in node.children.borrow().iter() {
        collect_into(child_node, predicate, found_nodes);
    }
}

/// Collects every element node at or below `node`
pub fn collect_elements(node: &Handle) -> Vec<Handle> {
    collect_nodes(node, |n| matches!(n.data, NodeData::Element { .. }))
}

/// Collects every element at or below `node` whose tag name satisfies `predicate`
pub fn collect_elements_named<F>(node: &Handle, predicate: F) -> Vec<Handle>
where
    F: Fn(&str) -> bool,
{
    collect_nodes(node, |n| get_node_name(n).map_or(false, &predicate))
}

/// Returns the first element named `node_name` in document order
pub fn find_first_element(node: &Handle, node_name: &str) -> Option<Handle> {
    if get_node_name(node) == Some(node_name) {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child_node| find_first_element(child_node, node_name))
}

/// Visits the tree children-first
///
/// `visit` receives each parent together with a snapshot of its children, after
/// every one of those children has itself been visited. The snapshot is taken
/// before descending, so `visit` is free to detach any of them.
pub fn walk_post_order<F>(node: &Handle, visit: &mut F)
where
    F: FnMut(&Handle, &Handle),
{
    let children: Vec<Handle> = node.children.borrow().clone();

    for child_node in children.iter() {
        walk_post_order(child_node, visit);
        visit(node, child_node);
    }
}
