//! Tree Store Operations
//!
//! Structural queries and mutations over an owned `PositionNode` tree.
//!
//! # Invariants
//!
//! - `insert_children` only accepts nodes whose ids are new to the tree, so an
//!   existing subtree can never be attached a second time
//! - `patch_node` only touches scalar fields, never `id` or `children`
//!
//! Together these make cycles structurally impossible. Both mutations are
//! strict: an unknown id yields `OrgTreeError::NodeNotFound` and the tree is
//! left exactly as it was.

use crate::models::{
    NodePatch, NodeStatus, PositionNode, SelectOption, ValidationError, MAX_TREE_DEPTH,
};
use crate::services::error::OrgTreeError;
use std::collections::HashSet;

/// Depth-first (pre-order) lookup by id
pub fn find_node<'a>(tree: &'a PositionNode, id: &str) -> Option<&'a PositionNode> {
    if tree.id == id {
        return Some(tree);
    }
    tree.children.iter().find_map(|child| find_node(child, id))
}

/// Mutable twin of [`find_node`]
pub fn find_node_mut<'a>(tree: &'a mut PositionNode, id: &str) -> Option<&'a mut PositionNode> {
    if tree.id == id {
        return Some(tree);
    }
    tree.children
        .iter_mut()
        .find_map(|child| find_node_mut(child, id))
}

/// The node whose direct children contain `id`
///
/// Returns `None` for the root itself and for ids that are not in the tree.
pub fn find_parent_of<'a>(tree: &'a PositionNode, id: &str) -> Option<&'a PositionNode> {
    if tree.children.iter().any(|child| child.id == id) {
        return Some(tree);
    }
    tree.children
        .iter()
        .find_map(|child| find_parent_of(child, id))
}

/// All ids strictly below `node`
pub fn collect_descendant_ids(node: &PositionNode) -> HashSet<String> {
    fn collect(node: &PositionNode, ids: &mut HashSet<String>) {
        for child in &node.children {
            ids.insert(child.id.clone());
            collect(child, ids);
        }
    }

    let mut ids = HashSet::new();
    collect(node, &mut ids);
    ids
}

/// True iff the node exists and is not the unconfigured placeholder
pub fn can_add_child(tree: &PositionNode, id: &str) -> bool {
    find_node(tree, id).is_some_and(|node| !node.is_empty_placeholder())
}

/// Human readable name used for "reporting to" defaults
///
/// `"{name} ({employeeId})"`, else the designation, else `This position`.
pub fn display_name(node: &PositionNode) -> String {
    match (&node.name, &node.designation) {
        (Some(name), _) => name_with_employee_id(name, node.employee_id.as_deref()),
        (None, Some(designation)) => designation.clone(),
        (None, None) => "This position".to_string(),
    }
}

fn name_with_employee_id(name: &str, employee_id: Option<&str>) -> String {
    match employee_id {
        Some(employee_id) => format!("{} ({})", name, employee_id),
        None => name.to_string(),
    }
}

/// Configured nodes usable as a "reports to" target, in pre-order
///
/// When editing a node, pass its own id plus [`collect_descendant_ids`] as
/// `exclude` so it can never report into its own subtree.
pub fn collect_eligible_targets(
    tree: &PositionNode,
    exclude: &HashSet<String>,
) -> Vec<SelectOption> {
    fn collect(node: &PositionNode, exclude: &HashSet<String>, out: &mut Vec<SelectOption>) {
        if !exclude.contains(&node.id) && !node.is_empty_placeholder() {
            let name_label = match (&node.name, &node.designation) {
                (Some(name), _) => name_with_employee_id(name, node.employee_id.as_deref()),
                (None, Some(designation)) => designation.clone(),
                (None, None) => "Unnamed".to_string(),
            };
            let label = match &node.department_label {
                Some(dept) => format!("{} — {}", name_label, dept),
                None => name_label,
            };
            out.push(SelectOption::new(node.id.as_str(), label));
        }
        for child in &node.children {
            collect(child, exclude, out);
        }
    }

    let mut out = Vec::new();
    collect(tree, exclude, &mut out);
    out
}

fn collect_all_ids<'a>(node: &'a PositionNode, ids: &mut HashSet<&'a str>) {
    ids.insert(node.id.as_str());
    for child in &node.children {
        collect_all_ids(child, ids);
    }
}

/// Depth of the node with `id`, the root being at depth 0
pub fn depth_of(tree: &PositionNode, id: &str) -> Option<usize> {
    if tree.id == id {
        return Some(0);
    }
    tree.children
        .iter()
        .find_map(|child| depth_of(child, id))
        .map(|depth| depth + 1)
}

/// Append freshly built nodes to `parent_id`'s children
///
/// Existing children keep their order. Every incoming id (including ids inside
/// incoming subtrees) must be new to the tree and distinct within the batch.
///
/// # Errors
///
/// - `NodeNotFound` if `parent_id` is not in the tree
/// - `ValidationFailed` if an incoming node reuses an id, is an Empty
///   placeholder, fails its own validation, or would put a position deeper
///   than [`MAX_TREE_DEPTH`] levels
pub fn insert_children(
    tree: &mut PositionNode,
    parent_id: &str,
    new_nodes: Vec<PositionNode>,
) -> Result<(), OrgTreeError> {
    let parent_depth =
        depth_of(tree, parent_id).ok_or_else(|| OrgTreeError::node_not_found(parent_id))?;

    {
        let mut ids = HashSet::new();
        collect_all_ids(tree, &mut ids);
        let mut incoming = HashSet::new();
        for node in &new_nodes {
            node.validate_tree()?;
            if node.is_empty_placeholder() {
                return Err(ValidationError::EmptyBelowRoot(node.id.clone()).into());
            }
            if parent_depth + node.height() >= MAX_TREE_DEPTH {
                return Err(ValidationError::TooDeep(node.id.clone()).into());
            }
            let mut subtree = HashSet::new();
            collect_all_ids(node, &mut subtree);
            for id in subtree {
                if ids.contains(id) || !incoming.insert(id.to_string()) {
                    return Err(ValidationError::DuplicateId(id.to_string()).into());
                }
            }
        }
    }

    let parent = find_node_mut(tree, parent_id)
        .ok_or_else(|| OrgTreeError::node_not_found(parent_id))?;
    parent.children.extend(new_nodes);
    Ok(())
}

/// Shallow-merge `patch` into the node with `id`
///
/// # Errors
///
/// - `NodeNotFound` if `id` is not in the tree
/// - `InvalidUpdate` if the patch tries to turn a position back into the Empty
///   placeholder
/// - `ValidationFailed` if the merged node would be invalid (for example an
///   Empty root given position fields without a status change); the node is
///   restored in that case
pub fn patch_node(tree: &mut PositionNode, id: &str, patch: &NodePatch) -> Result<(), OrgTreeError> {
    if patch.status == Some(NodeStatus::Empty) {
        return Err(OrgTreeError::invalid_update(
            "status cannot be reset to empty",
        ));
    }

    let node = find_node_mut(tree, id).ok_or_else(|| OrgTreeError::node_not_found(id))?;

    let children = std::mem::take(&mut node.children);
    let before = node.clone();
    node.apply_patch(patch);
    let result = node.validate();
    if result.is_err() {
        *node = before;
    }
    node.children = children;

    result.map_err(OrgTreeError::from)
}

/// Number of nodes in the tree with the given status
pub fn count_by_status(tree: &PositionNode, status: NodeStatus) -> usize {
    let own = usize::from(tree.status == status);
    own + tree
        .children
        .iter()
        .map(|child| count_by_status(child, status))
        .sum::<usize>()
}
