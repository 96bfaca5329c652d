//! Filter Projection
//!
//! Derives the visible tree from the canonical tree and the current
//! [`OrgFilters`]. The canonical tree is only ever borrowed; the projection is
//! a fresh, owned copy that layout can consume.

use crate::models::{Grade, NodeStatus, OrgFilters, PositionNode};
use std::cmp::Reverse;

/// Project the canonical tree through the filters
///
/// Returns `None` only when the root itself is filtered away, either by its
/// status toggle or because nothing in the tree matches the search. With
/// `grade_sort` enabled every sibling list of the result is ordered by grade,
/// highest first.
pub fn project(tree: &PositionNode, filters: &OrgFilters) -> Option<PositionNode> {
    let needle = filters.search.to_lowercase();
    let mut visible = filter_tree(tree, filters, &needle)?;
    if filters.grade_sort {
        sort_by_grade(&mut visible);
    }
    Some(visible)
}

fn is_hidden_by_status(node: &PositionNode, filters: &OrgFilters) -> bool {
    match node.status {
        NodeStatus::Vacant => !filters.show_vacant,
        NodeStatus::Separation => !filters.show_separation,
        NodeStatus::Empty | NodeStatus::Active => false,
    }
}

/// Case-insensitive substring match; `needle` must already be lowercased
fn matches_search(node: &PositionNode, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    [&node.name, &node.designation, &node.department_label]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Post-order filter: children are decided before their parent
///
/// A node hidden by its status takes its whole subtree with it, at the root
/// as much as anywhere else.
fn filter_tree(node: &PositionNode, filters: &OrgFilters, needle: &str) -> Option<PositionNode> {
    if is_hidden_by_status(node, filters) {
        return None;
    }

    let children: Vec<PositionNode> = node
        .children
        .iter()
        .filter_map(|child| filter_tree(child, filters, needle))
        .collect();

    let keep = node.is_empty_placeholder() || matches_search(node, needle) || !children.is_empty();
    if !keep {
        return None;
    }

    Some(PositionNode {
        children,
        ..shallow_clone(node)
    })
}

fn shallow_clone(node: &PositionNode) -> PositionNode {
    PositionNode {
        id: node.id.clone(),
        status: node.status,
        assign_mode: node.assign_mode,
        department: node.department.clone(),
        department_label: node.department_label.clone(),
        designation: node.designation.clone(),
        grade: node.grade,
        employee_id: node.employee_id.clone(),
        name: node.name.clone(),
        children: Vec::new(),
    }
}

/// Stable sort of every sibling list by grade, G9 first
///
/// Nodes without a grade sort after G1; equal grades keep their order.
pub fn sort_by_grade(node: &mut PositionNode) {
    node.children
        .sort_by_key(|child| Reverse(child.grade.map(Grade::rank).unwrap_or(0)));
    for child in &mut node.children {
        sort_by_grade(child);
    }
}
